//! Parse error types for plural rules.

use thiserror::Error;

/// An error that occurred while parsing a rule line.
///
/// Every variant carries the 1-based line and column of the offending text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line does not match the rule grammar.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// A case carries more than one boolean expression.
    #[error("duplicate expression for case '{case}' at {line}:{column}: '{text}'")]
    DuplicateCaseExpression {
        line: usize,
        column: usize,
        case: String,
        text: String,
    },

    /// An operator that is not part of the rule grammar, such as `==`.
    #[error("unrecognized operator '{operator}' at {line}:{column}")]
    UnrecognizedOperator {
        line: usize,
        column: usize,
        operator: String,
    },

    /// A sample value that is neither a number, a range, nor `…`.
    #[error("invalid sample value '{value}' at {line}:{column}")]
    InvalidSample {
        line: usize,
        column: usize,
        value: String,
    },

    /// A literal modulo divisor outside `1..=i64::MAX`.
    #[error("divisor out of range at {line}:{column}: '{divisor}'")]
    DivisorOutOfRange {
        line: usize,
        column: usize,
        divisor: String,
    },

    /// A group or range outside a relation, or one built from non-constants.
    #[error("misplaced range or list at {line}:{column}: '{text}'")]
    MisplacedRange {
        line: usize,
        column: usize,
        text: String,
    },

    /// A rule info key other than RuleSet, Category, Culture, Case, Required.
    #[error(
        "unknown rule info key '{key}' at {line}:{column}{}",
        format_suggestions(suggestions)
    )]
    UnknownRuleInfoKey {
        line: usize,
        column: usize,
        key: String,
        suggestions: Vec<String>,
    },

    /// A known rule info key with a value it cannot take.
    #[error("invalid value '{value}' for rule info key '{key}' at {line}:{column}")]
    InvalidRuleInfoValue {
        line: usize,
        column: usize,
        key: String,
        value: String,
    },
}

impl ParseError {
    /// The 1-based line of the error.
    pub fn line(&self) -> usize {
        match self {
            ParseError::Syntax { line, .. }
            | ParseError::DuplicateCaseExpression { line, .. }
            | ParseError::UnrecognizedOperator { line, .. }
            | ParseError::InvalidSample { line, .. }
            | ParseError::DivisorOutOfRange { line, .. }
            | ParseError::MisplacedRange { line, .. }
            | ParseError::UnknownRuleInfoKey { line, .. }
            | ParseError::InvalidRuleInfoValue { line, .. } => *line,
        }
    }

    /// The 1-based column of the error, counted in characters.
    pub fn column(&self) -> usize {
        match self {
            ParseError::Syntax { column, .. }
            | ParseError::DuplicateCaseExpression { column, .. }
            | ParseError::UnrecognizedOperator { column, .. }
            | ParseError::InvalidSample { column, .. }
            | ParseError::DivisorOutOfRange { column, .. }
            | ParseError::MisplacedRange { column, .. }
            | ParseError::UnknownRuleInfoKey { column, .. }
            | ParseError::InvalidRuleInfoValue { column, .. } => *column,
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}
