//! Error types for the plural rule interpreter.

use strsim::levenshtein;
use thiserror::Error;

use crate::parser::ParseError;
use crate::types::{NumberError, RuleType};

/// An error that occurred while evaluating rules or resolving a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A number could not be decomposed into plural operands.
    #[error("malformed number: '{text}'")]
    MalformedNumber { text: String },

    /// A number's compact exponent exceeds the supported magnitude.
    #[error("exponent out of range in '{text}'")]
    ExponentOutOfRange { text: String },

    /// A modulo divisor that is zero, negative, fractional, or beyond `i64`.
    #[error("divisor out of range: {divisor}")]
    DivisorOutOfRange { divisor: String },

    /// An operand name other than `n`, `i`, `v`, `w`, `f`, `t`, `e`, `c`.
    #[error("unknown operand '{name}'")]
    UnknownOperand { name: String },

    /// A node used where it has no meaning, such as a bare constant in
    /// boolean position.
    #[error("unsupported {kind} expression where a {expected} is expected")]
    UnsupportedExpression {
        kind: &'static str,
        expected: &'static str,
    },

    /// A case other than `other` was declared without an expression.
    #[error("case '{case}' on line {line} has no expression")]
    MissingExpression { case: String, line: usize },

    /// No rules are registered for a culture and rule type.
    #[error(
        "no {} plural rules for culture '{culture}'{}",
        rule_type.map_or("", RuleType::as_str),
        format_suggestions(suggestions)
    )]
    PluralRulesNotFound {
        culture: String,
        rule_type: Option<RuleType>,
        suggestions: Vec<String>,
    },

    /// A lazily built rule set failed to parse.
    #[error("invalid rule set for culture '{culture}': {}", join_errors(errors))]
    InvalidRuleSet {
        culture: String,
        errors: Vec<ParseError>,
    },
}

impl From<NumberError> for EvalError {
    fn from(error: NumberError) -> Self {
        match error {
            NumberError::Malformed { text } => EvalError::MalformedNumber { text },
            NumberError::ExponentOutOfRange { text } => EvalError::ExponentOutOfRange { text },
            NumberError::DivisorOutOfRange { divisor } => EvalError::DivisorOutOfRange { divisor },
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

fn join_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Compute typo suggestions for `key` among `available`.
///
/// Returns at most three candidates, closest first. Short keys tolerate one
/// edit, longer keys two. Exact matches are not suggestions. Comparison
/// ignores ASCII case.
pub fn compute_suggestions(key: &str, available: &[String]) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
    let key = key.to_ascii_lowercase();
    let mut suggestions: Vec<(usize, String)> = available
        .iter()
        .filter_map(|candidate| {
            let distance = levenshtein(&key, &candidate.to_ascii_lowercase());
            if distance <= max_distance && distance > 0 {
                Some((distance, candidate.clone()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(distance, _)| *distance);
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate)
        .collect()
}
