//! AST builder: turns lexer token trees into [`RuleExpression`]s.

use winnow::stream::Offset;

use crate::interpreter::compute_suggestions;
use crate::parser::ast::{BinaryOp, Expression, RuleExpression, Samples, UnaryOp};
use crate::parser::error::ParseError;
use crate::parser::lexer::{ExprToken, KeyValueToken, RuleTokens, SampleToken, lex_line};
use crate::types::{PluralOperands, RuleInfo, RuleType, normalize_culture};

/// Rule info keys, as spelled in rule text.
const RULE_INFO_KEYS: [&str; 5] = ["RuleSet", "Category", "Culture", "Case", "Required"];

/// The outcome of parsing a multi-line rule text.
///
/// Lines fail independently: a bad line lands in `errors` and every other
/// line is still parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBatch {
    /// Parsed rules, grouped by (culture, rule type) in order of first
    /// appearance, with each group's catch-all `other` rule last.
    pub rules: Vec<RuleExpression>,
    pub errors: Vec<ParseError>,
}

impl RuleBatch {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Build a [`RuleExpression`] from lexed tokens.
///
/// Positions in errors are relative to `tokens.source`, which is treated as
/// line 1.
pub fn parse(tokens: &RuleTokens<'_>) -> Result<RuleExpression, ParseError> {
    Builder::new(tokens.source, 1).rule(tokens)
}

/// Lex and parse a single rule line.
///
/// # Example
///
/// ```
/// use pluralis::parser::parse_rule;
///
/// let rule = parse_rule("few: n % 10 = 2..4 and n % 100 != 12..14").unwrap();
/// assert_eq!(rule.case(), "few");
/// assert!(parse_rule("one: n == 1").is_err());
/// ```
pub fn parse_rule(text: &str) -> Result<RuleExpression, ParseError> {
    let builder = Builder::new(text, 1);
    let tokens = lex_line(text).map_err(|offset| builder.syntax_error(offset))?;
    builder.rule(&tokens)
}

/// Parse a rule text with one rule per line.
///
/// Blank lines and lines starting with `#` or `//` are skipped. A line that
/// holds only a rule info bracket is a header: its keys fill in the absent
/// keys of every following rule until the next header.
///
/// # Example
///
/// ```
/// use pluralis::parser::parse_all;
///
/// let batch = parse_all(
///     "[Culture=en, Category=cardinal]\n\
///      other\n\
///      one: i = 1 and v = 0",
/// );
/// assert!(batch.errors.is_empty());
/// assert_eq!(batch.rules[0].case(), "one");
/// assert_eq!(batch.rules[1].info.culture, "en");
/// ```
pub fn parse_all(text: &str) -> RuleBatch {
    let mut rules = Vec::new();
    let mut errors = Vec::new();
    let mut defaults = RuleInfo::default();

    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }

        let builder = Builder::new(line, index + 1);
        let result = match lex_line(line) {
            Ok(tokens) if tokens.case.is_none() => {
                let entries = tokens.info.as_deref().unwrap_or_default();
                match builder.rule_info(entries) {
                    Ok(info) => {
                        defaults = info;
                        continue;
                    }
                    Err(error) => {
                        defaults = RuleInfo::default();
                        Err(error)
                    }
                }
            }
            Ok(tokens) => builder.rule(&tokens),
            Err(offset) => Err(builder.syntax_error(offset)),
        };

        match result {
            Ok(mut rule) => {
                rule.info = rule.info.merged_over(&defaults);
                rules.push(rule);
            }
            Err(error) => {
                tracing::trace!(line = index + 1, %error, "rule line rejected");
                errors.push(error);
            }
        }
    }

    RuleBatch {
        rules: group_rules(rules),
        errors,
    }
}

/// Group rules by (culture, rule type) and move each group's catch-all last.
fn group_rules(rules: Vec<RuleExpression>) -> Vec<RuleExpression> {
    let mut groups: Vec<((String, Option<RuleType>), Vec<RuleExpression>)> = Vec::new();
    for rule in rules {
        let key = (normalize_culture(&rule.info.culture), rule.info.rule_type);
        match groups.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, group)) => group.push(rule),
            None => groups.push((key, vec![rule])),
        }
    }
    groups
        .into_iter()
        .flat_map(|(_, mut group)| {
            group.sort_by_key(RuleExpression::is_catch_all);
            group
        })
        .collect()
}

/// Builds AST nodes for one source line and locates diagnostics in it.
struct Builder<'a> {
    source: &'a str,
    line: usize,
}

impl<'a> Builder<'a> {
    fn new(source: &'a str, line: usize) -> Self {
        Self { source, line }
    }

    fn rule(&self, tokens: &RuleTokens<'a>) -> Result<RuleExpression, ParseError> {
        let mut info = match &tokens.info {
            Some(entries) => self.rule_info(entries)?,
            None => RuleInfo::default(),
        };

        let mut rule = None;
        if let Some(case) = &tokens.case {
            info.case = case.name.to_string();
            if let Some(extra) = case.expressions.get(1) {
                let (line, column) = self.position(extra.text);
                return Err(ParseError::DuplicateCaseExpression {
                    line,
                    column,
                    case: info.case,
                    text: extra.text.to_string(),
                });
            }
            if let Some(expression) = case.expressions.first() {
                rule = Some(self.expression(&expression.tree, false)?);
            }
        }

        let samples = tokens
            .samples
            .iter()
            .map(|samples| self.samples(samples))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RuleExpression {
            info,
            rule,
            samples,
            line: self.line,
        })
    }

    fn rule_info(&self, entries: &[KeyValueToken<'a>]) -> Result<RuleInfo, ParseError> {
        let mut info = RuleInfo::default();
        for entry in entries {
            let value = entry.value;
            match entry.key.to_ascii_lowercase().as_str() {
                "ruleset" => info.rule_set = value.to_string(),
                "culture" => info.culture = value.to_string(),
                "case" => info.case = value.to_string(),
                "category" => {
                    info.rule_type = if value.is_empty() {
                        None
                    } else {
                        Some(RuleType::from_name(value).ok_or_else(|| self.invalid_value(entry))?)
                    };
                }
                "required" => {
                    info.required = if value.is_empty() {
                        None
                    } else if value.eq_ignore_ascii_case("true") {
                        Some(true)
                    } else if value.eq_ignore_ascii_case("false") {
                        Some(false)
                    } else {
                        return Err(self.invalid_value(entry));
                    };
                }
                _ => {
                    let (line, column) = self.position(entry.key);
                    let known: Vec<String> =
                        RULE_INFO_KEYS.iter().map(ToString::to_string).collect();
                    return Err(ParseError::UnknownRuleInfoKey {
                        line,
                        column,
                        key: entry.key.to_string(),
                        suggestions: compute_suggestions(entry.key, &known),
                    });
                }
            }
        }
        Ok(info)
    }

    /// Build an expression. `in_relation` is true only for the direct
    /// operands of a relational operator, the one place lists and ranges
    /// may appear.
    fn expression(&self, token: &ExprToken<'a>, in_relation: bool) -> Result<Expression, ParseError> {
        match token {
            ExprToken::Number(text) => Ok(Expression::Constant(self.number(text)?)),
            ExprToken::Word(name) => Ok(Expression::Operand((*name).to_string())),
            ExprToken::Keyword(word) => Ok(Expression::Boolean(*word == "true")),
            ExprToken::Prefix { operator, operand } => {
                let op = UnaryOp::from_symbol(operator).ok_or_else(|| self.unrecognized(operator))?;
                Ok(Expression::unary(op, self.expression(operand, false)?))
            }
            ExprToken::Infix {
                operator,
                left,
                right,
            } => {
                let op = BinaryOp::from_symbol(operator).ok_or_else(|| self.unrecognized(operator))?;
                let left = self.expression(left, op.is_relational())?;
                let divisor = self.expression(right, op.is_relational())?;
                if op == BinaryOp::Modulo {
                    self.check_divisor(right, &divisor)?;
                }
                Ok(Expression::binary(op, left, divisor))
            }
            ExprToken::Span { min, max, .. } => {
                if !in_relation {
                    return Err(self.misplaced(token));
                }
                Ok(Expression::Range {
                    min: self.bound(min)?,
                    max: self.bound(max)?,
                })
            }
            ExprToken::List(items) => {
                if !in_relation {
                    return Err(self.misplaced(token));
                }
                let values = items
                    .iter()
                    .map(|item| self.group_element(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Expression::Group(values))
            }
            ExprToken::Paren(inner) => Ok(Expression::Parenthesis(Box::new(
                self.expression(inner, in_relation)?,
            ))),
        }
    }

    fn group_element(&self, token: &ExprToken<'a>) -> Result<Expression, ParseError> {
        match token {
            ExprToken::Number(text) => Ok(Expression::Constant(self.number(text)?)),
            ExprToken::Span { min, max, .. } => Ok(Expression::Range {
                min: self.bound(min)?,
                max: self.bound(max)?,
            }),
            _ => Err(self.misplaced(token)),
        }
    }

    fn bound(&self, token: &ExprToken<'a>) -> Result<PluralOperands, ParseError> {
        match token {
            ExprToken::Number(text) => self.number(text),
            _ => Err(self.misplaced(token)),
        }
    }

    fn number(&self, text: &str) -> Result<PluralOperands, ParseError> {
        PluralOperands::decompose(text).map_err(|error| {
            let (line, column) = self.position(text);
            ParseError::Syntax {
                line,
                column,
                message: error.to_string(),
            }
        })
    }

    /// Literal divisors must lie in `1..=i64::MAX`. Computed divisors are
    /// checked when evaluated.
    fn check_divisor(&self, token: &ExprToken<'a>, divisor: &Expression) -> Result<(), ParseError> {
        let Expression::Constant(value) = divisor.unparenthesized() else {
            return Ok(());
        };
        if value.to_i64().is_some_and(|value| value >= 1) {
            return Ok(());
        }
        let text = self.text_of(token);
        let (line, column) = self.position(text);
        Err(ParseError::DivisorOutOfRange {
            line,
            column,
            divisor: text.to_string(),
        })
    }

    fn samples(&self, token: &SampleToken<'a>) -> Result<Samples, ParseError> {
        let values = token
            .values
            .iter()
            .map(|value| self.sample_value(value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Samples {
            name: token.name.to_string(),
            values,
        })
    }

    fn sample_value(&self, text: &str) -> Result<Expression, ParseError> {
        if text == "…" || text == "..." {
            return Ok(Expression::Infinite);
        }
        let invalid = || {
            let (line, column) = self.position(text);
            ParseError::InvalidSample {
                line,
                column,
                value: text.to_string(),
            }
        };
        match text.split_once('~').or_else(|| text.split_once("..")) {
            Some((min, max)) => Ok(Expression::Range {
                min: PluralOperands::decompose(min).map_err(|_| invalid())?,
                max: PluralOperands::decompose(max).map_err(|_| invalid())?,
            }),
            None => PluralOperands::decompose(text)
                .map(Expression::Constant)
                .map_err(|_| invalid()),
        }
    }

    fn syntax_error(&self, offset: usize) -> ParseError {
        let remaining = self.source.get(offset..).unwrap_or_default();
        let (line, column) = self.position(remaining);
        let message = match remaining.chars().next() {
            Some(c) => format!("unexpected character: '{c}'"),
            None => "unexpected end of input".to_string(),
        };
        ParseError::Syntax {
            line,
            column,
            message,
        }
    }

    fn unrecognized(&self, operator: &str) -> ParseError {
        let (line, column) = self.position(operator);
        ParseError::UnrecognizedOperator {
            line,
            column,
            operator: operator.to_string(),
        }
    }

    fn misplaced(&self, token: &ExprToken<'a>) -> ParseError {
        let text = self.text_of(token);
        let (line, column) = self.position(text);
        ParseError::MisplacedRange {
            line,
            column,
            text: text.to_string(),
        }
    }

    fn invalid_value(&self, entry: &KeyValueToken<'a>) -> ParseError {
        let (line, column) = self.position(entry.value);
        ParseError::InvalidRuleInfoValue {
            line,
            column,
            key: entry.key.to_string(),
            value: entry.value.to_string(),
        }
    }

    /// The source text spanned by a token.
    fn text_of(&self, token: &ExprToken<'a>) -> &'a str {
        let first = token.first_fragment();
        let last = token.last_fragment();
        let start = self.offset(first);
        let end = self.offset(last) + last.len();
        self.source.get(start..end).unwrap_or(first)
    }

    /// Byte offset of a fragment within the source line.
    fn offset(&self, fragment: &str) -> usize {
        let range = self.source.as_bytes().as_ptr_range();
        if range.contains(&fragment.as_ptr()) {
            fragment.offset_from(&self.source)
        } else {
            self.source.len()
        }
    }

    /// 1-based line and column of a fragment, with columns counted in
    /// characters.
    fn position(&self, fragment: &str) -> (usize, usize) {
        let consumed = self.source.get(..self.offset(fragment)).unwrap_or_default();
        let newlines = consumed.matches('\n').count();
        let column = match consumed.rfind('\n') {
            Some(pos) => consumed.get(pos + 1..).unwrap_or_default().chars().count() + 1,
            None => consumed.chars().count() + 1,
        };
        (self.line + newlines, column)
    }
}
