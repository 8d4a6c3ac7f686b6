//! Plural rules and case selection.
//!
//! A [`RuleSet`] is the ordered list of (case, predicate) pairs for one
//! culture and rule type. Selection walks the rules in order and returns the
//! first case whose predicate holds, so the catch-all `other` rule must come
//! last.

use std::fmt;
use std::sync::Arc;

use crate::interpreter::EvalError;
use crate::interpreter::evaluator::evaluate_bool;
use crate::parser::ast::{BinaryOp, Expression, RuleExpression};
use crate::types::{PluralCategory, PluralOperands, RuleInfo, RuleType};

/// The condition under which a plural rule applies.
///
/// `n = 0` and `n = 1` are common enough across CLDR data to get their own
/// variants, and the expression-less `other` rule is [`Predicate::Always`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `n = 0`.
    Zero,
    /// `n = 1`.
    One,
    /// The catch-all: always true.
    Always,
    Expression(Arc<Expression>),
}

impl Predicate {
    /// Wrap a shared expression, recognizing the `n = 0` and `n = 1`
    /// shortcuts.
    pub fn new(expression: Arc<Expression>) -> Self {
        shortcut(&expression).unwrap_or(Predicate::Expression(expression))
    }

    /// Evaluate the predicate for a number.
    pub fn evaluate(&self, number: &PluralOperands) -> Result<bool, EvalError> {
        match self {
            Predicate::Zero => Ok(number.n().compare(&PluralOperands::integer(0)).is_eq()),
            Predicate::One => Ok(number.n().compare(&PluralOperands::integer(1)).is_eq()),
            Predicate::Always => Ok(true),
            Predicate::Expression(expression) => evaluate_bool(expression, number),
        }
    }

    /// The shared expression, for predicates that are not shortcuts.
    pub fn expression(&self) -> Option<&Arc<Expression>> {
        match self {
            Predicate::Expression(expression) => Some(expression),
            Predicate::Zero | Predicate::One | Predicate::Always => None,
        }
    }
}

/// Recognize `n = 0` and `n = 1`, written with integer literals.
fn shortcut(expression: &Expression) -> Option<Predicate> {
    let Expression::Binary {
        op: BinaryOp::Equal,
        left,
        right,
    } = expression.unparenthesized()
    else {
        return None;
    };
    let (Expression::Operand(name), Expression::Constant(value)) =
        (left.unparenthesized(), right.unparenthesized())
    else {
        return None;
    };
    if name != "n" {
        None
    } else if *value == PluralOperands::integer(0) {
        Some(Predicate::Zero)
    } else if *value == PluralOperands::integer(1) {
        Some(Predicate::One)
    } else {
        None
    }
}

impl From<Expression> for Predicate {
    fn from(expression: Expression) -> Self {
        Predicate::new(Arc::new(expression))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Zero => f.write_str("n = 0"),
            Predicate::One => f.write_str("n = 1"),
            Predicate::Always => Ok(()),
            Predicate::Expression(expression) => write!(f, "{expression}"),
        }
    }
}

/// A case bound to the predicate that selects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralRule {
    pub info: RuleInfo,
    pub predicate: Predicate,
}

impl PluralRule {
    pub fn new(info: RuleInfo, predicate: Predicate) -> Self {
        Self { info, predicate }
    }

    /// Convert a parsed rule line.
    ///
    /// Fails with [`EvalError::MissingExpression`] for a case other than
    /// `other` that has no expression.
    pub fn from_expression(rule: RuleExpression) -> Result<Self, EvalError> {
        Self::from_expression_with(rule, Arc::new)
    }

    pub(crate) fn from_expression_with(
        rule: RuleExpression,
        share: impl FnOnce(Expression) -> Arc<Expression>,
    ) -> Result<Self, EvalError> {
        let catch_all = rule.is_catch_all();
        let predicate = match rule.rule {
            Some(expression) => Predicate::new(share(expression)),
            None if catch_all => Predicate::Always,
            None => {
                return Err(EvalError::MissingExpression {
                    case: rule.info.case,
                    line: rule.line,
                });
            }
        };
        Ok(Self::new(rule.info, predicate))
    }

    /// The case name this rule selects.
    pub fn case(&self) -> &str {
        &self.info.case
    }

    /// Whether the rule applies to a number.
    pub fn matches(&self, number: &PluralOperands) -> Result<bool, EvalError> {
        self.predicate.evaluate(number)
    }

    pub fn is_catch_all(&self) -> bool {
        self.predicate == Predicate::Always
    }
}

impl fmt::Display for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.predicate {
            Predicate::Always => f.write_str(self.case()),
            _ => write!(f, "{}: {}", self.case(), self.predicate),
        }
    }
}

/// Select the case of the first rule whose predicate holds.
///
/// An empty rule slice fails with [`EvalError::PluralRulesNotFound`]. When no
/// rule matches (the slice lacks a catch-all), selection falls back to
/// `other`.
///
/// # Example
///
/// ```
/// use pluralis::interpreter::{PluralRule, select_case};
/// use pluralis::parser::parse_rule;
///
/// let rules = vec![
///     PluralRule::from_expression(parse_rule("one: n % 10 = 1 and n % 100 != 11").unwrap()).unwrap(),
///     PluralRule::from_expression(parse_rule("other").unwrap()).unwrap(),
/// ];
/// assert_eq!(select_case(&rules, &21.into()).unwrap(), "one");
/// assert_eq!(select_case(&rules, &11.into()).unwrap(), "other");
/// ```
pub fn select_case<'a>(
    rules: &'a [PluralRule],
    number: &PluralOperands,
) -> Result<&'a str, EvalError> {
    if rules.is_empty() {
        return Err(EvalError::PluralRulesNotFound {
            culture: String::new(),
            rule_type: None,
            suggestions: Vec::new(),
        });
    }
    for rule in rules {
        if rule.matches(number)? {
            return Ok(rule.case());
        }
    }
    tracing::warn!(%number, rules = rules.len(), "no plural rule matched, using other");
    Ok(PluralCategory::Other.as_str())
}

/// The ordered rules of one culture and rule type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    culture: String,
    rule_type: Option<RuleType>,
    rules: Vec<PluralRule>,
}

impl RuleSet {
    /// Build a rule set from parsed rule lines.
    ///
    /// Culture and rule type are taken from the first rule. Catch-all rules
    /// are moved after every other rule, keeping relative order otherwise.
    pub fn from_expressions(
        expressions: impl IntoIterator<Item = RuleExpression>,
    ) -> Result<Self, EvalError> {
        Self::build(expressions, Arc::new)
    }

    pub(crate) fn build(
        expressions: impl IntoIterator<Item = RuleExpression>,
        mut share: impl FnMut(Expression) -> Arc<Expression>,
    ) -> Result<Self, EvalError> {
        let mut rules = expressions
            .into_iter()
            .map(|expression| PluralRule::from_expression_with(expression, &mut share))
            .collect::<Result<Vec<_>, _>>()?;
        rules.sort_by_key(PluralRule::is_catch_all);

        let (culture, rule_type) = rules.first().map_or((String::new(), None), |rule| {
            (rule.info.culture.clone(), rule.info.rule_type)
        });
        Ok(Self {
            culture,
            rule_type,
            rules,
        })
    }

    /// Select the case for a number. See [`select_case`].
    pub fn select(&self, number: &PluralOperands) -> Result<&str, EvalError> {
        select_case(&self.rules, number).map_err(|error| match error {
            EvalError::PluralRulesNotFound { suggestions, .. } => EvalError::PluralRulesNotFound {
                culture: self.culture.clone(),
                rule_type: self.rule_type,
                suggestions,
            },
            other => other,
        })
    }

    /// Case names in evaluation order.
    pub fn categories(&self) -> Vec<&str> {
        self.rules.iter().map(PluralRule::case).collect()
    }

    pub fn rules(&self) -> &[PluralRule] {
        &self.rules
    }

    pub fn culture(&self) -> &str {
        &self.culture
    }

    pub fn rule_type(&self) -> Option<RuleType> {
        self.rule_type
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// One rule per line, in evaluation order.
impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, rule) in self.rules.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}
