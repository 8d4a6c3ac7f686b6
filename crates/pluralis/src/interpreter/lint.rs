//! Static checks for plural rule data.
//!
//! Verifies that each rule's `@integer`/`@decimal` samples actually select
//! that rule, and that every (culture, rule type) group is complete.

use std::collections::HashSet;

use thiserror::Error;

use crate::interpreter::evaluator::evaluate_bool;
use crate::parser::ast::{Expression, RuleExpression};
use crate::types::{PluralOperands, RuleType, normalize_culture};

/// Integer sample ranges wider than this are checked at their endpoints only.
const MAX_EXPANDED_RANGE: i64 = 1000;

/// A non-fatal problem found in rule data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintWarning {
    /// A sample does not satisfy the rule it is listed under.
    #[error("line {line}: sample {sample} does not satisfy case '{case}'")]
    SampleMismatch {
        line: usize,
        case: String,
        sample: String,
    },

    /// A sample satisfies its rule but an earlier rule captures it first.
    #[error("line {line}: sample {sample} of case '{case}' is selected by earlier case '{earlier}'")]
    SampleShadowed {
        line: usize,
        case: String,
        sample: String,
        earlier: String,
    },

    /// A sample could not be evaluated against the rules.
    #[error("line {line}: sample {sample} of case '{case}' failed to evaluate: {message}")]
    SampleError {
        line: usize,
        case: String,
        sample: String,
        message: String,
    },

    /// A rule group without the expression-less `other` rule.
    #[error("{} rules for culture '{culture}' have no catch-all 'other' rule", type_name(*rule_type))]
    MissingCatchAll {
        culture: String,
        rule_type: Option<RuleType>,
    },

    /// A rule group with more than one catch-all.
    #[error("{} rules for culture '{culture}' have {count} catch-all 'other' rules", type_name(*rule_type))]
    MultipleCatchAll {
        culture: String,
        rule_type: Option<RuleType>,
        count: usize,
    },

    /// The same case name appears twice within a group.
    #[error("line {line}: case '{case}' is already defined for culture '{culture}'")]
    DuplicateCase {
        line: usize,
        culture: String,
        case: String,
    },
}

fn type_name(rule_type: Option<RuleType>) -> &'static str {
    rule_type.map_or("untyped", RuleType::as_str)
}

/// Runs all lint checks over parsed rules, returning warnings.
///
/// Rules are grouped by (culture, rule type); within a group they are
/// checked in the order given, which is the order they will be evaluated in.
///
/// # Example
///
/// ```
/// use pluralis::interpreter::{LintWarning, lint_rules};
/// use pluralis::parser::parse_all;
///
/// let batch = parse_all("one: i = 1 and v = 0 @integer 1, 2\nother @integer 0, 3~5");
/// let warnings = lint_rules(&batch.rules);
/// assert_eq!(warnings.len(), 1);
/// assert!(matches!(warnings[0], LintWarning::SampleMismatch { .. }));
/// ```
pub fn lint_rules(rules: &[RuleExpression]) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    for group in groups(rules) {
        lint_catch_all(&group, &mut warnings);
        lint_duplicate_cases(&group, &mut warnings);
        lint_samples(&group, &mut warnings);
    }
    warnings
}

/// Rules grouped by normalized culture and rule type, in order of first
/// appearance.
fn groups(rules: &[RuleExpression]) -> Vec<Vec<&RuleExpression>> {
    let mut keys: Vec<(String, Option<RuleType>)> = Vec::new();
    let mut groups: Vec<Vec<&RuleExpression>> = Vec::new();
    for rule in rules {
        let key = (normalize_culture(&rule.info.culture), rule.info.rule_type);
        match keys.iter().position(|existing| *existing == key) {
            Some(index) => groups[index].push(rule),
            None => {
                keys.push(key);
                groups.push(vec![rule]);
            }
        }
    }
    groups
}

fn lint_catch_all(group: &[&RuleExpression], warnings: &mut Vec<LintWarning>) {
    let Some(first) = group.first() else {
        return;
    };
    let culture = first.info.culture.clone();
    let rule_type = first.info.rule_type;
    match group.iter().filter(|rule| rule.is_catch_all()).count() {
        0 => warnings.push(LintWarning::MissingCatchAll { culture, rule_type }),
        1 => {}
        count => warnings.push(LintWarning::MultipleCatchAll {
            culture,
            rule_type,
            count,
        }),
    }
}

fn lint_duplicate_cases(group: &[&RuleExpression], warnings: &mut Vec<LintWarning>) {
    let mut seen = HashSet::new();
    for rule in group {
        if !seen.insert(rule.case()) {
            warnings.push(LintWarning::DuplicateCase {
                line: rule.line,
                culture: rule.info.culture.clone(),
                case: rule.case().to_string(),
            });
        }
    }
}

fn lint_samples(group: &[&RuleExpression], warnings: &mut Vec<LintWarning>) {
    for (index, rule) in group.iter().enumerate() {
        for samples in &rule.samples {
            for sample in samples.values.iter().flat_map(expand_sample) {
                if let Err(message) = check_sample(group, index, &sample, warnings) {
                    warnings.push(LintWarning::SampleError {
                        line: rule.line,
                        case: rule.case().to_string(),
                        sample: sample.to_string(),
                        message,
                    });
                }
            }
        }
    }
}

/// Check one sample of `group[index]` against that rule and the rules
/// before it.
fn check_sample(
    group: &[&RuleExpression],
    index: usize,
    sample: &PluralOperands,
    warnings: &mut Vec<LintWarning>,
) -> Result<(), String> {
    let Some(rule) = group.get(index) else {
        return Ok(());
    };
    let Some(own) = applies(rule, sample)? else {
        return Ok(());
    };
    if !own {
        warnings.push(LintWarning::SampleMismatch {
            line: rule.line,
            case: rule.case().to_string(),
            sample: sample.to_string(),
        });
        return Ok(());
    }
    for earlier in group.iter().take(index) {
        if applies(earlier, sample)? == Some(true) {
            warnings.push(LintWarning::SampleShadowed {
                line: rule.line,
                case: rule.case().to_string(),
                sample: sample.to_string(),
                earlier: earlier.case().to_string(),
            });
            break;
        }
    }
    Ok(())
}

/// Whether a rule applies to a number. `None` for a rule that cannot apply
/// to anything (a non-`other` case without an expression).
fn applies(rule: &RuleExpression, number: &PluralOperands) -> Result<Option<bool>, String> {
    match &rule.rule {
        Some(expression) => evaluate_bool(expression, number)
            .map(Some)
            .map_err(|error| error.to_string()),
        None if rule.is_catch_all() => Ok(Some(true)),
        None => Ok(None),
    }
}

/// The concrete numbers a sample value stands for.
///
/// Integer ranges up to [`MAX_EXPANDED_RANGE`] values are expanded; other
/// ranges contribute their endpoints. `…` contributes nothing.
fn expand_sample(value: &Expression) -> Vec<PluralOperands> {
    match value {
        Expression::Constant(number) => vec![number.clone()],
        Expression::Range { min, max } => match integer_span(min, max) {
            Some((low, high)) => (low..=high).map(PluralOperands::from).collect(),
            None => vec![min.clone(), max.clone()],
        },
        _ => Vec::new(),
    }
}

/// Bounds of a small range of plain integers (no fraction digits, no
/// compact exponent).
fn integer_span(min: &PluralOperands, max: &PluralOperands) -> Option<(i64, i64)> {
    let plain = |number: &PluralOperands| number.v().to_i64() == Some(0) && number.exponent() == 0;
    if !plain(min) || !plain(max) {
        return None;
    }
    let low = min.to_i64()?;
    let high = max.to_i64()?;
    let span = high.checked_sub(low)?;
    (0..=MAX_EXPANDED_RANGE)
        .contains(&span)
        .then_some((low, high))
}
