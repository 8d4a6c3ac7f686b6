//! Rule book: plural rule sources keyed by culture and rule type.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use bon::Builder;

use crate::interpreter::error::compute_suggestions;
use crate::interpreter::lint::lint_rules;
use crate::interpreter::plural::RuleSet;
use crate::interpreter::EvalError;
use crate::parser::ast::Expression;
use crate::parser::parse_all;
use crate::types::{
    ExpressionHash, PluralOperands, RuleInfo, RuleType, StructuralHash, normalize_culture,
};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct RuleKey {
    culture: String,
    rule_type: RuleType,
}

/// Registered rule text and its lazily built rule set.
#[derive(Debug)]
struct RuleSource {
    text: String,
    built: OnceLock<Result<Arc<RuleSet>, EvalError>>,
}

/// A registry of plural rule sets.
///
/// Rule text is registered per (culture, rule type) with
/// [`RuleBook::add_source`] and parsed on first use. Each rule set is built
/// exactly once, even when several threads ask for it at the same time, and
/// later lookups take no locks. Identical predicates are shared between rule
/// sets by structural hash.
///
/// Cultures are canonicalized, so `EN-us` and `en-US` name the same rules.
/// There is no fallback: asking for an unregistered culture is an error that
/// lists similar registered cultures.
///
/// # Example
///
/// ```
/// use pluralis::{RuleBook, RuleType};
///
/// let mut book = RuleBook::builder().build();
/// book.add_source("ru", RuleType::Cardinal, "
///     one: v = 0 and i % 10 = 1 and i % 100 != 11
///     few: v = 0 and i % 10 = 2..4 and i % 100 != 12..14
///     many: v = 0 and i % 10 = 0 or v = 0 and i % 10 = 5..9 or v = 0 and i % 100 = 11..14
///     other
/// ");
///
/// assert_eq!(book.select_str("ru", RuleType::Cardinal, "21").unwrap(), "one");
/// assert_eq!(book.select_str("ru", RuleType::Cardinal, "22").unwrap(), "few");
/// assert_eq!(book.select_str("ru", RuleType::Cardinal, "1.5").unwrap(), "other");
/// ```
#[derive(Debug, Builder)]
pub struct RuleBook {
    /// Run [`lint_rules`] when a rule set is built and log its warnings.
    #[builder(default = false)]
    verify_samples: bool,

    /// Share structurally identical predicates across rule sets.
    #[builder(default = true)]
    intern_predicates: bool,

    /// Fail a rule set when any of its lines fails to parse. When false,
    /// bad lines are logged and skipped.
    #[builder(default = true)]
    strict: bool,

    #[builder(skip)]
    sources: BTreeMap<RuleKey, RuleSource>,

    #[builder(skip)]
    interned: Mutex<HashMap<ExpressionHash, Arc<Expression>>>,
}

impl Default for RuleBook {
    fn default() -> Self {
        RuleBook::builder().build()
    }
}

impl RuleBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the rule text for a culture and rule type, replacing any
    /// earlier text for the same key.
    ///
    /// The text is parsed with [`parse_all`] when the rule set is first
    /// requested. Lines inherit the culture and rule type given here; lines
    /// that name a different culture or rule type are skipped.
    pub fn add_source(
        &mut self,
        culture: impl AsRef<str>,
        rule_type: RuleType,
        text: impl Into<String>,
    ) {
        let key = RuleKey {
            culture: normalize_culture(culture.as_ref()),
            rule_type,
        };
        self.sources.insert(
            key,
            RuleSource {
                text: text.into(),
                built: OnceLock::new(),
            },
        );
    }

    /// True if rules are registered for the culture and rule type.
    pub fn contains(&self, culture: &str, rule_type: RuleType) -> bool {
        self.sources.contains_key(&RuleKey {
            culture: normalize_culture(culture),
            rule_type,
        })
    }

    /// Canonical names of all registered cultures, sorted, without
    /// duplicates. The root culture is `""`.
    pub fn cultures(&self) -> Vec<&str> {
        let mut cultures: Vec<&str> = self.sources.keys().map(|key| key.culture.as_str()).collect();
        cultures.dedup();
        cultures
    }

    /// The rule set for a culture and rule type, building it on first use.
    pub fn rules_for(&self, culture: &str, rule_type: RuleType) -> Result<Arc<RuleSet>, EvalError> {
        let key = RuleKey {
            culture: normalize_culture(culture),
            rule_type,
        };
        let Some(source) = self.sources.get(&key) else {
            return Err(self.not_found(culture, rule_type));
        };
        source
            .built
            .get_or_init(|| self.build(&key, &source.text))
            .clone()
    }

    /// Select the plural case of a number.
    pub fn select(
        &self,
        culture: &str,
        rule_type: RuleType,
        number: &PluralOperands,
    ) -> Result<String, EvalError> {
        let rules = self.rules_for(culture, rule_type)?;
        Ok(rules.select(number)?.to_string())
    }

    /// Select the plural case of a number given as text, such as `"1.50"` or
    /// `"1.2c3"`.
    pub fn select_str(
        &self,
        culture: &str,
        rule_type: RuleType,
        number: &str,
    ) -> Result<String, EvalError> {
        let number = PluralOperands::decompose(number)?;
        self.select(culture, rule_type, &number)
    }

    fn build(&self, key: &RuleKey, text: &str) -> Result<Arc<RuleSet>, EvalError> {
        let batch = parse_all(text);
        if !batch.errors.is_empty() {
            if self.strict {
                return Err(EvalError::InvalidRuleSet {
                    culture: key.culture.clone(),
                    errors: batch.errors,
                });
            }
            for error in &batch.errors {
                tracing::warn!(culture = %key.culture, %error, "skipping invalid plural rule");
            }
        }

        let defaults = RuleInfo::builder()
            .culture(key.culture.clone())
            .rule_type(key.rule_type)
            .build();
        let expressions: Vec<_> = batch
            .rules
            .into_iter()
            .map(|mut rule| {
                rule.info = rule.info.merged_over(&defaults);
                rule
            })
            .filter(|rule| {
                let matches = normalize_culture(&rule.info.culture) == key.culture
                    && rule.info.rule_type == Some(key.rule_type);
                if !matches {
                    tracing::warn!(
                        culture = %key.culture,
                        line = rule.line,
                        info = %rule.info,
                        "skipping plural rule registered for another key"
                    );
                }
                matches
            })
            .collect();

        if self.verify_samples {
            for warning in lint_rules(&expressions) {
                tracing::warn!(culture = %key.culture, %warning, "plural rule lint");
            }
        }

        let rule_set = RuleSet::build(expressions, |expression| self.share(expression))?;
        tracing::debug!(
            culture = %key.culture,
            rule_type = %key.rule_type,
            rules = rule_set.len(),
            "built plural rule set"
        );
        Ok(Arc::new(rule_set))
    }

    /// Return the interned copy of an expression, interning it if new.
    fn share(&self, expression: Expression) -> Arc<Expression> {
        if !self.intern_predicates {
            return Arc::new(expression);
        }
        let hash = expression.structural_hash();
        let mut interned = self.interned.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = interned.get(&hash) {
            if **existing == expression {
                tracing::debug!(%hash, "reusing interned predicate");
                return Arc::clone(existing);
            }
        }
        let shared = Arc::new(expression);
        interned.insert(hash, Arc::clone(&shared));
        shared
    }

    fn not_found(&self, culture: &str, rule_type: RuleType) -> EvalError {
        let available: Vec<String> = self
            .sources
            .keys()
            .filter(|key| key.rule_type == rule_type)
            .map(|key| key.culture.clone())
            .collect();
        EvalError::PluralRulesNotFound {
            culture: culture.to_string(),
            rule_type: Some(rule_type),
            suggestions: compute_suggestions(&normalize_culture(culture), &available),
        }
    }
}
