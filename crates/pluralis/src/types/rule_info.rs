use std::fmt;

use bon::Builder;
use icu_locale_core::LanguageIdentifier;
use serde::{Deserialize, Serialize};

/// Whether a rule set classifies counts (`cardinal`) or positions (`ordinal`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    Cardinal,
    Ordinal,
}

impl RuleType {
    /// Parse a rule type keyword, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("cardinal") {
            Some(RuleType::Cardinal)
        } else if name.eq_ignore_ascii_case("ordinal") {
            Some(RuleType::Ordinal)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuleType::Cardinal => "cardinal",
            RuleType::Ordinal => "ordinal",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata attached to a rule line through `[Key=Value, ...]` brackets.
///
/// Empty strings and `None` mean the key was absent. An empty culture is the
/// root (invariant) culture.
///
/// # Example
///
/// ```
/// use pluralis::{RuleInfo, RuleType};
///
/// let info = RuleInfo::builder()
///     .culture("pl")
///     .rule_type(RuleType::Cardinal)
///     .case("few")
///     .build();
/// assert_eq!(info.to_string(), "[Category=cardinal, Culture=pl]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
pub struct RuleInfo {
    #[builder(default)]
    pub rule_set: String,
    pub rule_type: Option<RuleType>,
    #[builder(default)]
    pub culture: String,
    #[builder(default)]
    pub case: String,
    pub required: Option<bool>,
}

impl RuleInfo {
    /// Fill every absent key of `self` from `defaults`.
    pub fn merged_over(mut self, defaults: &RuleInfo) -> RuleInfo {
        if self.rule_set.is_empty() {
            self.rule_set.clone_from(&defaults.rule_set);
        }
        if self.rule_type.is_none() {
            self.rule_type = defaults.rule_type;
        }
        if self.culture.is_empty() {
            self.culture.clone_from(&defaults.culture);
        }
        if self.case.is_empty() {
            self.case.clone_from(&defaults.case);
        }
        if self.required.is_none() {
            self.required = defaults.required;
        }
        self
    }
}

/// Brackets are rendered without the case, which rule lines carry as their
/// case segment.
impl fmt::Display for RuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<String> = Vec::new();
        if !self.rule_set.is_empty() {
            entries.push(format!("RuleSet={}", self.rule_set));
        }
        if let Some(rule_type) = self.rule_type {
            entries.push(format!("Category={rule_type}"));
        }
        if !self.culture.is_empty() {
            entries.push(format!("Culture={}", self.culture));
        }
        if let Some(required) = self.required {
            entries.push(format!("Required={required}"));
        }
        if entries.is_empty() {
            return Ok(());
        }
        write!(f, "[{}]", entries.join(", "))
    }
}

/// Canonicalize a culture identifier so that `EN-us` and `en-US` name the
/// same rule set. `root`, `und` and the empty string all map to the root
/// culture `""`. Identifiers ICU cannot parse are kept verbatim (trimmed).
pub fn normalize_culture(culture: &str) -> String {
    let trimmed = culture.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("root") {
        return String::new();
    }
    match trimmed.parse::<LanguageIdentifier>() {
        Ok(id) => {
            let canonical = id.to_string();
            if canonical == "und" {
                String::new()
            } else {
                canonical
            }
        }
        Err(_) => trimmed.to_string(),
    }
}
