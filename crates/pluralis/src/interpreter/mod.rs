//! Plural rule interpreter.
//!
//! Evaluates parsed rule expressions against numbers, selects plural cases
//! from ordered rule sets, and manages lazily built rule sets per culture.

mod error;
mod evaluator;
mod lint;
mod plural;
mod registry;

pub use error::{EvalError, compute_suggestions};
pub use evaluator::{evaluate_bool, evaluate_number};
pub use lint::{LintWarning, lint_rules};
pub use plural::{PluralRule, Predicate, RuleSet, select_case};
pub use registry::RuleBook;
