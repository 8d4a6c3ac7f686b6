//! CLDR plural rule engine.
//!
//! Parses plural rule text such as `v = 0 and i % 10 = 1 and i % 100 != 11`,
//! evaluates it against exact decimal numbers, and selects the plural case
//! (`zero`, `one`, `two`, `few`, `many`, `other`) a number takes in a
//! language.
//!
//! # Example
//!
//! ```
//! use pluralis::{RuleBook, RuleType};
//!
//! let mut book = RuleBook::new();
//! book.add_source("en", RuleType::Ordinal, "
//!     one: n % 10 = 1 and n % 100 != 11
//!     two: n % 10 = 2 and n % 100 != 12
//!     few: n % 10 = 3 and n % 100 != 13
//!     other
//! ");
//! assert_eq!(book.select_str("en", RuleType::Ordinal, "21").unwrap(), "one");
//! assert_eq!(book.select_str("en", RuleType::Ordinal, "11").unwrap(), "other");
//! ```

pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    EvalError, LintWarning, PluralRule, Predicate, RuleBook, RuleSet, compute_suggestions,
    select_case,
};
pub use parser::{Expression, ParseError, RuleExpression, Samples, parse_all, parse_rule};
pub use types::{
    ExpressionHash, NumberError, OperandId, PluralCategory, PluralOperands, RuleInfo, RuleType,
    StructuralHash,
};
