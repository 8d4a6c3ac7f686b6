//! Plural rule lexer and parser.
//!
//! This module turns CLDR plural rule text into an AST that can be evaluated,
//! printed, hashed, or inspected by external tooling.

pub mod ast;
mod builder;
pub mod error;
pub mod lexer;
mod printer;

pub use ast::*;
pub use builder::{RuleBatch, parse, parse_all, parse_rule};
pub use error::ParseError;
pub use lexer::{RuleTokens, is_rule, lex};
pub use printer::print;
