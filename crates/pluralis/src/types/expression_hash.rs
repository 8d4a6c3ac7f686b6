use std::fmt;

use const_fnv1a_hash::fnv1a_hash_str_64;
use serde::{Deserialize, Serialize};

/// A stable 64-bit content hash of a rule expression.
///
/// `ExpressionHash` is a 64-bit FNV-1a hash over a canonical structural
/// encoding of the expression tree. It does not depend on whitespace,
/// parenthesization, process, or platform, so independently parsed copies of
/// the same rule text always hash equal. Rule books use it to share identical
/// predicates across cultures.
///
/// # Example
///
/// ```
/// use pluralis::StructuralHash;
/// use pluralis::parser::parse_rule;
///
/// let a = parse_rule("one: i = 1 and v = 0").unwrap();
/// let b = parse_rule("one:i=1   and v=0").unwrap();
/// assert_eq!(a.structural_hash(), b.structural_hash());
/// ```
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExpressionHash(u64);

impl ExpressionHash {
    /// Hash a canonical structural key.
    pub const fn from_key(key: &str) -> Self {
        Self(fnv1a_hash_str_64(key))
    }

    /// Get the raw hash value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExpressionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExpressionHash({:016x})", self.0)
    }
}

/// Types with a canonical structural encoding.
pub trait StructuralHash {
    /// Append the canonical encoding of `self` to `out`.
    fn write_structure(&self, out: &mut String);

    /// The canonical encoding as an owned string.
    fn structural_key(&self) -> String {
        let mut out = String::new();
        self.write_structure(&mut out);
        out
    }

    /// FNV-1a hash of [`StructuralHash::structural_key`].
    fn structural_hash(&self) -> ExpressionHash {
        ExpressionHash::from_key(&self.structural_key())
    }
}
