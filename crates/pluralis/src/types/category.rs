use std::fmt;

use serde::{Deserialize, Serialize};

/// CLDR plural categories.
///
/// Rule sets may also use custom case names; those are carried as plain
/// strings and have no `PluralCategory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// All categories in CLDR order.
    pub const ALL: [PluralCategory; 6] = [
        PluralCategory::Zero,
        PluralCategory::One,
        PluralCategory::Two,
        PluralCategory::Few,
        PluralCategory::Many,
        PluralCategory::Other,
    ];

    /// Look up a category by its CLDR keyword.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operands a plural rule can refer to (TR35 "Plural Operand Meanings").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandId {
    /// Absolute value of the source number.
    N,
    /// Integer digits of `n`.
    I,
    /// Number of visible fraction digits, with trailing zeros.
    V,
    /// Number of visible fraction digits, without trailing zeros.
    W,
    /// Visible fraction digits, with trailing zeros, as an integer.
    F,
    /// Visible fraction digits, without trailing zeros, as an integer.
    T,
    /// Compact decimal exponent.
    E,
    /// Synonym for `E`.
    C,
}

impl OperandId {
    pub const ALL: [OperandId; 8] = [
        OperandId::N,
        OperandId::I,
        OperandId::V,
        OperandId::W,
        OperandId::F,
        OperandId::T,
        OperandId::E,
        OperandId::C,
    ];

    /// Resolve an operand name as written in rule text.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|operand| operand.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            OperandId::N => "n",
            OperandId::I => "i",
            OperandId::V => "v",
            OperandId::W => "w",
            OperandId::F => "f",
            OperandId::T => "t",
            OperandId::E => "e",
            OperandId::C => "c",
        }
    }
}

impl fmt::Display for OperandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
