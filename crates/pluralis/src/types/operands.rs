//! The Number Model: a decimal numeral decomposed into CLDR plural operands.
//!
//! Values are kept as exact decimals (signed digits plus a scale), never as
//! binary floating point. CLDR samples include compact numbers such as
//! `1.0000001c6` and equality at specific fractional precision (`1.0` versus
//! `1`), both of which need exact arithmetic.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use thiserror::Error;
use winnow::ascii::digit1;
use winnow::combinator::{opt, preceded};
use winnow::prelude::*;
use winnow::token::one_of;

use crate::types::OperandId;

/// Largest accepted magnitude of a compact exponent (`1c6`, `5e-3`).
const MAX_EXPONENT: i64 = 1024;

/// Errors produced while building or transforming a [`PluralOperands`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    /// The text is not a decimal or compact-exponent numeral.
    #[error("malformed number: '{text}'")]
    Malformed { text: String },

    /// A compact exponent larger in magnitude than the supported limit.
    #[error("exponent out of range in '{text}', limit is 1024")]
    ExponentOutOfRange { text: String },

    /// A modulo divisor is zero, negative, fractional, or does not fit `i64`.
    #[error("divisor out of range: {divisor}")]
    DivisorOutOfRange { divisor: String },
}

/// A decimal number decomposed into the TR35 plural operands.
///
/// The value is `digits * 10^-scale`. A negative scale means trailing
/// integer zeros that were produced by a compact exponent, so `1.2c3` is
/// stored as digits `12`, scale `-2`, exponent `3`.
///
/// Equality is structural: `1.0` and `1` are different numbers here because
/// their `v` operands differ. Use [`PluralOperands::compare`] for numeric
/// comparison.
///
/// # Example
///
/// ```
/// use pluralis::PluralOperands;
///
/// let number: PluralOperands = "1.250".parse().unwrap();
/// assert_eq!(number.i(), 1.into());
/// assert_eq!(number.v(), 3.into());
/// assert_eq!(number.w(), 2.into());
/// assert_eq!(number.f(), 250.into());
/// assert_eq!(number.t(), 25.into());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluralOperands {
    digits: BigInt,
    scale: i64,
    exponent: i64,
}

/// Raw pieces of a numeral before they are assembled into digits and scale.
struct Numeral<'i> {
    negative: bool,
    integer: &'i str,
    fraction: &'i str,
    exponent: Option<(bool, &'i str)>,
}

impl PluralOperands {
    /// Decompose a decimal or compact numeral (`12`, `1.50`, `1.2c3`, `5e6`).
    ///
    /// Surrounding whitespace is ignored. Compact exponents are bounded to
    /// `±1024` so that a short input cannot expand into an unbounded digit
    /// string; larger ones fail with [`NumberError::ExponentOutOfRange`].
    pub fn decompose(text: &str) -> Result<Self, NumberError> {
        let malformed = || NumberError::Malformed {
            text: text.to_string(),
        };
        let parts_text = text.trim();
        let parts = numeral.parse(parts_text).map_err(|_| malformed())?;

        let mut digits: BigInt = format!("{}{}", parts.integer, parts.fraction)
            .parse()
            .map_err(|_| malformed())?;
        if parts.negative {
            digits = -digits;
        }

        let exponent = match parts.exponent {
            Some((negative, text)) => {
                let out_of_range = || NumberError::ExponentOutOfRange {
                    text: parts_text.to_string(),
                };
                let magnitude: i64 = text.parse().map_err(|_| out_of_range())?;
                if magnitude > MAX_EXPONENT {
                    return Err(out_of_range());
                }
                if negative { -magnitude } else { magnitude }
            }
            None => 0,
        };
        let fraction_len = i64::try_from(parts.fraction.len()).map_err(|_| malformed())?;

        Ok(Self {
            digits,
            scale: fraction_len - exponent,
            exponent,
        })
    }

    /// An integer-valued number with no visible fraction digits.
    pub fn integer(value: impl Into<BigInt>) -> Self {
        Self {
            digits: value.into(),
            scale: 0,
            exponent: 0,
        }
    }

    /// Absolute value of the source number.
    pub fn n(&self) -> Self {
        Self {
            digits: self.magnitude(),
            scale: self.scale,
            exponent: 0,
        }
    }

    /// Integer digits of `n`.
    pub fn i(&self) -> Self {
        Self::integer(self.integer_digits())
    }

    /// Number of visible fraction digits, with trailing zeros.
    pub fn v(&self) -> Self {
        Self::integer(self.visible_fraction_len())
    }

    /// Number of visible fraction digits, without trailing zeros.
    pub fn w(&self) -> Self {
        Self::integer(self.trimmed_fraction().1)
    }

    /// Visible fraction digits, with trailing zeros, as an integer.
    pub fn f(&self) -> Self {
        Self::integer(self.fraction_digits())
    }

    /// Visible fraction digits, without trailing zeros, as an integer.
    pub fn t(&self) -> Self {
        Self::integer(self.trimmed_fraction().0)
    }

    /// Compact decimal exponent.
    pub fn e(&self) -> Self {
        Self::integer(self.exponent)
    }

    /// Synonym for [`PluralOperands::e`].
    pub fn c(&self) -> Self {
        self.e()
    }

    /// Resolve an operand by id.
    pub fn operand(&self, id: OperandId) -> Self {
        match id {
            OperandId::N => self.n(),
            OperandId::I => self.i(),
            OperandId::V => self.v(),
            OperandId::W => self.w(),
            OperandId::F => self.f(),
            OperandId::T => self.t(),
            OperandId::E => self.e(),
            OperandId::C => self.c(),
        }
    }

    /// The compact exponent as a plain integer.
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// True when the number has a non-zero fractional part (`t > 0`).
    pub fn has_fraction(&self) -> bool {
        !self.fraction_digits().is_zero()
    }

    /// True when the fractional part is zero, even if fraction digits are
    /// visible (`3.00`).
    pub fn is_integer(&self) -> bool {
        !self.has_fraction()
    }

    /// Exact decimal comparison. `1.0` compares equal to `1`.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.to_big_decimal().cmp(&other.to_big_decimal())
    }

    /// The exact value as a `BigDecimal`.
    pub fn to_big_decimal(&self) -> BigDecimal {
        BigDecimal::new(self.digits.clone(), self.scale)
    }

    /// The value as an `i64`, if it is integral and in range.
    pub fn to_i64(&self) -> Option<i64> {
        if self.has_fraction() {
            return None;
        }
        let integer = self.integer_digits();
        let signed = if self.is_negative() { -integer } else { integer };
        signed.to_i64()
    }

    /// `self mod divisor`, keeping visible fraction digits (`21.50 % 10` is
    /// `1.50`). The sign of the result follows the dividend.
    pub fn modulo(&self, divisor: i64) -> Result<Self, NumberError> {
        if divisor <= 0 {
            return Err(NumberError::DivisorOutOfRange {
                divisor: divisor.to_string(),
            });
        }
        let scale = self.scale.max(0);
        let digits = if self.scale < 0 {
            &self.digits * pow10(-self.scale)
        } else {
            self.digits.clone()
        };
        let modulus = BigInt::from(divisor) * pow10(scale);
        Ok(Self {
            digits: digits % modulus,
            scale,
            exponent: 0,
        })
    }

    /// `self mod divisor` where the divisor is itself a number. It must be a
    /// positive integer that fits `i64`.
    pub fn modulo_by(&self, divisor: &Self) -> Result<Self, NumberError> {
        let value = divisor
            .to_i64()
            .ok_or_else(|| NumberError::DivisorOutOfRange {
                divisor: divisor.to_string(),
            })?;
        self.modulo(value)
    }

    /// The same number with its sign flipped.
    pub fn negate(&self) -> Self {
        Self {
            digits: -&self.digits,
            scale: self.scale,
            exponent: self.exponent,
        }
    }

    /// Two's complement of an integral value (`-x - 1`), or `None` for
    /// numbers with a fractional part.
    pub fn complement(&self) -> Option<Self> {
        if self.has_fraction() {
            return None;
        }
        let integer = self.integer_digits();
        let signed = if self.is_negative() { -integer } else { integer };
        Some(Self::integer(-signed - 1))
    }

    fn is_negative(&self) -> bool {
        self.digits < BigInt::zero()
    }

    fn magnitude(&self) -> BigInt {
        if self.is_negative() {
            -&self.digits
        } else {
            self.digits.clone()
        }
    }

    fn integer_digits(&self) -> BigInt {
        if self.scale <= 0 {
            self.magnitude() * pow10(-self.scale)
        } else {
            self.magnitude() / pow10(self.scale)
        }
    }

    fn visible_fraction_len(&self) -> i64 {
        self.scale.max(0)
    }

    fn fraction_digits(&self) -> BigInt {
        if self.scale <= 0 {
            BigInt::zero()
        } else {
            self.magnitude() % pow10(self.scale)
        }
    }

    /// `(t, w)`: fraction digits and their count with trailing zeros removed.
    fn trimmed_fraction(&self) -> (BigInt, i64) {
        let mut digits = self.fraction_digits();
        let mut len = self.visible_fraction_len();
        if digits.is_zero() {
            return (digits, 0);
        }
        let ten = BigInt::from(10u32);
        while (&digits % &ten).is_zero() {
            digits /= &ten;
            len -= 1;
        }
        (digits, len)
    }
}

/// `10^exponent` for a non-negative exponent.
fn pow10(exponent: i64) -> BigInt {
    let exponent = u32::try_from(exponent.max(0)).unwrap_or(u32::MAX);
    BigInt::from(10u32).pow(exponent)
}

/// Parse `[+-]? digits ('.' digits)? ([cCeE] [+-]? digits)?`.
fn numeral<'i>(input: &mut &'i str) -> ModalResult<Numeral<'i>> {
    let sign = opt(one_of(['+', '-'])).parse_next(input)?;
    let integer = digit1.parse_next(input)?;
    let fraction = opt(preceded('.', digit1)).parse_next(input)?;
    let exponent = opt(preceded(
        one_of(['c', 'C', 'e', 'E']),
        (opt(one_of(['+', '-'])), digit1),
    ))
    .parse_next(input)?;

    Ok(Numeral {
        negative: sign == Some('-'),
        integer,
        fraction: fraction.unwrap_or_default(),
        exponent: exponent.map(|(sign, digits)| (sign == Some('-'), digits)),
    })
}

/// Write `digits * 10^-scale` without an exponent.
fn write_plain(f: &mut fmt::Formatter<'_>, digits: &BigInt, scale: i64) -> fmt::Result {
    if digits.is_zero() && scale <= 0 {
        return f.write_str("0");
    }
    if scale <= 0 {
        write!(f, "{digits}")?;
        for _ in 0..-scale {
            f.write_str("0")?;
        }
        return Ok(());
    }

    let negative = *digits < BigInt::zero();
    let magnitude = if negative { -digits } else { digits.clone() };
    let text = magnitude.to_string();
    let width = usize::try_from(scale).unwrap_or(usize::MAX).saturating_add(1);
    let padded = format!("{text:0>width$}");
    let (integer, fraction) = padded.split_at(padded.len() - (width - 1));
    if negative {
        f.write_str("-")?;
    }
    write!(f, "{integer}.{fraction}")
}

impl fmt::Display for PluralOperands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_plain(f, &self.digits, self.scale + self.exponent)?;
        if self.exponent != 0 {
            write!(f, "c{}", self.exponent)?;
        }
        Ok(())
    }
}

impl FromStr for PluralOperands {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decompose(s)
    }
}

impl From<i64> for PluralOperands {
    fn from(value: i64) -> Self {
        Self::integer(value)
    }
}

impl From<i32> for PluralOperands {
    fn from(value: i32) -> Self {
        Self::integer(value)
    }
}

impl From<u64> for PluralOperands {
    fn from(value: u64) -> Self {
        Self::integer(value)
    }
}

impl From<u32> for PluralOperands {
    fn from(value: u32) -> Self {
        Self::integer(value)
    }
}

impl From<usize> for PluralOperands {
    fn from(value: usize) -> Self {
        Self::integer(value)
    }
}
