//! Tests for number decomposition into plural operands.

use std::cmp::Ordering;

use pluralis::{NumberError, OperandId, PluralOperands};

fn number(text: &str) -> PluralOperands {
    PluralOperands::decompose(text).unwrap()
}

// =========================================================================
// Decomposition
// =========================================================================

#[test]
fn integer_operands() {
    let value = number("42");
    assert_eq!(value.n(), 42.into());
    assert_eq!(value.i(), 42.into());
    assert_eq!(value.v(), 0.into());
    assert_eq!(value.w(), 0.into());
    assert_eq!(value.f(), 0.into());
    assert_eq!(value.t(), 0.into());
    assert_eq!(value.e(), 0.into());
}

#[test]
fn decimal_operands_keep_trailing_zeros() {
    let value = number("1.250");
    assert_eq!(value.i(), 1.into());
    assert_eq!(value.v(), 3.into());
    assert_eq!(value.w(), 2.into());
    assert_eq!(value.f(), 250.into());
    assert_eq!(value.t(), 25.into());
}

#[test]
fn zero_fraction_has_visible_digits() {
    let value = number("3.00");
    assert_eq!(value.v(), 2.into());
    assert_eq!(value.w(), 0.into());
    assert_eq!(value.f(), 0.into());
    assert_eq!(value.t(), 0.into());
    assert!(value.is_integer());
    assert!(!value.has_fraction());
    assert!(number("3.01").has_fraction());
}

#[test]
fn negative_numbers_use_absolute_value() {
    let value = number("-1.5");
    assert_eq!(value.n().to_string(), "1.5");
    assert_eq!(value.i(), 1.into());
    assert_eq!(value.v(), 1.into());
    assert_eq!(value.f(), 5.into());
    assert_eq!(value.to_string(), "-1.5");
}

#[test]
fn compact_exponent_shifts_value() {
    let value = number("1.2c3");
    assert_eq!(value.n().to_string(), "1200");
    assert_eq!(value.i(), 1200.into());
    assert_eq!(value.v(), 0.into());
    assert_eq!(value.e(), 3.into());
    assert_eq!(value.c(), 3.into());
    assert_eq!(value.to_string(), "1.2c3");
}

#[test]
fn compact_exponent_can_leave_fraction_digits() {
    let value = number("1.20c1");
    assert_eq!(value.n().to_string(), "12.0");
    assert_eq!(value.i(), 12.into());
    assert_eq!(value.v(), 1.into());
    assert_eq!(value.w(), 0.into());
    assert_eq!(value.e(), 1.into());
}

#[test]
fn compact_million() {
    let value = number("1c6");
    assert_eq!(value.i(), 1_000_000.into());
    assert_eq!(value.e(), 6.into());

    let value = number("1.0000001c6");
    assert_eq!(value.i(), 1_000_000.into());
    assert_eq!(value.v(), 1.into());
    assert_eq!(value.f(), 1.into());
}

#[test]
fn exponent_letter_e_is_accepted() {
    assert_eq!(number("5e3").i(), 5000.into());
    assert_eq!(number("5E3").e(), 3.into());
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(number("  42 "), number("42"));
}

#[test]
fn operand_lookup_by_id() {
    let value = number("1.250");
    assert_eq!(value.operand(OperandId::T), 25.into());
    assert_eq!(value.operand(OperandId::V), 3.into());
    assert_eq!(OperandId::from_name("w"), Some(OperandId::W));
    assert_eq!(OperandId::from_name("x"), None);
}

#[test]
fn malformed_numbers_are_rejected() {
    for text in ["", "abc", "1.", ".5", "1..2", "1e", "--1", "1,5", "0x10"] {
        let error = PluralOperands::decompose(text).unwrap_err();
        assert_eq!(
            error,
            NumberError::Malformed {
                text: text.to_string()
            },
            "input {text:?}"
        );
    }
}

#[test]
fn oversized_exponents_are_out_of_range() {
    assert_eq!(number("1c1024").e(), 1024.into());
    for text in ["1c2000", "1e-1025", "1c99999999999999999999"] {
        assert_eq!(
            PluralOperands::decompose(text).unwrap_err(),
            NumberError::ExponentOutOfRange {
                text: text.to_string()
            },
            "input {text:?}"
        );
    }
}

#[test]
fn from_str_matches_decompose() {
    let parsed: PluralOperands = "7.25".parse().unwrap();
    assert_eq!(parsed, number("7.25"));
    assert!("seven".parse::<PluralOperands>().is_err());
}

#[test]
fn large_integers_are_exact() {
    let value = PluralOperands::from(u64::MAX);
    assert_eq!(value.to_string(), "18446744073709551615");
    assert_eq!(value.to_i64(), None);
    assert_eq!(number("123456789012345678901234567890").i().to_string(), "123456789012345678901234567890");
}

// =========================================================================
// Comparison and arithmetic
// =========================================================================

#[test]
fn comparison_is_numeric_equality_is_structural() {
    assert_eq!(number("1.0").compare(&number("1")), Ordering::Equal);
    assert_eq!(number("1.5").compare(&number("1")), Ordering::Greater);
    assert_eq!(number("-2").compare(&number("1")), Ordering::Less);
    assert_ne!(number("1.0"), number("1"));
}

#[test]
fn modulo_keeps_fraction_digits() {
    assert_eq!(number("21.50").modulo(10).unwrap().to_string(), "1.50");
    assert_eq!(number("112").modulo(100).unwrap(), 12.into());
    assert_eq!(number("1.2c3").modulo(1000).unwrap(), 200.into());
}

#[test]
fn modulo_sign_follows_dividend() {
    assert_eq!(number("-21").modulo(10).unwrap(), (-1).into());
}

#[test]
fn modulo_rejects_non_positive_divisors() {
    assert_eq!(
        number("5").modulo(0),
        Err(NumberError::DivisorOutOfRange {
            divisor: "0".to_string()
        })
    );
    assert!(number("5").modulo(-3).is_err());
}

#[test]
fn modulo_by_rejects_fractional_and_huge_divisors() {
    assert!(number("5").modulo_by(&number("1.5")).is_err());
    assert!(number("5").modulo_by(&number("99999999999999999999")).is_err());
    assert_eq!(number("25").modulo_by(&number("10.0")).unwrap(), 5.into());
}

#[test]
fn negate_and_complement() {
    assert_eq!(number("1.5").negate().to_string(), "-1.5");
    assert_eq!(number("5").complement(), Some((-6).into()));
    assert_eq!(number("-1").complement(), Some(0.into()));
    assert_eq!(number("1.5").complement(), None);
}

// =========================================================================
// Display
// =========================================================================

#[test]
fn display_round_trips() {
    for text in ["0", "7", "-7", "1.50", "0.05", "10.00", "1.2c3", "1c6", "5c-3", "1.0000001c6"] {
        assert_eq!(number(text).to_string(), text);
    }
}
