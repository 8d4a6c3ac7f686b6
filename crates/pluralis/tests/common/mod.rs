//! CLDR plural rule fixtures shared by the integration tests.

use pluralis::{PluralOperands, RuleBook, RuleSet, RuleType, parse_all};

pub const EN_CARDINAL: &str = "\
one: i = 1 and v = 0 @integer 1
other @integer 0, 2~16, 100, 1000, 10000, 100000, 1000000, … @decimal 0.0~1.5, 10.0, 100.0, 1000.0, 10000.0, 100000.0, 1000000.0, …
";

pub const EN_ORDINAL: &str = "\
one: n % 10 = 1 and n % 100 != 11 @integer 1, 21, 31, 41, 51, 61, 71, 81, 101, 1001, …
two: n % 10 = 2 and n % 100 != 12 @integer 2, 22, 32, 42, 52, 62, 72, 82, 102, 1002, …
few: n % 10 = 3 and n % 100 != 13 @integer 3, 23, 33, 43, 53, 63, 73, 83, 103, 1003, …
other @integer 0, 4~18, 100, 1000, 10000, 100000, 1000000, …
";

pub const RU_CARDINAL: &str = "\
one: v = 0 and i % 10 = 1 and i % 100 != 11 @integer 1, 21, 31, 41, 51, 61, 71, 81, 101, 1001, …
few: v = 0 and i % 10 = 2..4 and i % 100 != 12..14 @integer 2~4, 22~24, 32~34, 42~44, 52~54, 62, 102, 1002, …
many: v = 0 and i % 10 = 0 or v = 0 and i % 10 = 5..9 or v = 0 and i % 100 = 11..14 @integer 0, 5~19, 100, 1000, 10000, 100000, 1000000, …
other @decimal 0.0~1.5, 10.0, 100.0, 1000.0, 10000.0, 100000.0, 1000000.0, …
";

pub const PL_CARDINAL: &str = "\
one: i = 1 and v = 0 @integer 1
few: v = 0 and i % 10 = 2..4 and i % 100 != 12..14 @integer 2~4, 22~24, 32~34, 42~44, 52~54, 62, 102, 1002, …
many: v = 0 and i != 1 and i % 10 = 0..1 or v = 0 and i % 10 = 5..9 or v = 0 and i % 100 = 12..14 @integer 0, 5~19, 100, 1000, 10000, 100000, 1000000, …
other @decimal 0.0~1.5, 10.0, 100.0, 1000.0, 10000.0, 100000.0, 1000000.0, …
";

pub const AR_CARDINAL: &str = "\
zero: n = 0 @integer 0 @decimal 0.0, 0.00, 0.000, 0.0000
one: n = 1 @integer 1 @decimal 1.0, 1.00, 1.000, 1.0000
two: n = 2 @integer 2 @decimal 2.0, 2.00, 2.000, 2.0000
few: n % 100 = 3..10 @integer 3~10, 103~110, 1003, … @decimal 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 103.0, 1003.0, …
many: n % 100 = 11..99 @integer 11~26, 111, 1011, … @decimal 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 111.0, 1011.0, …
other @integer 100~102, 200~202, 300~302, 400~402, 500~502, 600, 1000, 10000, 100000, 1000000, … @decimal 0.1~0.9, 1.1~1.7, 10.1, 100.1, 1000.1, …
";

pub const FR_CARDINAL: &str = "\
one: i = 0,1 @integer 0, 1 @decimal 0.0~1.5
many: e = 0 and i != 0 and i % 1000000 = 0 and v = 0 or e != 0..5 @integer 1000000, 1c6, 2c6, 3c6, 4c6, 5c6, 6c6, … @decimal 1.0000001c6, 1.1c6, 2.0000001c6, 2.1c6, 3.0000001c6, 3.1c6, …
other @integer 2~17, 100, 1000, 10000, 100000, 1c3, 2c3, 3c3, 4c3, 5c3, 6c3, … @decimal 2.0~3.5, 10.0, 100.0, 1000.0, 10000.0, 100000.0, 1000000.0, 1.0001c3, 1.1c3, 2.0001c3, 2.1c3, 3.0001c3, 3.1c3, …
";

/// Every fixture with its culture and rule type.
pub const ALL: [(&str, RuleType, &str); 6] = [
    ("en", RuleType::Cardinal, EN_CARDINAL),
    ("en", RuleType::Ordinal, EN_ORDINAL),
    ("ru", RuleType::Cardinal, RU_CARDINAL),
    ("pl", RuleType::Cardinal, PL_CARDINAL),
    ("ar", RuleType::Cardinal, AR_CARDINAL),
    ("fr", RuleType::Cardinal, FR_CARDINAL),
];

/// Parse a fixture into a rule set, failing the test on any error.
pub fn rule_set(text: &str) -> RuleSet {
    let batch = parse_all(text);
    assert!(batch.errors.is_empty(), "fixture errors: {:?}", batch.errors);
    RuleSet::from_expressions(batch.rules).unwrap()
}

/// A rule book holding every fixture.
pub fn book() -> RuleBook {
    let mut book = RuleBook::builder().verify_samples(true).build();
    for (culture, rule_type, text) in ALL {
        book.add_source(culture, rule_type, text);
    }
    book
}

/// Integers 0..=1000 plus decimals with one to three fraction digits.
pub fn sweep() -> Vec<PluralOperands> {
    let mut numbers: Vec<PluralOperands> = (0..=1000i64).map(PluralOperands::from).collect();
    for text in [
        "0.0", "0.5", "1.0", "1.5", "1.00", "2.25", "3.0", "10.0", "10.1", "11.5", "21.0", "22.50",
        "100.0", "101.125", "0.001", "1.010", "12.345", "999.9",
    ] {
        numbers.push(text.parse().unwrap());
    }
    numbers
}
