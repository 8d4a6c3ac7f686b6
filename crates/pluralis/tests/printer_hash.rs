//! Tests for rule printing and structural hashing.

mod common;

use pluralis::parser::{BinaryOp, Expression, UnaryOp, parse_rule, print};
use pluralis::{ExpressionHash, RuleSet, StructuralHash};

fn rule_of(text: &str) -> Expression {
    parse_rule(&format!("x: {text}")).unwrap().rule.unwrap()
}

fn eq(operand: &str, value: i64) -> Expression {
    Expression::binary(
        BinaryOp::Equal,
        Expression::operand(operand),
        Expression::constant(value),
    )
}

// =========================================================================
// Printing
// =========================================================================

#[test]
fn print_parsed_rules() {
    insta::assert_snapshot!(
        print(&rule_of("n % 10 = 2..4 and n % 100 != 12..14")),
        @"n % 10 = 2..4 and n % 100 != 12..14"
    );
    insta::assert_snapshot!(print(&rule_of("i = 0, 1")), @"i = 0,1");
    insta::assert_snapshot!(print(&rule_of("n mod 10 = 1")), @"n % 10 = 1");
    insta::assert_snapshot!(print(&rule_of("n = (1,2)")), @"n = (1,2)");
    insta::assert_snapshot!(
        print(&rule_of("(n = 1 or n = 2) and v = 0")),
        @"(n = 1 or n = 2) and v = 0"
    );
}

#[test]
fn print_inserts_parentheses_for_looser_operands() {
    let or = Expression::binary(BinaryOp::Or, eq("n", 1), eq("n", 2));
    let tree = Expression::binary(BinaryOp::And, or.clone(), eq("v", 0));
    insta::assert_snapshot!(print(&tree), @"(n = 1 or n = 2) and v = 0");

    let tree = Expression::binary(BinaryOp::Or, eq("n", 3), or.clone());
    insta::assert_snapshot!(print(&tree), @"n = 3 or (n = 1 or n = 2)");

    let tree = Expression::binary(BinaryOp::Or, or, eq("n", 3));
    insta::assert_snapshot!(print(&tree), @"n = 1 or n = 2 or n = 3");
}

#[test]
fn print_unary_operators() {
    let and = Expression::binary(BinaryOp::And, eq("n", 1), eq("v", 0));
    insta::assert_snapshot!(print(&Expression::unary(UnaryOp::Not, eq("n", 1))), @"not n = 1");
    insta::assert_snapshot!(print(&Expression::unary(UnaryOp::Not, and)), @"not (n = 1 and v = 0)");

    let modulo = Expression::binary(
        BinaryOp::Modulo,
        Expression::operand("n"),
        Expression::constant(10),
    );
    insta::assert_snapshot!(print(&Expression::unary(UnaryOp::Negate, modulo)), @"-(n % 10)");
    insta::assert_snapshot!(
        print(&Expression::unary(UnaryOp::Complement, Expression::operand("i"))),
        @"~i"
    );
}

#[test]
fn print_nested_modulo() {
    let inner = Expression::binary(
        BinaryOp::Modulo,
        Expression::constant(10),
        Expression::constant(3),
    );
    let tree = Expression::binary(BinaryOp::Modulo, Expression::operand("n"), inner);
    insta::assert_snapshot!(print(&tree), @"n % (10 % 3)");
}

#[test]
fn print_rule_lines() {
    let rule = parse_rule("[Culture=pl, Category=cardinal] few: n % 10 = 2..4 @integer 2~4, 22, …")
        .unwrap();
    insta::assert_snapshot!(
        rule.to_string(),
        @"[Category=cardinal, Culture=pl] few: n % 10 = 2..4 @integer 2~4, 22, …"
    );

    let rule = parse_rule("other @integer 0, 1, 2, 3, …").unwrap();
    assert_eq!(rule.to_string(), "other @integer 0, 1, 2, 3, …");

    let rule = parse_rule("many @decimal 1.0000001c6, 0.00").unwrap();
    assert_eq!(rule.to_string(), "many @decimal 1.0000001c6, 0.00");
}

#[test]
fn print_rule_set() {
    insta::assert_snapshot!(common::rule_set(common::PL_CARDINAL).to_string(), @r"
one: i = 1 and v = 0
few: v = 0 and i % 10 = 2..4 and i % 100 != 12..14
many: v = 0 and i != 1 and i % 10 = 0..1 or v = 0 and i % 10 = 5..9 or v = 0 and i % 100 = 12..14
other
");
}

// =========================================================================
// Round Trips
// =========================================================================

#[test]
fn fixture_lines_reparse_to_the_same_rule() {
    for (_, _, text) in common::ALL {
        for line in text.lines() {
            let rule = parse_rule(line).unwrap();
            let printed = rule.to_string();
            let reparsed = parse_rule(&printed).unwrap();
            assert_eq!(reparsed, rule, "line {line:?} printed as {printed:?}");
            assert_eq!(reparsed.structural_hash(), rule.structural_hash());
        }
    }
}

#[test]
fn reprinted_rule_sets_select_the_same_cases() {
    for (culture, rule_type, text) in common::ALL {
        let original = common::rule_set(text);
        let reprinted: Vec<_> = text
            .lines()
            .map(|line| {
                let printed = parse_rule(line).unwrap().to_string();
                parse_rule(&printed).unwrap()
            })
            .collect();
        let reprinted = RuleSet::from_expressions(reprinted).unwrap();

        for number in common::sweep() {
            assert_eq!(
                reprinted.select(&number).unwrap(),
                original.select(&number).unwrap(),
                "{culture} {rule_type} {number}"
            );
        }
    }
}

// =========================================================================
// Structural Hash
// =========================================================================

#[test]
fn structural_key_encoding() {
    assert_eq!(
        rule_of("n % 10 = 1").structural_key(),
        "(= (% (operand n) (const 10)) (const 1))"
    );
    assert_eq!(
        rule_of("i = 0,1..3").structural_key(),
        "(= (operand i) (group (const 0) (range 1 3)))"
    );
    assert_eq!(
        parse_rule("other @integer 0, …").unwrap().structural_key(),
        r#"(rule (info "" "" "" "other" "") (none) (samples "integer" (const 0) (inf)))"#
    );
}

#[test]
fn hash_ignores_whitespace_and_parentheses() {
    assert_eq!(
        rule_of("i = 1 and v = 0").structural_hash(),
        rule_of("i=1   and v=0").structural_hash()
    );
    assert_ne!(rule_of("(n = 1)"), rule_of("n = 1"));
    assert_eq!(
        rule_of("(n = 1)").structural_hash(),
        rule_of("n = 1").structural_hash()
    );
    assert_eq!(
        rule_of("n mod 10 = 1").structural_hash(),
        rule_of("n % 10 = 1").structural_hash()
    );
}

#[test]
fn hash_distinguishes_structure() {
    let hash = rule_of("n = 1").structural_hash();
    assert_ne!(hash, rule_of("n = 2").structural_hash());
    assert_ne!(hash, rule_of("n = 1.0").structural_hash());
    assert_ne!(hash, rule_of("i = 1").structural_hash());
    assert_ne!(hash, rule_of("n != 1").structural_hash());
}

#[test]
fn hash_is_fnv1a_of_the_key() {
    const OPERAND_N: ExpressionHash = ExpressionHash::from_key("(operand n)");
    assert_eq!(Expression::operand("n").structural_hash(), OPERAND_N);
    assert_eq!(ExpressionHash::from_key("").as_u64(), 0xcbf2_9ce4_8422_2325);
}

#[test]
fn hash_display() {
    let text = ExpressionHash::from_key("").to_string();
    assert_eq!(text, "ExpressionHash(cbf29ce484222325)");
}
