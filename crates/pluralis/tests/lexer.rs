//! Tests for the rule line lexer.

use pluralis::parser::lexer::{ExprToken, KeyValueToken};
use pluralis::parser::{is_rule, lex};

fn expression(line: &str) -> ExprToken<'_> {
    let tokens = lex(line).unwrap();
    let case = tokens.case.unwrap();
    assert_eq!(case.expressions.len(), 1, "line {line:?}");
    case.expressions.into_iter().next().unwrap().tree
}

fn infix<'a>(operator: &'a str, left: ExprToken<'a>, right: ExprToken<'a>) -> ExprToken<'a> {
    ExprToken::Infix {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    }
}

// =========================================================================
// Line Structure
// =========================================================================

#[test]
fn lex_case_expression_and_samples() {
    let tokens = lex("one: i = 1 and v = 0 @integer 1 @decimal 0.0~1.5, …").unwrap();
    assert!(tokens.info.is_none());

    let case = tokens.case.unwrap();
    assert_eq!(case.name, "one");
    assert_eq!(case.expressions.len(), 1);
    assert_eq!(case.expressions[0].text, "i = 1 and v = 0");

    assert_eq!(tokens.samples.len(), 2);
    assert_eq!(tokens.samples[0].name, "integer");
    assert_eq!(tokens.samples[0].values, vec!["1"]);
    assert_eq!(tokens.samples[1].name, "decimal");
    assert_eq!(tokens.samples[1].values, vec!["0.0~1.5", "…"]);
}

#[test]
fn lex_catch_all_without_colon() {
    let tokens = lex("other @integer 0, 2~16").unwrap();
    let case = tokens.case.unwrap();
    assert_eq!(case.name, "other");
    assert!(case.expressions.is_empty());
    assert_eq!(tokens.samples[0].values, vec!["0", "2~16"]);
}

#[test]
fn lex_case_with_colon_and_no_expression() {
    let case = lex("other:").unwrap().case.unwrap();
    assert_eq!(case.name, "other");
    assert!(case.expressions.is_empty());
}

#[test]
fn lex_rule_info_prefix() {
    let tokens = lex("[Culture=pl, Category=cardinal] few: n = 2").unwrap();
    assert_eq!(
        tokens.info.unwrap(),
        vec![
            KeyValueToken {
                key: "Culture",
                value: "pl"
            },
            KeyValueToken {
                key: "Category",
                value: "cardinal"
            },
        ]
    );
    assert_eq!(tokens.case.unwrap().name, "few");
}

#[test]
fn lex_header_line() {
    let tokens = lex("[RuleSet=standard, Required=true]").unwrap();
    assert!(tokens.case.is_none());
    assert_eq!(tokens.info.unwrap().len(), 2);
}

#[test]
fn lex_empty_rule_info_value() {
    let info = lex("[Culture=] other").unwrap().info.unwrap();
    assert_eq!(info[0].value, "");
}

#[test]
fn lex_keeps_two_expressions_for_the_parser() {
    let case = lex("one: i = 1 v = 0").unwrap().case.unwrap();
    assert_eq!(case.expressions.len(), 2);
    assert_eq!(case.expressions[1].text, "v = 0");
}

#[test]
fn lex_custom_case_names() {
    let case = lex("one_digit-x: n < 10").unwrap().case.unwrap();
    assert_eq!(case.name, "one_digit-x");
}

// =========================================================================
// Non-rules
// =========================================================================

#[test]
fn prose_is_not_a_rule() {
    assert!(lex("this is = not a rule").is_none());
    assert!(!is_rule("this is = not a rule"));
}

#[test]
fn samples_without_case_are_not_a_rule() {
    assert!(lex("@integer 1").is_none());
    assert!(lex("[Culture=en] @integer 1").is_none());
}

#[test]
fn empty_line_is_not_a_rule() {
    assert!(lex("").is_none());
    assert!(lex("   ").is_none());
}

#[test]
fn keyword_prefix_of_a_word_is_not_a_keyword() {
    assert!(lex("one: n = 1 andy").is_none());
}

#[test]
fn unbalanced_parenthesis_is_not_a_rule() {
    assert!(lex("one: (n = 1").is_none());
    assert!(lex("[Culture=en").is_none());
}

#[test]
fn is_rule_accepts_rules() {
    assert!(is_rule("one: n = 1"));
    assert!(is_rule("other"));
    assert!(is_rule("[Culture=en]"));
}

// =========================================================================
// Expression Trees
// =========================================================================

#[test]
fn word_that_starts_with_keyword_is_an_operand() {
    assert_eq!(
        expression("one: android = 1"),
        infix("=", ExprToken::Word("android"), ExprToken::Number("1"))
    );
}

#[test]
fn modulo_binds_tighter_than_relation() {
    assert_eq!(
        expression("one: n % 10 = 1"),
        infix(
            "=",
            infix("%", ExprToken::Word("n"), ExprToken::Number("10")),
            ExprToken::Number("1"),
        )
    );
}

#[test]
fn mod_keyword_is_an_arithmetic_operator() {
    assert_eq!(
        expression("one: n mod 10 = 1"),
        infix(
            "=",
            infix("mod", ExprToken::Word("n"), ExprToken::Number("10")),
            ExprToken::Number("1"),
        )
    );
}

#[test]
fn and_binds_tighter_than_or() {
    let tree = expression("one: n = 1 or n = 2 and n = 3");
    let ExprToken::Infix {
        operator, right, ..
    } = tree
    else {
        panic!("expected infix");
    };
    assert_eq!(operator, "or");
    assert!(matches!(*right, ExprToken::Infix { operator: "and", .. }));
}

#[test]
fn logical_operators_are_left_associative() {
    let tree = expression("one: n = 1 or n = 2 xor n = 3");
    let ExprToken::Infix { operator, left, .. } = tree else {
        panic!("expected infix");
    };
    assert_eq!(operator, "xor");
    assert!(matches!(*left, ExprToken::Infix { operator: "or", .. }));
}

#[test]
fn not_wraps_a_relation() {
    let tree = expression("one: not n = 1 and true");
    let ExprToken::Infix { operator, left, .. } = tree else {
        panic!("expected infix");
    };
    assert_eq!(operator, "and");
    assert!(matches!(*left, ExprToken::Prefix { operator: "not", .. }));
}

#[test]
fn lists_and_spans() {
    assert_eq!(
        expression("one: n = 1,3..5"),
        infix(
            "=",
            ExprToken::Word("n"),
            ExprToken::List(vec![
                ExprToken::Number("1"),
                ExprToken::Span {
                    operator: "..",
                    min: Box::new(ExprToken::Number("3")),
                    max: Box::new(ExprToken::Number("5")),
                },
            ]),
        )
    );
}

#[test]
fn spaces_around_list_commas_and_dots() {
    let tree = expression("one: n = 1 , 3 .. 5");
    let ExprToken::Infix { right, .. } = tree else {
        panic!("expected infix");
    };
    assert!(matches!(*right, ExprToken::List(ref items) if items.len() == 2));
}

#[test]
fn decimal_literal_before_range_dots() {
    assert_eq!(
        expression("one: n = 1.5"),
        infix("=", ExprToken::Word("n"), ExprToken::Number("1.5"))
    );
    let tree = expression("one: n = 3..10");
    let ExprToken::Infix { right, .. } = tree else {
        panic!("expected infix");
    };
    assert!(matches!(*right, ExprToken::Span { .. }));
}

#[test]
fn unknown_operators_are_captured() {
    assert_eq!(
        expression("one: n == 1"),
        infix("==", ExprToken::Word("n"), ExprToken::Number("1"))
    );
    assert_eq!(
        expression("one: n / 2 = 1"),
        infix(
            "=",
            infix("/", ExprToken::Word("n"), ExprToken::Number("2")),
            ExprToken::Number("1"),
        )
    );
}

#[test]
fn sign_prefixes() {
    assert_eq!(
        expression("one: -n = ~1"),
        infix(
            "=",
            ExprToken::Prefix {
                operator: "-",
                operand: Box::new(ExprToken::Word("n")),
            },
            ExprToken::Prefix {
                operator: "~",
                operand: Box::new(ExprToken::Number("1")),
            },
        )
    );
}

#[test]
fn parenthesized_boolean() {
    let tree = expression("one: (n = 1 or n = 2) and v = 0");
    let ExprToken::Infix { left, .. } = tree else {
        panic!("expected infix");
    };
    assert!(matches!(*left, ExprToken::Paren(_)));
}

#[test]
fn boolean_keywords() {
    assert_eq!(expression("one: true"), ExprToken::Keyword("true"));
    assert_eq!(expression("one: false"), ExprToken::Keyword("false"));
}
