//! Evaluation of rule expressions against a number.
//!
//! Relations against lists and ranges follow TR35: `=` holds when the value
//! matches any element, `!=` holds only when it matches none of them, and a
//! value with a non-zero fraction never lies in a range.

use std::cmp::Ordering;
use std::slice;

use crate::interpreter::EvalError;
use crate::parser::ast::{BinaryOp, Expression, UnaryOp};
use crate::types::{OperandId, PluralOperands};

/// Evaluate an expression in boolean position.
///
/// # Example
///
/// ```
/// use pluralis::interpreter::evaluate_bool;
/// use pluralis::parser::parse_rule;
///
/// let rule = parse_rule("one: i % 10 = 1,2,5,7,8").unwrap().rule.unwrap();
/// assert!(evaluate_bool(&rule, &21.into()).unwrap());
/// assert!(evaluate_bool(&rule, &68.into()).unwrap());
/// assert!(!evaluate_bool(&rule, &33.into()).unwrap());
/// ```
pub fn evaluate_bool(expression: &Expression, number: &PluralOperands) -> Result<bool, EvalError> {
    match expression {
        Expression::Boolean(value) => Ok(*value),
        Expression::Parenthesis(inner) => evaluate_bool(inner, number),
        Expression::Unary {
            op: UnaryOp::Not,
            operand,
        } => Ok(!evaluate_bool(operand, number)?),
        Expression::Binary { op, left, right } => match op {
            BinaryOp::And => Ok(evaluate_bool(left, number)? && evaluate_bool(right, number)?),
            BinaryOp::Or => Ok(evaluate_bool(left, number)? || evaluate_bool(right, number)?),
            BinaryOp::Xor => Ok(evaluate_bool(left, number)? != evaluate_bool(right, number)?),
            BinaryOp::Modulo => Err(unsupported(expression, "boolean")),
            BinaryOp::Equal
            | BinaryOp::NotEqual
            | BinaryOp::Less
            | BinaryOp::LessOrEqual
            | BinaryOp::Greater
            | BinaryOp::GreaterOrEqual => relation(*op, left, right, number),
        },
        Expression::Constant(_)
        | Expression::Operand(_)
        | Expression::Unary { .. }
        | Expression::Range { .. }
        | Expression::Group(_)
        | Expression::Infinite => Err(unsupported(expression, "boolean")),
    }
}

/// Evaluate an expression in numeric position.
pub fn evaluate_number(
    expression: &Expression,
    number: &PluralOperands,
) -> Result<PluralOperands, EvalError> {
    match expression {
        Expression::Constant(value) => Ok(value.clone()),
        Expression::Operand(name) => {
            let id = OperandId::from_name(name)
                .ok_or_else(|| EvalError::UnknownOperand { name: name.clone() })?;
            Ok(number.operand(id))
        }
        Expression::Parenthesis(inner) => evaluate_number(inner, number),
        Expression::Unary { op, operand } => {
            let value = evaluate_number(operand, number)?;
            match op {
                UnaryOp::Negate => Ok(value.negate()),
                UnaryOp::Plus => Ok(value),
                UnaryOp::Complement => value.complement().ok_or(EvalError::UnsupportedExpression {
                    kind: "complement",
                    expected: "integer",
                }),
                UnaryOp::Not => Err(unsupported(expression, "number")),
            }
        }
        Expression::Binary {
            op: BinaryOp::Modulo,
            left,
            right,
        } => {
            let dividend = evaluate_number(left, number)?;
            let divisor = evaluate_number(right, number)?;
            Ok(dividend.modulo_by(&divisor)?)
        }
        Expression::Binary { .. }
        | Expression::Boolean(_)
        | Expression::Range { .. }
        | Expression::Group(_)
        | Expression::Infinite => Err(unsupported(expression, "number")),
    }
}

fn unsupported(expression: &Expression, expected: &'static str) -> EvalError {
    EvalError::UnsupportedExpression {
        kind: expression.kind_name(),
        expected,
    }
}

/// True for a list or range, possibly parenthesized.
fn is_set(expression: &Expression) -> bool {
    matches!(
        expression.unparenthesized(),
        Expression::Group(_) | Expression::Range { .. }
    )
}

fn relation(
    op: BinaryOp,
    left: &Expression,
    right: &Expression,
    number: &PluralOperands,
) -> Result<bool, EvalError> {
    // `1..3 = n` reads as `n = 1..3`.
    let (op, value, set) = if is_set(left) {
        (op.mirrored(), right, left)
    } else {
        (op, left, right)
    };
    let value = evaluate_number(value, number)?;

    let elements = match set.unparenthesized() {
        Expression::Group(elements) => elements.as_slice(),
        range @ Expression::Range { .. } => slice::from_ref(range),
        other => {
            let target = evaluate_number(other, number)?;
            return Ok(holds(op, value.compare(&target)));
        }
    };

    match op {
        BinaryOp::Equal => {
            for element in elements {
                if element_contains(element, &value)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        // The whole relation is negated: every element must miss.
        BinaryOp::NotEqual => {
            elements
                .iter()
                .try_fold(true, |all_missed, element| -> Result<bool, EvalError> {
                    Ok(all_missed && !element_contains(element, &value)?)
                })
        }
        _ => {
            for element in elements {
                for bound in bounds(element)? {
                    if !holds(op, value.compare(bound)) {
                        return Ok(false);
                    }
                }
            }
            Ok(true)
        }
    }
}

/// Whether a list element (a constant or a range) contains the value.
fn element_contains(element: &Expression, value: &PluralOperands) -> Result<bool, EvalError> {
    match element {
        Expression::Constant(constant) => Ok(value.compare(constant) == Ordering::Equal),
        Expression::Range { min, max } => Ok(value.is_integer()
            && value.compare(min) != Ordering::Less
            && value.compare(max) != Ordering::Greater),
        other => Err(unsupported(other, "constant or range")),
    }
}

fn bounds(element: &Expression) -> Result<Vec<&PluralOperands>, EvalError> {
    match element {
        Expression::Constant(constant) => Ok(vec![constant]),
        Expression::Range { min, max } => Ok(vec![min, max]),
        other => Err(unsupported(other, "constant or range")),
    }
}

/// Whether a comparison result satisfies a relational operator.
fn holds(op: BinaryOp, ordering: Ordering) -> bool {
    match op {
        BinaryOp::Equal => ordering == Ordering::Equal,
        BinaryOp::NotEqual => ordering != Ordering::Equal,
        BinaryOp::Less => ordering == Ordering::Less,
        BinaryOp::LessOrEqual => ordering != Ordering::Greater,
        BinaryOp::Greater => ordering == Ordering::Greater,
        BinaryOp::GreaterOrEqual => ordering != Ordering::Less,
        BinaryOp::Modulo | BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => false,
    }
}
