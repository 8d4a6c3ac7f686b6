//! TR35-style rendering of rule ASTs.
//!
//! Parentheses are emitted wherever an operand binds looser than its parent
//! operator, so trees built by hand print as text that parses back to an
//! equivalent tree.

use std::fmt::{self, Display, Formatter};

use crate::parser::ast::{BinaryOp, Expression, RuleExpression, Samples, UnaryOp};

/// Render an expression as rule text.
///
/// # Example
///
/// ```
/// use pluralis::parser::{BinaryOp, Expression, print};
///
/// let modulo = Expression::binary(
///     BinaryOp::Modulo,
///     Expression::operand("n"),
///     Expression::constant(10),
/// );
/// let rule = Expression::binary(BinaryOp::Equal, modulo, Expression::range(2, 4));
/// assert_eq!(print(&rule), "n % 10 = 2..4");
/// ```
pub fn print(expression: &Expression) -> String {
    expression.to_string()
}

/// Binding strength, loosest first.
fn precedence(expression: &Expression) -> u8 {
    match expression {
        Expression::Binary { op, .. } => match op {
            BinaryOp::Or | BinaryOp::Xor => 1,
            BinaryOp::And => 2,
            BinaryOp::Modulo => 7,
            BinaryOp::Equal
            | BinaryOp::NotEqual
            | BinaryOp::Less
            | BinaryOp::LessOrEqual
            | BinaryOp::Greater
            | BinaryOp::GreaterOrEqual => 4,
        },
        Expression::Unary {
            op: UnaryOp::Not, ..
        } => 3,
        Expression::Unary { .. } => 8,
        Expression::Group(_) => 5,
        Expression::Range { .. } => 6,
        Expression::Constant(_)
        | Expression::Operand(_)
        | Expression::Boolean(_)
        | Expression::Parenthesis(_)
        | Expression::Infinite => 9,
    }
}

fn write_operand(f: &mut Formatter<'_>, operand: &Expression, parenthesize: bool) -> fmt::Result {
    if parenthesize {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(value) => write!(f, "{value}"),
            Expression::Operand(name) => f.write_str(name),
            Expression::Boolean(value) => write!(f, "{value}"),
            Expression::Unary { op, operand } => {
                match op {
                    UnaryOp::Not => f.write_str("not ")?,
                    UnaryOp::Negate | UnaryOp::Plus | UnaryOp::Complement => {
                        f.write_str(op.symbol())?;
                    }
                }
                write_operand(f, operand, precedence(operand) < precedence(self))
            }
            Expression::Binary { op, left, right } => {
                let own = precedence(self);
                // Relations do not chain, so a relational left operand needs
                // parentheses too.
                let left_parens = if op.is_relational() {
                    precedence(left) <= own
                } else {
                    precedence(left) < own
                };
                write_operand(f, left, left_parens)?;
                write!(f, " {} ", op.symbol())?;
                write_operand(f, right, precedence(right) <= own)
            }
            Expression::Range { min, max } => write!(f, "{min}..{max}"),
            Expression::Group(values) => {
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
            Expression::Parenthesis(inner) => write!(f, "({inner})"),
            Expression::Infinite => f.write_str("…"),
        }
    }
}

/// Sample lists use `~` for ranges: `@decimal 0.0~1.5, 10.0, …`.
impl Display for Samples {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        for (index, value) in self.values.iter().enumerate() {
            f.write_str(if index == 0 { " " } else { ", " })?;
            match value {
                Expression::Range { min, max } => write!(f, "{min}~{max}")?,
                other => write!(f, "{other}")?,
            }
        }
        Ok(())
    }
}

impl Display for RuleExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        let info = self.info.to_string();
        if !info.is_empty() {
            parts.push(info);
        }
        let case = self.case();
        if !case.is_empty() {
            match &self.rule {
                Some(rule) => parts.push(format!("{case}: {rule}")),
                None => parts.push(case.to_string()),
            }
        }
        parts.extend(self.samples.iter().map(ToString::to_string));
        f.write_str(&parts.join(" "))
    }
}
