//! Public AST types for plural rules.
//!
//! These types are public to enable external tooling (rule table generators,
//! linters, caches). Trees are immutable once built and safe to share across
//! threads.

use crate::types::{PluralOperands, RuleInfo, StructuralHash};

/// A node of a plural rule expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A decimal literal.
    Constant(PluralOperands),
    /// An operand name (`n`, `i`, `v`, `w`, `f`, `t`, `e`, `c`).
    /// Names are resolved at evaluation time.
    Operand(String),
    /// The `true` and `false` keywords.
    Boolean(bool),
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// Inclusive range: `3..10`, or `3~10` in samples.
    Range {
        min: PluralOperands,
        max: PluralOperands,
    },
    /// Comma list of constants and ranges: `1,2,5..7`.
    Group(Vec<Expression>),
    /// Grouping only; no semantic effect.
    Parenthesis(Box<Expression>),
    /// The `…` marker that ends open-ended sample lists.
    Infinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Logical `not`.
    Not,
    /// Sign `-`.
    Negate,
    /// Sign `+`.
    Plus,
    /// Bitwise complement `~`.
    Complement,
}

impl UnaryOp {
    /// Resolve a prefix operator as written in rule text.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "not" => Some(UnaryOp::Not),
            "-" => Some(UnaryOp::Negate),
            "+" => Some(UnaryOp::Plus),
            "~" => Some(UnaryOp::Complement),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
            UnaryOp::Negate => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Complement => "~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Modulo,
    And,
    Or,
    Xor,
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl BinaryOp {
    /// Resolve an infix operator as written in rule text. `mod` is accepted
    /// as a synonym of `%`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "%" | "mod" => BinaryOp::Modulo,
            "and" => BinaryOp::And,
            "or" => BinaryOp::Or,
            "xor" => BinaryOp::Xor,
            "=" => BinaryOp::Equal,
            "!=" => BinaryOp::NotEqual,
            "<" => BinaryOp::Less,
            "<=" => BinaryOp::LessOrEqual,
            ">" => BinaryOp::Greater,
            ">=" => BinaryOp::GreaterOrEqual,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Modulo => "%",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Xor => "xor",
            BinaryOp::Equal => "=",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessOrEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterOrEqual => ">=",
        }
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::Less
                | BinaryOp::LessOrEqual
                | BinaryOp::Greater
                | BinaryOp::GreaterOrEqual
        )
    }

    /// The operator to use when the operands trade places (`a < b` is
    /// `b > a`).
    pub fn mirrored(self) -> Self {
        match self {
            BinaryOp::Less => BinaryOp::Greater,
            BinaryOp::LessOrEqual => BinaryOp::GreaterOrEqual,
            BinaryOp::Greater => BinaryOp::Less,
            BinaryOp::GreaterOrEqual => BinaryOp::LessOrEqual,
            other => other,
        }
    }
}

impl Expression {
    pub fn constant(value: impl Into<PluralOperands>) -> Self {
        Expression::Constant(value.into())
    }

    pub fn operand(name: impl Into<String>) -> Self {
        Expression::Operand(name.into())
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn range(min: impl Into<PluralOperands>, max: impl Into<PluralOperands>) -> Self {
        Expression::Range {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Short node kind name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Constant(_) => "constant",
            Expression::Operand(_) => "operand",
            Expression::Boolean(_) => "boolean",
            Expression::Unary { .. } => "unary",
            Expression::Binary { .. } => "binary",
            Expression::Range { .. } => "range",
            Expression::Group(_) => "group",
            Expression::Parenthesis(_) => "parenthesis",
            Expression::Infinite => "infinite",
        }
    }

    /// The expression with any enclosing parentheses removed.
    pub fn unparenthesized(&self) -> &Expression {
        match self {
            Expression::Parenthesis(inner) => inner.unparenthesized(),
            other => other,
        }
    }
}

/// An `@name value, value, …` sample annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Samples {
    /// Usually `integer` or `decimal`.
    pub name: String,
    /// `Constant`, `Range` or `Infinite` values.
    pub values: Vec<Expression>,
}

/// One parsed rule line: metadata, an optional boolean rule, and samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleExpression {
    pub info: RuleInfo,
    pub rule: Option<Expression>,
    pub samples: Vec<Samples>,
    /// 1-based source line, for diagnostics.
    pub line: usize,
}

impl RuleExpression {
    /// The case name (`one`, `few`, `other`, or a custom name).
    pub fn case(&self) -> &str {
        &self.info.case
    }

    /// True for an `other` line without an expression, the default rule that
    /// always matches.
    pub fn is_catch_all(&self) -> bool {
        self.rule.is_none() && self.info.case == "other"
    }
}

impl StructuralHash for Expression {
    fn write_structure(&self, out: &mut String) {
        match self {
            Expression::Constant(value) => {
                out.push_str("(const ");
                out.push_str(&value.to_string());
                out.push(')');
            }
            Expression::Operand(name) => {
                out.push_str("(operand ");
                out.push_str(name);
                out.push(')');
            }
            Expression::Boolean(value) => {
                out.push_str(if *value { "(true)" } else { "(false)" });
            }
            Expression::Unary { op, operand } => {
                out.push('(');
                out.push_str(op.symbol());
                out.push(' ');
                operand.write_structure(out);
                out.push(')');
            }
            Expression::Binary { op, left, right } => {
                out.push('(');
                out.push_str(op.symbol());
                out.push(' ');
                left.write_structure(out);
                out.push(' ');
                right.write_structure(out);
                out.push(')');
            }
            Expression::Range { min, max } => {
                out.push_str("(range ");
                out.push_str(&min.to_string());
                out.push(' ');
                out.push_str(&max.to_string());
                out.push(')');
            }
            Expression::Group(values) => {
                out.push_str("(group");
                for value in values {
                    out.push(' ');
                    value.write_structure(out);
                }
                out.push(')');
            }
            // Parentheses carry no meaning; a printed-then-reparsed tree
            // must hash like the original.
            Expression::Parenthesis(inner) => inner.write_structure(out),
            Expression::Infinite => out.push_str("(inf)"),
        }
    }
}

impl StructuralHash for Samples {
    fn write_structure(&self, out: &mut String) {
        out.push_str("(samples ");
        out.push_str(&format!("{:?}", self.name));
        for value in &self.values {
            out.push(' ');
            value.write_structure(out);
        }
        out.push(')');
    }
}

impl StructuralHash for RuleInfo {
    fn write_structure(&self, out: &mut String) {
        let rule_type = self.rule_type.map_or("", |rule_type| rule_type.as_str());
        let required = self.required.map_or("", |required| {
            if required { "true" } else { "false" }
        });
        out.push_str(&format!(
            "(info {:?} {:?} {:?} {:?} {:?})",
            self.rule_set, rule_type, self.culture, self.case, required
        ));
    }
}

impl StructuralHash for RuleExpression {
    fn write_structure(&self, out: &mut String) {
        out.push_str("(rule ");
        self.info.write_structure(out);
        out.push(' ');
        match &self.rule {
            Some(rule) => rule.write_structure(out),
            None => out.push_str("(none)"),
        }
        for samples in &self.samples {
            out.push(' ');
            samples.write_structure(out);
        }
        out.push(')');
    }
}
