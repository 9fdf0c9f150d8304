//! Expression AST nodes
//!
//! ASTs are produced once per document load by the parser and cached inside
//! the compiled plan; the runtime walks them without reparsing. `Display`
//! renders the canonical source form, which reparses to an equal AST.

use super::operator::{BinaryOperator, UnaryOperator};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Literal value (null, boolean, number, string)
    Literal(Value),

    /// Identifier resolved against the environment; `$` is the pinned value
    Identifier(String),

    /// Member access (e.g. `customer.age`)
    Member {
        object: Box<Expression>,
        key: String,
    },

    /// Index access (e.g. `items[0]`)
    Index {
        object: Box<Expression>,
        index: Box<Expression>,
    },

    /// Unary operation
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// Binary operation
    Binary {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },

    /// Range literal `[lo..hi]` / `(lo..hi)`, inclusivity per bracket
    Range {
        low: Box<Expression>,
        high: Box<Expression>,
        low_inclusive: bool,
        high_inclusive: bool,
    },
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: Value) -> Self {
        Expression::Literal(value)
    }

    /// Create an identifier expression
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    /// Create a member access expression
    pub fn member(object: Expression, key: impl Into<String>) -> Self {
        Expression::Member {
            object: Box::new(object),
            key: key.into(),
        }
    }

    /// Create an index access expression
    pub fn index(object: Expression, index: Expression) -> Self {
        Expression::Index {
            object: Box::new(object),
            index: Box::new(index),
        }
    }

    /// Create a unary expression
    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Create a binary expression
    pub fn binary(left: Expression, op: BinaryOperator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Create a range literal
    pub fn range(
        low: Expression,
        high: Expression,
        low_inclusive: bool,
        high_inclusive: bool,
    ) -> Self {
        Expression::Range {
            low: Box::new(low),
            high: Box::new(high),
            low_inclusive,
            high_inclusive,
        }
    }

    /// True if any node of this expression refers to the pinned `$` value
    pub fn references_pinned(&self) -> bool {
        match self {
            Expression::Literal(_) => false,
            Expression::Identifier(name) => name == "$",
            Expression::Member { object, .. } => object.references_pinned(),
            Expression::Index { object, index } => {
                object.references_pinned() || index.references_pinned()
            }
            Expression::Unary { operand, .. } => operand.references_pinned(),
            Expression::Binary { left, right, .. } => {
                left.references_pinned() || right.references_pinned()
            }
            Expression::Range { low, high, .. } => {
                low.references_pinned() || high.references_pinned()
            }
        }
    }

    /// Binding strength for the canonical printer; higher binds tighter
    fn precedence(&self) -> u8 {
        match self {
            Expression::Binary { op, .. } => match op {
                BinaryOperator::Or => 1,
                BinaryOperator::And => 2,
                op if op.is_comparison() => 3,
                BinaryOperator::In => 4,
                BinaryOperator::Add | BinaryOperator::Sub => 5,
                _ => 6,
            },
            Expression::Unary { .. } => 7,
            _ => 8,
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
        if self.precedence() < min_precedence {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

fn fmt_literal(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => write!(f, "null"),
        Value::Bool(b) => write!(f, "{}", b),
        Value::Number(n) => {
            if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                write!(f, "{}", *n as i64)
            } else {
                write!(f, "{}", n)
            }
        }
        Value::String(s) => {
            f.write_str("\"")?;
            for c in s.chars() {
                match c {
                    '"' => f.write_str("\\\"")?,
                    '\\' => f.write_str("\\\\")?,
                    '\n' => f.write_str("\\n")?,
                    '\t' => f.write_str("\\t")?,
                    _ => write!(f, "{}", c)?,
                }
            }
            f.write_str("\"")
        }
        // arrays and objects never appear in parsed source; fall back to JSON
        other => {
            let json: serde_json::Value = other.clone().into();
            write!(f, "{}", json)
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => fmt_literal(f, value),
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::Member { object, key } => {
                object.fmt_child(f, 8)?;
                write!(f, ".{}", key)
            }
            Expression::Index { object, index } => {
                object.fmt_child(f, 8)?;
                write!(f, "[{}]", index)
            }
            Expression::Unary { op, operand } => {
                write!(f, "{}", op.symbol())?;
                operand.fmt_child(f, 7)
            }
            Expression::Binary { left, op, right } => {
                let precedence = self.precedence();
                left.fmt_child(f, precedence)?;
                write!(f, " {} ", op.symbol())?;
                right.fmt_child(f, precedence + 1)
            }
            Expression::Range {
                low,
                high,
                low_inclusive,
                high_inclusive,
            } => {
                write!(f, "{}", if *low_inclusive { '[' } else { '(' })?;
                write!(f, "{}..{}", low, high)?;
                write!(f, "{}", if *high_inclusive { ']' } else { ')' })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_literals() {
        assert_eq!(Expression::literal(Value::Null).to_string(), "null");
        assert_eq!(Expression::literal(Value::Bool(true)).to_string(), "true");
        assert_eq!(Expression::literal(Value::Number(42.0)).to_string(), "42");
        assert_eq!(Expression::literal(Value::Number(3.5)).to_string(), "3.5");
        assert_eq!(
            Expression::literal(Value::String("a\"b\n".to_string())).to_string(),
            r#""a\"b\n""#
        );
    }

    #[test]
    fn test_display_member_chain() {
        let expr = Expression::member(
            Expression::member(Expression::identifier("customer"), "address"),
            "city",
        );
        assert_eq!(expr.to_string(), "customer.address.city");
    }

    #[test]
    fn test_display_minimal_parens() {
        // (a + b) * c needs parens, a + b * c does not
        let a = || Expression::identifier("a");
        let b = || Expression::identifier("b");
        let c = || Expression::identifier("c");

        let grouped = Expression::binary(
            Expression::binary(a(), BinaryOperator::Add, b()),
            BinaryOperator::Mul,
            c(),
        );
        assert_eq!(grouped.to_string(), "(a + b) * c");

        let natural = Expression::binary(
            a(),
            BinaryOperator::Add,
            Expression::binary(b(), BinaryOperator::Mul, c()),
        );
        assert_eq!(natural.to_string(), "a + b * c");
    }

    #[test]
    fn test_display_right_child_parens() {
        // a - (b - c) must keep its parens under left associativity
        let expr = Expression::binary(
            Expression::identifier("a"),
            BinaryOperator::Sub,
            Expression::binary(
                Expression::identifier("b"),
                BinaryOperator::Sub,
                Expression::identifier("c"),
            ),
        );
        assert_eq!(expr.to_string(), "a - (b - c)");
    }

    #[test]
    fn test_display_range() {
        let range = Expression::range(
            Expression::literal(Value::Number(18.0)),
            Expression::literal(Value::Number(65.0)),
            true,
            false,
        );
        assert_eq!(range.to_string(), "[18..65)");

        let membership =
            Expression::binary(Expression::identifier("$"), BinaryOperator::In, range);
        assert_eq!(membership.to_string(), "$ in [18..65)");
    }

    #[test]
    fn test_references_pinned() {
        let expr = Expression::binary(
            Expression::identifier("$"),
            BinaryOperator::Gt,
            Expression::literal(Value::Number(10.0)),
        );
        assert!(expr.references_pinned());
        assert!(!Expression::identifier("x").references_pinned());
    }
}
