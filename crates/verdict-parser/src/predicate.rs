//! Decision-table cell predicates
//!
//! Table cells use a shorthand on top of the expression grammar, with `$`
//! bound to the cell's input column value:
//!
//! - empty cell or `-`: always true
//! - leading comparison operator (`< 18`): compares `$` against the rest
//! - top-level range (`[18..65]`): membership test on `$`
//! - boolean-shaped expressions (`$ > 10 && $ < 20`, `customer.vip`-style
//!   comparisons): evaluated as written
//! - any other bare value (`"minor"`, `42`, `limit + 1`): equality with `$`

use crate::error::Result;
use crate::lexer::{self, Token, TokenKind};
use crate::parser::ExpressionParser;
use verdict_core::ast::{BinaryOperator, Expression, UnaryOperator};

/// Parser for decision-table cells
pub struct PredicateParser;

impl PredicateParser {
    /// Parse a cell into a predicate AST.
    ///
    /// Returns `None` for the always-true forms (empty cell and `-`).
    pub fn parse(cell: &str) -> Result<Option<Expression>> {
        let cell = cell.trim();
        if cell.is_empty() || cell == "-" {
            return Ok(None);
        }

        let mut tokens = lexer::tokenize(cell)?;
        if tokens.first().is_some_and(|t| is_comparison_token(&t.kind)) {
            tokens.insert(
                0,
                Token {
                    kind: TokenKind::Identifier("$".to_string()),
                    position: 0,
                },
            );
        }

        let expr = ExpressionParser::parse_tokens(tokens)?;
        Ok(Some(apply_shorthand(expr)))
    }
}

fn is_comparison_token(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Eq
            | TokenKind::Ne
            | TokenKind::Lt
            | TokenKind::Le
            | TokenKind::Gt
            | TokenKind::Ge
    )
}

fn apply_shorthand(expr: Expression) -> Expression {
    if matches!(expr, Expression::Range { .. }) {
        return Expression::binary(Expression::identifier("$"), BinaryOperator::In, expr);
    }
    if expr.references_pinned() || is_boolean_shaped(&expr) {
        return expr;
    }
    Expression::binary(Expression::identifier("$"), BinaryOperator::Eq, expr)
}

/// True when the root of the expression already produces a predicate
fn is_boolean_shaped(expr: &Expression) -> bool {
    match expr {
        Expression::Binary { op, .. } => {
            op.is_comparison() || op.is_logical() || *op == BinaryOperator::In
        }
        Expression::Unary {
            op: UnaryOperator::Not,
            ..
        } => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdict_core::Value;

    fn parse(cell: &str) -> Option<Expression> {
        PredicateParser::parse(cell).unwrap()
    }

    #[test]
    fn test_always_true_cells() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("  "), None);
        assert_eq!(parse("-"), None);
    }

    #[test]
    fn test_leading_comparison_binds_pinned_value() {
        assert_eq!(parse("< 18").unwrap().to_string(), "$ < 18");
        assert_eq!(parse(">= 5 + 1").unwrap().to_string(), "$ >= 5 + 1");
        assert_eq!(parse("!= \"x\"").unwrap().to_string(), "$ != \"x\"");
    }

    #[test]
    fn test_top_level_range_is_membership() {
        assert_eq!(parse("[18..65]").unwrap().to_string(), "$ in [18..65]");
        assert_eq!(parse("(0..1)").unwrap().to_string(), "$ in (0..1)");
    }

    #[test]
    fn test_bare_value_is_equality() {
        assert_eq!(
            parse("\"minor\"").unwrap(),
            Expression::binary(
                Expression::identifier("$"),
                BinaryOperator::Eq,
                Expression::literal(Value::String("minor".to_string()))
            )
        );
        assert_eq!(parse("42").unwrap().to_string(), "$ == 42");
        assert_eq!(parse("limit + 1").unwrap().to_string(), "$ == limit + 1");
        // bare booleans are values, not predicates
        assert_eq!(parse("true").unwrap().to_string(), "$ == true");
    }

    #[test]
    fn test_pinned_expressions_kept_as_written() {
        assert_eq!(parse("$ > 10 && $ < 20").unwrap().to_string(), "$ > 10 && $ < 20");
        assert_eq!(parse("$ % 2 == 0").unwrap().to_string(), "$ % 2 == 0");
    }

    #[test]
    fn test_boolean_shaped_expressions_kept_as_written() {
        assert_eq!(
            parse("customer.vip && score > 10").unwrap().to_string(),
            "customer.vip && score > 10"
        );
        assert_eq!(parse("!blocked").unwrap().to_string(), "!blocked");
        assert_eq!(parse("tag in tags").unwrap().to_string(), "tag in tags");
    }

    #[test]
    fn test_malformed_cell_propagates_parse_error() {
        assert!(PredicateParser::parse("< <").is_err());
        assert!(PredicateParser::parse("\"unterminated").is_err());
    }
}
