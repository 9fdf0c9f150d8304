//! Expression parser
//!
//! Recursive descent over the token stream, one function per precedence
//! level (low to high): `||`, `&&`, comparison, membership (`in`),
//! additive, multiplicative, unary, postfix member/index chains, primary.
//! Range literals `[lo..hi]` / `(lo..hi)` are primaries; a `(` therefore
//! opens either a grouped expression or a left-exclusive range, decided by
//! whether `..` follows the first inner expression.

use crate::error::{ParseError, Result};
use crate::lexer::{self, Token, TokenKind};
use verdict_core::ast::{BinaryOperator, Expression, UnaryOperator};
use verdict_core::Value;

/// Expression parser over a token stream
pub struct ExpressionParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl ExpressionParser {
    /// Parse an expression from source text
    pub fn parse(source: &str) -> Result<Expression> {
        Self::parse_tokens(lexer::tokenize(source)?)
    }

    /// Parse an already-tokenized expression
    pub(crate) fn parse_tokens(tokens: Vec<Token>) -> Result<Expression> {
        let mut parser = ExpressionParser { tokens, pos: 0 };
        let expr = parser.parse_or()?;
        parser.expect_eof()?;
        Ok(expr)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token if it matches `kind`
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().map(|t| &t.kind) == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        match self.advance() {
            Some(token) if &token.kind == kind => Ok(()),
            Some(token) => Err(ParseError::Syntax {
                position: token.position,
                message: format!(
                    "expected {}, found {}",
                    kind.describe(),
                    token.kind.describe()
                ),
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: kind.describe(),
            }),
        }
    }

    fn expect_eof(&mut self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(ParseError::Syntax {
                position: token.position,
                message: format!("unexpected {} after expression", token.kind.describe()),
            }),
        }
    }

    fn parse_or(&mut self) -> Result<Expression> {
        let mut left = self.parse_and()?;
        while self.eat(&TokenKind::Or) {
            let right = self.parse_and()?;
            left = Expression::binary(left, BinaryOperator::Or, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression> {
        let mut left = self.parse_comparison()?;
        while self.eat(&TokenKind::And) {
            let right = self.parse_comparison()?;
            left = Expression::binary(left, BinaryOperator::And, right);
        }
        Ok(left)
    }

    fn comparison_operator(&self) -> Option<BinaryOperator> {
        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Eq) => Some(BinaryOperator::Eq),
            Some(TokenKind::Ne) => Some(BinaryOperator::Ne),
            Some(TokenKind::Lt) => Some(BinaryOperator::Lt),
            Some(TokenKind::Le) => Some(BinaryOperator::Le),
            Some(TokenKind::Gt) => Some(BinaryOperator::Gt),
            Some(TokenKind::Ge) => Some(BinaryOperator::Ge),
            _ => None,
        }
    }

    fn parse_comparison(&mut self) -> Result<Expression> {
        let mut left = self.parse_membership()?;
        while let Some(op) = self.comparison_operator() {
            self.pos += 1;
            let right = self.parse_membership()?;
            left = Expression::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_membership(&mut self) -> Result<Expression> {
        let mut left = self.parse_additive()?;
        while self.eat(&TokenKind::In) {
            let right = self.parse_additive()?;
            left = Expression::binary(left, BinaryOperator::In, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expression> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek().map(|t| &t.kind) {
                Some(TokenKind::Plus) => BinaryOperator::Add,
                Some(TokenKind::Minus) => BinaryOperator::Sub,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_multiplicative()?;
            left = Expression::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expression> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek().map(|t| &t.kind) {
                Some(TokenKind::Star) => BinaryOperator::Mul,
                Some(TokenKind::Slash) => BinaryOperator::Div,
                Some(TokenKind::Percent) => BinaryOperator::Mod,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_unary()?;
            left = Expression::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression> {
        let op = match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Bang) => Some(UnaryOperator::Not),
            Some(TokenKind::Minus) => Some(UnaryOperator::Neg),
            _ => None,
        };
        if let Some(op) = op {
            self.pos += 1;
            let operand = self.parse_unary()?;
            return Ok(Expression::unary(op, operand));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expression> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat(&TokenKind::Dot) {
                let key = match self.advance() {
                    Some(Token {
                        kind: TokenKind::Identifier(name),
                        ..
                    }) => name,
                    Some(token) => {
                        return Err(ParseError::Syntax {
                            position: token.position,
                            message: format!(
                                "expected member name after '.', found {}",
                                token.kind.describe()
                            ),
                        })
                    }
                    None => {
                        return Err(ParseError::UnexpectedEof {
                            expected: "member name after '.'".to_string(),
                        })
                    }
                };
                expr = Expression::member(expr, key);
            } else if self.eat(&TokenKind::LeftBracket) {
                let index = self.parse_or()?;
                self.expect(&TokenKind::RightBracket)?;
                expr = Expression::index(expr, index);
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let token = match self.advance() {
            Some(token) => token,
            None => {
                return Err(ParseError::UnexpectedEof {
                    expected: "an expression".to_string(),
                })
            }
        };

        match token.kind {
            TokenKind::Number(n) => Ok(Expression::literal(Value::Number(n))),
            TokenKind::String(s) => Ok(Expression::literal(Value::String(s))),
            TokenKind::True => Ok(Expression::literal(Value::Bool(true))),
            TokenKind::False => Ok(Expression::literal(Value::Bool(false))),
            TokenKind::Null => Ok(Expression::literal(Value::Null)),
            TokenKind::Identifier(name) => Ok(Expression::identifier(name)),
            TokenKind::LeftParen => {
                let inner = self.parse_or()?;
                if self.eat(&TokenKind::DotDot) {
                    // left-exclusive range: (lo..hi] or (lo..hi)
                    let high = self.parse_or()?;
                    let high_inclusive = self.finish_range(token.position)?;
                    Ok(Expression::range(inner, high, false, high_inclusive))
                } else {
                    self.expect(&TokenKind::RightParen)?;
                    Ok(inner)
                }
            }
            TokenKind::LeftBracket => {
                let low = self.parse_or()?;
                self.expect(&TokenKind::DotDot)?;
                let high = self.parse_or()?;
                let high_inclusive = self.finish_range(token.position)?;
                Ok(Expression::range(low, high, true, high_inclusive))
            }
            other => Err(ParseError::Syntax {
                position: token.position,
                message: format!("expected an expression, found {}", other.describe()),
            }),
        }
    }

    /// Consume the closing bracket of a range, returning its inclusivity
    fn finish_range(&mut self, open_position: usize) -> Result<bool> {
        match self.advance() {
            Some(Token {
                kind: TokenKind::RightBracket,
                ..
            }) => Ok(true),
            Some(Token {
                kind: TokenKind::RightParen,
                ..
            }) => Ok(false),
            Some(token) => Err(ParseError::Syntax {
                position: token.position,
                message: format!(
                    "expected ']' or ')' to close range, found {}",
                    token.kind.describe()
                ),
            }),
            None => Err(ParseError::Syntax {
                position: open_position,
                message: "unclosed range literal".to_string(),
            }),
        }
    }
}
