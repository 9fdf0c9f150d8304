//! Tokenizer for the expression language

use crate::error::{ParseError, Result};

/// A token kind
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    String(String),
    Identifier(String),

    // keywords
    True,
    False,
    Null,
    In,

    // punctuators
    Dot,
    DotDot,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Bang,
}

impl TokenKind {
    /// Short description used in error messages
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Number(n) => format!("number {}", n),
            TokenKind::String(s) => format!("string \"{}\"", s),
            TokenKind::Identifier(name) => format!("identifier '{}'", name),
            TokenKind::True => "'true'".to_string(),
            TokenKind::False => "'false'".to_string(),
            TokenKind::Null => "'null'".to_string(),
            TokenKind::In => "'in'".to_string(),
            TokenKind::Dot => "'.'".to_string(),
            TokenKind::DotDot => "'..'".to_string(),
            TokenKind::LeftParen => "'('".to_string(),
            TokenKind::RightParen => "')'".to_string(),
            TokenKind::LeftBracket => "'['".to_string(),
            TokenKind::RightBracket => "']'".to_string(),
            TokenKind::Plus => "'+'".to_string(),
            TokenKind::Minus => "'-'".to_string(),
            TokenKind::Star => "'*'".to_string(),
            TokenKind::Slash => "'/'".to_string(),
            TokenKind::Percent => "'%'".to_string(),
            TokenKind::Eq => "'=='".to_string(),
            TokenKind::Ne => "'!='".to_string(),
            TokenKind::Lt => "'<'".to_string(),
            TokenKind::Le => "'<='".to_string(),
            TokenKind::Gt => "'>'".to_string(),
            TokenKind::Ge => "'>='".to_string(),
            TokenKind::And => "'&&'".to_string(),
            TokenKind::Or => "'||'".to_string(),
            TokenKind::Bang => "'!'".to_string(),
        }
    }
}

/// A token with the byte offset it starts at
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

/// Tokenize a source string
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        let ch = source[pos..].chars().next().expect("pos is a char boundary");

        match ch {
            c if c.is_whitespace() => {
                pos += c.len_utf8();
            }
            '0'..='9' => {
                let (number, end) = lex_number(source, pos)?;
                tokens.push(Token {
                    kind: TokenKind::Number(number),
                    position: start,
                });
                pos = end;
            }
            '"' => {
                let (string, end) = lex_string(source, pos)?;
                tokens.push(Token {
                    kind: TokenKind::String(string),
                    position: start,
                });
                pos = end;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let end = source[pos..]
                    .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                    .map(|offset| pos + offset)
                    .unwrap_or(source.len());
                let word = &source[pos..end];
                let kind = match word {
                    "true" => TokenKind::True,
                    "false" => TokenKind::False,
                    "null" => TokenKind::Null,
                    "in" => TokenKind::In,
                    _ => TokenKind::Identifier(word.to_string()),
                };
                tokens.push(Token {
                    kind,
                    position: start,
                });
                pos = end;
            }
            '$' => {
                tokens.push(Token {
                    kind: TokenKind::Identifier("$".to_string()),
                    position: start,
                });
                pos += 1;
            }
            '.' => {
                if bytes.get(pos + 1) == Some(&b'.') {
                    tokens.push(Token {
                        kind: TokenKind::DotDot,
                        position: start,
                    });
                    pos += 2;
                } else {
                    tokens.push(Token {
                        kind: TokenKind::Dot,
                        position: start,
                    });
                    pos += 1;
                }
            }
            '(' => {
                tokens.push(Token {
                    kind: TokenKind::LeftParen,
                    position: start,
                });
                pos += 1;
            }
            ')' => {
                tokens.push(Token {
                    kind: TokenKind::RightParen,
                    position: start,
                });
                pos += 1;
            }
            '[' => {
                tokens.push(Token {
                    kind: TokenKind::LeftBracket,
                    position: start,
                });
                pos += 1;
            }
            ']' => {
                tokens.push(Token {
                    kind: TokenKind::RightBracket,
                    position: start,
                });
                pos += 1;
            }
            '+' => {
                tokens.push(Token {
                    kind: TokenKind::Plus,
                    position: start,
                });
                pos += 1;
            }
            '-' => {
                tokens.push(Token {
                    kind: TokenKind::Minus,
                    position: start,
                });
                pos += 1;
            }
            '*' => {
                tokens.push(Token {
                    kind: TokenKind::Star,
                    position: start,
                });
                pos += 1;
            }
            '/' => {
                tokens.push(Token {
                    kind: TokenKind::Slash,
                    position: start,
                });
                pos += 1;
            }
            '%' => {
                tokens.push(Token {
                    kind: TokenKind::Percent,
                    position: start,
                });
                pos += 1;
            }
            '=' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    tokens.push(Token {
                        kind: TokenKind::Eq,
                        position: start,
                    });
                    pos += 2;
                } else {
                    return Err(ParseError::UnexpectedCharacter { ch, position: start });
                }
            }
            '!' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    tokens.push(Token {
                        kind: TokenKind::Ne,
                        position: start,
                    });
                    pos += 2;
                } else {
                    tokens.push(Token {
                        kind: TokenKind::Bang,
                        position: start,
                    });
                    pos += 1;
                }
            }
            '<' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    tokens.push(Token {
                        kind: TokenKind::Le,
                        position: start,
                    });
                    pos += 2;
                } else {
                    tokens.push(Token {
                        kind: TokenKind::Lt,
                        position: start,
                    });
                    pos += 1;
                }
            }
            '>' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    tokens.push(Token {
                        kind: TokenKind::Ge,
                        position: start,
                    });
                    pos += 2;
                } else {
                    tokens.push(Token {
                        kind: TokenKind::Gt,
                        position: start,
                    });
                    pos += 1;
                }
            }
            '&' => {
                if bytes.get(pos + 1) == Some(&b'&') {
                    tokens.push(Token {
                        kind: TokenKind::And,
                        position: start,
                    });
                    pos += 2;
                } else {
                    return Err(ParseError::UnexpectedCharacter { ch, position: start });
                }
            }
            '|' => {
                if bytes.get(pos + 1) == Some(&b'|') {
                    tokens.push(Token {
                        kind: TokenKind::Or,
                        position: start,
                    });
                    pos += 2;
                } else {
                    return Err(ParseError::UnexpectedCharacter { ch, position: start });
                }
            }
            _ => return Err(ParseError::UnexpectedCharacter { ch, position: start }),
        }
    }

    Ok(tokens)
}

/// Lex a number starting at `start`; returns the value and the end offset.
/// A trailing `.` is only consumed when a digit follows, so `18..65` lexes
/// as `18`, `..`, `65`.
fn lex_number(source: &str, start: usize) -> Result<(f64, usize)> {
    let bytes = source.as_bytes();
    let mut end = start;

    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len()
        && bytes[end] == b'.'
        && bytes.get(end + 1).is_some_and(|b| b.is_ascii_digit())
    {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    let number = source[start..end]
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber { position: start })?;
    Ok((number, end))
}

/// Lex a double-quoted string starting at `start` (which points at the
/// opening quote); returns the unescaped content and the end offset.
fn lex_string(source: &str, start: usize) -> Result<(String, usize)> {
    let mut result = String::new();
    let mut chars = source[start + 1..].char_indices();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '"' => return Ok((result, start + 1 + offset + 1)),
            '\\' => match chars.next() {
                Some((_, '"')) => result.push('"'),
                Some((_, '\\')) => result.push('\\'),
                Some((_, 'n')) => result.push('\n'),
                Some((_, 't')) => result.push('\t'),
                Some((escape_offset, other)) => {
                    return Err(ParseError::InvalidEscape {
                        ch: other,
                        position: start + 1 + escape_offset,
                    })
                }
                None => return Err(ParseError::UnterminatedString { position: start }),
            },
            _ => result.push(ch),
        }
    }

    Err(ParseError::UnterminatedString { position: start })
}
