//! Parser error types

use thiserror::Error;

/// Parser error; positions are byte offsets into the source string
#[derive(Error, Debug)]
pub enum ParseError {
    /// Character the lexer could not start a token with
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    /// String literal without a closing quote
    #[error("unterminated string literal at position {position}")]
    UnterminatedString { position: usize },

    /// Unsupported backslash escape inside a string literal
    #[error("invalid escape sequence '\\{ch}' at position {position}")]
    InvalidEscape { ch: char, position: usize },

    /// Malformed numeric literal
    #[error("invalid number at position {position}")]
    InvalidNumber { position: usize },

    /// Token stream ended where more input was required
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },

    /// Any other grammar violation
    #[error("syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },
}

impl ParseError {
    /// Byte offset the error points at, when one is known
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedCharacter { position, .. }
            | ParseError::UnterminatedString { position }
            | ParseError::InvalidEscape { position, .. }
            | ParseError::InvalidNumber { position }
            | ParseError::Syntax { position, .. } => Some(*position),
            ParseError::UnexpectedEof { .. } => None,
        }
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
