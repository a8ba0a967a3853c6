//! Parse errors.
//!
//! Parsing is fail-fast: the first error ends the parse and is carried by
//! the [`ParseResponse`](crate::ParseResponse). Tokenizer errors convert
//! through `From`. Node pool exhaustion is reported by the parser with the
//! position of the token it was building.

use std::fmt;
use std::io::Write;

use sable_ir::{Position, Token};
use sable_lexer::{LexError, LexErrorKind};

/// Error category.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    /// A token that cannot appear here, or premature end of input.
    Unexpected,
    /// A recognized construct the grammar deliberately rejects.
    NotAllowed,
    /// The tokenizer rejected the input.
    BadToken,
    OutOfMemory,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Unexpected => "unexpected token",
            ErrorKind::NotAllowed => "not allowed",
            ErrorKind::BadToken => "bad token",
            ErrorKind::OutOfMemory => "out of memory",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parse error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{kind}: {message} at {position}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    /// The offending token, when there was one.
    pub token: Option<Token>,
    pub position: Position,
}

impl ParseError {
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        token: Option<Token>,
        position: Position,
    ) -> Self {
        ParseError {
            kind,
            message: message.into(),
            token,
            position,
        }
    }

    /// `token` cannot appear here; `expected` describes what could.
    pub fn unexpected(token: Token, expected: &str) -> Self {
        let message = format!("unexpected {token}, expected {expected}");
        let position = token.start;
        Self::new(ErrorKind::Unexpected, message, Some(token), position)
    }

    /// Input ended while `expected` was still required.
    pub fn unexpected_eof(position: Position, expected: &str) -> Self {
        let message = format!("unexpected end of input, expected {expected}");
        Self::new(ErrorKind::Unexpected, message, None, position)
    }

    /// `token` starts a construct this grammar rejects.
    pub fn not_allowed(token: Token, what: &str) -> Self {
        let position = token.start;
        Self::new(
            ErrorKind::NotAllowed,
            format!("{what} is not allowed"),
            Some(token),
            position,
        )
    }

    pub fn out_of_memory(position: Position) -> Self {
        Self::new(ErrorKind::OutOfMemory, "out of memory", None, position)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Write the rendered message into `buf`, truncating to fit.
    ///
    /// Returns the number of bytes written.
    pub fn render(&self, buf: &mut [u8]) -> usize {
        let capacity = buf.len();
        let mut cursor = &mut buf[..];
        // A full buffer makes `write!` fail; what fit is kept.
        let _ = write!(cursor, "{self}");
        capacity - cursor.len()
    }
}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        let kind = match error.kind {
            LexErrorKind::DuplicateRegexpFlag(_) => ErrorKind::NotAllowed,
            LexErrorKind::OutOfMemory => ErrorKind::OutOfMemory,
            _ => ErrorKind::BadToken,
        };
        ParseError::new(kind, error.kind.to_string(), None, error.position)
    }
}

#[cfg(test)]
mod tests;
