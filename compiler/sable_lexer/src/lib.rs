//! Streaming tokenizer for the sable front end.
//!
//! The [`Tokenizer`] scans a byte stream that arrives in chunks of arbitrary
//! size. When a chunk ends in the middle of a token it reports
//! [`Scan::NeedMore`] and keeps its partial state, so the caller can fetch
//! the next chunk and continue. [`Tokenizer::scan`] wraps that loop around a
//! [`ByteSource`].
//!
//! Whether `/` starts a regular expression cannot be decided lexically. The
//! caller passes a [`DisambiguationMode`] with every request instead; see
//! the parser for the protocol.
//!
//! Finished tokens live in a [`sable_ir::Pool`] owned by the tokenizer and
//! are addressed by handle.

mod keywords;
mod lex_error;
mod scanner;
mod source;

use sable_ir::Token;

pub use lex_error::{LexError, LexErrorKind, NumberProblem};
pub use scanner::{DisambiguationMode, Scan, Tokenizer};
pub use source::{ByteSource, ReadSource, SliceSource};

/// Default number of bytes pulled from a source per refill.
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// Tokenizer configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexOptions {
    /// Upper bound on the bytes pulled per refill. Zero is treated as one.
    pub chunk_size: usize,
    /// Maximum number of arenas in the token pool; `None` is unbounded.
    pub arena_limit: Option<usize>,
}

impl Default for LexOptions {
    fn default() -> Self {
        LexOptions {
            chunk_size: DEFAULT_CHUNK_SIZE,
            arena_limit: None,
        }
    }
}

impl LexOptions {
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    #[must_use]
    pub fn with_arena_limit(mut self, arena_limit: Option<usize>) -> Self {
        self.arena_limit = arena_limit;
        self
    }
}

/// Scan a whole buffer, trivia included, with `/` always an operator.
///
/// Input is pulled in `options.chunk_size` pieces, so the result also
/// exercises the resumable path. Each token is taken out of the pool as soon
/// as it is produced.
pub fn tokenize(bytes: &[u8], options: &LexOptions) -> Result<Vec<Token>, LexError> {
    let mut tokenizer = Tokenizer::new(options);
    let mut source = SliceSource::new(bytes);
    let mut tokens = Vec::new();
    while let Scan::Token(handle) = tokenizer.scan(&mut source, DisambiguationMode::None)? {
        if let Some(token) = tokenizer.take_token(handle) {
            tokens.push(token);
        }
    }
    Ok(tokens)
}
