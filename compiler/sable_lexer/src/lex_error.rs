//! Lexical errors.
//!
//! A lexical error stops the scan for good: the tokenizer enters its error
//! state and reports the same error on every later call.

use sable_ir::Position;

/// A lexical error and where it was detected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind} at {position}")]
pub struct LexError {
    /// WHAT went wrong.
    pub kind: LexErrorKind,
    /// WHERE the scanner's cursor was when it noticed.
    pub position: Position,
}

impl LexError {
    pub const fn new(kind: LexErrorKind, position: Position) -> Self {
        LexError { kind, position }
    }
}

/// What kind of lexical error occurred.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    // === Characters ===
    /// A byte that cannot start any token.
    #[error("unexpected byte 0x{0:02x}")]
    UnexpectedByte(u8),

    // === Strings ===
    /// End of input before the closing quote.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// A raw line break inside a quoted string.
    #[error("line break inside string literal")]
    NewlineInString,
    /// An escape outside `\\ \" \' \n \t \r \v \b \f \0`.
    #[error("unknown escape sequence `\\{0}`")]
    UnknownEscape(char),
    /// `\u` and `\x` escapes.
    #[error("`\\{0}` escapes are not supported")]
    UnsupportedEscape(char),

    // === Numbers ===
    /// Structurally invalid numeric literal.
    #[error("malformed number: {0}")]
    MalformedNumber(NumberProblem),
    /// Integer literal does not fit in `u64`.
    #[error("integer literal does not fit in 64 bits")]
    IntegerOverflow,

    // === Comments ===
    /// End of input inside `/* ...`.
    #[error("unterminated block comment")]
    UnterminatedComment,

    // === Regular expressions ===
    /// Line break or end of input before the closing `/`.
    #[error("unterminated regular expression")]
    UnterminatedRegexp,
    /// The same flag written twice, e.g. `/a/gg`.
    #[error("duplicate regular expression flag `{0}`")]
    DuplicateRegexpFlag(char),

    // === Resources ===
    /// Token pool or lexeme buffer could not grow.
    #[error("out of memory")]
    OutOfMemory,
}

/// Why a numeric literal was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum NumberProblem {
    /// A `.` after a fraction, exponent or hex prefix.
    #[error("unexpected `.`")]
    UnexpectedDot,
    /// A second `e`/`E`.
    #[error("second exponent marker")]
    SecondExponent,
    /// `x` anywhere other than directly after a leading `0`.
    #[error("`x` must directly follow a leading `0`")]
    MisplacedHexPrefix,
    /// `a`-`f` in a literal without a hex prefix.
    #[error("hex digit outside a hex literal")]
    HexDigitOutsideHex,
    /// `0x` with nothing after it.
    #[error("hex literal has no digits")]
    MissingHexDigits,
    /// `1e` or `1e+` with nothing after it.
    #[error("exponent has no digits")]
    EmptyExponent,
    /// A letter, `_` or `$` directly after the literal.
    #[error("identifier character directly after number")]
    TrailingIdentifier,
}
