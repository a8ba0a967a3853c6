//! Tokens produced by the scanner.

use std::fmt;

use bitflags::bitflags;
use sable_str::SmallStr;

use crate::{Keyword, Operator, Position};

/// A scanned token.
///
/// `start` is the cursor before the first byte of the token and `end` the
/// cursor when it was finalized. Tokens of one scan abut: each token's `end`
/// is the next token's `start`.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: Position,
    pub end: Position,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, start: Position, end: Position) -> Self {
        Token { kind, start, end }
    }

    /// Whitespace and comments carry no grammar.
    #[inline]
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace { .. } | TokenKind::Comment { .. }
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

/// Token kinds and their payloads.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Quoted string with escapes decoded.
    String { quote: Quote, value: SmallStr },
    Number(Number),
    /// Regular expression literal; `body` is raw source between the slashes.
    Regexp { body: SmallStr, flags: RegexpFlags },
    Ident(SmallStr),
    Keyword(Keyword),
    Operator(Operator),
    /// Comment text without its delimiters.
    Comment { style: CommentStyle, text: SmallStr },
    Whitespace { newline: bool },
}

impl TokenKind {
    #[inline]
    pub fn is_operator(&self, op: Operator) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == op)
    }

    #[inline]
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::String { quote, value } => {
                let q = quote.as_char();
                write!(f, "string {q}{value}{q}")
            }
            TokenKind::Number(number) => write!(f, "number {}", number.value),
            TokenKind::Regexp { body, flags } => write!(f, "regexp /{body}/{flags}"),
            TokenKind::Ident(name) => write!(f, "identifier `{name}`"),
            TokenKind::Keyword(kw) => write!(f, "keyword `{kw}`"),
            TokenKind::Operator(op) => write!(f, "`{op}`"),
            TokenKind::Comment { .. } => f.write_str("comment"),
            TokenKind::Whitespace { .. } => f.write_str("whitespace"),
        }
    }
}

/// String delimiter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    pub const fn from_byte(byte: u8) -> Option<Quote> {
        match byte {
            b'\'' => Some(Quote::Single),
            b'"' => Some(Quote::Double),
            _ => None,
        }
    }

    pub const fn as_byte(self) -> u8 {
        match self {
            Quote::Single => b'\'',
            Quote::Double => b'"',
        }
    }

    pub const fn as_char(self) -> char {
        self.as_byte() as char
    }
}

/// Comment style.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CommentStyle {
    /// `// ...` up to the end of the line.
    Line,
    /// `/* ... */`
    Block,
}

bitflags! {
    /// How a numeric literal was written.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NumberRepr: u8 {
        const DOT = 1;
        const HEX = 1 << 1;
        const EXP_LOWER = 1 << 2;
        const EXP_UPPER = 1 << 3;
        const FLOAT = 1 << 4;
    }
}

impl NumberRepr {
    /// Either exponent marker.
    pub const EXP: NumberRepr = NumberRepr::EXP_LOWER.union(NumberRepr::EXP_UPPER);

    /// Whether the literal decodes to a double.
    #[inline]
    pub fn is_float(self) -> bool {
        self.intersects(NumberRepr::DOT.union(NumberRepr::EXP))
    }
}

/// Decoded numeric value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumberValue {
    Int(u64),
    Float(f64),
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberValue::Int(v) => write!(f, "{v}"),
            NumberValue::Float(v) => write!(f, "{v:?}"),
        }
    }
}

/// Numeric literal payload: representation flags plus the value decoded
/// once when the token completed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Number {
    pub repr: NumberRepr,
    pub value: NumberValue,
}

bitflags! {
    /// Regular expression flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RegexpFlags: u8 {
        /// `g`
        const GLOBAL = 1;
        /// `i`
        const IGNORE_CASE = 1 << 1;
        /// `m`
        const MULTILINE = 1 << 2;
        /// `y`
        const STICKY = 1 << 3;
    }
}

impl RegexpFlags {
    /// The flag a byte stands for, if any.
    pub const fn from_byte(byte: u8) -> Option<RegexpFlags> {
        match byte {
            b'g' => Some(RegexpFlags::GLOBAL),
            b'i' => Some(RegexpFlags::IGNORE_CASE),
            b'm' => Some(RegexpFlags::MULTILINE),
            b'y' => Some(RegexpFlags::STICKY),
            _ => None,
        }
    }
}

impl fmt::Display for RegexpFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, c) in [
            (RegexpFlags::GLOBAL, 'g'),
            (RegexpFlags::IGNORE_CASE, 'i'),
            (RegexpFlags::MULTILINE, 'm'),
            (RegexpFlags::STICKY, 'y'),
        ] {
            if self.contains(flag) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
