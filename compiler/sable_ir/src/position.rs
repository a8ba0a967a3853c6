//! Source positions.

use std::fmt;

/// A point in the byte stream.
///
/// Lines count from 1, columns from 0. Every byte advances the column except
/// `\n`, which moves to column 0 of the next line. Positions order by byte
/// offset, which agrees with `(line, column)` order within one scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Bytes consumed before this point.
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// The position before the first byte.
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 0,
    };

    #[inline]
    pub const fn new(offset: u32, line: u32, column: u32) -> Self {
        Position {
            offset,
            line,
            column,
        }
    }

    /// Step over one byte.
    #[inline]
    pub fn advance(&mut self, byte: u8) {
        self.offset = self.offset.saturating_add(1);
        if byte == b'\n' {
            self.line = self.line.saturating_add(1);
            self.column = 0;
        } else {
            self.column = self.column.saturating_add(1);
        }
    }

    /// Step over `count` bytes known to contain no `\n`.
    #[inline]
    pub fn advance_columns(&mut self, count: usize) {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        self.offset = self.offset.saturating_add(count);
        self.column = self.column.saturating_add(count);
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
