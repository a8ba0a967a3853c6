//! Byte sources feeding the tokenizer.
//!
//! The tokenizer pulls input one chunk at a time through [`ByteSource`].
//! A source writes up to `buf.len()` bytes and returns how many it wrote;
//! returning `0` means end of input. Sources are plain data pumps and never
//! see tokenizer state.

use std::io::{self, Read};

/// Pull-based supplier of input bytes.
pub trait ByteSource {
    /// Fill a prefix of `buf` and return its length; `0` ends the input.
    fn read(&mut self, buf: &mut [u8]) -> usize;
}

impl<F> ByteSource for F
where
    F: FnMut(&mut [u8]) -> usize,
{
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> usize {
        self(buf)
    }
}

/// Serves an in-memory byte slice, optionally in bounded pieces.
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
    max_piece: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        SliceSource {
            bytes,
            pos: 0,
            max_piece: usize::MAX,
        }
    }

    /// Serve at most `max_piece` bytes per read (at least one).
    pub fn with_max_piece(bytes: &'a [u8], max_piece: usize) -> Self {
        SliceSource {
            bytes,
            pos: 0,
            max_piece: max_piece.max(1),
        }
    }
}

impl ByteSource for SliceSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let rest = &self.bytes[self.pos..];
        let n = rest.len().min(buf.len()).min(self.max_piece);
        buf[..n].copy_from_slice(&rest[..n]);
        self.pos += n;
        n
    }
}

/// Adapts any [`Read`] into a byte source.
///
/// An I/O error ends the input; the first one is kept for the caller to
/// inspect once the scan is over.
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
    error: Option<io::Error>,
}

impl<R: Read> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        ReadSource {
            reader,
            error: None,
        }
    }

    /// The I/O error that ended the input, if any.
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        if self.error.is_some() {
            return 0;
        }
        loop {
            match self.reader.read(buf) {
                Ok(n) => return n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.error = Some(e);
                    return 0;
                }
            }
        }
    }
}
