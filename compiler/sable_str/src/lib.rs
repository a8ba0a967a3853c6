//! Two-tier inline/external byte string.
//!
//! `SmallStr` keeps lexemes up to [`INLINE_CAPACITY`] bytes directly inside
//! the value and moves to an owned heap buffer the first time an append
//! would overflow that. Most identifiers, keywords and short literals never
//! touch the heap.
//!
//! # Growth
//!
//! External buffers grow to the next power of two at or above the required
//! length. Growth is fallible: allocation failure surfaces as [`AllocError`]
//! instead of aborting.
//!
//! # Ownership
//!
//! A `SmallStr` exclusively owns its external buffer. [`SmallStr::transfer_into`]
//! moves that buffer (never copies it) and leaves the source empty.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Maximum number of bytes stored inline.
pub const INLINE_CAPACITY: usize = std::mem::size_of::<usize>() * 2 - 1;

/// Allocation failure while growing an external buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("out of memory while growing string")]
pub struct AllocError;

#[derive(Clone)]
enum Repr {
    Inline {
        len: u8,
        bytes: [u8; INLINE_CAPACITY],
    },
    External(Vec<u8>),
}

impl Repr {
    const EMPTY: Repr = Repr::Inline {
        len: 0,
        bytes: [0; INLINE_CAPACITY],
    };
}

/// Byte string with inline small-size storage.
#[derive(Clone)]
pub struct SmallStr {
    repr: Repr,
}

impl SmallStr {
    /// Create an empty inline string.
    pub const fn new() -> Self {
        SmallStr { repr: Repr::EMPTY }
    }

    /// Create a string holding a copy of `bytes`.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, AllocError> {
        let mut s = SmallStr::new();
        s.push_slice(bytes)?;
        Ok(s)
    }

    /// Append one byte.
    #[inline]
    pub fn push(&mut self, byte: u8) -> Result<(), AllocError> {
        self.push_slice(&[byte])
    }

    /// Append a run of bytes, promoting to external storage on overflow.
    pub fn push_slice(&mut self, extra: &[u8]) -> Result<(), AllocError> {
        if extra.is_empty() {
            return Ok(());
        }
        match &mut self.repr {
            Repr::Inline { len, bytes } => {
                let old = usize::from(*len);
                let new_len = old + extra.len();
                if new_len <= INLINE_CAPACITY {
                    bytes[old..new_len].copy_from_slice(extra);
                    *len = new_len as u8;
                    return Ok(());
                }
                let mut heap = Vec::new();
                grow_to_fit(&mut heap, new_len)?;
                heap.extend_from_slice(&bytes[..old]);
                heap.extend_from_slice(extra);
                self.repr = Repr::External(heap);
            }
            Repr::External(heap) => {
                let required = heap.len() + extra.len();
                if required > heap.capacity() {
                    grow_to_fit(heap, required)?;
                }
                heap.extend_from_slice(extra);
            }
        }
        Ok(())
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Inline { len, .. } => usize::from(*len),
            Repr::External(heap) => heap.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the bytes live inside the value.
    #[inline]
    pub fn is_inline(&self) -> bool {
        matches!(self.repr, Repr::Inline { .. })
    }

    /// Bytes that fit without growing.
    pub fn capacity(&self) -> usize {
        match &self.repr {
            Repr::Inline { .. } => INLINE_CAPACITY,
            Repr::External(heap) => heap.capacity(),
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.repr {
            Repr::Inline { len, bytes } => &bytes[..usize::from(*len)],
            Repr::External(heap) => heap,
        }
    }

    /// The contents as `&str`, if they are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    /// The contents as text, with invalid UTF-8 replaced.
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Byte-lexicographic comparison; a proper prefix orders first.
    #[inline]
    pub fn compare(&self, other: &SmallStr) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }

    /// Move the contents into `dest`, leaving `self` empty.
    ///
    /// Inline bytes are copied; an external buffer changes owner.
    pub fn transfer_into(&mut self, dest: &mut SmallStr) {
        *dest = self.take();
    }

    /// Take the contents, leaving `self` empty.
    #[inline]
    pub fn take(&mut self) -> SmallStr {
        std::mem::take(self)
    }

    /// Drop any external buffer and reset to the empty inline state.
    pub fn release(&mut self) {
        self.repr = Repr::EMPTY;
    }
}

/// Reserve exactly the next power of two at or above `required`.
fn grow_to_fit(buf: &mut Vec<u8>, required: usize) -> Result<(), AllocError> {
    let target = required.checked_next_power_of_two().ok_or(AllocError)?;
    buf.try_reserve_exact(target - buf.len())
        .map_err(|_| AllocError)?;
    Ok(())
}

impl Default for SmallStr {
    fn default() -> Self {
        SmallStr::new()
    }
}

impl From<&str> for SmallStr {
    fn from(text: &str) -> Self {
        let src = text.as_bytes();
        if src.len() > INLINE_CAPACITY {
            return SmallStr {
                repr: Repr::External(src.to_vec()),
            };
        }
        let mut bytes = [0; INLINE_CAPACITY];
        bytes[..src.len()].copy_from_slice(src);
        SmallStr {
            repr: Repr::Inline {
                len: src.len() as u8,
                bytes,
            },
        }
    }
}

impl PartialEq for SmallStr {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for SmallStr {}

impl PartialEq<str> for SmallStr {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for SmallStr {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialOrd for SmallStr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for SmallStr {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for SmallStr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Debug for SmallStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_str_lossy())
    }
}

impl fmt::Display for SmallStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

#[cfg(test)]
mod tests;
