#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cmp::Ordering;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn short_content_stays_inline() {
    let mut s = SmallStr::new();
    s.push_slice(b"hello").unwrap();
    s.push(b'!').unwrap();
    assert!(s.is_inline());
    assert_eq!(s.as_bytes(), b"hello!");
    assert_eq!(s.len(), 6);
}

#[test]
fn inline_capacity_is_exactly_fillable() {
    let full = vec![b'a'; INLINE_CAPACITY];
    let s = SmallStr::try_from_bytes(&full).unwrap();
    assert!(s.is_inline());
    assert_eq!(s.len(), INLINE_CAPACITY);
}

#[test]
fn overflow_promotes_and_keeps_existing_bytes() {
    let mut s = SmallStr::try_from_bytes(b"abc").unwrap();
    s.push_slice(&[b'z'; INLINE_CAPACITY]).unwrap();
    assert!(!s.is_inline());
    assert_eq!(&s.as_bytes()[..3], b"abc");
    assert_eq!(s.len(), 3 + INLINE_CAPACITY);
    assert_eq!(s.capacity(), (3 + INLINE_CAPACITY).next_power_of_two());
}

#[test]
fn external_growth_is_power_of_two() {
    let mut s = SmallStr::new();
    for _ in 0..33 {
        s.push(b'x').unwrap();
    }
    assert_eq!(s.capacity(), 64);
    assert_eq!(s.len(), 33);
}

#[test]
fn compare_is_bytewise_with_prefix_first() {
    let ab = SmallStr::from("ab");
    let abc = SmallStr::from("abc");
    let b = SmallStr::from("b");
    assert_eq!(ab.compare(&abc), Ordering::Less);
    assert_eq!(abc.compare(&b), Ordering::Less);
    assert_eq!(abc.compare(&abc.clone()), Ordering::Equal);
    assert!(b > abc);
}

#[test]
fn equality_ignores_storage_tier() {
    let long = "a string that is longer than inline";
    let mut pushed = SmallStr::new();
    for byte in long.bytes() {
        pushed.push(byte).unwrap();
    }
    assert_eq!(pushed, SmallStr::from(long));
    assert_eq!(pushed, long);
}

#[test]
fn transfer_moves_external_buffer() {
    let mut src = SmallStr::from("an identifier long enough for the heap");
    let before = src.as_bytes().as_ptr();
    let mut dest = SmallStr::from("old");

    src.transfer_into(&mut dest);

    assert!(src.is_empty());
    assert!(src.is_inline());
    assert_eq!(dest.as_bytes().as_ptr(), before);
    assert_eq!(dest, "an identifier long enough for the heap");
}

#[test]
fn transfer_copies_inline_bytes() {
    let mut src = SmallStr::from("x1");
    let mut dest = SmallStr::new();
    src.transfer_into(&mut dest);
    assert!(src.is_empty());
    assert_eq!(dest, "x1");
}

#[test]
fn release_resets_to_empty_inline() {
    let mut s = SmallStr::from("some text that lives on the heap");
    s.release();
    assert!(s.is_empty());
    assert!(s.is_inline());
    assert_eq!(s.capacity(), INLINE_CAPACITY);
}

#[test]
fn display_and_debug_are_lossy_utf8() {
    let s = SmallStr::try_from_bytes(b"ok\xff").unwrap();
    assert_eq!(s.to_string(), "ok\u{fffd}");
    assert_eq!(format!("{s:?}"), "\"ok\u{fffd}\"");
    assert_eq!(s.as_str(), None);
    assert_eq!(SmallStr::from("fine").as_str(), Some("fine"));
}
