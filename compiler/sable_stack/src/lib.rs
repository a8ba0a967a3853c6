//! Stack growth for deep recursion.
//!
//! The parser recurses once per nesting level of the input and tree
//! traversal recurses once per level of the AST. Source like `((((...))))`
//! or `[[[[...]]]]` would otherwise overflow the native stack long before
//! the pools run out of memory.
//!
//! Native targets grow the stack on demand through `stacker`. On wasm the
//! guard is a plain call.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
///
/// Wrap every recursive entry point with this:
///
/// ```
/// fn depth(n: u32) -> u32 {
///     sable_stack::with_stack_guard(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
/// }
/// assert_eq!(depth(10), 10);
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn with_stack_guard<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

/// Wasm manages its own stack; call straight through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn with_stack_guard<R>(f: impl FnOnce() -> R) -> R {
    f()
}
