//! Stack growth for the recursive walkers.
//!
//! The parser, the checker, the printer and the candidate scanner all recurse
//! over the syntax tree. Generated Go (long `else if` chains, deeply nested
//! closures or composite literals) can exceed the main thread's stack, and
//! rayon workers start with far less. Every recursive entry point goes through
//! [`ensure_sufficient_stack`].

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}
