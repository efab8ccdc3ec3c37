//! Byte ranges into a Go source file.
//!
//! Nodes the rewrite synthesizes carry [`Span::DUMMY`]. The printer keys
//! comment placement and blank-line preservation off real positions, so it
//! must be able to tell the two apart.

use std::fmt;
use std::ops::Range;

/// Half-open byte range `start..end`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Position of synthesized code.
    pub const DUMMY: Span = Span {
        start: u32::MAX,
        end: u32::MAX,
    };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// `None` when either end does not fit a `u32`.
    pub fn from_range(range: Range<usize>) -> Option<Self> {
        Some(Span {
            start: u32::try_from(range.start).ok()?,
            end: u32::try_from(range.end).ok()?,
        })
    }

    /// Zero-width span at `offset`.
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span::new(offset, offset)
    }

    #[inline]
    pub const fn is_dummy(&self) -> bool {
        self.start == u32::MAX
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        (self.start..self.end).contains(&offset)
    }

    /// Smallest span covering both. A dummy side is ignored.
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        match (self.is_dummy(), other.is_dummy()) {
            (true, _) => other,
            (_, true) => self,
            _ => Span::new(self.start.min(other.start), self.end.max(other.end)),
        }
    }

    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dummy() {
            f.write_str("<generated>")
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(target_pointer_width = "64")]
crate::static_assert_size!(Span, 8);

#[cfg(test)]
mod tests;
