//! Interned identifier handle.

use std::fmt;

/// An identifier or literal spelling, interned by [`StringInterner`].
///
/// The low [`Name::SHARD_BITS`] bits pick the interner shard, the rest is
/// the slot within it. Comparing two names compares their spellings.
///
/// [`StringInterner`]: crate::StringInterner
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The empty string, interned up front in shard 0.
    pub const EMPTY: Name = Name(0);

    pub(crate) const SHARD_BITS: u32 = 4;
    pub(crate) const SHARDS: usize = 1 << Self::SHARD_BITS;
    pub(crate) const MAX_SLOT: u32 = u32::MAX >> Self::SHARD_BITS;

    #[inline]
    pub(crate) const fn pack(shard: u32, slot: u32) -> Self {
        debug_assert!((shard as usize) < Self::SHARDS);
        debug_assert!(slot <= Self::MAX_SLOT);
        Name((slot << Self::SHARD_BITS) | shard)
    }

    #[inline]
    pub(crate) const fn shard(self) -> usize {
        (self.0 & (Self::SHARDS as u32 - 1)) as usize
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        (self.0 >> Self::SHARD_BITS) as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({}#{})", self.shard(), self.slot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_round_trips() {
        let name = Name::pack(5, 1000);
        assert_eq!(name.shard(), 5);
        assert_eq!(name.slot(), 1000);
        assert_eq!(format!("{name:?}"), "Name(5#1000)");
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(Name::default(), Name::EMPTY);
        assert_eq!(Name::EMPTY.shard(), 0);
        assert_eq!(Name::EMPTY.slot(), 0);
    }
}
