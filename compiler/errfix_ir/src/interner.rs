//! String interner shared by the parallel parse and rewrite passes.
//!
//! One interner serves a whole project run. Worker threads borrow it, so
//! storage is split into shards behind their own `RwLock`s: a lookup of an
//! already-interned name only takes a shared lock.

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHasher};

use super::Name;

/// Names every run needs: Go keywords that appear as identifiers, the
/// predeclared types, and what the rewrite itself inserts.
const PREDECLARED: &[&str] = &[
    "_", "main", "init", "err", "nil", "true", "false", "iota", "bool", "byte", "rune",
    "string", "error", "any", "int", "int8", "int16", "int32", "int64", "uint", "uint8",
    "uint16", "uint32", "uint64", "uintptr", "float32", "float64", "complex64", "complex128",
    "Error", "log", "Fatalf",
];

#[derive(Default)]
struct Shard {
    slots: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Shard {
    fn find(&self, s: &str) -> Option<u32> {
        self.slots.get(s).copied()
    }
}

pub struct StringInterner {
    shards: [RwLock<Shard>; Name::SHARDS],
    count: AtomicUsize,
}

impl StringInterner {
    pub fn new() -> Self {
        let interner = StringInterner {
            shards: std::array::from_fn(|_| RwLock::new(Shard::default())),
            count: AtomicUsize::new(0),
        };
        // "" must land in slot 0 of shard 0 to match `Name::EMPTY`.
        {
            let mut shard = interner.shards[0].write();
            shard.slots.insert("", 0);
            shard.strings.push("");
        }
        interner.count.store(1, Ordering::Relaxed);
        for s in PREDECLARED {
            interner.intern(s);
        }
        interner
    }

    fn shard_of(s: &str) -> usize {
        if s.is_empty() {
            return 0;
        }
        let mut hasher = FxHasher::default();
        s.hash(&mut hasher);
        usize::from(hasher.finish().to_le_bytes()[0]) % Name::SHARDS
    }

    pub fn intern(&self, s: &str) -> Name {
        let index = Self::shard_of(s);
        #[expect(clippy::cast_possible_truncation, reason = "index < Name::SHARDS")]
        let shard_id = index as u32;
        let shard = &self.shards[index];

        if let Some(slot) = shard.read().find(s) {
            return Name::pack(shard_id, slot);
        }
        let mut shard = shard.write();
        // another thread may have won the race for the write lock
        if let Some(slot) = shard.find(s) {
            return Name::pack(shard_id, slot);
        }

        #[expect(
            clippy::cast_possible_truncation,
            reason = "a shard holding 2^28 names exhausts memory first"
        )]
        let slot = (shard.strings.len() as u32).min(Name::MAX_SLOT);
        // Interned text outlives every file of the run.
        let text: &'static str = Box::leak(s.into());
        shard.strings.push(text);
        shard.slots.insert(text, slot);
        self.count.fetch_add(1, Ordering::Relaxed);
        Name::pack(shard_id, slot)
    }

    /// The spelling of `name`; `""` for a name from another interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.shards[name.shard()]
            .read()
            .strings
            .get(name.slot())
            .copied()
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Cheaply cloned handle to one interner; the type checker keeps one so
/// its `Program` can outlive the loader that filled it.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &StringInterner {
        &self.0
    }
}

#[cfg(test)]
mod tests;
