//! Typed indices into the syntax arena.
//!
//! Every node kind lives in its own `Vec` inside [`AstArena`](crate::AstArena)
//! and is addressed by a 4-byte id. Ids stay valid while the tree is mutated:
//! nodes are only ever appended, statement lists hold ids, so inserting a
//! statement never invalidates an id held elsewhere.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Sentinel for a missing node.
            pub const INVALID: $name = $name(u32::MAX);

            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", stringify!($name), self.0)
                } else {
                    write!(f, "{}::INVALID", stringify!($name))
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }
    };
}

define_id!(
    /// Index of an expression node.
    ExprId
);
define_id!(
    /// Index of a statement node.
    StmtId
);
define_id!(
    /// Index of a statement list (a `{ ... }` block or a case clause body).
    BlockId
);
define_id!(
    /// Index of a type-syntax node.
    TypeExprId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sentinel() {
        assert!(!ExprId::INVALID.is_valid());
        assert!(StmtId::new(3).is_valid());
        assert_eq!(BlockId::default(), BlockId::INVALID);
    }

    #[test]
    fn test_debug_output() {
        assert_eq!(format!("{:?}", StmtId::new(7)), "StmtId(7)");
        assert_eq!(format!("{:?}", TypeExprId::INVALID), "TypeExprId::INVALID");
    }
}
