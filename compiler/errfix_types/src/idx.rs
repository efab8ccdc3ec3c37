//! Type index handle.
//!
//! Every type lives in the [`Pool`](crate::Pool) and is referred to by a
//! 32-bit `Idx`. Predeclared types have fixed indices so they compare equal
//! across pools and can be matched without a pool at hand.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Predeclared types (0-31) ===
    pub const BOOL: Self = Self(0);
    pub const INT: Self = Self(1);
    pub const INT8: Self = Self(2);
    pub const INT16: Self = Self(3);
    pub const INT32: Self = Self(4);
    pub const INT64: Self = Self(5);
    pub const UINT: Self = Self(6);
    pub const UINT8: Self = Self(7);
    pub const UINT16: Self = Self(8);
    pub const UINT32: Self = Self(9);
    pub const UINT64: Self = Self(10);
    pub const UINTPTR: Self = Self(11);
    pub const FLOAT32: Self = Self(12);
    pub const FLOAT64: Self = Self(13);
    pub const COMPLEX64: Self = Self(14);
    pub const COMPLEX128: Self = Self(15);
    pub const STRING: Self = Self(16);

    // Untyped constant kinds.
    pub const UNTYPED_BOOL: Self = Self(17);
    pub const UNTYPED_INT: Self = Self(18);
    pub const UNTYPED_RUNE: Self = Self(19);
    pub const UNTYPED_FLOAT: Self = Self(20);
    pub const UNTYPED_IMAG: Self = Self(21);
    pub const UNTYPED_STRING: Self = Self(22);
    pub const UNTYPED_NIL: Self = Self(23);

    /// `interface{}` / `any`.
    pub const ANY: Self = Self(24);
    /// The predeclared `error` interface (a named type).
    pub const ERROR: Self = Self(25);
    /// Empty tuple: the result of a call with no results.
    pub const UNIT: Self = Self(26);

    /// Number of pre-interned types.
    pub const PREDECLARED_COUNT: u32 = 27;

    /// Unknown or unresolvable type.
    pub const INVALID: Self = Self(u32::MAX);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_predeclared(self) -> bool {
        self.0 < Self::PREDECLARED_COUNT
    }

    /// Untyped constant kinds, including untyped `nil`.
    #[inline]
    pub const fn is_untyped(self) -> bool {
        self.0 >= Self::UNTYPED_BOOL.0 && self.0 <= Self::UNTYPED_NIL.0
    }

    /// Default type of an untyped constant (`1` → `int`, `'a'` → `rune`).
    pub const fn default_type(self) -> Self {
        match self.0 {
            17 => Self::BOOL,
            18 => Self::INT,
            19 => Self::INT32,
            20 => Self::FLOAT64,
            21 => Self::COMPLEX128,
            22 => Self::STRING,
            _ => self,
        }
    }

    /// Source name of a predeclared type.
    pub const fn name(self) -> Option<&'static str> {
        Some(match self.0 {
            0 => "bool",
            1 => "int",
            2 => "int8",
            3 => "int16",
            4 => "int32",
            5 => "int64",
            6 => "uint",
            7 => "uint8",
            8 => "uint16",
            9 => "uint32",
            10 => "uint64",
            11 => "uintptr",
            12 => "float32",
            13 => "float64",
            14 => "complex64",
            15 => "complex128",
            16 => "string",
            17 => "untyped bool",
            18 => "untyped int",
            19 => "untyped rune",
            20 => "untyped float",
            21 => "untyped complex",
            22 => "untyped string",
            23 => "untyped nil",
            24 => "any",
            25 => "error",
            26 => "()",
            _ => return None,
        })
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Idx({name})"),
            None if self.is_invalid() => write!(f, "Idx::INVALID"),
            None => write!(f, "Idx({})", self.0),
        }
    }
}

impl Default for Idx {
    fn default() -> Self {
        Self::INVALID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untyped_defaults() {
        assert_eq!(Idx::UNTYPED_INT.default_type(), Idx::INT);
        assert_eq!(Idx::UNTYPED_RUNE.default_type(), Idx::INT32);
        assert_eq!(Idx::UNTYPED_STRING.default_type(), Idx::STRING);
        assert_eq!(Idx::UNTYPED_NIL.default_type(), Idx::UNTYPED_NIL);
        assert_eq!(Idx::STRING.default_type(), Idx::STRING);
    }

    #[test]
    fn test_names_and_predicates() {
        assert_eq!(Idx::ERROR.name(), Some("error"));
        assert_eq!(Idx::from_raw(400).name(), None);
        assert!(Idx::UNTYPED_NIL.is_untyped());
        assert!(!Idx::ANY.is_untyped());
        assert!(Idx::INVALID.is_invalid());
        assert!(!Idx::INVALID.is_predeclared());
        assert_eq!(format!("{:?}", Idx::INT), "Idx(int)");
    }
}
