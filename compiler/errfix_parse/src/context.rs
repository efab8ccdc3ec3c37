//! Parse context flags.

/// Context flags controlling context-sensitive parsing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseContext(u8);

impl ParseContext {
    pub const NONE: Self = Self(0);

    /// `T{` does not start a composite literal for a bare type name.
    /// Set while parsing `if`/`for`/`switch` headers, where `{` opens the
    /// body.
    pub const NO_COMPOSITE_LIT: Self = Self(1 << 0);

    /// A `range` clause may follow the assignment operator.
    pub const RANGE_OK: Self = Self(1 << 1);

    #[inline]
    pub const fn has(self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }

    #[inline]
    #[must_use]
    pub const fn with(self, flag: Self) -> Self {
        Self(self.0 | flag.0)
    }

    #[inline]
    #[must_use]
    pub const fn without(self, flag: Self) -> Self {
        Self(self.0 & !flag.0)
    }

    #[inline]
    pub const fn allows_composite_lit(self) -> bool {
        !self.has(Self::NO_COMPOSITE_LIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_combine() {
        let ctx = ParseContext::NONE.with(ParseContext::NO_COMPOSITE_LIT);
        assert!(!ctx.allows_composite_lit());
        assert!(ctx.without(ParseContext::NO_COMPOSITE_LIT).allows_composite_lit());
        assert!(!ctx.has(ParseContext::RANGE_OK));
    }
}
