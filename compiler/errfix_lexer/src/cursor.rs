//! Byte cursor over Go source.
//!
//! Reads past the end yield `0`, which no Go token starts with, so the
//! scanner's dispatch treats it as end of input without separate checks.

/// Copyable cursor; snapshots are plain copies.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor {
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    #[inline]
    pub(crate) fn peek2(&self) -> u8 {
        self.byte_at(self.pos + 2)
    }

    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self.bytes.get(index).copied().unwrap_or(0)
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        if self.pos < self.bytes.len() {
            self.pos += 1;
        }
    }

    #[inline]
    pub(crate) fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.bytes.len());
    }

    /// Advance while `pred` holds for the current byte.
    #[inline]
    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Skip spaces, tabs and carriage returns. Newlines are significant.
    #[inline]
    pub(crate) fn eat_horizontal_space(&mut self) {
        self.eat_while(|b| b == b' ' || b == b'\t' || b == b'\r');
    }

    /// Move to the next `\n` (not past it), or to EOF.
    pub(crate) fn skip_to_newline(&mut self) {
        let rest = &self.bytes[self.pos..];
        match memchr::memchr(b'\n', rest) {
            Some(offset) => self.pos += offset,
            None => self.pos = self.bytes.len(),
        }
    }

    /// Position of the next occurrence of `byte`.
    pub(crate) fn find_byte(&self, byte: u8) -> Option<usize> {
        memchr::memchr(byte, &self.bytes[self.pos..]).map(|offset| self.pos + offset)
    }

    /// Position of the next occurrence of any of the three bytes.
    pub(crate) fn find3(&self, a: u8, b: u8, c: u8) -> Option<usize> {
        memchr::memchr3(a, b, c, &self.bytes[self.pos..]).map(|offset| self.pos + offset)
    }

    /// Position of the next occurrence of `needle`.
    pub(crate) fn find_seq(&self, needle: &[u8]) -> Option<usize> {
        memchr::memmem::find(&self.bytes[self.pos..], needle).map(|offset| self.pos + offset)
    }

    /// Jump to an absolute position at or after the current one.
    pub(crate) fn seek(&mut self, pos: usize) {
        debug_assert!(pos >= self.pos, "cursor only moves forward");
        self.pos = pos.min(self.bytes.len());
    }

    /// Whether `[from, to)` contains a newline.
    pub(crate) fn has_newline(&self, from: usize, to: usize) -> bool {
        self.bytes
            .get(from..to)
            .is_some_and(|slice| memchr::memchr(b'\n', slice).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_past_end_yield_zero() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.current(), b'a');
        assert_eq!(cursor.peek2(), 0);
        cursor.advance_n(5);
        assert!(cursor.is_eof());
        assert_eq!(cursor.current(), 0);
    }

    #[test]
    fn test_skip_to_newline() {
        let mut cursor = Cursor::new("// c\nx");
        cursor.skip_to_newline();
        assert_eq!(cursor.current(), b'\n');
        assert_eq!(cursor.pos(), 4);
    }

    #[test]
    fn test_find_helpers() {
        let cursor = Cursor::new("a \"b\\\" */");
        assert_eq!(cursor.find3(b'"', b'\\', b'\n'), Some(2));
        assert_eq!(cursor.find_seq(b"*/"), Some(7));
        assert!(!cursor.has_newline(0, 9));
    }
}
