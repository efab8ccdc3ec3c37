//! Formatting Context
//!
//! Tracks state during printing: indentation level, column and whether the
//! current line has started. Indentation is emitted lazily on the first
//! write of a line, so blank lines never carry trailing tabs and a dedent
//! issued after a newline still applies to the line that follows.

use crate::emitter::{Emitter, StringEmitter};

/// Width budget used when deciding whether a function body fits on its
/// header line.
pub const MAX_LINE_WIDTH: usize = 100;

/// Formatting context that tracks state during output.
pub struct FormatContext<E: Emitter = StringEmitter> {
    emitter: E,
    column: usize,
    indent_level: usize,
    at_line_start: bool,
    section_pending: bool,
}

impl FormatContext<StringEmitter> {
    /// Create a new format context with a string emitter.
    pub fn new() -> Self {
        Self::with_emitter(StringEmitter::new())
    }

    /// Create with pre-allocated capacity for the output buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_emitter(StringEmitter::with_capacity(capacity))
    }
}

impl Default for FormatContext<StringEmitter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Emitter> FormatContext<E> {
    /// Create a format context with a specific emitter.
    pub fn with_emitter(emitter: E) -> Self {
        Self {
            emitter,
            column: 0,
            indent_level: 0,
            at_line_start: true,
            section_pending: false,
        }
    }

    /// Current column, counting a tab as one column.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Nothing has been written on the current line yet.
    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    fn begin_line(&mut self) {
        if self.at_line_start {
            if self.section_pending {
                self.emitter.emit_section_break();
                self.section_pending = false;
            }
            self.emitter.emit_indent(self.indent_level);
            self.column = self.indent_level;
            self.at_line_start = false;
        }
    }

    /// Emit a text fragment. Fragments never contain newlines.
    pub fn write(&mut self, text: &str) {
        self.begin_line();
        self.emitter.emit(text);
        self.column += text.chars().count();
    }

    /// Emit text that may span lines (block comments). Continuation lines
    /// are written exactly as given, without indentation.
    pub fn write_verbatim(&mut self, text: &str) {
        self.begin_line();
        self.emitter.emit(text);
        match text.rfind('\n') {
            Some(at) => self.column = text[at + 1..].chars().count(),
            None => self.column += text.chars().count(),
        }
    }

    /// Emit a single space.
    pub fn space(&mut self) {
        self.begin_line();
        self.emitter.emit_space();
        self.column += 1;
    }

    /// End the current alignment cell.
    pub fn cell(&mut self) {
        self.begin_line();
        self.emitter.emit_cell();
        self.column += 1;
    }

    pub fn newline(&mut self) {
        self.emitter.emit_newline();
        self.column = 0;
        self.at_line_start = true;
    }

    pub fn newlines(&mut self, count: usize) {
        for _ in 0..count {
            self.newline();
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Start a new alignment section at the next line.
    pub fn section_break(&mut self) {
        self.section_pending = true;
    }

    /// Consume the context and return the emitter.
    pub fn into_emitter(self) -> E {
        self.emitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_indent_is_lazy() {
        let mut ctx = FormatContext::new();
        ctx.write("{");
        ctx.indent();
        ctx.newlines(2);
        ctx.write("x");
        ctx.dedent();
        ctx.newline();
        ctx.write("}");
        assert_eq!(ctx.into_emitter().output(), "{\n\n\tx\n}");
    }

    #[test]
    fn test_section_break_prefixes_next_line() {
        let mut ctx = FormatContext::new();
        ctx.write("a");
        ctx.section_break();
        ctx.newline();
        ctx.write("b");
        assert_eq!(ctx.into_emitter().output(), "a\n\u{c}b");
    }

    #[test]
    fn test_column_tracks_line() {
        let mut ctx = FormatContext::new();
        ctx.indent();
        ctx.write("abc");
        ctx.space();
        assert_eq!(ctx.column(), 5);
        ctx.newline();
        assert_eq!(ctx.column(), 0);
    }
}
