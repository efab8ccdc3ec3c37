//! Output Emitter
//!
//! Abstraction for output production during printing. The printer writes
//! raw text plus two control characters that the alignment pass consumes:
//! [`CELL`] ends an alignment cell, [`SECTION`] at the start of a line stops
//! alignment from continuing across it.

/// Alignment cell terminator.
pub const CELL: char = '\u{b}';

/// Alignment section break.
pub const SECTION: char = '\u{c}';

/// Trait for emitting printed output.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit indentation (one tab per level).
    fn emit_indent(&mut self, level: usize);

    /// Emit a single space.
    fn emit_space(&mut self);

    /// End the current alignment cell.
    fn emit_cell(&mut self);

    /// Keep the next line out of the alignment block above it.
    fn emit_section_break(&mut self);
}

/// String-based emitter for in-memory printing.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Get the raw output, control characters included.
    pub fn output(self) -> String {
        self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Ensure the output ends with exactly one newline.
    pub fn ensure_trailing_newline(&mut self) {
        while self.buffer.ends_with("\n\n") {
            self.buffer.pop();
        }
        if !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level {
            self.buffer.push('\t');
        }
    }

    fn emit_space(&mut self) {
        self.buffer.push(' ');
    }

    fn emit_cell(&mut self) {
        self.buffer.push(CELL);
    }

    fn emit_section_break(&mut self) {
        self.buffer.push(SECTION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_newline_is_normalized() {
        let mut e = StringEmitter::new();
        e.emit("package main");
        e.emit_newline();
        e.emit_newline();
        e.ensure_trailing_newline();
        assert_eq!(e.output(), "package main\n");
    }

    #[test]
    fn test_indent_uses_tabs() {
        let mut e = StringEmitter::new();
        e.emit_indent(2);
        e.emit("x");
        e.emit_cell();
        assert_eq!(e.as_str(), "\t\tx\u{b}");
    }
}
