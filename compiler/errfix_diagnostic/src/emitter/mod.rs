//! Diagnostic emitters.
//!
//! Only a terminal emitter exists; it renders `path:line:col` and the
//! offending source line when the caller supplies a [`SourceContext`].

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::span_utils::LineOffsetTable;
use crate::Diagnostic;

/// The file a diagnostic's spans point into.
#[derive(Clone, Copy, Debug)]
pub struct SourceContext<'a> {
    pub path: &'a str,
    pub source: &'a str,
    pub lines: &'a LineOffsetTable,
}

impl<'a> SourceContext<'a> {
    pub fn new(path: &'a str, source: &'a str, lines: &'a LineOffsetTable) -> Self {
        SourceContext {
            path,
            source,
            lines,
        }
    }
}

/// Trait for emitting diagnostics.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic, source: Option<&SourceContext<'_>>);

    /// Emit multiple diagnostics for the same file.
    fn emit_all(&mut self, diagnostics: &[Diagnostic], source: Option<&SourceContext<'_>>) {
        for diag in diagnostics {
            self.emit(diag, source);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);
}
