//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::{self, Write};

use crate::{Diagnostic, Label, Severity};

use super::{DiagnosticEmitter, SourceContext};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean; `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Consume the emitter and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    fn write_label_message(&mut self, label: &Label) {
        if label.is_primary {
            self.write_colored(&label.message, colors::ERROR);
        } else {
            self.write_colored(&label.message, colors::SECONDARY);
        }
    }

    /// `  = note: text`
    fn write_trailer(&mut self, kind: &str, color: &str, text: &str) {
        let _ = write!(self.writer, "  = ");
        self.write_colored(kind, color);
        let _ = writeln!(self.writer, ": {text}");
    }

    /// `  --> 3..7: message`, used when no source is available.
    fn write_bare_label(&mut self, label: &Label) {
        let marker = if label.is_primary { "-->" } else { "   " };
        let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
        self.write_label_message(label);
        let _ = writeln!(self.writer);
    }

    /// Location line, source line and an underline for one label.
    fn write_snippet(&mut self, label: &Label, ctx: &SourceContext<'_>) {
        if label.span.is_dummy() {
            self.write_bare_label(label);
            return;
        }
        let (line, col) = ctx.lines.offset_to_line_col(ctx.source, label.span.start);
        let gutter = line.to_string().len();
        let pad = " ".repeat(gutter);

        if label.is_primary {
            let _ = writeln!(self.writer, "{pad}--> {}:{line}:{col}", ctx.path);
        } else {
            let _ = writeln!(self.writer, "{pad}::: {}:{line}:{col}", ctx.path);
        }

        let Some(text) = ctx.lines.line_text(ctx.source, line) else {
            return;
        };
        let _ = writeln!(self.writer, "{pad} |");
        let _ = writeln!(self.writer, "{line} | {text}");

        // Underline stays on the first line of multi-line spans.
        let line_chars = text.chars().count();
        let start_col = (col as usize).saturating_sub(1);
        let span_chars = ctx
            .source
            .get(label.span.to_range())
            .map_or(1, |s| s.lines().next().map_or(1, |first| first.chars().count()));
        let width = span_chars.clamp(1, line_chars.saturating_sub(start_col).max(1));

        // Tabs in the prefix are kept so the marker lines up under them.
        let prefix: String = text
            .chars()
            .take(start_col)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        let marker = if label.is_primary { "^" } else { "-" }.repeat(width);

        let _ = write!(self.writer, "{pad} | {prefix}");
        let color = if label.is_primary {
            colors::ERROR
        } else {
            colors::SECONDARY
        };
        self.write_colored(&marker, color);
        if !label.message.is_empty() {
            let _ = write!(self.writer, " ");
            self.write_label_message(label);
        }
        let _ = writeln!(self.writer);
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Create a terminal emitter for stderr.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic, source: Option<&SourceContext<'_>>) {
        // Header: severity[CODE]: message
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        if diagnostic.labels.is_empty() {
            if let Some(ctx) = source {
                let _ = writeln!(self.writer, "  --> {}", ctx.path);
            }
        }

        for label in &diagnostic.labels {
            match source {
                Some(ctx) => self.write_snippet(label, ctx),
                None => self.write_bare_label(label),
            }
        }

        for note in &diagnostic.notes {
            self.write_trailer("note", colors::BOLD, note);
        }
        for help in &diagnostic.help {
            self.write_trailer("help", colors::HELP, help);
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests;
