//! errfix Printer
//!
//! Turns a (possibly rewritten) Go syntax tree back into source text laid
//! out the way `gofmt` lays it out, so that only the rewritten statements
//! show up in a diff.
//!
//! # Architecture
//!
//! Printing is two passes:
//!
//! 1. **Print Pass**: the printer walks the tree and emits text with tab
//!    indentation, marking alignment cells with [`emitter::CELL`]. Blank
//!    lines and list line breaks follow the original source positions.
//! 2. **Align Pass**: [`align`] pads the cells of consecutive lines so the
//!    columns line up (struct fields, grouped declarations, keyed composite
//!    elements, trailing comments).
//!
//! # Modules
//!
//! - [`emitter`]: Output abstraction and alignment control characters
//! - [`context`]: Indentation and line-start tracking
//! - `comments`: Re-attaching comments by source position
//! - `printer`: The syntax walk
//! - `align`: Elastic tab stops

mod align;
mod comments;
pub mod context;
pub mod emitter;
mod error;
mod printer;

pub use align::align;
pub use context::{FormatContext, MAX_LINE_WIDTH};
pub use emitter::{Emitter, StringEmitter};
pub use error::FormatError;

use errfix_ir::{SourceFile, StringInterner};

/// Print `file` as gofmt-style Go source.
///
/// `source` is the text the file was parsed from; it supplies the line
/// positions that decide blank lines and line breaks. Nodes added by a
/// rewrite carry no position and are printed compactly.
///
/// # Errors
///
/// Returns [`FormatError`] when the tree references a node that is not in
/// its arena.
#[tracing::instrument(level = "debug", skip_all)]
pub fn format_file(
    file: &SourceFile,
    source: &str,
    interner: &StringInterner,
) -> Result<String, FormatError> {
    let mut printer = printer::Printer::new(file, source, interner);
    printer.print_file()?;
    let raw = printer.finish();
    Ok(align(&raw))
}

#[cfg(test)]
mod tests;
