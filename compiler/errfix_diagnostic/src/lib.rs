//! Diagnostics for every errfix phase.
//!
//! A diagnostic carries:
//! - an error code for `--explain` lookups
//! - a message saying what went wrong
//! - a primary span saying where
//! - optional secondary labels, notes and help lines
//!
//! Diagnostics are values. Phases collect them and hand them back to the
//! driver, which renders them through an emitter once per file.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::{ErrorCode, Phase};
pub use errors::ErrorDocs;
