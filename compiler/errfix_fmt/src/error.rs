//! Printer errors.

use errfix_diagnostic::{Diagnostic, ErrorCode};
use thiserror::Error;

/// The tree handed to the printer is inconsistent. Nothing is written for
/// the file.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum FormatError {
    #[error("invalid {kind} id {id} in syntax tree")]
    InvalidNode { kind: &'static str, id: u32 },
}

impl FormatError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(ErrorCode::E4001)
            .with_message(self.to_string())
            .with_note("the file was left unchanged")
    }
}
