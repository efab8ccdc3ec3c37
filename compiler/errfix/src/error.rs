//! Errors that stop the run or a single file.

use std::io;
use std::path::PathBuf;

use errfix_diagnostic::{Diagnostic, ErrorCode};
use errfix_fmt::FormatError;
use thiserror::Error;

/// The project cannot be read at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a Go file or directory", path.display())]
    NotGo { path: PathBuf },
}

/// One file or package is skipped; the rest of the run goes on.
#[derive(Debug, Error)]
pub enum UnitError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} does not parse", path.display())]
    Parse {
        path: PathBuf,
        source_text: String,
        diagnostics: Vec<Diagnostic>,
    },

    #[error("{} declares package {found}, expected {expected}", path.display())]
    PackageMismatch {
        path: PathBuf,
        found: String,
        expected: String,
    },

    #[error("import cycle: {cycle}")]
    ImportCycle { path: PathBuf, cycle: String },

    #[error("cannot print {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl UnitError {
    pub fn path(&self) -> &PathBuf {
        match self {
            UnitError::Read { path, .. }
            | UnitError::Parse { path, .. }
            | UnitError::PackageMismatch { path, .. }
            | UnitError::ImportCycle { path, .. }
            | UnitError::Format { path, .. }
            | UnitError::Write { path, .. } => path,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            UnitError::Read { .. } => ErrorCode::E2001,
            UnitError::Parse { diagnostics, .. } => diagnostics
                .first()
                .map_or(ErrorCode::E1001, |d| d.code),
            UnitError::PackageMismatch { .. } => ErrorCode::E2002,
            UnitError::ImportCycle { .. } => ErrorCode::E2003,
            UnitError::Format { .. } => ErrorCode::E4001,
            UnitError::Write { .. } => ErrorCode::E4002,
        }
    }

    /// Diagnostics to render, and the source their spans point into.
    pub fn diagnostics(&self) -> (Vec<Diagnostic>, Option<&str>) {
        match self {
            UnitError::Parse {
                source_text,
                diagnostics,
                ..
            } => (diagnostics.clone(), Some(source_text)),
            UnitError::Format { source, .. } => (vec![source.to_diagnostic()], None),
            other => (
                vec![Diagnostic::new(other.code()).with_message(other.to_string())],
                None,
            ),
        }
    }
}
