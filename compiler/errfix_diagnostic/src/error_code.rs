//! Error codes for all diagnostics.
//!
//! Each code is a unique identifier (e.g. `E1001`) whose first digit names
//! the phase that produced it. Used for `--explain` lookups.

use std::fmt;

use crate::Severity;

/// Error codes for all diagnostics.
///
/// Format: E#### / W#### where the first digit indicates the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Loader and type errors
/// - W3xxx: Rewrite warnings
/// - E4xxx: Output errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Invalid number literal
    E0003,
    /// Unterminated rune literal
    E0004,
    /// Unterminated raw string literal
    E0005,
    /// Unterminated block comment
    E0006,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,
    /// Expected type
    E1005,
    /// Unsupported syntax (type parameters)
    E1006,

    // Loader Errors (E2xxx)
    /// Source file cannot be read
    E2001,
    /// Files of one directory declare different packages
    E2002,
    /// Import cycle between project packages
    E2003,

    // Rewrite Warnings (W3xxx)
    /// Discarded error in a routine that cannot return it
    W3001,

    // Output Errors (E4xxx)
    /// Printer met an invalid tree node
    E4001,
    /// Rewritten file cannot be written
    E4002,
}

impl ErrorCode {
    /// All codes, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::W3001,
        ErrorCode::E4001,
        ErrorCode::E4002,
    ];

    /// Get the code as a string (e.g. `"E1001"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::W3001 => "W3001",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
        }
    }

    /// The phase that reports this code, read off its first digit.
    pub fn phase(self) -> Phase {
        match self.as_str().as_bytes().get(1) {
            Some(b'0') => Phase::Lex,
            Some(b'1') => Phase::Parse,
            Some(b'2') => Phase::Load,
            Some(b'3') => Phase::Rewrite,
            _ => Phase::Output,
        }
    }

    /// Rewrite warnings leave the file to be written; everything else
    /// stops it.
    pub fn severity(self) -> Severity {
        if self.as_str().starts_with('W') {
            Severity::Warning
        } else {
            Severity::Error
        }
    }
}

/// Where in the pipeline a code comes from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    Lex,
    Parse,
    Load,
    Rewrite,
    Output,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"` or `"w3001"`.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
