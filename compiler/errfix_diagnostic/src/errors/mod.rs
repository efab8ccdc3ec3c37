//! Embedded error documentation for `--explain`.
//!
//! Each code has a markdown file in this directory, embedded at compile
//! time.

use crate::ErrorCode;

/// Registry of embedded error documentation.
pub struct ErrorDocs;

impl ErrorDocs {
    /// Documentation for an error code, if any.
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        DOCS.iter().find(|(c, _)| *c == code).map(|(_, doc)| *doc)
    }

    /// All documented error codes.
    pub fn all_codes() -> impl Iterator<Item = ErrorCode> {
        DOCS.iter().map(|(code, _)| *code)
    }

    /// Check if an error code has documentation.
    pub fn has_docs(code: ErrorCode) -> bool {
        DOCS.iter().any(|(c, _)| *c == code)
    }
}

static DOCS: &[(ErrorCode, &str)] = &[
    // Lexer errors (E0xxx)
    (ErrorCode::E0001, include_str!("E0001.md")),
    (ErrorCode::E0002, include_str!("E0002.md")),
    (ErrorCode::E0003, include_str!("E0003.md")),
    (ErrorCode::E0004, include_str!("E0004.md")),
    (ErrorCode::E0005, include_str!("E0005.md")),
    (ErrorCode::E0006, include_str!("E0006.md")),
    // Parser errors (E1xxx)
    (ErrorCode::E1001, include_str!("E1001.md")),
    (ErrorCode::E1002, include_str!("E1002.md")),
    (ErrorCode::E1003, include_str!("E1003.md")),
    (ErrorCode::E1004, include_str!("E1004.md")),
    (ErrorCode::E1005, include_str!("E1005.md")),
    (ErrorCode::E1006, include_str!("E1006.md")),
    // Loader errors (E2xxx)
    (ErrorCode::E2001, include_str!("E2001.md")),
    (ErrorCode::E2002, include_str!("E2002.md")),
    (ErrorCode::E2003, include_str!("E2003.md")),
    // Rewrite warnings (W3xxx)
    (ErrorCode::W3001, include_str!("W3001.md")),
    // Output errors (E4xxx)
    (ErrorCode::E4001, include_str!("E4001.md")),
    (ErrorCode::E4002, include_str!("E4002.md")),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_is_documented() {
        for code in ErrorCode::ALL {
            assert!(ErrorDocs::has_docs(*code), "{code} has no documentation");
        }
        assert_eq!(ErrorDocs::all_codes().count(), ErrorCode::ALL.len());
    }

    #[test]
    fn test_docs_start_with_their_code() {
        for code in ErrorDocs::all_codes() {
            let doc = ErrorDocs::get(code).unwrap_or_default();
            assert!(
                doc.starts_with(&format!("# {code}")),
                "{code} documentation must start with its heading"
            );
        }
    }
}
