//! Lexer errors.

use errfix_diagnostic::{Diagnostic, ErrorCode};
use errfix_ir::Span;

/// A lexer error. Scanning continues after an error so that every problem in
/// a file is reported at once.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    UnterminatedString,
    UnterminatedRune,
    UnterminatedRawString,
    UnterminatedComment,
    InvalidCharacter(char),
    /// Radix prefix or exponent without digits.
    InvalidNumber,
}

impl LexError {
    pub fn new(span: Span, kind: LexErrorKind) -> Self {
        LexError { span, kind }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::InvalidCharacter(_) => ErrorCode::E0002,
            LexErrorKind::InvalidNumber => ErrorCode::E0003,
            LexErrorKind::UnterminatedRune => ErrorCode::E0004,
            LexErrorKind::UnterminatedRawString => ErrorCode::E0005,
            LexErrorKind::UnterminatedComment => ErrorCode::E0006,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let (message, label) = match &self.kind {
            LexErrorKind::UnterminatedString => (
                "unterminated string literal".to_string(),
                "missing closing `\"`",
            ),
            LexErrorKind::UnterminatedRune => (
                "unterminated rune literal".to_string(),
                "missing closing `'`",
            ),
            LexErrorKind::UnterminatedRawString => (
                "unterminated raw string literal".to_string(),
                "missing closing backquote",
            ),
            LexErrorKind::UnterminatedComment => (
                "unterminated block comment".to_string(),
                "comment starts here",
            ),
            LexErrorKind::InvalidCharacter(c) => (
                format!("invalid character {c:?} in source"),
                "not part of any token",
            ),
            LexErrorKind::InvalidNumber => (
                "invalid number literal".to_string(),
                "expected digits",
            ),
        };
        Diagnostic::new(self.code())
            .with_message(message)
            .with_label(self.span, label)
    }
}
