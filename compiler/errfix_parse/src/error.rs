//! Parse errors.

use errfix_diagnostic::{Diagnostic, ErrorCode};
use errfix_ir::{Span, TokenKind};

/// A parse error. Parsing of a file stops at the first one; the file is
/// then skipped by the driver.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    pub label: String,
    /// Opening delimiter for unclosed-delimiter errors.
    pub related: Option<Span>,
}

impl ParseError {
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            label: String::new(),
            related: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_related(mut self, span: Span) -> Self {
        self.related = Some(span);
        self
    }

    /// `expected X, found Y`.
    pub fn unexpected(expected: &str, found: TokenKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1001,
            format!("unexpected token: expected {expected}, found `{found}`"),
            span,
        )
        .with_label(format!("expected {expected}"))
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::new(self.code)
            .with_message(self.message.clone())
            .with_label(self.span, self.label.clone());
        if let Some(open) = self.related {
            diag = diag.with_secondary_label(open, "opened here");
        }
        if self.code == ErrorCode::E1006 {
            diag = diag.with_note("files using type parameters are left unchanged");
        }
        diag
    }
}
