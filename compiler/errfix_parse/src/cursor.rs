//! Token cursor.

use errfix_diagnostic::ErrorCode;
use errfix_ir::ast::Ident;
use errfix_ir::{Span, Token, TokenKind, TokenList};
use tracing::trace;

use crate::ParseError;

/// Position in a [`TokenList`]. The list always ends with EOF and the
/// cursor never moves past it.
pub(crate) struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a TokenList) -> Self {
        Cursor {
            tokens: tokens.as_slice(),
            pos: 0,
        }
    }

    #[inline]
    pub(crate) fn current(&self) -> Token {
        self.token_at(self.pos)
    }

    fn token_at(&self, index: usize) -> Token {
        match self.tokens.get(index) {
            Some(token) => *token,
            None => self.tokens.last().copied().unwrap_or(Token::new(
                TokenKind::Eof,
                Span::DUMMY,
                errfix_ir::TokenFlags::EMPTY,
            )),
        }
    }

    #[inline]
    pub(crate) fn kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub(crate) fn span(&self) -> Span {
        self.current().span
    }

    #[inline]
    pub(crate) fn peek_kind(&self, n: usize) -> TokenKind {
        self.token_at(self.pos + n).kind
    }

    /// End offset of the last consumed token.
    #[inline]
    pub(crate) fn prev_end(&self) -> u32 {
        if self.pos == 0 {
            return 0;
        }
        self.token_at(self.pos - 1).span.end
    }

    /// Span from `start` to the end of the last consumed token.
    #[inline]
    pub(crate) fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.prev_end().max(start))
    }

    #[inline]
    pub(crate) fn has_newline_before(&self) -> bool {
        self.current().flags.has_newline_before()
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.kind() == TokenKind::Eof
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    #[inline]
    pub(crate) fn check_ident(&self) -> bool {
        matches!(self.kind(), TokenKind::Ident(_))
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current();
        trace!(pos = self.pos, kind = %token.kind, "advance");
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume `kind` if present.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(ParseError::unexpected(
                &format!("`{kind}`"),
                self.kind(),
                self.span(),
            ))
        }
    }

    /// Expect a closing delimiter, pointing back at the opener on failure.
    pub(crate) fn expect_closing(&mut self, kind: TokenKind, open: Span) -> Result<Span, ParseError> {
        if self.check(kind) {
            return Ok(self.advance().span);
        }
        let code = if self.is_at_end() {
            ErrorCode::E1003
        } else {
            ErrorCode::E1001
        };
        Err(ParseError::new(
            code,
            format!("expected `{kind}`, found `{}`", self.kind()),
            self.span(),
        )
        .with_label(format!("expected `{kind}`"))
        .with_related(open))
    }

    pub(crate) fn expect_ident(&mut self) -> Result<Ident, ParseError> {
        match self.kind() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok(Ident::new(name, span))
            }
            other => Err(ParseError::new(
                ErrorCode::E1004,
                format!("expected identifier, found `{other}`"),
                self.span(),
            )
            .with_label("expected identifier")),
        }
    }

    /// Statement terminator: `;` (explicit or implicit), or nothing before a
    /// closing `)`/`}`.
    pub(crate) fn expect_semi(&mut self) -> Result<(), ParseError> {
        match self.kind() {
            TokenKind::Semicolon => {
                self.advance();
                Ok(())
            }
            TokenKind::RParen | TokenKind::RBrace | TokenKind::Eof => Ok(()),
            other => Err(ParseError::unexpected("`;` or newline", other, self.span())),
        }
    }
}
