//! Recursive-descent parser for Go.
//!
//! Produces an [`errfix_ir::ast::SourceFile`] whose nodes live in the file's
//! own arena. The supported subset is everything except type parameters;
//! files using them fail with `E1006` and are left alone by the driver.
//!
//! Parsing stops at the first error. A file that does not parse is never
//! rewritten, so recovery would only produce diagnostics nobody acts on.

mod context;
mod cursor;
mod error;
mod grammar;

pub use context::ParseContext;
pub use error::ParseError;

use cursor::Cursor;
use errfix_diagnostic::Diagnostic;
use errfix_ir::ast::SourceFile;
use errfix_ir::{AstArena, StringInterner};

/// Result of parsing one file.
#[derive(Debug)]
pub struct ParseOutput {
    /// `None` when lexing or parsing failed.
    pub file: Option<SourceFile>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Lex and parse a Go source file.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str, interner: &StringInterner) -> ParseOutput {
    let lexed = errfix_lexer::lex(source, interner);
    if lexed.has_errors() {
        return ParseOutput {
            file: None,
            diagnostics: lexed.errors.iter().map(|e| e.to_diagnostic()).collect(),
        };
    }

    let mut parser = Parser::new(&lexed.tokens, interner, source.len());
    match parser.source_file() {
        Ok(mut file) => {
            file.comments = lexed.comments;
            file.span = errfix_ir::Span::from_range(0..source.len()).unwrap_or(errfix_ir::Span::DUMMY);
            ParseOutput {
                file: Some(file),
                diagnostics: Vec::new(),
            }
        }
        Err(err) => {
            tracing::debug!(message = %err.message, "parse failed");
            ParseOutput {
                file: None,
                diagnostics: vec![err.to_diagnostic()],
            }
        }
    }
}

pub(crate) type PResult<T> = Result<T, ParseError>;

/// Parser state for one file.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: AstArena,
    interner: &'a StringInterner,
    context: ParseContext,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a errfix_ir::TokenList, interner: &'a StringInterner, len: usize) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            arena: AstArena::with_capacity(len),
            interner,
            context: ParseContext::NONE,
        }
    }

    /// Run `f` with `context` replaced, restoring it afterwards.
    fn with_context<T>(&mut self, context: ParseContext, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.context;
        self.context = context;
        let result = f(self);
        self.context = saved;
        result
    }
}
