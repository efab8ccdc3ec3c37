//! Printer
//!
//! Walks a [`SourceFile`] and emits Go text in gofmt's layout. Layout
//! decisions that depend on the source (blank lines, where lists were
//! broken, one-line function bodies) read line numbers from the original
//! text through each node's span. Nodes created by a rewrite carry
//! [`Span::DUMMY`] and are laid out with the minimum line breaks.
//!
//! The printer is split by syntax category:
//! - `decl`: the file, imports, general declarations, functions
//! - `stmt`: statements, blocks and clauses
//! - `expr`: expressions, binary spacing and list layout
//! - `ty`: type syntax, struct and interface bodies

mod decl;
mod expr;
mod stmt;
mod ty;

use errfix_diagnostic::span_utils::LineOffsetTable;
use errfix_ir::ast::{Expr, SourceFile, Stmt, TypeExpr};
use errfix_ir::{AstArena, Block, BlockId, Comment, ExprId, Name, Span, StmtId, StringInterner, TypeExprId};

use crate::comments::CommentCursor;
use crate::context::FormatContext;
use crate::emitter::{CELL, SECTION};
use crate::FormatError;

pub(crate) type FmtResult<T = ()> = Result<T, FormatError>;

pub(crate) struct Printer<'a> {
    ctx: FormatContext,
    file: &'a SourceFile,
    arena: &'a AstArena,
    interner: &'a StringInterner,
    lines: LineOffsetTable,
    comments: CommentCursor<'a>,
    /// End offset of the last printed source node or comment.
    last_pos: Option<u32>,
    /// Cells to emit before the next trailing comment.
    trailing_cells: usize,
    /// Set while rendering into a scratch context to measure width.
    measuring: bool,
}

impl<'a> Printer<'a> {
    pub(crate) fn new(file: &'a SourceFile, source: &str, interner: &'a StringInterner) -> Self {
        Printer {
            ctx: FormatContext::with_capacity(source.len() + source.len() / 8),
            file,
            arena: &file.arena,
            interner,
            lines: LineOffsetTable::build(source),
            comments: CommentCursor::new(&file.comments),
            last_pos: None,
            trailing_cells: 1,
            measuring: false,
        }
    }

    /// Raw output, alignment control characters included.
    pub(crate) fn finish(self) -> String {
        let mut emitter = self.ctx.into_emitter();
        emitter.ensure_trailing_newline();
        emitter.output()
    }

    fn expr_node(&self, id: ExprId) -> FmtResult<&'a Expr> {
        self.arena.try_expr(id).ok_or(FormatError::InvalidNode {
            kind: "expression",
            id: id.raw(),
        })
    }

    fn stmt_node(&self, id: StmtId) -> FmtResult<&'a Stmt> {
        self.arena.try_stmt(id).ok_or(FormatError::InvalidNode {
            kind: "statement",
            id: id.raw(),
        })
    }

    fn block_node(&self, id: BlockId) -> FmtResult<&'a Block> {
        self.arena.try_block(id).ok_or(FormatError::InvalidNode {
            kind: "block",
            id: id.raw(),
        })
    }

    fn type_node(&self, id: TypeExprId) -> FmtResult<&'a TypeExpr> {
        self.arena.try_type(id).ok_or(FormatError::InvalidNode {
            kind: "type",
            id: id.raw(),
        })
    }

    fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    fn write_name(&mut self, name: Name) {
        let text = self.name(name);
        self.ctx.write(text);
    }

    /// 1-based source line of a byte offset.
    fn line(&self, pos: u32) -> u32 {
        self.lines.line_from_offset(pos)
    }

    /// Start and end lines differ.
    fn spans_lines(&self, span: Span) -> bool {
        !span.is_dummy() && self.line(span.start) != self.line(span.end)
    }

    /// Line breaks before an item at `pos`: the source gap clamped to
    /// `min..=2`, so at most one blank line survives.
    fn gap_to(&self, pos: u32, min: usize) -> usize {
        match self.last_pos {
            Some(last) => {
                let gap = self.line(pos).saturating_sub(self.line(last)) as usize;
                gap.min(2).max(min)
            }
            None => min,
        }
    }

    /// Flush the comments that precede `span`, then break lines for it.
    fn break_before(&mut self, span: Span, min: usize) {
        if span.is_dummy() {
            self.ctx.newlines(min);
            return;
        }
        let mut min = min;
        if !self.measuring {
            while let Some(comment) = self.comments.next_before(span.start) {
                self.comment(comment, &mut min);
            }
        }
        let count = self.gap_to(span.start, min);
        self.ctx.newlines(count);
    }

    fn comment(&mut self, comment: &Comment, min: &mut usize) {
        let trailing = !self.ctx.at_line_start()
            && self
                .last_pos
                .is_some_and(|last| self.line(last) == self.line(comment.span.start));
        if trailing {
            self.ctx.cell();
        } else {
            let count = self.gap_to(comment.span.start, *min);
            self.ctx.newlines(count);
            *min = 1;
        }
        self.ctx.write_verbatim(&comment.text);
        self.last_pos = Some(comment.span.end);
    }

    /// Comments that start on the line where the last item ended.
    fn trailing_comments(&mut self) {
        if self.measuring {
            return;
        }
        let Some(last) = self.last_pos else {
            return;
        };
        let line = self.line(last);
        while let Some(comment) = self.comments.peek() {
            if self.line(comment.span.start) != line {
                break;
            }
            self.comments.advance();
            for _ in 0..self.trailing_cells {
                self.ctx.cell();
            }
            self.trailing_cells = 1;
            self.ctx.write_verbatim(&comment.text);
            self.last_pos = Some(comment.span.end);
        }
    }

    fn end_item(&mut self, span: Span) {
        self.end_aligned_item(span, 1);
    }

    /// Finish an item whose trailing comment belongs in alignment column
    /// `cells` past the last printed cell.
    fn end_aligned_item(&mut self, span: Span, cells: usize) {
        if span.is_dummy() {
            return;
        }
        self.last_pos = Some(span.end);
        self.trailing_cells = cells.max(1);
        self.trailing_comments();
        self.trailing_cells = 1;
    }

    /// Write an opening delimiter that ends at `end` and keep a comment
    /// following it on the same line.
    fn open_delim(&mut self, text: &str, end: Option<u32>) {
        self.ctx.write(text);
        if let Some(end) = end {
            self.last_pos = Some(end);
            self.trailing_comments();
        }
    }

    /// Write a closing delimiter at `pos` one level out. Comments that
    /// precede it stay at the inner level.
    fn close_delim(&mut self, text: &str, pos: Option<u32>) {
        match pos {
            Some(pos) => self.break_before(Span::point(pos), 1),
            None => self.ctx.newline(),
        }
        self.ctx.dedent();
        self.ctx.write(text);
        if let Some(pos) = pos {
            self.last_pos = Some(pos + 1);
        }
    }

    /// Everything after the last declaration.
    fn flush_remaining_comments(&mut self) {
        let mut min = 1;
        while let Some(comment) = self.comments.peek() {
            self.comments.advance();
            self.comment(comment, &mut min);
        }
    }

    /// Render `f` into a scratch context. Returns the width of the result,
    /// or `None` when it spans lines.
    fn measure(&mut self, f: impl FnOnce(&mut Self) -> FmtResult) -> FmtResult<Option<usize>> {
        let ctx = std::mem::take(&mut self.ctx);
        let last_pos = self.last_pos;
        let measuring = std::mem::replace(&mut self.measuring, true);
        let result = f(self);
        let scratch = std::mem::replace(&mut self.ctx, ctx);
        self.last_pos = last_pos;
        self.measuring = measuring;
        result?;
        let text = scratch.into_emitter().output();
        if text.contains('\n') {
            return Ok(None);
        }
        Ok(Some(
            text.chars().filter(|c| *c != CELL && *c != SECTION).count(),
        ))
    }
}
