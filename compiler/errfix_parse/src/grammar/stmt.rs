//! Statements and blocks.

use errfix_diagnostic::ErrorCode;
use errfix_ir::ast::{AssignOp, BinaryOp, BranchKind, CaseClause, ClauseKind, Stmt, StmtKind};
use errfix_ir::{Block, BlockId, ExprId, Span, StmtId, TokenKind};

use crate::{PResult, ParseContext, ParseError, Parser};

/// A simple statement, or the `k, v := range x` clause only allowed in a
/// `for` header.
enum Simple {
    Stmt(StmtId),
    Range {
        key: Option<ExprId>,
        value: Option<ExprId>,
        op: Option<AssignOp>,
        expr: ExprId,
    },
}

enum ForHeader {
    Loop {
        init: Option<StmtId>,
        cond: Option<ExprId>,
        post: Option<StmtId>,
    },
    Range {
        key: Option<ExprId>,
        value: Option<ExprId>,
        op: Option<AssignOp>,
        expr: ExprId,
    },
}

fn compound_op(kind: TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::AddAssign => BinaryOp::Add,
        TokenKind::SubAssign => BinaryOp::Sub,
        TokenKind::MulAssign => BinaryOp::Mul,
        TokenKind::QuoAssign => BinaryOp::Div,
        TokenKind::RemAssign => BinaryOp::Rem,
        TokenKind::AndAssign => BinaryOp::And,
        TokenKind::OrAssign => BinaryOp::Or,
        TokenKind::XorAssign => BinaryOp::Xor,
        TokenKind::ShlAssign => BinaryOp::Shl,
        TokenKind::ShrAssign => BinaryOp::Shr,
        TokenKind::AndNotAssign => BinaryOp::AndNot,
        _ => return None,
    })
}

impl Parser<'_> {
    fn alloc_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        self.arena.alloc_stmt(Stmt::new(kind, span))
    }

    /// `{ stmts }`.
    pub(crate) fn block(&mut self) -> PResult<BlockId> {
        let open = self.cursor.expect(TokenKind::LBrace)?;
        let stmts = self.with_context(ParseContext::NONE, |p| p.stmt_list())?;
        self.cursor.expect_closing(TokenKind::RBrace, open)?;
        let span = self.cursor.span_from(open.start);
        Ok(self.arena.alloc_block(Block::new(stmts, span)))
    }

    /// Statements up to `}`, `case` or `default`.
    fn stmt_list(&mut self) -> PResult<Vec<StmtId>> {
        let mut stmts = Vec::new();
        loop {
            match self.cursor.kind() {
                TokenKind::RBrace | TokenKind::Case | TokenKind::Default | TokenKind::Eof => {
                    return Ok(stmts)
                }
                TokenKind::Semicolon => {
                    self.cursor.advance();
                }
                _ => {
                    stmts.push(self.stmt()?);
                    self.cursor.expect_semi()?;
                }
            }
        }
    }

    fn stmt(&mut self) -> PResult<StmtId> {
        errfix_stack::ensure_sufficient_stack(|| self.stmt_inner())
    }

    fn stmt_inner(&mut self) -> PResult<StmtId> {
        let start = self.cursor.span().start;
        let kind = match self.cursor.kind() {
            TokenKind::Var | TokenKind::Const | TokenKind::Type => {
                StmtKind::Decl(self.gen_decl()?)
            }
            TokenKind::Ident(label) if self.cursor.peek_kind(1) == TokenKind::Colon => {
                self.cursor.advance();
                self.cursor.advance();
                let stmt = if matches!(self.cursor.kind(), TokenKind::RBrace | TokenKind::Eof) {
                    let end = self.cursor.prev_end();
                    self.alloc_stmt(StmtKind::Empty, Span::new(end, end))
                } else {
                    self.stmt()?
                };
                StmtKind::Labeled { label, stmt }
            }
            TokenKind::Go => {
                self.cursor.advance();
                StmtKind::Go(self.expr()?)
            }
            TokenKind::Defer => {
                self.cursor.advance();
                StmtKind::Defer(self.expr()?)
            }
            TokenKind::Return => {
                self.cursor.advance();
                let results = if matches!(self.cursor.kind(), TokenKind::Semicolon | TokenKind::RBrace)
                {
                    Vec::new()
                } else {
                    self.expr_list()?
                };
                StmtKind::Return(results)
            }
            TokenKind::Break | TokenKind::Continue | TokenKind::Goto | TokenKind::Fallthrough => {
                self.branch()?
            }
            TokenKind::LBrace => StmtKind::Block(self.block()?),
            TokenKind::If => return self.if_stmt(),
            TokenKind::Switch => return self.switch_stmt(),
            TokenKind::Select => return self.select_stmt(),
            TokenKind::For => return self.for_stmt(),
            _ => return self.simple_stmt_only(),
        };
        Ok(self.alloc_stmt(kind, self.cursor.span_from(start)))
    }

    fn branch(&mut self) -> PResult<StmtKind> {
        let kind = match self.cursor.advance().kind {
            TokenKind::Break => BranchKind::Break,
            TokenKind::Continue => BranchKind::Continue,
            TokenKind::Goto => BranchKind::Goto,
            _ => BranchKind::Fallthrough,
        };
        let label = match self.cursor.kind() {
            TokenKind::Ident(name) if kind != BranchKind::Fallthrough => {
                self.cursor.advance();
                Some(name)
            }
            _ => None,
        };
        Ok(StmtKind::Branch { kind, label })
    }

    fn simple_stmt_only(&mut self) -> PResult<StmtId> {
        match self.simple_stmt()? {
            Simple::Stmt(id) => Ok(id),
            Simple::Range { .. } => Err(ParseError::new(
                ErrorCode::E1001,
                "`range` clause outside of a `for` statement",
                self.cursor.span(),
            )
            .with_label("unexpected `range`")),
        }
    }

    fn simple_stmt(&mut self) -> PResult<Simple> {
        let start = self.cursor.span().start;
        if self.context.has(ParseContext::RANGE_OK) && self.cursor.eat(TokenKind::Range) {
            let expr = self.expr()?;
            return Ok(Simple::Range {
                key: None,
                value: None,
                op: None,
                expr,
            });
        }

        let lhs = self.expr_list()?;
        if let Some(bin) = compound_op(self.cursor.kind()) {
            self.cursor.advance();
            let rhs = vec![self.expr()?];
            let kind = StmtKind::Assign {
                lhs,
                op: AssignOp::Compound(bin),
                rhs,
            };
            return Ok(Simple::Stmt(self.alloc_stmt(kind, self.cursor.span_from(start))));
        }
        let kind = match self.cursor.kind() {
            TokenKind::Define | TokenKind::Assign => {
                let op = if self.cursor.advance().kind == TokenKind::Define {
                    AssignOp::Define
                } else {
                    AssignOp::Assign
                };
                if self.context.has(ParseContext::RANGE_OK) && self.cursor.eat(TokenKind::Range) {
                    return self.range_clause(&lhs, op);
                }
                let rhs = self.expr_list()?;
                StmtKind::Assign { lhs, op, rhs }
            }
            TokenKind::Inc | TokenKind::Dec => {
                let inc = self.cursor.advance().kind == TokenKind::Inc;
                StmtKind::IncDec {
                    x: self.single(&lhs)?,
                    inc,
                }
            }
            TokenKind::Arrow => {
                self.cursor.advance();
                let chan = self.single(&lhs)?;
                StmtKind::Send {
                    chan,
                    value: self.expr()?,
                }
            }
            _ => StmtKind::Expr(self.single(&lhs)?),
        };
        Ok(Simple::Stmt(self.alloc_stmt(kind, self.cursor.span_from(start))))
    }

    fn range_clause(&mut self, lhs: &[ExprId], op: AssignOp) -> PResult<Simple> {
        if lhs.len() > 2 {
            return Err(ParseError::new(
                ErrorCode::E1001,
                "range clause permits at most two iteration variables",
                self.arena.expr(lhs[2]).span,
            )
            .with_label("unexpected variable"));
        }
        let expr = self.expr()?;
        Ok(Simple::Range {
            key: lhs.first().copied(),
            value: lhs.get(1).copied(),
            op: Some(op),
            expr,
        })
    }

    /// The one expression of an expression list used where a list is not
    /// allowed.
    fn single(&self, list: &[ExprId]) -> PResult<ExprId> {
        match list {
            [only] => Ok(*only),
            _ => Err(ParseError::unexpected(
                "`:=` or `=`",
                self.cursor.kind(),
                self.cursor.span(),
            )),
        }
    }

    fn expr_of(&self, stmt: StmtId) -> PResult<ExprId> {
        let stmt = self.arena.stmt(stmt);
        match stmt.kind {
            StmtKind::Expr(expr) => Ok(expr),
            _ => Err(ParseError::new(
                ErrorCode::E1002,
                "expected condition expression",
                stmt.span,
            )
            .with_label("used as value")),
        }
    }

    fn if_stmt(&mut self) -> PResult<StmtId> {
        let start = self.cursor.expect(TokenKind::If)?.start;
        let (init, cond) = self.with_context(ParseContext::NO_COMPOSITE_LIT, |p| -> PResult<_> {
            if p.cursor.eat(TokenKind::Semicolon) {
                return Ok((None, p.expr()?));
            }
            let first = p.simple_stmt_only()?;
            if p.cursor.eat(TokenKind::Semicolon) {
                Ok((Some(first), p.expr()?))
            } else {
                Ok((None, p.expr_of(first)?))
            }
        })?;
        let then = self.block()?;
        let els = if self.cursor.eat(TokenKind::Else) {
            match self.cursor.kind() {
                TokenKind::If => Some(self.if_stmt()?),
                TokenKind::LBrace => {
                    let else_start = self.cursor.span().start;
                    let block = self.block()?;
                    Some(self.alloc_stmt(StmtKind::Block(block), self.cursor.span_from(else_start)))
                }
                other => return Err(ParseError::unexpected("`if` or `{`", other, self.cursor.span())),
            }
        } else {
            None
        };
        Ok(self.alloc_stmt(StmtKind::If { init, cond, then, els }, self.cursor.span_from(start)))
    }

    fn switch_stmt(&mut self) -> PResult<StmtId> {
        let start = self.cursor.expect(TokenKind::Switch)?.start;
        let (init, tag) = self.with_context(ParseContext::NO_COMPOSITE_LIT, |p| -> PResult<_> {
            if p.cursor.check(TokenKind::LBrace) {
                return Ok((None, None));
            }
            let first = if p.cursor.check(TokenKind::Semicolon) {
                None
            } else {
                Some(p.simple_stmt_only()?)
            };
            if !p.cursor.eat(TokenKind::Semicolon) {
                return Ok((None, first));
            }
            let tag = if p.cursor.check(TokenKind::LBrace) {
                None
            } else {
                Some(p.simple_stmt_only()?)
            };
            Ok((first, tag))
        })?;
        let clauses = self.clauses(false)?;
        Ok(self.alloc_stmt(StmtKind::Switch { init, tag, clauses }, self.cursor.span_from(start)))
    }

    fn select_stmt(&mut self) -> PResult<StmtId> {
        let start = self.cursor.expect(TokenKind::Select)?.start;
        let clauses = self.clauses(true)?;
        Ok(self.alloc_stmt(StmtKind::Select { clauses }, self.cursor.span_from(start)))
    }

    /// `{ case ...: ... default: ... }` of a switch (`comm == false`) or a
    /// select.
    fn clauses(&mut self, comm: bool) -> PResult<Vec<CaseClause>> {
        let open = self.cursor.expect(TokenKind::LBrace)?;
        let mut clauses = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.is_at_end() {
            let start = self.cursor.span().start;
            let kind = match self.cursor.kind() {
                TokenKind::Case => {
                    self.cursor.advance();
                    if comm {
                        ClauseKind::Comm(self.simple_stmt_only()?)
                    } else {
                        ClauseKind::Case(self.case_list()?)
                    }
                }
                TokenKind::Default => {
                    self.cursor.advance();
                    ClauseKind::Default
                }
                other => return Err(ParseError::unexpected("`case` or `default`", other, self.cursor.span())),
            };
            let colon = self.cursor.expect(TokenKind::Colon)?;
            let stmts = self.stmt_list()?;
            let body_span = Span::new(colon.start, self.cursor.prev_end().max(colon.end));
            let body = self.arena.alloc_block(Block::new(stmts, body_span));
            clauses.push(CaseClause {
                kind,
                body,
                span: self.cursor.span_from(start),
            });
        }
        self.cursor.expect_closing(TokenKind::RBrace, open)?;
        Ok(clauses)
    }

    /// Case expressions; in a type switch these are types, which the
    /// expression grammar already accepts.
    fn case_list(&mut self) -> PResult<Vec<ExprId>> {
        self.with_context(ParseContext::NONE, |p| p.expr_list())
    }

    fn for_stmt(&mut self) -> PResult<StmtId> {
        let start = self.cursor.expect(TokenKind::For)?.start;
        let header_context = ParseContext::NO_COMPOSITE_LIT.with(ParseContext::RANGE_OK);
        let header = self.with_context(header_context, |p| p.for_header())?;
        let body = self.block()?;
        let kind = match header {
            ForHeader::Loop { init, cond, post } => StmtKind::For {
                init,
                cond,
                post,
                body,
            },
            ForHeader::Range {
                key,
                value,
                op,
                expr,
            } => StmtKind::Range {
                key,
                value,
                op,
                expr,
                body,
            },
        };
        Ok(self.alloc_stmt(kind, self.cursor.span_from(start)))
    }

    /// Everything between `for` and the body.
    fn for_header(&mut self) -> PResult<ForHeader> {
        if self.cursor.check(TokenKind::LBrace) {
            return Ok(ForHeader::Loop {
                init: None,
                cond: None,
                post: None,
            });
        }
        let init = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else {
            match self.simple_stmt()? {
                Simple::Range {
                    key,
                    value,
                    op,
                    expr,
                } => {
                    return Ok(ForHeader::Range {
                        key,
                        value,
                        op,
                        expr,
                    })
                }
                Simple::Stmt(id) => Some(id),
            }
        };
        if !self.cursor.eat(TokenKind::Semicolon) {
            let cond = init.map(|id| self.expr_of(id)).transpose()?;
            return Ok(ForHeader::Loop {
                init: None,
                cond,
                post: None,
            });
        }
        let cond = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expr()?)
        };
        self.cursor.expect(TokenKind::Semicolon)?;
        let post = if self.cursor.check(TokenKind::LBrace) {
            None
        } else {
            Some(self.with_context(ParseContext::NO_COMPOSITE_LIT, |p| p.simple_stmt_only())?)
        };
        Ok(ForHeader::Loop { init, cond, post })
    }
}
