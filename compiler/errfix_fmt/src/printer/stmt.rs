//! Statements and blocks.

use errfix_ir::ast::{AssignOp, CaseClause, ClauseKind, StmtKind};
use errfix_ir::{BlockId, ExprId, Span, StmtId};

use super::{FmtResult, Printer};

impl Printer<'_> {
    pub(super) fn is_empty_stmt(&self, id: StmtId) -> FmtResult<bool> {
        Ok(matches!(self.stmt_node(id)?.kind, StmtKind::Empty))
    }

    /// `{ ... }` with one statement per line. Braces always go on separate
    /// lines, even for an empty block.
    pub(super) fn block(&mut self, id: BlockId) -> FmtResult {
        let block = self.block_node(id)?;
        let real = !block.span.is_dummy();
        self.open_delim("{", real.then(|| block.span.start + 1));
        self.ctx.indent();
        self.stmt_list(&block.stmts)?;
        self.close_delim("}", real.then(|| block.span.end - 1));
        Ok(())
    }

    pub(super) fn stmt_list(&mut self, stmts: &[StmtId]) -> FmtResult {
        for &id in stmts {
            let stmt = self.stmt_node(id)?;
            if matches!(stmt.kind, StmtKind::Empty) {
                continue;
            }
            self.break_before(stmt.span, 1);
            if stmt.span.is_dummy() {
                // generated code may reuse source types; keep the cursor
                let last_pos = self.last_pos;
                self.stmt(id)?;
                self.last_pos = last_pos;
                continue;
            }
            self.stmt(id)?;
            self.end_item(stmt.span);
        }
        Ok(())
    }

    pub(super) fn stmt(&mut self, id: StmtId) -> FmtResult {
        errfix_stack::ensure_sufficient_stack(|| self.stmt_inner(id))
    }

    fn stmt_inner(&mut self, id: StmtId) -> FmtResult {
        let stmt = self.stmt_node(id)?;
        match &stmt.kind {
            StmtKind::Empty => {}
            StmtKind::Decl(decl) => self.gen_decl(decl)?,
            StmtKind::Labeled { label, stmt: inner } => {
                // labels sit one level left of the statements
                self.ctx.dedent();
                self.write_name(*label);
                self.ctx.write(":");
                self.ctx.indent();
                if !self.is_empty_stmt(*inner)? {
                    let inner_span = self.stmt_node(*inner)?.span;
                    if !stmt.span.is_dummy() {
                        self.last_pos = Some(stmt.span.start);
                    }
                    self.break_before(inner_span, 1);
                    self.stmt(*inner)?;
                }
            }
            StmtKind::Expr(x) => self.expr0(*x, 1)?,
            StmtKind::Send { chan, value } => {
                self.expr0(*chan, 1)?;
                self.ctx.write(" <- ");
                self.expr0(*value, 1)?;
            }
            StmtKind::IncDec { x, inc } => {
                self.expr0(*x, 2)?;
                self.ctx.write(if *inc { "++" } else { "--" });
            }
            StmtKind::Assign { lhs, op, rhs } => self.assign(lhs, *op, rhs)?,
            StmtKind::Go(call) => {
                self.ctx.write("go ");
                self.expr(*call)?;
            }
            StmtKind::Defer(call) => {
                self.ctx.write("defer ");
                self.expr(*call)?;
            }
            StmtKind::Return(results) => {
                self.ctx.write("return");
                if !results.is_empty() {
                    self.ctx.space();
                    self.inline_list(results, 1)?;
                }
            }
            StmtKind::Branch { kind, label } => {
                self.ctx.write(kind.as_str());
                if let Some(label) = label {
                    self.ctx.space();
                    self.write_name(*label);
                }
            }
            StmtKind::Block(block) => self.block(*block)?,
            StmtKind::If {
                init,
                cond,
                then,
                els,
            } => {
                self.ctx.write("if");
                self.control_clause(*init, |p| p.expr(*cond).map(|()| true), None)?;
                self.block(*then)?;
                if let Some(els) = els {
                    self.ctx.write(" else ");
                    self.stmt(*els)?;
                }
            }
            StmtKind::Switch { init, tag, clauses } => {
                self.ctx.write("switch");
                match tag {
                    Some(tag) => self.control_clause(*init, |p| p.simple_stmt(*tag), None)?,
                    None => self.control_clause(*init, |_| Ok(false), None)?,
                }
                self.clauses(clauses, stmt.span)?;
            }
            StmtKind::Select { clauses } => {
                self.ctx.write("select ");
                self.clauses(clauses, stmt.span)?;
            }
            StmtKind::For {
                init,
                cond,
                post,
                body,
            } => {
                self.ctx.write("for");
                let post = Some(*post);
                match cond {
                    Some(cond) => {
                        self.control_clause(*init, |p| p.expr(*cond).map(|()| true), post)?;
                    }
                    None => self.control_clause(*init, |_| Ok(false), post)?,
                }
                self.block(*body)?;
            }
            StmtKind::Range {
                key,
                value,
                op,
                expr,
                body,
            } => {
                self.ctx.write("for ");
                if let Some(key) = key {
                    self.expr(*key)?;
                    if let Some(value) = value {
                        self.ctx.write(", ");
                        self.expr(*value)?;
                    }
                    self.ctx.space();
                    self.ctx.write(op.map_or(":=", AssignOp::as_str));
                    self.ctx.space();
                }
                self.ctx.write("range ");
                self.expr(*expr)?;
                self.ctx.space();
                self.block(*body)?;
            }
        }
        Ok(())
    }

    /// Statement in a header position; returns whether it printed anything.
    fn simple_stmt(&mut self, id: StmtId) -> FmtResult<bool> {
        if self.is_empty_stmt(id)? {
            return Ok(false);
        }
        self.stmt(id)?;
        Ok(true)
    }

    fn assign(&mut self, lhs: &[ExprId], op: AssignOp, rhs: &[ExprId]) -> FmtResult {
        let depth = if lhs.len() > 1 && rhs.len() > 1 { 2 } else { 1 };
        self.inline_list(lhs, depth)?;
        self.ctx.space();
        self.ctx.write(op.as_str());
        self.ctx.space();
        self.inline_list(rhs, depth)
    }

    /// Header of `if`, `switch` and `for`, through the blank before `{`.
    /// `post` is `Some` only for `for` statements, whose three-clause form
    /// prints both semicolons.
    fn control_clause(
        &mut self,
        init: Option<StmtId>,
        middle: impl FnOnce(&mut Self) -> FmtResult<bool>,
        post: Option<Option<StmtId>>,
    ) -> FmtResult {
        self.ctx.space();
        let post_stmt = post.flatten();
        let mut needs_blank;
        if init.is_none() && post_stmt.is_none() {
            needs_blank = middle(self)?;
        } else {
            if let Some(init) = init {
                self.simple_stmt(init)?;
            }
            self.ctx.write("; ");
            needs_blank = middle(self)?;
            if post.is_some() {
                self.ctx.write(";");
                needs_blank = false;
                match post_stmt {
                    Some(stmt) => {
                        self.ctx.space();
                        needs_blank = self.simple_stmt(stmt)?;
                    }
                    None => self.ctx.space(),
                }
            }
        }
        if needs_blank {
            self.ctx.space();
        }
        Ok(())
    }

    /// `{ case ...: ... }` of a switch or select statement ending at
    /// `span.end`.
    fn clauses(&mut self, clauses: &[CaseClause], span: Span) -> FmtResult {
        let real = !span.is_dummy();
        self.open_delim("{", real.then_some(span.start));
        for clause in clauses {
            self.break_before(clause.span, 1);
            self.case_clause(clause)?;
        }
        self.ctx.indent();
        self.close_delim("}", real.then(|| span.end - 1));
        Ok(())
    }

    fn case_clause(&mut self, clause: &CaseClause) -> FmtResult {
        match &clause.kind {
            ClauseKind::Case(list) => {
                self.ctx.write("case ");
                self.inline_list(list, 1)?;
            }
            ClauseKind::Comm(stmt) => {
                self.ctx.write("case ");
                self.stmt(*stmt)?;
            }
            ClauseKind::Default => self.ctx.write("default"),
        }
        self.ctx.write(":");
        let body = self.block_node(clause.body)?;
        if !body.span.is_dummy() {
            self.last_pos = Some(body.span.start + 1);
            self.trailing_comments();
        }
        self.ctx.indent();
        self.stmt_list(&body.stmts)?;
        self.ctx.dedent();
        Ok(())
    }
}
