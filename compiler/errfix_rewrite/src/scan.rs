//! Candidate scanning.
//!
//! Walks every statement list of a file, function literal bodies included,
//! and records two kinds of statements:
//!
//! - an assignment of a single call whose lowest error-typed result is
//!   discarded with `_`
//! - a single-target `err := ...` that may need to become `err = ...`
//!
//! Only statements that sit directly in a statement list qualify, labels
//! looked through; nothing can be inserted after an `if` or `for` header.

use errfix_ir::ast::{AssignOp, ClauseKind, Decl, ExprKind, GenDecl, Spec, StmtKind};
use errfix_ir::{BlockId, ExprId, SourceFile, StmtId};
use errfix_types::{ErrorContract, FileInfo, Pool, RoutineId, ScopeId};

use crate::config::Names;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CandidateKind {
    /// Target `index` is `_` and receives an error.
    Discard { index: usize },
    /// `err := ...` with a single target.
    Demotion,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Candidate {
    /// Start of the statement.
    pub pos: u32,
    /// Entry of the statement list; checks are inserted next to it.
    pub stmt: StmtId,
    /// The assignment itself: `stmt`, or the statement under its labels.
    pub assign: StmtId,
    /// Statement list holding `stmt`.
    pub block: BlockId,
    /// Innermost function declaration or literal.
    pub routine: RoutineId,
    /// Scope of `block`.
    pub scope: ScopeId,
    pub kind: CandidateKind,
}

/// Candidates of `file`, ordered by position.
pub(crate) fn scan(
    file: &SourceFile,
    info: &FileInfo,
    pool: &Pool,
    contract: &ErrorContract,
    names: &Names,
) -> Vec<Candidate> {
    let mut scanner = Scanner {
        file,
        info,
        pool,
        contract,
        names,
        out: Vec::new(),
    };
    for (index, decl) in file.decls.iter().enumerate() {
        match decl {
            Decl::Func(func) => {
                if let Some(body) = func.body {
                    scanner.block(RoutineId::Decl(index), body);
                }
            }
            Decl::Gen(gen) => scanner.gen_decl(gen),
        }
    }
    let mut candidates = scanner.out;
    candidates.sort_by_key(|c| c.pos);
    candidates
}

struct Scanner<'a> {
    file: &'a SourceFile,
    info: &'a FileInfo,
    pool: &'a Pool,
    contract: &'a ErrorContract,
    names: &'a Names,
    out: Vec<Candidate>,
}

impl Scanner<'_> {
    fn block(&mut self, routine: RoutineId, block: BlockId) {
        let Some(stmts) = self.file.arena.try_block(block).map(|b| &b.stmts) else {
            return;
        };
        let scope = self.info.block_scope(block).unwrap_or(ScopeId::INVALID);
        for &stmt in stmts {
            self.candidate(routine, block, scope, stmt);
            self.stmt(routine, stmt);
        }
    }

    fn candidate(&mut self, routine: RoutineId, block: BlockId, scope: ScopeId, id: StmtId) {
        let arena = &self.file.arena;
        let Some(pos) = arena.try_stmt(id).map(|s| s.span.start) else {
            return;
        };
        let mut assign = id;
        let (lhs, op, rhs) = loop {
            match arena.try_stmt(assign).map(|s| &s.kind) {
                Some(StmtKind::Labeled { stmt, .. }) => assign = *stmt,
                Some(StmtKind::Assign { lhs, op, rhs }) => break (lhs, op, rhs),
                _ => return,
            }
        };
        let kind = match op {
            AssignOp::Define | AssignOp::Assign => match self.discarded_error(lhs, rhs) {
                Some(index) => CandidateKind::Discard { index },
                None if *op == AssignOp::Define
                    && lhs.len() == 1
                    && arena.ident_name(lhs[0]) == Some(self.names.err) =>
                {
                    CandidateKind::Demotion
                }
                None => return,
            },
            AssignOp::Compound(_) => return,
        };
        self.out.push(Candidate {
            pos,
            stmt: id,
            assign,
            block,
            routine,
            scope,
            kind,
        });
    }

    /// Lowest index whose target is `_` and whose call result is an error.
    fn discarded_error(&self, lhs: &[ExprId], rhs: &[ExprId]) -> Option<usize> {
        let [value] = rhs else {
            return None;
        };
        let arena = &self.file.arena;
        let call = arena.unparen(*value);
        if !matches!(arena.try_expr(call)?.kind, ExprKind::Call { .. }) {
            return None;
        }
        let results = self.pool.values(self.info.call_type(call));
        if results.len() != lhs.len() {
            return None;
        }
        lhs.iter().zip(results).position(|(target, ty)| {
            arena.ident_name(*target) == Some(self.names.blank)
                && self.contract.is_error_like(self.pool, ty)
        })
    }

    /// Nested statement lists and function literals of `id`.
    fn stmt(&mut self, routine: RoutineId, id: StmtId) {
        errfix_stack::ensure_sufficient_stack(|| self.stmt_inner(routine, id));
    }

    fn stmt_inner(&mut self, routine: RoutineId, id: StmtId) {
        let Some(stmt) = self.file.arena.try_stmt(id) else {
            return;
        };
        match &stmt.kind {
            StmtKind::Empty | StmtKind::Branch { .. } => {}
            StmtKind::Decl(gen) => self.gen_decl(gen),
            StmtKind::Labeled { stmt, .. } => self.stmt(routine, *stmt),
            StmtKind::Expr(x) | StmtKind::Go(x) | StmtKind::Defer(x) => self.expr(*x),
            StmtKind::Send { chan, value } => {
                self.expr(*chan);
                self.expr(*value);
            }
            StmtKind::IncDec { x, .. } => self.expr(*x),
            StmtKind::Assign { lhs, rhs, .. } => {
                for &x in lhs.iter().chain(rhs) {
                    self.expr(x);
                }
            }
            StmtKind::Return(results) => {
                for &x in results {
                    self.expr(x);
                }
            }
            StmtKind::Block(block) => self.block(routine, *block),
            StmtKind::If {
                init,
                cond,
                then,
                els,
            } => {
                if let Some(init) = init {
                    self.stmt(routine, *init);
                }
                self.expr(*cond);
                self.block(routine, *then);
                if let Some(els) = els {
                    self.stmt(routine, *els);
                }
            }
            StmtKind::Switch { init, tag, clauses } => {
                for header in [init, tag].into_iter().flatten() {
                    self.stmt(routine, *header);
                }
                for clause in clauses {
                    match &clause.kind {
                        ClauseKind::Case(list) => {
                            for &x in list {
                                self.expr(x);
                            }
                        }
                        ClauseKind::Comm(stmt) => self.stmt(routine, *stmt),
                        ClauseKind::Default => {}
                    }
                    self.block(routine, clause.body);
                }
            }
            StmtKind::Select { clauses } => {
                for clause in clauses {
                    if let ClauseKind::Comm(stmt) = &clause.kind {
                        self.stmt(routine, *stmt);
                    }
                    self.block(routine, clause.body);
                }
            }
            StmtKind::For {
                init,
                cond,
                post,
                body,
            } => {
                for header in [init, post].into_iter().flatten() {
                    self.stmt(routine, *header);
                }
                if let Some(cond) = cond {
                    self.expr(*cond);
                }
                self.block(routine, *body);
            }
            StmtKind::Range {
                key,
                value,
                expr,
                body,
                ..
            } => {
                for x in [key, value].into_iter().flatten() {
                    self.expr(*x);
                }
                self.expr(*expr);
                self.block(routine, *body);
            }
        }
    }

    fn gen_decl(&mut self, gen: &GenDecl) {
        for spec in &gen.specs {
            if let Spec::Value(spec) = spec {
                for &value in &spec.values {
                    self.expr(value);
                }
            }
        }
    }

    /// Find function literals inside an expression.
    fn expr(&mut self, id: ExprId) {
        errfix_stack::ensure_sufficient_stack(|| self.expr_inner(id));
    }

    fn expr_inner(&mut self, id: ExprId) {
        let Some(expr) = self.file.arena.try_expr(id) else {
            return;
        };
        match &expr.kind {
            ExprKind::Ident(_) | ExprKind::Lit { .. } | ExprKind::Type(_) => {}
            ExprKind::FuncLit { body, .. } => self.block(RoutineId::Lit(id), *body),
            ExprKind::Composite { ty, elts, .. } => {
                for &x in ty.iter().chain(elts) {
                    self.expr(x);
                }
            }
            ExprKind::KeyValue { key, value } => {
                self.expr(*key);
                self.expr(*value);
            }
            ExprKind::Paren(x)
            | ExprKind::Selector { x, .. }
            | ExprKind::TypeAssert { x, .. }
            | ExprKind::Star(x)
            | ExprKind::Unary { x, .. } => self.expr(*x),
            ExprKind::Index { x, indices } => {
                self.expr(*x);
                for &index in indices {
                    self.expr(index);
                }
            }
            ExprKind::Slice { x, lo, hi, max } => {
                self.expr(*x);
                for index in [lo, hi, max].into_iter().flatten() {
                    self.expr(*index);
                }
            }
            ExprKind::Call { func, args, .. } => {
                self.expr(*func);
                for &arg in args {
                    self.expr(arg);
                }
            }
            ExprKind::Binary { left, right, .. } => {
                self.expr(*left);
                self.expr(*right);
            }
        }
    }
}

#[cfg(test)]
mod tests;
