//! Applying candidates.
//!
//! Candidates arrive in source order and are located through their block
//! and statement ids, so earlier insertions never invalidate later ones.
//! The ledger carries every `err` this pass introduced forward to the
//! candidates after it.

use errfix_diagnostic::{Diagnostic, ErrorCode};
use errfix_ir::ast::{AssignOp, Decl, ExprKind, StmtKind, TypeExprKind};
use errfix_ir::{BlockId, ExprId, Name, SourceFile, Span, StmtId, TypeExprId};
use errfix_types::{FileInfo, Idx, RoutineId, ScopeId, SymbolKind};
use tracing::{debug, trace};

use crate::imports::ensure_import;
use crate::ledger::ScopeLedger;
use crate::scan::{Candidate, CandidateKind};
use crate::synth::Synth;
use crate::zero::ZeroValues;
use crate::{RewriteEvent, RewriteOutcome, Rewriter};

/// What the check after a rewritten statement needs from its function.
struct Routine {
    scope: ScopeId,
    /// How notes refer to the function.
    name: String,
    is_entry: bool,
    /// Declared result types with their resolved types.
    results: Vec<(TypeExprId, Idx)>,
}

pub(crate) struct Applier<'r, 'f> {
    rw: &'r Rewriter<'r>,
    file: &'f mut SourceFile,
    info: &'f FileInfo,
    ledger: ScopeLedger,
    /// Local name of the logging package once imported.
    log: Option<Name>,
    outcome: RewriteOutcome,
}

impl<'r, 'f> Applier<'r, 'f> {
    pub(crate) fn new(rw: &'r Rewriter<'r>, file: &'f mut SourceFile, info: &'f FileInfo) -> Self {
        Applier {
            rw,
            file,
            info,
            ledger: ScopeLedger::new(),
            log: None,
            outcome: RewriteOutcome::default(),
        }
    }

    pub(crate) fn finish(self) -> RewriteOutcome {
        self.outcome
    }

    pub(crate) fn apply(&mut self, candidate: &Candidate) {
        match candidate.kind {
            CandidateKind::Discard { index } => self.discard(candidate, index),
            CandidateKind::Demotion => self.demotion(candidate),
        }
    }

    fn demotion(&mut self, c: &Candidate) {
        let Some(routine) = self.info.routine(c.routine) else {
            return;
        };
        let err = self.rw.names.err;
        if self
            .ledger
            .is_bound(self.rw.scopes, routine.scope, c.scope, err, c.pos)
        {
            debug!(pos = c.pos, "demoting `:=` to `=`");
            self.set_op(c.assign, AssignOp::Assign);
            self.outcome
                .events
                .push(RewriteEvent::Demoted(self.stmt_span(c.stmt)));
            self.outcome.modified = true;
        } else {
            self.ledger.mark_introduced(c.scope, err);
        }
    }

    fn discard(&mut self, c: &Candidate, index: usize) {
        let span = self.stmt_span(c.stmt);
        let Some((lhs, op)) = self.assignment(c.assign) else {
            return;
        };
        let target_span = lhs
            .get(index)
            .and_then(|t| self.file.arena.try_expr(*t))
            .map_or(span, |t| t.span);

        let Some(routine) = self.routine(c.routine) else {
            self.warn(target_span, "the enclosing function could not be resolved".to_string());
            return;
        };
        if !routine.is_entry && !self.returns_error(&routine) {
            self.warn(
                target_span,
                format!("{} does not return an `error`", routine.name),
            );
            return;
        }

        let err = self.rw.names.err;
        let arena = &self.file.arena;
        if lhs
            .iter()
            .enumerate()
            .any(|(i, t)| i != index && arena.ident_name(*t) == Some(err))
        {
            debug!(pos = c.pos, "`err` is already a target");
            return;
        }
        self.outcome.events.push(RewriteEvent::DiscardedError(span));

        let bound = self
            .ledger
            .is_bound(self.rw.scopes, routine.scope, c.scope, err, c.pos);
        let new_op = match op {
            AssignOp::Assign if !bound => {
                self.ledger.mark_introduced(c.scope, err);
                if self.can_redeclare(&lhs, index, c) {
                    trace!(pos = c.pos, "promoting `=` to `:=`");
                    AssignOp::Define
                } else {
                    trace!(pos = c.pos, "declaring `err` before the statement");
                    let decl = Synth::new(&mut self.file.arena, &self.rw.names).declare_err();
                    self.insert(c.block, c.stmt, decl, 0);
                    AssignOp::Assign
                }
            }
            AssignOp::Define if bound => {
                if self.defines_other(c.assign) {
                    AssignOp::Define
                } else {
                    AssignOp::Assign
                }
            }
            AssignOp::Define => {
                self.ledger.mark_introduced(c.scope, err);
                AssignOp::Define
            }
            op => op,
        };

        if let Some(target) = self.file.arena.expr_mut(lhs[index]) {
            target.kind = ExprKind::Ident(err);
        }
        self.set_op(c.assign, new_op);

        let check = if routine.is_entry {
            let log = self.log_name(c);
            Synth::new(&mut self.file.arena, &self.rw.names).fatal_check(log)
        } else {
            let zeros = self.zero_values(&routine);
            Synth::new(&mut self.file.arena, &self.rw.names).return_check(zeros)
        };
        self.insert(c.block, c.stmt, check, 1);
        self.outcome.modified = true;
    }

    fn assignment(&self, stmt: StmtId) -> Option<(Vec<ExprId>, AssignOp)> {
        match &self.file.arena.try_stmt(stmt)?.kind {
            StmtKind::Assign { lhs, op, .. } => Some((lhs.clone(), *op)),
            _ => None,
        }
    }

    fn set_op(&mut self, stmt: StmtId, new_op: AssignOp) {
        if let Some(StmtKind::Assign { op, .. }) =
            self.file.arena.stmt_mut(stmt).map(|s| &mut s.kind)
        {
            *op = new_op;
        }
    }

    fn stmt_span(&self, stmt: StmtId) -> Span {
        self.file
            .arena
            .try_stmt(stmt)
            .map_or(Span::DUMMY, |s| s.span)
    }

    /// Insert `new` next to `anchor` in `block`: before it at offset 0,
    /// after it at offset 1.
    fn insert(&mut self, block: BlockId, anchor: StmtId, new: StmtId, offset: usize) {
        let Some(block) = self.file.arena.block_mut(block) else {
            return;
        };
        if let Some(at) = block.stmts.iter().position(|s| *s == anchor) {
            block.stmts.insert(at + offset, new);
        }
    }

    fn warn(&mut self, span: Span, note: String) {
        self.outcome.diagnostics.push(
            Diagnostic::new(ErrorCode::W3001)
                .with_message("discarded error cannot be returned")
                .with_label(span, "error discarded here")
                .with_note(note),
        );
    }

    fn routine(&self, id: RoutineId) -> Option<Routine> {
        let names = &self.rw.names;
        let arena = &self.file.arena;
        let (sig, name, is_entry) = match id {
            RoutineId::Decl(index) => match self.file.decls.get(index)? {
                Decl::Func(func) => (
                    &func.sig,
                    format!("`{}`", self.rw.interner.lookup(func.name.name)),
                    func.recv.is_none()
                        && func.name.name == names.entry
                        && self.file.package.name == names.main_pkg,
                ),
                Decl::Gen(_) => return None,
            },
            RoutineId::Lit(expr) => match &arena.try_expr(expr)?.kind {
                ExprKind::FuncLit { sig, .. } => (sig, "the function literal".to_string(), false),
                _ => return None,
            },
        };
        let info = self.info.routine(id)?;
        let syntax = sig.result_types();
        let mut resolved = self
            .rw
            .pool
            .signature(info.sig)
            .map(|s| s.results.to_vec())
            .unwrap_or_default();
        if resolved.len() != syntax.len() {
            resolved = vec![Idx::INVALID; syntax.len()];
        }
        Some(Routine {
            scope: info.scope,
            name,
            is_entry,
            results: syntax.into_iter().zip(resolved).collect(),
        })
    }

    /// The last declared result is an error.
    fn returns_error(&self, routine: &Routine) -> bool {
        let Some(&(syntax, resolved)) = routine.results.last() else {
            return false;
        };
        if !resolved.is_invalid() {
            return self.rw.contract.is_error_like(self.rw.pool, resolved);
        }
        matches!(
            self.file.arena.try_type(syntax).map(|t| &t.kind),
            Some(TypeExprKind::Name(name)) if *name == self.rw.names.error
        )
    }

    /// `:=` would only redeclare the other targets: each is `_` or a name
    /// already declared in the statement's own scope.
    fn can_redeclare(&self, lhs: &[ExprId], index: usize, c: &Candidate) -> bool {
        let arena = &self.file.arena;
        lhs.iter().enumerate().all(|(i, target)| {
            if i == index {
                return true;
            }
            let Some(name) = arena.ident_name(*target) else {
                return false;
            };
            name == self.rw.names.blank
                || self.ledger.introduced_in(c.scope, name)
                || self
                    .rw
                    .scopes
                    .lookup_parent(c.scope, name, c.pos)
                    .is_some_and(|(scope, _)| scope == c.scope)
        })
    }

    /// The original `:=` declared a name other than `err`.
    fn defines_other(&self, stmt: StmtId) -> bool {
        let names = &self.rw.names;
        self.info.defines.get(&stmt).map_or(true, |defined| {
            defined.iter().any(|n| *n != names.err && *n != names.blank)
        })
    }

    /// Local name of the logging package, usable at `c`.
    fn log_name(&mut self, c: &Candidate) -> Name {
        let scopes = self.rw.scopes;
        let err = self.rw.names.err;
        // a local or package-level variable hides the import at `c`
        let hidden = |name: Name| {
            name == err
                || scopes
                    .lookup_parent(c.scope, name, c.pos)
                    .is_some_and(|(_, sym)| !matches!(sym.kind, SymbolKind::Package(_)))
        };
        if let Some(log) = self.log.filter(|log| !hidden(*log)) {
            return log;
        }
        let config = &self.rw.config;
        let log = ensure_import(
            self.file,
            self.rw.interner,
            &config.log_path,
            &config.log_alias,
            hidden,
        );
        self.log = Some(log);
        log
    }

    fn zero_values(&mut self, routine: &Routine) -> Vec<ExprId> {
        let zeros = ZeroValues::new(self.rw.pool, self.rw.interner);
        let count = routine.results.len().saturating_sub(1);
        routine.results[..count]
            .iter()
            .map(|&(ty, resolved)| zeros.zero_value(&mut self.file.arena, ty, resolved))
            .collect()
    }
}
