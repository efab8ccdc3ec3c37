//! Statement checking: scopes, local declarations and definitions.

use errfix_ir::ast::{
    AssignOp, ClauseKind, DeclKeyword, ExprKind, GenDecl, Spec, StmtKind,
};
use errfix_ir::{BlockId, ExprId, Name, Span, StmtId};

use super::Checker;
use crate::data::TypeData;
use crate::scope::{ScopeId, ScopeKind, SymbolKind};
use crate::Idx;

impl Checker<'_> {
    /// Check the statements of `block` directly in `scope`.
    pub(super) fn stmt_list(&mut self, scope: ScopeId, block: BlockId) {
        let Some(stmts) = self.file().arena.try_block(block).map(|b| &b.stmts) else {
            return;
        };
        for &stmt in stmts {
            self.stmt(scope, stmt);
        }
    }

    /// Check `block` in a fresh child scope of `parent`.
    fn nested_block(&mut self, parent: ScopeId, block: BlockId) -> ScopeId {
        let span = self
            .file()
            .arena
            .try_block(block)
            .map_or(Span::DUMMY, |b| b.span);
        let scope = self.scopes.push(parent, ScopeKind::Block, span);
        self.info().block_scopes.insert(block, scope);
        self.stmt_list(scope, block);
        scope
    }

    fn stmt(&mut self, scope: ScopeId, id: StmtId) {
        errfix_stack::ensure_sufficient_stack(|| self.stmt_inner(scope, id));
    }

    fn stmt_inner(&mut self, scope: ScopeId, id: StmtId) {
        let file = self.file();
        let Some(stmt) = file.arena.try_stmt(id) else {
            return;
        };
        match &stmt.kind {
            StmtKind::Empty | StmtKind::Branch { .. } => {}
            StmtKind::Decl(gen) => self.local_decl(scope, gen),
            StmtKind::Labeled { stmt, .. } => self.stmt(scope, *stmt),
            StmtKind::Expr(x) | StmtKind::Go(x) | StmtKind::Defer(x) => {
                self.expr(scope, *x);
            }
            StmtKind::Send { chan, value } => {
                self.expr(scope, *chan);
                self.expr(scope, *value);
            }
            StmtKind::IncDec { x, .. } => {
                self.expr(scope, *x);
            }
            StmtKind::Return(results) => {
                for result in results {
                    self.expr(scope, *result);
                }
            }
            StmtKind::Assign { lhs, op, rhs } => self.assign(scope, id, lhs, *op, rhs, stmt.span),
            StmtKind::Block(block) => {
                self.nested_block(scope, *block);
            }
            StmtKind::If {
                init,
                cond,
                then,
                els,
            } => {
                let header = self.scopes.push(scope, ScopeKind::Block, stmt.span);
                if let Some(init) = init {
                    self.stmt(header, *init);
                }
                self.expr(header, *cond);
                self.nested_block(header, *then);
                if let Some(els) = els {
                    self.stmt(header, *els);
                }
            }
            StmtKind::Switch { init, tag, clauses } => {
                let header = self.scopes.push(scope, ScopeKind::Block, stmt.span);
                if let Some(init) = init {
                    self.stmt(header, *init);
                }
                let guard = tag.and_then(|tag| self.type_switch_guard(header, tag));
                if guard.is_none() {
                    if let Some(tag) = tag {
                        self.stmt(header, *tag);
                    }
                }
                for clause in clauses {
                    let body_span = file.arena.try_block(clause.body).map_or(Span::DUMMY, |b| b.span);
                    let clause_scope = self.scopes.push(header, ScopeKind::Block, body_span);
                    let mut case_types = Vec::new();
                    if let ClauseKind::Case(list) = &clause.kind {
                        for expr in list {
                            let ty = match guard {
                                Some(_) => self.expr_as_type(header, *expr),
                                None => {
                                    self.expr(header, *expr);
                                    None
                                }
                            };
                            case_types.push(ty);
                        }
                    }
                    if let Some((name, subject)) = guard {
                        // `case T:` binds the guard variable with type T.
                        let ty = match case_types.as_slice() {
                            [Some(single)] => *single,
                            _ => subject,
                        };
                        self.declare_local(clause_scope, name, SymbolKind::Var, ty, body_span.start);
                    }
                    self.info().block_scopes.insert(clause.body, clause_scope);
                    self.stmt_list(clause_scope, clause.body);
                }
            }
            StmtKind::Select { clauses } => {
                for clause in clauses {
                    let body_span = file.arena.try_block(clause.body).map_or(Span::DUMMY, |b| b.span);
                    let clause_scope = self.scopes.push(scope, ScopeKind::Block, body_span);
                    if let ClauseKind::Comm(comm) = clause.kind {
                        self.stmt(clause_scope, comm);
                    }
                    self.info().block_scopes.insert(clause.body, clause_scope);
                    self.stmt_list(clause_scope, clause.body);
                }
            }
            StmtKind::For {
                init,
                cond,
                post,
                body,
            } => {
                let header = self.scopes.push(scope, ScopeKind::Block, stmt.span);
                if let Some(init) = init {
                    self.stmt(header, *init);
                }
                if let Some(cond) = cond {
                    self.expr(header, *cond);
                }
                if let Some(post) = post {
                    self.stmt(header, *post);
                }
                self.nested_block(header, *body);
            }
            StmtKind::Range {
                key,
                value,
                op,
                expr,
                body,
            } => {
                let header = self.scopes.push(scope, ScopeKind::Block, stmt.span);
                let subject = self.expr(scope, *expr);
                let (key_ty, value_ty) = self.range_types(subject);
                let targets = [(*key, key_ty), (*value, value_ty)];
                if *op == Some(AssignOp::Define) {
                    let pos = file.arena.try_block(*body).map_or(stmt.span.end, |b| b.span.start);
                    let mut defined = Vec::new();
                    for (target, ty) in targets {
                        let Some(name) = target.and_then(|t| file.arena.ident_name(t)) else {
                            continue;
                        };
                        if self.declare_local(header, name, SymbolKind::Var, ty, pos) {
                            defined.push(name);
                        }
                    }
                    self.info().defines.insert(id, defined);
                } else {
                    for target in targets.into_iter().filter_map(|(t, _)| t) {
                        self.expr(scope, target);
                    }
                }
                self.nested_block(header, *body);
            }
        }
    }

    /// `v := x.(type)`: type `x` and return the guard variable with the
    /// subject's type. `None` when `tag` is not a binding type guard.
    fn type_switch_guard(&mut self, scope: ScopeId, tag: StmtId) -> Option<(Name, Idx)> {
        let arena = &self.file().arena;
        let StmtKind::Assign {
            lhs,
            op: AssignOp::Define,
            rhs,
        } = &arena.try_stmt(tag)?.kind
        else {
            return None;
        };
        let ([target], [guard]) = (lhs.as_slice(), rhs.as_slice()) else {
            return None;
        };
        let ExprKind::TypeAssert { x, ty: None } = arena.expr(arena.unparen(*guard)).kind else {
            return None;
        };
        let name = arena.ident_name(*target)?;
        let subject = self.expr(scope, x);
        let defined = if self.is_blank(name) { Vec::new() } else { vec![name] };
        self.info().defines.insert(tag, defined);
        Some((name, subject))
    }

    fn range_types(&self, subject: Idx) -> (Idx, Idx) {
        match self.pool.underlying_data(subject) {
            Some(TypeData::Basic(kind)) if kind.is_string() => (Idx::INT, Idx::INT32),
            Some(TypeData::Basic(kind)) if kind.is_numeric() => (subject.default_type(), Idx::INVALID),
            Some(TypeData::Slice(elem) | TypeData::Array { elem, .. }) => (Idx::INT, *elem),
            Some(TypeData::Pointer(inner)) => match self.pool.underlying_data(*inner) {
                Some(TypeData::Array { elem, .. }) => (Idx::INT, *elem),
                _ => (Idx::INVALID, Idx::INVALID),
            },
            Some(TypeData::Map { key, value }) => (*key, *value),
            Some(TypeData::Chan { elem, .. }) => (*elem, Idx::INVALID),
            _ => (Idx::INVALID, Idx::INVALID),
        }
    }

    fn assign(
        &mut self,
        scope: ScopeId,
        id: StmtId,
        lhs: &[ExprId],
        op: AssignOp,
        rhs: &[ExprId],
        span: Span,
    ) {
        let types: Vec<Idx> = if rhs.len() == 1 && lhs.len() > 1 {
            self.multi_value(scope, rhs[0], lhs.len())
        } else {
            rhs.iter().map(|r| self.expr(scope, *r).default_type()).collect()
        };

        if op != AssignOp::Define {
            for target in lhs {
                self.expr(scope, *target);
            }
            return;
        }

        let arena = &self.file().arena;
        let mut defined = Vec::new();
        for (i, target) in lhs.iter().enumerate() {
            let Some(name) = arena.ident_name(*target) else {
                continue;
            };
            let ty = types.get(i).copied().unwrap_or(Idx::INVALID).default_type();
            if self.declare_local(scope, name, SymbolKind::Var, ty, span.end) {
                defined.push(name);
            }
        }
        self.info().defines.insert(id, defined);
    }

    fn local_decl(&mut self, scope: ScopeId, gen: &GenDecl) {
        match gen.keyword {
            DeclKeyword::Type => {
                for spec in &gen.specs {
                    let Spec::Type(ts) = spec else { continue };
                    let ty = if ts.alias {
                        Idx::INVALID
                    } else {
                        self.pool.new_named(self.pkg_path, ts.name.name)
                    };
                    self.declare_local(scope, ts.name.name, SymbolKind::Type, ty, ts.name.span.start);
                    self.define_type(scope, scope, ts);
                }
            }
            DeclKeyword::Var | DeclKeyword::Const => self.value_specs(scope, scope, gen, true),
        }
    }

    /// `var`/`const` specs. Package-level names are already declared and
    /// only get their types; local names are declared here, visible after
    /// their spec. A constant spec without values repeats the previous
    /// spec's type (`iota` groups).
    pub(super) fn value_specs(&mut self, scope: ScopeId, decl_scope: ScopeId, gen: &GenDecl, local: bool) {
        let kind = if gen.keyword == DeclKeyword::Const {
            SymbolKind::Const
        } else {
            SymbolKind::Var
        };
        let mut carried = Idx::INVALID;
        for spec in &gen.specs {
            let Spec::Value(vs) = spec else { continue };
            let declared = vs.ty.map(|ty| self.resolve_type(scope, ty));
            let values: Vec<Idx> = if vs.values.len() == 1 && vs.names.len() > 1 {
                self.multi_value(scope, vs.values[0], vs.names.len())
            } else {
                vs.values.iter().map(|v| self.expr(scope, *v)).collect()
            };
            if !vs.values.is_empty() || declared.is_some() {
                carried = declared.unwrap_or_else(|| values.first().copied().unwrap_or(Idx::INVALID));
            }
            for (i, name) in vs.names.iter().enumerate() {
                let ty = declared
                    .or_else(|| values.get(i).copied())
                    .unwrap_or(carried)
                    .default_type();
                if local {
                    self.declare_local(decl_scope, name.name, kind, ty, vs.span.end);
                } else {
                    self.scopes.set_type(decl_scope, name.name, ty);
                }
            }
        }
    }
}
