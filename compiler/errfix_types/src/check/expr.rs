//! Expression typing.

use errfix_ir::ast::{BinaryOp, ExprKind, LitKind, UnaryOp};
use errfix_ir::{ExprId, Name};

use super::Checker;
use crate::data::{BasicKind, TypeData};
use crate::info::{RoutineId, RoutineInfo};
use crate::scope::{Builtin, ScopeId, ScopeKind, SymbolKind};
use crate::Idx;

impl Checker<'_> {
    /// Type of an expression; calls inside it are recorded.
    pub(super) fn expr(&mut self, scope: ScopeId, id: ExprId) -> Idx {
        errfix_stack::ensure_sufficient_stack(|| self.expr_inner(scope, id))
    }

    fn expr_inner(&mut self, scope: ScopeId, id: ExprId) -> Idx {
        let file = self.file();
        let Some(expr) = file.arena.try_expr(id) else {
            return Idx::INVALID;
        };
        let pos = expr.span.start;
        match &expr.kind {
            ExprKind::Ident(name) => self.ident(scope, *name, pos),
            ExprKind::Lit { kind, .. } => match kind {
                LitKind::Int => Idx::UNTYPED_INT,
                LitKind::Float => Idx::UNTYPED_FLOAT,
                LitKind::Imag => Idx::UNTYPED_IMAG,
                LitKind::Char => Idx::UNTYPED_RUNE,
                LitKind::String => Idx::UNTYPED_STRING,
            },
            ExprKind::Composite { ty, elts, .. } => {
                let lit_ty = match ty {
                    Some(ty) => self.expr_as_type(scope, *ty).unwrap_or(Idx::INVALID),
                    None => Idx::INVALID,
                };
                for elt in elts {
                    self.element(scope, *elt);
                }
                lit_ty
            }
            ExprKind::KeyValue { value, .. } => self.expr(scope, *value),
            ExprKind::FuncLit { sig, body } => {
                let resolved = self.resolve_signature(scope, sig);
                let ty = self.pool.func(resolved);
                let func_scope = self.scopes.push(scope, ScopeKind::Func, expr.span);
                self.declare_fields(func_scope, &sig.params);
                if let Some(results) = &sig.results {
                    self.declare_fields(func_scope, results);
                }
                self.info().routines.insert(
                    RoutineId::Lit(id),
                    RoutineInfo {
                        scope: func_scope,
                        sig: ty,
                    },
                );
                self.info().block_scopes.insert(*body, func_scope);
                self.stmt_list(func_scope, *body);
                ty
            }
            ExprKind::Paren(inner) => self.expr(scope, *inner),
            ExprKind::Selector { x, sel } => self.selector(scope, *x, sel.name),
            ExprKind::Index { x, indices } => {
                let base = self.expr(scope, *x);
                for index in indices {
                    self.expr(scope, *index);
                }
                self.index_result(base)
            }
            ExprKind::Slice { x, lo, hi, max } => {
                let base = self.expr(scope, *x);
                for part in [lo, hi, max].into_iter().flatten() {
                    self.expr(scope, *part);
                }
                match self.pool.underlying_data(base) {
                    Some(TypeData::Basic(kind)) if kind.is_string() => Idx::STRING,
                    Some(TypeData::Array { elem, .. }) => {
                        let elem = *elem;
                        self.pool.slice(elem)
                    }
                    Some(TypeData::Pointer(inner)) => match self.pool.underlying_data(*inner) {
                        Some(TypeData::Array { elem, .. }) => {
                            let elem = *elem;
                            self.pool.slice(elem)
                        }
                        _ => Idx::INVALID,
                    },
                    _ => base,
                }
            }
            ExprKind::TypeAssert { x, ty } => {
                let base = self.expr(scope, *x);
                match ty {
                    Some(ty) => self.resolve_type(scope, *ty),
                    None => base,
                }
            }
            ExprKind::Call { func, args, .. } => {
                let result = self.call(scope, *func, args);
                self.info().call_types.insert(id, result);
                result
            }
            ExprKind::Star(x) => {
                if let Some(ty) = self.expr_as_type(scope, *x) {
                    return self.pool.pointer(ty);
                }
                let base = self.expr(scope, *x);
                match self.pool.underlying_data(base) {
                    Some(TypeData::Pointer(elem)) => *elem,
                    _ => Idx::INVALID,
                }
            }
            ExprKind::Unary { op, x } => {
                let operand = self.expr(scope, *x);
                match op {
                    UnaryOp::Addr => {
                        let operand = operand.default_type();
                        self.pool.pointer(operand)
                    }
                    UnaryOp::Recv => match self.pool.underlying_data(operand) {
                        Some(TypeData::Chan { elem, .. }) => *elem,
                        _ => Idx::INVALID,
                    },
                    UnaryOp::Not => {
                        if operand.is_untyped() {
                            Idx::UNTYPED_BOOL
                        } else {
                            operand
                        }
                    }
                    UnaryOp::Pos | UnaryOp::Neg | UnaryOp::BitNot => operand,
                }
            }
            ExprKind::Binary { op, left, right } => {
                let l = self.expr(scope, *left);
                let r = self.expr(scope, *right);
                if op.is_comparison() {
                    Idx::UNTYPED_BOOL
                } else if matches!(op, BinaryOp::Shl | BinaryOp::Shr) {
                    l
                } else if l.is_untyped() && !r.is_invalid() {
                    r
                } else {
                    l
                }
            }
            ExprKind::Type(ty) => self.resolve_type(scope, *ty),
        }
    }

    fn element(&mut self, scope: ScopeId, id: ExprId) {
        let Some(expr) = self.file().arena.try_expr(id) else {
            return;
        };
        match &expr.kind {
            // Keys may be struct field names, which are not in scope.
            ExprKind::KeyValue { key, value } => {
                if !matches!(self.file().arena.expr(*key).kind, ExprKind::Ident(_)) {
                    self.expr(scope, *key);
                }
                self.expr(scope, *value);
            }
            _ => {
                self.expr(scope, id);
            }
        }
    }

    fn ident(&self, scope: ScopeId, name: Name, pos: u32) -> Idx {
        match self.scopes.lookup_parent(scope, name, pos) {
            Some((_, sym)) => match sym.kind {
                SymbolKind::Var | SymbolKind::Const | SymbolKind::Func | SymbolKind::Type => sym.ty,
                SymbolKind::Nil => Idx::UNTYPED_NIL,
                SymbolKind::Package(_) | SymbolKind::Builtin(_) => Idx::INVALID,
            },
            None => Idx::INVALID,
        }
    }

    fn selector(&mut self, scope: ScopeId, x: ExprId, sel: Name) -> Idx {
        if let Some(pkg) = self.file().arena.ident_name(x) {
            let pos = self.file().arena.expr(x).span.start;
            if let Some((_, sym)) = self.scopes.lookup_parent(scope, pkg, pos) {
                if let SymbolKind::Package(_) = sym.kind {
                    return self
                        .package_member(scope, pkg, sel)
                        .map_or(Idx::INVALID, |(_, ty)| ty);
                }
            }
        }
        let base = self.expr(scope, x);
        self.pool
            .lookup_member(base, sel)
            .map_or(Idx::INVALID, crate::Member::ty)
    }

    fn index_result(&self, base: Idx) -> Idx {
        match self.pool.underlying_data(base) {
            Some(TypeData::Basic(kind)) if kind.is_string() => Idx::UINT8,
            Some(TypeData::Slice(elem) | TypeData::Array { elem, .. }) => *elem,
            Some(TypeData::Map { value, .. }) => *value,
            Some(TypeData::Pointer(inner)) => match self.pool.underlying_data(*inner) {
                Some(TypeData::Array { elem, .. }) => *elem,
                _ => Idx::INVALID,
            },
            _ => Idx::INVALID,
        }
    }

    /// Types received by an `n`-target assignment from the single
    /// expression `id`: the results of a call, or the value and `ok` of a
    /// map index, type assertion or receive.
    pub(super) fn multi_value(&mut self, scope: ScopeId, id: ExprId, n: usize) -> Vec<Idx> {
        let arena = &self.file().arena;
        let inner = arena.unparen(id);
        if n == 2 {
            match &arena.expr(inner).kind {
                ExprKind::Index { x, indices } => {
                    let base = self.expr(scope, *x);
                    for index in indices {
                        self.expr(scope, *index);
                    }
                    let ok = if matches!(self.pool.underlying_data(base), Some(TypeData::Map { .. })) {
                        Idx::BOOL
                    } else {
                        Idx::INVALID
                    };
                    return vec![self.index_result(base), ok];
                }
                ExprKind::TypeAssert { ty: Some(_), .. } | ExprKind::Unary { op: UnaryOp::Recv, .. } => {
                    return vec![self.expr(scope, id), Idx::BOOL];
                }
                _ => {}
            }
        }
        let ty = self.expr(scope, id);
        let mut values = self.pool.values(ty);
        values.resize(n, Idx::INVALID);
        values
    }

    fn call(&mut self, scope: ScopeId, func: ExprId, args: &[ExprId]) -> Idx {
        if let Some(ty) = self.expr_as_type(scope, func) {
            for arg in args {
                self.expr(scope, *arg);
            }
            return ty;
        }
        if let Some(builtin) = self.builtin(scope, func) {
            return self.builtin_call(scope, builtin, args);
        }
        let callee = self.expr(scope, func);
        for arg in args {
            self.expr(scope, *arg);
        }
        match self.pool.signature(callee) {
            Some(sig) => {
                let results = sig.results.clone();
                self.pool.results(&results)
            }
            None => Idx::INVALID,
        }
    }

    fn builtin(&self, scope: ScopeId, func: ExprId) -> Option<Builtin> {
        let expr = self.file().arena.try_expr(func)?;
        let ExprKind::Ident(name) = expr.kind else {
            return None;
        };
        match self.scopes.lookup_parent(scope, name, expr.span.start)?.1.kind {
            SymbolKind::Builtin(builtin) => Some(builtin),
            _ => None,
        }
    }

    fn builtin_call(&mut self, scope: ScopeId, builtin: Builtin, args: &[ExprId]) -> Idx {
        // `make` and `new` take a type first.
        let type_arg = match builtin {
            Builtin::Make | Builtin::New => args.first().and_then(|a| self.expr_as_type(scope, *a)),
            _ => None,
        };
        let skip = usize::from(type_arg.is_some());
        let arg_types: Vec<Idx> = args
            .iter()
            .skip(skip)
            .map(|arg| self.expr(scope, *arg))
            .collect();
        let first = arg_types.first().copied().unwrap_or(Idx::INVALID);
        match builtin {
            Builtin::Len | Builtin::Cap | Builtin::Copy => Idx::INT,
            Builtin::Make => type_arg.unwrap_or(Idx::INVALID),
            Builtin::New => match type_arg {
                Some(ty) => self.pool.pointer(ty),
                None => Idx::INVALID,
            },
            Builtin::Append | Builtin::Max | Builtin::Min => first,
            Builtin::Recover => Idx::ANY,
            Builtin::Complex => Idx::COMPLEX128,
            Builtin::Real | Builtin::Imag => match self.pool.basic(first) {
                Some(BasicKind::Complex64) => Idx::FLOAT32,
                _ => Idx::FLOAT64,
            },
            Builtin::Clear
            | Builtin::Close
            | Builtin::Delete
            | Builtin::Panic
            | Builtin::Print
            | Builtin::Println => Idx::UNIT,
        }
    }
}
