//! Type syntax → pool types.

use errfix_ir::ast::{ExprKind, FieldList, InterfaceElem, LitKind, Signature, TypeExprKind};
use errfix_ir::{ExprId, Name, TypeExprId};

use super::Checker;
use crate::data::{FuncSig, InterfaceData, StructField, TypeData};
use crate::scope::{ScopeId, SymbolKind};
use crate::Idx;

impl Checker<'_> {
    pub(super) fn resolve_type(&mut self, scope: ScopeId, id: TypeExprId) -> Idx {
        errfix_stack::ensure_sufficient_stack(|| self.resolve_type_inner(scope, id))
    }

    fn resolve_type_inner(&mut self, scope: ScopeId, id: TypeExprId) -> Idx {
        let file = self.file();
        let Some(ty) = file.arena.try_type(id) else {
            return Idx::INVALID;
        };
        match &ty.kind {
            TypeExprKind::Name(name) => self.type_name(scope, *name, ty.span.start),
            TypeExprKind::Qualified { pkg, name } => self.qualified_type(scope, *pkg, *name),
            TypeExprKind::Pointer(elem) => {
                let elem = self.resolve_type(scope, *elem);
                self.pool.pointer(elem)
            }
            TypeExprKind::Slice(elem) | TypeExprKind::Ellipsis(elem) => {
                let elem = self.resolve_type(scope, *elem);
                self.pool.slice(elem)
            }
            TypeExprKind::Array { len, elem } => {
                let len = len.and_then(|len| self.int_literal(len));
                let elem = self.resolve_type(scope, *elem);
                self.pool.intern(TypeData::Array { len, elem })
            }
            TypeExprKind::Map { key, value } => {
                let key = self.resolve_type(scope, *key);
                let value = self.resolve_type(scope, *value);
                self.pool.map(key, value)
            }
            TypeExprKind::Chan { dir, elem } => {
                let elem = self.resolve_type(scope, *elem);
                self.pool.chan(*dir, elem)
            }
            TypeExprKind::Func(sig) => {
                let sig = self.resolve_signature(scope, sig);
                self.pool.func(sig)
            }
            TypeExprKind::Struct(fields) => self.struct_type(scope, fields),
            TypeExprKind::Interface { elems, .. } => {
                let mut methods = Vec::new();
                let mut embedded = Vec::new();
                for elem in elems {
                    match elem {
                        InterfaceElem::Method { name, sig } => {
                            let sig = self.resolve_signature(scope, sig);
                            methods.push((name.name, self.pool.func(sig)));
                        }
                        InterfaceElem::Embedded(ty) => embedded.push(self.resolve_type(scope, *ty)),
                    }
                }
                if methods.is_empty() && embedded.is_empty() {
                    return Idx::ANY;
                }
                self.pool.intern(TypeData::Interface(InterfaceData {
                    methods: methods.into(),
                    embedded: embedded.into(),
                }))
            }
            TypeExprKind::Paren(inner) => self.resolve_type(scope, *inner),
        }
    }

    fn type_name(&self, scope: ScopeId, name: Name, pos: u32) -> Idx {
        match self.scopes.lookup_parent(scope, name, pos) {
            Some((_, sym)) if sym.kind == SymbolKind::Type => sym.ty,
            _ => Idx::INVALID,
        }
    }

    /// `pkg.Name` where `pkg` is an import of the current file.
    pub(super) fn qualified_type(&self, scope: ScopeId, pkg: Name, name: Name) -> Idx {
        match self.package_member(scope, pkg, name) {
            Some((SymbolKind::Type, ty)) => ty,
            _ => Idx::INVALID,
        }
    }

    /// Member `name` of the package imported as `pkg`, if `pkg` names an
    /// import here.
    pub(super) fn package_member(&self, scope: ScopeId, pkg: Name, name: Name) -> Option<(SymbolKind, Idx)> {
        let (_, sym) = self.scopes.lookup_parent(scope, pkg, u32::MAX)?;
        let SymbolKind::Package(Some(id)) = sym.kind else {
            return None;
        };
        let data = self.packages.get(id.index())?;
        let member = self.scopes.lookup_local(data.scope, name)?;
        Some((member.kind, member.ty))
    }

    fn struct_type(&mut self, scope: ScopeId, fields: &FieldList) -> Idx {
        let mut out = Vec::new();
        for field in &fields.fields {
            let ty = self.resolve_type(scope, field.ty);
            if field.names.is_empty() {
                let name = self.embedded_name(field.ty).unwrap_or(Name::EMPTY);
                out.push(StructField {
                    name,
                    ty,
                    embedded: true,
                });
            } else {
                out.extend(field.names.iter().map(|n| StructField {
                    name: n.name,
                    ty,
                    embedded: false,
                }));
            }
        }
        self.pool.intern(TypeData::Struct(out.into()))
    }

    /// Field name of an embedded field: the type name without package or
    /// pointer.
    fn embedded_name(&self, ty: TypeExprId) -> Option<Name> {
        match &self.file().arena.ty(ty).kind {
            TypeExprKind::Name(name) | TypeExprKind::Qualified { name, .. } => Some(*name),
            TypeExprKind::Pointer(inner) | TypeExprKind::Paren(inner) => self.embedded_name(*inner),
            _ => None,
        }
    }

    pub(super) fn resolve_signature(&mut self, scope: ScopeId, sig: &Signature) -> FuncSig {
        let arena = &self.file().arena;
        let variadic = sig
            .params
            .fields
            .last()
            .is_some_and(|f| matches!(arena.ty(f.ty).kind, TypeExprKind::Ellipsis(_)));
        let params = self.field_types(scope, &sig.params);
        let results = match &sig.results {
            Some(results) => self.field_types(scope, results),
            None => Vec::new(),
        };
        FuncSig {
            params: params.into(),
            results: results.into(),
            variadic,
        }
    }

    /// One type per declared value (`a, b int` counts twice).
    fn field_types(&mut self, scope: ScopeId, fields: &FieldList) -> Vec<Idx> {
        let mut out = Vec::with_capacity(fields.value_count());
        for field in &fields.fields {
            let ty = self.resolve_type(scope, field.ty);
            let count = field.names.len().max(1);
            out.extend(std::iter::repeat(ty).take(count));
        }
        out
    }

    /// Type denoted by an expression used as a type (`T(x)`, `[]byte(s)`,
    /// `&T{}`), or `None` when the expression is a value.
    pub(super) fn expr_as_type(&mut self, scope: ScopeId, id: ExprId) -> Option<Idx> {
        let expr = self.file().arena.try_expr(id)?;
        match &expr.kind {
            ExprKind::Ident(name) => match self.scopes.lookup_parent(scope, *name, expr.span.start) {
                Some((_, sym)) if sym.kind == SymbolKind::Type => Some(sym.ty),
                _ => None,
            },
            ExprKind::Selector { x, sel } => {
                let pkg = self.file().arena.ident_name(*x)?;
                match self.package_member(scope, pkg, sel.name)? {
                    (SymbolKind::Type, ty) => Some(ty),
                    _ => None,
                }
            }
            ExprKind::Type(ty) => Some(self.resolve_type(scope, *ty)),
            ExprKind::Paren(inner) => self.expr_as_type(scope, *inner),
            ExprKind::Star(inner) => {
                let elem = self.expr_as_type(scope, *inner)?;
                Some(self.pool.pointer(elem))
            }
            _ => None,
        }
    }

    /// Value of an integer literal array length (`[4]T`, `[0x10]T`).
    fn int_literal(&self, id: ExprId) -> Option<u64> {
        let expr = self.file().arena.try_expr(id)?;
        let ExprKind::Lit { kind: LitKind::Int, raw } = expr.kind else {
            return None;
        };
        let text = self.interner.lookup(raw).replace('_', "");
        if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            u64::from_str_radix(hex, 16).ok()
        } else if let Some(bin) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
            u64::from_str_radix(bin, 2).ok()
        } else if let Some(oct) = text.strip_prefix("0o").or_else(|| text.strip_prefix("0O")) {
            u64::from_str_radix(oct, 8).ok()
        } else if text.len() > 1 && text.starts_with('0') {
            u64::from_str_radix(&text[1..], 8).ok()
        } else {
            text.parse().ok()
        }
    }
}
