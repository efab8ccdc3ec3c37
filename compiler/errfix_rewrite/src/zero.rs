//! Zero values for result types.
//!
//! A generated `return` needs a zero value for every result before the
//! error. The declared type syntax decides first; for type names the
//! resolved type refines the choice, and when it is unknown a name is
//! assumed to denote an aggregate with an empty literal form.

use errfix_ir::ast::{Expr, ExprKind, LitKind, TypeExprKind};
use errfix_ir::{AstArena, ExprId, StringInterner, TypeExprId};
use errfix_types::{BasicKind, Idx, Pool, TypeData};

/// Shape of a zero value.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Zero {
    /// `""`
    EmptyString,
    /// `false`
    False,
    /// `0`
    Number,
    /// `nil`
    Nil,
    /// `T{}` using the declared type.
    Composite,
}

const NUMERIC_NAMES: &[&str] = &[
    "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64",
    "uintptr", "float32", "float64", "complex64", "complex128", "byte", "rune",
];

pub struct ZeroValues<'a> {
    pool: &'a Pool,
    interner: &'a StringInterner,
}

impl<'a> ZeroValues<'a> {
    pub fn new(pool: &'a Pool, interner: &'a StringInterner) -> Self {
        ZeroValues { pool, interner }
    }

    /// Allocate the zero value of the type written as `ty`, resolved to
    /// `resolved` (or [`Idx::INVALID`] when unknown).
    pub fn zero_value(&self, arena: &mut AstArena, ty: TypeExprId, resolved: Idx) -> ExprId {
        let kind = match self.classify(arena, ty, resolved) {
            Zero::EmptyString => ExprKind::Lit {
                kind: LitKind::String,
                raw: self.interner.intern("\"\""),
            },
            Zero::Number => ExprKind::Lit {
                kind: LitKind::Int,
                raw: self.interner.intern("0"),
            },
            Zero::False => ExprKind::Ident(self.interner.intern("false")),
            Zero::Nil => ExprKind::Ident(self.interner.intern("nil")),
            Zero::Composite => {
                let inner = strip_parens(arena, ty);
                let ty = arena.alloc_expr(Expr::synthetic(ExprKind::Type(inner)));
                ExprKind::Composite {
                    ty: Some(ty),
                    elts: Vec::new(),
                    multiline: false,
                }
            }
        };
        arena.alloc_expr(Expr::synthetic(kind))
    }

    pub fn classify(&self, arena: &AstArena, ty: TypeExprId, resolved: Idx) -> Zero {
        let Some(node) = arena.try_type(ty) else {
            return Zero::Nil;
        };
        match &node.kind {
            TypeExprKind::Paren(inner) => self.classify(arena, *inner, resolved),
            TypeExprKind::Pointer(_)
            | TypeExprKind::Slice(_)
            | TypeExprKind::Map { .. }
            | TypeExprKind::Chan { .. }
            | TypeExprKind::Func(_)
            | TypeExprKind::Interface { .. }
            | TypeExprKind::Array { len: None, .. }
            | TypeExprKind::Ellipsis(_) => Zero::Nil,
            TypeExprKind::Array { len: Some(_), .. } | TypeExprKind::Struct(_) => Zero::Composite,
            TypeExprKind::Name(name) => self
                .by_resolved(resolved)
                .unwrap_or_else(|| by_name(self.interner.lookup(*name))),
            TypeExprKind::Qualified { .. } => self.by_resolved(resolved).unwrap_or(Zero::Composite),
        }
    }

    fn by_resolved(&self, resolved: Idx) -> Option<Zero> {
        if resolved.is_invalid() {
            return None;
        }
        Some(match self.pool.underlying_data(resolved)? {
            TypeData::Basic(BasicKind::UntypedNil) => Zero::Nil,
            TypeData::Basic(kind) if kind.is_string() => Zero::EmptyString,
            TypeData::Basic(kind) if kind.is_bool() => Zero::False,
            TypeData::Basic(_) => Zero::Number,
            TypeData::Pointer(_)
            | TypeData::Slice(_)
            | TypeData::Map { .. }
            | TypeData::Chan { .. }
            | TypeData::Func(_)
            | TypeData::Interface(_) => Zero::Nil,
            TypeData::Struct(_) | TypeData::Array { .. } => Zero::Composite,
            TypeData::Tuple(_) | TypeData::Named(_) => return None,
        })
    }
}

fn by_name(name: &str) -> Zero {
    match name {
        "string" => Zero::EmptyString,
        "bool" => Zero::False,
        "error" | "any" => Zero::Nil,
        _ if NUMERIC_NAMES.contains(&name) => Zero::Number,
        _ => Zero::Composite,
    }
}

fn strip_parens(arena: &AstArena, mut ty: TypeExprId) -> TypeExprId {
    while let Some(TypeExprKind::Paren(inner)) = arena.try_type(ty).map(|t| &t.kind) {
        ty = *inner;
    }
    ty
}

#[cfg(test)]
mod tests;
