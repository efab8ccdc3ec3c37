//! Type syntax.

use super::{FieldList, Ident, Signature};
use crate::{ExprId, Name, Span, TypeExprId};

#[derive(Clone, Debug)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

impl TypeExpr {
    pub fn new(kind: TypeExprKind, span: Span) -> Self {
        TypeExpr { kind, span }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Clone, Debug)]
pub enum TypeExprKind {
    /// Unqualified type name (`int`, `Config`).
    Name(Name),
    /// Package-qualified type name (`os.File`).
    Qualified { pkg: Name, name: Name },
    Pointer(TypeExprId),
    Slice(TypeExprId),
    /// `[N]T`; `len` is `None` for `[...]T`.
    Array {
        len: Option<ExprId>,
        elem: TypeExprId,
    },
    Map {
        key: TypeExprId,
        value: TypeExprId,
    },
    Chan {
        dir: ChanDir,
        elem: TypeExprId,
    },
    Func(Signature),
    Struct(FieldList),
    Interface {
        elems: Vec<InterfaceElem>,
        span: Span,
    },
    /// `...T` in the last parameter position.
    Ellipsis(TypeExprId),
    Paren(TypeExprId),
}

#[derive(Clone, Debug)]
pub enum InterfaceElem {
    Method { name: Ident, sig: Signature },
    Embedded(TypeExprId),
}
