//! Expression nodes.

use super::{BinaryOp, Ident, Signature, UnaryOp};
use crate::{BlockId, ExprId, Name, Span, TypeExprId};

/// Expression node.
#[derive(Clone, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Expression created by a rewrite.
    pub fn synthetic(kind: ExprKind) -> Self {
        Expr {
            kind,
            span: Span::DUMMY,
        }
    }
}

/// Literal kinds. The literal text is kept verbatim.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

#[derive(Clone, Debug)]
pub enum ExprKind {
    Ident(Name),
    Lit {
        kind: LitKind,
        raw: Name,
    },
    /// `T{a, b}`, `{k: v}` (type elided inside an outer literal).
    Composite {
        ty: Option<ExprId>,
        elts: Vec<ExprId>,
        /// The closing brace sat on its own line in the source.
        multiline: bool,
    },
    KeyValue {
        key: ExprId,
        value: ExprId,
    },
    FuncLit {
        sig: Signature,
        body: BlockId,
    },
    Paren(ExprId),
    Selector {
        x: ExprId,
        sel: Ident,
    },
    Index {
        x: ExprId,
        indices: Vec<ExprId>,
    },
    Slice {
        x: ExprId,
        lo: Option<ExprId>,
        hi: Option<ExprId>,
        max: Option<ExprId>,
    },
    /// `x.(T)`; `ty` is `None` for the `x.(type)` guard of a type switch.
    TypeAssert {
        x: ExprId,
        ty: Option<TypeExprId>,
    },
    Call {
        func: ExprId,
        args: Vec<ExprId>,
        ellipsis: bool,
        /// The closing paren sat on its own line in the source.
        multiline: bool,
    },
    /// `*x`: dereference, or pointer type in expression position.
    Star(ExprId),
    Unary {
        op: UnaryOp,
        x: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    /// Type literal in expression position (`[]byte(s)`, `map[K]V{}`).
    Type(TypeExprId),
}
