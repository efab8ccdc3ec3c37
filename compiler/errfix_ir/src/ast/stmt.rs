//! Statement nodes.

use super::{AssignOp, GenDecl};
use crate::{BlockId, ExprId, Name, Span, StmtId};

/// Statement node.
#[derive(Clone, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }

    /// Statement created by a rewrite.
    pub fn synthetic(kind: StmtKind) -> Self {
        Stmt {
            kind,
            span: Span::DUMMY,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BranchKind {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

impl BranchKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            BranchKind::Break => "break",
            BranchKind::Continue => "continue",
            BranchKind::Goto => "goto",
            BranchKind::Fallthrough => "fallthrough",
        }
    }
}

#[derive(Clone, Debug)]
pub enum StmtKind {
    Empty,
    Decl(GenDecl),
    Labeled {
        label: Name,
        stmt: StmtId,
    },
    Expr(ExprId),
    Send {
        chan: ExprId,
        value: ExprId,
    },
    IncDec {
        x: ExprId,
        inc: bool,
    },
    Assign {
        lhs: Vec<ExprId>,
        op: AssignOp,
        rhs: Vec<ExprId>,
    },
    Go(ExprId),
    Defer(ExprId),
    Return(Vec<ExprId>),
    Branch {
        kind: BranchKind,
        label: Option<Name>,
    },
    Block(BlockId),
    If {
        init: Option<StmtId>,
        cond: ExprId,
        then: BlockId,
        /// Either another `If` statement or a `Block` statement.
        els: Option<StmtId>,
    },
    /// Expression or type switch; a type switch has a `x.(type)` guard as
    /// its `tag` statement.
    Switch {
        init: Option<StmtId>,
        tag: Option<StmtId>,
        clauses: Vec<CaseClause>,
    },
    Select {
        clauses: Vec<CaseClause>,
    },
    For {
        init: Option<StmtId>,
        cond: Option<ExprId>,
        post: Option<StmtId>,
        body: BlockId,
    },
    Range {
        key: Option<ExprId>,
        value: Option<ExprId>,
        /// `None` for `for range x`.
        op: Option<AssignOp>,
        expr: ExprId,
        body: BlockId,
    },
}

/// `case a, b:` / `case v := <-ch:` / `default:` with its statement list.
#[derive(Clone, Debug)]
pub struct CaseClause {
    pub kind: ClauseKind,
    pub body: BlockId,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum ClauseKind {
    Case(Vec<ExprId>),
    Comm(StmtId),
    Default,
}
