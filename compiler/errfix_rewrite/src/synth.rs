//! Generated statements.
//!
//! Every node built here carries [`Span::DUMMY`](errfix_ir::Span::DUMMY),
//! which tells the printer to lay it out without consulting the source.

use errfix_ir::ast::{
    BinaryOp, DeclKeyword, Expr, ExprKind, GenDecl, Ident, LitKind, Spec, Stmt, StmtKind,
    TypeExpr, TypeExprKind, ValueSpec,
};
use errfix_ir::{AstArena, Block, ExprId, Name, Span, StmtId};

use crate::config::Names;

pub(crate) struct Synth<'a> {
    arena: &'a mut AstArena,
    names: &'a Names,
}

impl<'a> Synth<'a> {
    pub(crate) fn new(arena: &'a mut AstArena, names: &'a Names) -> Self {
        Synth { arena, names }
    }

    fn ident(&mut self, name: Name) -> ExprId {
        self.arena.alloc_ident(name)
    }

    /// `if err != nil { body }`
    fn if_err(&mut self, body: StmtId) -> StmtId {
        let err = self.ident(self.names.err);
        let nil = self.ident(self.names.nil);
        let cond = self.arena.alloc_expr(Expr::synthetic(ExprKind::Binary {
            op: BinaryOp::NotEq,
            left: err,
            right: nil,
        }));
        let then = self.arena.alloc_block(Block::new(vec![body], Span::DUMMY));
        self.arena.alloc_stmt(Stmt::synthetic(StmtKind::If {
            init: None,
            cond,
            then,
            els: None,
        }))
    }

    /// `if err != nil { return zeros..., err }`
    pub(crate) fn return_check(&mut self, mut zeros: Vec<ExprId>) -> StmtId {
        let err = self.ident(self.names.err);
        zeros.push(err);
        let ret = self.arena.alloc_stmt(Stmt::synthetic(StmtKind::Return(zeros)));
        self.if_err(ret)
    }

    /// `if err != nil { log.Fatalf("...", err) }` with `log` the local
    /// name of the logging package.
    pub(crate) fn fatal_check(&mut self, log: Name) -> StmtId {
        let pkg = self.ident(log);
        let func = self.arena.alloc_expr(Expr::synthetic(ExprKind::Selector {
            x: pkg,
            sel: Ident::synthetic(self.names.fatal_func),
        }));
        let format = self.arena.alloc_expr(Expr::synthetic(ExprKind::Lit {
            kind: LitKind::String,
            raw: self.names.fatal_format,
        }));
        let err = self.ident(self.names.err);
        let call = self.arena.alloc_expr(Expr::synthetic(ExprKind::Call {
            func,
            args: vec![format, err],
            ellipsis: false,
            multiline: false,
        }));
        let stmt = self.arena.alloc_stmt(Stmt::synthetic(StmtKind::Expr(call)));
        self.if_err(stmt)
    }

    /// `var err error`
    pub(crate) fn declare_err(&mut self) -> StmtId {
        let ty = self
            .arena
            .alloc_type(TypeExpr::new(TypeExprKind::Name(self.names.error), Span::DUMMY));
        let spec = ValueSpec {
            names: vec![Ident::synthetic(self.names.err)],
            ty: Some(ty),
            values: Vec::new(),
            span: Span::DUMMY,
        };
        self.arena.alloc_stmt(Stmt::synthetic(StmtKind::Decl(GenDecl {
            keyword: DeclKeyword::Var,
            specs: vec![Spec::Value(spec)],
            grouped: false,
            span: Span::DUMMY,
        })))
    }
}
