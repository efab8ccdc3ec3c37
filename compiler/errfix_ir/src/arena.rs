//! Node storage for one source file.

use crate::ast::{Expr, ExprKind, Stmt, TypeExpr};
use crate::{BlockId, ExprId, Name, Span, StmtId, TypeExprId};

/// Ordered statement list.
#[derive(Clone, Debug, Default)]
pub struct Block {
    pub stmts: Vec<StmtId>,
    /// For braced blocks, from `{` to past `}`. For clause bodies, from the
    /// colon to the end of the last statement.
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<StmtId>, span: Span) -> Self {
        Block { stmts, span }
    }
}

/// Arena holding every expression, statement, block and type node of a file.
///
/// Nodes are appended and never removed; rewrites allocate replacement nodes
/// and splice their ids into statement lists.
#[derive(Clone, Debug, Default)]
pub struct AstArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    blocks: Vec<Block>,
    types: Vec<TypeExpr>,
}

fn next_id(len: usize) -> u32 {
    // Source files are bounded by u32 byte offsets, so node counts are too.
    u32::try_from(len).unwrap_or(u32::MAX - 1)
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the arena from the source length.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimate = source_len / 16;
        AstArena {
            exprs: Vec::with_capacity(estimate),
            stmts: Vec::with_capacity(estimate / 4),
            blocks: Vec::with_capacity(estimate / 16),
            types: Vec::with_capacity(estimate / 16),
        }
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(next_id(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(next_id(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    pub fn alloc_block(&mut self, block: Block) -> BlockId {
        let id = BlockId::new(next_id(self.blocks.len()));
        self.blocks.push(block);
        id
    }

    pub fn alloc_type(&mut self, ty: TypeExpr) -> TypeExprId {
        let id = TypeExprId::new(next_id(self.types.len()));
        self.types.push(ty);
        id
    }

    /// Allocate a synthesized identifier expression.
    pub fn alloc_ident(&mut self, name: Name) -> ExprId {
        self.alloc_expr(Expr::synthetic(ExprKind::Ident(name)))
    }

    pub fn try_expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    pub fn try_stmt(&self, id: StmtId) -> Option<&Stmt> {
        self.stmts.get(id.index())
    }

    pub fn try_block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.index())
    }

    pub fn try_type(&self, id: TypeExprId) -> Option<&TypeExpr> {
        self.types.get(id.index())
    }

    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn ty(&self, id: TypeExprId) -> &TypeExpr {
        &self.types[id.index()]
    }

    pub fn expr_mut(&mut self, id: ExprId) -> Option<&mut Expr> {
        self.exprs.get_mut(id.index())
    }

    pub fn stmt_mut(&mut self, id: StmtId) -> Option<&mut Stmt> {
        self.stmts.get_mut(id.index())
    }

    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.get_mut(id.index())
    }

    /// Name of a plain identifier expression.
    pub fn ident_name(&self, id: ExprId) -> Option<Name> {
        match self.try_expr(id)?.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Strip any number of enclosing parentheses.
    pub fn unparen(&self, mut id: ExprId) -> ExprId {
        while let Some(Expr {
            kind: ExprKind::Paren(inner),
            ..
        }) = self.try_expr(id)
        {
            id = *inner;
        }
        id
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::StmtKind;

    #[test]
    fn test_alloc_and_lookup() {
        let mut arena = AstArena::new();
        let x = arena.alloc_expr(Expr::new(ExprKind::Ident(Name::EMPTY), Span::new(0, 1)));
        let stmt = arena.alloc_stmt(Stmt::new(StmtKind::Expr(x), Span::new(0, 1)));
        let block = arena.alloc_block(Block::new(vec![stmt], Span::new(0, 3)));

        assert_eq!(x.index(), 0);
        assert_eq!(arena.block(block).stmts, vec![stmt]);
        assert!(matches!(arena.stmt(stmt).kind, StmtKind::Expr(e) if e == x));
        assert!(arena.try_expr(ExprId::INVALID).is_none());
    }

    #[test]
    fn test_unparen() {
        let mut arena = AstArena::new();
        let inner = arena.alloc_ident(Name::EMPTY);
        let once = arena.alloc_expr(Expr::synthetic(ExprKind::Paren(inner)));
        let twice = arena.alloc_expr(Expr::synthetic(ExprKind::Paren(once)));
        assert_eq!(arena.unparen(twice), inner);
        assert_eq!(arena.ident_name(inner), Some(Name::EMPTY));
        assert_eq!(arena.ident_name(twice), None);
    }
}
