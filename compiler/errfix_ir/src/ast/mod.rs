//! Go syntax tree.
//!
//! The tree is flat: child nodes are referenced by ids into an
//! [`AstArena`](crate::AstArena) owned by the [`SourceFile`]. Top-level
//! structure (imports, declarations) is held inline because a file has few of
//! them and the printer walks them in order.

mod expr;
mod operators;
mod stmt;
mod ty;

pub use expr::{Expr, ExprKind, LitKind};
pub use operators::{AssignOp, BinaryOp, UnaryOp};
pub use stmt::{BranchKind, CaseClause, ClauseKind, Stmt, StmtKind};
pub use ty::{ChanDir, InterfaceElem, TypeExpr, TypeExprKind};

use crate::{AstArena, BlockId, CommentList, ExprId, Name, Span, TypeExprId};

/// An identifier occurrence with its location.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Ident {
    pub name: Name,
    pub span: Span,
}

impl Ident {
    pub const fn new(name: Name, span: Span) -> Self {
        Ident { name, span }
    }

    /// Identifier created by a rewrite.
    pub const fn synthetic(name: Name) -> Self {
        Ident {
            name,
            span: Span::DUMMY,
        }
    }
}

/// One parsed `.go` file.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub package: Ident,
    pub imports: Vec<ImportDecl>,
    pub decls: Vec<Decl>,
    pub comments: CommentList,
    pub arena: AstArena,
    /// Covers the whole source text.
    pub span: Span,
}

impl SourceFile {
    /// Iterate over every import spec in declaration order.
    pub fn import_specs(&self) -> impl Iterator<Item = &ImportSpec> {
        self.imports.iter().flat_map(|decl| decl.specs.iter())
    }
}

/// `import "x"` or `import ( ... )`.
#[derive(Clone, Debug)]
pub struct ImportDecl {
    pub specs: Vec<ImportSpec>,
    pub grouped: bool,
    pub span: Span,
}

/// A single import path with optional local name (`name "path"`, `. "path"`,
/// `_ "path"`).
#[derive(Clone, Debug)]
pub struct ImportSpec {
    pub name: Option<Ident>,
    /// Import path without quotes.
    pub path: Name,
    pub span: Span,
}

/// Top-level declaration.
#[derive(Clone, Debug)]
pub enum Decl {
    Func(FuncDecl),
    Gen(GenDecl),
}

impl Decl {
    pub fn span(&self) -> Span {
        match self {
            Decl::Func(func) => func.span,
            Decl::Gen(gen) => gen.span,
        }
    }
}

/// `func (recv) Name(params) results { body }`.
#[derive(Clone, Debug)]
pub struct FuncDecl {
    pub recv: Option<FieldList>,
    pub name: Ident,
    pub sig: Signature,
    /// `None` for declarations without a body (assembly stubs).
    pub body: Option<BlockId>,
    pub span: Span,
}

/// Keyword of a general declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclKeyword {
    Var,
    Const,
    Type,
}

impl DeclKeyword {
    pub const fn as_str(self) -> &'static str {
        match self {
            DeclKeyword::Var => "var",
            DeclKeyword::Const => "const",
            DeclKeyword::Type => "type",
        }
    }
}

/// `var`, `const` or `type` declaration, grouped or single.
#[derive(Clone, Debug)]
pub struct GenDecl {
    pub keyword: DeclKeyword,
    pub specs: Vec<Spec>,
    pub grouped: bool,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum Spec {
    Value(ValueSpec),
    Type(TypeSpec),
}

impl Spec {
    pub fn span(&self) -> Span {
        match self {
            Spec::Value(spec) => spec.span,
            Spec::Type(spec) => spec.span,
        }
    }
}

/// `a, b T = x, y` inside a `var` or `const` declaration.
#[derive(Clone, Debug)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    pub ty: Option<TypeExprId>,
    pub values: Vec<ExprId>,
    pub span: Span,
}

/// `Name T` or `Name = T`.
#[derive(Clone, Debug)]
pub struct TypeSpec {
    pub name: Ident,
    pub alias: bool,
    pub ty: TypeExprId,
    pub span: Span,
}

/// Parameter and result lists of a function.
#[derive(Clone, Debug)]
pub struct Signature {
    pub params: FieldList,
    pub results: Option<FieldList>,
    pub span: Span,
}

impl Signature {
    /// Number of declared result values (`(a, b int)` counts two).
    pub fn result_count(&self) -> usize {
        self.results.as_ref().map_or(0, FieldList::value_count)
    }

    /// Declared result types expanded per value, in order.
    pub fn result_types(&self) -> Vec<TypeExprId> {
        self.results
            .as_ref()
            .map_or_else(Vec::new, FieldList::expanded_types)
    }
}

/// Parenthesized list of fields (parameters, results, receivers, struct
/// fields).
#[derive(Clone, Debug)]
pub struct FieldList {
    pub fields: Vec<Field>,
    /// `false` only for a single unnamed result written without parens.
    pub parens: bool,
    pub span: Span,
}

impl FieldList {
    pub fn empty(span: Span) -> Self {
        FieldList {
            fields: Vec::new(),
            parens: true,
            span,
        }
    }

    /// Number of values the list declares.
    pub fn value_count(&self) -> usize {
        self.fields.iter().map(|f| f.names.len().max(1)).sum()
    }

    /// One type id per declared value.
    pub fn expanded_types(&self) -> Vec<TypeExprId> {
        let mut out = Vec::with_capacity(self.value_count());
        for field in &self.fields {
            for _ in 0..field.names.len().max(1) {
                out.push(field.ty);
            }
        }
        out
    }
}

/// `a, b T "tag"` or an anonymous/embedded `T`.
#[derive(Clone, Debug)]
pub struct Field {
    pub names: Vec<Ident>,
    pub ty: TypeExprId,
    /// Raw tag literal including quotes.
    pub tag: Option<Name>,
    pub span: Span,
}
