//! Shared intermediate representation for the errfix toolchain.
//!
//! Holds the Go syntax tree, spans, interned names and comment storage that
//! every other crate builds on. Nothing here knows about types or rewriting.

/// Compile-time assertion of a type's size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod comment;
mod ids;
mod interner;
mod name;
mod span;
mod token;

pub use arena::{AstArena, Block};
pub use ast::SourceFile;
pub use comment::{Comment, CommentKind, CommentList};
pub use ids::{BlockId, ExprId, StmtId, TypeExprId};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenFlags, TokenKind, TokenList};
