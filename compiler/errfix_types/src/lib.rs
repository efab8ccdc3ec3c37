//! Types and scopes for Go packages.
//!
//! The [`Program`] checks packages in dependency order and records, per
//! file, what a rewrite needs to know: the result types of calls, the scope
//! of every statement list, the names each `:=` introduced and the
//! signature of every function. [`ErrorContract`] answers whether a type is
//! an `error`.
//!
//! Imports of the standard library resolve to small Go stubs bundled with
//! the crate (see [`stdlib`]); other unknown imports stay unresolved and
//! everything reached through them is [`Idx::INVALID`].

mod check;
mod contract;
mod data;
mod idx;
mod info;
mod pool;
mod program;
mod scope;
pub mod stdlib;

pub use contract::ErrorContract;
pub use data::{BasicKind, FuncSig, InterfaceData, Method, NamedType, StructField, TypeData};
pub use idx::Idx;
pub use info::{FileInfo, RoutineId, RoutineInfo};
pub use pool::{Member, Pool};
pub use program::{CheckedPackage, PackageData, Program};
pub use scope::{Builtin, PackageId, Scope, ScopeId, ScopeKind, ScopeTree, Symbol, SymbolKind};

errfix_ir::static_assert_size!(Idx, 4);
errfix_ir::static_assert_size!(ScopeId, 4);
