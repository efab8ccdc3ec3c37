//! Per-file results of type checking.

use errfix_ir::{BlockId, ExprId, Name, StmtId};
use rustc_hash::FxHashMap;

use crate::{Idx, ScopeId};

/// A function declaration (by index into `SourceFile::decls`) or a
/// function literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RoutineId {
    Decl(usize),
    Lit(ExprId),
}

#[derive(Clone, Debug)]
pub struct RoutineInfo {
    /// Scope holding the parameters and the top level of the body.
    pub scope: ScopeId,
    /// Resolved function type.
    pub sig: Idx,
}

/// What the checker learned about one file.
#[derive(Clone, Debug, Default)]
pub struct FileInfo {
    /// File scope (imports); its parent is the package scope.
    pub scope: ScopeId,
    /// Result type of every call: a single type, [`Idx::UNIT`], or a tuple.
    pub call_types: FxHashMap<ExprId, Idx>,
    /// Names each `:=` statement newly declared.
    pub defines: FxHashMap<StmtId, Vec<Name>>,
    /// Scope of every statement list. A function body shares the
    /// function's scope.
    pub block_scopes: FxHashMap<BlockId, ScopeId>,
    pub routines: FxHashMap<RoutineId, RoutineInfo>,
}

impl FileInfo {
    pub fn call_type(&self, call: ExprId) -> Idx {
        self.call_types.get(&call).copied().unwrap_or(Idx::INVALID)
    }

    pub fn block_scope(&self, block: BlockId) -> Option<ScopeId> {
        self.block_scopes.get(&block).copied()
    }

    /// Did `stmt` introduce `name`?
    pub fn defines(&self, stmt: StmtId, name: Name) -> bool {
        self.defines.get(&stmt).is_some_and(|names| names.contains(&name))
    }

    pub fn routine(&self, id: RoutineId) -> Option<&RoutineInfo> {
        self.routines.get(&id)
    }
}
