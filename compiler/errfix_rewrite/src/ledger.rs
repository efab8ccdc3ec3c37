//! Names introduced by the rewrite.
//!
//! The checker's scope tree describes the file as it was parsed. Once a
//! rewrite turns `_` into `err :=`, later statements must see `err` as
//! bound even though the tree has no entry for it. The ledger records those
//! introductions and is consulted before the tree.

use errfix_ir::Name;
use errfix_types::{ScopeId, ScopeTree};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Default)]
pub struct ScopeLedger {
    introduced: FxHashMap<ScopeId, FxHashSet<Name>>,
}

impl ScopeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_introduced(&mut self, scope: ScopeId, name: Name) {
        self.introduced.entry(scope).or_default().insert(name);
    }

    pub fn introduced_in(&self, scope: ScopeId, name: Name) -> bool {
        self.introduced
            .get(&scope)
            .is_some_and(|names| names.contains(&name))
    }

    /// Is `name` visible at `pos` in `scope`?
    ///
    /// Introductions are searched from `scope` up to and including
    /// `routine_scope`; the tree is then searched through every parent,
    /// honouring declaration positions.
    pub fn is_bound(
        &self,
        tree: &ScopeTree,
        routine_scope: ScopeId,
        scope: ScopeId,
        name: Name,
        pos: u32,
    ) -> bool {
        let mut current = Some(scope);
        while let Some(id) = current {
            if self.introduced_in(id, name) {
                return true;
            }
            if id == routine_scope {
                break;
            }
            current = tree.parent(id);
        }
        tree.lookup_parent(scope, name, pos).is_some()
    }
}

#[cfg(test)]
mod tests {
    use errfix_ir::{Span, StringInterner};
    use errfix_types::{Idx, ScopeKind, Symbol, SymbolKind};

    use super::*;

    struct Fixture {
        tree: ScopeTree,
        func: ScopeId,
        inner: ScopeId,
        err: Name,
    }

    fn fixture() -> Fixture {
        let interner = StringInterner::new();
        let mut tree = ScopeTree::new();
        let pkg = tree.push(tree.universe(), ScopeKind::Package, Span::DUMMY);
        let func = tree.push(pkg, ScopeKind::Func, Span::new(0, 100));
        let inner = tree.push(func, ScopeKind::Block, Span::new(20, 80));
        Fixture {
            tree,
            func,
            inner,
            err: interner.intern("err"),
        }
    }

    #[test]
    fn test_introduction_is_seen_from_nested_scopes_only() {
        let f = fixture();
        let mut ledger = ScopeLedger::new();
        ledger.mark_introduced(f.inner, f.err);

        assert!(ledger.is_bound(&f.tree, f.func, f.inner, f.err, 50));
        assert!(!ledger.is_bound(&f.tree, f.func, f.func, f.err, 90));
    }

    #[test]
    fn test_tree_declarations_respect_position() {
        let mut f = fixture();
        f.tree
            .insert(f.func, f.err, Symbol::new(SymbolKind::Var, Idx::ERROR, 40));
        let ledger = ScopeLedger::new();

        assert!(!ledger.is_bound(&f.tree, f.func, f.inner, f.err, 30));
        assert!(ledger.is_bound(&f.tree, f.func, f.inner, f.err, 60));
    }

    #[test]
    fn test_walk_stops_at_routine_scope() {
        let f = fixture();
        let mut ledger = ScopeLedger::new();
        // introduced in the enclosing function, seen from a literal body
        ledger.mark_introduced(f.func, f.err);

        assert!(!ledger.is_bound(&f.tree, f.inner, f.inner, f.err, 50));
        assert!(ledger.is_bound(&f.tree, f.func, f.inner, f.err, 50));
    }
}
