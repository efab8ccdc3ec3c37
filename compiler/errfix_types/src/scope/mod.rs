//! Lexical scopes.
//!
//! One tree per program: universe, then a scope per package, a scope per
//! file under its package (imports), then function and block scopes.
//! Function-local symbols carry the offset where their scope begins, so a
//! lookup at an earlier position does not see them.

use errfix_ir::{Name, Span};
use rustc_hash::FxHashMap;

use crate::Idx;

/// Index of a scope in the [`ScopeTree`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ScopeId(u32);

impl ScopeId {
    pub const INVALID: ScopeId = ScopeId(u32::MAX);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl Default for ScopeId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Index of a checked package in a [`Program`](crate::Program).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct PackageId(pub(crate) u32);

impl PackageId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScopeKind {
    Universe,
    Package,
    File,
    /// Parameters, results, and the top level of a function body.
    Func,
    Block,
}

impl ScopeKind {
    /// Declarations in these scopes are visible regardless of position.
    const fn is_unordered(self) -> bool {
        matches!(self, ScopeKind::Universe | ScopeKind::Package | ScopeKind::File)
    }
}

/// Predeclared functions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Builtin {
    Append,
    Cap,
    Clear,
    Close,
    Complex,
    Copy,
    Delete,
    Imag,
    Len,
    Make,
    Max,
    Min,
    New,
    Panic,
    Print,
    Println,
    Real,
    Recover,
}

impl Builtin {
    pub const ALL: [(&'static str, Builtin); 18] = [
        ("append", Builtin::Append),
        ("cap", Builtin::Cap),
        ("clear", Builtin::Clear),
        ("close", Builtin::Close),
        ("complex", Builtin::Complex),
        ("copy", Builtin::Copy),
        ("delete", Builtin::Delete),
        ("imag", Builtin::Imag),
        ("len", Builtin::Len),
        ("make", Builtin::Make),
        ("max", Builtin::Max),
        ("min", Builtin::Min),
        ("new", Builtin::New),
        ("panic", Builtin::Panic),
        ("print", Builtin::Print),
        ("println", Builtin::Println),
        ("real", Builtin::Real),
        ("recover", Builtin::Recover),
    ];
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SymbolKind {
    Var,
    Const,
    Type,
    Func,
    /// Imported package; `None` when the import could not be resolved.
    Package(Option<PackageId>),
    Builtin(Builtin),
    Nil,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub ty: Idx,
    /// Offset from which the symbol is visible in function scopes.
    pub pos: u32,
}

impl Symbol {
    pub const fn new(kind: SymbolKind, ty: Idx, pos: u32) -> Self {
        Symbol { kind, ty, pos }
    }
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    pub span: Span,
    entries: FxHashMap<Name, Symbol>,
}

impl Scope {
    pub fn iter(&self) -> impl Iterator<Item = (Name, &Symbol)> {
        self.entries.iter().map(|(name, sym)| (*name, sym))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    /// Tree holding only an empty universe scope.
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![Scope {
                parent: None,
                kind: ScopeKind::Universe,
                span: Span::DUMMY,
                entries: FxHashMap::default(),
            }],
        }
    }

    #[inline]
    pub const fn universe(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn push(&mut self, parent: ScopeId, kind: ScopeKind, span: Span) -> ScopeId {
        let id = ScopeId(u32::try_from(self.scopes.len()).unwrap_or(u32::MAX - 1));
        self.scopes.push(Scope {
            parent: Some(parent),
            kind,
            span,
            entries: FxHashMap::default(),
        });
        id
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.index())
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.get(id)?.parent
    }

    pub fn kind(&self, id: ScopeId) -> Option<ScopeKind> {
        self.get(id).map(|s| s.kind)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Declare `name` in `scope`. An existing entry is kept and returned.
    pub fn insert(&mut self, scope: ScopeId, name: Name, symbol: Symbol) -> Option<Symbol> {
        let scope = self.scopes.get_mut(scope.index())?;
        match scope.entries.get(&name) {
            Some(existing) => Some(*existing),
            None => {
                scope.entries.insert(name, symbol);
                None
            }
        }
    }

    /// Overwrite the type of an existing entry.
    pub fn set_type(&mut self, scope: ScopeId, name: Name, ty: Idx) {
        if let Some(sym) = self
            .scopes
            .get_mut(scope.index())
            .and_then(|s| s.entries.get_mut(&name))
        {
            sym.ty = ty;
        }
    }

    /// Entry of `name` in `scope` alone, ignoring position.
    pub fn lookup_local(&self, scope: ScopeId, name: Name) -> Option<&Symbol> {
        self.get(scope)?.entries.get(&name)
    }

    /// Innermost declaration of `name` visible from `scope` at offset `pos`,
    /// with the scope holding it.
    pub fn lookup_parent(&self, scope: ScopeId, name: Name, pos: u32) -> Option<(ScopeId, &Symbol)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = self.get(id)?;
            if let Some(sym) = s.entries.get(&name) {
                if s.kind.is_unordered() || sym.pos <= pos {
                    return Some((id, sym));
                }
            }
            current = s.parent;
        }
        None
    }

    /// Is `ancestor` equal to `scope` or one of its parents?
    pub fn is_ancestor(&self, ancestor: ScopeId, scope: ScopeId) -> bool {
        let mut current = Some(scope);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
