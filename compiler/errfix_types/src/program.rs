//! Whole-program state: pool, scopes and checked packages.

use errfix_ir::{Name, SharedInterner, SourceFile, Span, StringInterner};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::check::Checker;
use crate::info::FileInfo;
use crate::scope::{Builtin, PackageId, ScopeId, ScopeKind, ScopeTree, Symbol, SymbolKind};
use crate::{stdlib, Idx, Pool};

/// A checked package.
#[derive(Clone, Debug)]
pub struct PackageData {
    /// Import path.
    pub path: String,
    /// Name from the package clause.
    pub name: Name,
    pub scope: ScopeId,
}

/// Result of [`Program::check_package`].
#[derive(Debug)]
pub struct CheckedPackage {
    pub id: PackageId,
    /// One entry per input file, in input order.
    pub files: Vec<FileInfo>,
}

/// Owns everything the checker produces. Packages are checked one at a
/// time, each after the packages it imports; afterwards the program is only
/// read.
pub struct Program {
    interner: SharedInterner,
    pool: Pool,
    scopes: ScopeTree,
    packages: Vec<PackageData>,
    by_path: FxHashMap<String, PackageId>,
    /// Standard library stubs currently being loaded.
    loading: FxHashSet<String>,
}

impl Program {
    pub fn new(interner: SharedInterner) -> Self {
        let pool = Pool::new(&interner);
        let mut scopes = ScopeTree::new();
        populate_universe(&mut scopes, &interner);
        Program {
            interner,
            pool,
            scopes,
            packages: Vec::new(),
            by_path: FxHashMap::default(),
            loading: FxHashSet::default(),
        }
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    pub fn package(&self, id: PackageId) -> Option<&PackageData> {
        self.packages.get(id.index())
    }

    pub fn package_by_path(&self, path: &str) -> Option<PackageId> {
        self.by_path.get(path).copied()
    }

    /// Check the files of one package. Imports must already be checked or
    /// be standard library stubs; anything else is left unresolved.
    #[tracing::instrument(level = "debug", skip(self, files), fields(files = files.len()))]
    pub fn check_package(&mut self, path: &str, files: &[&SourceFile]) -> CheckedPackage {
        let mut imports: FxHashMap<Name, Option<PackageId>> = FxHashMap::default();
        for file in files {
            for spec in file.import_specs() {
                if !imports.contains_key(&spec.path) {
                    let resolved = self.resolve_import(self.interner.lookup(spec.path));
                    imports.insert(spec.path, resolved);
                }
            }
        }

        let name = files.first().map_or(Name::EMPTY, |f| f.package.name);
        let scope = self
            .scopes
            .push(self.scopes.universe(), ScopeKind::Package, Span::DUMMY);
        let id = PackageId(u32::try_from(self.packages.len()).unwrap_or(u32::MAX - 1));
        let pkg_path = self.interner.intern(path);

        let infos = Checker::new(
            &self.interner,
            &mut self.pool,
            &mut self.scopes,
            &self.packages,
            &imports,
            pkg_path,
            scope,
            files,
        )
        .check();

        self.packages.push(PackageData {
            path: path.to_string(),
            name,
            scope,
        });
        self.by_path.insert(path.to_string(), id);
        CheckedPackage { id, files: infos }
    }

    /// A checked project package, or a standard library stub loaded on
    /// first use.
    fn resolve_import(&mut self, path: &str) -> Option<PackageId> {
        if let Some(id) = self.by_path.get(path) {
            return Some(*id);
        }
        let source = stdlib::source(path)?;
        if !self.loading.insert(path.to_string()) {
            warn!(path, "import cycle between library stubs");
            return None;
        }
        let parsed = errfix_parse::parse(source, &self.interner);
        let result = match parsed.file {
            Some(file) => {
                debug!(path, "loading library stub");
                Some(self.check_package(path, &[&file]).id)
            }
            None => {
                warn!(path, diagnostics = parsed.diagnostics.len(), "library stub failed to parse");
                None
            }
        };
        self.loading.remove(path);
        result
    }
}

fn populate_universe(scopes: &mut ScopeTree, interner: &StringInterner) {
    let universe = scopes.universe();
    let types = [
        ("bool", Idx::BOOL),
        ("int", Idx::INT),
        ("int8", Idx::INT8),
        ("int16", Idx::INT16),
        ("int32", Idx::INT32),
        ("rune", Idx::INT32),
        ("int64", Idx::INT64),
        ("uint", Idx::UINT),
        ("uint8", Idx::UINT8),
        ("byte", Idx::UINT8),
        ("uint16", Idx::UINT16),
        ("uint32", Idx::UINT32),
        ("uint64", Idx::UINT64),
        ("uintptr", Idx::UINTPTR),
        ("float32", Idx::FLOAT32),
        ("float64", Idx::FLOAT64),
        ("complex64", Idx::COMPLEX64),
        ("complex128", Idx::COMPLEX128),
        ("string", Idx::STRING),
        ("error", Idx::ERROR),
        ("any", Idx::ANY),
        ("comparable", Idx::ANY),
    ];
    for (name, ty) in types {
        scopes.insert(universe, interner.intern(name), Symbol::new(SymbolKind::Type, ty, 0));
    }
    for (name, ty) in [
        ("true", Idx::UNTYPED_BOOL),
        ("false", Idx::UNTYPED_BOOL),
        ("iota", Idx::UNTYPED_INT),
    ] {
        scopes.insert(universe, interner.intern(name), Symbol::new(SymbolKind::Const, ty, 0));
    }
    scopes.insert(
        universe,
        interner.intern("nil"),
        Symbol::new(SymbolKind::Nil, Idx::UNTYPED_NIL, 0),
    );
    for (name, builtin) in Builtin::ALL {
        scopes.insert(
            universe,
            interner.intern(name),
            Symbol::new(SymbolKind::Builtin(builtin), Idx::INVALID, 0),
        );
    }
}
