//! Package checker.
//!
//! Checking is best effort: anything that cannot be resolved becomes
//! [`Idx::INVALID`] and checking carries on. The results feed a rewriter
//! that only needs call result types, scopes and definitions, so Go's type
//! errors are not reported.
//!
//! Phases, each over all files of the package:
//! 1. file scopes and imports
//! 2. collect package-level names
//! 3. resolve type declarations
//! 4. resolve function signatures and attach methods
//! 5. type package-level variables and constants
//! 6. check function bodies

mod expr;
mod resolve;
mod stmt;

use errfix_ir::ast::{Decl, DeclKeyword, FuncDecl, GenDecl, Spec, TypeExprKind};
use errfix_ir::{Name, SourceFile, StringInterner};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::data::Method;
use crate::info::{FileInfo, RoutineId, RoutineInfo};
use crate::program::PackageData;
use crate::scope::{PackageId, ScopeId, ScopeKind, ScopeTree, Symbol, SymbolKind};
use crate::{Idx, Pool};

/// Interned names the checker compares against.
struct WellKnown {
    blank: Name,
    init: Name,
    dot: Name,
}

pub(crate) struct Checker<'a> {
    interner: &'a StringInterner,
    pool: &'a mut Pool,
    scopes: &'a mut ScopeTree,
    packages: &'a [PackageData],
    /// Import path → resolved package.
    imports: &'a FxHashMap<Name, Option<PackageId>>,
    pkg_path: Name,
    pkg_scope: ScopeId,
    files: &'a [&'a SourceFile],
    infos: Vec<FileInfo>,
    current: usize,
    names: WellKnown,
}

impl<'a> Checker<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        interner: &'a StringInterner,
        pool: &'a mut Pool,
        scopes: &'a mut ScopeTree,
        packages: &'a [PackageData],
        imports: &'a FxHashMap<Name, Option<PackageId>>,
        pkg_path: Name,
        pkg_scope: ScopeId,
        files: &'a [&'a SourceFile],
    ) -> Self {
        Checker {
            interner,
            pool,
            scopes,
            packages,
            imports,
            pkg_path,
            pkg_scope,
            files,
            infos: files.iter().map(|_| FileInfo::default()).collect(),
            current: 0,
            names: WellKnown {
                blank: interner.intern("_"),
                init: interner.intern("init"),
                dot: interner.intern("."),
            },
        }
    }

    #[inline]
    fn file(&self) -> &'a SourceFile {
        self.files[self.current]
    }

    #[inline]
    fn info(&mut self) -> &mut FileInfo {
        &mut self.infos[self.current]
    }

    #[inline]
    fn file_scope(&self) -> ScopeId {
        self.infos[self.current].scope
    }

    /// Run every phase and return one [`FileInfo`] per file.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(crate) fn check(mut self) -> Vec<FileInfo> {
        for index in 0..self.files.len() {
            self.current = index;
            self.declare_imports();
        }
        self.each_file(Self::collect_decls);
        self.each_file(Self::resolve_type_decls);
        self.each_file(Self::resolve_funcs);
        self.each_file(Self::check_package_values);
        self.each_file(Self::check_func_bodies);
        debug!(files = self.infos.len(), "package checked");
        self.infos
    }

    fn each_file(&mut self, mut phase: impl FnMut(&mut Self)) {
        for index in 0..self.files.len() {
            self.current = index;
            phase(self);
        }
    }

    fn declare_imports(&mut self) {
        let file = self.file();
        let scope = self.scopes.push(self.pkg_scope, ScopeKind::File, file.span);
        self.info().scope = scope;

        for spec in file.import_specs() {
            let pkg = self.imports.get(&spec.path).copied().flatten();
            let name = match spec.name {
                Some(alias) => alias.name,
                None => match pkg.and_then(|id| self.packages.get(id.index())) {
                    Some(data) => data.name,
                    None => {
                        let path = self.interner.lookup(spec.path);
                        self.interner.intern(path.rsplit('/').next().unwrap_or(path))
                    }
                },
            };
            if name == self.names.blank {
                continue;
            }
            if name == self.names.dot {
                if let Some(data) = pkg.and_then(|id| self.packages.get(id.index())) {
                    let members: Vec<(Name, Symbol)> = self
                        .scopes
                        .get(data.scope)
                        .map(|s| s.iter().map(|(n, sym)| (n, *sym)).collect())
                        .unwrap_or_default();
                    for (member, sym) in members {
                        self.scopes.insert(scope, member, sym);
                    }
                }
                continue;
            }
            let sym = Symbol::new(SymbolKind::Package(pkg), Idx::INVALID, 0);
            self.scopes.insert(scope, name, sym);
        }
    }

    fn declare_package(&mut self, name: Name, kind: SymbolKind, ty: Idx) {
        if name == self.names.blank {
            return;
        }
        if self
            .scopes
            .insert(self.pkg_scope, name, Symbol::new(kind, ty, 0))
            .is_some()
        {
            trace!(name = self.interner.lookup(name), "duplicate package-level name");
        }
    }

    fn collect_decls(&mut self) {
        for decl in &self.file().decls {
            match decl {
                Decl::Func(func) => {
                    if func.recv.is_none() && func.name.name != self.names.init {
                        self.declare_package(func.name.name, SymbolKind::Func, Idx::INVALID);
                    }
                }
                Decl::Gen(gen) => self.collect_gen(gen),
            }
        }
    }

    fn collect_gen(&mut self, gen: &GenDecl) {
        for spec in &gen.specs {
            match spec {
                Spec::Type(ts) => {
                    let ty = if ts.alias {
                        Idx::INVALID
                    } else {
                        self.pool.new_named(self.pkg_path, ts.name.name)
                    };
                    self.declare_package(ts.name.name, SymbolKind::Type, ty);
                }
                Spec::Value(vs) => {
                    let kind = if gen.keyword == DeclKeyword::Const {
                        SymbolKind::Const
                    } else {
                        SymbolKind::Var
                    };
                    for name in &vs.names {
                        self.declare_package(name.name, kind, Idx::INVALID);
                    }
                }
            }
        }
    }

    fn resolve_type_decls(&mut self) {
        let scope = self.file_scope();
        for decl in &self.file().decls {
            let Decl::Gen(gen) = decl else { continue };
            for spec in &gen.specs {
                let Spec::Type(ts) = spec else { continue };
                self.define_type(scope, self.pkg_scope, ts);
            }
        }
    }

    /// Resolve a type spec whose name is already declared in `decl_scope`.
    fn define_type(&mut self, scope: ScopeId, decl_scope: ScopeId, ts: &errfix_ir::ast::TypeSpec) {
        let resolved = self.resolve_type(scope, ts.ty);
        let Some(sym) = self.scopes.lookup_local(decl_scope, ts.name.name).copied() else {
            return;
        };
        if ts.alias {
            self.scopes.set_type(decl_scope, ts.name.name, resolved);
        } else if self.pool.named(sym.ty).is_some() {
            self.pool.set_underlying(sym.ty, resolved);
        }
    }

    fn resolve_funcs(&mut self) {
        let scope = self.file_scope();
        for decl in &self.file().decls {
            let Decl::Func(func) = decl else { continue };
            let sig = self.resolve_signature(scope, &func.sig);
            let sig = self.pool.func(sig);
            match &func.recv {
                None => {
                    if func.name.name != self.names.init {
                        self.scopes.set_type(self.pkg_scope, func.name.name, sig);
                    }
                }
                Some(recv) => {
                    let Some(field) = recv.fields.first() else { continue };
                    let (base, pointer_recv) = self.receiver_base(field.ty);
                    let Some(base) = base else { continue };
                    let named = self
                        .scopes
                        .lookup_local(self.pkg_scope, base)
                        .filter(|s| s.kind == SymbolKind::Type)
                        .map(|s| s.ty);
                    if let Some(named) = named {
                        self.pool.add_method(
                            named,
                            Method {
                                name: func.name.name,
                                sig,
                                pointer_recv,
                            },
                        );
                    }
                }
            }
        }
    }

    /// `T`, `*T` or `(*T)` → (`T`, pointer?).
    fn receiver_base(&self, ty: errfix_ir::TypeExprId) -> (Option<Name>, bool) {
        let arena = &self.file().arena;
        let mut ty = ty;
        let mut pointer = false;
        loop {
            match &arena.ty(ty).kind {
                TypeExprKind::Name(name) => return (Some(*name), pointer),
                TypeExprKind::Pointer(inner) => {
                    pointer = true;
                    ty = *inner;
                }
                TypeExprKind::Paren(inner) => ty = *inner,
                _ => return (None, pointer),
            }
        }
    }

    fn check_package_values(&mut self) {
        let scope = self.file_scope();
        for decl in &self.file().decls {
            let Decl::Gen(gen) = decl else { continue };
            if gen.keyword == DeclKeyword::Type {
                continue;
            }
            self.value_specs(scope, self.pkg_scope, gen, false);
        }
    }

    fn check_func_bodies(&mut self) {
        let file_scope = self.file_scope();
        for (index, decl) in self.file().decls.iter().enumerate() {
            let Decl::Func(func) = decl else { continue };
            let Some(body) = func.body else { continue };
            let scope = self.scopes.push(file_scope, ScopeKind::Func, func.span);
            self.declare_func_params(scope, func);
            let sig = self.routine_type(file_scope, func);
            self.info().routines.insert(RoutineId::Decl(index), RoutineInfo { scope, sig });
            self.info().block_scopes.insert(body, scope);
            self.stmt_list(scope, body);
        }
    }

    fn routine_type(&mut self, scope: ScopeId, func: &FuncDecl) -> Idx {
        let sig = self.resolve_signature(scope, &func.sig);
        self.pool.func(sig)
    }

    fn declare_func_params(&mut self, scope: ScopeId, func: &FuncDecl) {
        if let Some(recv) = &func.recv {
            self.declare_fields(scope, recv);
        }
        self.declare_fields(scope, &func.sig.params);
        if let Some(results) = &func.sig.results {
            self.declare_fields(scope, results);
        }
    }

    /// Declare named parameters or results, visible throughout the body.
    fn declare_fields(&mut self, scope: ScopeId, fields: &errfix_ir::ast::FieldList) {
        for field in &fields.fields {
            if field.names.is_empty() {
                continue;
            }
            let ty = self.resolve_type(scope, field.ty);
            for name in &field.names {
                if name.name != self.names.blank {
                    self.scopes
                        .insert(scope, name.name, Symbol::new(SymbolKind::Var, ty, 0));
                }
            }
        }
    }

    fn declare_local(&mut self, scope: ScopeId, name: Name, kind: SymbolKind, ty: Idx, pos: u32) -> bool {
        if name == self.names.blank {
            return false;
        }
        self.scopes
            .insert(scope, name, Symbol::new(kind, ty, pos))
            .is_none()
    }

    fn is_blank(&self, name: Name) -> bool {
        name == self.names.blank
    }
}

#[cfg(test)]
mod tests;
