//! Adding an import.

use errfix_ir::ast::{Decl, Ident, ImportDecl, ImportSpec, Spec};
use errfix_ir::{Name, SourceFile, Span, StringInterner};

/// Make the package at `path` available in `file` and return the name to
/// refer to it by.
///
/// An existing usable import is reused. Otherwise a new spec is added to
/// the first import declaration (kept in path order) or, without one, a new
/// declaration is created. When the default package name is already taken
/// in the file, or `hidden` reports it shadowed where it will be used, the
/// import is named `alias` (then `alias2`, `alias3`, ...).
pub fn ensure_import(
    file: &mut SourceFile,
    interner: &StringInterner,
    path: &str,
    alias: &str,
    hidden: impl Fn(Name) -> bool,
) -> Name {
    let path_name = interner.intern(path);
    let default = interner.intern(default_name(path));

    let mut taken = Vec::new();
    for spec in file.import_specs() {
        let local = spec
            .name
            .map_or_else(|| interner.intern(default_name(interner.lookup(spec.path))), |n| n.name);
        let usable = !matches!(interner.lookup(local), "_" | ".");
        if spec.path == path_name && usable && !hidden(local) {
            return local;
        }
        taken.push(local);
    }
    taken.extend(top_level_names(file));

    let free = |name: &Name| !taken.contains(name) && !hidden(*name);
    let name = if free(&default) {
        None
    } else {
        let local = std::iter::once(interner.intern(alias))
            .chain((2..).map(|n| interner.intern(&format!("{alias}{n}"))))
            .find(free)
            .unwrap_or(default);
        Some(Ident::synthetic(local))
    };
    let local = name.map_or(default, |n| n.name);
    let spec = ImportSpec {
        name,
        path: path_name,
        span: Span::DUMMY,
    };

    match file.imports.first_mut() {
        Some(decl) => {
            let at = decl
                .specs
                .iter()
                .position(|s| interner.lookup(s.path) > path)
                .unwrap_or(decl.specs.len());
            decl.specs.insert(at, spec);
            decl.grouped = true;
        }
        None => file.imports.push(ImportDecl {
            specs: vec![spec],
            grouped: false,
            span: Span::DUMMY,
        }),
    }
    tracing::debug!(path, local = interner.lookup(local), "added import");
    local
}

/// Last element of an import path.
fn default_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn top_level_names(file: &SourceFile) -> Vec<Name> {
    let mut names = Vec::new();
    for decl in &file.decls {
        match decl {
            Decl::Func(func) if func.recv.is_none() => names.push(func.name.name),
            Decl::Func(_) => {}
            Decl::Gen(gen) => {
                for spec in &gen.specs {
                    match spec {
                        Spec::Value(spec) => names.extend(spec.names.iter().map(|n| n.name)),
                        Spec::Type(spec) => names.push(spec.name.name),
                    }
                }
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use errfix_ir::SharedInterner;
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(src: &str, times: usize) -> (String, Vec<String>) {
        let interner = SharedInterner::new();
        let mut file = errfix_parse::parse(src, &interner).file.expect("parses");
        let mut locals = Vec::new();
        for _ in 0..times {
            let local = ensure_import(&mut file, &interner, "log", "stdlog", |_| false);
            locals.push(interner.lookup(local).to_string());
        }
        let out = errfix_fmt::format_file(&file, src, &interner).unwrap();
        (out, locals)
    }

    #[test]
    fn test_new_declaration_after_package() {
        let (out, locals) = render("package main\n\nfunc main() {\n}\n", 2);
        assert_eq!(out, "package main\n\nimport \"log\"\n\nfunc main() {\n}\n");
        assert_eq!(locals, vec!["log", "log"]);
    }

    #[test]
    fn test_single_import_becomes_group() {
        let (out, _) = render("package main\n\nimport \"os\"\n\nfunc main() {\n}\n", 1);
        assert_eq!(
            out,
            "package main\n\nimport (\n\t\"log\"\n\t\"os\"\n)\n\nfunc main() {\n}\n"
        );
    }

    #[test]
    fn test_existing_import_is_reused() {
        let src = "package main\n\nimport (\n\t\"fmt\"\n\tl \"log\"\n)\n\nfunc main() {\n}\n";
        let (out, locals) = render(src, 1);
        assert_eq!(out, src);
        assert_eq!(locals, vec!["l"]);
    }

    #[test]
    fn test_hidden_names_are_skipped() {
        let interner = SharedInterner::new();
        let src = "package main\n\nimport \"log\"\n\nfunc main() {\n}\n";
        let mut file = errfix_parse::parse(src, &interner).file.expect("parses");
        let hidden = [interner.intern("log"), interner.intern("stdlog")];
        let local = ensure_import(&mut file, &interner, "log", "stdlog", |n| hidden.contains(&n));
        assert_eq!(interner.lookup(local), "stdlog2");
        let out = errfix_fmt::format_file(&file, src, &interner).unwrap();
        assert_eq!(
            out,
            "package main\n\nimport (\n\t\"log\"\n\tstdlog2 \"log\"\n)\n\nfunc main() {\n}\n"
        );
    }

    #[test]
    fn test_conflicting_name_gets_alias() {
        let (out, locals) = render(
            "package main\n\nimport log \"example.com/logging\"\n\nfunc main() {\n}\n",
            1,
        );
        assert_eq!(locals, vec!["stdlog"]);
        assert_eq!(
            out,
            "package main\n\nimport (\n\tlog \"example.com/logging\"\n\tstdlog \"log\"\n)\n\nfunc main() {\n}\n"
        );
    }
}
