//! Reading, parsing and checking the discovered packages.
//!
//! Files are parsed in parallel. Packages are then checked one at a time in
//! dependency order so that imports between project packages resolve. A
//! file that cannot be read or parsed is reported and left out; its
//! package is checked without it.

use std::fs;
use std::path::{Path, PathBuf};

use errfix_ir::{SharedInterner, SourceFile};
use errfix_types::{FileInfo, Program};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::discover::Project;
use crate::error::UnitError;

/// A checked file, ready to be rewritten.
pub struct SourceUnit {
    pub path: PathBuf,
    pub source: String,
    pub file: SourceFile,
    pub info: FileInfo,
}

pub struct LoadedProject {
    pub interner: SharedInterner,
    pub program: Program,
    /// In package check order, files in path order within a package.
    pub units: Vec<SourceUnit>,
    pub errors: Vec<UnitError>,
}

struct Parsed {
    path: PathBuf,
    source: String,
    file: SourceFile,
}

/// Files of one package clause in one directory.
struct Package {
    import_path: String,
    dir: PathBuf,
    files: Vec<Parsed>,
}

#[tracing::instrument(level = "debug", skip_all, fields(packages = project.packages.len()))]
pub fn load(project: &Project) -> LoadedProject {
    let interner = SharedInterner::new();
    let mut errors = Vec::new();
    let mut packages = Vec::new();

    for dir in &project.packages {
        let results: Vec<Result<Parsed, UnitError>> = dir
            .files
            .par_iter()
            .map(|path| parse_file(path, &interner))
            .collect();
        let mut parsed = Vec::new();
        for result in results {
            match result {
                Ok(file) => parsed.push(file),
                Err(e) => errors.push(e),
            }
        }
        packages.extend(split_packages(
            &dir.import_path,
            &dir.dir,
            parsed,
            &interner,
            &mut errors,
        ));
    }

    let order = check_order(&packages, &interner, &mut errors);
    let mut slots: Vec<Option<Package>> = packages.into_iter().map(Some).collect();
    let mut program = Program::new(interner.clone());
    let mut units = Vec::new();
    for index in order {
        let Some(package) = slots.get_mut(index).and_then(Option::take) else {
            continue;
        };
        let files: Vec<&SourceFile> = package.files.iter().map(|p| &p.file).collect();
        let checked = program.check_package(&package.import_path, &files);
        debug!(package = %package.import_path, files = files.len(), "checked");
        for (parsed, info) in package.files.into_iter().zip(checked.files) {
            units.push(SourceUnit {
                path: parsed.path,
                source: parsed.source,
                file: parsed.file,
                info,
            });
        }
    }

    LoadedProject {
        interner,
        program,
        units,
        errors,
    }
}

fn parse_file(path: &Path, interner: &SharedInterner) -> Result<Parsed, UnitError> {
    let source = fs::read_to_string(path).map_err(|source| UnitError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let output = errfix_parse::parse(&source, interner);
    match output.file {
        Some(file) if !output.has_errors() => Ok(Parsed {
            path: path.to_path_buf(),
            source,
            file,
        }),
        _ => Err(UnitError::Parse {
            path: path.to_path_buf(),
            source_text: source,
            diagnostics: output.diagnostics,
        }),
    }
}

/// Group the files of a directory by package clause. A directory holds one
/// package plus, optionally, its external test package `<name>_test`.
fn split_packages(
    import_path: &str,
    dir: &Path,
    files: Vec<Parsed>,
    interner: &SharedInterner,
    errors: &mut Vec<UnitError>,
) -> Vec<Package> {
    let name_of = |p: &Parsed| interner.lookup(p.file.package.name);
    let Some(base) = files
        .iter()
        .map(name_of)
        .find(|name| !name.ends_with("_test"))
        .or_else(|| files.first().map(name_of))
    else {
        return Vec::new();
    };
    let external = format!("{base}_test");

    let mut main = Vec::new();
    let mut tests = Vec::new();
    for file in files {
        let name = name_of(&file);
        if name == base {
            main.push(file);
        } else if name == external {
            tests.push(file);
        } else {
            errors.push(UnitError::PackageMismatch {
                path: file.path,
                found: name.to_string(),
                expected: base.to_string(),
            });
        }
    }

    let mut packages = vec![Package {
        import_path: import_path.to_string(),
        dir: dir.to_path_buf(),
        files: main,
    }];
    if !tests.is_empty() {
        packages.push(Package {
            import_path: format!("{import_path}_test"),
            dir: dir.to_path_buf(),
            files: tests,
        });
    }
    packages
}

/// Package indices with every project import before its importer. Cycles
/// are reported and broken at the edge that closes them.
fn check_order(
    packages: &[Package],
    interner: &SharedInterner,
    errors: &mut Vec<UnitError>,
) -> Vec<usize> {
    let by_path: FxHashMap<&str, usize> = packages
        .iter()
        .enumerate()
        .map(|(i, p)| (p.import_path.as_str(), i))
        .collect();
    let edges: Vec<Vec<usize>> = packages
        .iter()
        .map(|package| {
            let mut deps: Vec<usize> = package
                .files
                .iter()
                .flat_map(|p| p.file.import_specs())
                .filter_map(|spec| by_path.get(interner.lookup(spec.path)).copied())
                .collect();
            deps.sort_unstable();
            deps.dedup();
            deps
        })
        .collect();

    let mut order = Vec::with_capacity(packages.len());
    let mut state = vec![Visit::New; packages.len()];
    let mut stack = Vec::new();
    for start in 0..packages.len() {
        visit(start, &edges, &mut state, &mut stack, &mut order, &mut |cycle| {
            let names: Vec<&str> = cycle
                .iter()
                .map(|&i| packages[i].import_path.as_str())
                .collect();
            errors.push(UnitError::ImportCycle {
                path: packages[cycle[0]].dir.clone(),
                cycle: names.join(" -> "),
            });
        });
    }
    order
}

#[derive(Copy, Clone, Eq, PartialEq)]
enum Visit {
    New,
    Active,
    Done,
}

fn visit(
    node: usize,
    edges: &[Vec<usize>],
    state: &mut [Visit],
    stack: &mut Vec<usize>,
    order: &mut Vec<usize>,
    on_cycle: &mut dyn FnMut(&[usize]),
) {
    if state[node] != Visit::New {
        return;
    }
    state[node] = Visit::Active;
    stack.push(node);
    for &dep in &edges[node] {
        match state[dep] {
            Visit::New => visit(dep, edges, state, stack, order, on_cycle),
            Visit::Active => {
                let from = stack.iter().position(|&n| n == dep).unwrap_or(0);
                let mut cycle = stack[from..].to_vec();
                cycle.push(dep);
                on_cycle(&cycle);
            }
            Visit::Done => {}
        }
    }
    stack.pop();
    state[node] = Visit::Done;
    order.push(node);
}

#[cfg(test)]
mod tests;
