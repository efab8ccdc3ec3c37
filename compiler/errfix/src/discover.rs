//! Finding the Go packages to process.
//!
//! Directories are walked recursively. Hidden directories, `_`-prefixed
//! ones, `vendor` and `testdata` are skipped the way the go tool skips them.
//! Every directory holding `.go` files is one package; its import path is
//! derived from the module path in the nearest `go.mod`.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::LoadError;

/// The `.go` files of one directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageDir {
    pub dir: PathBuf,
    pub import_path: String,
    pub files: Vec<PathBuf>,
}

#[derive(Clone, Debug, Default)]
pub struct Project {
    /// Module path from `go.mod`, if one was found.
    pub module: Option<String>,
    /// Directory holding `go.mod`, or the first input directory.
    pub root: PathBuf,
    pub packages: Vec<PackageDir>,
}

impl Project {
    pub fn file_count(&self) -> usize {
        self.packages.iter().map(|p| p.files.len()).sum()
    }
}

/// Collect the packages under `paths`.
///
/// # Errors
///
/// Fails only when an input path itself cannot be read.
pub fn discover(paths: &[PathBuf], include_tests: bool) -> Result<Project, LoadError> {
    let mut by_dir: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for path in paths {
        let meta = fs::metadata(path).map_err(|source| LoadError::Unreadable {
            path: path.clone(),
            source,
        })?;
        if meta.is_dir() {
            walk(path, include_tests, &mut by_dir).map_err(|source| LoadError::Unreadable {
                path: path.clone(),
                source,
            })?;
        } else if path.extension().is_some_and(|ext| ext == "go") {
            let dir = path.parent().map_or_else(|| PathBuf::from("."), dir_or_dot);
            by_dir.entry(dir).or_default().push(path.clone());
        } else {
            return Err(LoadError::NotGo { path: path.clone() });
        }
    }

    let start = paths.first().map_or_else(|| PathBuf::from("."), Clone::clone);
    let start_dir = if start.is_dir() {
        start
    } else {
        start.parent().map_or_else(|| PathBuf::from("."), dir_or_dot)
    };
    let (root, module) = find_module(&start_dir).unwrap_or((absolute(&start_dir), None));
    debug!(root = %root.display(), module = ?module, "project root");

    let packages = by_dir
        .into_iter()
        .map(|(dir, mut files)| {
            files.sort();
            files.dedup();
            let import_path = import_path(&root, module.as_deref(), &dir);
            PackageDir {
                dir,
                import_path,
                files,
            }
        })
        .collect();
    Ok(Project {
        module,
        root,
        packages,
    })
}

fn dir_or_dot(dir: &Path) -> PathBuf {
    if dir.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        dir.to_path_buf()
    }
}

fn walk(
    dir: &Path,
    include_tests: bool,
    out: &mut BTreeMap<PathBuf, Vec<PathBuf>>,
) -> io::Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.flatten().map(|e| e.path()).collect();
    entries.sort();
    for path in entries {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }
        if path.is_dir() {
            if name == "vendor" || name == "testdata" {
                continue;
            }
            if let Err(e) = walk(&path, include_tests, out) {
                warn!(dir = %path.display(), error = %e, "skipping unreadable directory");
            }
        } else if is_source_file(name, include_tests) {
            out.entry(dir.to_path_buf()).or_default().push(path);
        }
    }
    Ok(())
}

fn is_source_file(name: &str, include_tests: bool) -> bool {
    name.ends_with(".go") && (include_tests || !name.ends_with("_test.go"))
}

fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Nearest `go.mod` at or above `dir`, with its module path.
fn find_module(dir: &Path) -> Option<(PathBuf, Option<String>)> {
    let mut current = Some(absolute(dir));
    while let Some(candidate) = current {
        let go_mod = candidate.join("go.mod");
        if let Ok(contents) = fs::read_to_string(&go_mod) {
            return Some((candidate, module_path(&contents)));
        }
        current = candidate.parent().map(Path::to_path_buf);
    }
    None
}

/// The path declared by the `module` directive.
pub fn module_path(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let path = rest.trim().trim_matches('"');
        (!path.is_empty()).then(|| path.to_string())
    })
}

fn import_path(root: &Path, module: Option<&str>, dir: &Path) -> String {
    let abs = absolute(dir);
    let rel: Vec<String> = abs
        .strip_prefix(root)
        .map(|rel| {
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    match (module, rel.is_empty()) {
        (Some(module), true) => module.to_string(),
        (Some(module), false) => format!("{module}/{}", rel.join("/")),
        (None, true) => abs
            .file_name()
            .map_or_else(|| "main".to_string(), |n| n.to_string_lossy().into_owned()),
        (None, false) => rel.join("/"),
    }
}

#[cfg(test)]
mod tests;
