#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

use super::{discover, module_path};
use crate::error::LoadError;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "package x\n").unwrap();
}

#[test]
fn test_module_path() {
    assert_eq!(
        module_path("// header\nmodule example.com/app // trailing\n\ngo 1.21\n"),
        Some("example.com/app".to_string())
    );
    assert_eq!(module_path("module \"example.com/q\"\n"), Some("example.com/q".to_string()));
    assert_eq!(module_path("modules x\n"), None);
    assert_eq!(module_path("go 1.21\n"), None);
}

#[test]
fn test_walk_skips_ignored_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    fs::write(root.join("go.mod"), "module example.com/app\n").unwrap();
    touch(root, "main.go");
    touch(root, "main_test.go");
    touch(root, "internal/store/store.go");
    touch(root, "vendor/dep/dep.go");
    touch(root, "testdata/fixture.go");
    touch(root, ".git/hooks.go");
    touch(root, "_scratch/old.go");
    touch(root, "README.md");

    let project = discover(&[root.to_path_buf()], false).unwrap();
    assert_eq!(project.module.as_deref(), Some("example.com/app"));
    let found: Vec<(String, usize)> = project
        .packages
        .iter()
        .map(|p| (p.import_path.clone(), p.files.len()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("example.com/app".to_string(), 1),
            ("example.com/app/internal/store".to_string(), 1),
        ]
    );

    let with_tests = discover(&[root.to_path_buf()], true).unwrap();
    assert_eq!(with_tests.file_count(), 3);
}

#[test]
fn test_single_file_uses_enclosing_module() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    fs::write(root.join("go.mod"), "module example.com/app\n").unwrap();
    touch(root, "cmd/tool/main.go");

    let project = discover(&[root.join("cmd/tool/main.go")], false).unwrap();
    assert_eq!(project.packages.len(), 1);
    assert_eq!(project.packages[0].import_path, "example.com/app/cmd/tool");
}

#[test]
fn test_unreadable_input_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("missing");
    assert!(matches!(
        discover(&[missing], false),
        Err(LoadError::Unreadable { .. })
    ));

    let notes = tmp.path().join("notes.txt");
    fs::write(&notes, "hi").unwrap();
    assert!(matches!(discover(&[notes], false), Err(LoadError::NotGo { .. })));
}
