#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;

use errfix_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

use super::load;
use crate::discover::discover;

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn file_names(loaded: &super::LoadedProject) -> Vec<String> {
    loaded
        .units
        .iter()
        .map(|u| u.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_imported_packages_are_checked_first() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "go.mod", "module example.com/app\n");
    write(
        root,
        "a_main.go",
        "package main\n\nimport \"example.com/app/zstore\"\n\nfunc main() {\n\tzstore.Open()\n}\n",
    );
    write(
        root,
        "zstore/store.go",
        "package zstore\n\nfunc Open() (int, error) { return 0, nil }\n",
    );

    let project = discover(&[root.to_path_buf()], false).unwrap();
    let loaded = load(&project);
    assert!(loaded.errors.is_empty());
    assert_eq!(file_names(&loaded), vec!["store.go", "a_main.go"]);
}

#[test]
fn test_broken_files_are_reported_and_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "go.mod", "module example.com/app\n");
    write(root, "ok.go", "package app\n\nfunc F() {}\n");
    write(root, "broken.go", "package app\n\nfunc G( {\n");
    write(root, "other.go", "package other\n");
    write(root, "generic.go", "package app\n\nfunc Map[T any](x T) T { return x }\n");

    let project = discover(&[root.to_path_buf()], false).unwrap();
    let loaded = load(&project);
    assert_eq!(file_names(&loaded), vec!["ok.go"]);
    let codes: Vec<ErrorCode> = loaded.errors.iter().map(|e| e.code()).collect();
    assert_eq!(codes.len(), 3);
    assert!(codes.contains(&ErrorCode::E2002));
    assert!(codes.contains(&ErrorCode::E1006));
}

#[test]
fn test_external_test_package_is_separate() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "go.mod", "module example.com/lib\n");
    write(root, "lib.go", "package lib\n\nfunc Do() error { return nil }\n");
    write(
        root,
        "lib_test.go",
        "package lib_test\n\nimport \"example.com/lib\"\n\nfunc check() error {\n\treturn lib.Do()\n}\n",
    );

    let project = discover(&[root.to_path_buf()], true).unwrap();
    let loaded = load(&project);
    assert!(loaded.errors.is_empty());
    assert_eq!(file_names(&loaded), vec!["lib.go", "lib_test.go"]);
}

#[test]
fn test_import_cycle_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "go.mod", "module example.com/c\n");
    write(root, "a/a.go", "package a\n\nimport \"example.com/c/b\"\n\nvar X = b.Y\n");
    write(root, "b/b.go", "package b\n\nimport \"example.com/c/a\"\n\nvar Y = a.X\n");

    let project = discover(&[root.to_path_buf()], false).unwrap();
    let loaded = load(&project);
    assert_eq!(loaded.units.len(), 2);
    assert_eq!(loaded.errors.len(), 1);
    assert_eq!(loaded.errors[0].code(), ErrorCode::E2003);
    assert!(loaded.errors[0].to_string().contains("example.com/c/a"));
}
