#![allow(clippy::unwrap_used, clippy::expect_used)]

use errfix_ir::ast::ExprKind;
use errfix_ir::{ExprId, SharedInterner, SourceFile};
use errfix_types::{ErrorContract, FileInfo, Idx, Program};
use pretty_assertions::assert_eq;

fn parse(src: &str, interner: &SharedInterner) -> SourceFile {
    errfix_parse::parse(src, interner).file.expect("parses")
}

fn call_types(program: &Program, file: &SourceFile, info: &FileInfo) -> Vec<String> {
    let mut calls: Vec<ExprId> = info.call_types.keys().copied().collect();
    calls.sort();
    calls
        .into_iter()
        .filter(|id| matches!(file.arena.expr(*id).kind, ExprKind::Call { .. }))
        .map(|id| program.pool().display(info.call_type(id), program.interner()))
        .collect()
}

#[test]
fn test_project_packages_resolve_across_imports() {
    let interner = SharedInterner::new();
    let store = parse(
        r#"package store

import "errors"

var ErrMissing = errors.New("missing")

type NotFound struct {
	Key string
}

func (e *NotFound) Error() string { return e.Key }

func Get(key string) (string, *NotFound) {
	return "", nil
}
"#,
        &interner,
    );
    let app = parse(
        r#"package main

import "example.com/app/store"

func main() {
	v, _ := store.Get("k")
	_ = v
}
"#,
        &interner,
    );

    let mut program = Program::new(interner.clone());
    let store_pkg = program.check_package("example.com/app/store", &[&store]);
    let app_pkg = program.check_package("example.com/app", &[&app]);

    assert_eq!(program.package_by_path("example.com/app/store"), Some(store_pkg.id));
    let data = program.package(store_pkg.id).unwrap();
    assert_eq!(program.interner().lookup(data.name), "store");

    let types = call_types(&program, &app, &app_pkg.files[0]);
    assert_eq!(types, vec!["(string, *store.NotFound)".to_string()]);

    // `*NotFound` has `Error() string`, so it is error-like.
    let contract = ErrorContract::new(program.interner());
    let info = &app_pkg.files[0];
    let call = *info.call_types.keys().next().unwrap();
    let results = program.pool().values(info.call_type(call));
    assert!(!contract.is_error_like(program.pool(), results[0]));
    assert!(contract.is_error_like(program.pool(), results[1]));
}

#[test]
fn test_multiple_files_share_package_scope() {
    let interner = SharedInterner::new();
    let a = parse(
        r#"package tools

import "os"

func helper() (*os.File, error) {
	return os.Open("a")
}
"#,
        &interner,
    );
    let b = parse(
        r#"package tools

func use() {
	f, _ := helper()
	_ = f
}
"#,
        &interner,
    );

    let mut program = Program::new(interner);
    let checked = program.check_package("example.com/tools", &[&a, &b]);
    assert_eq!(checked.files.len(), 2);
    assert_eq!(
        call_types(&program, &b, &checked.files[1]),
        vec!["(*os.File, error)".to_string()]
    );
}

#[test]
fn test_stub_packages_load_once() {
    let interner = SharedInterner::new();
    let first = parse("package a\n\nimport \"bufio\"\n\nvar r *bufio.Reader\n", &interner);
    let second = parse("package b\n\nimport \"bufio\"\n\nvar w *bufio.Writer\n", &interner);

    let mut program = Program::new(interner);
    program.check_package("example.com/a", &[&first]);
    let bufio = program.package_by_path("bufio").unwrap();
    let io = program.package_by_path("io").unwrap();
    program.check_package("example.com/b", &[&second]);

    assert_eq!(program.package_by_path("bufio"), Some(bufio));
    assert_ne!(bufio, io);
}

#[test]
fn test_unresolved_results_are_invalid() {
    let interner = SharedInterner::new();
    let file = parse(
        r#"package main

func main() {
	x, _ := missing()
	_ = x
}
"#,
        &interner,
    );
    let mut program = Program::new(interner);
    let checked = program.check_package("example.com/app", &[&file]);
    let info = &checked.files[0];
    let call = *info.call_types.keys().next().unwrap();
    assert_eq!(info.call_type(call), Idx::INVALID);
}
