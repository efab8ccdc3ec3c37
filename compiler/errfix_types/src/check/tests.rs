#![allow(clippy::unwrap_used, clippy::expect_used)]

use errfix_ir::ast::{ExprKind, StmtKind};
use errfix_ir::{ExprId, SharedInterner, SourceFile, StmtId};
use pretty_assertions::assert_eq;

use crate::{FileInfo, Idx, Program, RoutineId, ScopeKind};

struct Checked {
    src: &'static str,
    program: Program,
    file: SourceFile,
    info: FileInfo,
}

impl Checked {
    fn new(src: &'static str) -> Self {
        let interner = SharedInterner::new();
        let file = errfix_parse::parse(src, &interner).file.expect("parses");
        let mut program = Program::new(interner);
        let mut checked = program.check_package("example.com/app", &[&file]);
        let info = checked.files.remove(0);
        Checked {
            src,
            program,
            file,
            info,
        }
    }

    fn text(&self, span: errfix_ir::Span) -> &str {
        &self.src[span.to_range()]
    }

    fn call(&self, text: &str) -> ExprId {
        *self
            .info
            .call_types
            .keys()
            .find(|id| self.text(self.file.arena.expr(**id).span) == text)
            .unwrap_or_else(|| panic!("no call `{text}`"))
    }

    fn call_type(&self, text: &str) -> String {
        let ty = self.info.call_type(self.call(text));
        self.program.pool().display(ty, self.program.interner())
    }

    fn stmt(&self, text: &str) -> StmtId {
        (0..self.file.arena.stmt_count())
            .map(|i| StmtId::new(i as u32))
            .find(|id| self.text(self.file.arena.stmt(*id).span) == text)
            .unwrap_or_else(|| panic!("no statement `{text}`"))
    }

    fn defined(&self, text: &str) -> Vec<&str> {
        let stmt = self.stmt(text);
        self.info
            .defines
            .get(&stmt)
            .map(|names| {
                names
                    .iter()
                    .map(|n| self.program.interner().lookup(*n))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[test]
fn test_library_call_types() {
    let checked = Checked::new(
        r#"package main

import (
	"os"
	"strconv"
)

func main() {
	n, _ := strconv.Atoi("1")
	f, _ := os.Open("x")
	_ = f.Close()
	_ = n
}
"#,
    );
    assert_eq!(checked.call_type(r#"strconv.Atoi("1")"#), "(int, error)");
    assert_eq!(checked.call_type(r#"os.Open("x")"#), "(*os.File, error)");
    assert_eq!(checked.call_type("f.Close()"), "error");
}

#[test]
fn test_user_methods_and_functions() {
    let checked = Checked::new(
        r#"package main

type Store struct {
	items map[string][]byte
}

func (s *Store) Load(key string) ([]byte, error) {
	return s.items[key], nil
}

func open() *Store {
	return &Store{}
}

func run() {
	s := open()
	data, _ := s.Load("k")
	_ = data
}
"#,
    );
    assert_eq!(checked.call_type("open()"), "*app.Store");
    assert_eq!(checked.call_type(r#"s.Load("k")"#), "([]uint8, error)");
}

#[test]
fn test_defines_only_new_names() {
    let checked = Checked::new(
        r#"package main

func two() (int, error) { return 0, nil }

func run() {
	x, err := two()
	y, err := two()
	_, _ = x, y
	_ = err
}
"#,
    );
    assert_eq!(checked.defined("x, err := two()"), vec!["x", "err"]);
    assert_eq!(checked.defined("y, err := two()"), vec!["y"]);
}

#[test]
fn test_block_scopes_nest() {
    let checked = Checked::new(
        r#"package main

func run(ok bool) {
	if ok {
		x := 1
		_ = x
	}
}
"#,
    );
    let scopes = checked.program.scopes();
    let routine = checked.info.routine(RoutineId::Decl(0)).unwrap();
    let StmtKind::If { then, .. } = checked.file.arena.stmt(checked.stmt("if ok {\n\t\tx := 1\n\t\t_ = x\n\t}")).kind
    else {
        panic!("expected if");
    };
    let then_scope = checked.info.block_scope(then).unwrap();
    assert_eq!(scopes.kind(then_scope), Some(ScopeKind::Block));
    assert!(scopes.is_ancestor(routine.scope, then_scope));
    assert_ne!(routine.scope, then_scope);
}

#[test]
fn test_function_literals_are_routines() {
    let checked = Checked::new(
        r#"package main

import "os"

func run() {
	cleanup := func() error {
		return os.Remove("x")
	}
	_ = cleanup
}
"#,
    );
    let lit = (0..checked.file.arena.expr_count())
        .map(|i| ExprId::new(i as u32))
        .find(|id| matches!(checked.file.arena.expr(*id).kind, ExprKind::FuncLit { .. }))
        .unwrap();
    let routine = checked.info.routine(RoutineId::Lit(lit)).unwrap();
    let pool = checked.program.pool();
    assert_eq!(pool.display(routine.sig, checked.program.interner()), "func() error");
    assert_eq!(checked.program.scopes().kind(routine.scope), Some(ScopeKind::Func));
    assert_eq!(checked.call_type(r#"os.Remove("x")"#), "error");
}

#[test]
fn test_unknown_imports_stay_unresolved() {
    let checked = Checked::new(
        r#"package main

import "github.com/acme/widgets"

func run() {
	w, _ := widgets.Build()
	_ = w
}
"#,
    );
    assert_eq!(checked.info.call_type(checked.call("widgets.Build()")), Idx::INVALID);
}

#[test]
fn test_comma_ok_forms_are_not_calls() {
    let checked = Checked::new(
        r#"package main

func run(m map[string]int, v any) {
	n, ok := m["a"]
	s, ok2 := v.(string)
	_, _, _, _ = n, ok, s, ok2
}
"#,
    );
    assert!(checked.info.call_types.is_empty());
    assert_eq!(checked.defined(r#"n, ok := m["a"]"#), vec!["n", "ok"]);
}

#[test]
fn test_local_is_invisible_before_declaration() {
    let checked = Checked::new(
        r#"package main

import "os"

func run() {
	f, _ := os.Open("a")
	err := f.Close()
	_ = err
}
"#,
    );
    let scopes = checked.program.scopes();
    let routine = checked.info.routine(RoutineId::Decl(0)).unwrap();
    let err = checked.program.interner().intern("err");
    let open = checked.file.arena.stmt(checked.stmt(r#"f, _ := os.Open("a")"#)).span;
    let close = checked.file.arena.stmt(checked.stmt("err := f.Close()")).span;

    assert!(scopes.lookup_parent(routine.scope, err, open.end).is_none());
    let (_, sym) = scopes.lookup_parent(routine.scope, err, close.end).unwrap();
    assert_eq!(sym.ty, Idx::ERROR);
}

#[test]
fn test_named_results_are_in_the_routine_scope() {
    let checked = Checked::new(
        r#"package main

func run() (n int, err error) {
	return
}
"#,
    );
    let routine = checked.info.routine(RoutineId::Decl(0)).unwrap();
    let err = checked.program.interner().intern("err");
    let (scope, sym) = checked.program.scopes().lookup_parent(routine.scope, err, 0).unwrap();
    assert_eq!(scope, routine.scope);
    assert_eq!(sym.ty, Idx::ERROR);
}
