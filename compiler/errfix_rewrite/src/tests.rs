#![allow(clippy::unwrap_used, clippy::expect_used)]

use errfix_diagnostic::ErrorCode;
use errfix_ir::SharedInterner;
use errfix_types::{ErrorContract, Program};
use pretty_assertions::assert_eq;

use super::{RewriteConfig, RewriteEvent, RewriteOutcome, Rewriter};

fn fix_with(src: &str, config: &RewriteConfig) -> (String, RewriteOutcome) {
    let interner = SharedInterner::new();
    let mut file = errfix_parse::parse(src, &interner).file.expect("parses");
    let mut program = Program::new(interner.clone());
    let checked = program.check_package("example.com/p", &[&file]);
    let contract = ErrorContract::new(&interner);
    let rewriter = Rewriter::new(&program, &contract, config);
    let outcome = rewriter.rewrite(&mut file, &checked.files[0]);
    let out = errfix_fmt::format_file(&file, src, &interner).expect("formats");
    (out, outcome)
}

fn fix(src: &str) -> (String, RewriteOutcome) {
    fix_with(src, &RewriteConfig::default())
}

#[test]
fn test_discard_in_function_returning_error() {
    let (out, outcome) = fix(r#"package p

import "os"

func read(path string) ([]byte, error) {
	data, _ := os.ReadFile(path)
	return data, nil
}
"#);
    assert_eq!(
        out,
        r#"package p

import "os"

func read(path string) ([]byte, error) {
	data, err := os.ReadFile(path)
	if err != nil {
		return nil, err
	}
	return data, nil
}
"#
    );
    assert!(outcome.modified);
    assert!(outcome.diagnostics.is_empty());
    assert!(matches!(outcome.events[..], [RewriteEvent::DiscardedError(_)]));
}

#[test]
fn test_zero_values_follow_result_types() {
    let (out, _) = fix(r#"package p

import "strconv"

type Point struct {
	X, Y int
}

func parse(s string) (int, string, bool, *Point, Point, error) {
	n, _ := strconv.Atoi(s)
	return n, s, true, nil, Point{}, nil
}
"#);
    assert_eq!(
        out,
        r#"package p

import "strconv"

type Point struct {
	X, Y int
}

func parse(s string) (int, string, bool, *Point, Point, error) {
	n, err := strconv.Atoi(s)
	if err != nil {
		return 0, "", false, nil, Point{}, err
	}
	return n, s, true, nil, Point{}, nil
}
"#
    );
}

#[test]
fn test_function_without_error_result_is_left_alone() {
    let src = r#"package p

import "os"

func cleanup() {
	_ = os.Remove("tmp")
}

func main() {
	f, _ := os.Open("x")
	_ = f
}
"#;
    let (out, outcome) = fix(src);
    assert_eq!(out, src);
    assert!(!outcome.modified);
    // skipped discards are warned about, not reported as found
    assert!(outcome.events.is_empty());
    assert_eq!(outcome.diagnostics.len(), 2);
    for diagnostic in &outcome.diagnostics {
        assert_eq!(diagnostic.code, ErrorCode::W3001);
        let span = diagnostic.labels[0].span;
        assert_eq!(&src[span.start as usize..span.end as usize], "_");
    }
    assert!(outcome.diagnostics[0].notes[0].contains("`cleanup`"));
}

#[test]
fn test_later_define_is_demoted() {
    let (out, outcome) = fix(r#"package p

import "os"

func load(path string) (string, error) {
	body, _ := os.ReadFile(path)
	err := os.Remove(path)
	return string(body), err
}
"#);
    assert_eq!(
        out,
        r#"package p

import "os"

func load(path string) (string, error) {
	body, err := os.ReadFile(path)
	if err != nil {
		return "", err
	}
	err = os.Remove(path)
	return string(body), err
}
"#
    );
    assert!(matches!(
        outcome.events[..],
        [RewriteEvent::DiscardedError(_), RewriteEvent::Demoted(_)]
    ));
}

#[test]
fn test_main_calls_fatal_and_imports_log_once() {
    let (out, _) = fix(r#"package main

import (
	"fmt"
	"os"
)

func main() {
	f, _ := os.Open("a.txt")
	defer f.Close()
	n, _ := fmt.Println("hi")
	_ = n
}
"#);
    assert_eq!(
        out,
        r#"package main

import (
	"fmt"
	"log"
	"os"
)

func main() {
	f, err := os.Open("a.txt")
	if err != nil {
		log.Fatalf("error: %v", err)
	}
	defer f.Close()
	n, err := fmt.Println("hi")
	if err != nil {
		log.Fatalf("error: %v", err)
	}
	_ = n
}
"#
    );
}

#[test]
fn test_plain_discards_define_then_assign() {
    let (out, _) = fix(r#"package p

import "os"

func clean() error {
	_ = os.Remove("a")
	_ = os.Remove("b")
	return nil
}
"#);
    assert_eq!(
        out,
        r#"package p

import "os"

func clean() error {
	err := os.Remove("a")
	if err != nil {
		return err
	}
	err = os.Remove("b")
	if err != nil {
		return err
	}
	return nil
}
"#
    );
}

#[test]
fn test_assignment_is_promoted_when_targets_are_local() {
    let (out, _) = fix(r#"package p

import "os"

func write(path string) error {
	var f *os.File
	f, _ = os.Create(path)
	return f.Close()
}
"#);
    assert_eq!(
        out,
        r#"package p

import "os"

func write(path string) error {
	var f *os.File
	f, err := os.Create(path)
	if err != nil {
		return err
	}
	return f.Close()
}
"#
    );
}

#[test]
fn test_outer_target_gets_declared_error() {
    let (out, _) = fix(r#"package p

import "strconv"

func count(path string) (int, error) {
	var n int
	if path != "" {
		n, _ = strconv.Atoi(path)
	}
	return n, nil
}
"#);
    assert_eq!(
        out,
        r#"package p

import "strconv"

func count(path string) (int, error) {
	var n int
	if path != "" {
		var err error
		n, err = strconv.Atoi(path)
		if err != nil {
			return 0, err
		}
	}
	return n, nil
}
"#
    );
}

#[test]
fn test_existing_error_is_reused() {
    let (out, _) = fix(r#"package p

import "os"

func run() error {
	err := os.Chdir("/")
	if err != nil {
		return err
	}
	data, _ := os.ReadFile("x")
	_ = data
	return nil
}
"#);
    assert!(out.contains("\tdata, err := os.ReadFile(\"x\")\n\tif err != nil {\n\t\treturn err\n\t}\n"));
    assert!(out.contains("\terr := os.Chdir(\"/\")\n"));
}

#[test]
fn test_function_literal_returns_its_own_error() {
    let (out, _) = fix(r#"package p

import "os"

func start() {
	check := func(path string) error {
		_, _ = os.Stat(path)
		return nil
	}
	_ = check("x")
}
"#);
    assert_eq!(
        out,
        r#"package p

import "os"

func start() {
	check := func(path string) error {
		_, err := os.Stat(path)
		if err != nil {
			return err
		}
		return nil
	}
	_ = check("x")
}
"#
    );
}

#[test]
fn test_configured_names() {
    let config = RewriteConfig {
        err_name: "e".to_string(),
        fatal_format: "fatal: %v".to_string(),
        ..RewriteConfig::default()
    };
    let (out, _) = fix_with(
        r#"package main

import "os"

func main() {
	_ = os.Chdir("/")
}
"#,
        &config,
    );
    assert_eq!(
        out,
        r#"package main

import (
	"log"
	"os"
)

func main() {
	e := os.Chdir("/")
	if e != nil {
		log.Fatalf("fatal: %v", e)
	}
}
"#
    );
}

#[test]
fn test_rewrite_is_idempotent() {
    let (once, _) = fix(r#"package main

import "os"

func main() {
	f, _ := os.Open("a")
	defer f.Close()
	_ = os.Remove("b")
}
"#);
    let (twice, outcome) = fix(&once);
    assert_eq!(twice, once);
    assert!(!outcome.modified);
    assert!(outcome.events.is_empty());
}

#[test]
fn test_labeled_discard_is_rewritten() {
    let (out, outcome) = fix(r#"package p

import "os"

func retry() error {
L:
	_ = os.Remove("a")
	goto L
}
"#);
    assert_eq!(
        out,
        r#"package p

import "os"

func retry() error {
L:
	err := os.Remove("a")
	if err != nil {
		return err
	}
	goto L
}
"#
    );
    assert!(matches!(outcome.events[..], [RewriteEvent::DiscardedError(_)]));
}

#[test]
fn test_labeled_discard_without_error_result_warns() {
    let src = r#"package p

import "os"

func spin() {
L:
	_ = os.Remove("a")
	goto L
}
"#;
    let (out, outcome) = fix(src);
    assert_eq!(out, src);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].code, ErrorCode::W3001);
}

#[test]
fn test_local_log_forces_import_alias() {
    let (out, _) = fix(r#"package main

import "os"

func main() {
	log := 3
	_ = log
	_ = os.Remove("a")
}
"#);
    assert_eq!(
        out,
        r#"package main

import (
	stdlog "log"
	"os"
)

func main() {
	log := 3
	_ = log
	err := os.Remove("a")
	if err != nil {
		stdlog.Fatalf("error: %v", err)
	}
}
"#
    );
}
