#![allow(clippy::unwrap_used, clippy::expect_used)]

use errfix_ir::ast::{Decl, Stmt, StmtKind};
use errfix_ir::{SharedInterner, SourceFile, StmtId};
use pretty_assertions::assert_eq;

use crate::{format_file, FormatError};

fn parse(src: &str, interner: &SharedInterner) -> SourceFile {
    let output = errfix_parse::parse(src, interner);
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    output.file.expect("parses")
}

fn format(src: &str) -> String {
    let interner = SharedInterner::new();
    let file = parse(src, &interner);
    format_file(&file, src, &interner).unwrap()
}

/// Already formatted input comes back unchanged.
fn assert_stable(src: &str) {
    assert_eq!(format(src), src);
}

#[test]
fn test_imports_and_blocks() {
    assert_stable(
        r#"package main

import (
	"fmt"
	"os"
)

func main() {
	f, err := os.Open("x")
	if err != nil {
		fmt.Println(err)
		return
	}
	defer f.Close()
}
"#,
    );
}

#[test]
fn test_normalizes_spacing_and_indentation() {
    let src = "package main\nfunc  f( ) {\nx:=1\n  _ = x\n}\n";
    assert_eq!(format(src), "package main\n\nfunc f() {\n\tx := 1\n\t_ = x\n}\n");
}

#[test]
fn test_struct_fields_align() {
    assert_stable(
        r#"package store

type Item struct {
	ID    int    `json:"id"`
	Name  string `json:"name"`
	Count int
}
"#,
    );
}

#[test]
fn test_grouped_constants_align_values_and_comments() {
    assert_stable(
        "package main\n\nconst (\n\tA    = 1\n\tBbbb = 2 // two\n)\n",
    );
}

#[test]
fn test_comments_and_blank_lines() {
    assert_stable(
        r#"// Package main is an example.
package main

// run does things.
func run() {
	x := 1 // one

	// spacer
	y := 2
	_ = x + y
}
"#,
    );
}

#[test]
fn test_blank_lines_collapse_to_one() {
    let src = "package main\n\nfunc f() {\n\ta := 1\n\n\n\n\t_ = a\n}\n";
    assert_eq!(format(src), "package main\n\nfunc f() {\n\ta := 1\n\n\t_ = a\n}\n");
}

#[test]
fn test_one_line_functions_align() {
    assert_stable(
        r#"package main

type byName []string

func (s byName) Len() int           { return len(s) }
func (s byName) Less(i, j int) bool { return s[i] < s[j] }
"#,
    );
}

#[test]
fn test_keyed_elements_align() {
    assert_stable(
        r#"package main

var config = map[string]int{
	"a":     1,
	"bbbbb": 2,
}
"#,
    );
}

#[test]
fn test_binary_spacing_depends_on_precedence() {
    assert_stable(
        r#"package main

func f(a, b, c int) int {
	x := a*b + c
	y := f(a+b, c, 1)
	return x + y
}
"#,
    );
}

#[test]
fn test_control_flow() {
    assert_stable(
        r#"package main

func g(xs []int) int {
	total := 0
	for i, x := range xs {
		if x > 0 {
			total += x
		} else if x < 0 {
			total -= i
		} else {
			continue
		}
	}
	switch {
	case total > 10:
		return 1
	default:
	}
	for i := 0; i < 3; i++ {
		total++
	}
	return total
}
"#,
    );
}

#[test]
fn test_multiline_calls_and_closures() {
    assert_stable(
        r#"package main

import "fmt"

func h() {
	fmt.Println(
		"a",
		"b",
	)
	go func() {
		fmt.Println("c")
	}()
}
"#,
    );
}

#[test]
fn test_generated_statement_is_placed_on_its_own_line() {
    let src = "package main\n\nfunc main() {\n\tx := 1\n\t_ = x\n}\n";
    let interner = SharedInterner::new();
    let mut file = parse(src, &interner);
    let Decl::Func(main) = &file.decls[0] else {
        panic!("expected func");
    };
    let body = main.body.unwrap();
    let ret = file.arena.alloc_stmt(Stmt::synthetic(StmtKind::Return(Vec::new())));
    file.arena.block_mut(body).unwrap().stmts.insert(1, ret);

    assert_eq!(
        format_file(&file, src, &interner).unwrap(),
        "package main\n\nfunc main() {\n\tx := 1\n\treturn\n\t_ = x\n}\n"
    );
}

#[test]
fn test_dangling_node_is_an_error() {
    let src = "package main\n\nfunc main() {\n}\n";
    let interner = SharedInterner::new();
    let mut file = parse(src, &interner);
    let Decl::Func(main) = &file.decls[0] else {
        panic!("expected func");
    };
    let body = main.body.unwrap();
    file.arena.block_mut(body).unwrap().stmts.push(StmtId::new(9_999));

    assert_eq!(
        format_file(&file, src, &interner),
        Err(FormatError::InvalidNode {
            kind: "statement",
            id: 9_999
        })
    );
}
