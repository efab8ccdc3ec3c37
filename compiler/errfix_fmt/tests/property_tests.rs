//! Property-based tests for the Go printer.
//!
//! Random function bodies are assembled from statement templates with
//! uneven indentation and blank lines, then checked for:
//! 1. Idempotence: format(format(code)) == format(code)
//! 2. Parse-ability: formatted output parses without diagnostics

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use errfix_fmt::format_file;
use errfix_ir::SharedInterner;
use proptest::prelude::*;

fn format(src: &str) -> String {
    let interner = SharedInterner::new();
    let output = errfix_parse::parse(src, &interner);
    assert!(
        output.diagnostics.is_empty(),
        "parse failed for:\n{}\n{:?}",
        src,
        output.diagnostics
    );
    let file = output.file.expect("parses");
    format_file(&file, src, &interner).expect("formats")
}

const STATEMENTS: &[&str] = &[
    "x := a + b",
    "_ = a*b + a/b",
    "if a > b {\nreturn a, nil\n}",
    "for i := 0; i < a; i++ {\nb += i\n}",
    "m := map[string]int{\n\"k\": a,\n\"long key\": b,\n}",
    "s := []int{a, b,\nb}",
    "// note",
    "switch a {\ncase 1, 2:\nb++\ndefault:\n}",
    "defer func() {\n_ = recover()\n}()",
    "v := struct {\nA  int\nBb string\n}{A: 1}",
    "y := a // trailing",
    "ch := make(chan int, 1)",
    "go func(n int) { _ = n }(a)",
];

fn statement_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(STATEMENTS),
        0usize..3,
        prop::bool::ANY,
    )
        .prop_map(|(stmt, blanks, indent)| {
            let pad = if indent { "\t" } else { "  " };
            let body: Vec<String> = stmt.lines().map(|line| format!("{pad}{line}")).collect();
            format!("{}{}", "\n".repeat(blanks), body.join("\n"))
        })
}

fn file_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(statement_strategy(), 0..8).prop_map(|stmts| {
        format!(
            "package main\n\nfunc f(a, b int) (int, error) {{\n{}\nreturn a, nil\n}}\n",
            stmts.join("\n")
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn formatting_is_idempotent(src in file_strategy()) {
        let once = format(&src);
        let twice = format(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn output_ends_with_single_newline(src in file_strategy()) {
        let once = format(&src);
        prop_assert!(once.ends_with("}\n"), "missing closing brace:\n{}", once);
        prop_assert!(!once.ends_with("\n\n"));
    }
}

#[test]
fn test_declarations_are_idempotent() {
    let src = r#"package main

import (
	"errors"
	"fmt"
)

type (
	Point struct {
		X, Y int
	}
	Shape interface {
		Area() float64
	}
)

var (
	ErrEmpty = errors.New("empty")
	count    int
)

func (p *Point) String() string { return fmt.Sprint(p.X, p.Y) }

func scale(p Point, k int) Point {
	return Point{
		X: p.X * k,
		Y: p.Y * k,
	}
}
"#;
    let once = format(src);
    assert_eq!(once, src);
    assert_eq!(format(&once), once);
}
