#![allow(clippy::unwrap_used, clippy::expect_used)]

use errfix_diagnostic::span_utils::LineOffsetTable;
use errfix_ir::SharedInterner;
use errfix_types::{ErrorContract, Program, RoutineId};
use pretty_assertions::assert_eq;

use super::{scan, CandidateKind};
use crate::config::{Names, RewriteConfig};

/// `(line, kind, routine is a literal)` for every candidate.
fn candidates(src: &str) -> Vec<(u32, CandidateKind, bool)> {
    let interner = SharedInterner::new();
    let file = errfix_parse::parse(src, &interner).file.expect("parses");
    let mut program = Program::new(interner.clone());
    let checked = program.check_package("example.com/p", &[&file]);
    let contract = ErrorContract::new(&interner);
    let names = Names::new(&RewriteConfig::default(), &interner);
    let lines = LineOffsetTable::build(src);
    scan(&file, &checked.files[0], program.pool(), &contract, &names)
        .into_iter()
        .map(|c| {
            (
                lines.line_from_offset(c.pos),
                c.kind,
                matches!(c.routine, RoutineId::Lit(_)),
            )
        })
        .collect()
}

#[test]
fn test_lowest_error_index_wins() {
    let found = candidates(
        r#"package p

func two() (int, error, error) { return 0, nil, nil }

func f() error {
	n, _, _ := two()
	_, _, _ = two()
	_ = n
	return nil
}
"#,
    );
    assert_eq!(
        found,
        vec![
            (6, CandidateKind::Discard { index: 1 }, false),
            (7, CandidateKind::Discard { index: 1 }, false),
        ]
    );
}

#[test]
fn test_non_error_discards_and_arity_mismatch_are_ignored() {
    let found = candidates(
        r#"package p

import "strconv"

func pair() (string, int) { return "", 0 }

func f() error {
	s, _ := pair()
	_ = len(s)
	_ = strconv.Itoa(1)
	return nil
}
"#,
    );
    assert_eq!(found, vec![]);
}

#[test]
fn test_nested_blocks_and_function_literals() {
    let found = candidates(
        r#"package p

import "os"

func f() error {
	if true {
		_, _ = os.Open("a")
	}
	for i := 0; i < 2; i++ {
		switch i {
		case 1:
			_ = os.Remove("b")
		}
	}
	run := func() error {
		err := os.Chdir("c")
		return err
	}
	return run()
}
"#,
    );
    assert_eq!(
        found,
        vec![
            (7, CandidateKind::Discard { index: 1 }, false),
            (12, CandidateKind::Discard { index: 0 }, false),
            (16, CandidateKind::Demotion, true),
        ]
    );
}

#[test]
fn test_header_statements_are_not_candidates() {
    let found = candidates(
        r#"package p

import "os"

func f() error {
	if _, err := os.Stat("x"); err != nil {
		return err
	}
	if _, _ = os.Stat("y"); true {
	}
	err := os.Remove("z")
	return err
}
"#,
    );
    assert_eq!(found, vec![(11, CandidateKind::Demotion, false)]);
}

#[test]
fn test_labels_are_looked_through() {
    let found = candidates(
        r#"package p

import "os"

func f() error {
outer:
inner:
	_ = os.Remove("a")
	goto outer
	goto inner
}
"#,
    );
    assert_eq!(found, vec![(6, CandidateKind::Discard { index: 0 }, false)]);
}
