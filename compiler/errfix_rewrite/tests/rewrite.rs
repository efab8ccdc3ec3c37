//! Whole-file rewrites through parse, check and format.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use errfix_ir::SharedInterner;
use errfix_rewrite::{RewriteConfig, RewriteEvent, RewriteOutcome, Rewriter};
use errfix_types::{ErrorContract, Program};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn rewrite(src: &str) -> (String, RewriteOutcome) {
    let interner = SharedInterner::new();
    let mut file = errfix_parse::parse(src, &interner).file.expect("parses");
    let mut program = Program::new(interner.clone());
    let checked = program.check_package("example.com/m", &[&file]);
    let contract = ErrorContract::new(&interner);
    let rewriter = Rewriter::new(&program, &contract, &RewriteConfig::default());
    let outcome = rewriter.rewrite(&mut file, &checked.files[0]);
    let out = errfix_fmt::format_file(&file, src, &interner).expect("formats");
    (out, outcome)
}

/// Discarding statements; `{n}` becomes a unique suffix.
const DISCARDS: &[&str] = &[
    "_ = os.Remove(\"a\")",
    "_, _ = os.Open(\"a\")",
    "v{n}, _ := strconv.Atoi(\"1\")\n_ = v{n}",
    "_, _ = fmt.Println(\"x\")",
    "if true {\n_ = os.Chdir(\"/\")\n}",
    "err := os.Remove(\"b\")\n_ = err",
];

fn program(picks: &[usize]) -> String {
    let mut body = String::new();
    for (n, &pick) in picks.iter().enumerate() {
        body.push('\t');
        body.push_str(&DISCARDS[pick].replace("{n}", &n.to_string()));
        body.push('\n');
    }
    format!(
        "package m\n\nimport (\n\t\"fmt\"\n\t\"os\"\n\t\"strconv\"\n)\n\nfunc run() (int, error) {{\n{body}\treturn 0, nil\n}}\n"
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_discard_is_fixed_once(picks in prop::collection::vec(0..DISCARDS.len(), 1..8)) {
        let src = program(&picks);
        let (once, outcome) = rewrite(&src);
        let discards = picks.iter().filter(|&&p| p != 5).count();
        let found = outcome
            .events
            .iter()
            .filter(|e| matches!(e, RewriteEvent::DiscardedError(_)))
            .count();
        prop_assert_eq!(found, discards);
        prop_assert!(outcome.diagnostics.is_empty());

        let (twice, again) = rewrite(&once);
        prop_assert_eq!(twice, once);
        prop_assert!(again.events.is_empty());
    }
}

#[test]
fn test_log_alias_when_name_is_taken() {
    let (out, _) = rewrite(
        r#"package main

import "os"

var log = "quiet"

func main() {
	_ = os.Chdir(log)
}
"#,
    );
    assert_eq!(
        out,
        r#"package main

import (
	stdlog "log"
	"os"
)

var log = "quiet"

func main() {
	err := os.Chdir(log)
	if err != nil {
		stdlog.Fatalf("error: %v", err)
	}
}
"#
    );
}

#[test]
fn test_method_with_error_result() {
    let (out, _) = rewrite(
        r#"package m

import "strconv"

type Config struct {
	Port int
}

func (c *Config) Load(raw string) error {
	c.Port, _ = strconv.Atoi(raw)
	return nil
}
"#,
    );
    assert_eq!(
        out,
        r#"package m

import "strconv"

type Config struct {
	Port int
}

func (c *Config) Load(raw string) error {
	var err error
	c.Port, err = strconv.Atoi(raw)
	if err != nil {
		return err
	}
	return nil
}
"#
    );
}
