#![allow(clippy::unwrap_used)]

use super::*;
use crate::span_utils::LineOffsetTable;
use crate::ErrorCode;
use errfix_ir::Span;
use pretty_assertions::assert_eq;

fn render(diag: &Diagnostic, source: Option<&str>) -> String {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    match source {
        Some(text) => {
            let lines = LineOffsetTable::build(text);
            let ctx = SourceContext::new("main.go", text, &lines);
            emitter.emit(diag, Some(&ctx));
        }
        None => emitter.emit(diag, None),
    }
    String::from_utf8(emitter.into_inner()).unwrap()
}

#[test]
fn test_snippet_rendering() {
    let source = "package main\n\nfunc f() {\n\tx, _ := g()\n}\n";
    let start = u32::try_from(source.find("_ :=").unwrap()).unwrap();
    let diag = Diagnostic::new(ErrorCode::W3001)
        .with_message("discarded error cannot be returned")
        .with_label(Span::new(start, start + 1), "discarded here");

    assert_eq!(
        render(&diag, Some(source)),
        "warning[W3001]: discarded error cannot be returned\n \
         --> main.go:4:5\n  |\n4 | \tx, _ := g()\n  | \t   ^ discarded here\n\n"
    );
}

#[test]
fn test_bare_rendering_without_source() {
    let diag = Diagnostic::new(ErrorCode::E1001)
        .with_message("unexpected token")
        .with_label(Span::new(3, 4), "here")
        .with_note("n")
        .with_help("s");

    assert_eq!(
        render(&diag, None),
        "error[E1001]: unexpected token\n  --> 3..4: here\n  = note: n\n  = help: s\n\n"
    );
}

#[test]
fn test_unlabeled_diagnostic_names_file() {
    let diag = Diagnostic::new(ErrorCode::E2001).with_message("cannot read file");
    let text = render(&diag, Some(""));
    assert!(text.contains("--> main.go"));
}

#[test]
fn test_color_output_contains_escapes() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
    emitter.emit(
        &Diagnostic::new(ErrorCode::E0001).with_message("unterminated string"),
        None,
    );
    let text = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(text.contains("\x1b["));
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}
