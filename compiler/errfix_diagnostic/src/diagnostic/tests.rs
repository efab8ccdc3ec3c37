use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_severity_follows_code() {
    assert_eq!(Diagnostic::new(ErrorCode::W3001).severity, Severity::Warning);
    assert!(Diagnostic::new(ErrorCode::E1006).is_error());
    assert!(!Diagnostic::new(ErrorCode::W3001).is_error());
}

#[test]
fn test_builder_collects_parts() {
    let diag = Diagnostic::new(ErrorCode::W3001)
        .with_message("discarded error cannot be returned")
        .with_label(Span::new(20, 30), "error discarded here")
        .with_secondary_label(Span::new(0, 10), "routine declared here")
        .with_note("the routine has no error result")
        .with_help("add an `error` result");

    assert_eq!(diag.primary_span(), Some(Span::new(20, 30)));
    assert_eq!(diag.labels.len(), 2);
    assert!(!diag.labels[1].is_primary);
    assert_eq!(diag.notes, vec!["the routine has no error result".to_string()]);
}

#[test]
fn test_display_format() {
    let diag = Diagnostic::new(ErrorCode::E1001)
        .with_message("unexpected token")
        .with_label(Span::new(3, 4), "here")
        .with_note("n")
        .with_help("s");

    assert_eq!(
        diag.to_string(),
        "error [E1001]: unexpected token\n  --> 3..4: here\n  = note: n\n  = help: s"
    );
}

#[test]
fn test_primary_span_absent_without_labels() {
    let diag = Diagnostic::new(ErrorCode::E2001).with_message("cannot read");
    assert_eq!(diag.primary_span(), None);
}
