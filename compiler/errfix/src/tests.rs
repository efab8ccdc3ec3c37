#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;

use pretty_assertions::assert_eq;

use super::{FileReport, FileStatus, FixConfig, Summary, UnitError};

fn report(status: Result<FileStatus, UnitError>) -> FileReport {
    FileReport {
        path: PathBuf::from("a.go"),
        status,
        progress: Vec::new(),
        diagnostics: Vec::new(),
        source: String::new(),
        output: None,
    }
}

#[test]
fn test_summary_counts_and_line() {
    let reports = vec![
        report(Ok(FileStatus::Fixed)),
        report(Ok(FileStatus::Unchanged)),
        report(Ok(FileStatus::Unchanged)),
        report(Err(UnitError::Write {
            path: PathBuf::from("b.go"),
            source: std::io::Error::other("read-only"),
        })),
    ];
    let summary = Summary::collect(&[], &reports);
    assert_eq!(
        summary,
        Summary {
            fixed: 1,
            unchanged: 2,
            errors: 1,
            warnings: 0,
        }
    );
    assert_eq!(summary.line(), "1 fixed, 2 unchanged, 1 error");
    assert_eq!(summary.exit_code(&FixConfig::default()), 1);
}

#[test]
fn test_check_mode_exit_code() {
    let summary = Summary::collect(&[], &[report(Ok(FileStatus::WouldFix))]);
    assert_eq!(summary.line(), "1 fixed, 0 unchanged");
    let check = FixConfig {
        check: true,
        ..FixConfig::default()
    };
    assert_eq!(summary.exit_code(&check), 1);
    assert_eq!(summary.exit_code(&FixConfig::default()), 0);

    let clean = Summary::collect(&[], &[report(Ok(FileStatus::Unchanged))]);
    assert_eq!(clean.exit_code(&check), 0);
}
