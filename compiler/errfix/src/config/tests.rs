#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;

use pretty_assertions::assert_eq;

use super::FixConfig;

fn parse(args: &[&str]) -> Result<FixConfig, String> {
    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
    FixConfig::parse(&args)
}

#[test]
fn test_defaults() {
    let config = parse(&[]).unwrap();
    assert_eq!(config.paths, vec![PathBuf::from(".")]);
    assert!(config.parallel);
    assert!(!config.is_dry_run());
    assert_eq!(config.rewrite.err_name, "err");
    assert_eq!(config.rewrite.fatal_format, "error: %v");
}

#[test]
fn test_flags_and_paths() {
    let config = parse(&[
        "--check",
        "--include-tests",
        "--no-parallel",
        "-v",
        "--err-name=e",
        "--fatal-format=fatal: %v",
        "cmd",
        "internal/store",
    ])
    .unwrap();
    assert!(config.check && config.include_tests && config.verbose);
    assert!(!config.parallel);
    assert!(config.is_dry_run());
    assert_eq!(config.rewrite.err_name, "e");
    assert_eq!(config.rewrite.fatal_format, "fatal: %v");
    assert_eq!(
        config.paths,
        vec![PathBuf::from("cmd"), PathBuf::from("internal/store")]
    );
}

#[test]
fn test_rejects_bad_input() {
    for args in [
        &["--err-name=_"][..],
        &["--err-name=func"],
        &["--err-name=1err"],
        &["--err-name="],
        &["--frobnicate"],
        &["--diff", "--stdout"],
    ] {
        assert!(parse(args).is_err(), "{args:?} should be rejected");
    }
}
