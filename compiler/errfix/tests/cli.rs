//! The `errfix` binary end to end.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const SOURCE: &str = "package main\n\nimport \"os\"\n\nfunc main() {\n\t_ = os.Chdir(\"/\")\n}\n";

fn errfix(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_errfix"))
        .args(args)
        .current_dir(dir)
        .env_remove("ERRFIX_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("errfix should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn check_reports_and_fix_rewrites() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("go.mod"), "module example.com/tool\n").unwrap();
    fs::write(tmp.path().join("main.go"), SOURCE).unwrap();

    let check = errfix(&["check"], tmp.path());
    assert_eq!(check.status.code(), Some(1));
    let out = stdout(&check);
    assert!(out.contains("Found ignored error in ./main.go at line 6"), "{out}");
    assert!(out.contains("Would fix: ./main.go"), "{out}");
    assert!(out.contains("1 fixed, 0 unchanged"), "{out}");
    assert_eq!(fs::read_to_string(tmp.path().join("main.go")).unwrap(), SOURCE);

    let fix = errfix(&[], tmp.path());
    assert_eq!(fix.status.code(), Some(0));
    assert!(stdout(&fix).contains("Writing modified file: ./main.go"));
    let fixed = fs::read_to_string(tmp.path().join("main.go")).unwrap();
    assert!(fixed.contains("\terr := os.Chdir(\"/\")\n\tif err != nil {\n\t\tlog.Fatalf(\"error: %v\", err)\n\t}\n"));

    let recheck = errfix(&["check", "."], tmp.path());
    assert_eq!(recheck.status.code(), Some(0));
    assert!(stdout(&recheck).contains("0 fixed, 1 unchanged"));
}

#[test]
fn explain_prints_documentation() {
    let tmp = tempfile::tempdir().unwrap();
    let output = errfix(&["--explain", "W3001"], tmp.path());
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("# W3001"));

    let unknown = errfix(&["--explain", "Q1"], tmp.path());
    assert_eq!(unknown.status.code(), Some(1));
}

#[test]
fn bad_option_is_a_usage_error() {
    let tmp = tempfile::tempdir().unwrap();
    let output = errfix(&["fix", "--frobnicate"], tmp.path());
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown option `--frobnicate`"));
}

#[test]
fn missing_path_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let output = errfix(&["fix", "does-not-exist"], tmp.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot read does-not-exist"));
}
