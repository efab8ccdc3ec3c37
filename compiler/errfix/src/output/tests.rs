#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;

use pretty_assertions::assert_eq;

use super::{unified_diff, write_atomic};

#[test]
fn test_diff_of_inserted_check() {
    let old = "package p\nfunc f() error {\n\tx, _ := g()\n\treturn nil\n}\n";
    let new = "package p\nfunc f() error {\n\tx, err := g()\n\tif err != nil {\n\t\treturn err\n\t}\n\treturn nil\n}\n";
    assert_eq!(
        unified_diff("f.go", old, new),
        "--- a/f.go
+++ b/f.go
@@ -1,5 +1,8 @@
 package p
 func f() error {
-\tx, _ := g()
+\tx, err := g()
+\tif err != nil {
+\t\treturn err
+\t}
 \treturn nil
 }
"
    );
}

#[test]
fn test_distant_changes_get_separate_hunks() {
    let old: String = (1..=20).map(|i| format!("line {i}\n")).collect();
    let new = old
        .replace("line 2\n", "line two\n")
        .replace("line 18\n", "line 18\nextra\n");
    let diff = unified_diff("x.go", &old, &new);
    let headers: Vec<&str> = diff.lines().filter(|l| l.starts_with("@@")).collect();
    assert_eq!(headers, vec!["@@ -1,5 +1,5 @@", "@@ -16,5 +16,6 @@"]);
}

#[test]
fn test_equal_texts_have_no_diff() {
    assert_eq!(unified_diff("a.go", "x\n", "x\n"), "");
}

#[test]
fn test_write_atomic_replaces_contents() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("main.go");
    fs::write(&path, "old\n").unwrap();
    write_atomic(&path, "new\n").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    let leftovers = fs::read_dir(tmp.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}
