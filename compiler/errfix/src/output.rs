//! Writing results: atomic replacement and unified diffs.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Replace `path` with `contents` through a temporary file in the same
/// directory, so readers never see a partial file. Permissions of the
/// existing file are kept.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Lines of context around each change.
const CONTEXT: usize = 3;

/// Largest table the line matcher builds before giving up on alignment.
const MAX_TABLE: usize = 1 << 22;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Tag {
    Keep,
    Delete,
    Insert,
}

#[derive(Copy, Clone, Debug)]
struct Line<'a> {
    tag: Tag,
    /// 0-based line in the old text (the next one, for insertions).
    old: usize,
    /// 0-based line in the new text (the next one, for deletions).
    new: usize,
    text: &'a str,
}

/// Unified diff of `old` against `new`, empty when they are equal.
pub fn unified_diff(path: &str, old: &str, new: &str) -> String {
    if old == new {
        return String::new();
    }
    let a: Vec<&str> = old.lines().collect();
    let b: Vec<&str> = new.lines().collect();
    let lines = diff_lines(&a, &b);

    let mut out = String::new();
    let _ = writeln!(out, "--- a/{path}");
    let _ = writeln!(out, "+++ b/{path}");
    for hunk in hunks(&lines) {
        let slice = &lines[hunk.0..hunk.1];
        let old_count = slice.iter().filter(|l| l.tag != Tag::Insert).count();
        let new_count = slice.iter().filter(|l| l.tag != Tag::Delete).count();
        let old_start = slice.first().map_or(0, |l| l.old) + usize::from(old_count > 0);
        let new_start = slice.first().map_or(0, |l| l.new) + usize::from(new_count > 0);
        let _ = writeln!(out, "@@ -{old_start},{old_count} +{new_start},{new_count} @@");
        for line in slice {
            let marker = match line.tag {
                Tag::Keep => ' ',
                Tag::Delete => '-',
                Tag::Insert => '+',
            };
            let _ = writeln!(out, "{marker}{}", line.text);
        }
    }
    out
}

/// Ranges of `lines` to print, each change padded with context.
fn hunks(lines: &[Line<'_>]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if line.tag == Tag::Keep {
            continue;
        }
        let start = i.saturating_sub(CONTEXT);
        let end = (i + CONTEXT + 1).min(lines.len());
        match ranges.last_mut() {
            Some(last) if start <= last.1 => last.1 = end,
            _ => ranges.push((start, end)),
        }
    }
    ranges
}

fn diff_lines<'a>(a: &[&'a str], b: &[&'a str]) -> Vec<Line<'a>> {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let mid_a = &a[prefix..a.len() - suffix];
    let mid_b = &b[prefix..b.len() - suffix];

    let mut out = Vec::with_capacity(a.len().max(b.len()));
    for (i, text) in a[..prefix].iter().enumerate() {
        out.push(Line {
            tag: Tag::Keep,
            old: i,
            new: i,
            text,
        });
    }
    align(mid_a, mid_b, prefix, prefix, &mut out);
    let (old_end, new_end) = (a.len() - suffix, b.len() - suffix);
    for (i, text) in a[old_end..].iter().enumerate() {
        out.push(Line {
            tag: Tag::Keep,
            old: old_end + i,
            new: new_end + i,
            text,
        });
    }
    out
}

/// Longest-common-subsequence alignment of the changed middle.
fn align<'a>(a: &[&'a str], b: &[&'a str], old: usize, new: usize, out: &mut Vec<Line<'a>>) {
    let (n, m) = (a.len(), b.len());
    let width = m + 1;
    let table_ok = (n + 1).saturating_mul(width) <= MAX_TABLE;
    let mut table = vec![0u32; if table_ok { (n + 1) * width } else { 0 }];
    if table_ok {
        for i in (0..n).rev() {
            for j in (0..m).rev() {
                table[i * width + j] = if a[i] == b[j] {
                    table[(i + 1) * width + j + 1] + 1
                } else {
                    table[(i + 1) * width + j].max(table[i * width + j + 1])
                };
            }
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < n || j < m {
        let keep = table_ok && i < n && j < m && a[i] == b[j];
        let delete = i < n
            && (j == m
                || !table_ok
                || table[(i + 1) * width + j] >= table[i * width + j + 1]);
        if keep {
            out.push(Line {
                tag: Tag::Keep,
                old: old + i,
                new: new + j,
                text: a[i],
            });
            i += 1;
            j += 1;
        } else if delete {
            out.push(Line {
                tag: Tag::Delete,
                old: old + i,
                new: new + j,
                text: a[i],
            });
            i += 1;
        } else {
            out.push(Line {
                tag: Tag::Insert,
                old: old + i,
                new: new + j,
                text: b[j],
            });
            j += 1;
        }
    }
}

#[cfg(test)]
mod tests;
