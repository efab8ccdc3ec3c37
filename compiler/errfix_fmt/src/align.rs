//! Column alignment.
//!
//! The printer marks alignment cells with [`CELL`]. Consecutive lines at
//! the same indentation that have a cell in the same column form a block,
//! and every cell of the block is padded to the widest one plus a space.
//! Columns whose cells are all empty take no space. Blocks are built column
//! by column, each inside the block of the column before it, so a line with
//! fewer cells ends the blocks of the columns it lacks.

use crate::emitter::{CELL, SECTION};

struct Line<'a> {
    indent: usize,
    /// The line must not join the block above it.
    section: bool,
    /// Text between terminators; the last entry is unterminated.
    cells: Vec<&'a str>,
    raw: &'a str,
}

impl<'a> Line<'a> {
    fn parse(text: &'a str) -> Self {
        let (section, raw) = match text.strip_prefix(SECTION) {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let body = raw.trim_start_matches('\t');
        Line {
            indent: raw.len() - body.len(),
            section,
            cells: body.split(CELL).collect(),
            raw,
        }
    }

    fn terminated(&self) -> usize {
        self.cells.len() - 1
    }
}

/// Resolve alignment cells into spaces.
pub fn align(text: &str) -> String {
    let lines: Vec<Line<'_>> = text.split('\n').map(Line::parse).collect();
    let mut widths: Vec<Vec<usize>> = lines.iter().map(|l| vec![0; l.terminated()]).collect();
    align_column(&lines, &mut widths, 0, lines.len(), 0);

    let mut out = String::with_capacity(text.len());
    for (i, (line, widths)) in lines.iter().zip(&widths).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line.cells.len() == 1 {
            out.push_str(line.raw);
            continue;
        }
        for _ in 0..line.indent {
            out.push('\t');
        }
        let last = line.cells.len() - 1;
        for (j, cell) in line.cells.iter().enumerate() {
            out.push_str(cell);
            if j == last || line.cells[j + 1..].iter().all(|c| c.is_empty()) {
                continue;
            }
            let pad = widths[j].saturating_sub(cell.chars().count());
            out.extend(std::iter::repeat(' ').take(pad));
        }
    }
    out
}

fn align_column(lines: &[Line<'_>], widths: &mut [Vec<usize>], start: usize, end: usize, column: usize) {
    let mut this = start;
    while this < end {
        if lines[this].terminated() <= column {
            this += 1;
            continue;
        }
        let block_start = this;
        let indent = lines[this].indent;
        let mut width = 0;
        let mut discardable = true;
        while this < end {
            let line = &lines[this];
            if line.terminated() <= column
                || line.indent != indent
                || (this > block_start && line.section)
            {
                break;
            }
            let w = line.cells[column].chars().count();
            if w > 0 {
                discardable = false;
            }
            width = width.max(w + 1);
            this += 1;
        }
        if discardable {
            width = 0;
        }
        for line_widths in &mut widths[block_start..this] {
            line_widths[column] = width;
        }
        align_column(lines, widths, block_start, this, column + 1);
    }
}
