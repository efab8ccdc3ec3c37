//! Rewriting loaded files and deciding what happens to the result.

use std::path::PathBuf;

use errfix_diagnostic::span_utils::LineOffsetTable;
use errfix_diagnostic::Diagnostic;
use errfix_ir::StringInterner;
use errfix_rewrite::{RewriteEvent, Rewriter};
use errfix_types::ErrorContract;
use rayon::prelude::*;
use tracing::debug;

use crate::config::FixConfig;
use crate::error::UnitError;
use crate::load::{LoadedProject, SourceUnit};
use crate::output::{unified_diff, write_atomic};

/// What happened to one file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileStatus {
    Unchanged,
    /// Rewritten and written back.
    Fixed,
    /// Would be rewritten; nothing was written.
    WouldFix,
}

/// Result of one file, ready to be reported in order.
pub struct FileReport {
    pub path: PathBuf,
    pub status: Result<FileStatus, UnitError>,
    /// Progress lines, in source order.
    pub progress: Vec<String>,
    /// Rewrite warnings; spans point into `source`.
    pub diagnostics: Vec<Diagnostic>,
    pub source: String,
    /// Text for `--stdout` or `--diff`.
    pub output: Option<String>,
}

/// Rewrite every loaded file, on the rayon pool unless disabled.
#[tracing::instrument(level = "debug", skip_all, fields(files = loaded.units.len()))]
pub fn fix_project(loaded: &mut LoadedProject, config: &FixConfig) -> Vec<FileReport> {
    let LoadedProject {
        interner,
        program,
        units,
        ..
    } = loaded;
    let interner: &StringInterner = interner;
    let contract = ErrorContract::new(interner);
    let rewriter = Rewriter::new(program, &contract, &config.rewrite);

    if config.parallel {
        units
            .par_iter_mut()
            .map(|unit| fix_unit(&rewriter, interner, unit, config))
            .collect()
    } else {
        units
            .iter_mut()
            .map(|unit| fix_unit(&rewriter, interner, unit, config))
            .collect()
    }
}

fn fix_unit(
    rewriter: &Rewriter<'_>,
    interner: &StringInterner,
    unit: &mut SourceUnit,
    config: &FixConfig,
) -> FileReport {
    let display = unit.path.display().to_string();
    let outcome = rewriter.rewrite(&mut unit.file, &unit.info);
    let lines = LineOffsetTable::build(&unit.source);

    let progress = outcome
        .events
        .iter()
        .map(|event| match event {
            RewriteEvent::DiscardedError(span) => format!(
                "Found ignored error in {display} at line {}",
                lines.line_of(*span)
            ),
            RewriteEvent::Demoted(span) => format!(
                "Demoting `{0} :=` to `{0} =` in {display} at line {1}",
                config.rewrite.err_name,
                lines.line_of(*span)
            ),
        })
        .collect();

    let mut report = FileReport {
        path: unit.path.clone(),
        status: Ok(FileStatus::Unchanged),
        progress,
        diagnostics: outcome.diagnostics,
        source: String::new(),
        output: None,
    };

    if !outcome.modified {
        if config.stdout {
            report.output = Some(unit.source.clone());
        }
        report.source = std::mem::take(&mut unit.source);
        return report;
    }

    let formatted = match errfix_fmt::format_file(&unit.file, &unit.source, interner) {
        Ok(text) => text,
        Err(source) => {
            report.status = Err(UnitError::Format {
                path: unit.path.clone(),
                source,
            });
            report.source = std::mem::take(&mut unit.source);
            return report;
        }
    };

    report.status = if config.diff {
        report.output = Some(unified_diff(&display, &unit.source, &formatted));
        Ok(FileStatus::WouldFix)
    } else if config.stdout {
        report.output = Some(formatted);
        Ok(FileStatus::WouldFix)
    } else if config.check {
        Ok(FileStatus::WouldFix)
    } else {
        debug!(path = %unit.path.display(), "writing");
        report
            .progress
            .push(format!("Writing modified file: {display}"));
        write_atomic(&unit.path, &formatted)
            .map(|()| FileStatus::Fixed)
            .map_err(|source| UnitError::Write {
                path: unit.path.clone(),
                source,
            })
    };
    report.source = std::mem::take(&mut unit.source);
    report
}
