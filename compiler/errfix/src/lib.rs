//! The errfix driver.
//!
//! Runs the whole pipeline over a Go project:
//!
//! ```text
//! Discover → Parse (parallel) → Check (dependency order) → Rewrite (parallel) → Write
//! ```
//!
//! Every file is its own unit of failure: a file that cannot be read,
//! parsed, printed or written is reported and the others go on. Only an
//! unreadable input path stops the run.

mod config;
mod discover;
mod error;
mod fix;
mod load;
mod logging;
mod output;

use std::fmt::Write as _;
use std::io::IsTerminal;

use errfix_diagnostic::emitter::{ColorMode, DiagnosticEmitter, SourceContext, TerminalEmitter};
use errfix_diagnostic::span_utils::LineOffsetTable;

pub use config::FixConfig;
pub use discover::{discover, module_path, PackageDir, Project};
pub use error::{LoadError, UnitError};
pub use fix::{fix_project, FileReport, FileStatus};
pub use load::{load, LoadedProject, SourceUnit};
pub use logging::init_tracing;
pub use output::{unified_diff, write_atomic};

/// Counts behind the closing summary line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Files rewritten, or that would be in a dry run.
    pub fixed: usize,
    pub unchanged: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl Summary {
    pub fn collect(load_errors: &[UnitError], reports: &[FileReport]) -> Self {
        let mut summary = Summary {
            errors: load_errors.len(),
            ..Summary::default()
        };
        for report in reports {
            match report.status {
                Ok(FileStatus::Fixed | FileStatus::WouldFix) => summary.fixed += 1,
                Ok(FileStatus::Unchanged) => summary.unchanged += 1,
                Err(_) => summary.errors += 1,
            }
            summary.warnings += report.diagnostics.len();
        }
        summary
    }

    /// `N fixed, M unchanged`, plus errors and warnings when there are any.
    pub fn line(&self) -> String {
        let mut line = format!("{} fixed, {} unchanged", self.fixed, self.unchanged);
        for (count, what) in [(self.errors, "error"), (self.warnings, "warning")] {
            if count > 0 {
                let s = if count == 1 { "" } else { "s" };
                let _ = write!(line, ", {count} {what}{s}");
            }
        }
        line
    }

    /// 1 when a file failed, or when `--check` found work to do.
    pub fn exit_code(&self, config: &FixConfig) -> i32 {
        i32::from(self.errors > 0 || (config.check && self.fixed > 0))
    }
}

/// Run `fix` (or `check`) with `config` and return the exit code.
pub fn run(config: &FixConfig) -> i32 {
    let project = match discover(&config.paths, config.include_tests) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };
    tracing::debug!(
        packages = project.packages.len(),
        files = project.file_count(),
        "discovered"
    );
    let mut loaded = load(&project);
    let reports = fix_project(&mut loaded, config);
    let summary = Summary::collect(&loaded.errors, &reports);
    print_reports(&loaded.errors, &reports, config);
    if config.stdout {
        eprintln!("{}", summary.line());
    } else {
        println!("{}", summary.line());
    }
    summary.exit_code(config)
}

fn print_reports(load_errors: &[UnitError], reports: &[FileReport], config: &FixConfig) {
    let mut emitter = TerminalEmitter::stderr(ColorMode::Auto, std::io::stderr().is_terminal());
    for error in load_errors {
        emit_unit_error(&mut emitter, error);
    }

    for report in reports {
        // progress must not mix with sources printed to stdout
        for line in &report.progress {
            if config.stdout {
                eprintln!("{line}");
            } else {
                println!("{line}");
            }
        }
        if !report.diagnostics.is_empty() {
            let path = report.path.display().to_string();
            let lines = LineOffsetTable::build(&report.source);
            let context = SourceContext::new(&path, &report.source, &lines);
            emitter.emit_all(&report.diagnostics, Some(&context));
        }
        match &report.status {
            Ok(FileStatus::WouldFix) if config.check && !config.diff && !config.stdout => {
                println!("Would fix: {}", report.path.display());
            }
            Ok(FileStatus::Unchanged) if config.verbose => {
                println!("Unchanged: {}", report.path.display());
            }
            Err(error) => emit_unit_error(&mut emitter, error),
            Ok(_) => {}
        }
        if let Some(output) = &report.output {
            print!("{output}");
        }
    }
    emitter.flush();
}

fn emit_unit_error(emitter: &mut dyn DiagnosticEmitter, error: &UnitError) {
    let path = error.path().display().to_string();
    let (diagnostics, source) = error.diagnostics();
    match source {
        Some(source) => {
            let lines = LineOffsetTable::build(source);
            let context = SourceContext::new(&path, source, &lines);
            emitter.emit_all(&diagnostics, Some(&context));
        }
        None => emitter.emit_all(&diagnostics, None),
    }
}

#[cfg(test)]
mod tests;
