//! Rewriting discarded Go errors.
//!
//! Given a parsed file and what the type checker learned about it, the
//! [`Rewriter`] turns every assignment that throws an error away
//!
//! ```text
//! data, _ := os.ReadFile(path)
//! ```
//!
//! into one that checks it:
//!
//! ```text
//! data, err := os.ReadFile(path)
//! if err != nil {
//!     return nil, err
//! }
//! ```
//!
//! # Pipeline Position
//!
//! ```text
//! Parse → Type Check → **Rewrite** → Format
//! ```
//!
//! # Passes
//!
//! 1. **Scan** (`scan`): collect discards and `err :=` statements in
//!    source order
//! 2. **Apply** (`apply`): decide `:=` or `=` for each one through the
//!    [`ScopeLedger`], replace `_` and insert the check
//!
//! Inside `main` of package `main` the check calls `log.Fatalf` instead of
//! returning, and the import is added once per file. A function that
//! cannot return the error keeps its discard and gets a `W3001` warning.

mod apply;
mod config;
mod imports;
mod ledger;
mod scan;
mod synth;
mod zero;

pub use config::RewriteConfig;
pub use imports::ensure_import;
pub use ledger::ScopeLedger;
pub use scan::{Candidate, CandidateKind};
pub use zero::{Zero, ZeroValues};

use errfix_diagnostic::Diagnostic;
use errfix_ir::{SourceFile, Span, StringInterner};
use errfix_types::{ErrorContract, FileInfo, Pool, Program, ScopeTree};

use crate::apply::Applier;
use crate::config::Names;

/// Something the rewrite did, in source order.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum RewriteEvent {
    /// The discarded error in the statement at this span is now checked.
    /// Discards left alone with a `W3001` warning are not reported here.
    DiscardedError(Span),
    /// `err :=` at this span became `err =`.
    Demoted(Span),
}

/// Result of rewriting one file.
#[derive(Clone, Debug, Default)]
pub struct RewriteOutcome {
    /// The tree changed and should be printed back.
    pub modified: bool,
    pub events: Vec<RewriteEvent>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Rewrites the files of checked packages.
pub struct Rewriter<'a> {
    pool: &'a Pool,
    scopes: &'a ScopeTree,
    interner: &'a StringInterner,
    contract: &'a ErrorContract,
    config: RewriteConfig,
    names: Names,
}

impl<'a> Rewriter<'a> {
    pub fn new(program: &'a Program, contract: &'a ErrorContract, config: &RewriteConfig) -> Self {
        let interner = program.interner();
        Rewriter {
            pool: program.pool(),
            scopes: program.scopes(),
            interner,
            contract,
            config: config.clone(),
            names: Names::new(config, interner),
        }
    }

    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Rewrite `file` in place. `info` must come from checking the same
    /// tree, before any rewrite.
    #[tracing::instrument(level = "debug", skip_all, fields(package = self.interner.lookup(file.package.name)))]
    pub fn rewrite(&self, file: &mut SourceFile, info: &FileInfo) -> RewriteOutcome {
        let candidates = scan::scan(file, info, self.pool, self.contract, &self.names);
        tracing::debug!(count = candidates.len(), "scanned");
        let mut applier = Applier::new(self, file, info);
        for candidate in &candidates {
            applier.apply(candidate);
        }
        applier.finish()
    }
}

#[cfg(test)]
mod tests;
