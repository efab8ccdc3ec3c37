//! Command-line settings.

#![allow(
    clippy::struct_excessive_bools,
    reason = "FixConfig has standard CLI config bool fields"
)]

use std::path::PathBuf;

use errfix_rewrite::RewriteConfig;

/// Settings of a `fix` or `check` run.
#[derive(Clone, Debug)]
pub struct FixConfig {
    /// Report files that would change without writing them.
    /// The run exits with code 1 if any file would change.
    pub check: bool,
    /// Print a diff instead of writing.
    pub diff: bool,
    /// Print the resulting sources instead of writing.
    pub stdout: bool,
    /// Also rewrite `_test.go` files.
    pub include_tests: bool,
    /// Rewrite files on the rayon pool.
    pub parallel: bool,
    /// Report unchanged files too.
    pub verbose: bool,
    /// Files and directories to process.
    pub paths: Vec<PathBuf>,
    pub rewrite: RewriteConfig,
}

impl Default for FixConfig {
    fn default() -> Self {
        FixConfig {
            check: false,
            diff: false,
            stdout: false,
            include_tests: false,
            parallel: true,
            verbose: false,
            paths: Vec::new(),
            rewrite: RewriteConfig::default(),
        }
    }
}

impl FixConfig {
    /// Parse the arguments that follow the subcommand. Paths default to
    /// the current directory.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut config = FixConfig::default();
        for arg in args {
            match arg.as_str() {
                "--check" => config.check = true,
                "--diff" => config.diff = true,
                "--stdout" => config.stdout = true,
                "--include-tests" => config.include_tests = true,
                "--no-parallel" => config.parallel = false,
                "-v" | "--verbose" => config.verbose = true,
                _ => {
                    if let Some(name) = arg.strip_prefix("--err-name=") {
                        if !is_identifier(name) {
                            return Err(format!("`{name}` is not a usable Go identifier"));
                        }
                        config.rewrite.err_name = name.to_string();
                    } else if let Some(format) = arg.strip_prefix("--fatal-format=") {
                        config.rewrite.fatal_format = format.to_string();
                    } else if arg.starts_with('-') {
                        return Err(format!("unknown option `{arg}`"));
                    } else {
                        config.paths.push(PathBuf::from(arg));
                    }
                }
            }
        }
        if config.diff && config.stdout {
            return Err("`--diff` and `--stdout` cannot be combined".to_string());
        }
        if config.paths.is_empty() {
            config.paths.push(PathBuf::from("."));
        }
        Ok(config)
    }

    /// Nothing is written back.
    pub fn is_dry_run(&self) -> bool {
        self.check || self.diff || self.stdout
    }
}

const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    name != "_"
        && (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && !KEYWORDS.contains(&name)
}

#[cfg(test)]
mod tests;
