//! Rewrite settings.

use errfix_ir::{Name, StringInterner};

/// What the generated code looks like.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewriteConfig {
    /// Variable that receives the discarded error.
    pub err_name: String,
    /// Import path of the package providing the fatal call in `main`.
    pub log_path: String,
    /// Local name used for that import when its default name is taken.
    pub log_alias: String,
    /// Function called with the format and the error in `main`.
    pub fatal_func: String,
    /// Format string passed to the fatal call.
    pub fatal_format: String,
    /// Name of the entry function in package `main`.
    pub entry_name: String,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        RewriteConfig {
            err_name: "err".to_string(),
            log_path: "log".to_string(),
            log_alias: "stdlog".to_string(),
            fatal_func: "Fatalf".to_string(),
            fatal_format: "error: %v".to_string(),
            entry_name: "main".to_string(),
        }
    }
}

/// Interned names the rewrite compares against or generates.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Names {
    pub err: Name,
    pub blank: Name,
    pub nil: Name,
    pub error: Name,
    pub main_pkg: Name,
    pub entry: Name,
    pub fatal_func: Name,
    /// Quoted format literal.
    pub fatal_format: Name,
}

impl Names {
    pub(crate) fn new(config: &RewriteConfig, interner: &StringInterner) -> Self {
        Names {
            err: interner.intern(&config.err_name),
            blank: interner.intern("_"),
            nil: interner.intern("nil"),
            error: interner.intern("error"),
            main_pkg: interner.intern("main"),
            entry: interner.intern(&config.entry_name),
            fatal_func: interner.intern(&config.fatal_func),
            fatal_format: interner.intern(&quote(&config.fatal_format)),
        }
    }
}

/// Go interpreted string literal for `text`.
pub(crate) fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("error: %v"), "\"error: %v\"");
        assert_eq!(quote("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
    }
}
