//! Declaration-only Go stubs for the parts of the standard library that
//! commonly return errors.
//!
//! Each stub is ordinary Go without function bodies and is checked like a
//! project package the first time something imports it.

const STUBS: &[(&str, &str)] = &[
    ("bufio", include_str!("bufio.go")),
    ("bytes", include_str!("bytes.go")),
    ("encoding/json", include_str!("encoding_json.go")),
    ("errors", include_str!("errors.go")),
    ("fmt", include_str!("fmt.go")),
    ("io", include_str!("io.go")),
    ("io/ioutil", include_str!("io_ioutil.go")),
    ("log", include_str!("log.go")),
    ("net/http", include_str!("net_http.go")),
    ("net/url", include_str!("net_url.go")),
    ("os", include_str!("os.go")),
    ("os/exec", include_str!("os_exec.go")),
    ("path/filepath", include_str!("path_filepath.go")),
    ("strconv", include_str!("strconv.go")),
    ("strings", include_str!("strings.go")),
    ("time", include_str!("time.go")),
];

/// Stub source for an import path.
pub fn source(path: &str) -> Option<&'static str> {
    STUBS
        .iter()
        .find_map(|(p, src)| (*p == path).then_some(*src))
}

/// Import paths with a bundled stub.
pub fn paths() -> impl Iterator<Item = &'static str> {
    STUBS.iter().map(|(p, _)| *p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_stub_parses() {
        let interner = errfix_ir::StringInterner::new();
        for path in paths() {
            let out = errfix_parse::parse(source(path).unwrap_or_default(), &interner);
            assert!(out.diagnostics.is_empty(), "{path}: {:?}", out.diagnostics);
        }
    }

    #[test]
    fn test_unknown_path() {
        assert!(source("github.com/pkg/errors").is_none());
        assert!(source("os").is_some());
    }
}
