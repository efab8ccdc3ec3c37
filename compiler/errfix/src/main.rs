//! errfix CLI
//!
//! Turns discarded Go errors into checked errors.

use errfix::FixConfig;
use errfix_diagnostic::{ErrorCode, ErrorDocs};

fn main() {
    errfix::init_tracing();
    let args: Vec<String> = std::env::args().collect();

    let (check, rest) = match args.get(1).map(String::as_str) {
        None => (false, args.get(1..).unwrap_or_default()),
        Some("fix") => (false, args.get(2..).unwrap_or_default()),
        Some("check") => (true, args.get(2..).unwrap_or_default()),
        Some("help" | "--help" | "-h") => {
            print_usage();
            return;
        }
        Some("version" | "--version" | "-V") => {
            println!("errfix {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Some("--explain" | "explain") => {
            let Some(code) = args.get(2) else {
                eprintln!("Usage: errfix --explain <CODE>");
                eprintln!("Example: errfix --explain W3001");
                std::process::exit(1);
            };
            explain(code);
            return;
        }
        Some(_) => (false, args.get(1..).unwrap_or_default()),
    };

    let mut config = match FixConfig::parse(rest) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };
    config.check |= check;
    std::process::exit(errfix::run(&config));
}

fn explain(code_str: &str) {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX (errors) or WXXXX (warnings) where X is a digit.");
        eprintln!("Examples: E1001, E2001, W3001");
        std::process::exit(1);
    };
    match ErrorDocs::get(code) {
        Some(doc) => println!("{doc}"),
        None => {
            eprintln!("No documentation available for {code_str}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("errfix: check the errors your Go code throws away");
    println!();
    println!("Usage: errfix [command] [options] [paths...]");
    println!();
    println!("Commands:");
    println!("  fix [paths]          Rewrite discarded errors in place (default)");
    println!("  check [paths]        Report files that would change; exit 1 if any");
    println!("  --explain <code>     Explain an error code (e.g., W3001)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --check              Same as the check command");
    println!("  --diff               Print a diff instead of writing");
    println!("  --stdout             Print rewritten sources instead of writing");
    println!("  --include-tests      Also rewrite _test.go files");
    println!("  --err-name=<ident>   Variable receiving the error (default: err)");
    println!("  --fatal-format=<f>   Format passed to log.Fatalf in main (default: \"error: %v\")");
    println!("  --no-parallel        Rewrite files one at a time");
    println!("  -v, --verbose        Also list unchanged files");
    println!();
    println!("Logging: ERRFIX_LOG=<filter> (falls back to RUST_LOG), ERRFIX_LOG_TREE=1");
}
