//! Tracing setup for the binary.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `ERRFIX_LOG` (or `RUST_LOG`) is set, e.g.
/// `ERRFIX_LOG=errfix_rewrite=trace`. With `ERRFIX_LOG_TREE=1` spans are
/// rendered as a tree. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(directives) = std::env::var("ERRFIX_LOG").or_else(|_| std::env::var("RUST_LOG"))
        else {
            return;
        };
        let filter = EnvFilter::new(directives);
        if std::env::var("ERRFIX_LOG_TREE").is_ok_and(|v| v == "1") {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
