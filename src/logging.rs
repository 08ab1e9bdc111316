//! Structured logging setup
//!
//! Diagnostics always go to stderr: in STDIO mode stdout carries the
//! protocol framing and must never receive log lines.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize the global `tracing` subscriber.
///
/// The filter is seeded from the `LOG_LEVEL` option (error/warn/info/
/// debug), falling back to `warn`. Safe to call more than once; only the
/// first call installs a subscriber.
pub fn init(log_level: &str) {
    let directive = match log_level {
        "error" | "warn" | "info" | "debug" => log_level,
        other => {
            eprintln!("Unknown LOG_LEVEL '{}', using 'warn'", other);
            "warn"
        }
    };

    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(directive))
            .with_writer(std::io::stderr)
            .init();
    });
}
