//! Logging Infrastructure
//!
//! Structured logging setup for embedders and tests. The core itself only
//! emits `tracing` events; installing a subscriber is the host's call.

use tracing_subscriber::EnvFilter;

/// Initialize the logger. `RUST_LOG` overrides the default level.
pub fn init_logger() {
    init_logger_with_level("info");
}

/// Initialize the logger with an explicit default level.
pub fn init_logger_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    // try_init: tests may install the subscriber more than once
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .try_init();
}
