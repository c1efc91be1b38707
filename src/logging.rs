//! Diagnostic logging setup.
//!
//! The library emits `tracing` events (stage boundaries at `info`, individual
//! variants at `debug`). User-facing progress goes to stdout through
//! [`output`](crate::output); diagnostics go to stderr through the subscriber
//! installed here.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the logging subsystem.
///
/// `verbose` raises the default level from `warn` to `debug`; `json_format`
/// switches to one JSON object per event. `RUST_LOG` overrides the level.
pub fn init(verbose: bool, json_format: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
