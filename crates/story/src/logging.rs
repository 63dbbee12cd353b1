//! Logging setup for the story binaries.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a global stdout subscriber filtered by `RUST_LOG` (default `info`).
pub fn init() {
    let result = tracing_subscriber::registry()
        .with(build_env_filter())
        .with(fmt::layer().with_target(true))
        .try_init();
    if let Err(err) = result {
        eprintln!("sortable-list-story: failed to install tracing subscriber: {err}");
    }
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
