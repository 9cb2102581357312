//! Diagnostic logging setup.
//!
//! Stdout is the protocol channel, so every log line goes to stderr.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Verbosity comes from `RUST_LOG`, falling back to `info` when unset.
pub fn setup_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}
