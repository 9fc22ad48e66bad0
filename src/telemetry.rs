//! Tracing subscriber setup for the binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! binary's job.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Filter to install: `debug` when verbose, else `RUST_LOG`, else the
/// configured level.
pub fn env_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Installs the global subscriber, writing to stderr so interactive output
/// on stdout stays clean.
///
/// # Errors
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(
    config: &LoggingConfig,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config, verbose))
        .with_writer(std::io::stderr);

    if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}
