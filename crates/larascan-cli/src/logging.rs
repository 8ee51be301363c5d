//! Logging initialization for the larascan binary.
//!
//! Diagnostics go to stderr so that stdout carries only the report.

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_LEVEL;

/// Filter directive used when `RUST_LOG` is not set.
///
/// `--verbose` wins over the configured level.
pub fn fallback_directive(verbose: bool, configured: Option<&str>) -> &str {
    if verbose {
        "debug"
    } else {
        configured.unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// Initialize the global tracing subscriber.
///
/// Must be called once, before any command runs.
pub fn init_tracing(verbose: bool, configured: Option<&str>) -> Result<()> {
    let directive = fallback_directive(verbose, configured);
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directive)
            .map_err(|e| anyhow::anyhow!("invalid log level '{}': {}", directive, e))?,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {}", e))?;

    Ok(())
}
