//! Tracing subscriber setup

use crate::config::LoggingConfig;
use crate::utils::error::{CheckerError, Result};
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber according to `config`.
///
/// `RUST_LOG` takes precedence over the configured level when set. Installing
/// a second subscriber fails with [`CheckerError::Logging`]; callers that may
/// initialize more than once (tests) should ignore that error.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| CheckerError::Logging(format!("Invalid log filter: {}", e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_thread_ids(false);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| CheckerError::Logging(e.to_string()))
}
