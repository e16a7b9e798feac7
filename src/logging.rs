//! Tracing subscriber setup for the binary.

use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, Registry};

use crate::config::{LoggingConfig, ValidationError};

/// Errors raised while installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error(transparent)]
    Filter(#[from] ValidationError),

    #[error("Failed to install subscriber: {0}")]
    Install(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Installs a console subscriber writing to stderr.
///
/// Uses `RUST_LOG` when set, the configured level otherwise. With
/// `logging.json` each event is one JSON object per line.
pub fn setup_tracing(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = config.env_filter()?;

    if config.json {
        let layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(filter);
        tracing::subscriber::set_global_default(Registry::default().with(layer))?;
    } else {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(filter);
        tracing::subscriber::set_global_default(Registry::default().with(layer))?;
    }

    debug!(level = %config.level, json = config.json, "Tracing initialized");
    Ok(())
}
