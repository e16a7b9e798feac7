//! Application configuration module
//!
//! This module provides type-safe configuration loading from an optional YAML
//! file and environment variables using the `config` and `dotenvy` crates.
//! Environment variables use the `EXPANSION_ANALYSIS` prefix and nested
//! values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use expansion_analysis::config::AppConfig;
//!
//! let config = AppConfig::load(None).expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reports go to {}", config.output.directory.display());
//! ```

mod analysis;
mod error;
mod logging;
mod output;

pub use analysis::AnalysisConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use output::OutputConfig;

use serde::Deserialize;
use std::path::Path;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "EXPANSION_ANALYSIS";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Decision analysis parameters
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Report output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from an optional file and environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads the given YAML file, if any
    /// 3. Reads environment variables with `EXPANSION_ANALYSIS` prefix,
    ///    which override file values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `EXPANSION_ANALYSIS__ANALYSIS__HURWICZ_ALPHA=0.7` -> `analysis.hurwicz_alpha = 0.7`
    /// - `EXPANSION_ANALYSIS__OUTPUT__FORMAT=json` -> `output.format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The file cannot be read or parsed
    /// - Values cannot be parsed into expected types
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.analysis.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
