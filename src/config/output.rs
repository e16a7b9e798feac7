//! Output configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::ports::{RenderOptions, ReportFormat};

/// Where and how reports are written
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Report format
    #[serde(default)]
    pub format: ReportFormat,

    /// Directory reports are written into
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// File name of the report, without extension
    #[serde(default = "default_file_stem")]
    pub file_stem: String,

    /// Stamp reports with a generation timestamp
    #[serde(default = "default_true")]
    pub include_metadata: bool,

    /// Indent JSON output
    #[serde(default = "default_true")]
    pub pretty_json: bool,
}

impl OutputConfig {
    /// Validate output configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.directory.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("output.directory"));
        }
        if self.file_stem.trim().is_empty() {
            return Err(ValidationError::MissingRequired("output.file_stem"));
        }
        Ok(())
    }

    /// Render options derived from this configuration.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            include_metadata: self.include_metadata,
            ..Default::default()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            directory: default_directory(),
            file_stem: default_file_stem(),
            include_metadata: true,
            pretty_json: true,
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("reports")
}

fn default_file_stem() -> String {
    "expansion_analysis".to_string()
}

fn default_true() -> bool {
    true
}
