//! Report Renderer Port - Turns an analysis report into text.
//!
//! Rendering is a pure consumer of the `AnalysisReport` bundle. Adapters
//! (Markdown tables, JSON) decide the layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::analysis::AnalysisReport;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for rendering analysis reports.
///
/// # Contract
///
/// Implementations must:
/// - Produce identical output for identical reports and options
/// - Never recompute analysis results, only format them
/// - Include a generation timestamp only when `include_metadata` is set
pub trait ReportRenderer: Send + Sync {
    /// Output format produced by this renderer.
    fn format(&self) -> ReportFormat;

    /// Renders the report.
    fn render(
        &self,
        report: &AnalysisReport,
        options: &RenderOptions,
    ) -> Result<String, RenderError>;
}

/// Options for report rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// Include a metadata block with the generation timestamp.
    pub include_metadata: bool,

    /// Timestamp shown in the metadata block; now when unset.
    pub generated_at: Option<DateTime<Utc>>,

    /// Replaces the problem title in the report heading.
    pub title_override: Option<String>,
}

impl RenderOptions {
    /// Options with a metadata block stamped at `generated_at`.
    pub fn with_metadata(generated_at: DateTime<Utc>) -> Self {
        Self {
            include_metadata: true,
            generated_at: Some(generated_at),
            title_override: None,
        }
    }

    /// Sets the title override.
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title_override = Some(title.into());
        self
    }

    /// Heading to render for a report.
    pub fn title<'a>(&'a self, report: &'a AnalysisReport) -> &'a str {
        self.title_override
            .as_deref()
            .unwrap_or(report.problem.title.as_str())
    }

    /// Timestamp to render, if metadata is enabled.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        if self.include_metadata {
            Some(self.generated_at.unwrap_or_else(Utc::now))
        } else {
            None
        }
    }
}

/// Report output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Markdown document with one table per result.
    #[default]
    Markdown,

    /// The report bundle as JSON.
    Json,
}

impl ReportFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Markdown => write!(f, "markdown"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Errors that can occur during rendering.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// Serializer failed.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Report lacks data the layout needs.
    #[error("Missing required data: {field}")]
    MissingData { field: String },
}

impl RenderError {
    /// Creates a missing data error.
    pub fn missing_data(field: impl Into<String>) -> Self {
        Self::MissingData {
            field: field.into(),
        }
    }
}

impl From<RenderError> for DomainError {
    fn from(err: RenderError) -> Self {
        DomainError::new(ErrorCode::RenderFailed, err.to_string())
    }
}
