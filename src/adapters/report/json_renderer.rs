//! JSON report renderer.
//!
//! Serializes the full report bundle. With metadata enabled the bundle is
//! wrapped in an envelope carrying the title and generation timestamp.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::analysis::AnalysisReport;
use crate::ports::{RenderError, RenderOptions, ReportFormat, ReportRenderer};

/// JSON implementation of ReportRenderer.
#[derive(Debug, Clone)]
pub struct JsonReportRenderer {
    pretty: bool,
}

#[derive(Serialize)]
struct ReportEnvelope<'a> {
    title: &'a str,
    generated_at: DateTime<Utc>,
    report: &'a AnalysisReport,
}

impl JsonReportRenderer {
    /// Creates a renderer producing indented output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Creates a renderer producing single-line output.
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Whether output is indented.
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String, RenderError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.map_err(|e| RenderError::Serialization(e.to_string()))
    }
}

impl Default for JsonReportRenderer {
    fn default() -> Self {
        Self::pretty()
    }
}

impl ReportRenderer for JsonReportRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }

    fn render(
        &self,
        report: &AnalysisReport,
        options: &RenderOptions,
    ) -> Result<String, RenderError> {
        if report.payoff_matrix.is_empty() {
            return Err(RenderError::missing_data("payoff_matrix"));
        }

        match options.timestamp() {
            Some(generated_at) => self.to_json(&ReportEnvelope {
                title: options.title(report),
                generated_at,
                report,
            }),
            None => self.to_json(report),
        }
    }
}
