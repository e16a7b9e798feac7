//! GenerateReportHandler - Command handler for running the analysis and
//! producing a rendered report.

use std::sync::Arc;

use tracing::info;

use crate::domain::analysis::{assemble_report, AnalysisReport, AnalysisSettings};
use crate::domain::foundation::DomainError;
use crate::domain::problem::DecisionProblem;
use crate::ports::{RenderOptions, ReportRenderer, ReportStorage, StoredReport};

/// Command to analyse a problem and render the report.
#[derive(Debug, Clone)]
pub struct GenerateReportCommand {
    pub problem: DecisionProblem,
    pub settings: AnalysisSettings,
    pub render_options: RenderOptions,
    /// File name without extension; used only when storage is configured.
    pub file_stem: String,
}

/// Result of a successful report generation.
#[derive(Debug, Clone)]
pub struct GenerateReportResult {
    pub report: AnalysisReport,
    pub rendered: String,
    /// Present when the handler has storage.
    pub stored: Option<StoredReport>,
}

/// Handler for generating reports.
pub struct GenerateReportHandler {
    renderer: Arc<dyn ReportRenderer>,
    storage: Option<Arc<dyn ReportStorage>>,
}

impl GenerateReportHandler {
    /// Creates a handler that only renders.
    pub fn new(renderer: Arc<dyn ReportRenderer>) -> Self {
        Self {
            renderer,
            storage: None,
        }
    }

    /// Adds storage for rendered reports.
    pub fn with_storage(mut self, storage: Arc<dyn ReportStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn handle(&self, cmd: GenerateReportCommand) -> Result<GenerateReportResult, DomainError> {
        // 1. Run the analysis
        let report = assemble_report(&cmd.problem, &cmd.settings)?;

        // 2. Render
        let rendered = self.renderer.render(&report, &cmd.render_options)?;

        // 3. Persist when configured
        let stored = match &self.storage {
            Some(storage) => {
                Some(storage.store(&cmd.file_stem, self.renderer.format(), &rendered)?)
            }
            None => None,
        };

        let destination = stored
            .as_ref()
            .map(|s| s.path.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        info!(
            title = %report.problem.title,
            format = %self.renderer.format(),
            recommended = %report.recommendation.alternative,
            recommend_study = report.information_value.recommend_study,
            stored = %destination,
            "Report generated"
        );

        Ok(GenerateReportResult {
            report,
            rendered,
            stored,
        })
    }
}
