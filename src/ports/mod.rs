//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the analysis engine and the outside world. Adapters implement these ports.
//!
//! - `ProblemSource` - Loads a validated decision problem
//! - `ReportRenderer` - Formats an analysis report
//! - `ReportStorage` - Persists a rendered report

mod problem_source;
mod report_renderer;
mod report_storage;

pub use problem_source::{ProblemSource, ProblemSourceError};
pub use report_renderer::{RenderError, RenderOptions, ReportFormat, ReportRenderer};
pub use report_storage::{ReportStorage, StorageError, StoredReport};
