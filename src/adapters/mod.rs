//! Adapters - Implementations of port interfaces.
//!
//! - `problem` - Problem sources (YAML file, built-in reference case)
//! - `report` - Report renderers (Markdown, JSON)
//! - `storage` - Report storage on the local filesystem

pub mod problem;
pub mod report;
pub mod storage;

pub use problem::{ReferenceProblemSource, YamlProblemSource};
pub use report::{JsonReportRenderer, MarkdownReportRenderer};
pub use storage::LocalReportStorage;
