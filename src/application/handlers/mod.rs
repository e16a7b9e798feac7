//! Application handlers.
//!
//! Command handlers that orchestrate domain operations through ports.

pub mod report;

pub use report::{GenerateReportCommand, GenerateReportHandler, GenerateReportResult};
