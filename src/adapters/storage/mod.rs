//! Storage adapters.

mod local_report_storage;

pub use local_report_storage::LocalReportStorage;
