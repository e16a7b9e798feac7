//! Report Storage Port - Persisting rendered reports.

use std::path::PathBuf;
use thiserror::Error;

use super::ReportFormat;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for writing rendered reports.
///
/// # Contract
///
/// Implementations must:
/// - Write atomically (no partial content on failure)
/// - Compute a SHA-256 checksum of the written content
/// - Reject file stems that are empty or contain path separators
///
/// # Usage
///
/// ```rust,ignore
/// let storage: &dyn ReportStorage = get_storage();
/// let stored = storage.store("expansion_analysis", ReportFormat::Markdown, &markdown)?;
/// println!("{} ({} bytes)", stored.path.display(), stored.size_bytes);
/// ```
pub trait ReportStorage: Send + Sync {
    /// Writes the content to `<base>/<file_stem>.<extension>`.
    fn store(
        &self,
        file_stem: &str,
        format: ReportFormat,
        content: &str,
    ) -> Result<StoredReport, StorageError>;

    /// Path a report with this stem and format would be written to.
    fn path_for(&self, file_stem: &str, format: ReportFormat) -> PathBuf;
}

/// Where and what was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReport {
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Hex-encoded SHA-256 of the content.
    pub checksum: String,
}

/// Errors that can occur during report storage.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// File stem cannot be used as a file name.
    #[error("Invalid file name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Content exceeds the storage limit.
    #[error("Report too large: {size_bytes} bytes (max: {max_bytes})")]
    TooLarge { size_bytes: u64, max_bytes: u64 },

    /// Permission denied writing the file.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// IO error during file operation.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl StorageError {
    /// Creates an invalid name error.
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        DomainError::new(ErrorCode::StorageFailed, err.to_string())
    }
}
