//! Local Filesystem Storage Adapter - Implementation of ReportStorage.
//!
//! Writes rendered reports into one output directory using atomic writes
//! and SHA-256 checksums.

use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::ports::{ReportFormat, ReportStorage, StorageError, StoredReport};

/// Maximum report size allowed (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Local filesystem storage for rendered reports.
///
/// # Atomic Writes
///
/// 1. Write content to `{stem}.{ext}.tmp`
/// 2. Sync to disk
/// 3. Rename to `{stem}.{ext}`
///
/// # Usage
///
/// ```rust,ignore
/// let storage = LocalReportStorage::new("reports");
/// let stored = storage.store("expansion_analysis", ReportFormat::Markdown, &markdown)?;
/// println!("Checksum: {}", stored.checksum);
/// ```
#[derive(Debug, Clone)]
pub struct LocalReportStorage {
    base_path: PathBuf,
    max_size_bytes: u64,
}

impl LocalReportStorage {
    /// Creates a storage rooted at `base_path`; the directory is created on first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            max_size_bytes: MAX_FILE_SIZE_BYTES,
        }
    }

    /// Overrides the maximum report size.
    pub fn with_max_size(mut self, max_size_bytes: u64) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }

    /// Returns the output directory.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    /// Computes the hex SHA-256 checksum of the given content.
    fn compute_checksum(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn validate_stem(file_stem: &str) -> Result<(), StorageError> {
        if file_stem.trim().is_empty() {
            return Err(StorageError::invalid_name(file_stem, "name is empty"));
        }
        if file_stem.contains('/') || file_stem.contains('\\') {
            return Err(StorageError::invalid_name(
                file_stem,
                "name contains a path separator",
            ));
        }
        if file_stem == "." || file_stem == ".." {
            return Err(StorageError::invalid_name(file_stem, "name is reserved"));
        }
        Ok(())
    }

    fn map_io(err: io::Error, action: &str, path: &std::path::Path) -> StorageError {
        match err.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => StorageError::io(format!("Failed to {} {}: {}", action, path.display(), err)),
        }
    }
}

impl ReportStorage for LocalReportStorage {
    fn store(
        &self,
        file_stem: &str,
        format: ReportFormat,
        content: &str,
    ) -> Result<StoredReport, StorageError> {
        Self::validate_stem(file_stem)?;

        let size = content.len() as u64;
        if size > self.max_size_bytes {
            return Err(StorageError::TooLarge {
                size_bytes: size,
                max_bytes: self.max_size_bytes,
            });
        }

        fs::create_dir_all(&self.base_path)
            .map_err(|e| Self::map_io(e, "create directory", &self.base_path))?;

        let final_path = self.path_for(file_stem, format);
        let temp_path = final_path.with_extension(format!("{}.tmp", format.extension()));

        let mut file =
            fs::File::create(&temp_path).map_err(|e| Self::map_io(e, "create", &temp_path))?;
        let written = file
            .write_all(content.as_bytes())
            .map_err(|e| Self::map_io(e, "write", &temp_path))
            .and_then(|_| {
                file.sync_all()
                    .map_err(|e| Self::map_io(e, "sync", &temp_path))
            });
        drop(file);

        let renamed = written.and_then(|_| {
            fs::rename(&temp_path, &final_path)
                .map_err(|e| Self::map_io(e, "rename into", &final_path))
        });
        if let Err(err) = renamed {
            // Best effort; the original error is the one reported.
            let _ = fs::remove_file(&temp_path);
            return Err(err);
        }

        let checksum = Self::compute_checksum(content);
        debug!(
            path = %final_path.display(),
            size_bytes = size,
            checksum = %checksum,
            "Report stored"
        );

        Ok(StoredReport {
            path: final_path,
            size_bytes: size,
            checksum,
        })
    }

    fn path_for(&self, file_stem: &str, format: ReportFormat) -> PathBuf {
        self.base_path
            .join(format!("{}.{}", file_stem, format.extension()))
    }
}
