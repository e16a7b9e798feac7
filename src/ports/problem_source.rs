//! Problem Source Port - Where decision problems come from.
//!
//! The application asks a source for a validated `DecisionProblem`;
//! adapters decide whether it is read from a file or built in.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::problem::DecisionProblem;

/// Port for loading decision problems.
///
/// # Contract
///
/// Implementations must:
/// - Return a fully validated problem or an error, never a partial one
/// - Apply `tolerance` to the probability-sum check of both distributions
/// - Be side-effect free apart from reading their input
pub trait ProblemSource: Send + Sync {
    /// Loads the problem.
    fn load(&self, tolerance: f64) -> Result<DecisionProblem, ProblemSourceError>;

    /// Human-readable description of where the problem comes from.
    fn describe(&self) -> String;
}

/// Errors that can occur while loading a problem.
#[derive(Debug, Clone, Error)]
pub enum ProblemSourceError {
    /// Problem file does not exist.
    #[error("Problem file not found: {path}")]
    NotFound { path: String },

    /// Problem file could not be read.
    #[error("Cannot read problem file {path}: {message}")]
    Unreadable { path: String, message: String },

    /// Problem file is not a valid problem document.
    #[error("Cannot parse problem from {origin}: {message}")]
    Parse { origin: String, message: String },

    /// Problem document is well formed but describes an invalid problem.
    #[error("Invalid problem: {0}")]
    Invalid(#[from] ValidationError),
}

impl ProblemSourceError {
    /// Creates an unreadable error.
    pub fn unreadable(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unreadable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: message.into(),
        }
    }
}

impl From<ProblemSourceError> for DomainError {
    fn from(err: ProblemSourceError) -> Self {
        let message = err.to_string();
        match err {
            ProblemSourceError::NotFound { path } => {
                DomainError::new(ErrorCode::ProblemNotFound, message).with_detail("path", path)
            }
            ProblemSourceError::Unreadable { path, .. } => {
                DomainError::new(ErrorCode::ProblemUnreadable, message).with_detail("path", path)
            }
            ProblemSourceError::Parse { .. } => DomainError::new(ErrorCode::InvalidFormat, message),
            ProblemSourceError::Invalid(inner) => inner.into(),
        }
    }
}
