//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur while constructing or validating decision inputs.
///
/// Every variant is a configuration problem: the input tables are malformed
/// or incomplete, and running the analysis would be meaningless.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' must be a finite number, got {actual}")]
    NotFinite { field: String, actual: f64 },

    #[error("{table} has no entry for alternative '{alternative}'")]
    MissingAlternative { table: String, alternative: String },

    #[error("{table} has no entry for scenario '{scenario}' of '{owner}'")]
    MissingScenario {
        table: String,
        owner: String,
        scenario: String,
    },

    #[error("{table} references unknown scenario '{scenario}'")]
    UnknownScenario { table: String, scenario: String },

    #[error("{table} lists '{key}' more than once")]
    Duplicate { table: String, key: String },

    #[error("Probabilities of '{distribution}' sum to {sum}, expected 1.0 (tolerance {tolerance})")]
    ProbabilitySum {
        distribution: String,
        sum: f64,
        tolerance: f64,
    },

    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates a non-finite number validation error.
    pub fn not_finite(field: impl Into<String>, actual: f64) -> Self {
        ValidationError::NotFinite {
            field: field.into(),
            actual,
        }
    }

    /// Creates a missing alternative error for the named table.
    pub fn missing_alternative(table: impl Into<String>, alternative: impl Into<String>) -> Self {
        ValidationError::MissingAlternative {
            table: table.into(),
            alternative: alternative.into(),
        }
    }

    /// Creates a missing scenario error for one row of the named table.
    pub fn missing_scenario(
        table: impl Into<String>,
        owner: impl Into<String>,
        scenario: impl Into<String>,
    ) -> Self {
        ValidationError::MissingScenario {
            table: table.into(),
            owner: owner.into(),
            scenario: scenario.into(),
        }
    }

    /// Creates an unknown scenario error.
    pub fn unknown_scenario(table: impl Into<String>, scenario: impl Into<String>) -> Self {
        ValidationError::UnknownScenario {
            table: table.into(),
            scenario: scenario.into(),
        }
    }

    /// Creates a duplicate key error.
    pub fn duplicate(table: impl Into<String>, key: impl Into<String>) -> Self {
        ValidationError::Duplicate {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Creates a shape mismatch error.
    pub fn shape_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        ValidationError::ShapeMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code matching this validation failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } | ValidationError::NotFinite { .. } => {
                ErrorCode::OutOfRange
            }
            ValidationError::MissingAlternative { .. }
            | ValidationError::MissingScenario { .. }
            | ValidationError::UnknownScenario { .. }
            | ValidationError::Duplicate { .. }
            | ValidationError::ShapeMismatch { .. } => ErrorCode::IncompleteTable,
            ValidationError::ProbabilitySum { .. } => ErrorCode::InvalidProbability,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        }
    }
}

/// Errors surfaced by the decision-analysis engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Malformed or incomplete input tables.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ValidationError),

    /// A computation produced a value that cannot be ranked.
    #[error("Degenerate arithmetic in {context}: {reason}")]
    ArithmeticDegenerate { context: String, reason: String },
}

impl AnalysisError {
    /// Creates an arithmetic degenerate case error.
    pub fn degenerate(context: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::ArithmeticDegenerate {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error comes from malformed input.
    pub fn is_configuration(&self) -> bool {
        matches!(self, AnalysisError::Configuration(_))
    }

    /// Returns the error code for this analysis failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::Configuration(inner) => inner.code(),
            AnalysisError::ArithmeticDegenerate { .. } => ErrorCode::DegenerateArithmetic,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,
    IncompleteTable,
    InvalidProbability,

    // Analysis errors
    DegenerateArithmetic,

    // Input errors
    ProblemNotFound,
    ProblemUnreadable,

    // Output errors
    RenderFailed,
    StorageFailed,

    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::IncompleteTable => "INCOMPLETE_TABLE",
            ErrorCode::InvalidProbability => "INVALID_PROBABILITY",
            ErrorCode::DegenerateArithmetic => "DEGENERATE_ARITHMETIC",
            ErrorCode::ProblemNotFound => "PROBLEM_NOT_FOUND",
            ErrorCode::ProblemUnreadable => "PROBLEM_UNREADABLE",
            ErrorCode::RenderFailed => "RENDER_FAILED",
            ErrorCode::StorageFailed => "STORAGE_FAILED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

impl From<AnalysisError> for DomainError {
    fn from(err: AnalysisError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
