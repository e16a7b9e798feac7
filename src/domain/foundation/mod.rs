//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the decision-analysis domain.

mod errors;
mod hurwicz_alpha;
mod ids;
mod probability;

pub use errors::{AnalysisError, DomainError, ErrorCode, ValidationError};
pub use hurwicz_alpha::HurwiczAlpha;
pub use ids::{AlternativeId, ScenarioId};
pub use probability::Probability;
