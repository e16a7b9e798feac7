//! Hurwicz coefficient of optimism.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Weight given to the best outcome by the Hurwicz criterion, in [0, 1].
///
/// `0.0` reduces Hurwicz to Maximin, `1.0` to Maximax.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct HurwiczAlpha(f64);

impl HurwiczAlpha {
    /// Coefficient used when none is configured.
    pub const DEFAULT_VALUE: f64 = 0.6;

    /// Creates a coefficient, returning error if outside [0, 1].
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::not_finite("hurwicz_alpha", value));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("hurwicz_alpha", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the raw coefficient.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Blends a best and a worst outcome.
    pub fn blend(&self, best: f64, worst: f64) -> f64 {
        self.0 * best + (1.0 - self.0) * worst
    }
}

impl Default for HurwiczAlpha {
    fn default() -> Self {
        Self(Self::DEFAULT_VALUE)
    }
}

impl TryFrom<f64> for HurwiczAlpha {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<HurwiczAlpha> for f64 {
    fn from(alpha: HurwiczAlpha) -> Self {
        alpha.0
    }
}

impl fmt::Display for HurwiczAlpha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
