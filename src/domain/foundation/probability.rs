//! Probability value object (0.0-1.0 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A finite value between 0.0 and 1.0 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Probability(f64);

impl Probability {
    /// Impossible outcome.
    pub const ZERO: Self = Self(0.0);

    /// Certain outcome.
    pub const ONE: Self = Self(1.0);

    /// Creates a Probability, returning error if not finite or out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::not_finite("probability", value));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("probability", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the value on a 0-100 scale.
    pub fn as_percent(&self) -> f64 {
        self.0 * 100.0
    }
}

impl Default for Probability {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<f64> for Probability {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Probability> for f64 {
    fn from(p: Probability) -> Self {
        p.0
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.as_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_try_new_accepts_valid_values() {
        assert!(Probability::try_new(0.0).is_ok());
        assert!(Probability::try_new(0.35).is_ok());
        assert!(Probability::try_new(1.0).is_ok());
    }

    #[test]
    fn probability_try_new_rejects_out_of_range() {
        let result = Probability::try_new(1.2);
        match result {
            Err(ValidationError::OutOfRange { field, min, max, actual }) => {
                assert_eq!(field, "probability");
                assert_eq!(min, 0.0);
                assert_eq!(max, 1.0);
                assert_eq!(actual, 1.2);
            }
            _ => panic!("Expected OutOfRange error"),
        }
        assert!(Probability::try_new(-0.1).is_err());
    }

    #[test]
    fn probability_try_new_rejects_nan() {
        assert!(matches!(
            Probability::try_new(f64::NAN),
            Err(ValidationError::NotFinite { .. })
        ));
    }

    #[test]
    fn probability_displays_as_percent() {
        assert_eq!(format!("{}", Probability::try_new(0.2).unwrap()), "20.0%");
        assert_eq!(format!("{}", Probability::ONE), "100.0%");
    }

    #[test]
    fn probability_serializes_to_json() {
        let p = Probability::try_new(0.3).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "0.3");
    }

    #[test]
    fn probability_deserialization_validates_range() {
        let p: Probability = serde_json::from_str("0.5").unwrap();
        assert_eq!(p.value(), 0.5);
        assert!(serde_json::from_str::<Probability>("1.5").is_err());
    }

    #[test]
    fn probability_default_is_zero() {
        assert_eq!(Probability::default(), Probability::ZERO);
    }
}
