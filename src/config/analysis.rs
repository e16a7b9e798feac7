//! Analysis configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::analysis::{AnalysisSettings, StudyBaseline, TieBreak};
use crate::domain::foundation::HurwiczAlpha;
use crate::domain::problem::{DEFAULT_PROBABILITY_TOLERANCE, MAX_PROBABILITY_TOLERANCE};

/// Parameters of the decision analysis
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Optimism coefficient of the Hurwicz criterion
    #[serde(default = "default_hurwicz_alpha")]
    pub hurwicz_alpha: f64,

    /// How ties between equally scored alternatives are broken
    #[serde(default)]
    pub tie_break: TieBreak,

    /// Reference value the net-of-study expected value is compared against
    #[serde(default)]
    pub study_baseline: StudyBaseline,

    /// Accepted deviation of a probability sum from 1
    #[serde(default = "default_probability_tolerance")]
    pub probability_tolerance: f64,
}

impl AnalysisConfig {
    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.hurwicz_alpha) {
            return Err(ValidationError::InvalidHurwiczAlpha(self.hurwicz_alpha));
        }
        if !(self.probability_tolerance > 0.0
            && self.probability_tolerance <= MAX_PROBABILITY_TOLERANCE)
        {
            return Err(ValidationError::InvalidTolerance(self.probability_tolerance));
        }
        Ok(())
    }

    /// Converts into the settings consumed by the analysis.
    pub fn to_settings(&self) -> Result<AnalysisSettings, ValidationError> {
        self.validate()?;
        let hurwicz_alpha = HurwiczAlpha::try_new(self.hurwicz_alpha)
            .map_err(|_| ValidationError::InvalidHurwiczAlpha(self.hurwicz_alpha))?;

        Ok(AnalysisSettings {
            hurwicz_alpha,
            tie_break: self.tie_break,
            study_baseline: self.study_baseline,
            probability_tolerance: self.probability_tolerance,
        })
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            hurwicz_alpha: default_hurwicz_alpha(),
            tie_break: TieBreak::default(),
            study_baseline: StudyBaseline::default(),
            probability_tolerance: default_probability_tolerance(),
        }
    }
}

fn default_hurwicz_alpha() -> f64 {
    HurwiczAlpha::DEFAULT_VALUE
}

fn default_probability_tolerance() -> f64 {
    DEFAULT_PROBABILITY_TOLERANCE
}
