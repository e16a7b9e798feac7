//! Probability distributions over demand scenarios.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Probability, ScenarioId, ValidationError};

/// Sum tolerance used when none is configured.
pub const DEFAULT_PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Loosest sum tolerance accepted anywhere. Deserialized distributions are
/// checked against it; reports re-check against the configured tolerance.
pub const MAX_PROBABILITY_TOLERANCE: f64 = 0.01;

/// A named mapping scenario -> probability whose values sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DistributionRecord")]
pub struct ProbabilityDistribution {
    name: String,
    entries: Vec<(ScenarioId, Probability)>,
}

#[derive(Deserialize)]
struct DistributionRecord {
    name: String,
    entries: Vec<(ScenarioId, f64)>,
}

impl TryFrom<DistributionRecord> for ProbabilityDistribution {
    type Error = ValidationError;

    fn try_from(record: DistributionRecord) -> Result<Self, Self::Error> {
        Self::try_new(record.name, record.entries, MAX_PROBABILITY_TOLERANCE)
    }
}

impl ProbabilityDistribution {
    /// Creates a distribution, validating each value and the total.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name or the entry list is empty
    /// - `OutOfRange` / `NotFinite` for an invalid probability
    /// - `Duplicate` if a scenario is listed twice
    /// - `ProbabilitySum` if the values do not sum to 1.0 within `tolerance`
    pub fn try_new(
        name: impl Into<String>,
        entries: Vec<(ScenarioId, f64)>,
        tolerance: f64,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("distribution name"));
        }
        if entries.is_empty() {
            return Err(ValidationError::empty_field(format!("{} distribution", name)));
        }

        let mut validated: Vec<(ScenarioId, Probability)> = Vec::with_capacity(entries.len());
        for (scenario, value) in entries {
            if validated.iter().any(|(s, _)| s == &scenario) {
                return Err(ValidationError::duplicate(&name, scenario.as_str()));
            }
            let probability = Probability::try_new(value).map_err(|err| match err {
                ValidationError::OutOfRange {
                    min, max, actual, ..
                } => ValidationError::OutOfRange {
                    field: format!("{}[{}]", name, scenario),
                    min,
                    max,
                    actual,
                },
                ValidationError::NotFinite { actual, .. } => {
                    ValidationError::not_finite(format!("{}[{}]", name, scenario), actual)
                }
                other => other,
            })?;
            validated.push((scenario, probability));
        }

        let sum: f64 = validated.iter().map(|(_, p)| p.value()).sum();
        if (sum - 1.0).abs() > tolerance {
            return Err(ValidationError::ProbabilitySum {
                distribution: name,
                sum,
                tolerance,
            });
        }

        Ok(Self {
            name,
            entries: validated,
        })
    }

    /// Distribution name ("prior", "posterior").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in input order.
    pub fn entries(&self) -> &[(ScenarioId, Probability)] {
        &self.entries
    }

    /// Probability of one scenario.
    pub fn probability_of(&self, scenario: &ScenarioId) -> Option<Probability> {
        self.entries
            .iter()
            .find(|(s, _)| s == scenario)
            .map(|(_, p)| *p)
    }

    /// Returns the number of scenarios covered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no scenario is covered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks that this distribution covers exactly the given scenario set.
    pub fn ensure_covers(&self, scenarios: &[ScenarioId]) -> Result<(), ValidationError> {
        for scenario in scenarios {
            if self.probability_of(scenario).is_none() {
                return Err(ValidationError::missing_scenario(
                    "probability distribution",
                    &self.name,
                    scenario.as_str(),
                ));
            }
        }
        for (scenario, _) in &self.entries {
            if !scenarios.contains(scenario) {
                return Err(ValidationError::unknown_scenario(&self.name, scenario.as_str()));
            }
        }
        Ok(())
    }

    /// Probabilities aligned with the given scenario order.
    pub fn aligned(&self, scenarios: &[ScenarioId]) -> Result<Vec<f64>, ValidationError> {
        self.ensure_covers(scenarios)?;
        Ok(scenarios
            .iter()
            .filter_map(|s| self.probability_of(s))
            .map(|p| p.value())
            .collect())
    }
}
