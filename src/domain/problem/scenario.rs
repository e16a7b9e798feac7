//! Demand scenarios and their canonical ordering.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{ScenarioId, ValidationError};

/// A mutually exclusive future state of demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    /// Human-readable label used by renderers.
    pub label: String,
}

impl Scenario {
    /// Creates a scenario whose label is its identifier.
    pub fn new(id: ScenarioId) -> Self {
        let label = id.as_str().to_string();
        Self { id, label }
    }

    /// Creates a scenario with a display label.
    pub fn with_label(id: ScenarioId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Checks that a scenario list is non-empty and free of duplicates.
pub(crate) fn validate_scenarios(scenarios: &[Scenario]) -> Result<(), ValidationError> {
    if scenarios.is_empty() {
        return Err(ValidationError::empty_field("scenarios"));
    }

    let mut seen = HashSet::new();
    for scenario in scenarios {
        if !seen.insert(scenario.id.as_str()) {
            return Err(ValidationError::duplicate("scenarios", scenario.id.as_str()));
        }
    }

    Ok(())
}
