//! Payoff Matrix - Net monthly value per (alternative, scenario).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::foundation::{AlternativeId, ScenarioId, ValidationError};
use crate::domain::problem::{CostTable, RevenueTable, Scenario};

/// Immutable grid of net payoffs, rows in alternative order and columns in
/// scenario order.
///
/// Every row has exactly one finite value per scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PayoffMatrixRecord")]
pub struct PayoffMatrix {
    alternative_ids: Vec<AlternativeId>,
    scenario_ids: Vec<ScenarioId>,
    payoffs: Vec<Vec<f64>>,
}

/// Serialized shape of a payoff matrix, checked by `from_rows` on the way in.
#[derive(Deserialize)]
struct PayoffMatrixRecord {
    alternative_ids: Vec<AlternativeId>,
    scenario_ids: Vec<ScenarioId>,
    payoffs: Vec<Vec<f64>>,
}

impl TryFrom<PayoffMatrixRecord> for PayoffMatrix {
    type Error = ValidationError;

    fn try_from(record: PayoffMatrixRecord) -> Result<Self, Self::Error> {
        Self::from_rows(record.alternative_ids, record.scenario_ids, record.payoffs)
    }
}

impl PayoffMatrix {
    /// Derives payoffs as revenue minus total monthly cost.
    ///
    /// # Algorithm
    /// For each alternative: total = Σ(cost components);
    /// payoff[alt][s] = revenue[alt][s] - total
    ///
    /// # Errors
    /// - Empty scenario set or cost table
    /// - Alternative priced but not projected, or projected but not priced
    /// - Revenue row missing a scenario or naming an unknown one
    /// - Duplicate scenarios
    pub fn build(
        scenarios: &[Scenario],
        costs: &CostTable,
        revenues: &RevenueTable,
    ) -> Result<Self, ValidationError> {
        if scenarios.is_empty() {
            return Err(ValidationError::empty_field("scenarios"));
        }
        if costs.is_empty() {
            return Err(ValidationError::empty_field("alternatives"));
        }

        let scenario_ids: Vec<ScenarioId> = scenarios.iter().map(|s| s.id.clone()).collect();
        for (index, id) in scenario_ids.iter().enumerate() {
            if scenario_ids[..index].contains(id) {
                return Err(ValidationError::duplicate("scenarios", id.as_str()));
            }
        }

        for row in revenues.entries() {
            if costs.get(&row.alternative).is_none() {
                return Err(ValidationError::missing_alternative(
                    "cost table",
                    row.alternative.as_str(),
                ));
            }
            for (scenario, _) in &row.by_scenario {
                if !scenario_ids.contains(scenario) {
                    return Err(ValidationError::unknown_scenario(
                        "revenue table",
                        scenario.as_str(),
                    ));
                }
            }
        }

        let mut alternative_ids = Vec::with_capacity(costs.len());
        let mut payoffs = Vec::with_capacity(costs.len());

        for entry in costs.entries() {
            let alternative = &entry.alternative;
            let revenue = revenues.get(alternative).ok_or_else(|| {
                ValidationError::missing_alternative("revenue table", alternative.as_str())
            })?;
            let total_cost = entry.total();

            let mut row = Vec::with_capacity(scenario_ids.len());
            for scenario in &scenario_ids {
                let amount = revenue.amount(scenario).ok_or_else(|| {
                    ValidationError::missing_scenario(
                        "revenue table",
                        alternative.as_str(),
                        scenario.as_str(),
                    )
                })?;
                let payoff = amount - total_cost;
                if !payoff.is_finite() {
                    return Err(ValidationError::not_finite(
                        format!("payoff[{}][{}]", alternative, scenario),
                        payoff,
                    ));
                }
                row.push(payoff);
            }

            debug!(
                alternative = %alternative,
                total_cost = total_cost,
                "Derived payoff row"
            );

            alternative_ids.push(alternative.clone());
            payoffs.push(row);
        }

        Ok(Self {
            alternative_ids,
            scenario_ids,
            payoffs,
        })
    }

    /// Creates a matrix from precomputed payoffs.
    ///
    /// Empty axes are accepted here; evaluators reject them.
    pub fn from_rows(
        alternative_ids: Vec<AlternativeId>,
        scenario_ids: Vec<ScenarioId>,
        payoffs: Vec<Vec<f64>>,
    ) -> Result<Self, ValidationError> {
        if payoffs.len() != alternative_ids.len() {
            return Err(ValidationError::shape_mismatch(
                "payoff rows",
                alternative_ids.len(),
                payoffs.len(),
            ));
        }
        for (index, id) in alternative_ids.iter().enumerate() {
            if alternative_ids[..index].contains(id) {
                return Err(ValidationError::duplicate("alternatives", id.as_str()));
            }
        }
        for (index, id) in scenario_ids.iter().enumerate() {
            if scenario_ids[..index].contains(id) {
                return Err(ValidationError::duplicate("scenarios", id.as_str()));
            }
        }
        for (alternative, row) in alternative_ids.iter().zip(&payoffs) {
            if row.len() != scenario_ids.len() {
                return Err(ValidationError::shape_mismatch(
                    format!("payoff row of '{}'", alternative),
                    scenario_ids.len(),
                    row.len(),
                ));
            }
            if let Some(bad) = row.iter().find(|v| !v.is_finite()) {
                return Err(ValidationError::not_finite(
                    format!("payoff row of '{}'", alternative),
                    *bad,
                ));
            }
        }

        Ok(Self {
            alternative_ids,
            scenario_ids,
            payoffs,
        })
    }

    /// Alternatives in canonical order.
    pub fn alternative_ids(&self) -> &[AlternativeId] {
        &self.alternative_ids
    }

    /// Scenarios in canonical order.
    pub fn scenario_ids(&self) -> &[ScenarioId] {
        &self.scenario_ids
    }

    /// All rows, aligned with `alternative_ids()`.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.payoffs
    }

    /// Row of one alternative.
    pub fn row(&self, alternative: &AlternativeId) -> Option<&[f64]> {
        self.alternative_ids
            .iter()
            .position(|a| a == alternative)
            .map(|i| self.payoffs[i].as_slice())
    }

    /// Payoff of one cell.
    pub fn get(&self, alternative: &AlternativeId, scenario: &ScenarioId) -> Option<f64> {
        let column = self.scenario_ids.iter().position(|s| s == scenario)?;
        self.row(alternative).map(|row| row[column])
    }

    /// Column of one scenario, aligned with `alternative_ids()`.
    pub fn column(&self, scenario: &ScenarioId) -> Option<Vec<f64>> {
        let column = self.scenario_ids.iter().position(|s| s == scenario)?;
        Some(self.payoffs.iter().map(|row| row[column]).collect())
    }

    /// Number of alternatives.
    pub fn alternative_count(&self) -> usize {
        self.alternative_ids.len()
    }

    /// Number of scenarios.
    pub fn scenario_count(&self) -> usize {
        self.scenario_ids.len()
    }

    /// Returns true if either axis is empty.
    pub fn is_empty(&self) -> bool {
        self.alternative_ids.is_empty() || self.scenario_ids.is_empty()
    }
}
