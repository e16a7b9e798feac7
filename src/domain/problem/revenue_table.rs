//! Revenue Table - Projected monthly revenue per alternative and scenario.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AlternativeId, ScenarioId, ValidationError};

/// Projected revenue of one alternative, per scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeRevenue {
    pub alternative: AlternativeId,
    pub by_scenario: Vec<(ScenarioId, f64)>,
}

impl AlternativeRevenue {
    /// Revenue under one scenario.
    pub fn amount(&self, scenario: &ScenarioId) -> Option<f64> {
        self.by_scenario
            .iter()
            .find(|(s, _)| s == scenario)
            .map(|(_, amount)| *amount)
    }
}

/// Revenue keyed by alternative, then scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueTable {
    entries: Vec<AlternativeRevenue>,
}

impl RevenueTable {
    /// Creates a builder for constructing a revenue table.
    pub fn builder() -> RevenueTableBuilder {
        RevenueTableBuilder::new()
    }

    /// Returns the rows in input order.
    pub fn entries(&self) -> &[AlternativeRevenue] {
        &self.entries
    }

    /// Gets the row of one alternative.
    pub fn get(&self, alternative: &AlternativeId) -> Option<&AlternativeRevenue> {
        self.entries.iter().find(|e| &e.alternative == alternative)
    }

    /// Revenue of one alternative under one scenario.
    pub fn amount(&self, alternative: &AlternativeId, scenario: &ScenarioId) -> Option<f64> {
        self.get(alternative).and_then(|row| row.amount(scenario))
    }

    /// Returns true if the table has no alternatives.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of alternatives.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Builder for constructing RevenueTable instances.
#[derive(Debug, Default)]
pub struct RevenueTableBuilder {
    entries: Vec<AlternativeRevenue>,
}

impl RevenueTableBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one revenue cell, creating the alternative row on first use.
    pub fn revenue(
        mut self,
        alternative: AlternativeId,
        scenario: ScenarioId,
        amount: f64,
    ) -> Self {
        match self.entries.iter_mut().find(|e| e.alternative == alternative) {
            Some(row) => row.by_scenario.push((scenario, amount)),
            None => self.entries.push(AlternativeRevenue {
                alternative,
                by_scenario: vec![(scenario, amount)],
            }),
        }
        self
    }

    /// Adds a full row for one alternative.
    pub fn alternative(
        mut self,
        alternative: AlternativeId,
        by_scenario: Vec<(ScenarioId, f64)>,
    ) -> Self {
        for (scenario, amount) in by_scenario {
            self = self.revenue(alternative.clone(), scenario, amount);
        }
        self
    }

    /// Builds the revenue table, rejecting repeated cells and non-finite amounts.
    pub fn build(self) -> Result<RevenueTable, ValidationError> {
        for row in &self.entries {
            for (index, (scenario, amount)) in row.by_scenario.iter().enumerate() {
                if row.by_scenario[..index].iter().any(|(s, _)| s == scenario) {
                    return Err(ValidationError::duplicate(
                        "revenue table",
                        format!("{}/{}", row.alternative, scenario),
                    ));
                }
                if !amount.is_finite() {
                    return Err(ValidationError::not_finite(
                        format!("revenue of '{}' under '{}'", row.alternative, scenario),
                        *amount,
                    ));
                }
            }
        }

        Ok(RevenueTable {
            entries: self.entries,
        })
    }
}
