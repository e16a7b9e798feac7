//! ProblemDocument - Serialized form of a DecisionProblem.
//!
//! Scenario-keyed maps use `BTreeMap` so that written documents are stable;
//! canonical scenario order always comes from the `scenarios` list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    CostComponent, CostTable, DecisionProblem, InitialInvestment, ProbabilityDistribution,
    RevenueTable, Scenario,
};
use crate::domain::foundation::{AlternativeId, ScenarioId, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDocument {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostComponentDocument {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeCostsDocument {
    pub alternative: String,
    pub components: Vec<CostComponentDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeRevenueDocument {
    pub alternative: String,
    pub by_scenario: BTreeMap<String, f64>,
}

/// A decision problem as written in a YAML problem file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDocument {
    pub title: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_investment: Option<InitialInvestment>,
    pub scenarios: Vec<ScenarioDocument>,
    pub costs: Vec<AlternativeCostsDocument>,
    pub revenues: Vec<AlternativeRevenueDocument>,
    pub prior: BTreeMap<String, f64>,
    pub posterior: BTreeMap<String, f64>,
    #[serde(default)]
    pub study_cost: f64,
}

impl ProblemDocument {
    /// Converts the document into a validated problem.
    ///
    /// `tolerance` bounds how far each distribution may sum away from 1.0.
    pub fn into_problem(self, tolerance: f64) -> Result<DecisionProblem, ValidationError> {
        let scenarios = self
            .scenarios
            .into_iter()
            .map(|doc| {
                let id = ScenarioId::new(doc.id)?;
                Ok(match doc.label {
                    Some(label) => Scenario::with_label(id, label),
                    None => Scenario::new(id),
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let mut costs = CostTable::builder();
        for row in self.costs {
            let components = row
                .components
                .into_iter()
                .map(|c| CostComponent::new(c.name, c.amount))
                .collect();
            costs = costs.alternative(AlternativeId::new(row.alternative)?, components);
        }

        let mut revenues = RevenueTable::builder();
        for row in self.revenues {
            let alternative = AlternativeId::new(row.alternative)?;
            let by_scenario = in_scenario_order(row.by_scenario, &scenarios)?;
            revenues = revenues.alternative(alternative, by_scenario);
        }

        let prior = ProbabilityDistribution::try_new(
            "prior",
            in_scenario_order(self.prior, &scenarios)?,
            tolerance,
        )?;
        let posterior = ProbabilityDistribution::try_new(
            "posterior",
            in_scenario_order(self.posterior, &scenarios)?,
            tolerance,
        )?;

        DecisionProblem::new(
            self.title,
            self.currency,
            self.initial_investment,
            scenarios,
            costs.build()?,
            revenues.build()?,
            prior,
            posterior,
            self.study_cost,
        )
    }

    /// The built-in reference problem in document form.
    pub fn reference() -> Result<Self, ValidationError> {
        Ok(Self::from(&DecisionProblem::reference()?))
    }
}

/// Reorders scenario-keyed values to follow canonical scenario order.
fn in_scenario_order(
    mut values: BTreeMap<String, f64>,
    scenarios: &[Scenario],
) -> Result<Vec<(ScenarioId, f64)>, ValidationError> {
    let mut entries = Vec::with_capacity(values.len());
    for scenario in scenarios {
        if let Some(value) = values.remove(scenario.id.as_str()) {
            entries.push((scenario.id.clone(), value));
        }
    }
    // Leftovers name scenarios outside the set; keep them so coverage checks report them.
    for (scenario, value) in values {
        entries.push((ScenarioId::new(scenario)?, value));
    }
    Ok(entries)
}

impl From<&DecisionProblem> for ProblemDocument {
    fn from(problem: &DecisionProblem) -> Self {
        let probabilities = |dist: &ProbabilityDistribution| {
            dist.entries()
                .iter()
                .map(|(s, p)| (s.as_str().to_string(), p.value()))
                .collect::<BTreeMap<_, _>>()
        };

        Self {
            title: problem.title.clone(),
            currency: problem.currency.clone(),
            initial_investment: problem.initial_investment.clone(),
            scenarios: problem
                .scenarios
                .iter()
                .map(|s| ScenarioDocument {
                    id: s.id.as_str().to_string(),
                    label: Some(s.label.clone()),
                })
                .collect(),
            costs: problem
                .costs
                .entries()
                .iter()
                .map(|row| AlternativeCostsDocument {
                    alternative: row.alternative.as_str().to_string(),
                    components: row
                        .components
                        .iter()
                        .map(|c| CostComponentDocument {
                            name: c.name.clone(),
                            amount: c.amount,
                        })
                        .collect(),
                })
                .collect(),
            revenues: problem
                .revenues
                .entries()
                .iter()
                .map(|row| AlternativeRevenueDocument {
                    alternative: row.alternative.as_str().to_string(),
                    by_scenario: row
                        .by_scenario
                        .iter()
                        .map(|(s, amount)| (s.as_str().to_string(), *amount))
                        .collect(),
                })
                .collect(),
            prior: probabilities(&problem.prior),
            posterior: probabilities(&problem.posterior),
            study_cost: problem.study_cost,
        }
    }
}
