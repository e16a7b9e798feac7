//! DecisionProblem - The complete, validated input of one analysis run.

use serde::{Deserialize, Serialize};

use super::scenario::validate_scenarios;
use super::{CostComponent, CostTable, ProbabilityDistribution, RevenueTable, Scenario};
use crate::domain::foundation::{AlternativeId, ScenarioId, ValidationError};

/// Up-front investment shown in the report; may use its own currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialInvestment {
    pub amount: f64,
    pub currency: String,
}

/// Inputs of a site-expansion decision.
///
/// Cross-table completeness (every alternative priced and projected under
/// every scenario) is checked when the payoff matrix is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionProblem {
    pub title: String,
    pub currency: String,
    pub initial_investment: Option<InitialInvestment>,
    pub scenarios: Vec<Scenario>,
    pub costs: CostTable,
    pub revenues: RevenueTable,
    pub prior: ProbabilityDistribution,
    pub posterior: ProbabilityDistribution,
    pub study_cost: f64,
}

impl DecisionProblem {
    /// Creates a problem, validating the scenario set, both distributions
    /// against it, and the study cost.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: impl Into<String>,
        currency: impl Into<String>,
        initial_investment: Option<InitialInvestment>,
        scenarios: Vec<Scenario>,
        costs: CostTable,
        revenues: RevenueTable,
        prior: ProbabilityDistribution,
        posterior: ProbabilityDistribution,
        study_cost: f64,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let currency = currency.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if currency.trim().is_empty() {
            return Err(ValidationError::empty_field("currency"));
        }
        validate_scenarios(&scenarios)?;

        let ids: Vec<ScenarioId> = scenarios.iter().map(|s| s.id.clone()).collect();
        prior.ensure_covers(&ids)?;
        posterior.ensure_covers(&ids)?;

        if !study_cost.is_finite() {
            return Err(ValidationError::not_finite("study_cost", study_cost));
        }
        if study_cost < 0.0 {
            return Err(ValidationError::out_of_range(
                "study_cost",
                0.0,
                f64::MAX,
                study_cost,
            ));
        }
        if let Some(investment) = &initial_investment {
            if !investment.amount.is_finite() {
                return Err(ValidationError::not_finite(
                    "initial_investment.amount",
                    investment.amount,
                ));
            }
            if investment.currency.trim().is_empty() {
                return Err(ValidationError::empty_field("initial_investment.currency"));
            }
        }

        Ok(Self {
            title,
            currency,
            initial_investment,
            scenarios,
            costs,
            revenues,
            prior,
            posterior,
            study_cost,
        })
    }

    /// Scenario identifiers in canonical order.
    pub fn scenario_ids(&self) -> Vec<ScenarioId> {
        self.scenarios.iter().map(|s| s.id.clone()).collect()
    }

    /// Alternative identifiers in canonical (cost table) order.
    pub fn alternative_ids(&self) -> Vec<AlternativeId> {
        self.costs.alternatives().cloned().collect()
    }

    /// Display label of a scenario, falling back to its identifier.
    pub fn scenario_label<'a>(&'a self, id: &'a ScenarioId) -> &'a str {
        self.scenarios
            .iter()
            .find(|s| &s.id == id)
            .map(|s| s.label.as_str())
            .unwrap_or_else(|| id.as_str())
    }

    /// The Caribbean-coast expansion case: three candidate sites under
    /// high, medium and low demand.
    pub fn reference() -> Result<Self, ValidationError> {
        let high = ScenarioId::new("high")?;
        let medium = ScenarioId::new("medium")?;
        let low = ScenarioId::new("low")?;

        let santa_marta = AlternativeId::new("Santa Marta")?;
        let barranquilla = AlternativeId::new("Barranquilla")?;
        let cartagena = AlternativeId::new("Cartagena")?;

        let costs = CostTable::builder()
            .alternative(
                santa_marta.clone(),
                site_costs(2_000_000.0, 3_500_000.0, 4_000_000.0),
            )
            .alternative(
                barranquilla.clone(),
                site_costs(2_200_000.0, 3_000_000.0, 3_800_000.0),
            )
            .alternative(
                cartagena.clone(),
                site_costs(2_800_000.0, 4_000_000.0, 3_500_000.0),
            )
            .build()?;

        let revenues = RevenueTable::builder()
            .alternative(
                santa_marta,
                vec![
                    (high.clone(), 15_000_000.0),
                    (medium.clone(), 12_000_000.0),
                    (low.clone(), 5_000_000.0),
                ],
            )
            .alternative(
                barranquilla,
                vec![
                    (high.clone(), 14_000_000.0),
                    (medium.clone(), 10_000_000.0),
                    (low.clone(), 5_000_000.0),
                ],
            )
            .alternative(
                cartagena,
                vec![
                    (high.clone(), 16_000_000.0),
                    (medium.clone(), 8_000_000.0),
                    (low.clone(), 6_000_000.0),
                ],
            )
            .build()?;

        let tolerance = super::DEFAULT_PROBABILITY_TOLERANCE;
        let prior = ProbabilityDistribution::try_new(
            "prior",
            vec![(high.clone(), 0.2), (medium.clone(), 0.3), (low.clone(), 0.5)],
            tolerance,
        )?;
        let posterior = ProbabilityDistribution::try_new(
            "posterior",
            vec![(high.clone(), 0.3), (medium.clone(), 0.4), (low.clone(), 0.3)],
            tolerance,
        )?;

        Self::new(
            "Regional Expansion - Caribbean Coast",
            "COP",
            Some(InitialInvestment {
                amount: 800_000.0,
                currency: "USD".to_string(),
            }),
            vec![
                Scenario::with_label(high, "High demand"),
                Scenario::with_label(medium, "Medium demand"),
                Scenario::with_label(low, "Low demand"),
            ],
            costs,
            revenues,
            prior,
            posterior,
            1_000_000.0,
        )
    }
}

fn site_costs(rent: f64, utilities: f64, maintenance: f64) -> Vec<CostComponent> {
    vec![
        CostComponent::new("rent", rent),
        CostComponent::new("utilities", utilities),
        CostComponent::new("maintenance", maintenance),
    ]
}
