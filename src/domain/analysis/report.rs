//! Report assembly - Gathers every analysis result into one bundle.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::criteria::{CriteriaEvaluator, CriteriaResults, Criterion, RegretMatrix};
use super::decision_tree::{InformationValueEvaluator, InformationValueResult, StudyBaseline};
use super::selection::TieBreak;
use super::PayoffMatrix;
use crate::domain::foundation::{AlternativeId, AnalysisError, HurwiczAlpha, ValidationError};
use crate::domain::problem::{
    AlternativeCosts, AlternativeRevenue, DecisionProblem, InitialInvestment,
    ProbabilityDistribution, Scenario, DEFAULT_PROBABILITY_TOLERANCE,
};

/// Tunable parameters of one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub hurwicz_alpha: HurwiczAlpha,
    pub tie_break: TieBreak,
    pub study_baseline: StudyBaseline,
    pub probability_tolerance: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            hurwicz_alpha: HurwiczAlpha::default(),
            tie_break: TieBreak::default(),
            study_baseline: StudyBaseline::default(),
            probability_tolerance: DEFAULT_PROBABILITY_TOLERANCE,
        }
    }
}

/// Cost components of one alternative with their total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    #[serde(flatten)]
    pub costs: AlternativeCosts,
    pub total: f64,
}

/// Inputs echoed back in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemSummary {
    pub title: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_investment: Option<InitialInvestment>,
    pub scenarios: Vec<Scenario>,
    pub costs: Vec<CostSummary>,
    pub revenues: Vec<AlternativeRevenue>,
    pub prior: ProbabilityDistribution,
    pub posterior: ProbabilityDistribution,
    pub study_cost: f64,
}

impl ProblemSummary {
    fn from_problem(problem: &DecisionProblem) -> Self {
        Self {
            title: problem.title.clone(),
            currency: problem.currency.clone(),
            initial_investment: problem.initial_investment.clone(),
            scenarios: problem.scenarios.clone(),
            costs: problem
                .costs
                .entries()
                .iter()
                .map(|costs| CostSummary {
                    total: costs.total(),
                    costs: costs.clone(),
                })
                .collect(),
            revenues: problem.revenues.entries().to_vec(),
            prior: problem.prior.clone(),
            posterior: problem.posterior.clone(),
            study_cost: problem.study_cost,
        }
    }

    /// Display label of a scenario.
    pub fn scenario_label<'a>(&'a self, id: &'a str) -> &'a str {
        self.scenarios
            .iter()
            .find(|s| s.id.as_str() == id)
            .map(|s| s.label.as_str())
            .unwrap_or(id)
    }
}

/// Final recommendation: the prior expected-value choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub alternative: AlternativeId,
    pub expected_value: f64,
    /// Criteria that selected the same alternative.
    pub supporting_criteria: Vec<Criterion>,
}

/// Criteria that selected one alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusEntry {
    pub alternative: AlternativeId,
    pub criteria: Vec<Criterion>,
}

/// Every result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub problem: ProblemSummary,
    pub settings: AnalysisSettings,
    pub payoff_matrix: PayoffMatrix,
    pub criteria: CriteriaResults,
    pub regret: RegretMatrix,
    pub information_value: InformationValueResult,
    pub recommendation: Recommendation,
    /// One entry per alternative, in canonical order.
    pub consensus: Vec<ConsensusEntry>,
}

/// Runs the full analysis of a problem.
///
/// # Errors
/// - Configuration error if the tables are incomplete, a distribution misses
///   the tolerance, or a distribution disagrees with the scenario set
/// - Arithmetic degenerate error if a score is not finite
pub fn assemble_report(
    problem: &DecisionProblem,
    settings: &AnalysisSettings,
) -> Result<AnalysisReport, AnalysisError> {
    check_tolerance(&problem.prior, settings.probability_tolerance)?;
    check_tolerance(&problem.posterior, settings.probability_tolerance)?;

    let payoff_matrix = PayoffMatrix::build(&problem.scenarios, &problem.costs, &problem.revenues)?;

    let criteria = CriteriaEvaluator::evaluate_all(
        &payoff_matrix,
        &problem.prior,
        settings.hurwicz_alpha,
        settings.tie_break,
    )?;
    let regret = CriteriaEvaluator::regret_matrix(&payoff_matrix)?;
    let information_value = InformationValueEvaluator::evaluate(
        &payoff_matrix,
        &problem.prior,
        &problem.posterior,
        problem.study_cost,
        settings.study_baseline,
        settings.tie_break,
    )?;

    let consensus = tally_consensus(payoff_matrix.alternative_ids(), &criteria);
    let recommended = &criteria.expected_value;
    let recommendation = Recommendation {
        alternative: recommended.best.clone(),
        expected_value: recommended.best_score,
        supporting_criteria: consensus
            .iter()
            .find(|entry| entry.alternative == recommended.best)
            .map(|entry| entry.criteria.clone())
            .unwrap_or_default(),
    };

    debug!(
        title = %problem.title,
        recommended = %recommendation.alternative,
        supporting = recommendation.supporting_criteria.len(),
        "Analysis report assembled"
    );

    Ok(AnalysisReport {
        problem: ProblemSummary::from_problem(problem),
        settings: *settings,
        payoff_matrix,
        criteria,
        regret,
        information_value,
        recommendation,
        consensus,
    })
}

fn tally_consensus(
    alternatives: &[AlternativeId],
    criteria: &CriteriaResults,
) -> Vec<ConsensusEntry> {
    alternatives
        .iter()
        .map(|alternative| ConsensusEntry {
            alternative: alternative.clone(),
            criteria: criteria
                .iter()
                .filter(|result| &result.best == alternative)
                .map(|result| result.criterion)
                .collect(),
        })
        .collect()
}

fn check_tolerance(
    distribution: &ProbabilityDistribution,
    tolerance: f64,
) -> Result<(), ValidationError> {
    let sum: f64 = distribution.entries().iter().map(|(_, p)| p.value()).sum();
    if (sum - 1.0).abs() > tolerance {
        return Err(ValidationError::ProbabilitySum {
            distribution: distribution.name().to_string(),
            sum,
            tolerance,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ScenarioId;
    use crate::domain::problem::{CostTable, RevenueTable};

    fn aid(id: &str) -> AlternativeId {
        AlternativeId::new(id).unwrap()
    }

    fn reference_report() -> AnalysisReport {
        let problem = DecisionProblem::reference().unwrap();
        assemble_report(&problem, &AnalysisSettings::default()).unwrap()
    }

    #[test]
    fn reference_recommendation_is_santa_marta() {
        let report = reference_report();

        assert_eq!(report.recommendation.alternative, aid("Santa Marta"));
        assert!((report.recommendation.expected_value + 400_000.0).abs() < 1e-6);
        assert_eq!(
            report.recommendation.supporting_criteria,
            vec![Criterion::Laplace, Criterion::Savage, Criterion::ExpectedValue]
        );
    }

    #[test]
    fn reference_consensus_covers_every_alternative() {
        let report = reference_report();

        assert_eq!(report.consensus.len(), 3);
        assert_eq!(report.consensus[1].alternative, aid("Barranquilla"));
        assert_eq!(report.consensus[1].criteria, vec![Criterion::Maximin]);
        assert_eq!(
            report.consensus[2].criteria,
            vec![Criterion::Maximax, Criterion::Hurwicz]
        );
        let total: usize = report.consensus.iter().map(|e| e.criteria.len()).sum();
        assert_eq!(total, Criterion::ALL.len());
    }

    #[test]
    fn reference_summary_echoes_inputs() {
        let report = reference_report();

        assert_eq!(report.problem.costs[0].total, 9_500_000.0);
        assert_eq!(report.problem.costs[2].total, 10_300_000.0);
        assert_eq!(report.problem.study_cost, 1_000_000.0);
        assert_eq!(
            report.problem.initial_investment.as_ref().map(|i| i.currency.as_str()),
            Some("USD")
        );
        assert_eq!(report.problem.scenario_label("low"), "Low demand");
    }

    #[test]
    fn assembling_twice_is_identical() {
        assert_eq!(reference_report(), reference_report());
    }

    #[test]
    fn settings_flow_into_results() {
        let problem = DecisionProblem::reference().unwrap();
        let settings = AnalysisSettings {
            hurwicz_alpha: HurwiczAlpha::try_new(0.0).unwrap(),
            study_baseline: StudyBaseline::Prior,
            ..AnalysisSettings::default()
        };

        let report = assemble_report(&problem, &settings).unwrap();
        assert_eq!(report.criteria.hurwicz.best, aid("Barranquilla"));
        assert!(report.information_value.recommend_study);
        assert_eq!(report.settings, settings);
    }

    #[test]
    fn tighter_tolerance_rejects_loose_distribution() {
        let sid = |id: &str| ScenarioId::new(id).unwrap();
        let loose = ProbabilityDistribution::try_new(
            "prior",
            vec![(sid("up"), 0.5), (sid("down"), 0.5001)],
            0.01,
        )
        .unwrap();
        let problem = DecisionProblem::new(
            "Loose",
            "COP",
            None,
            vec![Scenario::new(sid("up")), Scenario::new(sid("down"))],
            CostTable::builder().alternative(aid("A"), vec![]).build().unwrap(),
            RevenueTable::builder()
                .alternative(aid("A"), vec![(sid("up"), 1.0), (sid("down"), 1.0)])
                .build()
                .unwrap(),
            loose.clone(),
            loose,
            0.0,
        )
        .unwrap();

        let result = assemble_report(&problem, &AnalysisSettings::default());
        assert!(matches!(
            result,
            Err(AnalysisError::Configuration(ValidationError::ProbabilitySum { .. }))
        ));
    }

    #[test]
    fn incomplete_tables_surface_configuration_error() {
        let problem = DecisionProblem {
            revenues: RevenueTable::default(),
            ..DecisionProblem::reference().unwrap()
        };

        let result = assemble_report(&problem, &AnalysisSettings::default());
        assert!(result.unwrap_err().is_configuration());
    }
}
