//! Decision Tree - Expected values with and without a market study.
//!
//! Compares deciding now under the prior with paying for a study that
//! sharpens the scenario probabilities (the posterior) before deciding.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::criteria::{ensure_populated, weighted_sum};
use super::selection::{select_best, Optimization, TieBreak};
use super::PayoffMatrix;
use crate::domain::foundation::{AlternativeId, AnalysisError, ScenarioId, ValidationError};
use crate::domain::problem::ProbabilityDistribution;

/// Value the study's net result must beat to be recommended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyBaseline {
    /// Best expected value when deciding now under the prior.
    Prior,
    /// Best gross expected value under the posterior probabilities.
    #[default]
    PosteriorGross,
}

impl fmt::Display for StudyBaseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudyBaseline::Prior => write!(f, "prior"),
            StudyBaseline::PosteriorGross => write!(f, "posterior_gross"),
        }
    }
}

/// Weighted contribution of one scenario to an expected value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioContribution {
    pub scenario: ScenarioId,
    pub probability: f64,
    pub payoff: f64,
    pub weighted: f64,
}

/// Expected value of one alternative under one distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedValueBreakdown {
    pub alternative: AlternativeId,
    pub contributions: Vec<ScenarioContribution>,
    pub expected_value: f64,
    /// Expected value minus the cost of reaching this branch.
    pub net_value: f64,
}

/// The selected alternative of a regime and its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestAlternative {
    pub alternative: AlternativeId,
    pub value: f64,
}

/// Terminal outcome of a chance node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeLeaf {
    pub scenario: ScenarioId,
    pub probability: f64,
    pub payoff: f64,
}

/// Chance node reached by choosing one alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChanceNode {
    pub alternative: AlternativeId,
    pub expected_value: f64,
    pub outcomes: Vec<OutcomeLeaf>,
}

/// Decision node with one chance node per alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Name of the distribution driving the chance nodes.
    pub regime: String,
    /// Cost paid before the decision node (the study cost, or zero).
    pub entry_cost: f64,
    pub branches: Vec<ChanceNode>,
    pub best: BestAlternative,
}

impl DecisionTree {
    fn from_breakdowns(
        regime: &str,
        entry_cost: f64,
        breakdowns: &[ExpectedValueBreakdown],
        best: BestAlternative,
    ) -> Self {
        let branches = breakdowns
            .iter()
            .map(|b| ChanceNode {
                alternative: b.alternative.clone(),
                expected_value: b.expected_value,
                outcomes: b
                    .contributions
                    .iter()
                    .map(|c| OutcomeLeaf {
                        scenario: c.scenario.clone(),
                        probability: c.probability,
                        payoff: c.payoff,
                    })
                    .collect(),
            })
            .collect();

        Self {
            regime: regime.to_string(),
            entry_cost,
            branches,
            best,
        }
    }
}

/// Outcome of the study / no-study comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformationValueResult {
    pub best_prior: BestAlternative,
    pub best_posterior_gross: BestAlternative,
    /// Selected on posterior expected value minus the study cost.
    pub best_posterior_net: BestAlternative,
    pub study_cost: f64,
    pub baseline: StudyBaseline,
    pub baseline_value: f64,
    /// True iff the net value strictly exceeds the baseline value.
    pub recommend_study: bool,
    /// baseline_value - best_posterior_net.value
    pub delta: f64,
    pub prior_breakdown: Vec<ExpectedValueBreakdown>,
    pub posterior_breakdown: Vec<ExpectedValueBreakdown>,
    pub prior_tree: DecisionTree,
    pub posterior_tree: DecisionTree,
}

/// Value-of-information functions.
pub struct InformationValueEvaluator;

impl InformationValueEvaluator {
    /// Per-alternative expected values under one distribution.
    ///
    /// `branch_cost` is subtracted from each expected value to give `net_value`.
    pub fn breakdown(
        matrix: &PayoffMatrix,
        distribution: &ProbabilityDistribution,
        branch_cost: f64,
    ) -> Result<Vec<ExpectedValueBreakdown>, AnalysisError> {
        ensure_populated(matrix)?;
        let probabilities = distribution.aligned(matrix.scenario_ids())?;

        let mut breakdowns = Vec::with_capacity(matrix.alternative_count());
        for (alternative, row) in matrix.alternative_ids().iter().zip(matrix.rows()) {
            let contributions = matrix
                .scenario_ids()
                .iter()
                .zip(row.iter().zip(&probabilities))
                .map(|(scenario, (payoff, probability))| ScenarioContribution {
                    scenario: scenario.clone(),
                    probability: *probability,
                    payoff: *payoff,
                    weighted: probability * payoff,
                })
                .collect();
            let expected_value = weighted_sum(row, &probabilities);
            let net_value = expected_value - branch_cost;

            if !net_value.is_finite() {
                return Err(AnalysisError::degenerate(
                    format!("{} expected value", distribution.name()),
                    format!("value of '{}' is {}", alternative, net_value),
                ));
            }

            breakdowns.push(ExpectedValueBreakdown {
                alternative: alternative.clone(),
                contributions,
                expected_value,
                net_value,
            });
        }

        Ok(breakdowns)
    }

    /// Compares deciding now with deciding after the study.
    ///
    /// # Algorithm
    /// 1. best_prior = argmax Σ prior·payoff
    /// 2. best_posterior_gross = argmax Σ posterior·payoff
    /// 3. best_posterior_net = argmax (Σ posterior·payoff - study_cost)
    /// 4. recommend ⇔ best_posterior_net.value > baseline value
    /// 5. delta = baseline value - best_posterior_net.value
    ///
    /// # Errors
    /// - Configuration error for a negative or non-finite study cost
    /// - Configuration error if a distribution does not match the matrix
    pub fn evaluate(
        matrix: &PayoffMatrix,
        prior: &ProbabilityDistribution,
        posterior: &ProbabilityDistribution,
        study_cost: f64,
        baseline: StudyBaseline,
        tie_break: TieBreak,
    ) -> Result<InformationValueResult, AnalysisError> {
        if !study_cost.is_finite() {
            return Err(ValidationError::not_finite("study_cost", study_cost).into());
        }
        if study_cost < 0.0 {
            return Err(
                ValidationError::out_of_range("study_cost", 0.0, f64::MAX, study_cost).into(),
            );
        }

        let prior_breakdown = Self::breakdown(matrix, prior, 0.0)?;
        let posterior_breakdown = Self::breakdown(matrix, posterior, study_cost)?;

        let best_prior = best_by(&prior_breakdown, |b| b.expected_value, tie_break)?;
        let best_posterior_gross = best_by(&posterior_breakdown, |b| b.expected_value, tie_break)?;
        let best_posterior_net = best_by(&posterior_breakdown, |b| b.net_value, tie_break)?;

        let baseline_value = match baseline {
            StudyBaseline::Prior => best_prior.value,
            StudyBaseline::PosteriorGross => best_posterior_gross.value,
        };
        let recommend_study = best_posterior_net.value > baseline_value;
        let delta = baseline_value - best_posterior_net.value;

        debug!(
            best_prior = %best_prior.alternative,
            best_posterior_net = %best_posterior_net.alternative,
            baseline = %baseline,
            recommend_study = recommend_study,
            delta = delta,
            "Information value evaluated"
        );

        let prior_tree = DecisionTree::from_breakdowns(
            prior.name(),
            0.0,
            &prior_breakdown,
            best_prior.clone(),
        );
        let posterior_tree = DecisionTree::from_breakdowns(
            posterior.name(),
            study_cost,
            &posterior_breakdown,
            best_posterior_net.clone(),
        );

        Ok(InformationValueResult {
            best_prior,
            best_posterior_gross,
            best_posterior_net,
            study_cost,
            baseline,
            baseline_value,
            recommend_study,
            delta,
            prior_breakdown,
            posterior_breakdown,
            prior_tree,
            posterior_tree,
        })
    }
}

fn best_by(
    breakdowns: &[ExpectedValueBreakdown],
    value: impl Fn(&ExpectedValueBreakdown) -> f64,
    tie_break: TieBreak,
) -> Result<BestAlternative, AnalysisError> {
    let alternatives: Vec<AlternativeId> =
        breakdowns.iter().map(|b| b.alternative.clone()).collect();
    let values: Vec<f64> = breakdowns.iter().map(&value).collect();

    let index = select_best(&alternatives, &values, Optimization::Maximize, tie_break)
        .ok_or_else(|| AnalysisError::from(ValidationError::empty_field("alternatives")))?;

    Ok(BestAlternative {
        alternative: alternatives[index].clone(),
        value: values[index],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::problem::{DecisionProblem, DEFAULT_PROBABILITY_TOLERANCE};

    const EPS: f64 = 1e-6;

    fn aid(id: &str) -> AlternativeId {
        AlternativeId::new(id).unwrap()
    }

    fn sid(id: &str) -> ScenarioId {
        ScenarioId::new(id).unwrap()
    }

    fn reference() -> (PayoffMatrix, DecisionProblem) {
        let problem = DecisionProblem::reference().unwrap();
        let matrix =
            PayoffMatrix::build(&problem.scenarios, &problem.costs, &problem.revenues).unwrap();
        (matrix, problem)
    }

    fn evaluate_reference(baseline: StudyBaseline) -> InformationValueResult {
        let (matrix, problem) = reference();
        InformationValueEvaluator::evaluate(
            &matrix,
            &problem.prior,
            &problem.posterior,
            problem.study_cost,
            baseline,
            TieBreak::FirstInOrder,
        )
        .unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    // Breakdown Tests

    #[test]
    fn breakdown_reference_prior_contributions() {
        let (matrix, problem) = reference();
        let breakdowns =
            InformationValueEvaluator::breakdown(&matrix, &problem.prior, 0.0).unwrap();

        let santa_marta = &breakdowns[0];
        assert_eq!(santa_marta.alternative, aid("Santa Marta"));
        assert_close(santa_marta.contributions[0].weighted, 1_100_000.0);
        assert_close(santa_marta.contributions[1].weighted, 750_000.0);
        assert_close(santa_marta.contributions[2].weighted, -2_250_000.0);
        assert_close(santa_marta.expected_value, -400_000.0);
        assert_close(santa_marta.net_value, -400_000.0);
    }

    #[test]
    fn breakdown_subtracts_branch_cost() {
        let (matrix, problem) = reference();
        let breakdowns =
            InformationValueEvaluator::breakdown(&matrix, &problem.posterior, 1_000_000.0).unwrap();

        assert_close(breakdowns[0].expected_value, 1_300_000.0);
        assert_close(breakdowns[0].net_value, 300_000.0);
        assert_close(breakdowns[1].expected_value, 700_000.0);
        assert_close(breakdowns[2].expected_value, -500_000.0);
    }

    // Value Of Information Tests

    #[test]
    fn evaluate_reference_prior_baseline_recommends_study() {
        let result = evaluate_reference(StudyBaseline::Prior);

        assert_eq!(result.best_prior.alternative, aid("Santa Marta"));
        assert_close(result.best_prior.value, -400_000.0);
        assert_eq!(result.best_posterior_gross.alternative, aid("Santa Marta"));
        assert_close(result.best_posterior_gross.value, 1_300_000.0);
        assert_eq!(result.best_posterior_net.alternative, aid("Santa Marta"));
        assert_close(result.best_posterior_net.value, 300_000.0);

        assert!(result.recommend_study);
        assert_close(result.baseline_value, -400_000.0);
        assert_close(result.delta, -700_000.0);
    }

    #[test]
    fn evaluate_reference_posterior_gross_baseline_rejects_study() {
        let result = evaluate_reference(StudyBaseline::default());

        assert_eq!(result.baseline, StudyBaseline::PosteriorGross);
        assert!(!result.recommend_study);
        assert_close(result.baseline_value, 1_300_000.0);
        assert_close(result.delta, 1_000_000.0);
    }

    #[test]
    fn expensive_study_is_not_recommended() {
        let (matrix, problem) = reference();
        let result = InformationValueEvaluator::evaluate(
            &matrix,
            &problem.prior,
            &problem.posterior,
            5_000_000.0,
            StudyBaseline::Prior,
            TieBreak::FirstInOrder,
        )
        .unwrap();

        assert!(!result.recommend_study);
        assert!(result.delta >= 0.0);
        assert_close(
            result.delta,
            result.best_prior.value - result.best_posterior_net.value,
        );
    }

    #[test]
    fn equal_values_do_not_recommend_study() {
        let matrix = PayoffMatrix::from_rows(
            vec![aid("A")],
            vec![sid("up"), sid("down")],
            vec![vec![10.0, 0.0]],
        )
        .unwrap();
        let even = ProbabilityDistribution::try_new(
            "prior",
            vec![(sid("up"), 0.5), (sid("down"), 0.5)],
            DEFAULT_PROBABILITY_TOLERANCE,
        )
        .unwrap();

        let result = InformationValueEvaluator::evaluate(
            &matrix,
            &even,
            &even,
            0.0,
            StudyBaseline::Prior,
            TieBreak::FirstInOrder,
        )
        .unwrap();

        assert!(!result.recommend_study);
        assert_eq!(result.delta, 0.0);
    }

    #[test]
    fn negative_study_cost_is_configuration_error() {
        let (matrix, problem) = reference();
        let result = InformationValueEvaluator::evaluate(
            &matrix,
            &problem.prior,
            &problem.posterior,
            -1.0,
            StudyBaseline::Prior,
            TieBreak::FirstInOrder,
        );

        assert!(result.unwrap_err().is_configuration());
    }

    #[test]
    fn mismatched_posterior_is_configuration_error() {
        let (matrix, problem) = reference();
        let posterior = ProbabilityDistribution::try_new(
            "posterior",
            vec![(sid("high"), 0.5), (sid("low"), 0.5)],
            DEFAULT_PROBABILITY_TOLERANCE,
        )
        .unwrap();

        let result = InformationValueEvaluator::evaluate(
            &matrix,
            &problem.prior,
            &posterior,
            0.0,
            StudyBaseline::Prior,
            TieBreak::FirstInOrder,
        );

        assert!(result.unwrap_err().is_configuration());
    }

    // Decision Tree Tests

    #[test]
    fn trees_have_one_branch_per_alternative_and_leaf_per_scenario() {
        let result = evaluate_reference(StudyBaseline::Prior);

        assert_eq!(result.prior_tree.regime, "prior");
        assert_eq!(result.prior_tree.entry_cost, 0.0);
        assert_eq!(result.prior_tree.branches.len(), 3);
        assert!(result.prior_tree.branches.iter().all(|b| b.outcomes.len() == 3));

        assert_eq!(result.posterior_tree.regime, "posterior");
        assert_eq!(result.posterior_tree.entry_cost, 1_000_000.0);
        assert_eq!(result.posterior_tree.best, result.best_posterior_net);
    }

    #[test]
    fn trees_carry_payoffs_and_probabilities_of_each_leaf() {
        let result = evaluate_reference(StudyBaseline::PosteriorGross);

        assert_eq!(result.prior_tree.best.alternative, aid("Santa Marta"));
        assert_eq!(result.prior_tree.branches[2].outcomes[0].payoff, 5_700_000.0);
        assert_eq!(result.prior_tree.branches[2].outcomes[0].probability, 0.2);
    }

    #[test]
    fn study_baseline_default_is_posterior_gross() {
        assert_eq!(StudyBaseline::default(), StudyBaseline::PosteriorGross);
        assert_eq!(StudyBaseline::PosteriorGross.to_string(), "posterior_gross");
    }
}
