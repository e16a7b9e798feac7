//! Criteria Evaluator - Classical decision criteria over a payoff matrix.
//!
//! Laplace, Maximax, Maximin, Hurwicz and Expected Value score each
//! alternative from its own row. Savage first derives the regret matrix from
//! the column maxima.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::selection::{select_best, Optimization, TieBreak};
use super::PayoffMatrix;
use crate::domain::foundation::{
    AlternativeId, AnalysisError, HurwiczAlpha, ScenarioId, ValidationError,
};
use crate::domain::problem::ProbabilityDistribution;

/// A decision criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Laplace,
    Maximax,
    Maximin,
    Hurwicz,
    Savage,
    ExpectedValue,
}

impl Criterion {
    /// All criteria in report order.
    pub const ALL: [Criterion; 6] = [
        Criterion::Laplace,
        Criterion::Maximax,
        Criterion::Maximin,
        Criterion::Hurwicz,
        Criterion::Savage,
        Criterion::ExpectedValue,
    ];

    /// Ranking direction of the criterion's scores.
    pub fn optimization(&self) -> Optimization {
        match self {
            Criterion::Savage => Optimization::Minimize,
            _ => Optimization::Maximize,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Criterion::Laplace => "Laplace",
            Criterion::Maximax => "Maximax",
            Criterion::Maximin => "Maximin",
            Criterion::Hurwicz => "Hurwicz",
            Criterion::Savage => "Savage",
            Criterion::ExpectedValue => "Expected Value",
        }
    }

    /// One-line description of how the score is computed.
    pub fn description(&self) -> &'static str {
        match self {
            Criterion::Laplace => "Average payoff, all scenarios equally likely",
            Criterion::Maximax => "Best payoff across scenarios (optimistic)",
            Criterion::Maximin => "Worst payoff across scenarios (pessimistic)",
            Criterion::Hurwicz => "Weighted blend of best and worst payoff",
            Criterion::Savage => "Largest regret across scenarios (minimax regret)",
            Criterion::ExpectedValue => "Probability-weighted payoff under the prior",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Score of one alternative under one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeScore {
    pub alternative: AlternativeId,
    pub score: f64,
}

/// Outcome of evaluating one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub criterion: Criterion,
    pub optimization: Optimization,
    /// Hurwicz coefficient, when the criterion takes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<f64>,
    /// Scores in canonical alternative order.
    pub scores: Vec<AlternativeScore>,
    pub best: AlternativeId,
    pub best_score: f64,
}

impl CriterionResult {
    /// Score of one alternative.
    pub fn score_of(&self, alternative: &AlternativeId) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| &s.alternative == alternative)
            .map(|s| s.score)
    }
}

/// Regret of each alternative relative to the best payoff in each scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegretMatrix {
    pub alternative_ids: Vec<AlternativeId>,
    pub scenario_ids: Vec<ScenarioId>,
    /// Best payoff per scenario.
    pub column_max: Vec<f64>,
    /// regret[alt][s] = column_max[s] - payoff[alt][s], always >= 0.
    pub regrets: Vec<Vec<f64>>,
}

impl RegretMatrix {
    /// Largest regret of each alternative, in canonical order.
    pub fn max_regrets(&self) -> Vec<f64> {
        self.regrets
            .iter()
            .map(|row| row.iter().copied().fold(f64::NEG_INFINITY, f64::max))
            .collect()
    }

    /// Regret row of one alternative.
    pub fn row(&self, alternative: &AlternativeId) -> Option<&[f64]> {
        self.alternative_ids
            .iter()
            .position(|a| a == alternative)
            .map(|i| self.regrets[i].as_slice())
    }
}

/// The six criterion results of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaResults {
    pub laplace: CriterionResult,
    pub maximax: CriterionResult,
    pub maximin: CriterionResult,
    pub hurwicz: CriterionResult,
    pub savage: CriterionResult,
    pub expected_value: CriterionResult,
}

impl CriteriaResults {
    /// Results in report order.
    pub fn iter(&self) -> impl Iterator<Item = &CriterionResult> {
        [
            &self.laplace,
            &self.maximax,
            &self.maximin,
            &self.hurwicz,
            &self.savage,
            &self.expected_value,
        ]
        .into_iter()
    }

    /// Result of one criterion.
    pub fn get(&self, criterion: Criterion) -> &CriterionResult {
        match criterion {
            Criterion::Laplace => &self.laplace,
            Criterion::Maximax => &self.maximax,
            Criterion::Maximin => &self.maximin,
            Criterion::Hurwicz => &self.hurwicz,
            Criterion::Savage => &self.savage,
            Criterion::ExpectedValue => &self.expected_value,
        }
    }
}

/// Decision criteria functions.
pub struct CriteriaEvaluator;

impl CriteriaEvaluator {
    /// Laplace: arithmetic mean of each row, maximized.
    pub fn laplace(
        matrix: &PayoffMatrix,
        tie_break: TieBreak,
    ) -> Result<CriterionResult, AnalysisError> {
        ensure_populated(matrix)?;
        let n = matrix.scenario_count() as f64;
        let scores = matrix
            .rows()
            .iter()
            .map(|row| row.iter().sum::<f64>() / n)
            .collect();
        finish(Criterion::Laplace, matrix, scores, tie_break, None)
    }

    /// Maximax: best payoff of each row, maximized.
    pub fn maximax(
        matrix: &PayoffMatrix,
        tie_break: TieBreak,
    ) -> Result<CriterionResult, AnalysisError> {
        ensure_populated(matrix)?;
        let scores = matrix.rows().iter().map(|row| row_max(row)).collect();
        finish(Criterion::Maximax, matrix, scores, tie_break, None)
    }

    /// Maximin: worst payoff of each row, maximized.
    pub fn maximin(
        matrix: &PayoffMatrix,
        tie_break: TieBreak,
    ) -> Result<CriterionResult, AnalysisError> {
        ensure_populated(matrix)?;
        let scores = matrix.rows().iter().map(|row| row_min(row)).collect();
        finish(Criterion::Maximin, matrix, scores, tie_break, None)
    }

    /// Hurwicz: α·max + (1-α)·min of each row, maximized.
    pub fn hurwicz(
        matrix: &PayoffMatrix,
        alpha: HurwiczAlpha,
        tie_break: TieBreak,
    ) -> Result<CriterionResult, AnalysisError> {
        ensure_populated(matrix)?;
        let scores = matrix
            .rows()
            .iter()
            .map(|row| alpha.blend(row_max(row), row_min(row)))
            .collect();
        finish(Criterion::Hurwicz, matrix, scores, tie_break, Some(alpha.value()))
    }

    /// Computes the regret matrix.
    ///
    /// # Algorithm
    /// column_max[s] = max over alternatives of payoff[alt][s];
    /// regret[alt][s] = column_max[s] - payoff[alt][s]
    pub fn regret_matrix(matrix: &PayoffMatrix) -> Result<RegretMatrix, AnalysisError> {
        ensure_populated(matrix)?;

        let column_max: Vec<f64> = (0..matrix.scenario_count())
            .map(|column| {
                matrix
                    .rows()
                    .iter()
                    .map(|row| row[column])
                    .fold(f64::NEG_INFINITY, f64::max)
            })
            .collect();

        let regrets = matrix
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&column_max)
                    .map(|(payoff, max)| max - payoff)
                    .collect()
            })
            .collect();

        Ok(RegretMatrix {
            alternative_ids: matrix.alternative_ids().to_vec(),
            scenario_ids: matrix.scenario_ids().to_vec(),
            column_max,
            regrets,
        })
    }

    /// Savage: largest regret of each row, minimized.
    pub fn savage(
        matrix: &PayoffMatrix,
        tie_break: TieBreak,
    ) -> Result<CriterionResult, AnalysisError> {
        let regret = Self::regret_matrix(matrix)?;
        finish(Criterion::Savage, matrix, regret.max_regrets(), tie_break, None)
    }

    /// Expected Value: Σ p(s)·payoff[alt][s], maximized.
    ///
    /// # Errors
    /// Configuration error if the distribution covers a different scenario set.
    pub fn expected_value(
        matrix: &PayoffMatrix,
        distribution: &ProbabilityDistribution,
        tie_break: TieBreak,
    ) -> Result<CriterionResult, AnalysisError> {
        ensure_populated(matrix)?;
        let probabilities = distribution.aligned(matrix.scenario_ids())?;
        let scores = matrix
            .rows()
            .iter()
            .map(|row| weighted_sum(row, &probabilities))
            .collect();
        finish(Criterion::ExpectedValue, matrix, scores, tie_break, None)
    }

    /// Runs all six criteria; Expected Value uses `distribution`.
    pub fn evaluate_all(
        matrix: &PayoffMatrix,
        distribution: &ProbabilityDistribution,
        alpha: HurwiczAlpha,
        tie_break: TieBreak,
    ) -> Result<CriteriaResults, AnalysisError> {
        Ok(CriteriaResults {
            laplace: Self::laplace(matrix, tie_break)?,
            maximax: Self::maximax(matrix, tie_break)?,
            maximin: Self::maximin(matrix, tie_break)?,
            hurwicz: Self::hurwicz(matrix, alpha, tie_break)?,
            savage: Self::savage(matrix, tie_break)?,
            expected_value: Self::expected_value(matrix, distribution, tie_break)?,
        })
    }
}

pub(crate) fn weighted_sum(row: &[f64], probabilities: &[f64]) -> f64 {
    row.iter().zip(probabilities).map(|(x, p)| p * x).sum()
}

pub(crate) fn ensure_populated(matrix: &PayoffMatrix) -> Result<(), AnalysisError> {
    if matrix.alternative_count() == 0 {
        return Err(ValidationError::empty_field("alternatives").into());
    }
    if matrix.scenario_count() == 0 {
        return Err(ValidationError::empty_field("scenarios").into());
    }
    Ok(())
}

fn row_max(row: &[f64]) -> f64 {
    row.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn row_min(row: &[f64]) -> f64 {
    row.iter().copied().fold(f64::INFINITY, f64::min)
}

fn finish(
    criterion: Criterion,
    matrix: &PayoffMatrix,
    scores: Vec<f64>,
    tie_break: TieBreak,
    parameter: Option<f64>,
) -> Result<CriterionResult, AnalysisError> {
    let alternatives = matrix.alternative_ids();
    if let Some((alternative, score)) = alternatives
        .iter()
        .zip(&scores)
        .find(|(_, score)| !score.is_finite())
    {
        return Err(AnalysisError::degenerate(
            criterion.name(),
            format!("score of '{}' is {}", alternative, score),
        ));
    }

    let optimization = criterion.optimization();
    let index = select_best(alternatives, &scores, optimization, tie_break)
        .ok_or_else(|| AnalysisError::from(ValidationError::empty_field("alternatives")))?;

    let best = alternatives[index].clone();
    let best_score = scores[index];

    debug!(
        criterion = %criterion,
        best = %best,
        best_score = best_score,
        "Criterion evaluated"
    );

    Ok(CriterionResult {
        criterion,
        optimization,
        parameter,
        scores: alternatives
            .iter()
            .cloned()
            .zip(scores)
            .map(|(alternative, score)| AlternativeScore { alternative, score })
            .collect(),
        best,
        best_score,
    })
}
