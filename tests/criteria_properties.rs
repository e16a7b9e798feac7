//! Property tests for the decision criteria and the value-of-information
//! evaluator over arbitrary payoff matrices.

use proptest::prelude::*;
use proptest::test_runner::Config;

use expansion_analysis::domain::analysis::{
    CriteriaEvaluator, Criterion, InformationValueEvaluator, PayoffMatrix, StudyBaseline,
    TieBreak,
};
use expansion_analysis::domain::foundation::{AlternativeId, HurwiczAlpha, ScenarioId};
use expansion_analysis::domain::problem::{ProbabilityDistribution, DEFAULT_PROBABILITY_TOLERANCE};

// =============================================================================
// Strategies
// =============================================================================

const AMOUNT: std::ops::Range<f64> = -10_000_000.0..10_000_000.0;

fn alternatives(n: usize) -> Vec<AlternativeId> {
    (0..n)
        .map(|i| AlternativeId::new(format!("site_{}", i)).unwrap())
        .collect()
}

fn scenarios(m: usize) -> Vec<ScenarioId> {
    (0..m)
        .map(|j| ScenarioId::new(format!("s{}", j)).unwrap())
        .collect()
}

fn arb_matrix() -> impl Strategy<Value = PayoffMatrix> {
    (1usize..5, 1usize..5).prop_flat_map(|(n, m)| {
        prop::collection::vec(prop::collection::vec(AMOUNT, m), n).prop_map(move |rows| {
            PayoffMatrix::from_rows(alternatives(n), scenarios(m), rows).unwrap()
        })
    })
}

fn distribution(name: &str, ids: &[ScenarioId], weights: &[f64]) -> ProbabilityDistribution {
    let total: f64 = weights.iter().sum();
    let entries = ids
        .iter()
        .cloned()
        .zip(weights.iter().map(|w| w / total))
        .collect();
    ProbabilityDistribution::try_new(name, entries, DEFAULT_PROBABILITY_TOLERANCE).unwrap()
}

/// A matrix with two independent probability weightings over its scenarios.
fn arb_matrix_with_weights() -> impl Strategy<Value = (PayoffMatrix, Vec<f64>, Vec<f64>)> {
    arb_matrix().prop_flat_map(|matrix| {
        let m = matrix.scenario_count();
        (
            Just(matrix),
            prop::collection::vec(0.01f64..1.0, m),
            prop::collection::vec(0.01f64..1.0, m),
        )
    })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
}

// =============================================================================
// Criteria Properties
// =============================================================================

proptest! {
    #![proptest_config(Config::with_cases(64))]

    #[test]
    fn laplace_is_row_mean(matrix in arb_matrix()) {
        let result = CriteriaEvaluator::laplace(&matrix, TieBreak::FirstInOrder).unwrap();

        for (row, score) in matrix.rows().iter().zip(&result.scores) {
            let mean = row.iter().sum::<f64>() / row.len() as f64;
            prop_assert!(close(score.score, mean));
        }
    }

    #[test]
    fn hurwicz_lies_between_maximin_and_maximax(matrix in arb_matrix(), alpha in 0.0f64..=1.0) {
        let alpha = HurwiczAlpha::try_new(alpha).unwrap();
        let maximax = CriteriaEvaluator::maximax(&matrix, TieBreak::FirstInOrder).unwrap();
        let maximin = CriteriaEvaluator::maximin(&matrix, TieBreak::FirstInOrder).unwrap();
        let hurwicz = CriteriaEvaluator::hurwicz(&matrix, alpha, TieBreak::FirstInOrder).unwrap();

        for ((low, mid), high) in maximin.scores.iter().zip(&hurwicz.scores).zip(&maximax.scores) {
            prop_assert!(low.score <= mid.score + 1e-6);
            prop_assert!(mid.score <= high.score + 1e-6);
        }
    }

    #[test]
    fn regrets_are_non_negative_and_zero_at_column_max(matrix in arb_matrix()) {
        let regret = CriteriaEvaluator::regret_matrix(&matrix).unwrap();

        for row in &regret.regrets {
            prop_assert!(row.iter().all(|r| *r >= 0.0));
        }
        for (j, column_max) in regret.column_max.iter().enumerate() {
            let best_row = matrix
                .rows()
                .iter()
                .position(|row| row[j] == *column_max)
                .unwrap();
            prop_assert_eq!(regret.regrets[best_row][j], 0.0);
        }
    }

    #[test]
    fn savage_picks_smallest_max_regret(matrix in arb_matrix()) {
        let regret = CriteriaEvaluator::regret_matrix(&matrix).unwrap();
        let savage = CriteriaEvaluator::savage(&matrix, TieBreak::FirstInOrder).unwrap();

        let min_max = regret.max_regrets().into_iter().fold(f64::INFINITY, f64::min);
        prop_assert_eq!(savage.best_score, min_max);
    }

    #[test]
    fn expected_value_is_linear_in_probabilities(
        (matrix, p, q) in arb_matrix_with_weights(),
        lambda in 0.0f64..=1.0,
    ) {
        let ids = matrix.scenario_ids().to_vec();
        let p = distribution("p", &ids, &p);
        let q = distribution("q", &ids, &q);
        let mixed_weights: Vec<f64> = p
            .entries()
            .iter()
            .zip(q.entries())
            .map(|((_, a), (_, b))| lambda * a.value() + (1.0 - lambda) * b.value())
            .collect();
        let mixed = distribution("mixed", &ids, &mixed_weights);

        let ev_p = CriteriaEvaluator::expected_value(&matrix, &p, TieBreak::FirstInOrder).unwrap();
        let ev_q = CriteriaEvaluator::expected_value(&matrix, &q, TieBreak::FirstInOrder).unwrap();
        let ev_mixed =
            CriteriaEvaluator::expected_value(&matrix, &mixed, TieBreak::FirstInOrder).unwrap();

        for ((a, b), c) in ev_p.scores.iter().zip(&ev_q.scores).zip(&ev_mixed.scores) {
            prop_assert!(close(c.score, lambda * a.score + (1.0 - lambda) * b.score));
        }
    }

    #[test]
    fn degenerate_distribution_selects_column(
        matrix in arb_matrix(),
        pick in any::<prop::sample::Index>(),
    ) {
        let ids = matrix.scenario_ids().to_vec();
        let target = pick.index(ids.len());
        let weights: Vec<f64> = (0..ids.len())
            .map(|j| if j == target { 1.0 } else { 0.0 })
            .collect();
        let certain = distribution("certain", &ids, &weights);

        let ev = CriteriaEvaluator::expected_value(&matrix, &certain, TieBreak::FirstInOrder)
            .unwrap();

        let column = matrix.column(&ids[target]).unwrap();
        for (score, payoff) in ev.scores.iter().zip(column) {
            prop_assert!(close(score.score, payoff));
        }
    }

    #[test]
    fn study_recommended_only_when_net_beats_prior(
        (matrix, p, q) in arb_matrix_with_weights(),
        study_cost in 0.0f64..5_000_000.0,
    ) {
        let ids = matrix.scenario_ids().to_vec();
        let prior = distribution("prior", &ids, &p);
        let posterior = distribution("posterior", &ids, &q);

        let voi = InformationValueEvaluator::evaluate(
            &matrix,
            &prior,
            &posterior,
            study_cost,
            StudyBaseline::Prior,
            TieBreak::FirstInOrder,
        )
        .unwrap();

        prop_assert_eq!(voi.baseline_value, voi.best_prior.value);
        prop_assert_eq!(voi.delta, voi.best_prior.value - voi.best_posterior_net.value);
        prop_assert_eq!(voi.recommend_study, voi.best_posterior_net.value > voi.best_prior.value);
        if !voi.recommend_study {
            prop_assert!(voi.delta >= 0.0);
        }
        prop_assert!(close(
            voi.best_posterior_net.value,
            voi.best_posterior_gross.value - study_cost
        ));
    }
}

// =============================================================================
// Boundary and Tie-Break Cases
// =============================================================================

proptest! {
    #![proptest_config(Config::with_cases(32))]

    #[test]
    fn single_alternative_wins_every_criterion(
        row in prop::collection::vec(AMOUNT, 1..5),
    ) {
        let m = row.len();
        let matrix = PayoffMatrix::from_rows(alternatives(1), scenarios(m), vec![row]).unwrap();
        let prior = distribution("prior", matrix.scenario_ids(), &vec![1.0; m]);

        let results = CriteriaEvaluator::evaluate_all(
            &matrix,
            &prior,
            HurwiczAlpha::default(),
            TieBreak::FirstInOrder,
        )
        .unwrap();

        for criterion in Criterion::ALL {
            prop_assert_eq!(&results.get(criterion).best, &matrix.alternative_ids()[0]);
        }
    }

    #[test]
    fn identical_rows_follow_tie_break_policy(
        row in prop::collection::vec(AMOUNT, 1..5),
    ) {
        let m = row.len();
        let ids = vec![
            AlternativeId::new("Zipaquira").unwrap(),
            AlternativeId::new("Armenia").unwrap(),
            AlternativeId::new("Medellin").unwrap(),
        ];
        let rows = vec![row.clone(), row.clone(), row];
        let matrix = PayoffMatrix::from_rows(ids, scenarios(m), rows).unwrap();

        let first = CriteriaEvaluator::laplace(&matrix, TieBreak::FirstInOrder).unwrap();
        let lexical = CriteriaEvaluator::laplace(&matrix, TieBreak::Lexicographic).unwrap();

        prop_assert_eq!(first.best.as_str(), "Zipaquira");
        prop_assert_eq!(lexical.best.as_str(), "Armenia");
    }
}
