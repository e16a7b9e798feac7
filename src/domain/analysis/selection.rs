//! Best-alternative selection with an explicit tie-break policy.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::AlternativeId;

/// Direction in which a criterion's scores are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Optimization {
    Maximize,
    Minimize,
}

impl Optimization {
    /// Returns true if `candidate` strictly beats `incumbent`.
    pub fn is_better(&self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Optimization::Maximize => candidate > incumbent,
            Optimization::Minimize => candidate < incumbent,
        }
    }
}

impl fmt::Display for Optimization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Optimization::Maximize => write!(f, "maximize"),
            Optimization::Minimize => write!(f, "minimize"),
        }
    }
}

/// How exactly-equal best scores are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The earliest alternative in canonical order keeps the title.
    #[default]
    FirstInOrder,
    /// The alternative whose identifier sorts first wins.
    Lexicographic,
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::FirstInOrder => write!(f, "first_in_order"),
            TieBreak::Lexicographic => write!(f, "lexicographic"),
        }
    }
}

/// Picks the index of the best score.
///
/// # Edge Cases
/// - Empty input: Returns None
/// - Mismatched lengths: only the common prefix is considered
pub fn select_best(
    alternatives: &[AlternativeId],
    scores: &[f64],
    optimization: Optimization,
    tie_break: TieBreak,
) -> Option<usize> {
    let mut best: Option<usize> = None;

    for (index, (alternative, score)) in alternatives.iter().zip(scores).enumerate() {
        let Some(current) = best else {
            best = Some(index);
            continue;
        };

        let incumbent = scores[current];
        if optimization.is_better(*score, incumbent) {
            best = Some(index);
        } else if tie_break == TieBreak::Lexicographic
            && *score == incumbent
            && alternative < &alternatives[current]
        {
            best = Some(index);
        }
    }

    best
}
