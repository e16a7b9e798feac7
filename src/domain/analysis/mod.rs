//! Analysis Module - Pure decision-analysis services.
//!
//! # Components
//!
//! - `PayoffMatrix` - Net payoff per alternative and scenario
//! - `CriteriaEvaluator` - Laplace, Maximax, Maximin, Hurwicz, Savage, Expected Value
//! - `InformationValueEvaluator` - Decision trees and the value of a market study
//! - `assemble_report` - Gathers every result into an `AnalysisReport`
//!
//! All functions are pure and stateless: they take immutable inputs and
//! return new results. No ports are involved.

mod criteria;
mod decision_tree;
mod payoff_matrix;
mod report;
mod selection;

pub use criteria::{
    AlternativeScore, CriteriaEvaluator, CriteriaResults, Criterion, CriterionResult, RegretMatrix,
};
pub use decision_tree::{
    BestAlternative, ChanceNode, DecisionTree, ExpectedValueBreakdown, InformationValueEvaluator,
    InformationValueResult, OutcomeLeaf, ScenarioContribution, StudyBaseline,
};
pub use payoff_matrix::PayoffMatrix;
pub use report::{
    assemble_report, AnalysisReport, AnalysisSettings, ConsensusEntry, CostSummary,
    ProblemSummary, Recommendation,
};
pub use selection::{select_best, Optimization, TieBreak};
