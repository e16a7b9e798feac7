//! Problem module - Input model of the expansion decision.
//!
//! - `CostTable` - Monthly cost components per alternative
//! - `RevenueTable` - Projected revenue per alternative and scenario
//! - `ProbabilityDistribution` - Prior and posterior scenario probabilities
//! - `DecisionProblem` - All inputs of one run, plus the reference case
//! - `ProblemDocument` - YAML form of a problem

mod cost_table;
mod decision_problem;
mod distribution;
mod document;
mod revenue_table;
mod scenario;

pub use cost_table::{AlternativeCosts, CostComponent, CostTable, CostTableBuilder};
pub use decision_problem::{DecisionProblem, InitialInvestment};
pub use distribution::{
    ProbabilityDistribution, DEFAULT_PROBABILITY_TOLERANCE, MAX_PROBABILITY_TOLERANCE,
};
pub use document::{
    AlternativeCostsDocument, AlternativeRevenueDocument, CostComponentDocument, ProblemDocument,
    ScenarioDocument,
};
pub use revenue_table::{AlternativeRevenue, RevenueTable, RevenueTableBuilder};
pub use scenario::Scenario;
