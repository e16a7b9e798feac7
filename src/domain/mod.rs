//! Domain layer containing the decision-analysis engine and its inputs.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `problem` - Cost and revenue tables, probability distributions, problem aggregate
//! - `analysis` - Pure services: payoff matrix, criteria, decision trees, report assembly

pub mod analysis;
pub mod foundation;
pub mod problem;
