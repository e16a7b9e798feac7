//! Expansion Analysis - Decision analysis for regional site selection
//!
//! Evaluates candidate sites against demand scenarios with the classical
//! criteria under uncertainty (Laplace, Maximax, Maximin, Hurwicz, Savage),
//! the expected-value criterion under risk, and a decision tree that prices
//! a market study. Results are rendered as Markdown or JSON reports.

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
