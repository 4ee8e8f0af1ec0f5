//! blbn-report - paired Wilcoxon signed-rank comparison of budgeted-learning runs
//!
//! Loads per-trial error rates from graph logs, runs a signed-rank test per
//! (policy, dataset) cell between two configurations, and renders win/loss
//! tables as LaTeX, plain text, or JSON.

pub mod cli;
pub mod config;
pub mod json_output;
pub mod latex_output;
pub mod report;
pub mod samples;
pub mod text_output;
pub mod wilcoxon;
