//! CLI argument parsing for blbn-report

use crate::config::{Comparison, ExperimentConfig};
use crate::wilcoxon::RankScheme;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for comparison reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// LaTeX table markup (default)
    Latex,
    /// Fixed-width text tables
    Text,
    /// JSON document with rank sums per cell
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "blbn-report")]
#[command(version)]
#[command(
    about = "Paired Wilcoxon signed-rank comparison of budgeted-learning configurations",
    long_about = None
)]
pub struct Cli {
    /// Results root holding the m=... run directories (overrides the config file)
    #[arg(long = "results", value_name = "DIR")]
    pub results: Option<PathBuf>,

    /// TOML experiment configuration replacing the built-in study
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How tied differences are ranked (overrides the config file)
    #[arg(long = "rank-scheme", value_enum)]
    pub rank_scheme: Option<RankScheme>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "latex")]
    pub format: OutputFormat,

    /// Compare a single pair of configuration identifiers instead of the configured list
    #[arg(long = "compare", num_args = 2, value_names = ["LEFT", "RIGHT"])]
    pub compare: Option<Vec<String>>,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut ExperimentConfig) {
        if let Some(results) = &self.results {
            config.results_root = results.clone();
        }
        if let Some(scheme) = self.rank_scheme {
            config.rank_scheme = scheme;
        }
        if let Some([left, right]) = self.compare.as_deref() {
            config.comparisons = vec![Comparison::new(left, right)];
        }
    }
}
