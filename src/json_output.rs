//! JSON output format for comparison reports
//!
//! Unlike the tables, JSON keeps untested cells apart from tested ties and
//! carries the rank sums behind every tested sign.

use crate::report::{CellOutcome, ComparisonReport};
use crate::wilcoxon::{RankScheme, Sign};
use serde::{Deserialize, Serialize};

/// One (policy, dataset) cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonCell {
    pub dataset: String,
    /// `+`, `-` or `0`
    pub sign: Sign,
    pub tested: bool,
    /// Why the cell was not tested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub untested_reason: Option<String>,
    /// Number of non-zero paired differences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonzero_differences: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positive_rank_sum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_rank_sum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_value: Option<u32>,
}

/// One policy row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPolicyRow {
    pub policy: String,
    pub cells: Vec<JsonCell>,
    pub wins: usize,
    pub losses: usize,
}

/// One comparison table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonComparison {
    pub left: String,
    pub right: String,
    pub datasets: Vec<String>,
    pub rows: Vec<JsonPolicyRow>,
    pub total_wins: usize,
    pub total_losses: usize,
}

/// Complete JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub rank_scheme: RankScheme,
    pub comparisons: Vec<JsonComparison>,
}

impl JsonCell {
    fn from_cell(dataset: &str, outcome: &CellOutcome) -> Self {
        match outcome {
            CellOutcome::Tested(test) => Self {
                dataset: dataset.to_string(),
                sign: test.sign,
                tested: true,
                untested_reason: None,
                nonzero_differences: Some(test.nonzero()),
                positive_rank_sum: Some(test.positive_rank_sum),
                negative_rank_sum: Some(test.negative_rank_sum),
                critical_value: test.critical_value,
            },
            CellOutcome::Untested(reason) => Self {
                dataset: dataset.to_string(),
                sign: Sign::NoDifference,
                tested: false,
                untested_reason: Some(reason.to_string()),
                nonzero_differences: None,
                positive_rank_sum: None,
                negative_rank_sum: None,
                critical_value: None,
            },
        }
    }
}

impl From<&ComparisonReport> for JsonComparison {
    fn from(report: &ComparisonReport) -> Self {
        Self {
            left: report.comparison.left.clone(),
            right: report.comparison.right.clone(),
            datasets: report.datasets.clone(),
            rows: report
                .rows
                .iter()
                .map(|row| JsonPolicyRow {
                    policy: row.policy.clone(),
                    cells: row
                        .cells
                        .iter()
                        .map(|cell| JsonCell::from_cell(&cell.dataset, &cell.outcome))
                        .collect(),
                    wins: row.wins,
                    losses: row.losses,
                })
                .collect(),
            total_wins: report.total_wins,
            total_losses: report.total_losses,
        }
    }
}

impl JsonReport {
    pub fn new(reports: &[ComparisonReport], rank_scheme: RankScheme) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            rank_scheme,
            comparisons: reports.iter().map(JsonComparison::from).collect(),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
