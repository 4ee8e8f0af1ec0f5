// Win/loss aggregation over (policy x dataset) cells
//
// One ComparisonReport per configuration pair: a row per policy, a cell per
// dataset slot, and per-row and grand win/loss totals. Cells that could not
// be tested are kept apart from tested ties even though both print as `0`.

mod aggregate;

pub use aggregate::{evaluate_cell, ReportAggregator};

use crate::config::Comparison;
use crate::wilcoxon::{Sign, SignedRankTest};
use std::fmt;

/// Why a cell was not tested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UntestedReason {
    /// Neither configuration produced any trial score
    NoSamples,
    /// The configurations produced different numbers of trial scores
    LengthMismatch { left: usize, right: usize },
}

impl fmt::Display for UntestedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UntestedReason::NoSamples => f.write_str("no samples"),
            UntestedReason::LengthMismatch { left, right } => {
                write!(f, "sample count mismatch ({} vs {})", left, right)
            }
        }
    }
}

/// Result of one (policy, dataset) cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellOutcome {
    Tested(SignedRankTest),
    Untested(UntestedReason),
}

impl CellOutcome {
    /// Sign shown in the table; untested cells show `0`
    pub fn sign(&self) -> Sign {
        match self {
            CellOutcome::Tested(test) => test.sign,
            CellOutcome::Untested(_) => Sign::NoDifference,
        }
    }

    pub fn is_tested(&self) -> bool {
        matches!(self, CellOutcome::Tested(_))
    }
}

/// One dataset cell of a policy row
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub dataset: String,
    pub outcome: CellOutcome,
}

/// All cells of one policy
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyRow {
    pub policy: String,
    pub cells: Vec<Cell>,
    pub wins: usize,
    pub losses: usize,
}

impl PolicyRow {
    /// Build a row and tally its wins and losses
    pub fn new(policy: &str, cells: Vec<Cell>) -> Self {
        let wins = cells
            .iter()
            .filter(|cell| cell.outcome.sign() == Sign::Better)
            .count();
        let losses = cells
            .iter()
            .filter(|cell| cell.outcome.sign() == Sign::Worse)
            .count();

        Self {
            policy: policy.to_string(),
            cells,
            wins,
            losses,
        }
    }
}

/// One table: a configuration pair across every policy and dataset
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub comparison: Comparison,
    pub datasets: Vec<String>,
    pub rows: Vec<PolicyRow>,
    pub total_wins: usize,
    pub total_losses: usize,
}

impl ComparisonReport {
    /// Build a report and accumulate the grand totals
    pub fn new(comparison: Comparison, datasets: Vec<String>, rows: Vec<PolicyRow>) -> Self {
        let total_wins = rows.iter().map(|row| row.wins).sum();
        let total_losses = rows.iter().map(|row| row.losses).sum();

        Self {
            comparison,
            datasets,
            rows,
            total_wins,
            total_losses,
        }
    }

    /// Number of cells that ran the signed-rank test
    pub fn tested_cells(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| &row.cells)
            .filter(|cell| cell.outcome.is_tested())
            .count()
    }
}
