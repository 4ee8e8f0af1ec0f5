// Drives sample loading and the signed-rank test over every cell
//
// Iteration is comparison-major, then policy, then dataset slot, so table
// rows and columns follow configuration order.

use crate::config::{Comparison, DatasetSlot, ExperimentConfig};
use crate::report::{Cell, CellOutcome, ComparisonReport, PolicyRow, UntestedReason};
use crate::samples::SampleSource;
use crate::wilcoxon::{signed_rank_test, RankScheme, WilcoxonError};

/// Compare the paired samples of one cell
///
/// Both samples must be non-empty and of equal length; otherwise the cell is
/// untested.
pub fn evaluate_cell(left: &[f64], right: &[f64], scheme: RankScheme) -> CellOutcome {
    if left.is_empty() && right.is_empty() {
        return CellOutcome::Untested(UntestedReason::NoSamples);
    }
    if left.is_empty() || left.len() != right.len() {
        return CellOutcome::Untested(UntestedReason::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    match signed_rank_test(left, right, scheme) {
        Ok(test) => CellOutcome::Tested(test),
        Err(WilcoxonError::LengthMismatch { left, right }) => {
            CellOutcome::Untested(UntestedReason::LengthMismatch { left, right })
        }
    }
}

/// Builds comparison reports from a sample source
pub struct ReportAggregator<'a, S: SampleSource> {
    config: &'a ExperimentConfig,
    source: S,
}

impl<'a, S: SampleSource> ReportAggregator<'a, S> {
    pub fn new(config: &'a ExperimentConfig, source: S) -> Self {
        Self { config, source }
    }

    fn cell(&self, comparison: &Comparison, policy: &str, slot: &DatasetSlot) -> Cell {
        let left = self.source.load(&comparison.left, policy, slot);
        let right = self.source.load(&comparison.right, policy, slot);
        let outcome = evaluate_cell(&left, &right, self.config.rank_scheme);

        match &outcome {
            CellOutcome::Tested(test) => tracing::debug!(
                policy,
                dataset = %slot.name,
                m = test.nonzero(),
                positive = test.positive_rank_sum,
                negative = test.negative_rank_sum,
                "Cell tested: {}",
                test.sign
            ),
            CellOutcome::Untested(reason) => tracing::debug!(
                policy,
                dataset = %slot.name,
                "Cell untested: {}",
                reason
            ),
        }

        Cell {
            dataset: slot.name.clone(),
            outcome,
        }
    }

    /// Build the table for one comparison
    pub fn compare(&self, comparison: &Comparison) -> ComparisonReport {
        let rows = self
            .config
            .policies
            .iter()
            .map(|policy| {
                let cells = self
                    .config
                    .datasets
                    .iter()
                    .map(|slot| self.cell(comparison, policy, slot))
                    .collect();
                PolicyRow::new(policy, cells)
            })
            .collect();

        let datasets = self
            .config
            .dataset_names()
            .into_iter()
            .map(String::from)
            .collect();

        let report = ComparisonReport::new(comparison.clone(), datasets, rows);
        tracing::info!(
            "{} vs {}: {} wins, {} losses ({} cells tested)",
            comparison.left,
            comparison.right,
            report.total_wins,
            report.total_losses,
            report.tested_cells()
        );
        report
    }

    /// Build one table per configured comparison, in order
    pub fn run(&self) -> Vec<ComparisonReport> {
        self.config
            .comparisons
            .iter()
            .map(|comparison| self.compare(comparison))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wilcoxon::Sign;
    use std::collections::HashMap;

    /// In-memory source keyed by (config id, policy, dataset)
    #[derive(Default)]
    struct FixedSource {
        samples: HashMap<(String, String, String), Vec<f64>>,
    }

    impl FixedSource {
        fn with(mut self, config_id: &str, policy: &str, dataset: &str, scores: &[f64]) -> Self {
            self.samples.insert(
                (config_id.to_string(), policy.to_string(), dataset.to_string()),
                scores.to_vec(),
            );
            self
        }
    }

    impl SampleSource for FixedSource {
        fn load(&self, config_id: &str, policy: &str, slot: &DatasetSlot) -> Vec<f64> {
            self.samples
                .get(&(config_id.to_string(), policy.to_string(), slot.name.clone()))
                .cloned()
                .unwrap_or_default()
        }
    }

    fn small_config() -> ExperimentConfig {
        ExperimentConfig {
            policies: vec!["rr".to_string(), "MBrr".to_string()],
            datasets: vec![
                DatasetSlot::new("Animals", "Animals", "Animal", 100),
                DatasetSlot::new("ChestClinic", "ChestClinic", "TbOrCa", 40),
            ],
            comparisons: vec![Comparison::new("A", "B")],
            ..ExperimentConfig::default()
        }
    }

    const HIGH: [f64; 7] = [0.91, 0.92, 0.93, 0.94, 0.95, 0.96, 0.97];
    const LOW: [f64; 7] = [0.81, 0.82, 0.83, 0.84, 0.85, 0.86, 0.87];

    #[test]
    fn test_evaluate_no_samples() {
        assert_eq!(
            evaluate_cell(&[], &[], RankScheme::Legacy),
            CellOutcome::Untested(UntestedReason::NoSamples)
        );
    }

    #[test]
    fn test_evaluate_left_empty_is_mismatch() {
        assert_eq!(
            evaluate_cell(&[], &[0.5], RankScheme::Legacy),
            CellOutcome::Untested(UntestedReason::LengthMismatch { left: 0, right: 1 })
        );
    }

    #[test]
    fn test_evaluate_length_mismatch() {
        assert_eq!(
            evaluate_cell(&HIGH, &LOW[..6], RankScheme::Legacy),
            CellOutcome::Untested(UntestedReason::LengthMismatch { left: 7, right: 6 })
        );
    }

    #[test]
    fn test_evaluate_tested() {
        let outcome = evaluate_cell(&HIGH, &LOW, RankScheme::Legacy);
        assert!(outcome.is_tested());
        assert_eq!(outcome.sign(), Sign::Better);
    }

    #[test]
    fn test_compare_builds_rows_and_totals() {
        let config = small_config();
        let source = FixedSource::default()
            .with("A", "rr", "Animals", &HIGH)
            .with("B", "rr", "Animals", &LOW)
            .with("A", "rr", "ChestClinic", &LOW)
            .with("B", "rr", "ChestClinic", &HIGH)
            .with("A", "MBrr", "Animals", &HIGH)
            .with("B", "MBrr", "Animals", &LOW);

        let aggregator = ReportAggregator::new(&config, source);
        let report = aggregator.compare(&config.comparisons[0]);

        assert_eq!(report.datasets, vec!["Animals", "ChestClinic"]);
        assert_eq!(report.rows.len(), 2);

        let rr = &report.rows[0];
        assert_eq!(rr.policy, "rr");
        assert_eq!(rr.cells[0].outcome.sign(), Sign::Better);
        assert_eq!(rr.cells[1].outcome.sign(), Sign::Worse);
        assert_eq!((rr.wins, rr.losses), (1, 1));

        let mbrr = &report.rows[1];
        assert_eq!(mbrr.cells[0].outcome.sign(), Sign::Better);
        assert_eq!(
            mbrr.cells[1].outcome,
            CellOutcome::Untested(UntestedReason::NoSamples)
        );
        assert_eq!((mbrr.wins, mbrr.losses), (1, 0));

        assert_eq!(report.total_wins, 2);
        assert_eq!(report.total_losses, 1);
        assert_eq!(report.tested_cells(), 3);
    }

    #[test]
    fn test_run_follows_comparison_order() {
        let mut config = small_config();
        config.comparisons = vec![Comparison::new("A", "B"), Comparison::new("B", "A")];
        let source = FixedSource::default()
            .with("A", "rr", "Animals", &HIGH)
            .with("B", "rr", "Animals", &LOW);

        let reports = ReportAggregator::new(&config, source).run();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].comparison, Comparison::new("A", "B"));
        assert_eq!(reports[0].rows[0].cells[0].outcome.sign(), Sign::Better);
        assert_eq!(reports[1].rows[0].cells[0].outcome.sign(), Sign::Worse);
        assert_eq!(reports[0].total_wins, reports[1].total_losses);
    }
}
