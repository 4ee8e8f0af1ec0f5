//! Trial sample loading from budgeted-learning result logs
//!
//! Every trial of a run writes a tab-separated log
//! `<root>/<run dir>/<timestamp>/<config id>.graph.csv.<trial>` with one row
//! per learning step:
//!
//! ```text
//! iteration  node_index  case_index  error_rate  log_loss  selection_time
//! ```
//!
//! The loader reads the row selected by the dataset budget and turns its
//! error rate into an accuracy score. Anything that goes wrong for a trial
//! (no log, short log, unreadable row) makes that trial absent; loading
//! never fails.

use crate::config::{DatasetSlot, ExperimentConfig, RunLayout};
use std::fs;
use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

/// Number of trials per run; trial files are suffixed `0..TRIAL_COUNT`
pub const TRIAL_COUNT: usize = 10;

/// Column of the error rate in a log row
pub const ERROR_RATE_FIELD: usize = 3;

/// Errors parsing one log row
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphRowError {
    #[error("row has {found} fields, error rate is field {index}")]
    MissingField { index: usize, found: usize },

    #[error("invalid error rate '{value}': {source}")]
    InvalidNumber {
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Read the error rate (field 3) of a tab-separated log row
pub fn parse_error_rate(row: &str) -> Result<f64, GraphRowError> {
    let fields: Vec<&str> = row.split('\t').collect();
    let raw = fields
        .get(ERROR_RATE_FIELD)
        .ok_or(GraphRowError::MissingField {
            index: ERROR_RATE_FIELD,
            found: fields.len(),
        })?
        .trim();

    raw.parse::<f64>()
        .map_err(|source| GraphRowError::InvalidNumber {
            value: raw.to_string(),
            source,
        })
}

/// Accuracy score of a log row (`1.0 - error_rate`)
pub fn score_row(row: &str) -> Result<f64, GraphRowError> {
    parse_error_rate(row).map(|error_rate| 1.0 - error_rate)
}

/// Why a trial contributed no score
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingTrial {
    /// Run directory absent or no timestamp directory holds the trial log
    NoMatch,
    /// Best match exists but is not a regular file
    NotAFile(PathBuf),
    /// Log could not be read
    Unreadable { path: PathBuf, reason: String },
    /// Log ends before the budget row
    TooShort {
        path: PathBuf,
        lines: usize,
        needed: usize,
    },
    /// Budget row has no usable error rate
    Malformed { path: PathBuf, error: GraphRowError },
}

/// Result of loading one trial
#[derive(Debug, Clone, PartialEq)]
pub enum TrialSample {
    Score(f64),
    Missing(MissingTrial),
}

impl TrialSample {
    /// Score, if the trial produced one
    pub fn score(&self) -> Option<f64> {
        match self {
            TrialSample::Score(score) => Some(*score),
            TrialSample::Missing(_) => None,
        }
    }
}

/// Anything that can produce the per-trial scores of one configuration
///
/// Scores are in trial order; absent trials are simply left out.
pub trait SampleSource {
    fn load(&self, config_id: &str, policy: &str, slot: &DatasetSlot) -> Vec<f64>;
}

/// Loads trial scores from a results tree on disk
#[derive(Debug, Clone)]
pub struct SampleLoader {
    root: PathBuf,
    run: RunLayout,
    baseline_policy: String,
}

impl SampleLoader {
    pub fn new<P: Into<PathBuf>>(root: P, run: RunLayout, baseline_policy: &str) -> Self {
        Self {
            root: root.into(),
            run,
            baseline_policy: baseline_policy.to_string(),
        }
    }

    pub fn from_config(config: &ExperimentConfig) -> Self {
        Self::new(
            config.results_root.clone(),
            config.run.clone(),
            &config.baseline_policy,
        )
    }

    /// Directory holding every timestamped run of `policy` on `slot`
    pub fn run_directory(&self, policy: &str, slot: &DatasetSlot) -> PathBuf {
        self.root.join(self.run.directory_name(slot, policy))
    }

    /// Zero-based log row holding the result at the slot's budget
    ///
    /// The baseline policy logs no initial row, so its budget row comes one
    /// line earlier.
    pub fn target_line(&self, policy: &str, budget: u32) -> usize {
        let budget = budget as usize;
        if policy == self.baseline_policy {
            budget.saturating_sub(1)
        } else {
            budget
        }
    }

    /// Locate the log of one trial
    ///
    /// The run directory may hold several timestamped subdirectories; the
    /// lexicographically greatest one containing the trial log wins.
    /// Hidden entries are ignored.
    pub fn resolve_trial(
        &self,
        config_id: &str,
        policy: &str,
        slot: &DatasetSlot,
        trial: usize,
    ) -> Option<PathBuf> {
        let run_dir = self.run_directory(policy, slot);
        let file_name = format!("{}.graph.csv.{}", config_id, trial);

        let entries = match fs::read_dir(&run_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::trace!("Cannot list {}: {}", run_dir.display(), e);
                return None;
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
            .map(|entry| entry.path().join(&file_name))
            .filter(|candidate| candidate.exists())
            .max()
    }

    /// Load one trial
    pub fn load_trial(
        &self,
        config_id: &str,
        policy: &str,
        slot: &DatasetSlot,
        trial: usize,
    ) -> TrialSample {
        let Some(path) = self.resolve_trial(config_id, policy, slot, trial) else {
            return TrialSample::Missing(MissingTrial::NoMatch);
        };

        if !path.is_file() {
            return TrialSample::Missing(MissingTrial::NotAFile(path));
        }

        // Stray non-UTF-8 bytes only spoil the rows they sit on
        let content = match fs::read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                return TrialSample::Missing(MissingTrial::Unreadable {
                    path,
                    reason: e.to_string(),
                })
            }
        };

        let line = self.target_line(policy, slot.budget);
        let lines: Vec<&str> = content.lines().collect();
        let Some(row) = lines.get(line) else {
            return TrialSample::Missing(MissingTrial::TooShort {
                path,
                lines: lines.len(),
                needed: line + 1,
            });
        };

        match score_row(row) {
            Ok(score) => TrialSample::Score(score),
            Err(error) => {
                tracing::warn!("Skipping malformed row {} of {}: {}", line, path.display(), error);
                TrialSample::Missing(MissingTrial::Malformed { path, error })
            }
        }
    }

    /// Load every trial, in trial order, including the absent ones
    pub fn load_trials(&self, config_id: &str, policy: &str, slot: &DatasetSlot) -> Vec<TrialSample> {
        (0..TRIAL_COUNT)
            .map(|trial| {
                let sample = self.load_trial(config_id, policy, slot, trial);
                if let TrialSample::Missing(reason) = &sample {
                    tracing::debug!(
                        config = config_id,
                        policy,
                        dataset = %slot.name,
                        trial,
                        "Trial absent: {:?}",
                        reason
                    );
                }
                sample
            })
            .collect()
    }
}

impl SampleSource for SampleLoader {
    fn load(&self, config_id: &str, policy: &str, slot: &DatasetSlot) -> Vec<f64> {
        self.load_trials(config_id, policy, slot)
            .iter()
            .filter_map(TrialSample::score)
            .collect()
    }
}
