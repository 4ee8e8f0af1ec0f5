//! Experiment configuration for the comparison report
//!
//! The compiled-in defaults describe the budgeted-learning study: sixteen
//! policies, five datasets and four structure/choice comparisons. A TOML file
//! can replace any part of it.

use crate::wilcoxon::RankScheme;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One dataset column of the report
///
/// Bundles the values that always travel together: the dataset's network,
/// its target variable and the trial budget whose row is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSlot {
    /// Dataset name (column header)
    pub name: String,
    /// Bayesian network the data was sampled from
    pub network: String,
    /// Target (class) variable
    pub target: String,
    /// Learning budget; selects the log row that is compared
    pub budget: u32,
}

impl DatasetSlot {
    pub fn new(name: &str, network: &str, target: &str, budget: u32) -> Self {
        Self {
            name: name.to_string(),
            network: network.to_string(),
            target: target.to_string(),
            budget,
        }
    }
}

/// A pair of configuration identifiers to compare
///
/// `+` in the report means `left` is significantly better than `right`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comparison {
    pub left: String,
    pub right: String,
}

impl Comparison {
    pub fn new(left: &str, right: &str) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

/// Fixed parameters of the run directory name
///
/// `m=<net>.d=<data>.t=<target>.p=<policy>.r=<sampler>.b=<total_budget>.k=<folds>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunLayout {
    pub sampler: String,
    pub total_budget: u32,
    pub folds: u32,
}

impl Default for RunLayout {
    fn default() -> Self {
        Self {
            sampler: "uniform".to_string(),
            total_budget: 100,
            folds: 10,
        }
    }
}

impl RunLayout {
    /// Directory name holding every run of `policy` on `slot`
    pub fn directory_name(&self, slot: &DatasetSlot, policy: &str) -> String {
        format!(
            "m={}.d={}.t={}.p={}.r={}.b={}.k={}",
            slot.network,
            slot.name,
            slot.target,
            policy,
            self.sampler,
            self.total_budget,
            self.folds
        )
    }
}

/// Configuration validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no policies configured")]
    NoPolicies,

    #[error("no dataset slots configured")]
    NoDatasets,

    #[error("no comparisons configured")]
    NoComparisons,

    #[error("dataset '{0}' has a zero budget")]
    ZeroBudget(String),

    #[error("dataset '{0}' is configured more than once")]
    DuplicateDataset(String),

    #[error("policy '{0}' is configured more than once")]
    DuplicatePolicy(String),
}

/// Everything the report needs to know about the experiment
///
/// # Example
/// ```
/// use blbn_report::config::ExperimentConfig;
///
/// let config = ExperimentConfig::default();
/// assert_eq!(config.policies.len(), 16);
/// assert_eq!(config.datasets.len(), 5);
/// assert_eq!(config.comparisons.len(), 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Directory holding the `m=...` run directories
    pub results_root: PathBuf,

    /// Policy whose logs are one row shorter (reads row `budget - 1`)
    pub baseline_policy: String,

    /// Rank scheme used by the signed-rank test
    pub rank_scheme: RankScheme,

    /// Policies, one report row each
    pub policies: Vec<String>,

    /// Run directory naming
    pub run: RunLayout,

    /// Dataset columns, in report order
    #[serde(rename = "dataset")]
    pub datasets: Vec<DatasetSlot>,

    /// Comparisons, one table each
    #[serde(rename = "comparison")]
    pub comparisons: Vec<Comparison>,
}

const DEFAULT_POLICIES: [&str; 16] = [
    "random", "rr", "br", "empg", "dsep", "dsepw1", "dsepw2", "rsfl", "MBrandom", "MBrr", "MBbr",
    "MBempg", "MBdsep", "MBdsepw1", "MBdsepw2", "MBrsfl",
];

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            results_root: PathBuf::from("results"),
            baseline_policy: "bl".to_string(),
            rank_scheme: RankScheme::default(),
            policies: DEFAULT_POLICIES.iter().map(|p| p.to_string()).collect(),
            run: RunLayout::default(),
            datasets: vec![
                DatasetSlot::new("Animals", "Animals", "Animal", 100),
                DatasetSlot::new("CarDiagnosis2", "CarDiagnosis2", "ST", 100),
                DatasetSlot::new("ChestClinic", "ChestClinic", "TbOrCa", 40),
                DatasetSlot::new("Poya_Ganga", "Poya_Ganga", "G4", 30),
                DatasetSlot::new("ALARM", "ALARM", "Press", 100),
            ],
            comparisons: vec![
                Comparison::new("Bayesian.choice.naive", "naive.choice.naive"),
                Comparison::new("naive.choice.Bayesian", "naive.choice.naive"),
                Comparison::new("Bayesian.choice.Bayesian", "Bayesian.choice.naive"),
                Comparison::new("Bayesian.choice.Bayesian", "naive.choice.Bayesian"),
            ],
        }
    }
}

impl ExperimentConfig {
    /// Parse a configuration from TOML; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse experiment configuration TOML")
    }

    /// Load a configuration file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read experiment configuration: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration file: {}", path.as_ref().display()))
    }

    /// Dataset column names, in report order
    pub fn dataset_names(&self) -> Vec<&str> {
        self.datasets.iter().map(|slot| slot.name.as_str()).collect()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.policies.is_empty() {
            return Err(ConfigError::NoPolicies);
        }
        if self.datasets.is_empty() {
            return Err(ConfigError::NoDatasets);
        }
        if self.comparisons.is_empty() {
            return Err(ConfigError::NoComparisons);
        }

        let mut policies = HashSet::new();
        for policy in &self.policies {
            if !policies.insert(policy.as_str()) {
                return Err(ConfigError::DuplicatePolicy(policy.clone()));
            }
        }

        let mut names = HashSet::new();
        for slot in &self.datasets {
            if slot.budget == 0 {
                return Err(ConfigError::ZeroBudget(slot.name.clone()));
            }
            if !names.insert(slot.name.as_str()) {
                return Err(ConfigError::DuplicateDataset(slot.name.clone()));
            }
        }

        Ok(())
    }
}
