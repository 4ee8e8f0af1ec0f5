//! Integration tests for loading trial scores from a results tree

use blbn_report::config::{DatasetSlot, RunLayout};
use blbn_report::samples::{MissingTrial, SampleLoader, SampleSource, TrialSample};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG_ID: &str = "Bayesian.choice.naive";

fn slot() -> DatasetSlot {
    DatasetSlot::new("ChestClinic", "ChestClinic", "TbOrCa", 3)
}

/// Log with one row per step; row `i` has error rate `rates[i]`
fn write_log(dir: &Path, trial: usize, rates: &[f64]) {
    fs::create_dir_all(dir).unwrap();
    let body: String = rates
        .iter()
        .enumerate()
        .map(|(i, rate)| format!("{}\t3\t{}\t{}\t0.52\t0.001\n", i, i * 7, rate))
        .collect();
    fs::write(dir.join(format!("{}.graph.csv.{}", CONFIG_ID, trial)), body).unwrap();
}

fn run_dir(root: &Path, policy: &str) -> std::path::PathBuf {
    root.join(RunLayout::default().directory_name(&slot(), policy))
}

#[test]
fn test_partial_trials_keep_trial_order() {
    let root = TempDir::new().unwrap();
    let stamp = run_dir(root.path(), "rr").join("20240101-120000");
    write_log(&stamp, 0, &[0.5, 0.4, 0.3, 0.25]);
    write_log(&stamp, 2, &[0.5, 0.4, 0.3, 0.5]);
    write_log(&stamp, 5, &[0.5, 0.4, 0.3, 0.75]);

    let loader = SampleLoader::new(root.path(), RunLayout::default(), "bl");
    let scores = loader.load(CONFIG_ID, "rr", &slot());

    assert_eq!(scores, vec![0.75, 0.5, 0.25]);
}

#[test]
fn test_baseline_reads_one_row_earlier() {
    let root = TempDir::new().unwrap();
    let stamp = run_dir(root.path(), "bl").join("20240101-120000");
    write_log(&stamp, 0, &[0.5, 0.4, 0.25]);

    let loader = SampleLoader::new(root.path(), RunLayout::default(), "bl");
    assert_eq!(loader.load(CONFIG_ID, "bl", &slot()), vec![0.75]);
}

#[test]
fn test_short_log_is_absent() {
    let root = TempDir::new().unwrap();
    let stamp = run_dir(root.path(), "rr").join("20240101-120000");
    write_log(&stamp, 0, &[0.5, 0.4]);

    let loader = SampleLoader::new(root.path(), RunLayout::default(), "bl");
    let trials = loader.load_trials(CONFIG_ID, "rr", &slot());

    assert_eq!(trials.len(), 10);
    assert!(matches!(
        &trials[0],
        TrialSample::Missing(MissingTrial::TooShort { lines: 2, needed: 4, .. })
    ));
    assert!(trials[1..]
        .iter()
        .all(|t| matches!(t, TrialSample::Missing(MissingTrial::NoMatch))));
    assert!(loader.load(CONFIG_ID, "rr", &slot()).is_empty());
}

#[test]
fn test_missing_results_root_yields_no_samples() {
    let loader = SampleLoader::new("/nonexistent/blbn/results", RunLayout::default(), "bl");
    assert!(loader.load(CONFIG_ID, "rr", &slot()).is_empty());
}

#[test]
fn test_latest_timestamp_per_trial() {
    let root = TempDir::new().unwrap();
    let run = run_dir(root.path(), "rr");
    write_log(&run.join("20240101-120000"), 0, &[0.0, 0.0, 0.0, 0.5]);
    write_log(&run.join("20240101-120000"), 1, &[0.0, 0.0, 0.0, 0.5]);
    // Rerun of trial 0 only
    write_log(&run.join("20240202-090000"), 0, &[0.0, 0.0, 0.0, 0.25]);

    let loader = SampleLoader::new(root.path(), RunLayout::default(), "bl");
    assert_eq!(loader.load(CONFIG_ID, "rr", &slot()), vec![0.75, 0.5]);
}
