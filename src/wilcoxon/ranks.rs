// Rank assignment for non-zero paired differences
//
// Ranks run by descending magnitude: the largest |d| gets rank 1. For each
// element the rank is
//
//     (1 + bigger + m - smaller) / 2
//
// where `bigger` and `smaller` count the other elements with a larger or a
// smaller magnitude. How `smaller` is counted depends on the scheme.

use serde::{Deserialize, Serialize};

/// How the "smaller than" count of the rank formula is evaluated
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RankScheme {
    /// Never count smaller elements (rank = (1 + bigger + m) / 2)
    ///
    /// The documented reading of the report's rank formula, where the
    /// smaller-than term contributes nothing. Historical tables were
    /// produced with `Script`.
    #[default]
    Legacy,

    /// Count `j` as smaller when the signed `d[j] < |d[i]|`
    ///
    /// Byte-for-byte reproduction of the old report script, which took the
    /// absolute value of the comparison instead of the operand. Differs from
    /// `Midrank` only inside tie groups, and is not symmetric under swapping
    /// the two configurations when ties mix signs.
    Script,

    /// Count `j` as smaller when `|d[j]| < |d[i]|` (average rank for ties)
    Midrank,
}

impl RankScheme {
    /// Whether `other` is counted as smaller than an element of magnitude
    /// `magnitude`. Only called for elements that are not bigger.
    fn counts_as_smaller(self, other: f64, magnitude: f64) -> bool {
        match self {
            RankScheme::Legacy => false,
            RankScheme::Script => other < magnitude,
            RankScheme::Midrank => other.abs() < magnitude,
        }
    }
}

impl std::fmt::Display for RankScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RankScheme::Legacy => "legacy",
            RankScheme::Script => "script",
            RankScheme::Midrank => "midrank",
        };
        f.write_str(name)
    }
}

/// Assign a rank to every difference in `diffs`
///
/// `diffs` must already have zero differences removed. The returned ranks
/// are positionally aligned with `diffs`.
pub fn rank_differences(diffs: &[f64], scheme: RankScheme) -> Vec<f64> {
    let m = diffs.len();

    diffs
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let magnitude = d.abs();
            let mut bigger = 0usize;
            let mut smaller = 0usize;

            for (j, other) in diffs.iter().enumerate() {
                if j == i {
                    continue;
                }
                if other.abs() > magnitude {
                    bigger += 1;
                } else if scheme.counts_as_smaller(*other, magnitude) {
                    smaller += 1;
                }
            }

            (1 + bigger + m - smaller) as f64 / 2.0
        })
        .collect()
}
