// Signed-rank statistic and verdict
//
// `+` means the first sample is significantly better (higher score) than the
// second, `-` the reverse, `0` no significant difference.

use crate::wilcoxon::critical::critical_value;
use crate::wilcoxon::ranks::{rank_differences, RankScheme};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Outcome of one paired comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    /// First configuration significantly better
    #[serde(rename = "+")]
    Better,
    /// First configuration significantly worse
    #[serde(rename = "-")]
    Worse,
    /// No significant difference
    #[serde(rename = "0")]
    NoDifference,
}

impl Sign {
    /// Table symbol for this outcome
    pub fn symbol(self) -> &'static str {
        match self {
            Sign::Better => "+",
            Sign::Worse => "-",
            Sign::NoDifference => "0",
        }
    }

    /// Outcome seen from the other configuration
    pub fn flipped(self) -> Self {
        match self {
            Sign::Better => Sign::Worse,
            Sign::Worse => Sign::Better,
            Sign::NoDifference => Sign::NoDifference,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Errors from the signed-rank test
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WilcoxonError {
    #[error("paired samples differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}

/// Full result of a signed-rank test
#[derive(Debug, Clone, PartialEq)]
pub struct SignedRankTest {
    /// Non-zero paired differences, in trial order
    pub differences: Vec<f64>,

    /// Rank of each entry in `differences`
    pub ranks: Vec<f64>,

    /// Sum of ranks of positive differences
    pub positive_rank_sum: f64,

    /// Sum of ranks of negative differences
    pub negative_rank_sum: f64,

    /// Critical value for this many non-zero differences (None outside 1..=10)
    pub critical_value: Option<u32>,

    /// Scheme used to rank the differences
    pub scheme: RankScheme,

    /// Verdict
    pub sign: Sign,
}

impl SignedRankTest {
    /// Number of non-zero differences (`m`)
    pub fn nonzero(&self) -> usize {
        self.differences.len()
    }

    /// Smaller of the two rank sums, the test statistic
    pub fn min_rank_sum(&self) -> f64 {
        self.positive_rank_sum.min(self.negative_rank_sum)
    }

    /// Whether the statistic falls at or under the critical value
    ///
    /// A significant result can still have sign `0` when both sums are equal.
    pub fn is_significant(&self) -> bool {
        self.critical_value
            .is_some_and(|critical| self.min_rank_sum() <= f64::from(critical))
    }
}

/// Paired differences `first[i] - second[i]` with exact zeros removed
pub fn nonzero_differences(first: &[f64], second: &[f64]) -> Vec<f64> {
    first
        .iter()
        .zip(second)
        .map(|(a, b)| a - b)
        .filter(|d| *d != 0.0)
        .collect()
}

/// Direction of a significant result, `NoDifference` otherwise
///
/// Equal sums carry no direction even when both fall under the threshold.
/// Every rank is at least 1, so with the current table that tie never occurs
/// for real samples.
fn decide_sign(positive: f64, negative: f64, critical_value: Option<u32>) -> Sign {
    match critical_value {
        Some(critical) if positive.min(negative) <= f64::from(critical) => {
            if positive > negative {
                Sign::Better
            } else if positive < negative {
                Sign::Worse
            } else {
                Sign::NoDifference
            }
        }
        _ => Sign::NoDifference,
    }
}

/// Run the signed-rank test on two positionally paired samples
///
/// # Errors
/// Returns `WilcoxonError::LengthMismatch` when the samples differ in length;
/// pairing is positional so the test is undefined for them.
///
/// # Example
/// ```
/// use blbn_report::wilcoxon::{signed_rank_test, RankScheme, Sign};
///
/// let better = [0.9, 0.8, 0.85, 0.95, 0.9, 0.88, 0.92];
/// let worse = [0.7, 0.6, 0.65, 0.75, 0.7, 0.68, 0.72];
///
/// let test = signed_rank_test(&better, &worse, RankScheme::Midrank).unwrap();
/// assert_eq!(test.sign, Sign::Better);
/// ```
pub fn signed_rank_test(
    first: &[f64],
    second: &[f64],
    scheme: RankScheme,
) -> Result<SignedRankTest, WilcoxonError> {
    if first.len() != second.len() {
        return Err(WilcoxonError::LengthMismatch {
            left: first.len(),
            right: second.len(),
        });
    }

    let differences = nonzero_differences(first, second);
    let ranks = rank_differences(&differences, scheme);

    let mut positive_rank_sum = 0.0;
    let mut negative_rank_sum = 0.0;
    for (diff, rank) in differences.iter().zip(&ranks) {
        if *diff > 0.0 {
            positive_rank_sum += rank;
        } else {
            negative_rank_sum += rank.abs();
        }
    }

    let critical_value = critical_value(differences.len());
    let sign = decide_sign(positive_rank_sum, negative_rank_sum, critical_value);

    Ok(SignedRankTest {
        differences,
        ranks,
        positive_rank_sum,
        negative_rank_sum,
        critical_value,
        scheme,
        sign,
    })
}

/// Sign-only form of [`signed_rank_test`]
pub fn paired_sign(first: &[f64], second: &[f64], scheme: RankScheme) -> Result<Sign, WilcoxonError> {
    signed_rank_test(first, second, scheme).map(|test| test.sign)
}
