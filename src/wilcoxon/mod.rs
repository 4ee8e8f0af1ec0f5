// Paired Wilcoxon signed-rank test
//
// Compares two configurations measured on the same trials. Zero differences
// are dropped, the rest are ranked by magnitude, ranks are summed per sign and
// the smaller sum is checked against a fixed critical-value table that covers
// 1..=10 non-zero differences.
//
// There is no p-value and no configurable significance level: the table is
// the only threshold. Sample counts outside the table are never significant.

mod critical;
mod ranks;
mod signed_rank;

pub use critical::{critical_value, CRITICAL_VALUES};
pub use ranks::{rank_differences, RankScheme};
pub use signed_rank::{
    nonzero_differences, paired_sign, signed_rank_test, Sign, SignedRankTest, WilcoxonError,
};
