// Critical values for the signed-rank statistic
//
// Index `m - 1` holds the largest minimum rank sum still considered
// significant for `m` non-zero differences.

/// Critical-value table for 1..=10 non-zero differences
pub const CRITICAL_VALUES: [u32; 10] = [0, 0, 0, 0, 0, 0, 2, 3, 5, 8];

/// Look up the critical value for `nonzero` differences
///
/// Returns `None` for `nonzero == 0` and for counts past the end of the
/// table; callers treat both as "not significant".
pub fn critical_value(nonzero: usize) -> Option<u32> {
    nonzero
        .checked_sub(1)
        .and_then(|index| CRITICAL_VALUES.get(index).copied())
}
