//! Combination Enumerator
//!
//! Depth-first generation of every ordered `k`-coin sequence whose payable
//! sum lies in an inclusive range. Broken coins contribute nothing to the
//! payable sum.
//!
//! The search space is `n^k` for `n` denominations, so this is only meant
//! for the small coin counts the lottery uses (k around 4).

use crate::error::{BonusError, Result};
use crate::types::{Combination, Denomination, PenceRange};

/// Enumerate all ordered combinations of `k` coins with a payable sum in `range`.
///
/// Orderings are distinct entries. An infeasible range yields an empty vector.
pub fn enumerate_combinations(
    denominations: &[Denomination],
    k: usize,
    range: PenceRange,
) -> Result<Vec<Combination>> {
    if k == 0 {
        return Err(BonusError::InvalidConfig(
            "coin count must be at least 1".to_string(),
        ));
    }
    if denominations.is_empty() {
        return Err(BonusError::InvalidConfig(
            "denomination list is empty".to_string(),
        ));
    }
    if range.min > range.max {
        return Err(BonusError::InvalidConfig(format!(
            "range minimum {}p exceeds maximum {}p",
            range.min, range.max
        )));
    }

    let mut out = Vec::new();
    let mut current = Vec::with_capacity(k);
    backtrack(denominations, k, range, 0, &mut current, &mut out);

    tracing::debug!(k, candidates = out.len(), min = range.min, max = range.max, "enumerated coin combinations");
    Ok(out)
}

fn backtrack(
    denominations: &[Denomination],
    k: usize,
    range: PenceRange,
    sum: i64,
    current: &mut Vec<Denomination>,
    out: &mut Vec<Combination>,
) {
    if current.len() == k {
        if range.contains(sum) {
            out.push(Combination::new(current.clone()));
        }
        return;
    }
    // Payable contributions are non-negative
    if sum > range.max {
        return;
    }
    for &d in denominations {
        current.push(d);
        backtrack(denominations, k, range, sum + d.payable_pence(), current, out);
        current.pop();
    }
}
