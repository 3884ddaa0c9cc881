//! Outcome-Proportion Estimator
//!
//! Blends the empirical proportions of a tally with a fixed prior:
//!
//! ```text
//! weighted[d] = raw[d] * W + prior[d] * (1 - W)
//! p[d]        = weighted[d] / sum(weighted)
//! ```
//!
//! With an empty tally the raw proportions are all zero and the result is
//! the prior itself.

use crate::error::{BonusError, Result};
use crate::sanitize::{normalize_in_place, validate_prior, validate_unit_weight};
use crate::tally::OutcomeTally;
use crate::types::{Denomination, SmoothedDistribution, DEFAULT_DATA_WEIGHT, DEFAULT_PRIOR};

/// Raw proportions in canonical order; all zero for an empty tally
pub fn raw_proportions(tally: &OutcomeTally) -> [f64; 6] {
    let total = tally.total();
    let mut raw = [0.0; 6];
    if total == 0 {
        return raw;
    }
    for d in Denomination::ALL {
        raw[d.index()] = tally.count(d) as f64 / total as f64;
    }
    raw
}

/// Prior-smoothed distribution over denominations
pub fn compute_smoothed_proportions(
    tally: &OutcomeTally,
    data_weight: f64,
    prior: &[f64; 6],
) -> Result<SmoothedDistribution> {
    validate_unit_weight("data weight", data_weight)?;
    validate_prior(prior)?;

    let raw = raw_proportions(tally);
    let mut weighted = [0.0; 6];
    for i in 0..6 {
        weighted[i] = raw[i] * data_weight + prior[i] * (1.0 - data_weight);
    }

    if !normalize_in_place(&mut weighted) {
        // Only reachable with W = 1 and no data
        weighted = *prior;
        if !normalize_in_place(&mut weighted) {
            return Err(BonusError::InvalidConfig(
                "prior cannot be normalized".to_string(),
            ));
        }
    }

    tracing::debug!(
        total = tally.total(),
        data_weight,
        probabilities = ?weighted,
        "computed smoothed coin distribution"
    );

    Ok(SmoothedDistribution::from_normalized(weighted))
}

/// Smoothed distribution with the default weight and prior
pub fn default_smoothed_proportions(tally: &OutcomeTally) -> Result<SmoothedDistribution> {
    compute_smoothed_proportions(tally, DEFAULT_DATA_WEIGHT, &DEFAULT_PRIOR)
}
