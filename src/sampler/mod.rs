//! Weighted Combination Sampler
//!
//! Picks one combination with probability proportional to the product of
//! its coins' probabilities, i.e. its likelihood if every position were an
//! independent draw from the smoothed distribution.
//!
//! Weights are computed in log space and shifted by the maximum before
//! exponentiating, so long products of small probabilities do not
//! underflow. A coin with probability zero gives the whole combination a
//! log-probability of `-inf` and therefore a weight of zero.

use rand::Rng;

use crate::error::{BonusError, Result};
use crate::types::{Combination, SmoothedDistribution};

/// Log-likelihood of a combination under the distribution
pub fn log_probability(combination: &Combination, distribution: &SmoothedDistribution) -> f64 {
    combination
        .coins()
        .iter()
        .map(|&d| distribution.probability(d).ln())
        .sum()
}

/// Normalized sampling weights, aligned with `combinations`
pub fn combination_weights(
    combinations: &[Combination],
    distribution: &SmoothedDistribution,
) -> Result<Vec<f64>> {
    let log_probs: Vec<f64> = combinations
        .iter()
        .map(|c| log_probability(c, distribution))
        .collect();

    let max_log = log_probs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max_log.is_finite() {
        return Err(BonusError::NoViableCombination);
    }

    let mut weights: Vec<f64> = log_probs.iter().map(|&l| (l - max_log).exp()).collect();
    let total: f64 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(BonusError::NoViableCombination);
    }
    for w in weights.iter_mut() {
        *w /= total;
    }
    Ok(weights)
}

/// Index of the sampled combination
pub fn sample_index<R: Rng + ?Sized>(
    combinations: &[Combination],
    distribution: &SmoothedDistribution,
    rng: &mut R,
) -> Result<usize> {
    let weights = combination_weights(combinations, distribution)?;
    Ok(pick_weighted(&weights, rng))
}

/// Walk the cumulative weights until they reach a uniform draw in [0, 1).
///
/// Zero-weight entries are never selected. If rounding leaves the cumulative
/// sum just short of the draw, the last index with a positive weight is
/// returned. `weights` must hold at least one positive entry.
pub fn pick_weighted<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    let u: f64 = rng.gen();

    let mut cumulative = 0.0;
    let mut last_viable = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_viable = i;
        if cumulative >= u {
            return i;
        }
    }
    last_viable
}

/// Draw one combination from `combinations`
pub fn sample_combination<'a, R: Rng + ?Sized>(
    combinations: &'a [Combination],
    distribution: &SmoothedDistribution,
    rng: &mut R,
) -> Result<&'a Combination> {
    let idx = sample_index(combinations, distribution, rng)?;
    Ok(&combinations[idx])
}

// ==================== Unit Tests ====================
