//! Property-Based Tests for the bonus lottery
//!
//! Tests the following invariants:
//! - Normalization: smoothed proportions are non-negative and sum to one
//! - Prior fallback: an empty tally yields the prior
//! - Validity: enumerated combinations have k coins in range
//! - Membership: the sampler only returns candidates it was given
//! - Range: every drawn bonus has a payable sum in the configured range

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use coin_bonus::{
    compute_smoothed_proportions, draw_bonus, enumerate_combinations, sample_combination,
    BonusConfig, Denomination, OutcomeTally, PenceRange, DEFAULT_PRIOR, DISTRIBUTION_TOLERANCE,
};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_tally() -> impl Strategy<Value = OutcomeTally> {
    proptest::array::uniform6(0u64..=500).prop_map(|counts| {
        OutcomeTally::from_counts(Denomination::ALL.into_iter().zip(counts))
    })
}

fn arb_denominations() -> impl Strategy<Value = Vec<Denomination>> {
    proptest::sample::subsequence(Denomination::ALL.to_vec(), 1..=6)
}

fn arb_range() -> impl Strategy<Value = PenceRange> {
    (0i64..=400, 0i64..=200).prop_map(|(min, width)| PenceRange {
        min,
        max: min + width,
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn smoothed_proportions_are_normalized(tally in arb_tally(), weight in 0.0f64..=1.0) {
        let dist = compute_smoothed_proportions(&tally, weight, &DEFAULT_PRIOR).unwrap();
        let sum: f64 = dist.as_array().iter().sum();
        prop_assert!((sum - 1.0).abs() < DISTRIBUTION_TOLERANCE);
        prop_assert!(dist.as_array().iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn empty_tally_yields_prior(weight in 0.0f64..=1.0) {
        let dist = compute_smoothed_proportions(&OutcomeTally::new(), weight, &DEFAULT_PRIOR).unwrap();
        for (d, p) in dist.iter() {
            prop_assert!((p - DEFAULT_PRIOR[d.index()]).abs() < DISTRIBUTION_TOLERANCE);
        }
    }

    #[test]
    fn enumerated_combinations_are_valid(
        denoms in arb_denominations(),
        k in 1usize..=4,
        range in arb_range(),
    ) {
        let combos = enumerate_combinations(&denoms, k, range).unwrap();
        for c in &combos {
            prop_assert_eq!(c.len(), k);
            prop_assert!(range.contains(c.payable_pence()));
            prop_assert!(c.coins().iter().all(|d| denoms.contains(d)));
        }
    }

    #[test]
    fn sampler_returns_a_member(tally in arb_tally(), seed in any::<u64>()) {
        let dist = compute_smoothed_proportions(&tally, 0.6, &DEFAULT_PRIOR).unwrap();
        let combos = enumerate_combinations(&Denomination::ALL, 3, PenceRange { min: 100, max: 200 }).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let picked = sample_combination(&combos, &dist, &mut rng).unwrap();
        prop_assert!(combos.contains(picked));
    }

    #[test]
    fn drawn_bonus_is_in_range(tally in arb_tally(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let bonus = draw_bonus(&tally, &BonusConfig::default(), &mut rng).unwrap();
        prop_assert_eq!(bonus.coins.len(), 4);
        prop_assert!((200..=300).contains(&bonus.payable_pence));
    }
}
