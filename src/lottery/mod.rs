//! Bonus Lottery
//!
//! Ties the estimator, enumerator and sampler together into the single draw
//! the rest of the experiment needs:
//!
//! 1. smooth the outcome tally into a distribution over coins
//! 2. enumerate every ordered `k`-coin combination in the payable range
//! 3. shuffle the candidates and draw one by likelihood
//! 4. shuffle the drawn coins so the reveal order is random too
//!
//! [`BonusLottery`] owns a seedable `ChaCha8Rng` for callers that want a
//! long-lived object; [`draw_bonus`] takes any `rand::Rng`.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combinations::enumerate_combinations;
use crate::config::BonusConfig;
use crate::error::{BonusError, Result};
use crate::proportions::compute_smoothed_proportions;
use crate::sampler::sample_index;
use crate::tally::{OutcomeHistory, OutcomeTally};
use crate::types::{Combination, Denomination, PenceRange, SmoothedDistribution};

// ==================== Data Structures ====================

/// The coins shown to the participant
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawnBonus {
    /// Coins in reveal order
    pub coins: Vec<Denomination>,
    /// Sum of intact coins, in pence
    pub payable_pence: i64,
}

impl DrawnBonus {
    pub fn payable_pounds(&self) -> f64 {
        self.payable_pence as f64 / 100.0
    }
}

/// Aggregate of many simulated draws
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutSummary {
    pub draws: usize,
    pub mean_pence: f64,
    pub min_pence: i64,
    pub max_pence: i64,
    /// Fraction of drawn coins that were broken
    pub broken_share: f64,
}

// ==================== Drawing ====================

/// Candidates for a draw: all valid combinations plus the distribution to weigh them by
fn prepare(
    tally: &OutcomeTally,
    config: &BonusConfig,
) -> Result<(Vec<Combination>, SmoothedDistribution)> {
    config.validate()?;
    let range: PenceRange = config.range()?;
    let distribution = compute_smoothed_proportions(tally, config.data_weight, &config.prior)?;
    let candidates = enumerate_combinations(&Denomination::ALL, config.coin_count, range)?;
    if candidates.is_empty() {
        return Err(BonusError::InfeasibleRange {
            k: config.coin_count,
            min_pence: range.min,
            max_pence: range.max,
        });
    }
    Ok((candidates, distribution))
}

/// Draw a bonus for the given tally
pub fn draw_bonus<R: Rng + ?Sized>(
    tally: &OutcomeTally,
    config: &BonusConfig,
    rng: &mut R,
) -> Result<DrawnBonus> {
    let (mut candidates, distribution) = prepare(tally, config)?;

    candidates.shuffle(rng);
    let idx = sample_index(&candidates, &distribution, rng)?;
    let mut drawn = candidates.swap_remove(idx);
    drawn.coins_mut().shuffle(rng);

    let payable_pence = drawn.payable_pence();
    Ok(DrawnBonus {
        coins: drawn.into_coins(),
        payable_pence,
    })
}

/// Run `draws` independent draws in parallel and summarise the payable sums.
///
/// Draw `i` uses its own generator seeded with `seed + i`, so the summary is
/// reproducible regardless of thread scheduling.
pub fn simulate_payouts(
    tally: &OutcomeTally,
    config: &BonusConfig,
    draws: usize,
    seed: u64,
) -> Result<PayoutSummary> {
    if draws == 0 {
        return Err(BonusError::InvalidConfig(
            "payout simulation needs at least one draw".to_string(),
        ));
    }
    let (candidates, distribution) = prepare(tally, config)?;

    let picked: Vec<usize> = (0..draws)
        .into_par_iter()
        .map(|i| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(i as u64));
            sample_index(&candidates, &distribution, &mut rng)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut total = 0i64;
    let mut min_pence = i64::MAX;
    let mut max_pence = i64::MIN;
    let mut broken = 0usize;
    for &idx in &picked {
        let combo = &candidates[idx];
        let pence = combo.payable_pence();
        total += pence;
        min_pence = min_pence.min(pence);
        max_pence = max_pence.max(pence);
        broken += combo.coins().iter().filter(|d| d.is_broken()).count();
    }

    Ok(PayoutSummary {
        draws,
        mean_pence: total as f64 / draws as f64,
        min_pence,
        max_pence,
        broken_share: broken as f64 / (draws * config.coin_count) as f64,
    })
}

// ==================== Lottery Object ====================

/// Long-lived lottery with its own generator
pub struct BonusLottery {
    config: BonusConfig,
    rng: ChaCha8Rng,
    draw_count: u64,
}

impl BonusLottery {
    /// Create a lottery; seeded from `config.seed` or from OS entropy
    pub fn new(config: BonusConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            config,
            rng,
            draw_count: 0,
        })
    }

    /// Default configuration with a fixed seed (for testing)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: BonusConfig {
                seed: Some(seed),
                ..Default::default()
            },
            rng: ChaCha8Rng::seed_from_u64(seed),
            draw_count: 0,
        }
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.config.seed = Some(seed);
    }

    pub fn config(&self) -> &BonusConfig {
        &self.config
    }

    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    /// Draw a bonus from the current state of `history`
    pub fn draw<H: OutcomeHistory + ?Sized>(&mut self, history: &H) -> Result<DrawnBonus> {
        let tally = history.tally();
        let bonus = draw_bonus(&tally, &self.config, &mut self.rng)?;
        self.draw_count += 1;
        tracing::debug!(
            coins = ?bonus.coins,
            payable_pence = bonus.payable_pence,
            history_total = tally.total(),
            "drew bonus"
        );
        Ok(bonus)
    }
}

// ==================== Unit Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tally::TrialRecord;

    fn scenario_tally() -> OutcomeTally {
        OutcomeTally::from_counts([
            (Denomination::OnePound, 40),
            (Denomination::FiftyPence, 30),
            (Denomination::OnePenny, 20),
            (Denomination::BrokenOnePound, 2),
            (Denomination::BrokenFiftyPence, 5),
            (Denomination::BrokenOnePenny, 3),
        ])
    }

    #[test]
    fn test_draw_respects_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let config = BonusConfig::default();
        for _ in 0..200 {
            let bonus = draw_bonus(&scenario_tally(), &config, &mut rng).unwrap();
            assert_eq!(bonus.coins.len(), 4);
            assert!((200..=300).contains(&bonus.payable_pence), "{:?}", bonus);
            let recomputed: i64 = bonus.coins.iter().map(|d| d.payable_pence()).sum();
            assert_eq!(recomputed, bonus.payable_pence);
        }
    }

    #[test]
    fn test_empty_history_draws_from_prior() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let bonus = draw_bonus(&OutcomeTally::new(), &BonusConfig::default(), &mut rng).unwrap();
        assert!((2.0..=3.0).contains(&bonus.payable_pounds()));
    }

    #[test]
    fn test_infeasible_range() {
        let config = BonusConfig {
            min_pounds: 100.0,
            max_pounds: 200.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = draw_bonus(&scenario_tally(), &config, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            BonusError::InfeasibleRange { k: 4, min_pence: 10_000, max_pence: 20_000 }
        ));
    }

    #[test]
    fn test_seed_reproducibility() {
        let mut a = BonusLottery::with_seed(123);
        let mut b = BonusLottery::with_seed(123);
        let tally = scenario_tally();
        for _ in 0..10 {
            assert_eq!(a.draw(&tally).unwrap(), b.draw(&tally).unwrap());
        }
        assert_eq!(a.draw_count(), 10);
    }

    #[test]
    fn test_set_seed_updates_config_and_generator() {
        let mut reseeded = BonusLottery::with_seed(1);
        reseeded.set_seed(456);
        assert_eq!(reseeded.config().seed, Some(456));

        let mut fresh = BonusLottery::with_seed(456);
        let tally = scenario_tally();
        for _ in 0..5 {
            assert_eq!(reseeded.draw(&tally).unwrap(), fresh.draw(&tally).unwrap());
        }
    }

    #[test]
    fn test_lottery_reads_trial_records() {
        let records: Vec<TrialRecord> = (0..30)
            .map(|i| TrialRecord {
                trial_type: None,
                outcome: Some(if i % 3 == 0 { 1.0 } else { 0.5 }),
            })
            .collect();
        let mut lottery = BonusLottery::new(BonusConfig {
            seed: Some(9),
            ..Default::default()
        })
        .unwrap();
        let bonus = lottery.draw(&records).unwrap();
        assert!((200..=300).contains(&bonus.payable_pence));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = BonusConfig {
            coin_count: 0,
            ..Default::default()
        };
        assert!(BonusLottery::new(config).is_err());
    }

    #[test]
    fn test_simulation_is_deterministic_and_in_range() {
        let config = BonusConfig::default();
        let a = simulate_payouts(&scenario_tally(), &config, 500, 11).unwrap();
        let b = simulate_payouts(&scenario_tally(), &config, 500, 11).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.draws, 500);
        assert!(a.min_pence >= 200 && a.max_pence <= 300);
        assert!(a.mean_pence >= 200.0 && a.mean_pence <= 300.0);
        assert!((0.0..=1.0).contains(&a.broken_share));
    }

    #[test]
    fn test_simulation_rejects_zero_draws() {
        assert!(simulate_payouts(&scenario_tally(), &BonusConfig::default(), 0, 1).is_err());
    }

    #[test]
    fn test_drawn_bonus_serializes_for_the_ui() {
        let bonus = DrawnBonus {
            coins: vec![Denomination::OnePound, Denomination::BrokenOnePenny],
            payable_pence: 100,
        };
        let json = serde_json::to_value(&bonus).unwrap();
        assert_eq!(json["payablePence"], 100);
        assert_eq!(json["coins"][1], -0.01);
    }
}
