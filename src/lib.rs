//! # coin-bonus - bonus-lottery coin sampler
//!
//! At the end of a session the participant's bonus is revealed as a handful
//! of coins. Which coins appear depends on what they won across the session:
//!
//! - **Outcome Tally** - per-denomination counts of the coins recorded so far
//! - **Smoothed Distribution** - tally proportions blended with a prior
//! - **Combination Enumeration** - every ordered `k`-coin draw in the payable range
//! - **Weighted Sampling** - log-space draw proportional to each combination's likelihood
//!
//! ## Modules
//!
//! - [`types`] - denominations, ranges, combinations, constants
//! - [`tally`] - outcome tally and the history provider trait
//! - [`proportions`] - prior-smoothed proportions
//! - [`combinations`] - constrained combination enumeration
//! - [`sampler`] - weighted combination sampling
//! - [`lottery`] - the public draw, seeded lottery object, payout simulation
//! - [`config`] - lottery parameters
//! - [`sanitize`] - numeric validation
//!
//! ## Example
//!
//! ```rust
//! use coin_bonus::{BonusLottery, Denomination, OutcomeTally};
//!
//! let tally = OutcomeTally::from_counts([
//!     (Denomination::OnePound, 40),
//!     (Denomination::FiftyPence, 30),
//!     (Denomination::BrokenOnePenny, 3),
//! ]);
//!
//! let mut lottery = BonusLottery::with_seed(42);
//! let bonus = lottery.draw(&tally).unwrap();
//! assert_eq!(bonus.coins.len(), 4);
//! assert!((200..=300).contains(&bonus.payable_pence));
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod combinations;
pub mod config;
pub mod error;
pub mod logging;
pub mod lottery;
pub mod proportions;
pub mod sampler;
pub mod sanitize;
pub mod tally;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use types::*;

pub use combinations::enumerate_combinations;
pub use config::BonusConfig;
pub use error::{BonusError, Result};
pub use lottery::{draw_bonus, simulate_payouts, BonusLottery, DrawnBonus, PayoutSummary};
pub use proportions::{compute_smoothed_proportions, default_smoothed_proportions};
pub use sampler::{combination_weights, sample_combination};
pub use tally::{OutcomeHistory, OutcomeTally, TrialRecord};
