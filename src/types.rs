//! Common Types and Constants
//!
//! Shared data structures used across the estimator, enumerator and sampler.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BonusError, Result};

// ==================== Constants ====================

/// Default weight given to the observed proportions when smoothing
pub const DEFAULT_DATA_WEIGHT: f64 = 0.6;

/// Default number of coins drawn
pub const DEFAULT_COIN_COUNT: usize = 4;

/// Largest coin count accepted by config validation (6^k candidates are explored)
pub const MAX_COIN_COUNT: usize = 8;

/// Default lower bound of the payable sum, in pounds
pub const DEFAULT_MIN_POUNDS: f64 = 2.0;

/// Default upper bound of the payable sum, in pounds
pub const DEFAULT_MAX_POUNDS: f64 = 3.0;

/// Tolerance used when checking that a distribution sums to one
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-9;

/// Prior over denominations in canonical order, favouring intact coins
pub const DEFAULT_PRIOR: [f64; 6] = [0.1, 0.3, 0.5, 0.1 / 3.0, 0.1 / 3.0, 0.1 / 3.0];

// ==================== Denomination ====================

/// A coin outcome: an intact coin or its broken, zero-value counterpart.
///
/// The face value is carried as whole pence; broken coins carry the negated
/// value of the coin they replace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub enum Denomination {
    OnePenny,
    FiftyPence,
    OnePound,
    BrokenOnePenny,
    BrokenFiftyPence,
    BrokenOnePound,
}

impl Denomination {
    /// All denominations in canonical order
    pub const ALL: [Denomination; 6] = [
        Denomination::OnePenny,
        Denomination::FiftyPence,
        Denomination::OnePound,
        Denomination::BrokenOnePenny,
        Denomination::BrokenFiftyPence,
        Denomination::BrokenOnePound,
    ];

    /// Position in canonical order
    pub fn index(self) -> usize {
        match self {
            Denomination::OnePenny => 0,
            Denomination::FiftyPence => 1,
            Denomination::OnePound => 2,
            Denomination::BrokenOnePenny => 3,
            Denomination::BrokenFiftyPence => 4,
            Denomination::BrokenOnePound => 5,
        }
    }

    /// Signed face value in pence
    pub fn pence(self) -> i64 {
        match self {
            Denomination::OnePenny => 1,
            Denomination::FiftyPence => 50,
            Denomination::OnePound => 100,
            Denomination::BrokenOnePenny => -1,
            Denomination::BrokenFiftyPence => -50,
            Denomination::BrokenOnePound => -100,
        }
    }

    /// Contribution to the payable sum: broken coins add nothing
    pub fn payable_pence(self) -> i64 {
        self.pence().max(0)
    }

    /// Signed face value in pounds
    pub fn value(self) -> f64 {
        self.pence() as f64 / 100.0
    }

    pub fn is_broken(self) -> bool {
        self.pence() < 0
    }

    pub fn from_pence(pence: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.pence() == pence)
    }

    /// Match a pound amount to a denomination, rounding to the nearest penny.
    ///
    /// Values that are not within a rounding error of a whole penny, or that
    /// round to a penny amount with no coin, yield `None`.
    pub fn from_value(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let scaled = value * 100.0;
        let rounded = scaled.round();
        if (scaled - rounded).abs() > 1e-6 {
            return None;
        }
        Self::from_pence(rounded as i64)
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for Denomination {
    type Err = BonusError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<f64>()
            .ok()
            .and_then(Self::from_value)
            .ok_or_else(|| BonusError::UnknownDenomination(s.to_string()))
    }
}

impl From<Denomination> for f64 {
    fn from(d: Denomination) -> f64 {
        d.value()
    }
}

impl TryFrom<f64> for Denomination {
    type Error = BonusError;

    fn try_from(value: f64) -> Result<Self> {
        Self::from_value(value).ok_or_else(|| BonusError::UnknownDenomination(value.to_string()))
    }
}

// ==================== Ranges & Combinations ====================

/// Inclusive range of payable sums, in pence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPenceRange")]
pub struct PenceRange {
    pub min: i64,
    pub max: i64,
}

impl PenceRange {
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(BonusError::InvalidConfig(format!(
                "range minimum {min}p exceeds maximum {max}p"
            )));
        }
        Ok(Self { min, max })
    }

    /// Build a range from pound amounts, rounding each bound to the nearest penny
    pub fn from_pounds(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(BonusError::InvalidConfig(format!(
                "range bounds must be finite, got [{min}, {max}]"
            )));
        }
        Self::new((min * 100.0).round() as i64, (max * 100.0).round() as i64)
    }

    pub fn contains(&self, pence: i64) -> bool {
        self.min <= pence && pence <= self.max
    }
}

/// Unchecked wire form of [`PenceRange`]
#[derive(Deserialize)]
struct RawPenceRange {
    min: i64,
    max: i64,
}

impl TryFrom<RawPenceRange> for PenceRange {
    type Error = BonusError;

    fn try_from(raw: RawPenceRange) -> Result<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl Default for PenceRange {
    fn default() -> Self {
        Self {
            min: (DEFAULT_MIN_POUNDS * 100.0) as i64,
            max: (DEFAULT_MAX_POUNDS * 100.0) as i64,
        }
    }
}

/// An ordered draw of coins
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Combination(Vec<Denomination>);

impl Combination {
    pub fn new(coins: Vec<Denomination>) -> Self {
        Self(coins)
    }

    pub fn coins(&self) -> &[Denomination] {
        &self.0
    }

    pub fn coins_mut(&mut self) -> &mut [Denomination] {
        &mut self.0
    }

    pub fn into_coins(self) -> Vec<Denomination> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of the coins with broken coins counted as zero
    pub fn payable_pence(&self) -> i64 {
        self.0.iter().map(|d| d.payable_pence()).sum()
    }

    /// Signed sum of face values
    pub fn face_pence(&self) -> i64 {
        self.0.iter().map(|d| d.pence()).sum()
    }
}

impl From<Vec<Denomination>> for Combination {
    fn from(coins: Vec<Denomination>) -> Self {
        Self(coins)
    }
}

// ==================== Distribution ====================

/// Normalized probabilities over denominations in canonical order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmoothedDistribution {
    probabilities: [f64; 6],
}

impl SmoothedDistribution {
    /// Wrap an already-normalized probability vector
    pub fn from_normalized(probabilities: [f64; 6]) -> Self {
        Self { probabilities }
    }

    pub fn probability(&self, denomination: Denomination) -> f64 {
        self.probabilities[denomination.index()]
    }

    pub fn as_array(&self) -> &[f64; 6] {
        &self.probabilities
    }

    pub fn iter(&self) -> impl Iterator<Item = (Denomination, f64)> + '_ {
        Denomination::ALL
            .into_iter()
            .map(move |d| (d, self.probabilities[d.index()]))
    }
}
