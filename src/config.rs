use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BonusError, Result};
use crate::sanitize::{validate_prior, validate_unit_weight};
use crate::types::{
    PenceRange, DEFAULT_COIN_COUNT, DEFAULT_DATA_WEIGHT, DEFAULT_MAX_POUNDS, DEFAULT_MIN_POUNDS,
    DEFAULT_PRIOR, MAX_COIN_COUNT,
};

/// Lottery parameters supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BonusConfig {
    /// Number of coins drawn
    pub coin_count: usize,
    /// Lower bound of the payable sum, in pounds
    pub min_pounds: f64,
    /// Upper bound of the payable sum, in pounds
    pub max_pounds: f64,
    /// Weight of the observed proportions against the prior
    pub data_weight: f64,
    /// Prior over denominations in canonical order
    pub prior: [f64; 6],
    /// Fixed RNG seed; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            coin_count: DEFAULT_COIN_COUNT,
            min_pounds: DEFAULT_MIN_POUNDS,
            max_pounds: DEFAULT_MAX_POUNDS,
            data_weight: DEFAULT_DATA_WEIGHT,
            prior: DEFAULT_PRIOR,
            seed: None,
        }
    }
}

impl BonusConfig {
    /// Read overrides from `BONUS_*` environment variables.
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let coin_count = lookup("BONUS_COIN_COUNT")
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap_or(defaults.coin_count);

        let min_pounds = lookup("BONUS_MIN_POUNDS")
            .and_then(|value| value.parse::<f64>().ok())
            .unwrap_or(defaults.min_pounds);

        let max_pounds = lookup("BONUS_MAX_POUNDS")
            .and_then(|value| value.parse::<f64>().ok())
            .unwrap_or(defaults.max_pounds);

        let data_weight = lookup("BONUS_DATA_WEIGHT")
            .and_then(|value| value.parse::<f64>().ok())
            .unwrap_or(defaults.data_weight);

        let seed = lookup("BONUS_SEED").and_then(|value| value.parse::<u64>().ok());

        Self {
            coin_count,
            min_pounds,
            max_pounds,
            data_weight,
            prior: defaults.prior,
            seed,
        }
    }

    /// Load a JSON config file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn range(&self) -> Result<PenceRange> {
        PenceRange::from_pounds(self.min_pounds, self.max_pounds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.coin_count == 0 || self.coin_count > MAX_COIN_COUNT {
            return Err(BonusError::InvalidConfig(format!(
                "coin count must be within [1, {MAX_COIN_COUNT}], got {}",
                self.coin_count
            )));
        }
        self.range()?;
        validate_unit_weight("data weight", self.data_weight)?;
        validate_prior(&self.prior)?;
        Ok(())
    }
}
