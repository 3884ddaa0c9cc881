//! Error types for the bonus lottery.

/// Errors raised while computing or drawing a bonus.
#[derive(Debug, thiserror::Error)]
pub enum BonusError {
    /// No ordered combination of `k` coins has a payable sum in the range.
    #[error("no combination of {k} coins has a payable sum in [{min_pence}p, {max_pence}p]")]
    InfeasibleRange { k: usize, min_pence: i64, max_pence: i64 },
    /// Every candidate has zero probability under the distribution, or there were none.
    #[error("no viable combination to sample from")]
    NoViableCombination,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unknown denomination: {0}")]
    UnknownDenomination(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BonusError>;
