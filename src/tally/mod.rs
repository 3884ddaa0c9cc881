//! Outcome Tally
//!
//! Per-denomination counts of the coins recorded across a session, and the
//! provider trait the lottery reads them through.
//!
//! Two input shapes are accepted:
//! - keyed counts, where each key is a stringified face value (`"-0.5"`)
//! - a raw trial log, where each record optionally carries the chosen outcome

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::Denomination;

// ==================== Data Structures ====================

/// Count of recorded outcomes per denomination
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTally {
    counts: [u64; 6],
}

/// One recorded trial from the experiment log
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TrialRecord {
    #[serde(default)]
    pub trial_type: Option<String>,
    /// Face value of the chosen outcome, in pounds
    #[serde(default, alias = "chosen_outcome", alias = "chosen_feedback")]
    pub outcome: Option<f64>,
}

/// Source of the current outcome tally
pub trait OutcomeHistory {
    fn tally(&self) -> OutcomeTally;
}

// ==================== Implementation ====================

impl OutcomeTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tally from `(denomination, count)` pairs; repeated entries add up
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (Denomination, u64)>,
    {
        let mut tally = Self::new();
        for (d, n) in counts {
            tally.add(d, n);
        }
        tally
    }

    /// Build a tally from stringified face-value keys such as `"1"` or `"-0.01"`
    pub fn from_keyed_counts(counts: &HashMap<String, u64>) -> Result<Self> {
        let mut tally = Self::new();
        for (key, &n) in counts {
            let d: Denomination = key.parse()?;
            tally.add(d, n);
        }
        Ok(tally)
    }

    /// Scan a trial log, returning the tally and the number of records skipped
    pub fn scan(records: &[TrialRecord]) -> (Self, usize) {
        let mut tally = Self::new();
        let mut skipped = 0;
        for record in records {
            match record.outcome.and_then(Denomination::from_value) {
                Some(d) => tally.record(d),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::warn!(
                skipped,
                total = records.len(),
                "trial records without a coin outcome were skipped"
            );
        }
        (tally, skipped)
    }

    pub fn from_records(records: &[TrialRecord]) -> Self {
        Self::scan(records).0
    }

    pub fn record(&mut self, denomination: Denomination) {
        self.add(denomination, 1);
    }

    pub fn add(&mut self, denomination: Denomination, n: u64) {
        let slot = &mut self.counts[denomination.index()];
        *slot = slot.saturating_add(n);
    }

    pub fn merge(&mut self, other: &OutcomeTally) {
        for d in Denomination::ALL {
            self.add(d, other.count(d));
        }
    }

    pub fn count(&self, denomination: Denomination) -> u64 {
        self.counts[denomination.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, &n| acc.saturating_add(n))
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Counts in canonical denomination order
    pub fn as_array(&self) -> &[u64; 6] {
        &self.counts
    }

    /// Counts keyed by stringified face value, the shape the browser store uses
    pub fn to_keyed_counts(&self) -> BTreeMap<String, u64> {
        Denomination::ALL
            .into_iter()
            .map(|d| (d.to_string(), self.count(d)))
            .collect()
    }
}

impl OutcomeHistory for OutcomeTally {
    fn tally(&self) -> OutcomeTally {
        self.clone()
    }
}

impl OutcomeHistory for [TrialRecord] {
    fn tally(&self) -> OutcomeTally {
        OutcomeTally::from_records(self)
    }
}

impl OutcomeHistory for Vec<TrialRecord> {
    fn tally(&self) -> OutcomeTally {
        OutcomeTally::from_records(self)
    }
}

impl<H: OutcomeHistory + ?Sized> OutcomeHistory for &H {
    fn tally(&self) -> OutcomeTally {
        (**self).tally()
    }
}

// ==================== Unit Tests ====================
