//! Processing statistics tracking.
//!
//! Thread-safe counters of pipeline outcomes, shared across request handlers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::OutcomeType;

/// Thread-safe outcome tracker.
///
/// Every `OutcomeType` is initialised to zero on creation, so the map is never
/// written after construction and can be shared with `Arc` without locking.
pub struct ProcessingStats {
    outcomes: HashMap<OutcomeType, AtomicUsize>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        let mut outcomes = HashMap::new();
        for outcome in OutcomeType::iter() {
            outcomes.insert(outcome, AtomicUsize::new(0));
        }
        ProcessingStats { outcomes }
    }

    pub fn increment(&self, outcome: OutcomeType) {
        if let Some(counter) = self.outcomes.get(&outcome) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                outcome
            );
        }
    }

    pub fn get_count(&self, outcome: OutcomeType) -> usize {
        self.outcomes
            .get(&outcome)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Leads that reached a terminal state (audit failures are not terminal).
    pub fn total_processed(&self) -> usize {
        OutcomeType::iter()
            .filter(|o| *o != OutcomeType::AuditWriteFailed)
            .map(|o| self.get_count(o))
            .sum()
    }

    /// Snapshot of every counter, keyed by outcome name.
    pub fn snapshot(&self) -> HashMap<&'static str, usize> {
        OutcomeType::iter()
            .map(|o| (o.as_str(), self.get_count(o)))
            .collect()
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
