//! Delivery statistics tracking.
//!
//! Thread-safe counters for sent, skipped and failed hits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::DeliveryFailure;

/// Thread-safe delivery statistics tracker.
///
/// Every failure category is initialized to zero on creation so the map is
/// never mutated after construction. Share it across tasks with `Arc`.
#[derive(Debug)]
pub struct DeliveryStats {
    sent: AtomicUsize,
    disabled: AtomicUsize,
    failures: HashMap<DeliveryFailure, AtomicUsize>,
}

impl DeliveryStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for failure in DeliveryFailure::iter() {
            failures.insert(failure, AtomicUsize::new(0));
        }

        DeliveryStats {
            sent: AtomicUsize::new(0),
            disabled: AtomicUsize::new(0),
            failures,
        }
    }

    /// Records a hit accepted by the collector.
    pub fn record_sent(&self) {
        self.sent.fetch_add(1, Ordering::SeqCst);
    }

    /// Records a call made while reporting was disabled.
    pub fn record_disabled(&self) {
        self.disabled.fetch_add(1, Ordering::SeqCst);
    }

    /// Records a dropped hit under its failure category.
    pub fn record_failure(&self, failure: DeliveryFailure) {
        if let Some(counter) = self.failures.get(&failure) {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Hits accepted by the collector.
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }

    /// Calls made while reporting was disabled.
    pub fn disabled(&self) -> usize {
        self.disabled.load(Ordering::SeqCst)
    }

    /// Dropped hits in one failure category.
    pub fn failure_count(&self, failure: DeliveryFailure) -> usize {
        self.failures
            .get(&failure)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Dropped hits across all categories.
    pub fn total_failures(&self) -> usize {
        self.failures
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }
}

impl Default for DeliveryStats {
    fn default() -> Self {
        Self::new()
    }
}
