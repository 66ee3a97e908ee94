//! Cache Statistics Module
//!
//! Snapshot of how many namespaced entries are fresh, stale or unreadable.

use serde::Serialize;

// == Cache Stats ==
/// Classification of the entries under the cache prefix.
///
/// Corrupt entries are counted as expired and additionally broken out in
/// `corrupt`, so `total == valid + expired` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of namespaced entries inspected
    pub total: usize,
    /// Entries whose expiry is still in the future
    pub valid: usize,
    /// Entries past expiry, including corrupt ones
    pub expired: usize,
    /// Entries that could not be parsed (subset of `expired`)
    pub corrupt: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a fresh entry.
    pub fn record_valid(&mut self) {
        self.valid += 1;
        self.total += 1;
    }

    /// Counts a stale entry.
    pub fn record_expired(&mut self) {
        self.expired += 1;
        self.total += 1;
    }

    /// Counts an unreadable entry, which also counts as expired.
    pub fn record_corrupt(&mut self) {
        self.corrupt += 1;
        self.record_expired();
    }
}
