//! Process-wide ingestion counters.
//!
//! Incremented at the call site; [`Metrics::flush`] emits them as one
//! `info!` event at the end of a run.

use std::sync::atomic::{AtomicU64, Ordering};

pub static METRICS: Metrics = Metrics::new();

pub struct Metrics {
    records_accepted: AtomicU64,
    records_skipped: AtomicU64,
    duplicates: AtomicU64,
    unscored: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            records_accepted: AtomicU64::new(0),
            records_skipped: AtomicU64::new(0),
            duplicates: AtomicU64::new(0),
            unscored: AtomicU64::new(0),
        }
    }

    /// A record was admitted to the registry.
    pub fn inc_accepted(&self) {
        self.records_accepted.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "records_accepted", "counter incremented");
    }

    /// A malformed record was skipped.
    pub fn add_skipped(&self, n: u64) {
        self.records_skipped.fetch_add(n, Ordering::Relaxed);
        tracing::trace!(metric = "records_skipped", n, "counter incremented");
    }

    pub fn add_duplicates(&self, n: u64) {
        self.duplicates.fetch_add(n, Ordering::Relaxed);
        tracing::trace!(metric = "duplicates", n, "counter incremented");
    }

    /// A record carried no usable signal.
    pub fn inc_unscored(&self) {
        self.unscored.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "unscored", "counter incremented");
    }

    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            records_accepted = self.records_accepted(),
            records_skipped = self.records_skipped(),
            duplicates = self.duplicates(),
            unscored = self.unscored(),
        );
    }

    pub fn records_accepted(&self) -> u64 {
        self.records_accepted.load(Ordering::Relaxed)
    }

    pub fn records_skipped(&self) -> u64 {
        self.records_skipped.load(Ordering::Relaxed)
    }

    pub fn duplicates(&self) -> u64 {
        self.duplicates.load(Ordering::Relaxed)
    }

    pub fn unscored(&self) -> u64 {
        self.unscored.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.records_accepted.store(0, Ordering::Relaxed);
        self.records_skipped.store(0, Ordering::Relaxed);
        self.duplicates.store(0, Ordering::Relaxed);
        self.unscored.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_increment() {
        let m = Metrics::new();
        m.inc_accepted();
        m.inc_accepted();
        m.add_skipped(3);
        m.add_duplicates(1);
        m.inc_unscored();
        assert_eq!(m.records_accepted(), 2);
        assert_eq!(m.records_skipped(), 3);
        assert_eq!(m.duplicates(), 1);
        assert_eq!(m.unscored(), 1);
    }

    #[test]
    fn reset_zeroes_all() {
        let m = Metrics::new();
        m.inc_accepted();
        m.add_skipped(2);
        m.inc_unscored();
        m.reset();
        assert_eq!(m.records_accepted(), 0);
        assert_eq!(m.records_skipped(), 0);
        assert_eq!(m.unscored(), 0);
    }
}
