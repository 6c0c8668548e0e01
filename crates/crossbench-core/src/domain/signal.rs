//! Weighted evidence about a model's quality.

use serde::{Deserialize, Serialize};

/// One source-attributed observation, score in [0,1], weight > 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Signal {
    pub source: String,
    pub score: f64,
    pub weight: f64,
}

/// Ordered list of signals backing a single record.
///
/// # Invariants
///
/// Every retained signal has `score` in [0,1] and `weight > 0`. Non-positive
/// or NaN observations are not evidence and are dropped at
/// [`Evidence::add_signal`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Evidence {
    signals: Vec<Signal>,
}

impl Evidence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observation. Returns whether it was retained.
    pub fn add_signal(&mut self, source: impl Into<String>, raw_score: f64, weight: f64) -> bool {
        // NaN fails both comparisons.
        if !(raw_score > 0.0) || !(weight > 0.0) || !weight.is_finite() {
            return false;
        }
        self.signals.push(Signal {
            source: source.into(),
            score: raw_score.clamp(0.0, 1.0),
            weight,
        });
        true
    }

    /// Weighted arithmetic mean of signal scores, 0 when empty.
    pub fn aggregate(&self) -> f64 {
        let (weighted_sum, total_weight) = self
            .signals
            .iter()
            .fold((0.0, 0.0), |(ws, tw), s| (ws + s.score * s.weight, tw + s.weight));
        if total_weight > 0.0 {
            weighted_sum / total_weight
        } else {
            0.0
        }
    }

    /// Population standard deviation of scores around `center`.
    ///
    /// Zero for fewer than two signals.
    pub fn dispersion(&self, center: f64) -> f64 {
        if self.signals.len() < 2 {
            return 0.0;
        }
        let sq_sum: f64 = self
            .signals
            .iter()
            .map(|s| (s.score - center) * (s.score - center))
            .sum();
        (sq_sum / self.signals.len() as f64).sqrt()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }
}
