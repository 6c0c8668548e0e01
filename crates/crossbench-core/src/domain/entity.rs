//! The evaluated model record.

use serde::{Deserialize, Serialize};

use super::modality::ModalitySet;
use super::performance::{recency_tier_for, PerformanceMetrics};
use super::signal::Evidence;
use super::view::{RankScores, View};
use crate::scoring::{compute_rankings, estimate_confidence, ScoringConfig, CONFIDENCE_FLOOR};

/// Organization used when the raw record carries none.
pub const UNKNOWN_ORGANIZATION: &str = "Unknown";

/// Attributes produced by an enrichment source for one record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Enrichment {
    pub modalities: ModalitySet,
    pub metrics: PerformanceMetrics,
}

/// One evaluated model.
///
/// Derived fields (`aggregate_score`, `recency_tier`, `confidence`, `ranks`)
/// are pure functions of the evidence and enrichment and are only written by
/// [`ModelEntity::recompute`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelEntity {
    name: String,
    organization: String,
    modalities: ModalitySet,
    metrics: PerformanceMetrics,
    evidence: Evidence,
    aggregate_score: f64,
    recency_tier: u8,
    confidence: f64,
    confidence_rationale: String,
    ranks: RankScores,
}

impl ModelEntity {
    /// Create an empty record. Confidence starts at the floor.
    pub fn new(name: impl Into<String>, organization: impl Into<String>) -> Self {
        let metrics = PerformanceMetrics::default();
        Self {
            name: name.into(),
            organization: organization.into(),
            modalities: ModalitySet::empty(),
            recency_tier: metrics.recency_tier(),
            metrics,
            evidence: Evidence::new(),
            aggregate_score: 0.0,
            confidence: CONFIDENCE_FLOOR,
            confidence_rationale: String::new(),
            ranks: RankScores::default(),
        }
    }

    /// Add one observation. Non-positive scores are ignored.
    pub fn add_signal(&mut self, source: impl Into<String>, raw_score: f64, weight: f64) -> bool {
        let kept = self.evidence.add_signal(source, raw_score, weight);
        if kept {
            self.aggregate_score = self.evidence.aggregate();
        }
        kept
    }

    /// Replace enrichment output and recompute every derived field.
    pub fn apply_enrichment(&mut self, enrichment: Enrichment, config: &ScoringConfig) {
        self.modalities = enrichment.modalities;
        self.metrics = enrichment.metrics;
        self.recompute(config);
    }

    /// Recompute aggregate, recency tier, confidence and rankings, in that
    /// order. Idempotent for unchanged state.
    pub fn recompute(&mut self, config: &ScoringConfig) {
        self.aggregate_score = self.evidence.aggregate();
        self.recency_tier = recency_tier_for(self.metrics.staleness_days);

        let estimate = estimate_confidence(
            &self.evidence,
            self.aggregate_score,
            self.recency_tier,
            &self.metrics,
            &self.modalities,
            &config.confidence,
        );
        self.confidence = estimate.value;
        self.confidence_rationale = estimate.rationale;

        if self.aggregate_score > 0.9 || self.aggregate_score < 0.1 {
            tracing::debug!(
                model = %self.name,
                aggregate = self.aggregate_score,
                signals = self.evidence.len(),
                "extreme aggregate score"
            );
        }
        if self.confidence < 20.0 || self.confidence > 90.0 {
            tracing::debug!(
                model = %self.name,
                confidence = self.confidence,
                rationale = %self.confidence_rationale,
                "extreme confidence"
            );
        }

        self.ranks = compute_rankings(
            self.aggregate_score,
            self.confidence,
            &self.metrics,
            &self.modalities,
            config,
        );
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn modalities(&self) -> &ModalitySet {
        &self.modalities
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    pub fn evidence(&self) -> &Evidence {
        &self.evidence
    }

    pub fn aggregate_score(&self) -> f64 {
        self.aggregate_score
    }

    pub fn recency_tier(&self) -> u8 {
        self.recency_tier
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn confidence_rationale(&self) -> &str {
        &self.confidence_rationale
    }

    /// Raw (unclamped) rank scores.
    pub fn ranks(&self) -> &RankScores {
        &self.ranks
    }

    pub fn score(&self, view: View) -> f64 {
        self.ranks.get(view)
    }
}
