//! Confidence estimator: how far the aggregate score can be trusted.
//!
//! Fixed base plus independent bonuses and penalties, clamped to
//! `[floor, ceiling]`:
//!
//! | Step | Effect |
//! |------|--------|
//! | base | `base` |
//! | evidence volume | `+per_signal` per retained signal |
//! | recency | `+recent_bonus` at tier 3, `+fresh_bonus` at tier 2 |
//! | versatility | `+versatile_bonus` if coding and creative both exceed the threshold, or more than one modality |
//! | quality ladder | first matching rung, or `-low_quality_penalty` below `low_quality_below` |
//! | dispersion | `-dispersion_penalty × σ` (population std dev around the aggregate) |
//! | enterprise | `+enterprise_bonus` when enterprise-ready |
//!
//! A record with no signals gets exactly `floor`.

use serde::{Deserialize, Serialize};

use super::config::ConfidenceWeights;
use crate::domain::{Evidence, ModalitySet, PerformanceMetrics};

/// Lowest confidence a record can have.
pub const CONFIDENCE_FLOOR: f64 = 10.0;

/// Highest confidence a record can have.
pub const CONFIDENCE_CEILING: f64 = 99.0;

pub const RATIONALE_NO_SIGNALS: &str = "No Verified Signals";
pub const RATIONALE_RECENT: &str = "Recent Verification";
pub const RATIONALE_VERSATILE: &str = "Multi-Category Verified";
pub const RATIONALE_CONSENSUS: &str = "High Consensus";

/// Result of the estimator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceEstimate {
    /// Confidence in `[floor, ceiling]`.
    pub value: f64,
    /// Which qualitative bonuses fired. Has no effect on `value`.
    pub rationale: String,
}

/// Estimate confidence for one record.
///
/// `recency_tier` must come from [`crate::domain::recency_tier_for`] so the
/// recency bonus agrees with the ranking tie-break.
pub fn estimate_confidence(
    evidence: &Evidence,
    aggregate: f64,
    recency_tier: u8,
    metrics: &PerformanceMetrics,
    modalities: &ModalitySet,
    weights: &ConfidenceWeights,
) -> ConfidenceEstimate {
    if evidence.is_empty() {
        return ConfidenceEstimate {
            value: weights.floor,
            rationale: RATIONALE_NO_SIGNALS.to_string(),
        };
    }

    let mut reasons: Vec<&str> = Vec::new();
    let mut conf = weights.base;

    conf += evidence.len() as f64 * weights.per_signal;

    match recency_tier {
        3 => {
            conf += weights.recent_bonus;
            reasons.push(RATIONALE_RECENT);
        }
        2 => conf += weights.fresh_bonus,
        _ => {}
    }

    let versatile = (metrics.coding_score > weights.versatile_threshold
        && metrics.creative_score > weights.versatile_threshold)
        || modalities.len() > 1;
    if versatile {
        conf += weights.versatile_bonus;
        reasons.push(RATIONALE_VERSATILE);
    }

    conf += quality_adjustment(aggregate, weights);

    conf -= evidence.dispersion(aggregate) * weights.dispersion_penalty;

    if metrics.is_enterprise_ready {
        conf += weights.enterprise_bonus;
    }

    if evidence.len() >= weights.high_consensus_signals {
        reasons.push(RATIONALE_CONSENSUS);
    }

    ConfidenceEstimate {
        value: conf.clamp(weights.floor, weights.ceiling),
        rationale: reasons.join(", "),
    }
}

/// Score-quality ladder. Rungs are mutually exclusive, checked top-down.
fn quality_adjustment(aggregate: f64, weights: &ConfidenceWeights) -> f64 {
    if let Some(step) = weights
        .quality_ladder
        .iter()
        .find(|step| aggregate > step.above)
    {
        return step.bonus;
    }
    if aggregate < weights.low_quality_below {
        -weights.low_quality_penalty
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{recency_tier_for, Modality};

    fn evidence(scores: &[(f64, f64)]) -> Evidence {
        let mut ev = Evidence::new();
        for (i, (s, w)) in scores.iter().enumerate() {
            ev.add_signal(format!("src{i}"), *s, *w);
        }
        ev
    }

    fn metrics(staleness_days: u32) -> PerformanceMetrics {
        PerformanceMetrics {
            staleness_days,
            ..Default::default()
        }
    }

    fn estimate(ev: &Evidence, m: &PerformanceMetrics, mods: &ModalitySet) -> ConfidenceEstimate {
        estimate_confidence(
            ev,
            ev.aggregate(),
            recency_tier_for(m.staleness_days),
            m,
            mods,
            &ConfidenceWeights::default(),
        )
    }

    #[test]
    fn no_signals_is_exactly_floor() {
        let ev = Evidence::new();
        let mut m = metrics(1);
        m.is_enterprise_ready = true;
        m.coding_score = 0.99;
        m.creative_score = 0.99;
        let est = estimate(&ev, &m, &ModalitySet::text_only().with(Modality::Image));
        assert_eq!(est.value, 10.0);
        assert_eq!(est.rationale, RATIONALE_NO_SIGNALS);
    }

    #[test]
    fn worked_example() {
        let ev = evidence(&[(0.90, 0.5), (0.70, 0.4)]);
        let m = PerformanceMetrics {
            coding_score: 0.8,
            creative_score: 0.8,
            is_enterprise_ready: true,
            staleness_days: 10,
            ..Default::default()
        };
        let est = estimate(&ev, &m, &ModalitySet::text_only());

        let agg = ev.aggregate();
        let sigma = ev.dispersion(agg);
        assert!((sigma - 0.1006).abs() < 1e-3);
        let expected = 50.0 + 20.0 + 5.0 + 10.0 + 10.0 - sigma * 50.0 + 5.0;
        assert!((est.value - expected).abs() < 1e-9);
        assert!(est.value > 94.0 && est.value < 96.0);
        assert!(est.rationale.contains(RATIONALE_RECENT));
        assert!(est.rationale.contains(RATIONALE_VERSATILE));
        assert!(!est.rationale.contains(RATIONALE_CONSENSUS));
    }

    #[test]
    fn tier_two_gets_half_recency_bonus() {
        let ev = evidence(&[(0.7, 1.0)]);
        let fresh = estimate(&ev, &metrics(60), &ModalitySet::text_only());
        let stale = estimate(&ev, &metrics(200), &ModalitySet::text_only());
        assert!((fresh.value - stale.value - 2.5).abs() < 1e-9);
        assert!(!fresh.rationale.contains(RATIONALE_RECENT));
    }

    #[test]
    fn quality_ladder_buckets() {
        let w = ConfidenceWeights::default();
        assert_eq!(quality_adjustment(0.90, &w), 15.0);
        assert_eq!(quality_adjustment(0.85, &w), 10.0);
        assert_eq!(quality_adjustment(0.80, &w), 10.0);
        assert_eq!(quality_adjustment(0.70, &w), 5.0);
        assert_eq!(quality_adjustment(0.50, &w), 0.0);
        assert_eq!(quality_adjustment(0.40, &w), 0.0);
        assert_eq!(quality_adjustment(0.39, &w), -10.0);
    }

    #[test]
    fn multimodal_counts_as_versatile() {
        let ev = evidence(&[(0.5, 1.0)]);
        let single = estimate(&ev, &metrics(200), &ModalitySet::text_only());
        let multi = estimate(
            &ev,
            &metrics(200),
            &ModalitySet::text_only().with(Modality::Video),
        );
        assert!((multi.value - single.value - 10.0).abs() < 1e-9);
        assert!(multi.rationale.contains(RATIONALE_VERSATILE));
    }

    #[test]
    fn disagreement_lowers_confidence() {
        // Same mean (0.6), same count, different spread.
        let tight = evidence(&[(0.58, 1.0), (0.62, 1.0)]);
        let wide = evidence(&[(0.30, 1.0), (0.90, 1.0)]);
        let m = metrics(200);
        let a = estimate(&tight, &m, &ModalitySet::text_only());
        let b = estimate(&wide, &m, &ModalitySet::text_only());
        assert!(b.value < a.value);
    }

    #[test]
    fn three_signals_report_consensus_and_clamp_high() {
        let ev = evidence(&[(0.95, 1.0), (0.95, 1.0), (0.95, 1.0)]);
        let m = PerformanceMetrics {
            is_enterprise_ready: true,
            staleness_days: 1,
            ..Default::default()
        };
        let est = estimate(&ev, &m, &ModalitySet::text_only());
        assert_eq!(est.value, 99.0);
        assert!(est.rationale.ends_with(RATIONALE_CONSENSUS));
    }

    #[test]
    fn low_scores_clamp_to_floor() {
        let mut w = ConfidenceWeights::default();
        w.base = -100.0;
        let ev = evidence(&[(0.1, 1.0)]);
        let est = estimate_confidence(
            &ev,
            ev.aggregate(),
            0,
            &metrics(400),
            &ModalitySet::text_only(),
            &w,
        );
        assert_eq!(est.value, 10.0);
    }
}
