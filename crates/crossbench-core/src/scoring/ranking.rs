//! Ranking calculator: eight view scores from one record's state.
//!
//! With `S` = aggregate score and `C` = confidence / 100:
//!
//! | View | Formula |
//! |------|---------|
//! | Overall | `(wS·S + wc·coding + wr·creative + wC·C + wp·priceFactor) · 100` |
//! | Value | free: `S · free_multiplier`; priced: `S² / (log10(price + 1) + log_offset)` |
//! | Coding | `(0.6·coding + 0.2·reasoning + 0.1·ctxNorm + 0.1·C) · 100` |
//! | Image | `(0.5·S + 0.3·creative + 0.1·speedNorm + 0.1·C) · 100`, 0 without Image |
//! | Video | Image formula, × `video_fallback_factor` without Video |
//! | Speed | `(0.7·tpsNorm + 0.2·C + 0.1·priceFactor) · 100` |
//! | Confidence | confidence, unchanged |
//! | Enterprise | `(0.4·C + 0.3·uptime + 0.3·maturity) · 100` |
//!
//! Results are not clamped here; Value in particular is an unbounded ratio.
//! Exporters use [`RankScores::clamped`].

use super::config::{Ceilings, ScoringConfig};
use crate::domain::{Modality, ModalitySet, PerformanceMetrics, RankScores, DISPLAY_MAX};

/// `1 / (1 + price / scale)`; 0 for the unknown-price sentinel.
pub fn price_factor(metrics: &PerformanceMetrics, ceilings: &Ceilings) -> f64 {
    if !metrics.price_known() {
        return 0.0;
    }
    1.0 / (1.0 + metrics.price_per_million_input.max(0.0) / ceilings.price_scale)
}

fn normalized(value: f64, ceiling: f64) -> f64 {
    (value / ceiling).clamp(0.0, 1.0)
}

/// Compute all eight view scores.
pub fn compute_rankings(
    aggregate: f64,
    confidence: f64,
    metrics: &PerformanceMetrics,
    modalities: &ModalitySet,
    config: &ScoringConfig,
) -> RankScores {
    let s = aggregate;
    let c = confidence / DISPLAY_MAX;
    let ceilings = &config.ceilings;
    let pf = price_factor(metrics, ceilings);

    let o = &config.overall;
    let overall = (s * o.core
        + metrics.coding_score * o.coding
        + metrics.creative_score * o.creative
        + c * o.confidence
        + pf * o.price)
        * DISPLAY_MAX;

    let value = value_score(s, metrics, config);

    let cw = &config.coding;
    let ctx_norm = normalized(metrics.context_window, ceilings.context_tokens);
    let coding = (metrics.coding_score * cw.coding
        + metrics.reasoning_score * cw.reasoning
        + ctx_norm * cw.context
        + c * cw.confidence)
        * DISPLAY_MAX;

    let g = &config.generation;
    let gen_speed = normalized(metrics.tokens_per_second, ceilings.generation_tokens_per_sec);
    let generation = (s * g.core
        + metrics.creative_score * g.creative
        + gen_speed * g.speed
        + c * g.confidence)
        * DISPLAY_MAX;
    let image = if modalities.contains(Modality::Image) {
        generation
    } else {
        0.0
    };
    let video = if modalities.contains(Modality::Video) {
        generation
    } else {
        generation * g.video_fallback_factor
    };

    let sw = &config.speed;
    let tps = normalized(metrics.tokens_per_second, ceilings.speed_tokens_per_sec);
    let speed = (tps * sw.throughput + c * sw.confidence + pf * sw.price) * DISPLAY_MAX;

    let ew = &config.enterprise;
    let enterprise =
        (c * ew.confidence + metrics.uptime_sla * ew.uptime + metrics.org_maturity * ew.maturity)
            * DISPLAY_MAX;

    RankScores {
        overall,
        value,
        coding,
        image,
        video,
        speed,
        confidence,
        enterprise,
    }
}

/// Value view. Free models score `S · free_multiplier`, which dwarfs any
/// priced model; unknown prices score 0 and drop out of the view.
fn value_score(aggregate: f64, metrics: &PerformanceMetrics, config: &ScoringConfig) -> f64 {
    if !metrics.price_known() {
        return 0.0;
    }
    let price = metrics.price_per_million_input;
    if price <= 0.0 {
        aggregate * config.value.free_multiplier
    } else {
        aggregate * aggregate / ((price + 1.0).log10() + config.value.log_offset)
    }
}
