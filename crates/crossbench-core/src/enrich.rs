//! Metric enrichment: fills the attributes the upstream record does not carry.
//!
//! [`Enricher`] is the seam; [`KnowledgeBase`] is the default implementation.
//! It prefers explicit fields from the raw record and falls back to name and
//! organization patterns.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{Enrichment, Modality, ModalitySet, PerformanceMetrics, PRICE_UNKNOWN};
use crate::ingest::RawRecord;

/// What an enricher sees for one record.
#[derive(Debug, Clone, Copy)]
pub struct EnrichmentInput<'a> {
    pub name: &'a str,
    pub organization: &'a str,
    pub record: &'a RawRecord,
    /// Aggregate score from the record's signals.
    pub aggregate: f64,
    /// Reference instant for staleness.
    pub as_of: DateTime<Utc>,
}

/// Source of derived per-model attributes.
pub trait Enricher {
    fn enrich(&self, input: &EnrichmentInput<'_>) -> Enrichment;
}

const IMAGE_GENERATORS: &[&str] = &["midjourney", "stable diffusion", "dall-e", "imagen"];

const VIDEO_GENERATORS: &[&str] = &[
    "sora",
    "runway",
    "gen-2",
    "gen-3",
    "pika",
    "animatediff",
    "stable video",
    "kling",
    "video generation",
];

const VISION_TEXT_MODELS: &[&str] = &[
    "gpt-4",
    "gpt-5",
    "claude 3",
    "claude 4",
    "gemini",
    "llama 3.2 11b",
    "llama 3.2 90b",
    "pixtral",
    "qvq",
    "vision",
    "-vl",
    "diffusion",
];

const OPEN_SOURCE_FAMILIES: &[&str] = &["llama", "mistral", "qwen", "falcon"];

const ENTERPRISE_ORGANIZATIONS: &[&str] = &["openai", "anthropic", "google", "microsoft"];

const DEFAULT_CONTEXT_TOKENS: f64 = 100_000.0;
const LONG_CONTEXT_TOKENS: f64 = 160_000.0;

/// Heuristic enricher built from field values and name patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnowledgeBase;

impl KnowledgeBase {
    pub fn new() -> Self {
        Self
    }
}

impl Enricher for KnowledgeBase {
    fn enrich(&self, input: &EnrichmentInput<'_>) -> Enrichment {
        let name = input.name.to_lowercase();
        let org = input.organization.trim().to_lowercase();
        let record = input.record;
        let s = input.aggregate;

        let modalities = detect_modalities(record, &name);
        let is_open_source = contains_any(&name, OPEN_SOURCE_FAMILIES);
        let is_enterprise_ready = ENTERPRISE_ORGANIZATIONS.contains(&org.as_str());
        let (org_maturity, uptime_sla) = if is_enterprise_ready {
            (0.95, 0.99)
        } else {
            (0.5, 0.8)
        };

        let coding_score = record
            .number("coding_score")
            .or_else(|| record.number("humaneval"))
            .map(unit_score)
            .unwrap_or_else(|| {
                let factor = if name.contains("code") { 1.05 } else { 0.85 };
                (s * factor).clamp(0.0, 1.0)
            });

        let creative_score = record
            .number("creative_score")
            .map(unit_score)
            .unwrap_or_else(|| {
                let factor = if modalities.contains(Modality::Image)
                    || modalities.contains(Modality::Video)
                {
                    1.1
                } else if contains_any(&name, &["gpt-4", "claude", "gemini"]) {
                    0.95
                } else {
                    0.80
                };
                (s * factor).clamp(0.0, 1.0)
            });

        let context_window = record
            .number("context_length")
            .filter(|tokens| *tokens > 0.0)
            .unwrap_or(if contains_any(&name, &["128k", "200k"]) {
                LONG_CONTEXT_TOKENS
            } else {
                DEFAULT_CONTEXT_TOKENS
            });

        let tokens_per_second = record
            .number("throughput")
            .or_else(|| record.number("tokens_per_second"))
            .map(|tps| tps.max(0.0))
            .unwrap_or_else(|| fallback_throughput(&name));

        Enrichment {
            modalities,
            metrics: PerformanceMetrics {
                reasoning_score: s.clamp(0.0, 1.0),
                coding_score,
                creative_score,
                context_window,
                price_per_million_input: price_per_million(record, &name, is_open_source),
                tokens_per_second,
                is_open_source,
                is_enterprise_ready,
                org_maturity,
                uptime_sla,
                staleness_days: staleness_days(record, &name, input.as_of),
            },
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn unit_score(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

fn detect_modalities(record: &RawRecord, name: &str) -> ModalitySet {
    if let Some(labels) = record.string_list("modalities") {
        let set: ModalitySet = labels.iter().filter_map(|l| Modality::from_label(l)).collect();
        if !set.is_empty() {
            return set;
        }
    }

    let base = ModalitySet::text_only();
    if contains_any(name, IMAGE_GENERATORS) {
        base.with(Modality::Image)
    } else if contains_any(name, VIDEO_GENERATORS) {
        base.with(Modality::Video)
    } else if contains_any(name, VISION_TEXT_MODELS)
        || (name.contains("qwen") && name.contains("vl"))
        || (name.contains("grok") && contains_any(name, &["-2", "-3", "-4"]))
    {
        base.with(Modality::Image)
    } else {
        base
    }
}

fn price_per_million(record: &RawRecord, name: &str, is_open_source: bool) -> f64 {
    if let Some(raw) = record.number("input_price") {
        // Fractional prices are quoted per token.
        return if raw > 0.0 && raw < 1.0 {
            raw * 1_000_000.0
        } else {
            raw.max(0.0)
        };
    }
    if name.contains("gpt-4") {
        10.0
    } else if name.contains("flash") {
        0.25
    } else if is_open_source {
        0.0
    } else {
        PRICE_UNKNOWN
    }
}

fn fallback_throughput(name: &str) -> f64 {
    if name.contains("turbo") {
        120.0
    } else if name.contains("flash") {
        150.0
    } else if name.contains("mini") {
        100.0
    } else {
        50.0
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Whole days from `ts` to `as_of`; future timestamps count as 0.
pub fn days_between(ts: DateTime<Utc>, as_of: DateTime<Utc>) -> u32 {
    let days = (as_of - ts).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}

fn staleness_days(record: &RawRecord, name: &str, as_of: DateTime<Utc>) -> u32 {
    let stamped = ["updated_at", "release_date"]
        .iter()
        .find_map(|key| record.string(key).and_then(parse_timestamp));
    if let Some(ts) = stamped {
        return days_between(ts, as_of);
    }

    if name.contains("2025") {
        15
    } else if name.contains("2024") {
        90
    } else if name.contains("2023") {
        365
    } else {
        180
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn enrich(value: serde_json::Value, aggregate: f64) -> Enrichment {
        let record = RawRecord::parse(0, value, &[]).expect("valid record");
        KnowledgeBase::new().enrich(&EnrichmentInput {
            name: record.name(),
            organization: record.organization(),
            record: &record,
            aggregate,
            as_of: as_of(),
        })
    }

    #[test]
    fn explicit_modalities_win_over_name() {
        let e = enrich(json!({"name": "gpt-4o", "modalities": ["text", "video"]}), 0.5);
        assert!(e.modalities.contains(Modality::Video));
        assert!(!e.modalities.contains(Modality::Image));
    }

    #[test]
    fn vision_label_maps_to_image() {
        let e = enrich(json!({"name": "m", "modalities": ["Vision"]}), 0.5);
        assert!(e.modalities.contains(Modality::Image));
    }

    #[test]
    fn name_patterns_detect_modalities() {
        assert!(enrich(json!({"name": "Sora Turbo"}), 0.5)
            .modalities
            .contains(Modality::Video));
        assert!(enrich(json!({"name": "Qwen2-VL-72B"}), 0.5)
            .modalities
            .contains(Modality::Image));
        assert!(enrich(json!({"name": "grok-3"}), 0.5)
            .modalities
            .contains(Modality::Image));
        let plain = enrich(json!({"name": "Mixtral 8x7B"}), 0.5).modalities;
        assert_eq!(plain, ModalitySet::text_only());
    }

    #[test]
    fn per_token_price_is_scaled() {
        let e = enrich(json!({"name": "m", "input_price": "0.000003"}), 0.5);
        assert!((e.metrics.price_per_million_input - 3.0).abs() < 1e-9);
        let e = enrich(json!({"name": "m", "input_price": 15}), 0.5);
        assert_eq!(e.metrics.price_per_million_input, 15.0);
    }

    #[test]
    fn price_fallbacks() {
        assert_eq!(
            enrich(json!({"name": "GPT-4 Turbo"}), 0.5).metrics.price_per_million_input,
            10.0
        );
        assert_eq!(
            enrich(json!({"name": "Llama 3 70B"}), 0.5).metrics.price_per_million_input,
            0.0
        );
        assert_eq!(
            enrich(json!({"name": "mystery"}), 0.5).metrics.price_per_million_input,
            PRICE_UNKNOWN
        );
    }

    #[test]
    fn enterprise_flags_follow_organization() {
        let e = enrich(json!({"name": "m", "organization": "Anthropic"}), 0.5);
        assert!(e.metrics.is_enterprise_ready);
        assert_eq!(e.metrics.org_maturity, 0.95);
        assert_eq!(e.metrics.uptime_sla, 0.99);
        let e = enrich(json!({"name": "m", "organization": "Garage Labs"}), 0.5);
        assert!(!e.metrics.is_enterprise_ready);
        assert_eq!(e.metrics.uptime_sla, 0.8);
    }

    #[test]
    fn coding_prefers_fields_then_name() {
        let e = enrich(json!({"name": "m", "humaneval": 0.72}), 0.5);
        assert_eq!(e.metrics.coding_score, 0.72);
        let e = enrich(json!({"name": "m", "coding_score": "0.81", "humaneval": 0.2}), 0.5);
        assert_eq!(e.metrics.coding_score, 0.81);
        let e = enrich(json!({"name": "DeepSeek Coder"}), 0.98);
        assert_eq!(e.metrics.coding_score, 1.0);
        let e = enrich(json!({"name": "m"}), 0.6);
        assert!((e.metrics.coding_score - 0.51).abs() < 1e-12);
    }

    #[test]
    fn creative_estimate_depends_on_modality() {
        let e = enrich(json!({"name": "DALL-E 3"}), 0.5);
        assert!((e.metrics.creative_score - 0.55).abs() < 1e-12);
        let e = enrich(json!({"name": "m", "creative_score": 1.4}), 0.5);
        assert_eq!(e.metrics.creative_score, 1.0);
    }

    #[test]
    fn context_window_in_tokens() {
        let e = enrich(json!({"name": "m", "context_length": "32768"}), 0.5);
        assert_eq!(e.metrics.context_window, 32_768.0);
        let e = enrich(json!({"name": "Model 200k"}), 0.5);
        assert_eq!(e.metrics.context_window, 160_000.0);
        let e = enrich(json!({"name": "m"}), 0.5);
        assert_eq!(e.metrics.context_window, 100_000.0);
    }

    #[test]
    fn throughput_fallbacks() {
        assert_eq!(enrich(json!({"name": "m", "tokens_per_second": 88}), 0.5).metrics.tokens_per_second, 88.0);
        assert_eq!(enrich(json!({"name": "Gemini Flash"}), 0.5).metrics.tokens_per_second, 150.0);
        assert_eq!(enrich(json!({"name": "m"}), 0.5).metrics.tokens_per_second, 50.0);
    }

    #[test]
    fn staleness_from_timestamps() {
        let e = enrich(
            json!({"name": "m", "updated_at": "2025-05-22T12:00:00Z", "release_date": "2024-01-01"}),
            0.5,
        );
        assert_eq!(e.metrics.staleness_days, 9);
        let e = enrich(json!({"name": "m", "release_date": "2025-03-03"}), 0.5);
        assert_eq!(e.metrics.staleness_days, 90);
        let e = enrich(json!({"name": "m", "release_date": "2026-01-01"}), 0.5);
        assert_eq!(e.metrics.staleness_days, 0);
    }

    #[test]
    fn staleness_falls_back_to_name_year() {
        let e = enrich(json!({"name": "m-2024-08", "release_date": "soon"}), 0.5);
        assert_eq!(e.metrics.staleness_days, 90);
        assert_eq!(enrich(json!({"name": "m"}), 0.5).metrics.staleness_days, 180);
    }

    #[test]
    fn parse_timestamp_formats() {
        assert!(parse_timestamp("2025-01-01T00:00:00+02:00").is_some());
        assert!(parse_timestamp("2025-01-01").is_some());
        assert!(parse_timestamp("01/01/2025").is_none());
    }
}
