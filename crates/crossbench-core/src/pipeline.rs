//! Payload → registry.
//!
//! Per record: signals from the configured sources, then enrichment, then one
//! recompute of every derived field. Records without a usable signal are
//! counted and left out of the registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{CrossbenchError, ModelEntity, Result};
use crate::enrich::{Enricher, EnrichmentInput};
use crate::ingest::{filter_records, parse_payload, IngestSummary, RawRecord};
use crate::metrics::METRICS;
use crate::obs;
use crate::registry::{Admission, Registry};
use crate::scoring::ScoringConfig;

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(flatten)]
    pub ingest: IngestSummary,
    /// Well-formed records with no usable signal.
    pub unscored: usize,
    /// Records stored in the registry.
    pub admitted: usize,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub registry: Registry,
    pub summary: RunSummary,
    /// Hex SHA-256 of the raw payload bytes.
    pub payload_digest: String,
}

/// Hex SHA-256 of `bytes`.
pub fn payload_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Build one fully scored record.
///
/// Every configured source present in the record contributes a signal; values
/// outside (0,1] are ignored.
pub fn score_record<E>(
    record: &RawRecord,
    enricher: &E,
    config: &ScoringConfig,
    as_of: DateTime<Utc>,
) -> ModelEntity
where
    E: Enricher + ?Sized,
{
    let mut entity = ModelEntity::new(record.name(), record.organization());
    for source in &config.signal_sources {
        if let Some(value) = record.number(&source.field) {
            if (0.0..=1.0).contains(&value) {
                entity.add_signal(source.label.as_str(), value, source.weight);
            }
        }
    }

    let enrichment = enricher.enrich(&EnrichmentInput {
        name: record.name(),
        organization: record.organization(),
        record,
        aggregate: entity.aggregate_score(),
        as_of,
    });
    entity.apply_enrichment(enrichment, config);
    entity
}

/// Parse, filter, score and register every record in `payload`.
///
/// Fails on an invalid payload, and when no record ends up in the registry.
pub fn run_pipeline<E>(
    payload: &[u8],
    enricher: &E,
    config: &ScoringConfig,
    as_of: DateTime<Utc>,
) -> Result<RunOutcome>
where
    E: Enricher + ?Sized,
{
    let items = parse_payload(payload)?;
    let numeric: Vec<&str> = config
        .signal_sources
        .iter()
        .map(|s| s.field.as_str())
        .collect();
    let batch = filter_records(items, &numeric);

    let mut summary = RunSummary {
        ingest: batch.summary,
        ..Default::default()
    };
    METRICS.add_skipped(summary.ingest.malformed as u64);
    METRICS.add_duplicates(summary.ingest.duplicates as u64);

    let mut registry = Registry::new();
    for record in &batch.records {
        let entity = score_record(record, enricher, config, as_of);
        match registry.admit(entity) {
            Ok(Admission::Accepted) => {
                summary.admitted += 1;
                METRICS.inc_accepted();
            }
            Ok(Admission::Unscored) => {
                tracing::debug!(model = %record.name(), "no usable signal; excluded");
                summary.unscored += 1;
                METRICS.inc_unscored();
            }
            Err(CrossbenchError::DuplicateName(name)) => {
                tracing::debug!(model = %name, "duplicate at admission; first kept");
                summary.ingest.duplicates += 1;
                METRICS.add_duplicates(1);
            }
            Err(e) => return Err(e),
        }
    }

    obs::emit_ingest_summary(&summary.ingest, summary.unscored, summary.admitted);
    obs::emit_modality_counts(&registry.modality_counts());

    if registry.is_empty() {
        return Err(CrossbenchError::EmptyRegistry);
    }

    Ok(RunOutcome {
        registry,
        summary,
        payload_digest: payload_digest(payload),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Enrichment, ModalitySet, PerformanceMetrics};
    use crate::enrich::KnowledgeBase;
    use serde_json::json;

    /// Enricher returning fixed attributes.
    struct Fixed;

    impl Enricher for Fixed {
        fn enrich(&self, _input: &EnrichmentInput<'_>) -> Enrichment {
            Enrichment {
                modalities: ModalitySet::text_only(),
                metrics: PerformanceMetrics {
                    price_per_million_input: 1.0,
                    staleness_days: 200,
                    ..Default::default()
                },
            }
        }
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn record(value: serde_json::Value) -> RawRecord {
        RawRecord::parse(0, value, &[]).expect("valid")
    }

    #[test]
    fn both_signal_sources_contribute() {
        let r = record(json!({"name": "m", "gpqa_score": 0.8, "average_score": "0.6"}));
        let e = score_record(&r, &Fixed, &ScoringConfig::default(), now());
        assert_eq!(e.evidence().len(), 2);
        let expected = (0.8 * 0.5 + 0.6 * 0.4) / 0.9;
        assert!((e.aggregate_score() - expected).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_signal_is_ignored() {
        let r = record(json!({"name": "m", "gpqa_score": 63.5, "average_score": 0.7}));
        let e = score_record(&r, &Fixed, &ScoringConfig::default(), now());
        assert_eq!(e.evidence().len(), 1);
        assert!((e.aggregate_score() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn unscored_records_are_counted_not_admitted() {
        let payload = serde_json::to_vec(&json!([
            {"name": "a", "gpqa_score": 0.7},
            {"name": "b"},
            {"name": "a", "gpqa_score": 0.9},
            {"organization": "x"}
        ]))
        .expect("encode");
        let out = run_pipeline(&payload, &Fixed, &ScoringConfig::default(), now()).expect("run");
        assert_eq!(out.registry.len(), 1);
        assert_eq!(out.summary.unscored, 1);
        assert_eq!(out.summary.admitted, 1);
        assert_eq!(out.summary.ingest.duplicates, 1);
        assert_eq!(out.summary.ingest.malformed, 1);
        assert_eq!(out.payload_digest.len(), 64);
    }

    #[test]
    fn empty_registry_is_fatal() {
        let payload = br#"[{"name": "a"}, {"name": "b", "gpqa_score": 0}]"#;
        let err = run_pipeline(payload, &KnowledgeBase::new(), &ScoringConfig::default(), now())
            .expect_err("nothing scored");
        assert!(matches!(err, CrossbenchError::EmptyRegistry));

        let err = run_pipeline(b"[]", &KnowledgeBase::new(), &ScoringConfig::default(), now())
            .expect_err("empty payload");
        assert!(matches!(err, CrossbenchError::EmptyRegistry));
    }

    #[test]
    fn invalid_payload_is_fatal() {
        let err = run_pipeline(b"{}", &Fixed, &ScoringConfig::default(), now())
            .expect_err("object payload");
        assert!(matches!(err, CrossbenchError::InvalidPayload(_)));
    }

    #[test]
    fn digest_is_stable() {
        assert_eq!(
            payload_digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
