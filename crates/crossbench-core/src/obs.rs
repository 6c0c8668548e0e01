//! Structured lifecycle events for a leaderboard run.
//!
//! Every event carries an `event = "..."` field so JSON logs can be filtered
//! without parsing messages. [`RunSpan`] tags everything emitted during a run
//! with its run id.

use std::path::Path;

use tracing::{info, warn};

use crate::domain::IngestError;
use crate::ingest::IngestSummary;
use crate::registry::ModalityCounts;

/// RAII guard that enters a run-scoped span.
pub struct RunSpan {
    _span: tracing::span::EnteredSpan,
}

impl RunSpan {
    pub fn enter(run_id: &str) -> Self {
        let span = tracing::info_span!("crossbench.run", run_id = %run_id);
        Self {
            _span: span.entered(),
        }
    }
}

pub fn emit_run_started(run_id: &str, source: &str) {
    info!(event = "run.started", run_id = %run_id, source = %source);
}

/// A raw record was dropped by the ingestion filter.
pub fn emit_record_skipped(error: &IngestError) {
    warn!(event = "ingest.record_skipped", error = %error);
}

pub fn emit_ingest_summary(summary: &IngestSummary, unscored: usize, admitted: usize) {
    info!(
        event = "ingest.summary",
        received = summary.received,
        malformed = summary.malformed,
        duplicates = summary.duplicates,
        unscored = unscored,
        admitted = admitted,
    );
}

pub fn emit_modality_counts(counts: &ModalityCounts) {
    info!(
        event = "registry.modalities",
        text = counts.text,
        image = counts.image,
        video = counts.video,
    );
}

pub fn emit_export_written(path: &Path, rows: usize) {
    info!(event = "export.written", path = %path.display(), rows = rows);
}

pub fn emit_run_finished(run_id: &str, duration_ms: u64, models: usize, success: bool) {
    info!(
        event = "run.finished",
        run_id = %run_id,
        duration_ms = duration_ms,
        models = models,
        success = success,
    );
}
