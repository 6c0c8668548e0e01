//! CrossBench Core Library
//!
//! Cross-leaderboard aggregation: signal evidence, confidence, the eight
//! ranking views, and the artifacts written from a scored registry.

pub mod domain;
pub mod ecosystem;
pub mod enrich;
pub mod ingest;
pub mod metrics;
pub mod obs;
pub mod pipeline;
pub mod registry;
pub mod reporting;
pub mod scoring;
pub mod telemetry;

pub use domain::{
    CrossbenchError, Enrichment, Evidence, IngestError, Modality, ModalitySet, ModelEntity,
    PerformanceMetrics, RankScores, Result, ScoreScale, Signal, View, PRICE_UNKNOWN,
    TIE_THRESHOLD, UNKNOWN_ORGANIZATION,
};

pub use ecosystem::{summarize_ecosystem, OrgSummary, OTHER_ORGANIZATION};
pub use enrich::{Enricher, EnrichmentInput, KnowledgeBase};
pub use ingest::{filter_records, parse_payload, IngestBatch, IngestSummary, RawRecord};
pub use pipeline::{payload_digest, run_pipeline, score_record, RunOutcome, RunSummary};
pub use registry::{Admission, ModalityCounts, Registry};
pub use reporting::{
    export_all, render_report_md, ExportPaths, LeaderboardDocument, RunInfo,
    DEFAULT_EXPORT_LIMIT,
};
pub use scoring::{
    compute_rankings, estimate_confidence, rank_by_price, rank_by_view, view_table,
    ScoringConfig, SignalSource,
};

pub use telemetry::init_tracing;

/// Crate version, from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
