//! Leaderboard artifacts.
//!
//! - `leaderboard_<view>.csv` (one per view) and `leaderboard_price.csv`
//! - `leaderboard_all.json`: the full [`LeaderboardDocument`]
//! - `leaderboard.md`: top-10 tables per view plus the ecosystem table
//! - `output.txt`: plain-text top 50 by Overall
//!
//! Scores are written on the 0–100 display scale.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Modality, ModalitySet, ModelEntity, RankScores, Signal, View, DISPLAY_MAX};
use crate::ecosystem::OrgSummary;
use crate::obs;
use crate::pipeline::RunSummary;
use crate::registry::Registry;
use crate::scoring::{rank_by_price, view_table, EcosystemWeights};

pub const SCHEMA_VERSION: &str = "1.0";
/// Rows per CSV table unless overridden.
pub const DEFAULT_EXPORT_LIMIT: usize = 100;
pub const REPORT_TOP: usize = 10;
pub const LEGACY_TOP: usize = 50;

pub const JSON_FILE: &str = "leaderboard_all.json";
pub const PRICE_CSV_FILE: &str = "leaderboard_price.csv";
pub const REPORT_FILE: &str = "leaderboard.md";
pub const LEGACY_FILE: &str = "output.txt";

/// File name of the CSV table for `view`.
pub fn view_csv_file(view: View) -> String {
    format!("leaderboard_{}.csv", view.key())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelMetricsArtifact {
    /// Aggregate score × 100.
    pub score: f64,
    pub coding: f64,
    pub creative: f64,
    /// USD per million input tokens; `None` when unknown.
    pub price: Option<f64>,
    pub speed: f64,
    pub context_window: f64,
    pub recency_tier: u8,
    pub days_ago: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelMetaArtifact {
    pub confidence: f64,
    pub conf_reason: String,
    pub is_open_source: bool,
    pub is_enterprise: bool,
    pub is_text: bool,
    pub is_image: bool,
    pub is_video: bool,
    pub primary_type: String,
    pub modalities: ModalitySet,
    pub signals: Vec<Signal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelArtifact {
    pub name: String,
    pub org: String,
    pub metrics: ModelMetricsArtifact,
    /// Clamped to [0, 100].
    pub ranks: RankScores,
    pub meta: ModelMetaArtifact,
}

fn display(unit: f64) -> f64 {
    (unit * DISPLAY_MAX).clamp(0.0, DISPLAY_MAX)
}

impl From<&ModelEntity> for ModelArtifact {
    fn from(e: &ModelEntity) -> Self {
        let m = e.metrics();
        let mods = e.modalities();
        Self {
            name: e.name().to_string(),
            org: e.organization().to_string(),
            metrics: ModelMetricsArtifact {
                score: display(e.aggregate_score()),
                coding: display(m.coding_score),
                creative: display(m.creative_score),
                price: m.price_known().then_some(m.price_per_million_input),
                speed: m.tokens_per_second,
                context_window: m.context_window,
                recency_tier: e.recency_tier(),
                days_ago: m.staleness_days,
            },
            ranks: e.ranks().clamped(),
            meta: ModelMetaArtifact {
                confidence: e.confidence(),
                conf_reason: e.confidence_rationale().to_string(),
                is_open_source: m.is_open_source,
                is_enterprise: m.is_enterprise_ready,
                is_text: mods.contains(Modality::Text),
                is_image: mods.contains(Modality::Image),
                is_video: mods.contains(Modality::Video),
                primary_type: mods.primary_type().to_string(),
                modalities: *mods,
                signals: e.evidence().signals().to_vec(),
            },
        }
    }
}

/// Complete run artifact written as `leaderboard_all.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardDocument {
    pub schema_version: String,
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Endpoint URL or input path.
    pub source: String,
    pub payload_digest: String,
    pub summary: RunSummary,
    /// Ordered by the Overall view.
    pub models: Vec<ModelArtifact>,
    pub ecosystem: Vec<OrgSummary>,
}

/// Run identity carried into the artifacts.
#[derive(Debug, Clone)]
pub struct RunInfo {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub payload_digest: String,
}

impl RunInfo {
    /// Fresh run id, stamped now. The digest is filled in once the payload
    /// has been fetched.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            source: source.into(),
            payload_digest: String::new(),
        }
    }

    pub fn with_digest(mut self, payload_digest: impl Into<String>) -> Self {
        self.payload_digest = payload_digest.into();
        self
    }
}

impl LeaderboardDocument {
    pub fn build(
        registry: &Registry,
        summary: RunSummary,
        info: &RunInfo,
        weights: &EcosystemWeights,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            run_id: info.run_id,
            generated_at: info.generated_at,
            source: info.source.clone(),
            payload_digest: info.payload_digest.clone(),
            summary,
            models: registry
                .ranked(View::Overall)
                .into_iter()
                .map(ModelArtifact::from)
                .collect(),
            ecosystem: registry.ecosystem(weights),
        }
    }
}

/// Quote a CSV field when it carries a separator, quote or line break.
fn csv_field(s: &str) -> Cow<'_, str> {
    if s.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(s)
    }
}

fn price_cell(entity: &ModelEntity) -> String {
    let m = entity.metrics();
    if m.price_known() {
        format!("{:.2}", m.price_per_million_input)
    } else {
        "N/A".to_string()
    }
}

/// CSV table for one view: ranked, filtered and truncated to `limit` rows.
pub fn render_view_csv(registry: &Registry, view: View, limit: usize) -> String {
    let mut out = format!(
        "Rank,Model,Organization,Aggregate Score,Input Price,{} Score\n",
        view.title()
    );
    for (i, e) in view_table(registry.iter(), view, limit).into_iter().enumerate() {
        let _ = writeln!(
            out,
            "{},{},{},{:.3},{},{:.2}",
            i + 1,
            csv_field(e.name()),
            csv_field(e.organization()),
            e.aggregate_score(),
            price_cell(e),
            e.ranks().clamped().get(view),
        );
    }
    out
}

/// Cheapest first; unknown prices are left out.
pub fn render_price_csv(registry: &Registry, limit: usize) -> String {
    let mut out = String::from("Rank,Model,Organization,Aggregate Score,Input Price\n");
    for (i, e) in rank_by_price(registry.iter(), limit).into_iter().enumerate() {
        let _ = writeln!(
            out,
            "{},{},{},{:.3},{}",
            i + 1,
            csv_field(e.name()),
            csv_field(e.organization()),
            e.aggregate_score(),
            price_cell(e),
        );
    }
    out
}

fn md_cell(s: &str) -> Cow<'_, str> {
    if s.contains('|') {
        Cow::Owned(s.replace('|', "\\|"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Markdown report: run header, one top-N table per view, ecosystem table.
pub fn render_report_md(registry: &Registry, doc: &LeaderboardDocument, top: usize) -> String {
    let mut out = String::new();
    out.push_str("# CrossBench Leaderboard\n\n");
    let s = &doc.summary;
    let _ = writeln!(out, "- run: `{}`", doc.run_id);
    let _ = writeln!(out, "- generated: {}", doc.generated_at.to_rfc3339());
    let _ = writeln!(out, "- source: {}", doc.source);
    let _ = writeln!(
        out,
        "- models: {} ranked, {} received, {} malformed, {} duplicates, {} unscored\n",
        s.admitted, s.ingest.received, s.ingest.malformed, s.ingest.duplicates, s.unscored
    );

    for view in View::ALL {
        let rows = view_table(registry.iter(), view, top);
        let _ = writeln!(out, "## {}\n", view.title());
        if rows.is_empty() {
            out.push_str("_No listed models._\n\n");
            continue;
        }
        out.push_str("| # | Model | Organization | Score | Confidence |\n");
        out.push_str("|---|-------|--------------|-------|------------|\n");
        for (i, e) in rows.into_iter().enumerate() {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {:.2} | {:.0} |",
                i + 1,
                md_cell(e.name()),
                md_cell(e.organization()),
                e.ranks().clamped().get(view),
                e.confidence(),
            );
        }
        out.push('\n');
    }

    out.push_str("## Ecosystem\n\n");
    out.push_str("| Organization | Models | Mean Score | Composite |\n");
    out.push_str("|--------------|--------|------------|-----------|\n");
    for org in &doc.ecosystem {
        let _ = writeln!(
            out,
            "| {} | {} | {:.3} | {:.2} |",
            md_cell(&org.organization),
            org.model_count,
            org.mean_score,
            org.composite,
        );
    }
    out
}

/// Plain-text top-N by Overall.
pub fn render_legacy_text(registry: &Registry, top: usize) -> String {
    let mut out = String::from("CROSSBENCH LEADERBOARD\n----------------------\n");
    for (i, e) in registry.ranked(View::Overall).into_iter().take(top).enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({:.2})",
            i + 1,
            e.name(),
            e.ranks().clamped().overall
        );
    }
    out
}

fn write_file(path: &Path, content: &str, rows: usize) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    obs::emit_export_written(path, rows);
    Ok(())
}

/// Write `leaderboard_all.json` in pretty JSON format.
pub fn write_leaderboard_json(path: &Path, doc: &LeaderboardDocument) -> Result<()> {
    let content = serde_json::to_string_pretty(doc).context("serialize leaderboard document")?;
    write_file(path, &content, doc.models.len())
}

/// Where artifacts go.
#[derive(Debug, Clone)]
pub struct ExportPaths {
    /// CSV tables and the JSON document.
    pub data_dir: PathBuf,
    /// Markdown report and plain-text list.
    pub output_dir: PathBuf,
}

/// Write every artifact; returns the paths written.
pub fn export_all(
    registry: &Registry,
    doc: &LeaderboardDocument,
    paths: &ExportPaths,
    limit: usize,
) -> Result<Vec<PathBuf>> {
    for dir in [&paths.data_dir, &paths.output_dir] {
        std::fs::create_dir_all(dir).with_context(|| format!("create {:?}", dir))?;
    }
    let mut written = Vec::new();

    let json_path = paths.data_dir.join(JSON_FILE);
    write_leaderboard_json(&json_path, doc)?;
    written.push(json_path);

    for view in View::ALL {
        let path = paths.data_dir.join(view_csv_file(view));
        let csv = render_view_csv(registry, view, limit);
        write_file(&path, &csv, csv.lines().count().saturating_sub(1))?;
        written.push(path);
    }

    let price_path = paths.data_dir.join(PRICE_CSV_FILE);
    let csv = render_price_csv(registry, limit);
    write_file(&price_path, &csv, csv.lines().count().saturating_sub(1))?;
    written.push(price_path);

    let report_path = paths.output_dir.join(REPORT_FILE);
    write_file(
        &report_path,
        &render_report_md(registry, doc, REPORT_TOP),
        registry.len().min(REPORT_TOP),
    )?;
    written.push(report_path);

    let legacy_path = paths.output_dir.join(LEGACY_FILE);
    write_file(
        &legacy_path,
        &render_legacy_text(registry, LEGACY_TOP),
        registry.len().min(LEGACY_TOP),
    )?;
    written.push(legacy_path);

    Ok(written)
}
