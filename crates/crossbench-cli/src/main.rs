//! CrossBench - AI model leaderboard aggregator
//!
//! The `crossbench` command fetches benchmark records, scores every model
//! across eight ranking views and writes the leaderboard artifacts:
//!
//! - `<data-dir>/leaderboard_<view>.csv`, `leaderboard_price.csv`,
//!   `leaderboard_all.json`
//! - `<output-dir>/leaderboard.md`, `output.txt`

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::{error, info, Level};

use crossbench_core::enrich::parse_timestamp;
use crossbench_core::metrics::METRICS;
use crossbench_core::obs::{self, RunSpan};
use crossbench_core::{
    export_all, run_pipeline, ExportPaths, KnowledgeBase, LeaderboardDocument, RunInfo,
    ScoringConfig, DEFAULT_EXPORT_LIMIT,
};
use crossbench_fetch::{fetch_with_retry, FetchConfig, FileSource, HttpSource, RecordSource};

#[derive(Parser, Debug)]
#[command(name = "crossbench")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bias-adjusted aggregation of AI model leaderboards", long_about = None)]
struct Cli {
    /// Leaderboard endpoint to fetch
    #[arg(long, env = "CROSSBENCH_ENDPOINT")]
    endpoint: Option<String>,

    /// Score a saved payload instead of fetching (takes precedence over --endpoint)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for CSV tables and the JSON document
    #[arg(long, env = "CROSSBENCH_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Directory for the markdown report and plain-text list
    #[arg(long, env = "CROSSBENCH_OUTPUT_DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Scoring weights (JSON); missing keys keep their defaults
    #[arg(short, long, env = "CROSSBENCH_WEIGHTS")]
    weights: Option<PathBuf>,

    /// Reference date for staleness (RFC 3339 or YYYY-MM-DD, default: now)
    #[arg(long, value_parser = parse_as_of)]
    as_of: Option<DateTime<Utc>>,

    /// Maximum rows per CSV table
    #[arg(short, long, default_value_t = DEFAULT_EXPORT_LIMIT)]
    limit: usize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

fn parse_as_of(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    parse_timestamp(raw).ok_or_else(|| format!("expected RFC 3339 or YYYY-MM-DD, got '{raw}'"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    crossbench_core::init_tracing(cli.json, level);

    let result = run(&cli).await;
    METRICS.flush();
    if let Err(e) = &result {
        error!(event = "run.failed", error = %format!("{e:#}"));
    }
    result.map(|_| ())
}

fn load_scoring_config(path: Option<&Path>) -> Result<ScoringConfig> {
    match path {
        Some(p) => ScoringConfig::from_json_file(p)
            .with_context(|| format!("Failed to load scoring weights from {}", p.display())),
        None => Ok(ScoringConfig::default()),
    }
}

fn record_source(cli: &Cli, fetch_config: &FetchConfig) -> Result<Box<dyn RecordSource>> {
    match &cli.input {
        Some(path) => Ok(Box::new(FileSource::new(path))),
        None => Ok(Box::new(
            HttpSource::new(fetch_config).context("Failed to build HTTP client")?,
        )),
    }
}

/// Fetch, score and export. Nothing is written unless scoring succeeds.
async fn run(cli: &Cli) -> Result<Vec<PathBuf>> {
    let started = Instant::now();
    let config = load_scoring_config(cli.weights.as_deref())?;

    let mut fetch_config = FetchConfig::from_env();
    if let Some(endpoint) = &cli.endpoint {
        fetch_config = fetch_config.with_endpoint(endpoint);
    }
    let source = record_source(cli, &fetch_config)?;

    let info = RunInfo::new(source.describe());
    let run_id = info.run_id.to_string();
    let _span = RunSpan::enter(&run_id);
    obs::emit_run_started(&run_id, &info.source);

    let fetched = fetch_with_retry(&fetch_config, source.as_ref())
        .await
        .context("Failed to fetch leaderboard payload")?;

    let as_of = cli.as_of.unwrap_or_else(Utc::now);
    let outcome = match run_pipeline(&fetched.bytes, &KnowledgeBase::new(), &config, as_of) {
        Ok(outcome) => outcome,
        Err(e) => {
            obs::emit_run_finished(&run_id, elapsed_ms(started), 0, false);
            return Err(e).context("Scoring failed; no artifacts written");
        }
    };

    let info = info.with_digest(outcome.payload_digest.clone());
    let doc =
        LeaderboardDocument::build(&outcome.registry, outcome.summary, &info, &config.ecosystem);
    let paths = ExportPaths {
        data_dir: cli.data_dir.clone(),
        output_dir: cli.output_dir.clone(),
    };
    let written = export_all(&outcome.registry, &doc, &paths, cli.limit)?;

    obs::emit_run_finished(&run_id, elapsed_ms(started), outcome.registry.len(), true);
    info!(
        models = outcome.registry.len(),
        files = written.len(),
        "leaderboard exported"
    );
    println!(
        "Ranked {} models ({} malformed, {} duplicates, {} unscored)",
        outcome.summary.admitted,
        outcome.summary.ingest.malformed,
        outcome.summary.ingest.duplicates,
        outcome.summary.unscored
    );
    for path in &written {
        println!("  wrote {}", path.display());
    }
    Ok(written)
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
