//! leadhub-li (Lead Importer) - Bulk lead-import pipeline for LeadHub
//!
//! Reads a lead batch from a CSV file, normalizes and imports it into the
//! LeadHub database in chunks, and writes the validation-log and
//! normalized-payload report artifacts next to the database.

use anyhow::{Context, Result};
use clap::Parser;
use leadhub_common::db::init::init_database;
use leadhub_li::config::ImporterConfig;
use leadhub_li::csv_input::read_raw_leads_from_path;
use leadhub_li::pipeline::{run_import, ImportOptions};
use leadhub_li::store::SqliteStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Command-line arguments for leadhub-li
#[derive(Parser, Debug)]
#[command(name = "leadhub-li")]
#[command(about = "Bulk lead importer for LeadHub")]
#[command(version)]
struct Args {
    /// CSV file containing the lead batch
    file: PathBuf,

    /// Validate and classify without writing to the database
    #[arg(long)]
    dry_run: bool,

    /// Rows per processing chunk
    #[arg(long, env = "LEADHUB_CHUNK_SIZE")]
    chunk_size: Option<usize>,

    /// SQLite database path
    #[arg(short, long, env = "LEADHUB_DATABASE")]
    database: Option<PathBuf>,

    /// Directory receiving the report artifacts
    #[arg(long, env = "LEADHUB_REPORT_DIR")]
    report_dir: Option<PathBuf>,

    /// Config file path (leadhub.toml in the working directory when omitted)
    #[arg(short, long, env = "LEADHUB_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting LeadHub Lead Importer (leadhub-li) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Parse command-line arguments
    let args = Args::parse();

    // CLI and environment override the config file, the file overrides
    // compiled defaults
    let mut config =
        ImporterConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(chunk_size) = args.chunk_size {
        config.chunk_size = chunk_size;
    }
    if let Some(database) = args.database {
        config.database = database;
    }
    if let Some(report_dir) = args.report_dir {
        config.report_dir = report_dir;
    }

    info!("Database path: {}", config.database.display());

    let pool = init_database(&config.database)
        .await
        .context("Failed to initialize database")?;
    let store = Arc::new(SqliteStore::new(pool));

    let raw_leads = read_raw_leads_from_path(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    info!(
        "Read {} lead rows from {}",
        raw_leads.len(),
        args.file.display()
    );

    let options = ImportOptions {
        dry_run: args.dry_run,
        chunk_size: config.chunk_size,
        assignment: config.assignment.clone(),
    };
    let outcome = run_import(store, raw_leads, options)
        .await
        .context("Import failed")?;

    std::fs::create_dir_all(&config.report_dir)
        .with_context(|| format!("Cannot create {}", config.report_dir.display()))?;
    let validation_path = config.report_dir.join("validation-log.csv");
    let payload_path = config.report_dir.join("normalized-payload.jsonl");
    std::fs::write(&validation_path, &outcome.downloadable_reports.validation_log)?;
    std::fs::write(&payload_path, &outcome.downloadable_reports.normalized_payload)?;

    info!("Validation log: {}", validation_path.display());
    info!("Normalized payload: {}", payload_path.display());
    info!("Import complete: {}", outcome.batch_summary.display_string());

    if args.dry_run {
        info!("Dry run: no leads were written to the database");
    }

    Ok(())
}
