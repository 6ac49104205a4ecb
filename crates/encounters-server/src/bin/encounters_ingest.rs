//! Encounter record importer
//!
//! Streams a `;`-delimited file into the database. The first line is a header
//! and is skipped; malformed lines are logged and skipped.
//!
//! Usage:
//!   DATABASE_URL=postgres://... encounters-ingest records.csv

use anyhow::{Context, Result};
use clap::Parser;
use encounters_common::logging::{init_logging, LogConfig, LogLevel};
use std::{path::PathBuf, sync::Arc};
use tracing::info;

use encounters_server::{db::DbConfig, ingest::IngestionRunner, store::PgRecordStore};

#[derive(Parser, Debug)]
#[command(name = "encounters-ingest")]
#[command(author, version, about = "Import encounter records from a delimited file", long_about = None)]
struct Cli {
    /// Path to the `;`-delimited input file
    #[arg(value_parser = parse_input_path)]
    csv_file: PathBuf,

    /// Log every inserted record
    #[arg(short, long)]
    verbose: bool,
}

fn parse_input_path(raw: &str) -> Result<PathBuf, String> {
    if raw.trim().is_empty() {
        return Err("input file path cannot be blank".to_string());
    }
    Ok(PathBuf::from(raw))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let log_config = LogConfig::builder()
        .level(level)
        .log_file_prefix("encounters-ingest")
        .filter_directives("sqlx=warn")
        .build()
        .merge_env()?;
    let _guard = init_logging(&log_config)?;

    let db_config = DbConfig::from_env()?;
    let store = PgRecordStore::connect(&db_config)
        .await
        .context("Failed to connect to the database")?;

    info!(file = %cli.csv_file.display(), "Starting import");

    let start = std::time::Instant::now();
    let summary = IngestionRunner::new(Arc::new(store))
        .run_file(&cli.csv_file)
        .await?;

    info!(
        lines_read = summary.lines_read,
        inserted = summary.inserted,
        skipped = summary.skipped,
        duration_secs = format!("{:.1}", start.elapsed().as_secs_f64()),
        "Import complete"
    );

    Ok(())
}
