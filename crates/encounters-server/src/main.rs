//! Encounter records server - main entry point

use anyhow::Result;
use encounters_common::logging::{init_logging, LogConfig};
use std::sync::Arc;
use tracing::info;

use encounters_server::{api, config::Config, store::PgRecordStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment variables take precedence over these defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("encounters-server")
        .filter_directives("encounters_server=debug,tower_http=debug,sqlx=warn")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    info!("Starting encounter records server");

    let config = Config::load()?;

    let store = PgRecordStore::connect(&config.database).await?;
    info!("Database connection pool established");

    api::serve(config, Arc::new(store)).await
}
