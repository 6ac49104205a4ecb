//! Encounter records server library
//!
//! Stores clinical encounter records in PostgreSQL and exposes them two ways:
//!
//! - **Batch import**: `;`-delimited files streamed through [`ingest`] into the
//!   store (see the `encounters-ingest` binary)
//! - **HTTP API**: CRUD and listing under `/api/v1` (see [`features`])
//!
//! # Architecture
//!
//! Both paths share the [`store::RecordStore`] contract. Write operations are
//! modelled as commands and read operations as queries, one vertical slice
//! per feature, each with its own error enum mapped onto the JSON envelope in
//! [`api::response`].
//!
//! # Example
//!
//! ```no_run
//! use encounters_server::{api, config::Config, store::PgRecordStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let store = PgRecordStore::connect(&config.database).await?;
//!     api::serve(config, Arc::new(store)).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod features;
pub mod ingest;
pub mod middleware;
pub mod store;

pub use store::{RecordStore, SharedStore, StoreError};
