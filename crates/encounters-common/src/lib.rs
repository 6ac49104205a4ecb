//! Encounters Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types and logging setup for the encounter records workspace.
//!
//! # Overview
//!
//! - **Types**: the [`Record`](types::Record) value type shared by the batch
//!   importer and the online API
//! - **Logging**: environment-driven `tracing` subscriber initialization
//!
//! # Example
//!
//! ```
//! use encounters_common::types::Record;
//!
//! let record = Record::builder("john smith", 5)
//!     .provider(Some("Dr. Charles Wilson".to_string()))
//!     .build();
//! assert!(record.id.is_none());
//! ```

pub mod logging;
pub mod types;

pub use types::{Record, RecordBuilder, RecordId};
