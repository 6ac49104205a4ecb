//! Batch import of encounter records from `;`-delimited files
//!
//! - [`date`]: multi-format date resolution
//! - [`parser`]: line to [`Record`](encounters_common::Record) conversion
//! - [`runner`]: streaming driver that feeds parsed records into a store

pub mod date;
pub mod parser;
pub mod runner;

pub use parser::{ParsedLine, RecordParser, SkipReason};
pub use runner::{IngestError, IngestionRunner, IngestionSummary};
