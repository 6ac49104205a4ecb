//! Record persistence
//!
//! [`RecordStore`] is the data-access contract shared by the batch importer and
//! the online API. Every operation is a single statement against the backing
//! store: a call either fully succeeds or fails, with no partial reads or
//! writes.
//!
//! - [`PgRecordStore`]: PostgreSQL implementation used in production
//! - [`InMemoryRecordStore`]: process-local implementation used by tests
//!
//! Existence is not checked inside [`RecordStore::update`]; callers that need
//! "update only if present" semantics probe with [`RecordStore::exists`]
//! first. The probe and the write are separate statements, so a concurrent
//! delete between them is not detected.

use async_trait::async_trait;
use encounters_common::{Record, RecordId};
use std::sync::Arc;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRecordStore;
pub use postgres::PgRecordStore;

/// Store handle shared across request handlers and the ingestion runner
pub type SharedStore = Arc<dyn RecordStore>;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Infrastructure failures raised by a [`RecordStore`]
///
/// A missing row is never an error; lookups report it as `None`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Expected {expected} affected row(s), got {actual}")]
    UnexpectedRowCount { expected: u64, actual: u64 },

    #[error("Record already carries id {0}; only new records can be inserted")]
    IdAlreadyAssigned(RecordId),

    #[error("Record has no id; only persisted records can be updated")]
    MissingId,

    #[error("No record ids left to assign")]
    IdsExhausted,
}

/// Data-access contract for encounter records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new record and return its store-assigned id
    ///
    /// # Errors
    ///
    /// - `IdAlreadyAssigned` if the record already has an id
    /// - `UnexpectedRowCount` if the write did not affect exactly one row
    async fn insert(&self, record: &Record) -> StoreResult<RecordId>;

    /// Fetch a record by id, `None` when no row matches
    async fn fetch_by_id(&self, id: RecordId) -> StoreResult<Option<Record>>;

    /// Whether a row with this id exists
    async fn exists(&self, id: RecordId) -> StoreResult<bool>;

    /// Replace every mutable field of the row identified by `record.id`
    ///
    /// Updating an id with no row is a silent no-op.
    ///
    /// # Errors
    ///
    /// - `MissingId` if the record has no id
    async fn update(&self, record: &Record) -> StoreResult<()>;

    /// Delete a record by id; deleting a missing id succeeds silently
    async fn delete(&self, id: RecordId) -> StoreResult<()>;

    /// Page through records ordered by id ascending
    ///
    /// `offset` and `limit` are validated by the caller.
    async fn list(&self, offset: i64, limit: i64) -> StoreResult<Vec<Record>>;

    /// Cheap connectivity probe for health checks
    async fn ping(&self) -> StoreResult<()>;
}
