//! Update record command
//!
//! The existence probe and the write are separate store calls. A delete that
//! lands between them turns the write into a no-op and the re-read reports
//! no record.

use encounters_common::{Record, RecordId};

use crate::features::records::types::RecordPayload;
use crate::features::shared::validation::{
    decode_json_body, require, BodyError, RequiredFieldError,
};
use crate::store::{RecordStore, StoreError};

/// Command to replace every mutable field of an existing record
#[derive(Debug, Clone)]
pub struct UpdateRecordCommand {
    pub payload: RecordPayload,
}

/// Errors that can occur when updating a record
#[derive(Debug, thiserror::Error)]
pub enum UpdateRecordError {
    #[error(transparent)]
    Body(#[from] BodyError),

    #[error(transparent)]
    Validation(#[from] RequiredFieldError),

    #[error("Record with id {0} not found")]
    NotFound(RecordId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl UpdateRecordCommand {
    pub fn from_body(body: &[u8]) -> Result<Self, UpdateRecordError> {
        Ok(Self {
            payload: decode_json_body(body)?,
        })
    }

    /// Check required fields, then the id
    pub fn validate(&self) -> Result<Record, UpdateRecordError> {
        let candidate = self.payload.to_candidate()?;
        let id = require(self.payload.id, "id")?;
        Ok(candidate.with_id(id))
    }
}

/// Replace the record if it exists, then read it back
#[tracing::instrument(skip(store, command), fields(id = ?command.payload.id))]
pub async fn handle(
    store: &dyn RecordStore,
    command: UpdateRecordCommand,
) -> Result<Option<Record>, UpdateRecordError> {
    let record = command.validate()?;
    let id = record.id.ok_or(StoreError::MissingId)?;

    if !store.exists(id).await? {
        return Err(UpdateRecordError::NotFound(id));
    }

    store.update(&record).await?;
    tracing::info!(id, "Record updated");

    Ok(store.fetch_by_id(id).await?)
}
