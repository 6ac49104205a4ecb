//! Delete record command

use encounters_common::RecordId;
use serde::{Deserialize, Serialize};

use crate::features::shared::validation::{parse_id, IntegerParamError};
use crate::store::{RecordStore, StoreError};

/// Command to delete a record by id, taken from the `id` query parameter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteRecordCommand {
    pub id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteRecordError {
    #[error(transparent)]
    Id(#[from] IntegerParamError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl DeleteRecordCommand {
    pub fn validate(&self) -> Result<RecordId, DeleteRecordError> {
        Ok(parse_id(self.id.as_deref(), "id")?)
    }
}

/// Delete the record; a missing row is not an error
#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn RecordStore,
    command: DeleteRecordCommand,
) -> Result<(), DeleteRecordError> {
    let id = command.validate()?;

    store.delete(id).await?;
    tracing::info!(id, "Record deleted");

    Ok(())
}
