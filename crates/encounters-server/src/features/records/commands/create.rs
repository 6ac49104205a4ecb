//! Create record command

use encounters_common::Record;

use crate::features::records::types::RecordPayload;
use crate::features::shared::validation::{decode_json_body, BodyError, RequiredFieldError};
use crate::store::{RecordStore, StoreError};

/// Command to persist a new record
///
/// Any `id` in the payload is ignored; the store assigns one.
#[derive(Debug, Clone)]
pub struct CreateRecordCommand {
    pub payload: RecordPayload,
}

/// Errors that can occur when creating a record
#[derive(Debug, thiserror::Error)]
pub enum CreateRecordError {
    #[error(transparent)]
    Body(#[from] BodyError),

    #[error(transparent)]
    Validation(#[from] RequiredFieldError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl CreateRecordCommand {
    /// Decode a command from a raw request body
    pub fn from_body(body: &[u8]) -> Result<Self, CreateRecordError> {
        Ok(Self {
            payload: decode_json_body(body)?,
        })
    }

    /// Check required fields and produce the record to insert
    pub fn validate(&self) -> Result<Record, CreateRecordError> {
        Ok(self.payload.to_candidate()?)
    }
}

/// Insert the record, then read it back
///
/// Returns `None` if the row disappeared between the insert and the re-read.
#[tracing::instrument(skip(store, command))]
pub async fn handle(
    store: &dyn RecordStore,
    command: CreateRecordCommand,
) -> Result<Option<Record>, CreateRecordError> {
    let candidate = command.validate()?;

    let id = store.insert(&candidate).await?;
    tracing::info!(id, "Record created");

    Ok(store.fetch_by_id(id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryRecordStore;

    #[tokio::test]
    async fn test_create_assigns_id() {
        let store = InMemoryRecordStore::new();
        let command =
            CreateRecordCommand::from_body(br#"{"id": 99, "subject_name": "jane", "provider_identifier": 2}"#)
                .unwrap();

        let created = handle(&store, command).await.unwrap().unwrap();

        assert_eq!(created.id, Some(1));
        assert_eq!(created.subject_name, "jane");
    }

    #[tokio::test]
    async fn test_create_rejects_missing_subject() {
        let store = InMemoryRecordStore::new();
        let command = CreateRecordCommand::from_body(br#"{"provider_identifier": 2}"#).unwrap();

        let result = handle(&store, command).await;

        assert!(matches!(result, Err(CreateRecordError::Validation(_))));
        assert!(store.is_empty().await);
    }

    #[test]
    fn test_from_body_rejects_empty_body() {
        assert!(matches!(
            CreateRecordCommand::from_body(b""),
            Err(CreateRecordError::Body(BodyError::Empty))
        ));
    }
}
