use encounters_common::Record;
use serde::{Deserialize, Serialize};

use crate::features::shared::validation::{parse_id, IntegerParamError};
use crate::store::{RecordStore, StoreError};

/// Query for a single record, taken from the `id` query parameter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetRecordQuery {
    pub id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetRecordError {
    #[error(transparent)]
    Id(#[from] IntegerParamError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Fetch a record; `None` when no row has this id
#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn RecordStore,
    query: GetRecordQuery,
) -> Result<Option<Record>, GetRecordError> {
    let id = parse_id(query.id.as_deref(), "id")?;
    Ok(store.fetch_by_id(id).await?)
}
