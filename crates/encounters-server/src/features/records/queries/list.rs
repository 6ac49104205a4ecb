use encounters_common::Record;
use serde::{Deserialize, Serialize};

use crate::features::shared::pagination::{OffsetParams, PageWindow, PaginationError};
use crate::store::{RecordStore, StoreError};

/// Query for a page of records ordered by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRecordsQuery {
    #[serde(flatten)]
    pub pagination: OffsetParams,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListRecordsResponse {
    pub items: Vec<Record>,
    pub window: PageWindow,
}

#[derive(Debug, thiserror::Error)]
pub enum ListRecordsError {
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn RecordStore,
    query: ListRecordsQuery,
) -> Result<ListRecordsResponse, ListRecordsError> {
    let window = query.pagination.window()?;
    let items = store.list(window.offset, window.limit).await?;

    Ok(ListRecordsResponse { items, window })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryRecordStore;

    #[tokio::test]
    async fn test_list_never_exceeds_limit() {
        let store = InMemoryRecordStore::new();
        for i in 0..15 {
            store
                .insert(&Record::builder(format!("subject {i}"), i).build())
                .await
                .unwrap();
        }

        let response = handle(&store, ListRecordsQuery::default()).await.unwrap();
        assert_eq!(response.items.len(), 10);
        assert_eq!(response.items[0].id, Some(1));

        let query = ListRecordsQuery {
            pagination: OffsetParams::new(Some("12"), Some("10")),
        };
        let response = handle(&store, query).await.unwrap();
        let ids: Vec<_> = response.items.iter().filter_map(|r| r.id).collect();
        assert_eq!(ids, vec![13, 14, 15]);
    }
}
