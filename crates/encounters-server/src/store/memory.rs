//! In-memory record store
//!
//! Mirrors the PostgreSQL store's observable behavior: ids are assigned
//! sequentially from 1, never reused, and listing is ordered by id.

use async_trait::async_trait;
use encounters_common::{Record, RecordId};
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use super::{RecordStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct State {
    rows: BTreeMap<RecordId, Record>,
    last_id: RecordId,
}

/// Process-local [`RecordStore`]
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    state: Mutex<State>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows
    pub async fn len(&self) -> usize {
        self.state.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert(&self, record: &Record) -> StoreResult<RecordId> {
        if let Some(id) = record.id {
            return Err(StoreError::IdAlreadyAssigned(id));
        }

        let mut state = self.state.lock().await;
        let id = state
            .last_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted)?;
        state.last_id = id;
        state.rows.insert(id, record.with_id(id));
        Ok(id)
    }

    async fn fetch_by_id(&self, id: RecordId) -> StoreResult<Option<Record>> {
        Ok(self.state.lock().await.rows.get(&id).cloned())
    }

    async fn exists(&self, id: RecordId) -> StoreResult<bool> {
        Ok(self.state.lock().await.rows.contains_key(&id))
    }

    async fn update(&self, record: &Record) -> StoreResult<()> {
        let id = record.id.ok_or(StoreError::MissingId)?;

        let mut state = self.state.lock().await;
        if let Some(row) = state.rows.get_mut(&id) {
            *row = record.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> StoreResult<()> {
        self.state.lock().await.rows.remove(&id);
        Ok(())
    }

    async fn list(&self, offset: i64, limit: i64) -> StoreResult<Vec<Record>> {
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(self
            .state
            .lock()
            .await
            .rows
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
