//! Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use encounters_common::{Record, RecordId};
use encounters_server::{
    api,
    config::{Config, CorsConfig, ServerConfig},
    db::DbConfig,
    store::{InMemoryRecordStore, RecordStore, SharedStore, StoreError, StoreResult},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub fn test_config() -> Config {
    Config {
        server: ServerConfig::default(),
        database: DbConfig::default(),
        cors: CorsConfig::default(),
    }
}

/// Full application router over a fresh in-memory store
pub fn setup_test_app() -> (Router, Arc<InMemoryRecordStore>) {
    let store = Arc::new(InMemoryRecordStore::new());
    let app = api::create_router(store.clone(), &test_config());
    (app, store)
}

/// Application router over an arbitrary store
pub fn app_with_store(store: SharedStore) -> Router {
    api::create_router(store, &test_config())
}

/// Send one request and decode the JSON body (`Value::Null` when empty)
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Store whose every operation fails
pub struct FailingStore;

fn failure() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl RecordStore for FailingStore {
    async fn insert(&self, _record: &Record) -> StoreResult<RecordId> {
        Err(failure())
    }

    async fn fetch_by_id(&self, _id: RecordId) -> StoreResult<Option<Record>> {
        Err(failure())
    }

    async fn exists(&self, _id: RecordId) -> StoreResult<bool> {
        Err(failure())
    }

    async fn update(&self, _record: &Record) -> StoreResult<()> {
        Err(failure())
    }

    async fn delete(&self, _id: RecordId) -> StoreResult<()> {
        Err(failure())
    }

    async fn list(&self, _offset: i64, _limit: i64) -> StoreResult<Vec<Record>> {
        Err(failure())
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(failure())
    }
}

/// Store that accepts `fail_after` inserts and then fails
pub struct FlakyStore {
    inner: InMemoryRecordStore,
    fail_after: usize,
    inserted: tokio::sync::Mutex<usize>,
}

impl FlakyStore {
    pub fn new(fail_after: usize) -> Self {
        Self {
            inner: InMemoryRecordStore::new(),
            fail_after,
            inserted: tokio::sync::Mutex::new(0),
        }
    }

    pub async fn stored(&self) -> usize {
        self.inner.len().await
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn insert(&self, record: &Record) -> StoreResult<RecordId> {
        let mut inserted = self.inserted.lock().await;
        if *inserted >= self.fail_after {
            return Err(failure());
        }
        *inserted += 1;
        self.inner.insert(record).await
    }

    async fn fetch_by_id(&self, id: RecordId) -> StoreResult<Option<Record>> {
        self.inner.fetch_by_id(id).await
    }

    async fn exists(&self, id: RecordId) -> StoreResult<bool> {
        self.inner.exists(id).await
    }

    async fn update(&self, record: &Record) -> StoreResult<()> {
        self.inner.update(record).await
    }

    async fn delete(&self, id: RecordId) -> StoreResult<()> {
        self.inner.delete(id).await
    }

    async fn list(&self, offset: i64, limit: i64) -> StoreResult<Vec<Record>> {
        self.inner.list(offset, limit).await
    }

    async fn ping(&self) -> StoreResult<()> {
        self.inner.ping().await
    }
}
