//! PostgreSQL store tests
//!
//! Each test gets a fresh database with the workspace migrations applied.
//! Run with `DATABASE_URL` set and `--ignored`.

use chrono::NaiveDate;
use encounters_common::Record;
use encounters_server::store::{PgRecordStore, RecordStore, StoreError};
use sqlx::PgPool;

fn sample(name: &str) -> Record {
    Record::builder(name, 5)
        .date_of_birth(NaiveDate::from_ymd_opt(1940, 1, 9))
        .encounter_date(NaiveDate::from_ymd_opt(2019, 10, 4))
        .provider(Some("Dr. Charles Wilson".to_string()))
        .chief_complaint(Some("headache".to_string()))
        .build()
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_insert_and_fetch(pool: PgPool) {
    let store = PgRecordStore::new(pool);

    let id = store.insert(&sample("john smith")).await.unwrap();
    let fetched = store.fetch_by_id(id).await.unwrap().unwrap();

    assert_eq!(fetched, sample("john smith").with_id(id));
    assert!(store.exists(id).await.unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_insert_rejects_persisted_record(pool: PgPool) {
    let store = PgRecordStore::new(pool);

    let result = store.insert(&sample("john smith").with_id(3)).await;

    assert!(matches!(result, Err(StoreError::IdAlreadyAssigned(3))));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_fetch_missing(pool: PgPool) {
    let store = PgRecordStore::new(pool);

    assert!(store.fetch_by_id(12345).await.unwrap().is_none());
    assert!(!store.exists(12345).await.unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_update_replaces_fields(pool: PgPool) {
    let store = PgRecordStore::new(pool);
    let id = store.insert(&sample("john smith")).await.unwrap();

    let replacement = Record::builder("john q. smith", 8).id(Some(id)).build();
    store.update(&replacement).await.unwrap();

    assert_eq!(store.fetch_by_id(id).await.unwrap(), Some(replacement));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_update_and_delete_missing_rows_are_silent(pool: PgPool) {
    let store = PgRecordStore::new(pool);

    store
        .update(&sample("ghost").with_id(999))
        .await
        .unwrap();
    store.delete(999).await.unwrap();

    assert!(matches!(
        store.update(&sample("no id")).await,
        Err(StoreError::MissingId)
    ));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_list_is_ordered_and_windowed(pool: PgPool) {
    let store = PgRecordStore::new(pool);
    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(store.insert(&sample(&format!("subject {i}"))).await.unwrap());
    }

    let page = store.list(1, 3).await.unwrap();
    let page_ids: Vec<_> = page.iter().filter_map(|r| r.id).collect();

    assert_eq!(page_ids, ids[1..4].to_vec());
    assert!(store.list(5, 10).await.unwrap().is_empty());
    store.ping().await.unwrap();
}
