//! PostgreSQL record store
//!
//! Queries are built at runtime with `query_as`/`query_scalar` so the crate
//! compiles without a live database or an offline query cache.

use async_trait::async_trait;
use chrono::NaiveDate;
use encounters_common::{Record, RecordId};
use sqlx::{FromRow, PgPool};

use super::{RecordStore, StoreError, StoreResult};
use crate::db::{self, DbConfig, DbResult};

const SELECT_RECORD: &str = r#"
    SELECT id, subject_name, date_of_birth, encounter_date, provider,
           encounter_note, chief_complaint, provider_identifier
    FROM encounter_records
"#;

/// Row shape of `encounter_records`
#[derive(Debug, FromRow)]
struct RecordRow {
    id: i32,
    subject_name: String,
    date_of_birth: Option<NaiveDate>,
    encounter_date: Option<NaiveDate>,
    provider: Option<String>,
    encounter_note: Option<String>,
    chief_complaint: Option<String>,
    provider_identifier: i32,
}

impl From<RecordRow> for Record {
    fn from(row: RecordRow) -> Self {
        Record {
            id: Some(row.id),
            subject_name: row.subject_name,
            date_of_birth: row.date_of_birth,
            encounter_date: row.encounter_date,
            provider: row.provider,
            encounter_note: row.encounter_note,
            chief_complaint: row.chief_complaint,
            provider_identifier: row.provider_identifier,
        }
    }
}

/// [`RecordStore`] backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from configuration and wrap it
    pub async fn connect(config: &DbConfig) -> DbResult<Self> {
        Ok(Self::new(db::create_pool(config).await?))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    #[tracing::instrument(skip(self, record), fields(subject_name = %record.subject_name))]
    async fn insert(&self, record: &Record) -> StoreResult<RecordId> {
        if let Some(id) = record.id {
            return Err(StoreError::IdAlreadyAssigned(id));
        }

        let ids: Vec<RecordId> = sqlx::query_scalar(
            r#"
            INSERT INTO encounter_records
                (subject_name, date_of_birth, encounter_date, provider,
                 encounter_note, chief_complaint, provider_identifier)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&record.subject_name)
        .bind(record.date_of_birth)
        .bind(record.encounter_date)
        .bind(&record.provider)
        .bind(&record.encounter_note)
        .bind(&record.chief_complaint)
        .bind(record.provider_identifier)
        .fetch_all(&self.pool)
        .await?;

        match ids.as_slice() {
            [id] => Ok(*id),
            other => Err(StoreError::UnexpectedRowCount {
                expected: 1,
                actual: other.len() as u64,
            }),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_by_id(&self, id: RecordId) -> StoreResult<Option<Record>> {
        let row = sqlx::query_as::<_, RecordRow>(&format!("{SELECT_RECORD} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Record::from))
    }

    #[tracing::instrument(skip(self))]
    async fn exists(&self, id: RecordId) -> StoreResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM encounter_records WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    #[tracing::instrument(skip(self, record), fields(id = ?record.id))]
    async fn update(&self, record: &Record) -> StoreResult<()> {
        let id = record.id.ok_or(StoreError::MissingId)?;

        let result = sqlx::query(
            r#"
            UPDATE encounter_records
            SET subject_name = $1,
                date_of_birth = $2,
                encounter_date = $3,
                provider = $4,
                encounter_note = $5,
                chief_complaint = $6,
                provider_identifier = $7
            WHERE id = $8
            "#,
        )
        .bind(&record.subject_name)
        .bind(record.date_of_birth)
        .bind(record.encounter_date)
        .bind(&record.provider)
        .bind(&record.encounter_note)
        .bind(&record.chief_complaint)
        .bind(record.provider_identifier)
        .bind(id)
        .execute(&self.pool)
        .await?;

        tracing::debug!(rows_affected = result.rows_affected(), "Record update executed");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM encounter_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(rows_affected = result.rows_affected(), "Record delete executed");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, offset: i64, limit: i64) -> StoreResult<Vec<Record>> {
        let rows = sqlx::query_as::<_, RecordRow>(&format!(
            "{SELECT_RECORD} ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Record::from).collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
