//! Record API routes
//!
//! - `GET /api/v1/record?id=` - Read one record
//! - `POST /api/v1/record` - Create a record
//! - `PUT /api/v1/record` - Replace an existing record (id in the body)
//! - `DELETE /api/v1/record?id=` - Delete a record
//! - `GET /api/v1/records?offset=&limit=` - List records ordered by id
//!
//! Bodies are taken as raw bytes and query values as strings so that every
//! rejection uses the JSON error envelope.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::{
    commands::{
        CreateRecordCommand, CreateRecordError, DeleteRecordCommand, DeleteRecordError,
        UpdateRecordCommand, UpdateRecordError,
    },
    queries::{GetRecordError, GetRecordQuery, ListRecordsError, ListRecordsQuery},
};
use crate::api::response::{ApiResponse, ErrorResponse};
use crate::store::SharedStore;

// ============================================================================
// Router Configuration
// ============================================================================

pub fn records_routes() -> Router<SharedStore> {
    Router::new()
        .route(
            "/record",
            get(get_record)
                .post(create_record)
                .put(update_record)
                .delete(delete_record),
        )
        .route("/records", get(list_records))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// `POST /api/v1/record`
///
/// - `201 Created` - Record stored; `data` is the persisted record
/// - `400 Bad Request` - Missing body, malformed JSON or missing required field
/// - `500 Internal Server Error` - Store failure
#[tracing::instrument(skip(store, body))]
async fn create_record(
    State(store): State<SharedStore>,
    body: Bytes,
) -> Result<Response, RecordApiError> {
    let command = CreateRecordCommand::from_body(&body)?;
    let record = super::commands::create::handle(store.as_ref(), command).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(record))).into_response())
}

/// `PUT /api/v1/record`
///
/// - `200 OK` - Record replaced; `data` is the stored record
/// - `400 Bad Request` - Missing body, malformed JSON, missing required field or id
/// - `404 Not Found` - No record with this id
/// - `500 Internal Server Error` - Store failure
#[tracing::instrument(skip(store, body))]
async fn update_record(
    State(store): State<SharedStore>,
    body: Bytes,
) -> Result<Response, RecordApiError> {
    let command = UpdateRecordCommand::from_body(&body)?;
    let record = super::commands::update::handle(store.as_ref(), command).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(record))).into_response())
}

/// `DELETE /api/v1/record?id=`
///
/// - `204 No Content` - Deleted, or nothing to delete
/// - `400 Bad Request` - Missing or non-numeric id
/// - `500 Internal Server Error` - Store failure
#[tracing::instrument(skip(store))]
async fn delete_record(
    State(store): State<SharedStore>,
    Query(command): Query<DeleteRecordCommand>,
) -> Result<Response, RecordApiError> {
    super::commands::delete::handle(store.as_ref(), command).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// `GET /api/v1/record?id=`
///
/// - `200 OK` - `data` is the record, or `null` when no record has this id
/// - `400 Bad Request` - Missing or non-numeric id
/// - `500 Internal Server Error` - Store failure
#[tracing::instrument(skip(store))]
async fn get_record(
    State(store): State<SharedStore>,
    Query(query): Query<GetRecordQuery>,
) -> Result<Response, RecordApiError> {
    let record = super::queries::get::handle(store.as_ref(), query).await?;

    tracing::debug!(found = record.is_some(), "Record retrieved via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(record))).into_response())
}

/// `GET /api/v1/records?offset=0&limit=10`
///
/// - `offset` - Rows to skip (default: 0, must not be negative)
/// - `limit` - Rows to return (default: 10, between 0 and 10)
///
/// - `200 OK` - `data` is the page, `meta` echoes the window
/// - `400 Bad Request` - Malformed or out-of-range parameters
/// - `500 Internal Server Error` - Store failure
#[tracing::instrument(skip(store))]
async fn list_records(
    State(store): State<SharedStore>,
    Query(query): Query<ListRecordsQuery>,
) -> Result<Response, RecordApiError> {
    let response = super::queries::list::handle(store.as_ref(), query).await?;

    let meta = json!({
        "offset": response.window.offset,
        "limit": response.window.limit,
        "count": response.items.len(),
    });

    Ok((StatusCode::OK, Json(ApiResponse::success_with_meta(response.items, meta))).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for record API endpoints
#[derive(Debug)]
enum RecordApiError {
    Create(CreateRecordError),
    Update(UpdateRecordError),
    Delete(DeleteRecordError),
    Get(GetRecordError),
    List(ListRecordsError),
}

impl From<CreateRecordError> for RecordApiError {
    fn from(err: CreateRecordError) -> Self {
        Self::Create(err)
    }
}

impl From<UpdateRecordError> for RecordApiError {
    fn from(err: UpdateRecordError) -> Self {
        Self::Update(err)
    }
}

impl From<DeleteRecordError> for RecordApiError {
    fn from(err: DeleteRecordError) -> Self {
        Self::Delete(err)
    }
}

impl From<GetRecordError> for RecordApiError {
    fn from(err: GetRecordError) -> Self {
        Self::Get(err)
    }
}

impl From<ListRecordsError> for RecordApiError {
    fn from(err: ListRecordsError) -> Self {
        Self::List(err)
    }
}

fn validation_error(message: String) -> Response {
    let error = ErrorResponse::new("VALIDATION_ERROR", message);
    (StatusCode::BAD_REQUEST, Json(error)).into_response()
}

fn internal_error(operation: &str, err: &dyn std::error::Error) -> Response {
    tracing::error!(operation, error = %err, "Store error while handling record request");
    let error = ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
}

impl IntoResponse for RecordApiError {
    fn into_response(self) -> Response {
        match self {
            RecordApiError::Create(CreateRecordError::Store(err)) => internal_error("create", &err),
            RecordApiError::Create(err) => validation_error(err.to_string()),

            RecordApiError::Update(UpdateRecordError::NotFound(id)) => {
                let error =
                    ErrorResponse::new("NOT_FOUND", format!("Record with id {} not found", id));
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            RecordApiError::Update(UpdateRecordError::Store(err)) => internal_error("update", &err),
            RecordApiError::Update(err) => validation_error(err.to_string()),

            RecordApiError::Delete(DeleteRecordError::Store(err)) => internal_error("delete", &err),
            RecordApiError::Delete(err) => validation_error(err.to_string()),

            RecordApiError::Get(GetRecordError::Store(err)) => internal_error("get", &err),
            RecordApiError::Get(err) => validation_error(err.to_string()),

            RecordApiError::List(ListRecordsError::Store(err)) => internal_error("list", &err),
            RecordApiError::List(err) => validation_error(err.to_string()),
        }
    }
}
