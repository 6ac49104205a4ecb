//! API response envelopes
//!
//! Success: `{"success": true, "data": ..., "meta": {...}}` (`meta` optional).
//! Failure: `{"success": false, "error": {"code": "...", "message": "..."}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Standard success response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
        }
    }

    pub fn success_with_meta(data: T, meta: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            meta: Some(meta),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Standard error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_keeps_null_data() {
        let value = serde_json::to_value(ApiResponse::success(None::<i32>)).unwrap();
        assert_eq!(value, json!({"success": true, "data": null}));
    }

    #[test]
    fn test_success_with_meta() {
        let value =
            serde_json::to_value(ApiResponse::success_with_meta(vec![1], json!({"count": 1})))
                .unwrap();
        assert_eq!(value["meta"]["count"], 1);
    }

    #[test]
    fn test_error_envelope() {
        let value =
            serde_json::to_value(ErrorResponse::new("NOT_FOUND", "Record with id 3 not found"))
                .unwrap();
        assert_eq!(
            value,
            json!({
                "success": false,
                "error": {"code": "NOT_FOUND", "message": "Record with id 3 not found"}
            })
        );
    }
}
