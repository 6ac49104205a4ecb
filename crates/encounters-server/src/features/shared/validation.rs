//! Shared request validation
//!
//! Request inputs arrive as raw text (query values, request bodies) so that
//! every rejection is reported through the API error envelope rather than a
//! framework extractor rejection.

use encounters_common::RecordId;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// A required field was absent
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequiredFieldError {
    #[error("{field} is required")]
    Missing { field: &'static str },
}

/// An integer query parameter was absent or malformed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntegerParamError {
    #[error("{param} is not provided")]
    Missing { param: &'static str },

    #[error("{param} '{value}' is not a valid number")]
    Invalid { param: &'static str, value: String },
}

/// A request body could not be decoded
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BodyError {
    #[error("No request body provided")]
    Empty,

    #[error("Request body is not valid JSON: {0}")]
    InvalidJson(String),
}

/// Unwrap a required value, naming the field when absent
pub fn require<T>(value: Option<T>, field: &'static str) -> Result<T, RequiredFieldError> {
    value.ok_or(RequiredFieldError::Missing { field })
}

/// Parse an optional integer query value
///
/// Returns `Ok(None)` when the parameter was not supplied at all. A supplied
/// but empty value is malformed.
pub fn parse_optional_integer<T>(
    raw: Option<&str>,
    param: &'static str,
) -> Result<Option<T>, IntegerParamError>
where
    T: std::str::FromStr,
{
    raw.map(|value| {
        value.parse().map_err(|_| IntegerParamError::Invalid {
            param,
            value: value.to_string(),
        })
    })
    .transpose()
}

/// Parse a mandatory record id query value
pub fn parse_id(raw: Option<&str>, param: &'static str) -> Result<RecordId, IntegerParamError> {
    parse_optional_integer(raw, param)?.ok_or(IntegerParamError::Missing { param })
}

/// Decode a JSON request body
///
/// An empty or whitespace-only body, or a literal `null`, counts as no body.
pub fn decode_json_body<T>(body: &[u8]) -> Result<T, BodyError>
where
    T: DeserializeOwned,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(BodyError::Empty);
    }

    serde_json::from_slice::<Option<T>>(body)
        .map_err(|e| BodyError::InvalidJson(e.to_string()))?
        .ok_or(BodyError::Empty)
}
