//! Offset/limit pagination for list queries

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::validation::{parse_optional_integer, IntegerParamError};

/// Offset used when none is supplied
pub const DEFAULT_OFFSET: i64 = 0;

/// Page size used when none is supplied
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page a caller may request
pub const MAX_LIMIT: i64 = 10;

/// Raw pagination query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OffsetParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

/// Validated result window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error(transparent)]
    NotANumber(#[from] IntegerParamError),

    #[error("offset cannot be less than 0")]
    NegativeOffset,

    #[error("limit cannot be larger than {}", MAX_LIMIT)]
    LimitTooLarge,

    #[error("limit cannot be less than 0")]
    NegativeLimit,
}

impl OffsetParams {
    pub fn new(offset: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            offset: offset.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    /// Validate and apply defaults
    ///
    /// Checks run in order: offset format, offset sign, limit format, limit
    /// upper bound, limit sign.
    pub fn window(&self) -> Result<PageWindow, PaginationError> {
        let offset =
            parse_optional_integer(self.offset.as_deref(), "offset")?.unwrap_or(DEFAULT_OFFSET);
        if offset < 0 {
            return Err(PaginationError::NegativeOffset);
        }

        let limit =
            parse_optional_integer(self.limit.as_deref(), "limit")?.unwrap_or(DEFAULT_LIMIT);
        if limit > MAX_LIMIT {
            return Err(PaginationError::LimitTooLarge);
        }
        if limit < 0 {
            return Err(PaginationError::NegativeLimit);
        }

        Ok(PageWindow { offset, limit })
    }
}
