//! Shared utilities for feature modules
//!
//! - **pagination**: offset/limit parameters and bounds
//! - **validation**: query value, body and required-field checks

pub mod pagination;
pub mod validation;

pub use pagination::{OffsetParams, PageWindow, PaginationError};
pub use validation::{BodyError, IntegerParamError, RequiredFieldError};
