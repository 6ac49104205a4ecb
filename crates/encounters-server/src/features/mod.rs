//! Feature slices of the encounters API
//!
//! Each feature is a vertical slice:
//! - `commands/` - write operations (create, update, delete)
//! - `queries/` - read operations (get, list)
//! - `routes.rs` - HTTP handlers and error mapping
//!
//! # Features
//!
//! - **records**: encounter record CRUD and listing

pub mod records;
pub mod shared;

use axum::Router;

use crate::store::SharedStore;

/// Mount every feature router, resolved against the shared store
pub fn router(store: SharedStore) -> Router<()> {
    Router::new().merge(records::records_routes().with_state(store))
}
