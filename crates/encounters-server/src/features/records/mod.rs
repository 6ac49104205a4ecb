//! Encounter record CRUD

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{
    CreateRecordCommand, CreateRecordError, DeleteRecordCommand, DeleteRecordError,
    UpdateRecordCommand, UpdateRecordError,
};
pub use queries::{
    GetRecordError, GetRecordQuery, ListRecordsError, ListRecordsQuery, ListRecordsResponse,
};
pub use routes::records_routes;
pub use types::RecordPayload;
