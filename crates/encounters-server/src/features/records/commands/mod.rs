pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateRecordCommand, CreateRecordError};
pub use delete::{DeleteRecordCommand, DeleteRecordError};
pub use update::{UpdateRecordCommand, UpdateRecordError};
