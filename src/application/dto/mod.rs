//! Data transfer objects for the application layer.

mod sync_dto;

pub use sync_dto::{FailureNotice, FailurePolicy, Operation};
