//! Application layer with the view-state synchronizer and its DTOs.

/// Data transfer objects.
pub mod dto;
/// Application error types.
pub mod errors;
/// View state and synchronizer.
pub mod services;

pub use dto::{FailureNotice, FailurePolicy, Operation};
pub use errors::SyncError;
pub use services::{ViewState, ViewStateSynchronizer};
