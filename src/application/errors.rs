//! Application error types.

use thiserror::Error;

use crate::application::dto::{FailureNotice, FailurePolicy, Operation};
use crate::domain::errors::ApiError;

/// Failure of a synchronizer operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {source}")]
pub struct SyncError {
    operation: Operation,
    source: ApiError,
}

impl SyncError {
    /// Creates a new error for `operation`.
    #[must_use]
    pub const fn new(operation: Operation, source: ApiError) -> Self {
        Self { operation, source }
    }

    /// Returns the failed operation.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns the underlying API error.
    #[must_use]
    pub const fn api_error(&self) -> &ApiError {
        &self.source
    }

    /// Returns whether the caller should show this error inline.
    #[must_use]
    pub const fn policy(&self) -> FailurePolicy {
        self.operation.failure_policy()
    }

    /// Converts into the notice stored in the view state.
    #[must_use]
    pub fn notice(&self) -> FailureNotice {
        FailureNotice {
            operation: self.operation,
            message: self.source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_and_source() {
        let error = SyncError::new(Operation::AddLog, ApiError::status(400, "bad name"));
        assert_eq!(error.to_string(), "add log failed: server returned 400: bad name");
        assert!(error.source().is_some());
        assert_eq!(error.policy(), FailurePolicy::Surface);
        assert_eq!(error.notice().operation, Operation::AddLog);
    }
}
