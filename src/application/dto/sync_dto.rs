//! Synchronizer operation DTOs.

use std::fmt;

/// How a failed operation should reach the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The invoking view shows the error inline.
    Surface,
    /// The failure is only recorded as a status notice.
    Suppress,
}

/// Synchronizer operation, used to tag failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// First concurrent fetch of logs and maintenance target.
    InitialLoad,
    /// Full re-read of logs and maintenance target.
    Refresh,
    /// On-demand fetch of the weekly aggregate.
    RefreshWeeklyStats,
    /// Food log creation.
    AddLog,
    /// Single food log removal.
    DeleteLog,
    /// Bulk food log removal.
    ClearAllLogs,
    /// AI chat message.
    ChatSubmit,
    /// Maintenance target update.
    UpdateMaintenanceCalories,
}

impl Operation {
    /// Returns the failure policy for this operation.
    #[must_use]
    pub const fn failure_policy(self) -> FailurePolicy {
        match self {
            Self::AddLog | Self::ChatSubmit => FailurePolicy::Surface,
            Self::InitialLoad
            | Self::Refresh
            | Self::RefreshWeeklyStats
            | Self::DeleteLog
            | Self::ClearAllLogs
            | Self::UpdateMaintenanceCalories => FailurePolicy::Suppress,
        }
    }

    /// Returns a short human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InitialLoad => "initial load",
            Self::Refresh => "refresh",
            Self::RefreshWeeklyStats => "weekly stats refresh",
            Self::AddLog => "add log",
            Self::DeleteLog => "delete log",
            Self::ClearAllLogs => "clear logs",
            Self::ChatSubmit => "chat message",
            Self::UpdateMaintenanceCalories => "maintenance calories update",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Last failure recorded in the view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    /// Operation that failed.
    pub operation: Operation,
    /// Rendered error message.
    pub message: String,
}

impl FailureNotice {
    /// Returns the failure policy of the failed operation.
    #[must_use]
    pub const fn policy(&self) -> FailurePolicy {
        self.operation.failure_policy()
    }
}

impl fmt::Display for FailureNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.message)
    }
}
