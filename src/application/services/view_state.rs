//! Client-side view of the nutrition backend.

use crate::application::dto::FailureNotice;
use crate::domain::{FoodLogEntry, MaintenanceCalories, Tab, WeeklyStat};

/// Everything the views render, owned by the synchronizer.
///
/// Only [`super::ViewStateSynchronizer`] mutates this; views get clones or
/// short read borrows.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    logs: Vec<FoodLogEntry>,
    weekly_stats: Vec<WeeklyStat>,
    maintenance_calories: MaintenanceCalories,
    loading: bool,
    active_tab: Tab,
    last_failure: Option<FailureNotice>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Tab::default())
    }
}

impl ViewState {
    /// Creates the state shown before the first load.
    #[must_use]
    pub const fn new(active_tab: Tab) -> Self {
        Self {
            logs: Vec::new(),
            weekly_stats: Vec::new(),
            maintenance_calories: MaintenanceCalories::DEFAULT,
            loading: true,
            active_tab,
            last_failure: None,
        }
    }

    #[must_use]
    pub fn logs(&self) -> &[FoodLogEntry] {
        &self.logs
    }

    #[must_use]
    pub fn weekly_stats(&self) -> &[WeeklyStat] {
        &self.weekly_stats
    }

    #[must_use]
    pub const fn maintenance_calories(&self) -> MaintenanceCalories {
        self.maintenance_calories
    }

    /// Returns whether the first load is still in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn active_tab(&self) -> Tab {
        self.active_tab
    }

    #[must_use]
    pub const fn last_failure(&self) -> Option<&FailureNotice> {
        self.last_failure.as_ref()
    }

    pub(super) fn replace_logs(&mut self, logs: Vec<FoodLogEntry>) {
        self.logs = logs;
    }

    pub(super) fn replace_weekly_stats(&mut self, stats: Vec<WeeklyStat>) {
        self.weekly_stats = stats;
    }

    pub(super) fn set_maintenance_calories(&mut self, calories: MaintenanceCalories) {
        self.maintenance_calories = calories;
    }

    /// Clears the loading flag. Returns `true` on the one real transition.
    pub(super) fn finish_loading(&mut self) -> bool {
        std::mem::replace(&mut self.loading, false)
    }

    pub(super) fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub(super) fn record_failure(&mut self, notice: FailureNotice) {
        self.last_failure = Some(notice);
    }

    pub(super) fn clear_failure(&mut self) {
        self.last_failure = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::Operation;

    #[test]
    fn test_defaults() {
        let state = ViewState::default();
        assert!(state.logs().is_empty());
        assert!(state.weekly_stats().is_empty());
        assert_eq!(state.maintenance_calories(), MaintenanceCalories::DEFAULT);
        assert!(state.is_loading());
        assert_eq!(state.active_tab(), Tab::Dashboard);
        assert!(state.last_failure().is_none());
    }

    #[test]
    fn test_finish_loading_transitions_once() {
        let mut state = ViewState::new(Tab::Settings);
        assert!(state.finish_loading());
        assert!(!state.finish_loading());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_failure_bookkeeping() {
        let mut state = ViewState::default();
        state.record_failure(FailureNotice {
            operation: Operation::ClearAllLogs,
            message: "timeout".to_string(),
        });
        assert_eq!(
            state.last_failure().map(|n| n.operation),
            Some(Operation::ClearAllLogs)
        );
        state.clear_failure();
        assert!(state.last_failure().is_none());
    }
}
