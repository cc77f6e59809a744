//! Refetch-driven view-state synchronizer.
//!
//! Mutations of the log list are two steps: submit the change to the
//! backend, then (only when the backend confirmed it) re-read the
//! authoritative list. The local list is never patched in place.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::application::dto::Operation;
use crate::application::errors::SyncError;
use crate::domain::errors::ApiError;
use crate::domain::ports::NutritionApiPort;
use crate::domain::{ChatReply, FoodLogEntry, LogId, MaintenanceCalories, NewFoodLog, Tab};

use super::view_state::ViewState;

type Snapshot = (Vec<FoodLogEntry>, MaintenanceCalories);

/// Owns the [`ViewState`] and keeps it in step with the backend.
///
/// Cloning is cheap; clones share the same state, so an operation can be
/// moved into a spawned task while the UI keeps reading.
#[derive(Clone)]
pub struct ViewStateSynchronizer {
    api: Arc<dyn NutritionApiPort>,
    state: Arc<RwLock<ViewState>>,
}

impl ViewStateSynchronizer {
    /// Creates a synchronizer starting on the dashboard tab.
    #[must_use]
    pub fn new(api: Arc<dyn NutritionApiPort>) -> Self {
        Self::with_tab(api, Tab::default())
    }

    /// Creates a synchronizer starting on `tab`.
    #[must_use]
    pub fn with_tab(api: Arc<dyn NutritionApiPort>, tab: Tab) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(ViewState::new(tab))),
        }
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ViewState {
        self.state.read().clone()
    }

    /// Runs `f` against the current state without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        f(&self.state.read())
    }

    /// Switches the active tab.
    pub fn set_active_tab(&self, tab: Tab) {
        debug!(tab = %tab, "Switching tab");
        self.state.write().set_active_tab(tab);
    }

    /// Forgets the last recorded failure.
    pub fn dismiss_failure(&self) {
        self.state.write().clear_failure();
    }

    /// Fetches logs and the maintenance target concurrently.
    ///
    /// Both values are applied only if both fetches succeed. The loading flag
    /// is cleared either way.
    ///
    /// # Errors
    /// Returns the first fetch error; state keeps its defaults.
    pub async fn initial_load(&self) -> Result<(), SyncError> {
        debug!("Starting initial load");
        let result = self.fetch_snapshot().await;

        let mut state = self.state.write();
        let outcome = match result {
            Ok((logs, calories)) => {
                info!(
                    logs = logs.len(),
                    maintenance_calories = %calories,
                    "Initial load complete"
                );
                state.replace_logs(logs);
                state.set_maintenance_calories(calories);
                state.clear_failure();
                Ok(())
            }
            Err(e) => Err(Self::record(&mut state, Operation::InitialLoad, e)),
        };
        if state.finish_loading() {
            debug!("Loading flag cleared");
        }
        outcome
    }

    /// Re-reads logs and the maintenance target.
    ///
    /// # Errors
    /// Returns the fetch error; state is left unchanged.
    pub async fn refresh(&self) -> Result<(), SyncError> {
        self.refetch_all(Operation::Refresh).await
    }

    /// Fetches the weekly aggregate.
    ///
    /// # Errors
    /// Returns the fetch error; previous stats are kept.
    pub async fn refresh_weekly_stats(&self) -> Result<(), SyncError> {
        match self.api.fetch_weekly_stats().await {
            Ok(stats) => {
                debug!(periods = stats.len(), "Weekly stats fetched");
                let mut state = self.state.write();
                state.replace_weekly_stats(stats);
                state.clear_failure();
                Ok(())
            }
            Err(e) => Err(self.fail(Operation::RefreshWeeklyStats, e)),
        }
    }

    /// Submits a new log, then re-reads the backend state.
    ///
    /// A failing re-read is recorded but does not fail the call.
    ///
    /// # Errors
    /// Returns the submission error; no re-read is issued.
    pub async fn add_log(&self, log: &NewFoodLog) -> Result<FoodLogEntry, SyncError> {
        let created = self
            .api
            .create_log(log)
            .await
            .map_err(|e| self.fail(Operation::AddLog, e))?;

        info!(log_id = %created.id(), "Log created");
        self.state.write().clear_failure();
        let _ = self.refetch_all(Operation::Refresh).await;
        Ok(created)
    }

    /// Deletes a log, then re-reads the backend state.
    ///
    /// # Errors
    /// Returns the deletion error; the stale list is kept.
    pub async fn delete_log(&self, id: &LogId) -> Result<(), SyncError> {
        self.api
            .delete_log(id)
            .await
            .map_err(|e| self.fail(Operation::DeleteLog, e))?;

        info!(log_id = %id, "Log deleted");
        self.state.write().clear_failure();
        let _ = self.refetch_all(Operation::Refresh).await;
        Ok(())
    }

    /// Deletes every log, then re-reads the backend state.
    ///
    /// # Errors
    /// Returns the deletion error; the stale list is kept.
    pub async fn clear_all_logs(&self) -> Result<(), SyncError> {
        self.api
            .clear_logs()
            .await
            .map_err(|e| self.fail(Operation::ClearAllLogs, e))?;

        info!("All logs cleared");
        self.state.write().clear_failure();
        let _ = self.refetch_all(Operation::Refresh).await;
        Ok(())
    }

    /// Sends a chat message, then re-reads the log list.
    ///
    /// The chat endpoint may create logs as a side effect, so only the log
    /// list is re-read.
    ///
    /// # Errors
    /// Returns the chat error, in which case the log list is not re-read, or
    /// the error from re-reading it. Both are reported as a chat failure.
    pub async fn chat_submit(&self, message: &str) -> Result<ChatReply, SyncError> {
        let reply = self
            .api
            .send_chat_message(message)
            .await
            .map_err(|e| self.fail(Operation::ChatSubmit, e))?;

        debug!("Chat reply received");
        self.state.write().clear_failure();
        self.refetch_logs(Operation::ChatSubmit).await?;
        Ok(reply)
    }

    /// Stores a new maintenance target and caches it locally.
    ///
    /// The cached value is not reconciled with the backend until the next
    /// full refetch.
    ///
    /// # Errors
    /// Returns the update error; the cached value is unchanged.
    pub async fn update_maintenance_calories(
        &self,
        calories: MaintenanceCalories,
    ) -> Result<(), SyncError> {
        self.api
            .update_maintenance_calories(calories)
            .await
            .map_err(|e| self.fail(Operation::UpdateMaintenanceCalories, e))?;

        info!(maintenance_calories = %calories, "Maintenance calories updated");
        let mut state = self.state.write();
        state.set_maintenance_calories(calories);
        state.clear_failure();
        Ok(())
    }

    async fn fetch_snapshot(&self) -> Result<Snapshot, ApiError> {
        let (logs, calories) = tokio::join!(
            self.api.fetch_logs(),
            self.api.fetch_maintenance_calories()
        );
        Ok((logs?, calories?))
    }

    async fn refetch_all(&self, operation: Operation) -> Result<(), SyncError> {
        match self.fetch_snapshot().await {
            Ok((logs, calories)) => {
                debug!(logs = logs.len(), "Refetched backend state");
                let mut state = self.state.write();
                state.replace_logs(logs);
                state.set_maintenance_calories(calories);
                Ok(())
            }
            Err(e) => Err(self.fail(operation, e)),
        }
    }

    async fn refetch_logs(&self, operation: Operation) -> Result<(), SyncError> {
        match self.api.fetch_logs().await {
            Ok(logs) => {
                debug!(logs = logs.len(), "Refetched logs");
                self.state.write().replace_logs(logs);
                Ok(())
            }
            Err(e) => Err(self.fail(operation, e)),
        }
    }

    fn fail(&self, operation: Operation, error: ApiError) -> SyncError {
        Self::record(&mut self.state.write(), operation, error)
    }

    fn record(state: &mut ViewState, operation: Operation, error: ApiError) -> SyncError {
        let error = SyncError::new(operation, error);
        warn!(operation = %operation, error = %error.api_error(), "Operation failed");
        state.record_failure(error.notice());
        error
    }
}
