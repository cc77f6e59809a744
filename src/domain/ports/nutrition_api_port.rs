//! Nutrition API port definition.

use async_trait::async_trait;

use crate::domain::entities::{
    ChatReply, FoodLogEntry, LogId, MaintenanceCalories, NewFoodLog, WeeklyStat,
};
use crate::domain::errors::ApiError;

/// Port for the remote nutrition-tracking service.
#[async_trait]
pub trait NutritionApiPort: Send + Sync {
    /// Fetches every food log.
    async fn fetch_logs(&self) -> Result<Vec<FoodLogEntry>, ApiError>;

    /// Creates a food log and returns the stored record.
    async fn create_log(&self, log: &NewFoodLog) -> Result<FoodLogEntry, ApiError>;

    /// Deletes one food log.
    async fn delete_log(&self, id: &LogId) -> Result<(), ApiError>;

    /// Deletes every food log.
    async fn clear_logs(&self) -> Result<(), ApiError>;

    /// Fetches the maintenance calorie target.
    async fn fetch_maintenance_calories(&self) -> Result<MaintenanceCalories, ApiError>;

    /// Stores a new maintenance calorie target.
    async fn update_maintenance_calories(
        &self,
        calories: MaintenanceCalories,
    ) -> Result<(), ApiError>;

    /// Fetches the weekly aggregate.
    async fn fetch_weekly_stats(&self) -> Result<Vec<WeeklyStat>, ApiError>;

    /// Sends a message to the AI assistant.
    async fn send_chat_message(&self, message: &str) -> Result<ChatReply, ApiError>;
}
