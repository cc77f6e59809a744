//! Domain layer with core entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Tab definitions.
pub mod tab;

pub use entities::{ChatReply, FoodLogEntry, LogId, MaintenanceCalories, NewFoodLog, WeeklyStat};
pub use errors::ApiError;
pub use ports::NutritionApiPort;
pub use tab::Tab;
