//! Domain entity definitions.

mod chat;
mod food_log;
mod maintenance;
mod weekly_stat;

pub use chat::ChatReply;
pub use food_log::{FoodLogEntry, LogId, NewFoodLog};
pub use maintenance::MaintenanceCalories;
pub use weekly_stat::WeeklyStat;
