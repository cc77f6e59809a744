//! Infrastructure layer with external service adapters.

/// Nutrition API client.
pub mod api;
/// Application configuration.
pub mod config;

pub use api::NutritionApiClient;
pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager};
