use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maintenance calorie body, used for both the GET response and POST request.
#[derive(Debug, Serialize, Deserialize)]
pub struct MaintenanceCaloriesBody {
    pub maintenance_calories: f64,
}

/// Chat request body.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Error body returned by the backend on non-2xx responses.
///
/// Different frameworks use different keys, so all of them are optional.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Returns the most specific message available.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        match self.detail {
            Some(Value::String(s)) => Some(s),
            Some(other) if !other.is_null() => Some(other.to_string()),
            _ => self.error.or(self.message),
        }
    }
}
