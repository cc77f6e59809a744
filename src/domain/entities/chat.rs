//! Chat reply entity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

const TEXT_KEYS: &[&str] = &["response", "reply", "message", "text"];

/// Payload returned by the AI chat endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatReply(Value);

impl ChatReply {
    /// Wraps a raw payload.
    #[must_use]
    pub const fn new(payload: Value) -> Self {
        Self(payload)
    }

    /// Returns the raw payload.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.0
    }

    /// Returns the text to show in a transcript.
    #[must_use]
    pub fn display_text(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            Value::Object(map) => TEXT_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map_or_else(|| self.0.to_string(), str::to_string),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}
