//! Food log entities.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Backend-assigned log identifier.
///
/// The backend may send identifiers as JSON numbers or strings; both are kept
/// in their textual form and written back the way they arrived.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogId {
    /// Numeric identifier.
    Number(u64),
    /// String identifier (UUIDs, object ids, ...).
    Text(String),
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for LogId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for LogId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl Serialize for LogId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Number(n) => serializer.serialize_u64(*n),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for LogId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Self::Number(n),
            RawId::Text(s) => Self::Text(s),
        })
    }
}

/// One recorded food-intake event as returned by the backend.
///
/// Everything except the identifier is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    id: LogId,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl FoodLogEntry {
    /// Creates an entry from an id and its remaining fields.
    #[must_use]
    pub const fn new(id: LogId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// Returns the log identifier.
    #[must_use]
    pub const fn id(&self) -> &LogId {
        &self.id
    }

    /// Returns the raw backend fields.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns a field by key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the first string field found among `keys`.
    #[must_use]
    pub fn text(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|key| self.fields.get(*key).and_then(Value::as_str))
    }

    /// Returns the first numeric field found among `keys`.
    ///
    /// Numeric strings are accepted since some backends serialize decimals
    /// as text.
    #[must_use]
    pub fn number(&self, keys: &[&str]) -> Option<f64> {
        keys.iter()
            .find_map(|key| self.fields.get(*key).and_then(value_as_f64))
    }
}

/// Log fields submitted when creating an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewFoodLog {
    fields: Map<String, Value>,
}

impl NewFoodLog {
    /// Creates a log with the given food name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::default().with("name", name.into())
    }

    /// Adds or replaces a field.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Returns the submitted fields.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

pub(crate) fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_and_string_ids() {
        let numeric: FoodLogEntry =
            serde_json::from_value(json!({"id": 7, "name": "apple"})).unwrap();
        assert_eq!(numeric.id(), &LogId::Number(7));
        assert_eq!(numeric.id().to_string(), "7");

        let text: FoodLogEntry =
            serde_json::from_value(json!({"id": "a1b2", "name": "pear"})).unwrap();
        assert_eq!(text.id(), &LogId::Text("a1b2".to_string()));
    }

    #[test]
    fn test_fields_are_kept_verbatim() {
        let entry: FoodLogEntry = serde_json::from_value(json!({
            "id": 1,
            "name": "oats",
            "calories": 150,
            "protein": "5.5",
            "meta": {"source": "chat"}
        }))
        .unwrap();

        assert_eq!(entry.text(&["food_name", "name"]), Some("oats"));
        assert_eq!(entry.number(&["calories"]), Some(150.0));
        assert_eq!(entry.number(&["protein"]), Some(5.5));
        assert_eq!(entry.field("meta"), Some(&json!({"source": "chat"})));
        assert!(!entry.fields().contains_key("id"));

        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["meta"]["source"], "chat");
        assert_eq!(back["id"], 1);
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let result = serde_json::from_value::<FoodLogEntry>(json!({"name": "apple"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_new_food_log_serializes_flat() {
        let log = NewFoodLog::named("apple").with("calories", 95);
        let value = serde_json::to_value(&log).unwrap();
        assert_eq!(value, json!({"name": "apple", "calories": 95}));
    }
}
