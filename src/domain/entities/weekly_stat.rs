//! Weekly aggregate entity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::food_log::value_as_f64;

const LABEL_KEYS: &[&str] = &["day", "date", "week", "label", "period"];
const CALORIE_KEYS: &[&str] = &["calories", "total_calories"];

/// One period's aggregated nutrition data, computed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyStat {
    fields: Map<String, Value>,
}

impl WeeklyStat {
    /// Creates a stat from raw fields.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns the raw backend fields.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns the period label, if the record carries one.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        LABEL_KEYS.iter().find_map(|key| match self.fields.get(*key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Returns the period's calorie total, if present.
    #[must_use]
    pub fn calories(&self) -> Option<f64> {
        CALORIE_KEYS
            .iter()
            .find_map(|key| self.fields.get(*key).and_then(value_as_f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_and_calories() {
        let stat: WeeklyStat =
            serde_json::from_value(json!({"date": "2024-05-01", "total_calories": 2150.5}))
                .unwrap();
        assert_eq!(stat.label().as_deref(), Some("2024-05-01"));
        assert_eq!(stat.calories(), Some(2150.5));
    }

    #[test]
    fn test_unknown_shape() {
        let stat: WeeklyStat = serde_json::from_value(json!({"foo": true})).unwrap();
        assert_eq!(stat.label(), None);
        assert_eq!(stat.calories(), None);
    }
}
