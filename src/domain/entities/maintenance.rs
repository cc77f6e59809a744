//! Maintenance calorie target.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Baseline daily calorie target.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct MaintenanceCalories(f64);

impl MaintenanceCalories {
    /// Target shown before the backend value has been loaded.
    pub const DEFAULT: Self = Self(2000.0);

    /// Creates a target, rejecting negative and non-finite values.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(Self(value))
    }

    /// Parses user input such as `"1800"` or `" 2150.5 "`.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().parse::<f64>().ok().and_then(Self::new)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Default for MaintenanceCalories {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for MaintenanceCalories {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!("maintenance calories must be a finite non-negative number, got {value}")
        })
    }
}

impl From<MaintenanceCalories> for f64 {
    fn from(calories: MaintenanceCalories) -> Self {
        calories.0
    }
}

impl fmt::Display for MaintenanceCalories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("1800", Some(1800.0) ; "integer")]
    #[test_case(" 2150.5 ", Some(2150.5) ; "decimal_with_spaces")]
    #[test_case("0", Some(0.0) ; "zero")]
    #[test_case("-5", None ; "negative")]
    #[test_case("NaN", None ; "nan")]
    #[test_case("inf", None ; "infinite")]
    #[test_case("abc", None ; "garbage")]
    #[test_case("", None ; "empty")]
    fn test_parse(input: &str, expected: Option<f64>) {
        assert_eq!(MaintenanceCalories::parse(input).map(MaintenanceCalories::value), expected);
    }

    #[test_case("1850.5", Some(1850.5) ; "valid")]
    #[test_case("-100", None ; "negative")]
    #[test_case("\"2000\"", None ; "string")]
    fn test_deserialize_validates(json: &str, expected: Option<f64>) {
        let parsed = serde_json::from_str::<MaintenanceCalories>(json).ok();
        assert_eq!(parsed.map(MaintenanceCalories::value), expected);
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let value = serde_json::to_value(MaintenanceCalories::DEFAULT).unwrap();
        assert_eq!(value, serde_json::json!(2000.0));
    }

    #[test]
    fn test_default_and_display() {
        assert_eq!(MaintenanceCalories::default().value(), 2000.0);
        assert_eq!(MaintenanceCalories::DEFAULT.to_string(), "2000");
    }
}
