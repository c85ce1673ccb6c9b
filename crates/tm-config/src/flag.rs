//! Feature flags that arrive with inconsistent representations.
//!
//! # Design
//! - Deployments have shipped the worker flag as a string and as a JSON boolean.
//! - Normalize once here so callers only ever see a strict `bool`.

use serde::Deserialize;
use serde_json::Value;

/// Raw flag value as found in the environment or runtime payload.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// JSON boolean.
    Bool(bool),
    /// String value, compared literally.
    Text(String),
    /// Any other JSON value (numbers, arrays, objects).
    Other(Value),
}

impl FlagValue {
    /// Whether the flag is enabled.
    ///
    /// Only boolean `true` and the exact strings `"1"` and `"true"` enable a flag.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Text(value) => matches!(value.as_str(), "1" | "true"),
            Self::Other(_) => false,
        }
    }

    /// Whether the value is one of the documented spellings (enabled or disabled).
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        match self {
            Self::Bool(_) => true,
            Self::Text(value) => matches!(value.as_str(), "1" | "true" | "0" | "false" | ""),
            Self::Other(_) => false,
        }
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Resolve an optional flag; absence means disabled.
#[must_use]
pub fn flag_enabled(value: Option<&FlagValue>) -> bool {
    value.is_some_and(FlagValue::is_enabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthy_spellings_enable_the_flag() {
        for value in [FlagValue::from("1"), FlagValue::from("true"), FlagValue::from(true)] {
            assert!(value.is_enabled(), "{value:?} should enable");
        }
    }

    #[test]
    fn everything_else_disables_the_flag() {
        let values = [
            FlagValue::from("0"),
            FlagValue::from("false"),
            FlagValue::from(""),
            FlagValue::from(false),
            FlagValue::from("TRUE"),
            FlagValue::from(" true"),
            FlagValue::from("yes"),
            FlagValue::Other(json!(1)),
        ];
        for value in values {
            assert!(!value.is_enabled(), "{value:?} should disable");
        }
        assert!(!flag_enabled(None));
    }

    #[test]
    fn deserializes_untagged_json() -> Result<(), serde_json::Error> {
        assert_eq!(
            serde_json::from_value::<FlagValue>(json!(true))?,
            FlagValue::Bool(true)
        );
        assert_eq!(
            serde_json::from_value::<FlagValue>(json!("1"))?,
            FlagValue::Text("1".into())
        );
        assert_eq!(
            serde_json::from_value::<FlagValue>(json!(1))?,
            FlagValue::Other(json!(1))
        );
        Ok(())
    }

    #[test]
    fn recognized_spellings_are_documented_values_only() {
        assert!(FlagValue::from("false").is_recognized());
        assert!(FlagValue::from("").is_recognized());
        assert!(!FlagValue::from("yes").is_recognized());
        assert!(!FlagValue::Other(json!([])).is_recognized());
    }
}
