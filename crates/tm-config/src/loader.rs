//! Layered configuration loading.
//!
//! # Design
//! - Compile-time environment values form the base layer.
//! - A runtime JSON object (injected by the hosting page) overrides per key.
//! - Normalization happens in [`RawConfig::resolve`]; nothing downstream re-parses flags.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{ConfigError, ConfigResult};
use crate::flag::{FlagValue, flag_enabled};
use crate::model::AppConfig;

/// Key holding the error-telemetry DSN.
pub const SENTRY_DSN_KEY: &str = "SENTRY_FRONTEND_DSN";
/// Key holding the deployment environment label.
pub const ENVIRONMENT_KEY: &str = "ENVIRONMENT";
/// Key holding the offline worker flag.
pub const SERVICE_WORKER_KEY: &str = "ENABLE_SERVICEWORKER";

/// Unnormalized configuration values from a single source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawConfig {
    /// Telemetry DSN.
    #[serde(rename = "SENTRY_FRONTEND_DSN", default)]
    pub sentry_dsn: Option<String>,
    /// Environment label.
    #[serde(rename = "ENVIRONMENT", default)]
    pub environment: Option<String>,
    /// Worker flag in whatever shape the source provided.
    #[serde(rename = "ENABLE_SERVICEWORKER", default)]
    pub enable_service_worker: Option<FlagValue>,
}

impl RawConfig {
    /// Values captured from the build environment.
    #[must_use]
    pub fn compile_time() -> Self {
        Self::from_lookup(|key| match key {
            SENTRY_DSN_KEY => option_env!("SENTRY_FRONTEND_DSN").map(str::to_string),
            ENVIRONMENT_KEY => option_env!("ENVIRONMENT").map(str::to_string),
            SERVICE_WORKER_KEY => option_env!("ENABLE_SERVICEWORKER").map(str::to_string),
            _ => None,
        })
    }

    /// Build from a string lookup (environment-style sources carry text only).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            sentry_dsn: lookup(SENTRY_DSN_KEY),
            environment: lookup(ENVIRONMENT_KEY),
            enable_service_worker: lookup(SERVICE_WORKER_KEY).map(FlagValue::Text),
        }
    }

    /// Decode a runtime JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PayloadNotObject`] when the payload is not an object and
    /// [`ConfigError::InvalidPayload`] when a known key has an unsupported type.
    pub fn from_json(value: Value) -> ConfigResult<Self> {
        if !value.is_object() {
            return Err(ConfigError::PayloadNotObject {
                kind: json_kind(&value),
            });
        }
        serde_json::from_value(value).map_err(|source| ConfigError::InvalidPayload { source })
    }

    /// Overlay `self` on top of `base`; keys present in `self` win.
    #[must_use]
    pub fn layered_over(self, base: Self) -> Self {
        Self {
            sentry_dsn: self.sentry_dsn.or(base.sentry_dsn),
            environment: self.environment.or(base.environment),
            enable_service_worker: self.enable_service_worker.or(base.enable_service_worker),
        }
    }

    /// Normalize into the strict bundle consumed by the bootstrap sequence.
    #[must_use]
    pub fn resolve(self) -> AppConfig {
        if let Some(flag) = self.enable_service_worker.as_ref().filter(|f| !f.is_recognized()) {
            warn!(
                key = SERVICE_WORKER_KEY,
                value = ?flag,
                "unrecognized flag value; treating as disabled"
            );
        }
        AppConfig {
            sentry_dsn: self.sentry_dsn.filter(|dsn| !dsn.trim().is_empty()),
            environment: self.environment,
            service_worker_enabled: flag_enabled(self.enable_service_worker.as_ref()),
        }
    }
}

/// Resolve configuration from the build environment and an optional runtime payload.
///
/// # Errors
///
/// Returns an error if the runtime payload cannot be decoded.
pub fn load(runtime: Option<Value>) -> ConfigResult<AppConfig> {
    let base = RawConfig::compile_time();
    let layered = match runtime {
        Some(Value::Null) | None => base,
        Some(value) => RawConfig::from_json(value)?.layered_over(base),
    };
    Ok(layered.resolve())
}

/// Resolve configuration from a JSON string produced by the hosting page.
///
/// # Errors
///
/// Returns an error if the string is not valid JSON or has the wrong shape.
pub fn load_from_str(raw: &str) -> ConfigResult<AppConfig> {
    let value: Value =
        serde_json::from_str(raw).map_err(|source| ConfigError::InvalidPayload { source })?;
    load(Some(value))
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolve(value: Value) -> ConfigResult<AppConfig> {
        Ok(RawConfig::from_json(value)?.resolve())
    }

    #[test]
    fn boolean_and_string_flags_normalize() -> ConfigResult<()> {
        assert!(resolve(json!({ "ENABLE_SERVICEWORKER": true }))?.service_worker_enabled);
        assert!(resolve(json!({ "ENABLE_SERVICEWORKER": "1" }))?.service_worker_enabled);
        assert!(resolve(json!({ "ENABLE_SERVICEWORKER": "true" }))?.service_worker_enabled);
        assert!(!resolve(json!({ "ENABLE_SERVICEWORKER": false }))?.service_worker_enabled);
        assert!(!resolve(json!({ "ENABLE_SERVICEWORKER": "0" }))?.service_worker_enabled);
        assert!(!resolve(json!({ "ENABLE_SERVICEWORKER": null }))?.service_worker_enabled);
        assert!(!resolve(json!({ "ENABLE_SERVICEWORKER": 1 }))?.service_worker_enabled);
        assert!(!resolve(json!({}))?.service_worker_enabled);
        Ok(())
    }

    #[test]
    fn blank_dsn_is_treated_as_absent() -> ConfigResult<()> {
        let config = resolve(json!({ "SENTRY_FRONTEND_DSN": "  " }))?;
        assert!(config.sentry_dsn.is_none());
        Ok(())
    }

    #[test]
    fn environment_is_kept_verbatim() -> ConfigResult<()> {
        let config = resolve(json!({ "ENVIRONMENT": " Staging-EU " }))?;
        assert_eq!(config.environment.as_deref(), Some(" Staging-EU "));
        Ok(())
    }

    #[test]
    fn runtime_layer_wins_per_key() {
        let base = RawConfig::from_lookup(|key| match key {
            SENTRY_DSN_KEY => Some("https://key@o1.ingest.example.io/7".into()),
            ENVIRONMENT_KEY => Some("build".into()),
            SERVICE_WORKER_KEY => Some("1".into()),
            _ => None,
        });
        let runtime = RawConfig {
            environment: Some("runtime".into()),
            enable_service_worker: Some(FlagValue::Bool(false)),
            ..RawConfig::default()
        };
        let config = runtime.layered_over(base).resolve();
        assert_eq!(
            config.sentry_dsn.as_deref(),
            Some("https://key@o1.ingest.example.io/7")
        );
        assert_eq!(config.environment.as_deref(), Some("runtime"));
        assert!(!config.service_worker_enabled);
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        let err = RawConfig::from_json(json!(["x"])).err();
        assert!(matches!(
            err,
            Some(ConfigError::PayloadNotObject { kind: "array" })
        ));
    }

    #[test]
    fn wrongly_typed_keys_are_rejected() {
        let err = RawConfig::from_json(json!({ "SENTRY_FRONTEND_DSN": 42 })).err();
        assert!(matches!(err, Some(ConfigError::InvalidPayload { .. })));
    }

    #[test]
    fn load_from_str_reports_invalid_json() {
        assert!(matches!(
            load_from_str("{not json"),
            Err(ConfigError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn null_runtime_payload_falls_back_to_build_values() -> ConfigResult<()> {
        assert_eq!(load(Some(Value::Null))?, load(None)?);
        Ok(())
    }
}
