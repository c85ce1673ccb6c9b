//! Error types for configuration loading.

use thiserror::Error;

/// Primary error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Runtime configuration was not a JSON object.
    #[error("runtime configuration must be a JSON object")]
    PayloadNotObject {
        /// JSON kind that was supplied instead.
        kind: &'static str,
    },
    /// Runtime configuration could not be decoded.
    #[error("invalid runtime configuration payload")]
    InvalidPayload {
        /// Source decoding error.
        source: serde_json::Error,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
