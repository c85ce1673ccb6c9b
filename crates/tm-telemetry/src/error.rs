//! Error types for telemetry operations.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Result alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Errors raised by telemetry helpers.
#[derive(Debug)]
pub enum TelemetryError {
    /// Installing the tracing subscriber failed.
    SubscriberInstall {
        /// Underlying subscriber error.
        source: Box<dyn Error + Send + Sync + 'static>,
    },
    /// The DSN could not be parsed.
    InvalidDsn {
        /// DSN as supplied by configuration.
        dsn: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// A reporter was already installed for this process.
    AlreadyInstalled,
    /// Serialising an event envelope failed.
    EnvelopeSerialize {
        /// Underlying serde error.
        source: serde_json::Error,
    },
}

impl Display for TelemetryError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubscriberInstall { .. } => {
                formatter.write_str("failed to install tracing subscriber")
            }
            Self::InvalidDsn { .. } => formatter.write_str("invalid telemetry dsn"),
            Self::AlreadyInstalled => formatter.write_str("error reporter already installed"),
            Self::EnvelopeSerialize { .. } => {
                formatter.write_str("failed to serialize telemetry envelope")
            }
        }
    }
}

impl Error for TelemetryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SubscriberInstall { source } => Some(source.as_ref()),
            Self::EnvelopeSerialize { source } => Some(source),
            Self::InvalidDsn { .. } | Self::AlreadyInstalled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn json_error() -> serde_json::Error {
        match serde_json::from_str::<serde_json::Value>("invalid") {
            Ok(_) => serde::de::Error::custom("expected invalid json"),
            Err(err) => err,
        }
    }

    #[test]
    fn telemetry_error_display_and_source() {
        let cases = vec![
            (
                TelemetryError::SubscriberInstall {
                    source: Box::new(io::Error::other("taken")),
                },
                "failed to install tracing subscriber",
                true,
            ),
            (
                TelemetryError::InvalidDsn {
                    dsn: "nope".into(),
                    reason: "missing_scheme",
                },
                "invalid telemetry dsn",
                false,
            ),
            (
                TelemetryError::AlreadyInstalled,
                "error reporter already installed",
                false,
            ),
            (
                TelemetryError::EnvelopeSerialize {
                    source: json_error(),
                },
                "failed to serialize telemetry envelope",
                true,
            ),
        ];

        for (error, message, has_source) in cases {
            assert_eq!(error.to_string(), message);
            assert_eq!(error.source().is_some(), has_source);
        }
    }
}
