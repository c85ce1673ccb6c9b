//! DSN parsing for the error-reporting backend.
//!
//! A DSN has the shape `{scheme}://{public_key}[:{secret}]@{host}[:{port}]{path}/{project_id}`.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use url::{ParseError, Url};

use crate::error::TelemetryError;

/// Protocol version spoken to the ingestion endpoint.
const PROTOCOL_VERSION: u8 = 7;
/// Client identifier sent with every envelope.
const CLIENT_NAME: &str = concat!("tm-telemetry/", env!("CARGO_PKG_VERSION"));

/// Parsed ingestion DSN.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dsn {
    raw: String,
    scheme: String,
    public_key: String,
    host: String,
    path_prefix: String,
    project_id: String,
}

impl Dsn {
    /// Endpoint that accepts envelopes for this project.
    #[must_use]
    pub fn envelope_url(&self) -> String {
        format!(
            "{}://{}{}/api/{}/envelope/",
            self.scheme, self.host, self.path_prefix, self.project_id
        )
    }

    /// Value for the `X-Sentry-Auth` header.
    #[must_use]
    pub fn auth_header(&self) -> String {
        format!(
            "Sentry sentry_version={PROTOCOL_VERSION}, sentry_key={}, sentry_client={CLIENT_NAME}",
            self.public_key
        )
    }

    /// Public key segment.
    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Project identifier segment.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// DSN exactly as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Display for Dsn {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.raw)
    }
}

impl FromStr for Dsn {
    type Err = TelemetryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &'static str| TelemetryError::InvalidDsn {
            dsn: value.to_string(),
            reason,
        };

        let trimmed = value.trim();
        let url = Url::parse(trimmed).map_err(|err| invalid(parse_error_reason(err)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("unsupported_scheme"));
        }
        if url.query().is_some() {
            return Err(invalid("unexpected_query"));
        }
        if url.fragment().is_some() {
            return Err(invalid("unexpected_fragment"));
        }
        if url.username().is_empty() {
            return Err(invalid("missing_public_key"));
        }
        let host = match (url.host_str(), url.port()) {
            (None | Some(""), _) => return Err(invalid("missing_host")),
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
        };

        let path = url.path().trim_matches('/');
        let (prefix, project_id) = path.rsplit_once('/').unwrap_or(("", path));
        if project_id.is_empty() {
            return Err(invalid("missing_project_id"));
        }
        let path_prefix = if prefix.is_empty() {
            String::new()
        } else {
            format!("/{prefix}")
        };

        Ok(Self {
            raw: trimmed.to_string(),
            scheme: url.scheme().to_string(),
            public_key: url.username().to_string(),
            host,
            path_prefix,
            project_id: project_id.to_string(),
        })
    }
}

const fn parse_error_reason(err: ParseError) -> &'static str {
    match err {
        ParseError::RelativeUrlWithoutBase => "missing_scheme",
        ParseError::EmptyHost => "missing_host",
        ParseError::InvalidPort => "invalid_port",
        _ => "malformed_url",
    }
}
