//! Event payloads and the envelope wire format.
//!
//! An envelope is newline-delimited JSON: an envelope header, then one item
//! header and payload per item, each terminated by `\n`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::dsn::Dsn;
use crate::error::{Result, TelemetryError};

const PLATFORM: &str = "other";

/// Severity attached to captured events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Recoverable problem.
    Warning,
    /// Uncaught error.
    Error,
    /// Process-ending failure (panics).
    Fatal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct ExceptionValue {
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct ExceptionList {
    values: Vec<ExceptionValue>,
}

/// Captured error event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorEvent {
    event_id: String,
    timestamp: String,
    platform: &'static str,
    level: Level,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<String>,
    exception: ExceptionList,
}

impl ErrorEvent {
    /// Build an event for an exception of the given type and message.
    #[must_use]
    pub fn exception(
        level: Level,
        kind: impl Into<String>,
        value: impl Into<String>,
        environment: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: new_event_id(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            platform: PLATFORM,
            level,
            environment,
            exception: ExceptionList {
                values: vec![ExceptionValue {
                    kind: kind.into(),
                    value: value.into(),
                }],
            },
        }
    }

    /// Identifier used in the envelope header.
    #[must_use]
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// Severity.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct TraceContext {
    trace_id: String,
    span_id: String,
    op: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct Contexts {
    trace: TraceContext,
}

/// Sampled performance transaction (page loads, navigations).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransactionEvent {
    #[serde(rename = "type")]
    kind: &'static str,
    event_id: String,
    transaction: String,
    start_timestamp: f64,
    timestamp: f64,
    platform: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<String>,
    contexts: Contexts,
}

impl TransactionEvent {
    /// Build a transaction spanning `[start_secs, end_secs]` (UNIX seconds).
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        op: impl Into<String>,
        start_secs: f64,
        end_secs: f64,
        environment: Option<String>,
    ) -> Self {
        let span_seed = new_event_id();
        Self {
            kind: "transaction",
            event_id: new_event_id(),
            transaction: name.into(),
            start_timestamp: start_secs,
            timestamp: end_secs.max(start_secs),
            platform: PLATFORM,
            environment,
            contexts: Contexts {
                trace: TraceContext {
                    trace_id: new_event_id(),
                    span_id: span_seed[..16].to_string(),
                    op: op.into(),
                },
            },
        }
    }

    /// Identifier used in the envelope header.
    #[must_use]
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// Transaction duration in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.timestamp - self.start_timestamp
    }
}

/// Serialized envelope ready for transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    body: String,
}

impl Envelope {
    /// Wrap an error event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be serialized.
    pub fn for_event(dsn: &Dsn, event: &ErrorEvent, now: DateTime<Utc>) -> Result<Self> {
        Self::build(dsn, event.event_id(), "event", event, now)
    }

    /// Wrap a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be serialized.
    pub fn for_transaction(
        dsn: &Dsn,
        transaction: &TransactionEvent,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        Self::build(dsn, transaction.event_id(), "transaction", transaction, now)
    }

    fn build<T: Serialize>(
        dsn: &Dsn,
        event_id: &str,
        item_type: &str,
        payload: &T,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let encode = |value: &serde_json::Value| {
            serde_json::to_string(value).map_err(|source| TelemetryError::EnvelopeSerialize { source })
        };
        let header = encode(&json!({
            "event_id": event_id,
            "dsn": dsn.as_str(),
            "sent_at": now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }))?;
        let payload = serde_json::to_string(payload)
            .map_err(|source| TelemetryError::EnvelopeSerialize { source })?;
        let item_header = encode(&json!({
            "type": item_type,
            "length": payload.len(),
        }))?;
        Ok(Self {
            body: format!("{header}\n{item_header}\n{payload}\n"),
        })
    }

    /// Raw envelope body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consume into the raw body.
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }
}

fn new_event_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Value;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    fn lines(envelope: &Envelope) -> Vec<Value> {
        envelope
            .body()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap_or(Value::Null))
            .collect()
    }

    #[test]
    fn error_envelope_has_header_item_and_payload() -> crate::Result<()> {
        let dsn: Dsn = "https://key@ingest.example.io/5".parse()?;
        let event = ErrorEvent::exception(
            Level::Error,
            "TypeError",
            "x is undefined",
            Some("staging".into()),
            fixed_now(),
        );
        let envelope = Envelope::for_event(&dsn, &event, fixed_now())?;
        assert!(envelope.body().ends_with('\n'));

        let parsed = lines(&envelope);
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0]["event_id"], event.event_id());
        assert_eq!(parsed[0]["dsn"], "https://key@ingest.example.io/5");
        assert_eq!(parsed[0]["sent_at"], "2024-05-01T12:00:00.000Z");
        assert_eq!(parsed[1]["type"], "event");
        assert_eq!(parsed[2]["level"], "error");
        assert_eq!(parsed[2]["environment"], "staging");
        assert_eq!(parsed[2]["exception"]["values"][0]["type"], "TypeError");
        assert_eq!(parsed[2]["exception"]["values"][0]["value"], "x is undefined");
        Ok(())
    }

    #[test]
    fn item_length_matches_payload_bytes() -> crate::Result<()> {
        let dsn: Dsn = "https://key@ingest.example.io/5".parse()?;
        let event = ErrorEvent::exception(Level::Fatal, "panic", "ü boom", None, fixed_now());
        let envelope = Envelope::for_event(&dsn, &event, fixed_now())?;
        let body = envelope.into_body();
        let mut parts = body.split('\n');
        let _header = parts.next();
        let item: Value = serde_json::from_str(parts.next().unwrap_or_default())
            .map_err(|source| TelemetryError::EnvelopeSerialize { source })?;
        let payload = parts.next().unwrap_or_default();
        assert_eq!(item["length"].as_u64(), u64::try_from(payload.len()).ok());
        assert!(!payload.contains("\"environment\""));
        Ok(())
    }

    #[test]
    fn transaction_carries_trace_context() -> crate::Result<()> {
        let dsn: Dsn = "https://key@ingest.example.io/5".parse()?;
        let transaction = TransactionEvent::new("pageload", "pageload", 10.0, 9.0, None);
        assert!(transaction.duration_secs().abs() < f64::EPSILON);

        let envelope = Envelope::for_transaction(&dsn, &transaction, fixed_now())?;
        let parsed = lines(&envelope);
        assert_eq!(parsed[1]["type"], "transaction");
        assert_eq!(parsed[2]["type"], "transaction");
        assert_eq!(parsed[2]["contexts"]["trace"]["op"], "pageload");
        assert_eq!(
            parsed[2]["contexts"]["trace"]["trace_id"]
                .as_str()
                .map(str::len),
            Some(32)
        );
        assert_eq!(
            parsed[2]["contexts"]["trace"]["span_id"]
                .as_str()
                .map(str::len),
            Some(16)
        );
        Ok(())
    }
}
