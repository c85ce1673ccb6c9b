//! Process-wide error reporter.
//!
//! # Design
//! - One reporter per process, held in a `OnceCell`; installation is the global handler registration.
//! - Delivery is delegated to a [`Transport`] so the browser build can POST with `fetch`
//!   while tests record envelopes in memory.
//! - Capturing never fails loudly: serialization problems are logged and dropped.

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::dsn::Dsn;
use crate::error::{Result, TelemetryError};
use crate::event::{Envelope, ErrorEvent, Level, TransactionEvent};
use crate::options::TelemetryOptions;

static REPORTER: OnceCell<ErrorReporter> = OnceCell::new();

/// Request handed to a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvelopeRequest {
    /// Ingestion endpoint.
    pub url: String,
    /// `X-Sentry-Auth` header value.
    pub auth_header: String,
    /// Envelope body.
    pub body: String,
}

/// Delivery mechanism for envelopes. Implementations must not block.
pub trait Transport: Send + Sync {
    /// Queue a request for delivery.
    fn send(&self, request: EnvelopeRequest);
}

/// Error-reporting client.
pub struct ErrorReporter {
    dsn: Dsn,
    options: TelemetryOptions,
    transport: Box<dyn Transport>,
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ErrorReporter")
            .field("dsn", &self.dsn)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ErrorReporter {
    /// Construct a reporter from options.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::InvalidDsn`] when the DSN cannot be parsed.
    pub fn new(options: TelemetryOptions, transport: impl Transport + 'static) -> Result<Self> {
        let dsn = options.dsn.parse::<Dsn>()?;
        Ok(Self {
            dsn,
            options,
            transport: Box::new(transport),
        })
    }

    /// Options the reporter was built with.
    #[must_use]
    pub const fn options(&self) -> &TelemetryOptions {
        &self.options
    }

    /// Capture an exception with the current time.
    pub fn capture_exception(&self, level: Level, kind: &str, message: &str) {
        self.capture_exception_at(level, kind, message, Utc::now());
    }

    /// Capture an exception at a given time.
    pub fn capture_exception_at(&self, level: Level, kind: &str, message: &str, now: DateTime<Utc>) {
        let event = ErrorEvent::exception(
            level,
            kind,
            message,
            self.options.environment.clone(),
            now,
        );
        match Envelope::for_event(&self.dsn, &event, now) {
            Ok(envelope) => self.dispatch(envelope),
            Err(err) => warn!(error = %err, "dropping error event"),
        }
    }

    /// Record a transaction if tracing is enabled and `roll` falls inside the sample rate.
    ///
    /// Returns whether the transaction was sent.
    pub fn record_transaction(
        &self,
        name: &str,
        start_secs: f64,
        end_secs: f64,
        roll: f64,
    ) -> bool {
        if !self.options.tracing_enabled() || !self.options.sampler().sample(roll) {
            debug!(transaction = name, "transaction not sampled");
            return false;
        }
        let transaction = TransactionEvent::new(
            name,
            name,
            start_secs,
            end_secs,
            self.options.environment.clone(),
        );
        match Envelope::for_transaction(&self.dsn, &transaction, Utc::now()) {
            Ok(envelope) => {
                self.dispatch(envelope);
                true
            }
            Err(err) => {
                warn!(error = %err, "dropping transaction");
                false
            }
        }
    }

    fn dispatch(&self, envelope: Envelope) {
        self.transport.send(EnvelopeRequest {
            url: self.dsn.envelope_url(),
            auth_header: self.dsn.auth_header(),
            body: envelope.into_body(),
        });
    }
}

/// Register the reporter as the process-wide error handler.
///
/// # Errors
///
/// Returns [`TelemetryError::AlreadyInstalled`] when a reporter already exists.
pub fn install(reporter: ErrorReporter) -> Result<&'static ErrorReporter> {
    REPORTER
        .set(reporter)
        .map_err(|_| TelemetryError::AlreadyInstalled)?;
    REPORTER.get().ok_or(TelemetryError::AlreadyInstalled)
}

/// The installed reporter, if any.
#[must_use]
pub fn reporter() -> Option<&'static ErrorReporter> {
    REPORTER.get()
}

/// Whether a global reporter has been installed.
#[must_use]
pub fn installed() -> bool {
    REPORTER.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingTransport {
        sent: Arc<Mutex<Vec<EnvelopeRequest>>>,
    }

    impl RecordingTransport {
        fn sent(&self) -> Vec<EnvelopeRequest> {
            self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
        }
    }

    impl Transport for RecordingTransport {
        fn send(&self, request: EnvelopeRequest) {
            if let Ok(mut sent) = self.sent.lock() {
                sent.push(request);
            }
        }
    }

    fn options() -> TelemetryOptions {
        TelemetryOptions::browser("https://key@ingest.example.io/3", Some("qa".into()))
    }

    #[test]
    fn invalid_dsn_is_rejected_at_construction() {
        let options = TelemetryOptions::browser("not-a-dsn", None);
        assert!(matches!(
            ErrorReporter::new(options, RecordingTransport::default()),
            Err(TelemetryError::InvalidDsn { .. })
        ));
    }

    #[test]
    fn captured_exceptions_reach_the_transport() -> Result<()> {
        let transport = RecordingTransport::default();
        let reporter = ErrorReporter::new(options(), transport.clone())?;
        reporter.capture_exception(Level::Error, "Error", "boom");

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "https://ingest.example.io/api/3/envelope/");
        assert!(sent[0].auth_header.contains("sentry_key=key"));
        assert!(sent[0].body.contains("\"environment\":\"qa\""));
        assert!(sent[0].body.contains("boom"));
        Ok(())
    }

    #[test]
    fn transactions_follow_the_sample_rate() -> Result<()> {
        let transport = RecordingTransport::default();
        let reporter = ErrorReporter::new(options(), transport.clone())?;
        assert!(!reporter.record_transaction("pageload", 1.0, 2.0, 0.5));
        assert!(reporter.record_transaction("pageload", 1.0, 2.0, 0.05));
        assert_eq!(transport.sent().len(), 1);
        Ok(())
    }

    #[test]
    fn transactions_need_the_tracing_integration() -> Result<()> {
        let transport = RecordingTransport::default();
        let mut options = options();
        options.integrations.clear();
        let reporter = ErrorReporter::new(options, transport.clone())?;
        assert!(!reporter.record_transaction("pageload", 1.0, 2.0, 0.0));
        assert!(transport.sent().is_empty());
        Ok(())
    }

    #[test]
    fn global_install_happens_once() -> Result<()> {
        let first = ErrorReporter::new(options(), RecordingTransport::default())?;
        let second = ErrorReporter::new(options(), RecordingTransport::default())?;

        let installed_reporter = install(first)?;
        assert!(installed());
        assert_eq!(installed_reporter.options().environment.as_deref(), Some("qa"));
        assert!(reporter().is_some());
        assert!(matches!(install(second), Err(TelemetryError::AlreadyInstalled)));
        Ok(())
    }
}
