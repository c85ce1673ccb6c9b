//! Browser wiring for logging and error reporting.
//!
//! # Design
//! - Log lines are buffered per event and flushed to the console on drop.
//! - The reporter is installed once; the panic hook and window listeners forward
//!   uncaught failures to it for the rest of the page's life.
//! - Envelope delivery is fire-and-forget through `fetch`.

use gloo::console;
use gloo::events::EventListener;
use gloo::utils::window;
use gloo_net::http::Request;
use std::io;
use tm_telemetry::{
    EnvelopeRequest, ErrorReporter, Level, LogFormat, LoggingConfig, TelemetryOptions, Transport,
};
use console_writer::ConsoleWriter;
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ErrorEvent, PromiseRejectionEvent};

/// Install the tracing subscriber that writes to the browser console.
pub(crate) fn init_console_logging() {
    let config = LoggingConfig {
        format: LogFormat::Pretty,
        ansi: false,
        ..LoggingConfig::default()
    };
    if let Err(err) = tm_telemetry::init_logging_with_writer(&config, ConsoleWriter) {
        console::warn!("logging already initialised", err.to_string());
    }
}

/// Construct the reporter and register the global handlers.
pub(crate) fn install_reporter(options: TelemetryOptions) {
    let reporter = match ErrorReporter::new(options, FetchTransport) {
        Ok(reporter) => reporter,
        Err(err) => {
            warn!(error = %err, "telemetry disabled: invalid configuration");
            return;
        }
    };
    match tm_telemetry::install(reporter) {
        Ok(_) => {
            install_panic_hook();
            install_window_listeners();
            info!("error reporting enabled");
        }
        Err(err) => warn!(error = %err, "telemetry already installed"),
    }
}

/// Report the page-load transaction when the tracing integration samples it.
pub(crate) fn record_pageload() {
    let Some(reporter) = tm_telemetry::reporter() else {
        return;
    };
    let Some(performance) = window().performance() else {
        return;
    };
    let origin_secs = performance.time_origin() / 1000.0;
    let end_secs = origin_secs + performance.now() / 1000.0;
    let sampled =
        reporter.record_transaction("pageload", origin_secs, end_secs, js_sys::Math::random());
    debug!(sampled, "pageload transaction");
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        console_error_panic_hook::hook(info);
        if let Some(reporter) = tm_telemetry::reporter() {
            reporter.capture_exception(Level::Fatal, "panic", &info.to_string());
        }
    }));
}

fn install_window_listeners() {
    EventListener::new(&window(), "error", |event| {
        let message = event
            .dyn_ref::<ErrorEvent>()
            .map_or_else(|| "unknown error".to_string(), ErrorEvent::message);
        if let Some(reporter) = tm_telemetry::reporter() {
            reporter.capture_exception(Level::Error, "Error", &message);
        }
    })
    .forget();

    EventListener::new(&window(), "unhandledrejection", |event| {
        let reason = event
            .dyn_ref::<PromiseRejectionEvent>()
            .map_or_else(
                || "unknown rejection".to_string(),
                |event| {
                    let reason = event.reason();
                    reason.as_string().unwrap_or_else(|| format!("{reason:?}"))
                },
            );
        if let Some(reporter) = tm_telemetry::reporter() {
            reporter.capture_exception(Level::Error, "UnhandledRejection", &reason);
        }
    })
    .forget();
}

struct FetchTransport;

impl Transport for FetchTransport {
    fn send(&self, request: EnvelopeRequest) {
        spawn_local(async move {
            let outcome = Request::post(&request.url)
                .header("Content-Type", "application/x-sentry-envelope")
                .header("X-Sentry-Auth", &request.auth_header)
                .body(request.body)
                .send()
                .await;
            match outcome {
                Ok(response) if !response.ok() => {
                    console::warn!("telemetry endpoint rejected envelope", response.status());
                }
                Ok(_) => {}
                Err(err) => console::warn!("telemetry delivery failed", err.to_string()),
            }
        });
    }
}

mod console_writer {
    use super::{console, io};
    use tm_telemetry::MakeWriter;

    /// Writer factory producing one console line per log event.
    pub(crate) struct ConsoleWriter;

    pub(crate) struct ConsoleLine {
        buffer: Vec<u8>,
    }

    impl io::Write for ConsoleLine {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleLine {
        fn drop(&mut self) {
            let line = String::from_utf8_lossy(&self.buffer);
            let line = line.trim_end();
            if !line.is_empty() {
                console::log!(line.to_string());
            }
        }
    }

    impl<'a> MakeWriter<'a> for ConsoleWriter {
        type Writer = ConsoleLine;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleLine { buffer: Vec::new() }
        }
    }
}
