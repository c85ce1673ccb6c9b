#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Telemetry primitives for the web front-end.
//!
//! This crate centralises logging setup and the error-reporting client so the
//! browser entry point and native tooling share a consistent observability story.
//! Layout: `init.rs` (tracing subscriber), `dsn.rs` (endpoint parsing),
//! `options.rs` (client options + sampling), `event.rs` (event and envelope
//! payloads), `reporter.rs` (the process-wide reporter), `error.rs`.

pub mod dsn;
pub mod error;
pub mod event;
pub mod init;
pub mod options;
pub mod reporter;

pub use dsn::Dsn;
pub use error::{Result, TelemetryError};
pub use event::{Envelope, ErrorEvent, Level, TransactionEvent};
pub use init::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, MakeWriter, init_logging, init_logging_with_writer,
};
pub use options::{Integration, TRACES_SAMPLE_RATE, TelemetryOptions, TracesSampler};
pub use reporter::{EnvelopeRequest, ErrorReporter, Transport, install, installed, reporter};
