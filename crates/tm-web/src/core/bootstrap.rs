//! One-shot startup sequence.
//!
//! # Design
//! - Order is fixed: telemetry, fonts, mount, worker decision.
//! - Side effects go through [`BootstrapHost`] so the sequence runs natively in tests.
//! - Only the mount step can fail; everything else is best-effort and reports through logs.

use thiserror::Error;
use tm_config::AppConfig;
use tm_telemetry::TelemetryOptions;
use tracing::{debug, info};
use yew::Callback;

use crate::core::fonts::FontRequest;
use crate::core::providers::ProviderStack;
use crate::core::worker::{RegisterOptions, WorkerDecision};

/// DOM id of the element the application mounts into.
pub const MOUNT_TARGET_ID: &str = "root";

/// Errors that abort the bootstrap sequence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BootstrapError {
    /// The host document has no mount target.
    #[error("mount target missing from host document")]
    MountTargetMissing {
        /// Element id that was looked up.
        id: String,
    },
    /// The host document itself is unavailable.
    #[error("host document unavailable")]
    DocumentUnavailable,
}

/// Convenience alias for bootstrap results.
pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// Side effects performed by the sequence.
pub trait BootstrapHost {
    /// Construct the telemetry client and register the global error handler.
    fn init_telemetry(&mut self, options: TelemetryOptions);
    /// Request fonts without waiting for them.
    fn load_fonts(&mut self, request: &FontRequest);
    /// Render the provider-wrapped root component into `target_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::MountTargetMissing`] when the element does not exist.
    fn mount(&mut self, target_id: &str, providers: &ProviderStack) -> BootstrapResult<()>;
    /// Register the caching worker without waiting for the result.
    fn register_worker(&mut self, options: RegisterOptions);
    /// Remove any active caching worker without waiting for the result.
    fn unregister_worker(&mut self);
}

/// What the sequence did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Whether a telemetry client was requested.
    pub telemetry_initialized: bool,
    /// Which worker branch ran.
    pub worker: WorkerDecision,
}

/// Telemetry options for a configuration bundle; `None` skips initialization.
#[must_use]
pub fn telemetry_options(config: &AppConfig) -> Option<TelemetryOptions> {
    config
        .telemetry_dsn()
        .filter(|dsn| !dsn.trim().is_empty())
        .map(|dsn| TelemetryOptions::browser(dsn, config.environment.clone()))
}

/// Run the bootstrap sequence once.
///
/// # Errors
///
/// Returns an error when the root component cannot be mounted; the worker step is
/// not attempted in that case.
pub fn run<H: BootstrapHost>(
    config: &AppConfig,
    on_update: Callback<()>,
    host: &mut H,
) -> BootstrapResult<BootstrapReport> {
    let telemetry = telemetry_options(config);
    let telemetry_initialized = telemetry.is_some();
    match telemetry {
        Some(options) => host.init_telemetry(options),
        None => debug!("telemetry dsn not configured; skipping error reporting"),
    }

    host.load_fonts(&FontRequest::default());

    host.mount(MOUNT_TARGET_ID, &ProviderStack::standard())?;

    let worker = WorkerDecision::from_enabled(config.service_worker_enabled);
    match worker {
        WorkerDecision::Register => host.register_worker(RegisterOptions::new(on_update)),
        WorkerDecision::Unregister => host.unregister_worker(),
    }

    info!(
        telemetry = telemetry_initialized,
        worker = worker.as_str(),
        "bootstrap complete"
    );
    Ok(BootstrapReport {
        telemetry_initialized,
        worker,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telemetry_options_require_a_dsn() {
        let mut config = AppConfig::default();
        assert!(telemetry_options(&config).is_none());

        config.sentry_dsn = Some("   ".into());
        assert!(telemetry_options(&config).is_none());

        config.sentry_dsn = Some("https://k@ingest.example.io/1".into());
        config.environment = Some("prod".into());
        let options = telemetry_options(&config);
        assert_eq!(
            options.map(|o| (o.dsn, o.environment)),
            Some((
                "https://k@ingest.example.io/1".to_string(),
                Some("prod".to_string())
            ))
        );
    }

    #[test]
    fn mount_error_names_the_target() {
        let err = BootstrapError::MountTargetMissing {
            id: MOUNT_TARGET_ID.into(),
        };
        assert_eq!(err.to_string(), "mount target missing from host document");
    }
}
