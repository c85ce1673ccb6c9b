//! Offline caching worker decisions.
//!
//! # Design
//! - The register/unregister choice is a pure function of the normalized flag.
//! - Lifecycle interpretation (update vs first install) is kept DOM-free so it can be
//!   tested natively; `app::worker` only translates browser events into these types.

use std::net::IpAddr;
use yew::Callback;

/// Script served at the site root that implements the caching strategy.
pub const SERVICE_WORKER_URL: &str = "/service-worker.js";
/// Message asking a waiting worker to activate immediately.
pub const SKIP_WAITING_MESSAGE: &str = "SKIP_WAITING";

/// Outcome of the worker flag evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerDecision {
    /// Register the caching worker.
    Register,
    /// Remove any previously registered worker.
    Unregister,
}

impl WorkerDecision {
    /// Register when enabled, otherwise explicitly unregister.
    #[must_use]
    pub const fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::Register } else { Self::Unregister }
    }

    /// Stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Unregister => "unregister",
        }
    }
}

/// Options for registering the worker.
#[derive(Clone, Debug, PartialEq)]
pub struct RegisterOptions {
    /// Worker script URL.
    pub script_url: &'static str,
    /// Invoked when a newer cached version is waiting to take over.
    pub on_update: Callback<()>,
}

impl RegisterOptions {
    /// Options for the default worker script.
    #[must_use]
    pub const fn new(on_update: Callback<()>) -> Self {
        Self {
            script_url: SERVICE_WORKER_URL,
            on_update,
        }
    }
}

/// When registration should start relative to the window `load` event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterTiming {
    /// The page has already loaded; start now.
    Immediately,
    /// Wait for `load` so registration does not compete with page assets.
    AfterLoad,
}

impl RegisterTiming {
    /// Pick the timing from `document.readyState`.
    ///
    /// The wasm module usually finishes instantiating after `load` has fired, so
    /// waiting for the event unconditionally would never register.
    #[must_use]
    pub fn from_ready_state(ready_state: &str) -> Self {
        if ready_state == "complete" {
            Self::Immediately
        } else {
            Self::AfterLoad
        }
    }
}

/// Installing worker state, mirroring the browser enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerState {
    /// Script parsed.
    Parsed,
    /// Install event running.
    Installing,
    /// Installed and waiting.
    Installed,
    /// Activate event running.
    Activating,
    /// Controlling pages.
    Activated,
    /// Replaced or failed.
    Redundant,
}

/// Lifecycle milestones surfaced to the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerLifecycle {
    /// New content is available and will be used once existing tabs close.
    UpdateAvailable,
    /// Content has been cached for offline use on first install.
    ContentCached,
}

/// Interpret a state change of the installing worker.
///
/// An installed worker with an existing controller means the page runs older
/// cached content; without a controller this is the first install.
#[must_use]
pub const fn lifecycle_event(state: WorkerState, has_controller: bool) -> Option<WorkerLifecycle> {
    match (state, has_controller) {
        (WorkerState::Installed, true) => Some(WorkerLifecycle::UpdateAvailable),
        (WorkerState::Installed, false) => Some(WorkerLifecycle::ContentCached),
        _ => None,
    }
}

/// Whether the page is served from a loopback host.
#[must_use]
pub fn is_localhost(hostname: &str) -> bool {
    let host = hostname.trim().to_ascii_lowercase();
    host == "localhost"
        || host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|addr| addr.is_loopback())
}

/// On localhost the worker script is checked before registering: a missing script
/// or a non-JavaScript response means a different app owns the origin.
#[must_use]
pub fn script_looks_valid(status: u16, content_type: Option<&str>) -> bool {
    status != 404
        && content_type.is_some_and(|value| value.to_ascii_lowercase().contains("javascript"))
}
