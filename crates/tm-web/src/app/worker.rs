//! Service worker registration against the browser API.
//!
//! # Design
//! - Both entry points return immediately; the async work runs on detached tasks.
//! - Failures are logged on the task and never reach the bootstrap sequence.

use crate::app::js_error;
use crate::core::worker::{
    RegisterOptions, RegisterTiming, SKIP_WAITING_MESSAGE, WorkerLifecycle, WorkerState,
    is_localhost, lifecycle_event, script_looks_valid,
};
use anyhow::{Result, anyhow};
use gloo::events::EventListener;
use gloo::utils::{document, window};
use gloo_net::http::Request;
use js_sys::{Object, Reflect};
use tracing::{info, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{ServiceWorker, ServiceWorkerContainer, ServiceWorkerRegistration, ServiceWorkerState};

/// Register the caching worker once the page has finished loading.
pub(crate) fn register(options: RegisterOptions) {
    if !supported() {
        info!("service workers unavailable; skipping registration");
        return;
    }
    let start = move || {
        spawn_local(async move {
            let on_localhost = window()
                .location()
                .hostname()
                .map(|host| is_localhost(&host))
                .unwrap_or(false);
            let outcome = if on_localhost {
                check_then_register(options).await
            } else {
                register_valid(options).await
            };
            if let Err(err) = outcome {
                warn!(error = %err, "service worker registration failed");
            }
        });
    };
    match RegisterTiming::from_ready_state(&document().ready_state()) {
        RegisterTiming::Immediately => start(),
        RegisterTiming::AfterLoad => {
            EventListener::once(&window(), "load", move |_| start()).forget();
        }
    }
}

/// Unregister whichever worker currently controls the origin.
pub(crate) fn unregister() {
    if !supported() {
        return;
    }
    spawn_local(async {
        if let Err(err) = unregister_ready().await {
            warn!(error = %err, "service worker unregistration failed");
        }
    });
}

/// Ask the waiting worker to take over, then reload into the new version.
pub(crate) fn activate_waiting() {
    if !supported() {
        reload();
        return;
    }
    spawn_local(async {
        if let Err(err) = skip_waiting().await {
            warn!(error = %err, "failed to activate waiting service worker");
        }
        reload();
    });
}

fn supported() -> bool {
    Reflect::has(&window().navigator(), &JsValue::from_str("serviceWorker")).unwrap_or(false)
}

fn container() -> ServiceWorkerContainer {
    window().navigator().service_worker()
}

async fn check_then_register(options: RegisterOptions) -> Result<()> {
    let response = Request::get(options.script_url)
        .header("Service-Worker", "script")
        .send()
        .await?;
    let content_type = response.headers().get("content-type");
    if script_looks_valid(response.status(), content_type.as_deref()) {
        register_valid(options).await
    } else {
        warn!(
            script = options.script_url,
            "no valid service worker found on localhost; unregistering and reloading"
        );
        unregister_ready().await?;
        reload();
        Ok(())
    }
}

async fn register_valid(options: RegisterOptions) -> Result<()> {
    let registration: ServiceWorkerRegistration =
        JsFuture::from(container().register(options.script_url))
            .await
            .map_err(|err| js_error("serviceWorker.register", &err))?
            .dyn_into()
            .map_err(|_| anyhow!("register did not resolve to a registration"))?;
    info!(scope = %registration.scope(), "service worker registered");

    let watched = registration.clone();
    EventListener::new(&registration, "updatefound", move |_| {
        if let Some(installing) = watched.installing() {
            watch_installing(installing, options.on_update.clone());
        }
    })
    .forget();
    Ok(())
}

fn watch_installing(worker: ServiceWorker, on_update: yew::Callback<()>) {
    let observed = worker.clone();
    EventListener::new(&worker, "statechange", move |_| {
        let has_controller = container().controller().is_some();
        match lifecycle_event(worker_state(observed.state()), has_controller) {
            Some(WorkerLifecycle::UpdateAvailable) => {
                info!("new content is available and will be used when all tabs are closed");
                on_update.emit(());
            }
            Some(WorkerLifecycle::ContentCached) => info!("content is cached for offline use"),
            None => {}
        }
    })
    .forget();
}

async fn ready_registration() -> Result<ServiceWorkerRegistration> {
    let ready = container()
        .ready()
        .map_err(|err| js_error("serviceWorker.ready", &err))?;
    JsFuture::from(ready)
        .await
        .map_err(|err| js_error("serviceWorker.ready", &err))?
        .dyn_into()
        .map_err(|_| anyhow!("ready did not resolve to a registration"))
}

async fn unregister_ready() -> Result<()> {
    let registration = ready_registration().await?;
    let pending = registration
        .unregister()
        .map_err(|err| js_error("registration.unregister", &err))?;
    JsFuture::from(pending)
        .await
        .map_err(|err| js_error("registration.unregister", &err))?;
    info!("service worker unregistered");
    Ok(())
}

async fn skip_waiting() -> Result<()> {
    let registration = ready_registration().await?;
    let Some(waiting) = registration.waiting() else {
        return Ok(());
    };
    let message = Object::new();
    Reflect::set(
        &message,
        &JsValue::from_str("type"),
        &JsValue::from_str(SKIP_WAITING_MESSAGE),
    )
    .map_err(|err| js_error("Reflect.set", &err))?;
    waiting
        .post_message(&message)
        .map_err(|err| js_error("worker.postMessage", &err))
}

fn reload() {
    if let Err(err) = window().location().reload() {
        warn!(error = %js_error("location.reload", &err), "reload failed");
    }
}

const fn worker_state(state: ServiceWorkerState) -> WorkerState {
    match state {
        ServiceWorkerState::Parsed => WorkerState::Parsed,
        ServiceWorkerState::Installing => WorkerState::Installing,
        ServiceWorkerState::Installed => WorkerState::Installed,
        ServiceWorkerState::Activating => WorkerState::Activating,
        ServiceWorkerState::Activated => WorkerState::Activated,
        _ => WorkerState::Redundant,
    }
}
