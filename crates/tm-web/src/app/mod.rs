//! Browser entry point and the host that performs bootstrap side effects.
//!
//! # Design
//! - `run_app` resolves configuration, builds the shared context once, then hands
//!   control to the DOM-free sequence in `core::bootstrap`.
//! - `BrowserHost` is the only `BootstrapHost` that touches the DOM.

mod context;
mod fonts;
mod preferences;
mod providers;
mod routes;
mod telemetry;
pub(crate) mod worker;

pub(crate) use context::AppContext;
pub(crate) use routes::Route;

use crate::components::shell::TmApp;
use crate::core::bootstrap::{self, BootstrapError, BootstrapHost, BootstrapResult};
use crate::core::fonts::FontRequest;
use crate::core::providers::ProviderStack;
use crate::core::store::AppStore;
use crate::core::worker::RegisterOptions;
use gloo::utils::window;
use js_sys::{JSON, Reflect};
use std::rc::Rc;
use tm_config::AppConfig;
use tm_telemetry::TelemetryOptions;
use tracing::{info, warn};
use wasm_bindgen::JsValue;
use yew::prelude::*;
use yewdux::prelude::Dispatch;

/// Global the hosting page may set to override build-time configuration.
const RUNTIME_CONFIG_GLOBAL: &str = "__TM_CONFIG__";

/// Wrap a JS exception with the operation that raised it.
pub(crate) fn js_error(operation: &'static str, err: &JsValue) -> anyhow::Error {
    let detail = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    anyhow::anyhow!("{operation} failed: {detail}")
}

/// Entry point for the wasm32 build.
///
/// # Errors
///
/// Returns an error when the document has no element to mount into.
pub fn run_app() -> Result<(), BootstrapError> {
    console_error_panic_hook::set_once();
    telemetry::init_console_logging();

    let context = AppContext::new(load_config());
    let config = Rc::clone(&context.config);
    let on_update = update_notifier(context.dispatch.clone());
    let mut host = BrowserHost { context };

    let report = bootstrap::run(&config, on_update, &mut host)?;
    if report.telemetry_initialized {
        telemetry::record_pageload();
    }
    Ok(())
}

struct BrowserHost {
    context: AppContext,
}

impl BootstrapHost for BrowserHost {
    fn init_telemetry(&mut self, options: TelemetryOptions) {
        telemetry::install_reporter(options);
    }

    fn load_fonts(&mut self, request: &FontRequest) {
        if let Err(err) = fonts::load(request) {
            warn!(error = %err, "web font request failed; using fallbacks");
        }
    }

    fn mount(&mut self, target_id: &str, providers: &ProviderStack) -> BootstrapResult<()> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(BootstrapError::DocumentUnavailable)?;
        let root = document
            .get_element_by_id(target_id)
            .ok_or_else(|| BootstrapError::MountTargetMissing {
                id: target_id.to_string(),
            })?;
        let props = BootstrappedProps {
            context: self.context.clone(),
            providers: providers.clone(),
        };
        yew::Renderer::<Bootstrapped>::with_root_and_props(root, props).render();
        info!(element = target_id, "application mounted");
        Ok(())
    }

    fn register_worker(&mut self, options: RegisterOptions) {
        worker::register(options);
    }

    fn unregister_worker(&mut self) {
        worker::unregister();
    }
}

#[derive(Properties, PartialEq)]
struct BootstrappedProps {
    context: AppContext,
    providers: ProviderStack,
}

#[function_component(Bootstrapped)]
fn bootstrapped(props: &BootstrappedProps) -> Html {
    providers::compose(&props.providers, &props.context, html! { <TmApp /> })
}

/// Build-time values overlaid with the page's runtime object, when present.
fn load_config() -> AppConfig {
    match runtime_config_json() {
        Some(raw) => tm_config::load_from_str(&raw).unwrap_or_else(|err| {
            warn!(error = %err, "ignoring runtime configuration");
            fallback_config()
        }),
        None => fallback_config(),
    }
}

fn fallback_config() -> AppConfig {
    tm_config::load(None).unwrap_or_default()
}

fn runtime_config_json() -> Option<String> {
    let value = Reflect::get(&window(), &JsValue::from_str(RUNTIME_CONFIG_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    JSON::stringify(&value).ok()?.as_string()
}

fn update_notifier(dispatch: Dispatch<AppStore>) -> Callback<()> {
    Callback::from(move |()| {
        dispatch.reduce_mut(|store| store.system.update_available = true);
    })
}
