//! Stylesheet-based web font loader.

use crate::app::js_error;
use crate::core::fonts::{FontRequest, FontStatus};
use anyhow::{Context, Result};
use gloo::events::EventListener;
use gloo::utils::document;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::HtmlLinkElement;

/// Append the stylesheet link and track its outcome on `<html>`.
pub(crate) fn load(request: &FontRequest) -> Result<()> {
    let document = document();
    let head = document.head().context("document has no <head>")?;
    let link: HtmlLinkElement = document
        .create_element("link")
        .map_err(|err| js_error("create_element", &err))?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("created element is not a link"))?;
    link.set_rel("stylesheet");
    link.set_href(&request.stylesheet_url());

    set_status(FontStatus::Loading);
    let families = request.families().len();
    EventListener::once(&link, "load", move |_| {
        debug!(families, "web fonts active");
        set_status(FontStatus::Active);
    })
    .forget();
    EventListener::once(&link, "error", |_| {
        warn!("web font stylesheet failed to load; using fallbacks");
        set_status(FontStatus::Inactive);
    })
    .forget();

    head.append_child(&link)
        .map_err(|err| js_error("append_child", &err))?;
    Ok(())
}

fn set_status(status: FontStatus) {
    let Some(root) = document().document_element() else {
        return;
    };
    let classes = root.class_list();
    for stale in FontStatus::all() {
        let _ = classes.remove_1(stale.class());
    }
    let _ = classes.add_1(status.class());
}
