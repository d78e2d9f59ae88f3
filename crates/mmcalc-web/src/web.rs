use mmcalc_app::{Message, Settings};
use mmcalc_core::prelude::*;
use wasm_bindgen::prelude::*;

mod clipboard;
mod document;
mod host;
mod listeners;
mod scan;
mod scheduler;

use host::Host;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = when_ready(run) {
        error!("Form layer failed to start: {}", e);
    }
}

/// Run `f` once the DOM is parsed
fn when_ready(f: fn() -> Result<()>) -> Result<()> {
    let dom = dom()?;
    if dom.ready_state() != "loading" {
        return f();
    }

    let callback = Closure::once_into_js(move || {
        if let Err(e) = f() {
            error!("Form layer failed to start: {}", e);
        }
    });
    dom.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .map_err(|e| js_error("DOMContentLoaded listener", e))
}

fn run() -> Result<()> {
    let dom = dom()?;
    let host = Host::new(Settings::default(), dom.clone());

    let page = host
        .with_document(scan::scan_page)
        .ok_or_else(|| Error::dom("controller busy during page scan"))??;

    // Tooltips are bound before copy controls exist, so those never get one
    listeners::install(&host, &dom, &page)?;

    host.post(Message::PageLoaded { page });
    Ok(())
}

fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| Error::dom("no window"))
}

fn dom() -> Result<web_sys::Document> {
    window()?
        .document()
        .ok_or_else(|| Error::dom("no document"))
}

pub(crate) fn js_error(context: &str, value: JsValue) -> Error {
    Error::dom(format!("{context}: {value:?}"))
}
