//! Clipboard writes: async Clipboard API, then the hidden textarea fallback

use std::rc::Weak;

use mmcalc_app::{ClipboardMethod, Message};
use mmcalc_core::prelude::*;
use mmcalc_core::ElementId;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement};

use super::document::WebDocument;
use super::host::{post_weak, Host};
use super::{js_error, window};

/// Start `navigator.clipboard.writeText`
///
/// Fails immediately when the API is missing (insecure context, old
/// browser). Otherwise the outcome is posted as a `ClipboardResult` once the
/// promise settles.
pub(crate) fn write_modern(host: Weak<Host>, trigger: ElementId, text: &str) -> Result<()> {
    let navigator = window()?.navigator();
    let api = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .map_err(|e| js_error("navigator.clipboard", e))?;
    if api.is_undefined() || api.is_null() {
        return Err(Error::clipboard("navigator.clipboard is not available"));
    }

    let promise = navigator.clipboard().write_text(text);
    wasm_bindgen_futures::spawn_local(async move {
        let ok = match JsFuture::from(promise).await {
            Ok(_) => true,
            Err(e) => {
                debug!("clipboard.writeText rejected: {:?}", e);
                false
            }
        };
        post_weak(
            &host,
            Message::ClipboardResult {
                trigger,
                method: ClipboardMethod::Modern,
                ok,
            },
        );
    });
    Ok(())
}

/// Copy through an off-screen textarea and `execCommand("copy")`
///
/// Returns whether the browser reported the copy as done.
pub(crate) fn copy_with_textarea(doc: &WebDocument, text: &str) -> Result<bool> {
    let dom = doc.dom();
    let body = dom.body().ok_or_else(|| Error::dom("document has no body"))?;

    let area: HtmlTextAreaElement = dom
        .create_element("textarea")
        .map_err(|e| js_error("create textarea", e))?
        .dyn_into()
        .map_err(|_| Error::dom("<textarea> has an unexpected type"))?;
    area.set_value(text);
    let style = area.style();
    for (name, value) in [("position", "fixed"), ("left", "-999999px"), ("top", "-999999px")] {
        style
            .set_property(name, value)
            .map_err(|e| js_error("style textarea", e))?;
    }

    body.append_child(&area)
        .map_err(|e| js_error("append textarea", e))?;
    let _ = area.focus();
    area.select();

    let copied = dom
        .dyn_ref::<HtmlDocument>()
        .ok_or_else(|| Error::clipboard("execCommand needs an HTML document"))
        .and_then(|html| {
            html.exec_command("copy")
                .map_err(|e| Error::clipboard(format!("execCommand failed: {e:?}")))
        });

    area.remove();
    copied
}
