//! DOM event wiring: every listener turns its event into a `Message`

use std::rc::Rc;

use mmcalc_app::{
    FieldSnapshot, FieldValue, InputKey, KeyPress, KeyTarget, Message, Modifiers, PageSnapshot,
};
use mmcalc_core::prelude::*;
use mmcalc_core::{FieldId, FieldKind, FormId, Rect};
use wasm_bindgen::prelude::*;
use web_sys::{
    Event, EventTarget, HtmlInputElement, KeyboardEvent, MutationObserver, MutationObserverInit,
    MutationRecord,
};

use super::host::Host;
use super::js_error;
use super::scan;

const EDITABLE: &str = "input, textarea, select";

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<()> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| js_error(event, e))?;
    // Listeners live as long as the page
    closure.forget();
    Ok(())
}

pub(crate) fn install(host: &Rc<Host>, dom: &web_sys::Document, page: &PageSnapshot) -> Result<()> {
    for form in &page.forms {
        let fields: Vec<(&FieldSnapshot, HtmlInputElement)> = form
            .fields
            .iter()
            .filter_map(|f| {
                host.with_document(|doc| doc.field_element(f.id))
                    .flatten()
                    .map(|el| (f, el))
            })
            .collect();

        let values = fields.iter().map(|(f, el)| (f.id, el.clone())).collect();
        install_submit(host, form.id, values)?;

        for (snapshot, input) in &fields {
            let id = snapshot.id;
            let formula = FieldKind::classify(&snapshot.name, &snapshot.input_type).is_formula();
            if snapshot.required || formula {
                install_edit(host, id, input)?;
            }
            if formula {
                let h = Rc::clone(host);
                listen(input, "focus", move |_| h.post(Message::FieldFocus { field: id }))?;
            }
        }
    }

    install_keys(host, dom)?;
    install_tooltips(host)?;
    install_heading_observer(host, dom)?;
    Ok(())
}

fn install_submit(
    host: &Rc<Host>,
    form: FormId,
    fields: Vec<(FieldId, HtmlInputElement)>,
) -> Result<()> {
    let Some(element) = host.with_document(|doc| doc.form_element(form)).flatten() else {
        return Err(Error::unknown_element("form", form.0));
    };

    let h = Rc::clone(host);
    listen(&element, "submit", move |event| {
        let values = fields
            .iter()
            .map(|(id, input)| FieldValue::new(*id, input.value()))
            .collect();
        h.post(Message::FormSubmit { form, values });

        if h.with_document(|doc| doc.take_cancelled(form)) == Some(true) {
            event.prevent_default();
            event.stop_propagation();
        }
    })
}

fn install_edit(host: &Rc<Host>, field: FieldId, input: &HtmlInputElement) -> Result<()> {
    let h = Rc::clone(host);
    let el = input.clone();
    listen(input, "input", move |_| {
        h.post(Message::FieldInput {
            field,
            value: el.value(),
        })
    })?;

    let h = Rc::clone(host);
    let el = input.clone();
    listen(input, "blur", move |_| {
        h.post(Message::FieldBlur {
            field,
            value: el.value(),
        })
    })
}

fn install_keys(host: &Rc<Host>, dom: &web_sys::Document) -> Result<()> {
    let h = Rc::clone(host);
    listen(dom, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let target = event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.matches(EDITABLE).ok())
            .map_or(KeyTarget::Page, |editable| {
                if editable {
                    KeyTarget::Editable
                } else {
                    KeyTarget::Page
                }
            });

        let press = KeyPress::new(
            InputKey::from_key_value(&key.key()),
            Modifiers {
                ctrl: key.ctrl_key(),
                meta: key.meta_key(),
                shift: key.shift_key(),
                alt: key.alt_key(),
            },
            target,
        );
        h.post(Message::Key { press });
    })
}

fn install_tooltips(host: &Rc<Host>) -> Result<()> {
    let titled = host
        .with_document(|doc| doc.titled_elements())
        .unwrap_or_default();
    let count = titled.len();

    for (id, element) in titled {
        let h = Rc::clone(host);
        let el = element.clone();
        listen(&element, "mouseenter", move |_| {
            let r = el.get_bounding_client_rect();
            h.post(Message::PointerEnter {
                element: id,
                title: el.get_attribute("title").unwrap_or_default(),
                anchor: Rect::new(r.left(), r.top(), r.width(), r.height()),
            });
        })?;

        let h = Rc::clone(host);
        listen(&element, "mouseleave", move |_| {
            h.post(Message::PointerLeave { element: id })
        })?;
    }

    debug!("Tooltip listeners installed on {} element(s)", count);
    Ok(())
}

/// Re-scan result headings whenever result markup is inserted
fn install_heading_observer(host: &Rc<Host>, dom: &web_sys::Document) -> Result<()> {
    let Some(body) = dom.body() else {
        return Ok(());
    };

    let h = Rc::clone(host);
    let callback = Closure::wrap(Box::new(move |records: js_sys::Array, _: MutationObserver| {
        let relevant = records
            .iter()
            .filter_map(|r| r.dyn_into::<MutationRecord>().ok())
            .any(|record| {
                scan::nodes::<web_sys::Element>(record.added_nodes())
                    .iter()
                    .any(scan::may_hold_result_heading)
            });
        if !relevant {
            return;
        }

        match h.with_document(scan::rescan_headings) {
            Some(Ok((headings, next_free_id))) if !headings.is_empty() => {
                h.post(Message::ResultHeadingsFound {
                    headings,
                    next_free_id,
                });
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => warn!("Result heading re-scan failed: {}", e),
            None => debug!("controller busy, heading re-scan skipped"),
        }
    }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>);

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())
        .map_err(|e| js_error("MutationObserver", e))?;
    let init = MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);
    observer
        .observe_with_options(&body, &init)
        .map_err(|e| js_error("observe body", e))?;

    // Observes for the lifetime of the page
    callback.forget();
    Ok(())
}
