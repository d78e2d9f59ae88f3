//! Page scan: register elements and describe them to the controller

use mmcalc_app::{ButtonSnapshot, FieldSnapshot, FormSnapshot, HeadingSnapshot, PageSnapshot};
use mmcalc_core::prelude::*;
use mmcalc_core::{InputType, COPY_BUTTON_CLASS};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlFormElement, HtmlInputElement, NodeList};

use super::document::WebDocument;
use super::{js_error, window};

const RESULT_HEADINGS: &str = ".result-box h4";
const RESULT_BOX_AREA: &str = ".result-box, .result-box *";
const SUBMIT_BUTTON: &str = "button[type=\"submit\"]";

/// Elements of a `NodeList` that are of type `T`
pub(crate) fn nodes<T: JsCast>(list: NodeList) -> Vec<T> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

pub(crate) fn select_all<T: JsCast>(root: &Element, selector: &str) -> Result<Vec<T>> {
    root.query_selector_all(selector)
        .map(nodes)
        .map_err(|e| js_error(selector, e))
}

pub(crate) fn scan_page(doc: &mut WebDocument) -> Result<PageSnapshot> {
    let dom = doc.dom().clone();
    let forms: Vec<HtmlFormElement> = dom
        .query_selector_all("form")
        .map(nodes)
        .map_err(|e| js_error("form", e))?;

    let mut snapshots = Vec::with_capacity(forms.len());
    for form in forms {
        snapshots.push(scan_form(doc, form)?);
    }

    let headings = scan_headings(doc, &dom)?;

    // Registered now so their ids stay below `next_free_id`
    let titled: Vec<HtmlElement> = dom
        .query_selector_all("[title]")
        .map(nodes)
        .map_err(|e| js_error("[title]", e))?;
    for element in titled {
        doc.register_titled(element);
    }
    let origin = window()?.location().origin().ok();

    debug!(
        "Scanned {} form(s) and {} result heading(s)",
        snapshots.len(),
        headings.len()
    );
    Ok(PageSnapshot {
        origin,
        forms: snapshots,
        headings,
        next_free_id: doc.next_free_id(),
    })
}

fn scan_form(doc: &mut WebDocument, form: HtmlFormElement) -> Result<FormSnapshot> {
    let submit_button = form
        .query_selector(SUBMIT_BUTTON)
        .map_err(|e| js_error(SUBMIT_BUTTON, e))?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|button| {
            let label = button.inner_html();
            ButtonSnapshot {
                id: doc.register_element(button),
                label,
            }
        });

    let inputs: Vec<HtmlInputElement> = select_all(&form, "input")?;
    let fields = inputs
        .into_iter()
        .map(|input| FieldSnapshot {
            name: input.name(),
            input_type: InputType::from_attribute(input.get_attribute("type").as_deref()),
            required: input.has_attribute("required"),
            placeholder: input.get_attribute("placeholder"),
            value: input.value(),
            id: doc.register_field(input),
        })
        .collect();

    Ok(FormSnapshot {
        id: doc.register_form(form),
        submit_button,
        fields,
    })
}

/// Scan result headings again after the page changed
///
/// Known headings keep their ids. Returns the headings with the host's next
/// free id.
pub(crate) fn rescan_headings(doc: &mut WebDocument) -> Result<(Vec<HeadingSnapshot>, u32)> {
    let dom = doc.dom().clone();
    let headings = scan_headings(doc, &dom)?;
    Ok((headings, doc.next_free_id()))
}

/// Whether a node inserted into the page may carry a result heading
pub(crate) fn may_hold_result_heading(element: &Element) -> bool {
    if element.class_list().contains(COPY_BUTTON_CLASS) {
        return false;
    }
    element.matches(RESULT_BOX_AREA).unwrap_or(false)
        || element.query_selector(RESULT_HEADINGS).ok().flatten().is_some()
}

fn scan_headings(doc: &mut WebDocument, dom: &web_sys::Document) -> Result<Vec<HeadingSnapshot>> {
    let headings: Vec<HtmlElement> = dom
        .query_selector_all(RESULT_HEADINGS)
        .map(nodes)
        .map_err(|e| js_error(RESULT_HEADINGS, e))?;

    let control_selector = format!(".{COPY_BUTTON_CLASS}");
    headings
        .into_iter()
        .map(|heading| {
            let has_copy_control = heading
                .query_selector(&control_selector)
                .map_err(|e| js_error("copy control lookup", e))?
                .is_some();
            Ok(HeadingSnapshot {
                id: doc.register_element(heading),
                has_copy_control,
            })
        })
        .collect()
}
