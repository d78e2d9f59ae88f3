//! `Document` port over the live DOM

use std::collections::{HashMap, HashSet};
use std::rc::Weak;

use mmcalc_app::{Document, Message};
use mmcalc_core::prelude::*;
use mmcalc_core::{
    tooltip_position, ElementContent, ElementId, FieldId, FormId, Rect, Size, ValidationState,
    ERROR_FEEDBACK_CLASS, INVALID_CLASS, TOOLTIP_CLASS, VALID_CLASS,
};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, HtmlFormElement, HtmlInputElement};

use super::host::{post_weak, Host};
use super::{clipboard, js_error, window};

const TOOLTIP_STYLE: &str = "position: absolute; background: var(--bs-dark); \
    color: var(--bs-light); padding: 0.5rem; border-radius: 0.25rem; \
    font-size: 0.875rem; z-index: 1000; pointer-events: none; \
    box-shadow: 0 2px 4px rgba(0,0,0,0.2);";

const COPY_BUTTON_CLASSES: &str = "btn btn-sm btn-outline-secondary copy-btn ms-2";

pub(crate) struct WebDocument {
    dom: web_sys::Document,
    host: Weak<Host>,
    tooltip_gap: f64,

    forms: HashMap<FormId, HtmlFormElement>,
    fields: HashMap<FieldId, HtmlInputElement>,
    elements: HashMap<ElementId, HtmlElement>,
    /// Elements with a `title`, in document order
    titled: Vec<ElementId>,
    next_id: u32,

    tooltip: Option<HtmlElement>,
    /// Forms whose in-flight submit event must be cancelled
    cancelled: HashSet<FormId>,
    outbox: Vec<Message>,
}

impl WebDocument {
    pub(crate) fn new(dom: web_sys::Document, host: Weak<Host>, tooltip_gap: f64) -> Self {
        Self {
            dom,
            host,
            tooltip_gap,
            forms: HashMap::new(),
            fields: HashMap::new(),
            elements: HashMap::new(),
            titled: Vec::new(),
            next_id: 0,
            tooltip: None,
            cancelled: HashSet::new(),
            outbox: Vec::new(),
        }
    }

    pub(crate) fn dom(&self) -> &web_sys::Document {
        &self.dom
    }

    // ─────────────────────────────────────────────────────────
    // Registry
    // ─────────────────────────────────────────────────────────

    fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// First id not yet handed out
    pub(crate) fn next_free_id(&self) -> u32 {
        self.next_id
    }

    pub(crate) fn register_form(&mut self, form: HtmlFormElement) -> FormId {
        let id = FormId(self.allocate());
        self.forms.insert(id, form);
        id
    }

    pub(crate) fn register_field(&mut self, input: HtmlInputElement) -> FieldId {
        let id = FieldId(self.allocate());
        self.fields.insert(id, input);
        id
    }

    /// Register an element, reusing its id if it is already known
    pub(crate) fn register_element(&mut self, element: HtmlElement) -> ElementId {
        if let Some((&id, _)) = self.elements.iter().find(|(_, e)| **e == element) {
            return id;
        }
        let id = ElementId(self.allocate());
        self.elements.insert(id, element);
        id
    }

    pub(crate) fn register_titled(&mut self, element: HtmlElement) -> ElementId {
        let id = self.register_element(element);
        self.titled.push(id);
        id
    }

    pub(crate) fn titled_elements(&self) -> Vec<(ElementId, HtmlElement)> {
        self.titled
            .iter()
            .filter_map(|id| self.elements.get(id).map(|el| (*id, el.clone())))
            .collect()
    }

    pub(crate) fn field_element(&self, id: FieldId) -> Option<HtmlInputElement> {
        self.fields.get(&id).cloned()
    }

    pub(crate) fn form_element(&self, id: FormId) -> Option<HtmlFormElement> {
        self.forms.get(&id).cloned()
    }

    /// Whether the submit event just dispatched for `form` must be cancelled
    pub(crate) fn take_cancelled(&mut self, form: FormId) -> bool {
        self.cancelled.remove(&form)
    }

    fn field(&self, id: FieldId) -> Result<&HtmlInputElement> {
        self.fields
            .get(&id)
            .ok_or_else(|| Error::unknown_element("field", id.0))
    }

    fn element_ref(&self, id: ElementId) -> Result<&HtmlElement> {
        self.elements
            .get(&id)
            .ok_or_else(|| Error::unknown_element("element", id.0))
    }

    fn body(&self) -> Result<HtmlElement> {
        self.dom.body().ok_or_else(|| Error::dom("document has no body"))
    }

    fn create<T: JsCast>(&self, tag: &str) -> Result<T> {
        self.dom
            .create_element(tag)
            .map_err(|e| js_error("create_element", e))?
            .dyn_into::<T>()
            .map_err(|_| Error::dom(format!("<{tag}> has an unexpected type")))
    }

    pub(crate) fn push_message(&mut self, message: Message) {
        self.outbox.push(message);
    }
}

impl Document for WebDocument {
    fn set_field_value(&mut self, field: FieldId, value: &str) -> Result<()> {
        self.field(field)?.set_value(value);
        Ok(())
    }

    fn set_validation(&mut self, field: FieldId, state: ValidationState) -> Result<()> {
        let classes = self.field(field)?.class_list();
        classes
            .remove_2(VALID_CLASS, INVALID_CLASS)
            .map_err(|e| js_error("classList.remove", e))?;
        if let Some(class) = state.css_class() {
            classes
                .add_1(class)
                .map_err(|e| js_error("classList.add", e))?;
        }
        Ok(())
    }

    fn show_field_error(&mut self, field: FieldId, message: &str) -> Result<()> {
        self.hide_field_error(field)?;

        let parent = self
            .field(field)?
            .parent_node()
            .ok_or_else(|| Error::dom(format!("{field} is detached")))?;
        let node: HtmlElement = self.create("div")?;
        node.set_class_name(ERROR_FEEDBACK_CLASS);
        node.set_text_content(Some(message));
        parent
            .append_child(&node)
            .map_err(|e| js_error("append error node", e))?;
        Ok(())
    }

    fn hide_field_error(&mut self, field: FieldId) -> Result<()> {
        let Some(parent) = self.field(field)?.parent_element() else {
            return Ok(());
        };
        let selector = format!(".{ERROR_FEEDBACK_CLASS}");
        if let Some(existing) = parent
            .query_selector(&selector)
            .map_err(|e| js_error("query error node", e))?
        {
            existing.remove();
        }
        Ok(())
    }

    fn focus_field(&mut self, field: FieldId) -> Result<()> {
        self.field(field)?
            .focus()
            .map_err(|e| js_error("focus", e))
    }

    fn set_placeholder(&mut self, field: FieldId, placeholder: Option<&str>) -> Result<()> {
        let input = self.field(field)?;
        match placeholder {
            Some(text) => input.set_placeholder(text),
            None => input
                .remove_attribute("placeholder")
                .map_err(|e| js_error("remove placeholder", e))?,
        }
        Ok(())
    }

    fn set_content(&mut self, element: ElementId, content: &ElementContent) -> Result<()> {
        let el = self.element_ref(element)?;
        match content {
            ElementContent::Text(text) => el.set_text_content(Some(text)),
            ElementContent::Markup(markup) => el.set_inner_html(markup),
        }
        Ok(())
    }

    fn set_disabled(&mut self, element: ElementId, disabled: bool) -> Result<()> {
        let el = self.element_ref(element)?;
        if let Some(button) = el.dyn_ref::<web_sys::HtmlButtonElement>() {
            button.set_disabled(disabled);
            return Ok(());
        }
        el.toggle_attribute_with_force("disabled", disabled)
            .map(|_| ())
            .map_err(|e| js_error("toggle disabled", e))
    }

    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool) -> Result<()> {
        self.element_ref(element)?
            .class_list()
            .toggle_with_force(class, enabled)
            .map(|_| ())
            .map_err(|e| js_error("classList.toggle", e))
    }

    fn cancel_submit(&mut self, form: FormId) -> Result<()> {
        self.cancelled.insert(form);
        Ok(())
    }

    fn submit_form(&mut self, form: FormId) -> Result<()> {
        // HTMLFormElement.submit() does not fire a submit event
        self.forms
            .get(&form)
            .ok_or_else(|| Error::unknown_element("form", form.0))?
            .submit()
            .map_err(|e| js_error("form.submit", e))
    }

    fn navigate(&mut self, url: &str) -> Result<()> {
        window()?
            .location()
            .set_href(url)
            .map_err(|e| js_error("location.href", e))
    }

    fn show_tooltip(&mut self, owner: ElementId, text: &str, anchor: Rect) -> Result<()> {
        self.hide_tooltip()?;

        let tooltip: HtmlElement = self.create("div")?;
        tooltip.set_class_name(TOOLTIP_CLASS);
        tooltip.set_text_content(Some(text));
        tooltip.style().set_css_text(TOOLTIP_STYLE);
        self.body()?
            .append_child(&tooltip)
            .map_err(|e| js_error("append tooltip", e))?;

        // Measured after insertion
        let size = Size {
            width: f64::from(tooltip.offset_width()),
            height: f64::from(tooltip.offset_height()),
        };
        let at = tooltip_position(anchor, size, self.tooltip_gap);
        let style = tooltip.style();
        style
            .set_property("left", &format!("{}px", at.left))
            .and_then(|_| style.set_property("top", &format!("{}px", at.top)))
            .map_err(|e| js_error("position tooltip", e))?;

        trace!("tooltip for {} at ({}, {})", owner, at.left, at.top);
        self.tooltip = Some(tooltip);
        Ok(())
    }

    fn hide_tooltip(&mut self) -> Result<()> {
        if let Some(tooltip) = self.tooltip.take() {
            tooltip.remove();
        }
        Ok(())
    }

    fn attach_copy_button(
        &mut self,
        heading: ElementId,
        control: ElementId,
        label: &str,
        title: &str,
    ) -> Result<()> {
        let heading_el = self.element_ref(heading)?.clone();

        let button: web_sys::HtmlButtonElement = self.create("button")?;
        button.set_class_name(COPY_BUTTON_CLASSES);
        button.set_inner_html(label);
        button.set_title(title);

        let host = self.host.clone();
        let text_source = heading_el.clone();
        let own = button.clone();
        let on_click = Closure::wrap(Box::new(move |event: web_sys::Event| {
            event.prevent_default();
            // The control is the heading's last child; leave its feedback text out
            let full = text_source.text_content().unwrap_or_default();
            let own_text = own.text_content().unwrap_or_default();
            let heading_text = full
                .strip_suffix(own_text.as_str())
                .unwrap_or(&full)
                .to_string();
            post_weak(
                &host,
                Message::CopyControlClicked {
                    control,
                    heading_text,
                },
            );
        }) as Box<dyn FnMut(web_sys::Event)>);
        button
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(|e| js_error("copy click listener", e))?;
        on_click.forget();

        heading_el
            .append_child(&button)
            .map_err(|e| js_error("append copy control", e))?;

        // The controller picked this id; never hand it out again
        self.next_id = self.next_id.max(control.0 + 1);
        self.elements.insert(control, button.unchecked_into());
        Ok(())
    }

    fn write_clipboard(&mut self, trigger: ElementId, text: &str) -> Result<()> {
        clipboard::write_modern(self.host.clone(), trigger, text)
    }

    fn fallback_copy(&mut self, trigger: ElementId, text: &str) -> Result<()> {
        let ok = clipboard::copy_with_textarea(self, text)?;
        self.push_message(Message::ClipboardResult {
            trigger,
            method: mmcalc_app::ClipboardMethod::Fallback,
            ok,
        });
        Ok(())
    }

    fn take_messages(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.outbox)
    }
}
