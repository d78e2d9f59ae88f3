//! In-memory document
//!
//! A [`Document`] that records every mutation in plain data structures. Used
//! by the headless replay and by tests to observe what a page would look like.

use std::collections::{BTreeMap, BTreeSet};

use mmcalc_core::prelude::*;
use mmcalc_core::{
    ElementContent, ElementId, FieldId, FormId, Rect, ValidationState, INVALID_CLASS, VALID_CLASS,
};
use serde::{Deserialize, Serialize};

use crate::message::{ClipboardMethod, Message, PageSnapshot};
use crate::ports::Document;

/// How the simulated clipboard responds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardBehavior {
    /// Modern write succeeds
    #[default]
    Succeed,
    /// Modern write rejects, fallback succeeds
    ModernFails,
    /// Both techniques fail
    AllFail,
    /// No modern API at all, fallback succeeds
    Unavailable,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemoryField {
    pub value: String,
    pub placeholder: Option<String>,
    pub classes: BTreeSet<String>,
    /// `.invalid-feedback` siblings, in insertion order
    pub error_nodes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemoryElement {
    pub content: Option<ElementContent>,
    pub disabled: bool,
    pub classes: BTreeSet<String>,
    /// Copy controls appended to this element
    pub children: Vec<ElementId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryTooltip {
    pub owner: ElementId,
    pub text: String,
    pub anchor: Rect,
}

/// Observable state of a [`MemoryDocument`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentSnapshot {
    pub fields: BTreeMap<FieldId, MemoryField>,
    pub elements: BTreeMap<ElementId, MemoryElement>,
    pub tooltips: Vec<MemoryTooltip>,
    pub focused: Option<FieldId>,
    pub clipboard: Option<String>,
    pub cancelled_submits: Vec<FormId>,
    pub submitted: Vec<FormId>,
    pub navigations: Vec<String>,
}

#[derive(Debug, Default)]
pub struct MemoryDocument {
    page: DocumentSnapshot,
    clipboard_behavior: ClipboardBehavior,
    outbox: Vec<Message>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document containing the fields, buttons and headings of a page
    pub fn from_snapshot(page: &PageSnapshot) -> Self {
        let mut doc = Self::new();

        for form in &page.forms {
            for field in &form.fields {
                doc.page.fields.insert(
                    field.id,
                    MemoryField {
                        value: field.value.clone(),
                        placeholder: field.placeholder.clone(),
                        ..Default::default()
                    },
                );
            }
            if let Some(button) = &form.submit_button {
                doc.page.elements.insert(
                    button.id,
                    MemoryElement {
                        content: Some(ElementContent::markup(button.label.clone())),
                        ..Default::default()
                    },
                );
            }
        }

        for heading in &page.headings {
            doc.add_element(heading.id);
        }

        doc
    }

    pub fn with_clipboard(mut self, behavior: ClipboardBehavior) -> Self {
        self.clipboard_behavior = behavior;
        self
    }

    pub fn set_clipboard_behavior(&mut self, behavior: ClipboardBehavior) {
        self.clipboard_behavior = behavior;
    }

    pub fn clipboard_behavior(&self) -> ClipboardBehavior {
        self.clipboard_behavior
    }

    /// Register an element not described by a page snapshot (tooltip targets, headings)
    pub fn add_element(&mut self, id: ElementId) {
        self.page.elements.entry(id).or_default();
    }

    pub fn snapshot(&self) -> &DocumentSnapshot {
        &self.page
    }

    pub fn field(&self, id: FieldId) -> Option<&MemoryField> {
        self.page.fields.get(&id)
    }

    pub fn element(&self, id: ElementId) -> Option<&MemoryElement> {
        self.page.elements.get(&id)
    }

    pub fn tooltips(&self) -> &[MemoryTooltip] {
        &self.page.tooltips
    }

    pub fn clipboard(&self) -> Option<&str> {
        self.page.clipboard.as_deref()
    }

    pub fn focused(&self) -> Option<FieldId> {
        self.page.focused
    }

    pub fn cancelled_submits(&self) -> &[FormId] {
        &self.page.cancelled_submits
    }

    pub fn submitted(&self) -> &[FormId] {
        &self.page.submitted
    }

    pub fn navigations(&self) -> &[String] {
        &self.page.navigations
    }

    fn field_entry(&mut self, id: FieldId) -> Result<&mut MemoryField> {
        self.page
            .fields
            .get_mut(&id)
            .ok_or_else(|| Error::unknown_element("field", id.0))
    }

    fn element_entry(&mut self, id: ElementId) -> Result<&mut MemoryElement> {
        self.page
            .elements
            .get_mut(&id)
            .ok_or_else(|| Error::unknown_element("element", id.0))
    }

    fn report(&mut self, trigger: ElementId, method: ClipboardMethod, ok: bool) {
        self.outbox.push(Message::ClipboardResult {
            trigger,
            method,
            ok,
        });
    }
}

impl Document for MemoryDocument {
    fn set_field_value(&mut self, field: FieldId, value: &str) -> Result<()> {
        self.field_entry(field)?.value = value.to_string();
        Ok(())
    }

    fn set_validation(&mut self, field: FieldId, state: ValidationState) -> Result<()> {
        let entry = self.field_entry(field)?;
        entry.classes.remove(VALID_CLASS);
        entry.classes.remove(INVALID_CLASS);
        if let Some(class) = state.css_class() {
            entry.classes.insert(class.to_string());
        }
        Ok(())
    }

    fn show_field_error(&mut self, field: FieldId, message: &str) -> Result<()> {
        let entry = self.field_entry(field)?;
        entry.error_nodes.clear();
        entry.error_nodes.push(message.to_string());
        Ok(())
    }

    fn hide_field_error(&mut self, field: FieldId) -> Result<()> {
        self.field_entry(field)?.error_nodes.clear();
        Ok(())
    }

    fn focus_field(&mut self, field: FieldId) -> Result<()> {
        self.field_entry(field)?;
        self.page.focused = Some(field);
        Ok(())
    }

    fn set_placeholder(&mut self, field: FieldId, placeholder: Option<&str>) -> Result<()> {
        self.field_entry(field)?.placeholder = placeholder.map(str::to_string);
        Ok(())
    }

    fn set_content(&mut self, element: ElementId, content: &ElementContent) -> Result<()> {
        self.element_entry(element)?.content = Some(content.clone());
        Ok(())
    }

    fn set_disabled(&mut self, element: ElementId, disabled: bool) -> Result<()> {
        self.element_entry(element)?.disabled = disabled;
        Ok(())
    }

    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool) -> Result<()> {
        let entry = self.element_entry(element)?;
        if enabled {
            entry.classes.insert(class.to_string());
        } else {
            entry.classes.remove(class);
        }
        Ok(())
    }

    fn cancel_submit(&mut self, form: FormId) -> Result<()> {
        self.page.cancelled_submits.push(form);
        Ok(())
    }

    fn submit_form(&mut self, form: FormId) -> Result<()> {
        self.page.submitted.push(form);
        Ok(())
    }

    fn navigate(&mut self, url: &str) -> Result<()> {
        self.page.navigations.push(url.to_string());
        Ok(())
    }

    fn show_tooltip(&mut self, owner: ElementId, text: &str, anchor: Rect) -> Result<()> {
        self.page.tooltips.push(MemoryTooltip {
            owner,
            text: text.to_string(),
            anchor,
        });
        Ok(())
    }

    fn hide_tooltip(&mut self) -> Result<()> {
        if !self.page.tooltips.is_empty() {
            self.page.tooltips.remove(0);
        }
        Ok(())
    }

    fn attach_copy_button(
        &mut self,
        heading: ElementId,
        control: ElementId,
        label: &str,
        _title: &str,
    ) -> Result<()> {
        self.element_entry(heading)?.children.push(control);
        self.page.elements.insert(
            control,
            MemoryElement {
                content: Some(ElementContent::markup(label)),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn write_clipboard(&mut self, trigger: ElementId, text: &str) -> Result<()> {
        match self.clipboard_behavior {
            ClipboardBehavior::Unavailable => Err(Error::clipboard("navigator.clipboard missing")),
            ClipboardBehavior::Succeed => {
                self.page.clipboard = Some(text.to_string());
                self.report(trigger, ClipboardMethod::Modern, true);
                Ok(())
            }
            ClipboardBehavior::ModernFails | ClipboardBehavior::AllFail => {
                self.report(trigger, ClipboardMethod::Modern, false);
                Ok(())
            }
        }
    }

    fn fallback_copy(&mut self, trigger: ElementId, text: &str) -> Result<()> {
        let ok = self.clipboard_behavior != ClipboardBehavior::AllFail;
        if ok {
            self.page.clipboard = Some(text.to_string());
        }
        self.report(trigger, ClipboardMethod::Fallback, ok);
        Ok(())
    }

    fn take_messages(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.outbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_nodes_are_replaced_not_stacked() {
        let mut doc = MemoryDocument::new();
        doc.page.fields.insert(FieldId(1), MemoryField::default());

        doc.show_field_error(FieldId(1), "a").unwrap();
        doc.show_field_error(FieldId(1), "b").unwrap();

        assert_eq!(doc.field(FieldId(1)).unwrap().error_nodes, vec!["b"]);
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let mut doc = MemoryDocument::new();
        let err = doc.set_field_value(FieldId(9), "x").unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_modern_failure_is_reported_as_message() {
        let mut doc = MemoryDocument::new().with_clipboard(ClipboardBehavior::ModernFails);
        doc.write_clipboard(ElementId(3), "H2O").unwrap();

        let messages = doc.take_messages();
        assert_eq!(
            messages,
            vec![Message::ClipboardResult {
                trigger: ElementId(3),
                method: ClipboardMethod::Modern,
                ok: false,
            }]
        );
        assert!(doc.take_messages().is_empty());
        assert_eq!(doc.clipboard(), None);
    }

    #[test]
    fn test_unavailable_clipboard_errors_synchronously() {
        let mut doc = MemoryDocument::new().with_clipboard(ClipboardBehavior::Unavailable);
        assert!(doc.write_clipboard(ElementId(3), "H2O").is_err());
        doc.fallback_copy(ElementId(3), "H2O").unwrap();
        assert_eq!(doc.clipboard(), Some("H2O"));
    }
}
