//! Message types for the form layer (TEA pattern)

use mmcalc_core::{ElementContent, ElementId, FieldId, FormId, InputType, Rect, TimerId};
use serde::{Deserialize, Serialize};

use crate::input_key::KeyPress;

// ─────────────────────────────────────────────────────────────────────────────
// Page snapshots (built by the host when it scans the document)
// ─────────────────────────────────────────────────────────────────────────────

/// Everything the controller needs to know about a freshly loaded page
///
/// Ids are assigned by the host. `next_free_id` is the first id the host has
/// not used; the controller numbers the elements it creates from there, and
/// the host must skip any id the controller hands back in an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// `window.location.origin`, when known
    #[serde(default)]
    pub origin: Option<String>,

    /// Forms in document order
    #[serde(default)]
    pub forms: Vec<FormSnapshot>,

    /// `.result-box h4` headings in document order
    #[serde(default)]
    pub headings: Vec<HeadingSnapshot>,

    pub next_free_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub id: FormId,

    /// `button[type="submit"]`, if the form has one
    #[serde(default)]
    pub submit_button: Option<ButtonSnapshot>,

    /// Inputs in document order
    #[serde(default)]
    pub fields: Vec<FieldSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub id: FieldId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub input_type: InputType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonSnapshot {
    pub id: ElementId,
    /// Inner markup, restored when the busy state ends
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingSnapshot {
    pub id: ElementId,
    /// The heading already contains a `.copy-btn`
    #[serde(default)]
    pub has_copy_control: bool,
}

/// Current value of one field, read when a submit event fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub field: FieldId,
    pub value: String,
}

impl FieldValue {
    pub fn new(field: FieldId, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Which copy technique produced a clipboard result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardMethod {
    /// `navigator.clipboard.writeText`
    Modern,
    /// Hidden textarea plus `execCommand("copy")`
    Fallback,
}

/// All possible messages in the form layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // Page lifecycle
    // ─────────────────────────────────────────────────────────
    /// Document finished loading and was scanned
    PageLoaded { page: PageSnapshot },

    /// Result headings (re)discovered; copy controls are attached once per heading
    ResultHeadingsFound {
        headings: Vec<HeadingSnapshot>,
        next_free_id: u32,
    },

    // ─────────────────────────────────────────────────────────
    // Form submission
    // ─────────────────────────────────────────────────────────
    /// Native submit event; the host cancels it if a `CancelSubmit` action follows
    FormSubmit {
        form: FormId,
        values: Vec<FieldValue>,
    },

    /// Submit requested by keyboard shortcut
    SubmitShortcut { form: FormId },

    // ─────────────────────────────────────────────────────────
    // Field events
    // ─────────────────────────────────────────────────────────
    FieldFocus { field: FieldId },
    FieldBlur { field: FieldId, value: String },
    FieldInput { field: FieldId, value: String },

    // ─────────────────────────────────────────────────────────
    // Keyboard
    // ─────────────────────────────────────────────────────────
    /// Document-level key-down
    Key { press: KeyPress },

    /// Empty the text and number inputs of a form and reset their validation
    ClearForm { form: FormId },

    /// Switch calculator mode with a full page load
    NavigateToMode { mode: char },

    // ─────────────────────────────────────────────────────────
    // Tooltips
    // ─────────────────────────────────────────────────────────
    PointerEnter {
        element: ElementId,
        title: String,
        anchor: Rect,
    },
    PointerLeave { element: ElementId },

    // ─────────────────────────────────────────────────────────
    // Clipboard
    // ─────────────────────────────────────────────────────────
    /// A copy control created by the layer was clicked
    CopyControlClicked {
        control: ElementId,
        heading_text: String,
    },

    /// Copy `text`, showing feedback on `trigger`; `content` is what to restore afterwards
    CopyText {
        trigger: ElementId,
        text: String,
        content: ElementContent,
    },

    /// Completion of a clipboard write
    ClipboardResult {
        trigger: ElementId,
        method: ClipboardMethod,
        ok: bool,
    },

    // ─────────────────────────────────────────────────────────
    // Timers
    // ─────────────────────────────────────────────────────────
    /// A timeout expired or an interval ticked
    TimerFired { timer: TimerId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_key::InputKey;

    #[test]
    fn test_message_wire_format() {
        let msg: Message =
            serde_json::from_str(r#"{"type":"field_input","field":3,"value":"h2o"}"#).unwrap();
        assert_eq!(
            msg,
            Message::FieldInput {
                field: FieldId(3),
                value: "h2o".to_string(),
            }
        );
    }

    #[test]
    fn test_page_snapshot_defaults() {
        let msg: Message = serde_json::from_str(
            r#"{"type":"page_loaded","page":{"next_free_id":5,"forms":[{"id":0,"fields":[{"id":1,"name":"formula","required":true}]}]}}"#,
        )
        .unwrap();

        let Message::PageLoaded { page } = msg else {
            panic!("expected page_loaded");
        };
        let field = &page.forms[0].fields[0];
        assert_eq!(field.input_type, InputType::Text);
        assert_eq!(field.placeholder, None);
        assert!(page.headings.is_empty());
        assert_eq!(page.origin, None);
    }

    #[test]
    fn test_key_message_parses_modifiers() {
        let msg: Message = serde_json::from_str(
            r#"{"type":"key","press":{"key":"enter","modifiers":{"ctrl":true}}}"#,
        )
        .unwrap();

        let Message::Key { press } = msg else {
            panic!("expected key");
        };
        assert_eq!(press.key, InputKey::Enter);
        assert!(press.modifiers.command());
    }
}
