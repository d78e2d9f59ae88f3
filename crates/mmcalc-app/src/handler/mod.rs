//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `page`: Page registration and copy control attachment
//! - `validation`: Submit guard and per-field validation
//! - `formula_input`: Formula normalisation and the hint rotator
//! - `keys`: Global keyboard shortcuts
//! - `tooltip`: Tooltip presenter
//! - `clipboard`: Copy helper and its feedback

pub(crate) mod clipboard;
pub(crate) mod formula_input;
pub(crate) mod keys;
pub(crate) mod page;
pub(crate) mod tooltip;
pub(crate) mod update;
pub(crate) mod validation;


use mmcalc_core::{ElementContent, ElementId, FieldId, FormId, Rect, TimerId, ValidationState};
use serde::{Deserialize, Serialize};

use crate::message::Message;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Effects the host performs after an update, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UpdateAction {
    // ─────────────────────────────────────────────────────────
    // Fields
    // ─────────────────────────────────────────────────────────
    SetFieldValue {
        field: FieldId,
        value: String,
    },

    /// Toggle the `is-valid` / `is-invalid` classes
    SetValidation {
        field: FieldId,
        state: ValidationState,
    },

    /// Replace the field's `.invalid-feedback` sibling (at most one per field)
    ShowFieldError {
        field: FieldId,
        message: String,
    },

    HideFieldError {
        field: FieldId,
    },

    FocusField {
        field: FieldId,
    },

    /// `None` removes the attribute
    SetPlaceholder {
        field: FieldId,
        placeholder: Option<String>,
    },

    // ─────────────────────────────────────────────────────────
    // Generic elements
    // ─────────────────────────────────────────────────────────
    SetContent {
        element: ElementId,
        content: ElementContent,
    },

    SetDisabled {
        element: ElementId,
        disabled: bool,
    },

    SetClass {
        element: ElementId,
        class: String,
        enabled: bool,
    },

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    /// Suppress the default action and propagation of the current submit event
    CancelSubmit {
        form: FormId,
    },

    /// Submit without firing a submit event
    SubmitForm {
        form: FormId,
    },

    /// Full page load
    Navigate {
        url: String,
    },

    // ─────────────────────────────────────────────────────────
    // Tooltip
    // ─────────────────────────────────────────────────────────
    ShowTooltip {
        owner: ElementId,
        text: String,
        anchor: Rect,
    },

    HideTooltip,

    // ─────────────────────────────────────────────────────────
    // Clipboard
    // ─────────────────────────────────────────────────────────
    AttachCopyButton {
        heading: ElementId,
        control: ElementId,
        label: String,
        title: String,
    },

    /// Modern clipboard write; completion arrives as `ClipboardResult`
    WriteClipboard {
        trigger: ElementId,
        text: String,
    },

    /// Hidden-textarea copy; completion arrives as `ClipboardResult`
    FallbackCopy {
        trigger: ElementId,
        text: String,
    },

    // ─────────────────────────────────────────────────────────
    // Timers
    // ─────────────────────────────────────────────────────────
    StartInterval {
        timer: TimerId,
        period_ms: u64,
    },

    StartTimeout {
        timer: TimerId,
        delay_ms: u64,
    },

    CancelTimer {
        timer: TimerId,
    },
}

/// Result of processing a message
#[derive(Debug, Default, PartialEq)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Actions for the host to perform, in order
    pub actions: Vec<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            actions: Vec::new(),
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            actions: vec![action],
        }
    }

    pub fn actions(actions: Vec<UpdateAction>) -> Self {
        Self {
            message: None,
            actions,
        }
    }
}
