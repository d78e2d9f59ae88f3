//! Core domain types for the form layer
//!
//! Identity types are plain newtypes handed out by the host when it scans the
//! page (or by the controller for elements it creates itself). Keeping them
//! distinct stops a timer handle from ever being looked up as a field.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Identity
// ─────────────────────────────────────────────────────────────────────────────

/// Identity of a `<form>` element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(pub u32);

/// Identity of an `<input>` element the layer validates or decorates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub u32);

/// Identity of any other element (buttons, titled elements, headings, copy controls)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u32);

/// Handle of a timer owned by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(pub u64);

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "form#{}", self.0)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field#{}", self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fields
// ─────────────────────────────────────────────────────────────────────────────

/// The `type` attribute of an input, reduced to what the layer cares about
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    #[default]
    Text,
    Number,
    Other(String),
}

impl InputType {
    /// Parse an HTML `type` attribute (missing attribute means text)
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            None => InputType::Text,
            Some(v) if v.is_empty() || v == "text" => InputType::Text,
            Some(v) if v == "number" => InputType::Number,
            Some(v) => InputType::Other(v),
        }
    }

    /// Text and number inputs are the ones the clear shortcut empties
    pub fn is_clearable(&self) -> bool {
        matches!(self, InputType::Text | InputType::Number)
    }
}

/// Which value rules apply to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Named `formula` or `compound`: chemical formula text
    Formula,
    /// `type="number"`: must be a positive number
    Numeric,
    /// Anything else: only the required rule applies
    Plain,
}

/// Input names that hold a chemical formula
pub const FORMULA_FIELD_NAMES: &[&str] = &["formula", "compound"];

impl FieldKind {
    pub fn classify(name: &str, input_type: &InputType) -> Self {
        if FORMULA_FIELD_NAMES.contains(&name) {
            FieldKind::Formula
        } else if *input_type == InputType::Number {
            FieldKind::Numeric
        } else {
            FieldKind::Plain
        }
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, FieldKind::Formula)
    }
}

/// Tri-state validation marker of a field
///
/// Rendered by the host as the presence/absence of the `is-valid` and
/// `is-invalid` classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationState {
    #[default]
    Untouched,
    Valid,
    Invalid,
}

impl ValidationState {
    /// CSS class marking this state, if any
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            ValidationState::Untouched => None,
            ValidationState::Valid => Some(VALID_CLASS),
            ValidationState::Invalid => Some(INVALID_CLASS),
        }
    }
}

pub const VALID_CLASS: &str = "is-valid";
pub const INVALID_CLASS: &str = "is-invalid";
pub const ERROR_FEEDBACK_CLASS: &str = "invalid-feedback";
pub const TOOLTIP_CLASS: &str = "custom-tooltip";
pub const COPY_BUTTON_CLASS: &str = "copy-btn";

// ─────────────────────────────────────────────────────────────────────────────
// Element content
// ─────────────────────────────────────────────────────────────────────────────

/// Content written into an element
///
/// Buttons carry icon markup, so restoring them needs the original markup
/// rather than its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ElementContent {
    Text(String),
    Markup(String),
}

impl ElementContent {
    pub fn text(value: impl Into<String>) -> Self {
        ElementContent::Text(value.into())
    }

    pub fn markup(value: impl Into<String>) -> Self {
        ElementContent::Markup(value.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            ElementContent::Text(s) | ElementContent::Markup(s) => s,
        }
    }
}
