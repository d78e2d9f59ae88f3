//! Configuration types for the form layer
//!
//! Every section falls back to its defaults, so a config file only needs the
//! keys it changes.

use serde::{Deserialize, Serialize};

/// Form layer settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub hints: HintSettings,

    #[serde(default)]
    pub submit: SubmitSettings,

    #[serde(default)]
    pub clipboard: ClipboardSettings,

    #[serde(default)]
    pub shortcuts: ShortcutSettings,

    #[serde(default)]
    pub tooltip: TooltipSettings,
}

/// Rotating placeholder examples shown while a formula field has focus
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HintSettings {
    #[serde(default = "default_hint_examples")]
    pub examples: Vec<String>,

    #[serde(default = "default_hint_interval_ms")]
    pub interval_ms: u64,
}

impl Default for HintSettings {
    fn default() -> Self {
        Self {
            examples: default_hint_examples(),
            interval_ms: default_hint_interval_ms(),
        }
    }
}

fn default_hint_examples() -> Vec<String> {
    [
        "H2SO4 (Sulfuric Acid)",
        "Ca(OH)2 (Calcium Hydroxide)",
        "CH3(CH2)3OH (Butanol)",
        "Mg3(PO4)2 (Magnesium Phosphate)",
        "C6H12O6 (Glucose)",
        "NaCl (Sodium Chloride)",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_hint_interval_ms() -> u64 {
    2000
}

/// Submit button busy state
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SubmitSettings {
    /// Re-enable the submit button after this long, whether or not the page navigated
    #[serde(default = "default_restore_after_ms")]
    pub restore_after_ms: u64,

    /// Markup shown on the disabled submit button
    #[serde(default = "default_busy_label")]
    pub busy_label: String,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            restore_after_ms: default_restore_after_ms(),
            busy_label: default_busy_label(),
        }
    }
}

fn default_restore_after_ms() -> u64 {
    5000
}

fn default_busy_label() -> String {
    r#"<i class="fas fa-spinner fa-spin me-2"></i>Calculating..."#.to_string()
}

/// Copy controls and their feedback
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClipboardSettings {
    #[serde(default = "default_feedback_ms")]
    pub feedback_ms: u64,

    #[serde(default = "default_success_text")]
    pub success_text: String,

    #[serde(default = "default_failure_text")]
    pub failure_text: String,

    /// Markup of the copy control appended to result headings
    #[serde(default = "default_copy_label")]
    pub copy_label: String,

    #[serde(default = "default_copy_title")]
    pub copy_title: String,
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        Self {
            feedback_ms: default_feedback_ms(),
            success_text: default_success_text(),
            failure_text: default_failure_text(),
            copy_label: default_copy_label(),
            copy_title: default_copy_title(),
        }
    }
}

fn default_feedback_ms() -> u64 {
    1500
}

fn default_success_text() -> String {
    "Copied!".to_string()
}

fn default_failure_text() -> String {
    "Copy failed".to_string()
}

fn default_copy_label() -> String {
    r#"<i class="fas fa-copy"></i>"#.to_string()
}

fn default_copy_title() -> String {
    "Copy to clipboard".to_string()
}

/// Global keyboard shortcuts
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ShortcutSettings {
    /// Path navigated to by the mode keys
    #[serde(default = "default_mode_path")]
    pub mode_path: String,

    /// Keys that switch calculator mode; the key itself is the mode value
    #[serde(default = "default_mode_keys")]
    pub mode_keys: Vec<char>,
}

impl Default for ShortcutSettings {
    fn default() -> Self {
        Self {
            mode_path: default_mode_path(),
            mode_keys: default_mode_keys(),
        }
    }
}

fn default_mode_path() -> String {
    "/calculate".to_string()
}

fn default_mode_keys() -> Vec<char> {
    vec!['1', '2', '3']
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TooltipSettings {
    /// Space between the tooltip and the top of its element
    #[serde(default = "default_gap_px")]
    pub gap_px: f64,
}

impl Default for TooltipSettings {
    fn default() -> Self {
        Self {
            gap_px: default_gap_px(),
        }
    }
}

fn default_gap_px() -> f64 {
    5.0
}
