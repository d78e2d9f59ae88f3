//! Abstract key-down event, independent of the browser bindings.
//!
//! The host converts `KeyboardEvent.key` and its modifier flags into
//! [`KeyPress`] so the shortcut handler can be exercised without a browser.

use serde::{Deserialize, Serialize};

/// Abstract key, converted from `KeyboardEvent.key` at the host boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKey {
    /// Single printable character (`"1"`, `"a"`, `"("`)
    Char(char),
    /// Enter/Return key
    Enter,
    /// Escape key
    Esc,
    /// Any other named key (`"Tab"`, `"ArrowUp"`, `"F5"`)
    Named(String),
}

impl InputKey {
    /// Convert a `KeyboardEvent.key` value
    pub fn from_key_value(value: &str) -> Self {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => InputKey::Char(c),
            _ => match value {
                "Enter" => InputKey::Enter,
                "Escape" | "Esc" => InputKey::Esc,
                other => InputKey::Named(other.to_string()),
            },
        }
    }
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub ctrl: bool,
    /// Cmd on macOS
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        meta: false,
        shift: false,
        alt: false,
    };

    pub const META: Modifiers = Modifiers {
        ctrl: false,
        meta: true,
        shift: false,
        alt: false,
    };

    /// Ctrl on Linux/Windows, Cmd on macOS
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// What had focus when the key went down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyTarget {
    /// An input, textarea or select
    Editable,
    /// Anything else (body, buttons, links)
    #[default]
    Page,
}

/// A complete key-down event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: InputKey,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub target: KeyTarget,
}

impl KeyPress {
    pub fn new(key: InputKey, modifiers: Modifiers, target: KeyTarget) -> Self {
        Self {
            key,
            modifiers,
            target,
        }
    }

    /// Plain key press on the page body
    pub fn page(key: InputKey) -> Self {
        Self::new(key, Modifiers::NONE, KeyTarget::Page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_value_characters() {
        assert_eq!(InputKey::from_key_value("1"), InputKey::Char('1'));
        assert_eq!(InputKey::from_key_value("é"), InputKey::Char('é'));
    }

    #[test]
    fn test_from_key_value_named_keys() {
        assert_eq!(InputKey::from_key_value("Enter"), InputKey::Enter);
        assert_eq!(InputKey::from_key_value("Escape"), InputKey::Esc);
        assert_eq!(
            InputKey::from_key_value("ArrowUp"),
            InputKey::Named("ArrowUp".to_string())
        );
    }

    #[test]
    fn test_command_modifier() {
        assert!(Modifiers::CTRL.command());
        assert!(Modifiers::META.command());
        assert!(!Modifiers::NONE.command());
    }

    #[test]
    fn test_key_press_deserializes_with_defaults() {
        let press: KeyPress = serde_json::from_str(r#"{"key":{"char":"2"}}"#).unwrap();
        assert_eq!(press, KeyPress::page(InputKey::Char('2')));
    }
}
