//! Global keyboard shortcuts
//!
//! At most one shortcut fires per key-down.

use crate::input_key::{InputKey, KeyPress, KeyTarget};
use crate::message::Message;
use crate::state::AppState;

/// Convert a key-down into the shortcut it triggers, if any
pub fn handle_key(state: &AppState, press: &KeyPress) -> Option<Message> {
    match press.key {
        // Ctrl/Cmd+Enter submits the first form through the guard
        InputKey::Enter if press.modifiers.command() => state
            .first_form()
            .map(|form| Message::SubmitShortcut { form: form.id }),

        // Escape clears the first form
        InputKey::Esc => state
            .first_form()
            .map(|form| Message::ClearForm { form: form.id }),

        // Mode keys only outside of inputs, where they would be typing
        InputKey::Char(c)
            if press.target == KeyTarget::Page
                && state.settings.shortcuts.mode_keys.contains(&c) =>
        {
            Some(Message::NavigateToMode { mode: c })
        }

        _ => None,
    }
}
