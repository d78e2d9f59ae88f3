//! Main update function - handles state transitions (TEA pattern)

use tracing::debug;

use crate::handler::validation::SubmitSource;
use crate::message::Message;
use crate::state::{AppState, TimerPurpose};

use super::{clipboard, formula_input, keys::handle_key, page, tooltip, validation, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and the actions to perform
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        // ─────────────────────────────────────────────────────────
        // Page lifecycle
        // ─────────────────────────────────────────────────────────
        Message::PageLoaded { page } => page::handle_page_loaded(state, page),

        Message::ResultHeadingsFound {
            headings,
            next_free_id,
        } => page::handle_result_headings(state, &headings, next_free_id),

        // ─────────────────────────────────────────────────────────
        // Form submission
        // ─────────────────────────────────────────────────────────
        Message::FormSubmit { form, values } => {
            validation::mirror_values(state, &values);
            validation::handle_submit(state, form, SubmitSource::Event)
        }

        Message::SubmitShortcut { form } => {
            validation::handle_submit(state, form, SubmitSource::Shortcut)
        }

        // ─────────────────────────────────────────────────────────
        // Field events
        // ─────────────────────────────────────────────────────────
        Message::FieldFocus { field } => formula_input::handle_focus(state, field),

        Message::FieldBlur { field, value } => {
            let mut actions = formula_input::stop_hints(state, field);
            actions.extend(validation::handle_blur(state, field, value));
            UpdateResult::actions(actions)
        }

        Message::FieldInput { field, value } => {
            let mut actions = validation::clear_on_input(state, field);
            actions.extend(formula_input::handle_input(state, field, value));
            UpdateResult::actions(actions)
        }

        // ─────────────────────────────────────────────────────────
        // Keyboard
        // ─────────────────────────────────────────────────────────
        Message::Key { press } => {
            if let Some(msg) = handle_key(state, &press) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::ClearForm { form } => validation::handle_clear_form(state, form),

        Message::NavigateToMode { mode } => page::handle_navigate_to_mode(state, mode),

        // ─────────────────────────────────────────────────────────
        // Tooltips
        // ─────────────────────────────────────────────────────────
        Message::PointerEnter {
            element,
            title,
            anchor,
        } => tooltip::handle_pointer_enter(state, element, title, anchor),

        Message::PointerLeave { element } => tooltip::handle_pointer_leave(state, element),

        // ─────────────────────────────────────────────────────────
        // Clipboard
        // ─────────────────────────────────────────────────────────
        Message::CopyControlClicked {
            control,
            heading_text,
        } => clipboard::handle_control_clicked(state, control, &heading_text),

        Message::CopyText {
            trigger,
            text,
            content,
        } => clipboard::handle_copy_text(state, trigger, text, content),

        Message::ClipboardResult {
            trigger,
            method,
            ok,
        } => clipboard::handle_clipboard_result(state, trigger, method, ok),

        // ─────────────────────────────────────────────────────────
        // Timers
        // ─────────────────────────────────────────────────────────
        Message::TimerFired { timer } => match state.timer_purpose(timer) {
            Some(TimerPurpose::HintRotation(field)) => formula_input::handle_hint_tick(state, field),
            Some(TimerPurpose::SubmitRestore(button)) => {
                state.release_timer(timer);
                validation::handle_submit_restore(state, button)
            }
            Some(TimerPurpose::CopyFeedback(trigger)) => {
                state.release_timer(timer);
                clipboard::handle_feedback_expired(state, trigger)
            }
            None => {
                debug!("Ignoring {} (no longer registered)", timer);
                UpdateResult::none()
            }
        },
    }
}
