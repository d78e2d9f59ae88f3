//! Clipboard copy helper
//!
//! The modern API is tried first; when it fails the hidden-textarea fallback
//! runs. The trigger shows transient feedback either way and then gets its
//! original content back.

use mmcalc_core::{ElementContent, ElementId};
use tracing::{debug, info, warn};

use crate::message::{ClipboardMethod, Message};
use crate::state::{AppState, CopyFeedback, PendingCopy, TimerPurpose};

use super::{UpdateAction, UpdateResult};

const SUCCESS_CLASS: &str = "text-success";
const FAILURE_CLASS: &str = "text-danger";

/// A copy control was clicked: copy its heading's text
pub(crate) fn handle_control_clicked(
    state: &mut AppState,
    control: ElementId,
    heading_text: &str,
) -> UpdateResult {
    if !state.copy_controls.contains_key(&control) {
        warn!("Click on unknown copy control {}", control);
        return UpdateResult::none();
    }

    UpdateResult::message(Message::CopyText {
        trigger: control,
        text: heading_text.trim().to_string(),
        content: ElementContent::markup(state.settings.clipboard.copy_label.clone()),
    })
}

pub(crate) fn handle_copy_text(
    state: &mut AppState,
    trigger: ElementId,
    text: String,
    content: ElementContent,
) -> UpdateResult {
    debug!("Copying {} byte(s) for {}", text.len(), trigger);
    state.pending_copies.insert(
        trigger,
        PendingCopy {
            text: text.clone(),
            content,
        },
    );
    UpdateResult::action(UpdateAction::WriteClipboard { trigger, text })
}

pub(crate) fn handle_clipboard_result(
    state: &mut AppState,
    trigger: ElementId,
    method: ClipboardMethod,
    ok: bool,
) -> UpdateResult {
    if ok {
        info!("Copied via {:?} for {}", method, trigger);
        return show_feedback(state, trigger, true);
    }

    match method {
        ClipboardMethod::Modern => match state.pending_copies.get(&trigger) {
            Some(pending) => {
                debug!("Clipboard API failed for {}, trying fallback", trigger);
                UpdateResult::action(UpdateAction::FallbackCopy {
                    trigger,
                    text: pending.text.clone(),
                })
            }
            None => {
                warn!("Clipboard result for {} without a pending copy", trigger);
                UpdateResult::none()
            }
        },
        ClipboardMethod::Fallback => {
            warn!("Copy failed for {}", trigger);
            show_feedback(state, trigger, false)
        }
    }
}

fn show_feedback(state: &mut AppState, trigger: ElementId, success: bool) -> UpdateResult {
    let pending = state.pending_copies.remove(&trigger);
    let mut actions = Vec::new();

    // Feedback already showing: restart its timer but keep the real original
    let original = match state.copy_feedback.remove(&trigger) {
        Some(previous) => {
            state.release_timer(previous.timer);
            actions.push(UpdateAction::CancelTimer {
                timer: previous.timer,
            });
            previous.original
        }
        None => match pending {
            Some(p) => p.content,
            None => {
                warn!("No content to restore for {}", trigger);
                return UpdateResult::none();
            }
        },
    };

    let settings = &state.settings.clipboard;
    let (text, on, off) = if success {
        (settings.success_text.clone(), SUCCESS_CLASS, FAILURE_CLASS)
    } else {
        (settings.failure_text.clone(), FAILURE_CLASS, SUCCESS_CLASS)
    };
    let delay_ms = settings.feedback_ms;

    let timer = state.register_timer(TimerPurpose::CopyFeedback(trigger));
    state
        .copy_feedback
        .insert(trigger, CopyFeedback { original, timer });

    actions.push(UpdateAction::SetContent {
        element: trigger,
        content: ElementContent::Text(text),
    });
    actions.push(UpdateAction::SetClass {
        element: trigger,
        class: off.to_string(),
        enabled: false,
    });
    actions.push(UpdateAction::SetClass {
        element: trigger,
        class: on.to_string(),
        enabled: true,
    });
    actions.push(UpdateAction::StartTimeout { timer, delay_ms });
    UpdateResult::actions(actions)
}

/// Put the trigger back the way it was
pub(crate) fn handle_feedback_expired(state: &mut AppState, trigger: ElementId) -> UpdateResult {
    let Some(feedback) = state.copy_feedback.remove(&trigger) else {
        return UpdateResult::none();
    };

    UpdateResult::actions(vec![
        UpdateAction::SetContent {
            element: trigger,
            content: feedback.original,
        },
        UpdateAction::SetClass {
            element: trigger,
            class: SUCCESS_CLASS.to_string(),
            enabled: false,
        },
        UpdateAction::SetClass {
            element: trigger,
            class: FAILURE_CLASS.to_string(),
            enabled: false,
        },
    ])
}
