//! Action execution against the host ports

use mmcalc_core::prelude::*;

use crate::handler::UpdateAction;
use crate::message::{ClipboardMethod, Message};
use crate::ports::{Document, Scheduler};

/// Perform one action
///
/// Host failures are logged and swallowed: the worst outcome is a stale UI
/// element. Clipboard failures become a `ClipboardResult` follow-up so the
/// fallback chain keeps going.
pub fn apply_action<D, S>(action: &UpdateAction, document: &mut D, scheduler: &mut S) -> Option<Message>
where
    D: Document + ?Sized,
    S: Scheduler + ?Sized,
{
    let result = match action {
        UpdateAction::SetFieldValue { field, value } => document.set_field_value(*field, value),
        UpdateAction::SetValidation { field, state } => document.set_validation(*field, *state),
        UpdateAction::ShowFieldError { field, message } => {
            document.show_field_error(*field, message)
        }
        UpdateAction::HideFieldError { field } => document.hide_field_error(*field),
        UpdateAction::FocusField { field } => document.focus_field(*field),
        UpdateAction::SetPlaceholder { field, placeholder } => {
            document.set_placeholder(*field, placeholder.as_deref())
        }
        UpdateAction::SetContent { element, content } => document.set_content(*element, content),
        UpdateAction::SetDisabled { element, disabled } => {
            document.set_disabled(*element, *disabled)
        }
        UpdateAction::SetClass {
            element,
            class,
            enabled,
        } => document.set_class(*element, class, *enabled),
        UpdateAction::CancelSubmit { form } => document.cancel_submit(*form),
        UpdateAction::SubmitForm { form } => document.submit_form(*form),
        UpdateAction::Navigate { url } => document.navigate(url),
        UpdateAction::ShowTooltip {
            owner,
            text,
            anchor,
        } => document.show_tooltip(*owner, text, *anchor),
        UpdateAction::HideTooltip => document.hide_tooltip(),
        UpdateAction::AttachCopyButton {
            heading,
            control,
            label,
            title,
        } => document.attach_copy_button(*heading, *control, label, title),
        UpdateAction::WriteClipboard { trigger, text } => {
            if let Err(e) = document.write_clipboard(*trigger, text) {
                debug!("Clipboard API unavailable for {}: {}", trigger, e);
                return Some(Message::ClipboardResult {
                    trigger: *trigger,
                    method: ClipboardMethod::Modern,
                    ok: false,
                });
            }
            Ok(())
        }
        UpdateAction::FallbackCopy { trigger, text } => {
            if let Err(e) = document.fallback_copy(*trigger, text) {
                warn!("Fallback copy failed for {}: {}", trigger, e);
                return Some(Message::ClipboardResult {
                    trigger: *trigger,
                    method: ClipboardMethod::Fallback,
                    ok: false,
                });
            }
            Ok(())
        }
        UpdateAction::StartInterval { timer, period_ms } => {
            scheduler.start_interval(*timer, *period_ms)
        }
        UpdateAction::StartTimeout { timer, delay_ms } => {
            scheduler.start_timeout(*timer, *delay_ms)
        }
        UpdateAction::CancelTimer { timer } => {
            scheduler.cancel(*timer);
            Ok(())
        }
    };

    if let Err(e) = result {
        warn!("Action {:?} failed: {}", action, e);
    }
    None
}
