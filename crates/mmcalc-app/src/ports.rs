//! Host ports
//!
//! The controller never touches the DOM or the event loop directly. A host
//! implements these two traits: the browser host with `web-sys`, tests and the
//! headless replay with [`MemoryDocument`](crate::memory::MemoryDocument) and
//! [`ManualScheduler`](crate::scheduler::ManualScheduler).

use mmcalc_core::prelude::*;
use mmcalc_core::{ElementContent, ElementId, FieldId, FormId, Rect, TimerId, ValidationState};

use crate::message::Message;

/// DOM mutations, clipboard and navigation
pub trait Document {
    fn set_field_value(&mut self, field: FieldId, value: &str) -> Result<()>;

    /// Render a validation state as the `is-valid` / `is-invalid` classes
    fn set_validation(&mut self, field: FieldId, state: ValidationState) -> Result<()>;

    /// Replace the field's error node; a field never has more than one
    fn show_field_error(&mut self, field: FieldId, message: &str) -> Result<()>;

    fn hide_field_error(&mut self, field: FieldId) -> Result<()>;

    fn focus_field(&mut self, field: FieldId) -> Result<()>;

    fn set_placeholder(&mut self, field: FieldId, placeholder: Option<&str>) -> Result<()>;

    fn set_content(&mut self, element: ElementId, content: &ElementContent) -> Result<()>;

    fn set_disabled(&mut self, element: ElementId, disabled: bool) -> Result<()>;

    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool) -> Result<()>;

    /// Suppress the default action and propagation of the submit event being handled
    fn cancel_submit(&mut self, form: FormId) -> Result<()>;

    /// Submit the form without firing another submit event
    fn submit_form(&mut self, form: FormId) -> Result<()>;

    fn navigate(&mut self, url: &str) -> Result<()>;

    fn show_tooltip(&mut self, owner: ElementId, text: &str, anchor: Rect) -> Result<()>;

    fn hide_tooltip(&mut self) -> Result<()>;

    fn attach_copy_button(
        &mut self,
        heading: ElementId,
        control: ElementId,
        label: &str,
        title: &str,
    ) -> Result<()>;

    /// Start a modern clipboard write
    ///
    /// Completion is reported later as a `ClipboardResult` message. An `Err`
    /// means the API is unavailable and counts as an immediate failure.
    fn write_clipboard(&mut self, trigger: ElementId, text: &str) -> Result<()>;

    /// Copy through a hidden textarea
    ///
    /// Same reporting contract as [`Document::write_clipboard`].
    fn fallback_copy(&mut self, trigger: ElementId, text: &str) -> Result<()>;

    /// Messages produced synchronously by the host while applying actions
    fn take_messages(&mut self) -> Vec<Message> {
        Vec::new()
    }
}

/// Timers; expiry is reported as `Message::TimerFired`
pub trait Scheduler {
    fn start_interval(&mut self, timer: TimerId, period_ms: u64) -> Result<()>;

    fn start_timeout(&mut self, timer: TimerId, delay_ms: u64) -> Result<()>;

    /// Cancel a timer; unknown or already expired ids are ignored
    fn cancel(&mut self, timer: TimerId);
}
