//! Form layer state (Model in TEA pattern)
//!
//! Every piece of per-element state lives here, keyed by typed ids. The DOM
//! only ever receives rendered results (classes, error nodes, placeholders).

use std::collections::{HashMap, HashSet};

use mmcalc_core::{
    ElementContent, ElementId, FieldError, FieldId, FieldKind, FormId, InputType, TimerId,
    ValidationState,
};

use crate::config::Settings;
use crate::message::{FieldSnapshot, FormSnapshot};

// ─────────────────────────────────────────────────────────────────────────────
// Forms and fields
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub id: FormId,
    /// Fields in document order
    pub fields: Vec<FieldId>,
    pub submit_button: Option<ElementId>,
    /// Submit button markup as authored
    pub submit_label: Option<String>,
}

impl FormState {
    pub fn from_snapshot(snapshot: &FormSnapshot) -> Self {
        Self {
            id: snapshot.id,
            fields: snapshot.fields.iter().map(|f| f.id).collect(),
            submit_button: snapshot.submit_button.as_ref().map(|b| b.id),
            submit_label: snapshot.submit_button.as_ref().map(|b| b.label.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub id: FieldId,
    pub form: FormId,
    pub name: String,
    pub input_type: InputType,
    pub kind: FieldKind,
    pub required: bool,
    /// Last value seen from the host
    pub value: String,
    /// Placeholder as authored; the rotator never overwrites this
    pub placeholder: Option<String>,
    pub validation: ValidationState,
    /// Message currently rendered next to the field
    pub error: Option<FieldError>,
}

impl FieldState {
    pub fn from_snapshot(form: FormId, snapshot: &FieldSnapshot) -> Self {
        Self {
            id: snapshot.id,
            form,
            name: snapshot.name.clone(),
            input_type: snapshot.input_type.clone(),
            kind: FieldKind::classify(&snapshot.name, &snapshot.input_type),
            required: snapshot.required,
            value: snapshot.value.clone(),
            placeholder: snapshot.placeholder.clone(),
            validation: ValidationState::Untouched,
            error: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transient UI state
// ─────────────────────────────────────────────────────────────────────────────

/// Placeholder rotation of a focused formula field
#[derive(Debug, Clone, PartialEq)]
pub struct HintRotation {
    pub timer: TimerId,
    /// Placeholder captured when the rotation started
    pub original_placeholder: Option<String>,
    /// Index of the example shown on the next tick
    pub next_index: usize,
}

/// Submit button showing the busy label
#[derive(Debug, Clone, PartialEq)]
pub struct BusyButton {
    pub form: FormId,
    pub original_label: String,
    pub timer: TimerId,
}

/// A copy control appended to a result heading
#[derive(Debug, Clone, PartialEq)]
pub struct CopyControl {
    pub heading: ElementId,
}

/// Copy waiting on a clipboard result
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCopy {
    pub text: String,
    /// Trigger content to restore once feedback ends
    pub content: ElementContent,
}

/// Transient "Copied!" / "Copy failed" text on a trigger
#[derive(Debug, Clone, PartialEq)]
pub struct CopyFeedback {
    pub original: ElementContent,
    pub timer: TimerId,
}

/// The single tooltip on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipState {
    pub owner: ElementId,
}

/// What a registered timer is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPurpose {
    HintRotation(FieldId),
    SubmitRestore(ElementId),
    CopyFeedback(ElementId),
}

// ─────────────────────────────────────────────────────────────────────────────
// AppState
// ─────────────────────────────────────────────────────────────────────────────

/// Complete state of the form layer
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub settings: Settings,

    /// `window.location.origin` of the page
    pub origin: Option<String>,

    /// Forms in document order
    pub forms: Vec<FormState>,
    pub fields: HashMap<FieldId, FieldState>,

    pub hints: HashMap<FieldId, HintRotation>,
    pub busy_buttons: HashMap<ElementId, BusyButton>,

    pub copy_controls: HashMap<ElementId, CopyControl>,
    /// Headings that already received a copy control
    pub decorated_headings: HashSet<ElementId>,
    pub pending_copies: HashMap<ElementId, PendingCopy>,
    pub copy_feedback: HashMap<ElementId, CopyFeedback>,

    pub tooltip: Option<TooltipState>,

    timers: HashMap<TimerId, TimerPurpose>,
    next_timer_id: u64,
    next_element_id: u32,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            next_timer_id: 1,
            ..Default::default()
        }
    }

    // ─────────────────────────────────────────────────────────
    // Forms and fields
    // ─────────────────────────────────────────────────────────

    pub fn first_form(&self) -> Option<&FormState> {
        self.forms.first()
    }

    pub fn form(&self, id: FormId) -> Option<&FormState> {
        self.forms.iter().find(|f| f.id == id)
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldState> {
        self.fields.get(&id)
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut FieldState> {
        self.fields.get_mut(&id)
    }

    /// Required fields of a form, in document order
    pub fn required_fields(&self, form: FormId) -> Vec<FieldId> {
        self.form(form)
            .map(|f| {
                f.fields
                    .iter()
                    .copied()
                    .filter(|id| self.fields.get(id).is_some_and(|field| field.required))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Forget everything tied to the current page
    ///
    /// Settings and the timer id counter survive, so ids from the old page
    /// never match a new timer. Returns the timers that were still live.
    pub fn reset_page(&mut self) -> Vec<TimerId> {
        self.origin = None;
        self.forms.clear();
        self.fields.clear();
        self.hints.clear();
        self.busy_buttons.clear();
        self.copy_controls.clear();
        self.decorated_headings.clear();
        self.pending_copies.clear();
        self.copy_feedback.clear();
        self.tooltip = None;
        self.next_element_id = 0;

        let mut live: Vec<TimerId> = self.timers.drain().map(|(id, _)| id).collect();
        live.sort();
        live
    }

    // ─────────────────────────────────────────────────────────
    // Timers
    // ─────────────────────────────────────────────────────────

    /// Allocate a timer id and remember what it is for
    pub fn register_timer(&mut self, purpose: TimerPurpose) -> TimerId {
        let id = TimerId(self.next_timer_id.max(1));
        self.next_timer_id = id.0 + 1;
        self.timers.insert(id, purpose);
        id
    }

    /// Forget a timer; a later firing of this id is ignored
    pub fn release_timer(&mut self, id: TimerId) -> Option<TimerPurpose> {
        self.timers.remove(&id)
    }

    pub fn timer_purpose(&self, id: TimerId) -> Option<TimerPurpose> {
        self.timers.get(&id).copied()
    }

    pub fn active_timer_count(&self) -> usize {
        self.timers.len()
    }

    // ─────────────────────────────────────────────────────────
    // Element ids
    // ─────────────────────────────────────────────────────────

    /// Never hand out ids below `next_free_id`
    pub fn reserve_ids_below(&mut self, next_free_id: u32) {
        self.next_element_id = self.next_element_id.max(next_free_id);
    }

    pub fn allocate_element_id(&mut self) -> ElementId {
        let id = ElementId(self.next_element_id);
        self.next_element_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_ids_are_unique_and_releasable() {
        let mut state = AppState::new();
        let a = state.register_timer(TimerPurpose::HintRotation(FieldId(1)));
        let b = state.register_timer(TimerPurpose::CopyFeedback(ElementId(2)));

        assert_ne!(a, b);
        assert_eq!(state.active_timer_count(), 2);
        assert_eq!(
            state.release_timer(a),
            Some(TimerPurpose::HintRotation(FieldId(1)))
        );
        assert_eq!(state.timer_purpose(a), None);
        assert_eq!(state.release_timer(a), None);
    }

    #[test]
    fn test_reset_page_returns_live_timers_and_keeps_counter() {
        let mut state = AppState::new();
        state.reserve_ids_below(10);
        state.allocate_element_id();
        let a = state.register_timer(TimerPurpose::SubmitRestore(ElementId(3)));
        let b = state.register_timer(TimerPurpose::CopyFeedback(ElementId(10)));
        state.tooltip = Some(TooltipState { owner: ElementId(5) });

        assert_eq!(state.reset_page(), vec![a, b]);
        assert_eq!(state.active_timer_count(), 0);
        assert_eq!(state.tooltip, None);

        let c = state.register_timer(TimerPurpose::HintRotation(FieldId(1)));
        assert!(c > b);
        state.reserve_ids_below(10);
        assert_eq!(state.allocate_element_id(), ElementId(10));
    }

    #[test]
    fn test_element_ids_start_after_reserved_range() {
        let mut state = AppState::new();
        state.reserve_ids_below(10);
        assert_eq!(state.allocate_element_id(), ElementId(10));

        // A smaller reservation never moves the counter backwards
        state.reserve_ids_below(4);
        assert_eq!(state.allocate_element_id(), ElementId(11));
    }
}
