//! Submit guard and per-field validation

use mmcalc_core::{check_field_value, ElementContent, ElementId, FieldId, FormId, ValidationState};
use tracing::{debug, info, warn};

use crate::message::FieldValue;
use crate::state::{AppState, BusyButton, TimerPurpose};

use super::{UpdateAction, UpdateResult};

/// Where a submission came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubmitSource {
    /// Native submit event; cancelled when invalid, otherwise left to proceed
    Event,
    /// Keyboard shortcut; submitted explicitly when valid
    Shortcut,
}

/// Copy host-reported values into field state
pub(crate) fn mirror_values(state: &mut AppState, values: &[FieldValue]) {
    for FieldValue { field, value } in values {
        match state.field_mut(*field) {
            Some(f) => f.value.clone_from(value),
            None => debug!("Submit reported value for unknown {}", field),
        }
    }
}

/// Validate one field and render the outcome, replacing any previous message.
///
/// Returns whether the field passed.
pub(crate) fn validate_field(
    state: &mut AppState,
    field: FieldId,
    actions: &mut Vec<UpdateAction>,
) -> bool {
    let Some(f) = state.field_mut(field) else {
        warn!("Cannot validate unknown {}", field);
        return true;
    };

    match check_field_value(f.kind, f.required, &f.value) {
        Ok(()) => {
            f.validation = ValidationState::Valid;
            f.error = None;
            actions.push(UpdateAction::SetValidation {
                field,
                state: ValidationState::Valid,
            });
            actions.push(UpdateAction::HideFieldError { field });
            true
        }
        Err(err) => {
            debug!("{} ({}) invalid: {:?}", field, f.name, err);
            f.validation = ValidationState::Invalid;
            f.error = Some(err);
            actions.push(UpdateAction::SetValidation {
                field,
                state: ValidationState::Invalid,
            });
            actions.push(UpdateAction::ShowFieldError {
                field,
                message: err.to_string(),
            });
            false
        }
    }
}

/// Reset a field to untouched and drop its message
fn reset_field(state: &mut AppState, field: FieldId, actions: &mut Vec<UpdateAction>) {
    if let Some(f) = state.field_mut(field) {
        f.validation = ValidationState::Untouched;
        f.error = None;
    }
    actions.push(UpdateAction::SetValidation {
        field,
        state: ValidationState::Untouched,
    });
    actions.push(UpdateAction::HideFieldError { field });
}

/// Validate every required field of `form`; block or let the submission through
pub(crate) fn handle_submit(
    state: &mut AppState,
    form: FormId,
    source: SubmitSource,
) -> UpdateResult {
    if state.form(form).is_none() {
        warn!("Submit for unknown {}", form);
        return UpdateResult::none();
    }

    let mut field_actions = Vec::new();
    let mut failed = 0usize;
    // Validate all of them so every error is shown at once
    for field in state.required_fields(form) {
        if !validate_field(state, field, &mut field_actions) {
            failed += 1;
        }
    }

    if failed > 0 {
        info!("Submission of {} blocked: {} invalid field(s)", form, failed);
        let mut actions = Vec::new();
        if source == SubmitSource::Event {
            actions.push(UpdateAction::CancelSubmit { form });
        }
        actions.extend(field_actions);
        return UpdateResult::actions(actions);
    }

    info!("Submitting {} ({:?})", form, source);
    let mut actions = field_actions;
    actions.extend(mark_submit_busy(state, form));
    if source == SubmitSource::Shortcut {
        actions.push(UpdateAction::SubmitForm { form });
    }
    UpdateResult::actions(actions)
}

/// Disable the submit button with the busy label and schedule its restore.
///
/// The restore fires whether or not the page navigates away first.
fn mark_submit_busy(state: &mut AppState, form: FormId) -> Vec<UpdateAction> {
    let Some((button, label)) = state.form(form).and_then(|f| {
        let button = f.submit_button?;
        Some((button, f.submit_label.clone().unwrap_or_default()))
    }) else {
        return Vec::new();
    };

    if state.busy_buttons.contains_key(&button) {
        debug!("{} is already busy", button);
        return Vec::new();
    }

    let timer = state.register_timer(TimerPurpose::SubmitRestore(button));
    state.busy_buttons.insert(
        button,
        BusyButton {
            form,
            original_label: label,
            timer,
        },
    );

    vec![
        UpdateAction::SetDisabled {
            element: button,
            disabled: true,
        },
        UpdateAction::SetContent {
            element: button,
            content: ElementContent::markup(state.settings.submit.busy_label.clone()),
        },
        UpdateAction::StartTimeout {
            timer,
            delay_ms: state.settings.submit.restore_after_ms,
        },
    ]
}

/// Re-enable a busy submit button and put its label back
pub(crate) fn handle_submit_restore(state: &mut AppState, button: ElementId) -> UpdateResult {
    let Some(busy) = state.busy_buttons.remove(&button) else {
        return UpdateResult::none();
    };

    debug!("Restoring submit {} of {}", button, busy.form);
    UpdateResult::actions(vec![
        UpdateAction::SetDisabled {
            element: button,
            disabled: false,
        },
        UpdateAction::SetContent {
            element: button,
            content: ElementContent::Markup(busy.original_label),
        },
    ])
}

/// Real-time validation when a required field loses focus
pub(crate) fn handle_blur(state: &mut AppState, field: FieldId, value: String) -> Vec<UpdateAction> {
    let mut actions = Vec::new();
    let Some(f) = state.field_mut(field) else {
        return actions;
    };

    f.value = value;
    if f.required {
        validate_field(state, field, &mut actions);
    }
    actions
}

/// Typing into a required field clears its validation state
pub(crate) fn clear_on_input(state: &mut AppState, field: FieldId) -> Vec<UpdateAction> {
    let mut actions = Vec::new();
    let needs_reset = state.field(field).is_some_and(|f| {
        f.required && (f.validation != ValidationState::Untouched || f.error.is_some())
    });

    if needs_reset {
        reset_field(state, field, &mut actions);
    }
    actions
}

/// Empty the form's text and number inputs and focus the first of them
pub(crate) fn handle_clear_form(state: &mut AppState, form: FormId) -> UpdateResult {
    let Some(form_state) = state.form(form) else {
        return UpdateResult::none();
    };

    let clearable: Vec<FieldId> = form_state
        .fields
        .iter()
        .copied()
        .filter(|id| {
            state
                .field(*id)
                .is_some_and(|f| f.input_type.is_clearable())
        })
        .collect();

    let mut actions = Vec::new();
    for &field in &clearable {
        if let Some(f) = state.field_mut(field) {
            f.value.clear();
        }
        actions.push(UpdateAction::SetFieldValue {
            field,
            value: String::new(),
        });
        reset_field(state, field, &mut actions);
    }

    if let Some(&first) = clearable.first() {
        actions.push(UpdateAction::FocusField { field: first });
    }

    debug!("Cleared {} field(s) of {}", clearable.len(), form);
    UpdateResult::actions(actions)
}
