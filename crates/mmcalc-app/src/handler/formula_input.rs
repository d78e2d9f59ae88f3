//! Formula field helpers: input normalisation and the rotating hint placeholder

use mmcalc_core::{normalize_formula_input, FieldId};
use tracing::{debug, trace};

use crate::state::{AppState, HintRotation, TimerPurpose};

use super::{UpdateAction, UpdateResult};

/// Mirror the typed value, normalising formula fields in place
pub(crate) fn handle_input(state: &mut AppState, field: FieldId, raw: String) -> Vec<UpdateAction> {
    let Some(f) = state.field_mut(field) else {
        return Vec::new();
    };

    if !f.kind.is_formula() {
        f.value = raw;
        return Vec::new();
    }

    let normalized = normalize_formula_input(&raw);
    f.value.clone_from(&normalized);

    if normalized == raw {
        Vec::new()
    } else {
        trace!("{} normalised {:?} -> {:?}", field, raw, normalized);
        vec![UpdateAction::SetFieldValue {
            field,
            value: normalized,
        }]
    }
}

/// Start cycling example formulas through the placeholder
pub(crate) fn handle_focus(state: &mut AppState, field: FieldId) -> UpdateResult {
    let Some(f) = state.field(field) else {
        return UpdateResult::none();
    };
    if !f.kind.is_formula() || state.settings.hints.examples.is_empty() {
        return UpdateResult::none();
    }
    let authored = f.placeholder.clone();

    let mut actions = Vec::new();

    // Focus without a blur in between: restart, but keep the placeholder
    // captured the first time
    let original_placeholder = match state.hints.remove(&field) {
        Some(previous) => {
            state.release_timer(previous.timer);
            actions.push(UpdateAction::CancelTimer {
                timer: previous.timer,
            });
            previous.original_placeholder
        }
        None => authored,
    };

    let examples = &state.settings.hints.examples;
    let first = examples[0].clone();
    let next_index = 1 % examples.len();
    let period_ms = state.settings.hints.interval_ms;

    let timer = state.register_timer(TimerPurpose::HintRotation(field));
    state.hints.insert(
        field,
        HintRotation {
            timer,
            original_placeholder,
            next_index,
        },
    );

    debug!("Hint rotation started on {} ({})", field, timer);
    actions.push(UpdateAction::SetPlaceholder {
        field,
        placeholder: Some(first),
    });
    actions.push(UpdateAction::StartInterval { timer, period_ms });
    UpdateResult::actions(actions)
}

/// Show the next example
pub(crate) fn handle_hint_tick(state: &mut AppState, field: FieldId) -> UpdateResult {
    let examples = &state.settings.hints.examples;
    let Some(rotation) = state.hints.get_mut(&field) else {
        return UpdateResult::none();
    };
    if examples.is_empty() {
        return UpdateResult::none();
    }

    let index = rotation.next_index % examples.len();
    rotation.next_index = (index + 1) % examples.len();

    UpdateResult::action(UpdateAction::SetPlaceholder {
        field,
        placeholder: Some(examples[index].clone()),
    })
}

/// Cancel the rotation and put the captured placeholder back
pub(crate) fn stop_hints(state: &mut AppState, field: FieldId) -> Vec<UpdateAction> {
    let Some(rotation) = state.hints.remove(&field) else {
        return Vec::new();
    };

    state.release_timer(rotation.timer);
    debug!("Hint rotation stopped on {} ({})", field, rotation.timer);

    vec![
        UpdateAction::CancelTimer {
            timer: rotation.timer,
        },
        UpdateAction::SetPlaceholder {
            field,
            placeholder: rotation.original_placeholder,
        },
    ]
}
