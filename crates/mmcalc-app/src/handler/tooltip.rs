//! Tooltip presenter: one tooltip at a time, owned by the hovered element

use mmcalc_core::{ElementId, Rect};
use tracing::trace;

use crate::state::{AppState, TooltipState};

use super::{UpdateAction, UpdateResult};

pub(crate) fn handle_pointer_enter(
    state: &mut AppState,
    element: ElementId,
    title: String,
    anchor: Rect,
) -> UpdateResult {
    if title.trim().is_empty() {
        return UpdateResult::none();
    }

    let mut actions = Vec::new();
    if let Some(previous) = state.tooltip.take() {
        trace!("Replacing tooltip of {}", previous.owner);
        actions.push(UpdateAction::HideTooltip);
    }

    state.tooltip = Some(TooltipState { owner: element });
    actions.push(UpdateAction::ShowTooltip {
        owner: element,
        text: title,
        anchor,
    });
    UpdateResult::actions(actions)
}

pub(crate) fn handle_pointer_leave(state: &mut AppState, element: ElementId) -> UpdateResult {
    match state.tooltip {
        Some(TooltipState { owner }) if owner == element => {
            state.tooltip = None;
            UpdateResult::action(UpdateAction::HideTooltip)
        }
        _ => UpdateResult::none(),
    }
}
