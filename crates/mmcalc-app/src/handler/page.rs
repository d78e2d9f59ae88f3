//! Page registration, copy control attachment and mode navigation

use mmcalc_core::mode_url;
use tracing::{debug, info, warn};

use crate::message::{HeadingSnapshot, PageSnapshot};
use crate::state::{AppState, CopyControl, FieldState, FormState};

use super::{UpdateAction, UpdateResult};

/// Register the scanned page and decorate its result headings
pub(crate) fn handle_page_loaded(state: &mut AppState, page: PageSnapshot) -> UpdateResult {
    // Nothing from a previous page carries over
    let had_tooltip = state.tooltip.is_some();
    let mut actions: Vec<UpdateAction> = state
        .reset_page()
        .into_iter()
        .map(|timer| UpdateAction::CancelTimer { timer })
        .collect();
    if had_tooltip {
        actions.push(UpdateAction::HideTooltip);
    }
    if !actions.is_empty() {
        debug!("Dropped state of the previous page ({} action(s))", actions.len());
    }

    state.origin = page.origin;
    state.reserve_ids_below(page.next_free_id);
    state.forms = page.forms.iter().map(FormState::from_snapshot).collect();
    state.fields = page
        .forms
        .iter()
        .flat_map(|form| {
            form.fields
                .iter()
                .map(move |field| (field.id, FieldState::from_snapshot(form.id, field)))
        })
        .collect();

    info!(
        "Page registered: {} form(s), {} field(s), {} result heading(s)",
        state.forms.len(),
        state.fields.len(),
        page.headings.len()
    );

    actions.extend(attach_copy_controls(state, &page.headings));
    UpdateResult::actions(actions)
}

/// Attach copy controls to newly found result headings
pub(crate) fn handle_result_headings(
    state: &mut AppState,
    headings: &[HeadingSnapshot],
    next_free_id: u32,
) -> UpdateResult {
    state.reserve_ids_below(next_free_id);
    UpdateResult::actions(attach_copy_controls(state, headings))
}

fn attach_copy_controls(state: &mut AppState, headings: &[HeadingSnapshot]) -> Vec<UpdateAction> {
    let mut actions = Vec::new();

    for heading in headings {
        if heading.has_copy_control || state.decorated_headings.contains(&heading.id) {
            debug!("{} already has a copy control", heading.id);
            continue;
        }

        let control = state.allocate_element_id();
        state.decorated_headings.insert(heading.id);
        state
            .copy_controls
            .insert(control, CopyControl { heading: heading.id });

        actions.push(UpdateAction::AttachCopyButton {
            heading: heading.id,
            control,
            label: state.settings.clipboard.copy_label.clone(),
            title: state.settings.clipboard.copy_title.clone(),
        });
    }

    actions
}

/// Full page load of `/calculate?mode=<mode>`
pub(crate) fn handle_navigate_to_mode(state: &mut AppState, mode: char) -> UpdateResult {
    match mode_url(
        state.origin.as_deref(),
        &state.settings.shortcuts.mode_path,
        mode,
    ) {
        Ok(url) => {
            info!("Switching to mode {}: {}", mode, url);
            UpdateResult::action(UpdateAction::Navigate { url })
        }
        Err(e) => {
            warn!("Cannot build URL for mode {}: {}", mode, e);
            UpdateResult::none()
        }
    }
}
