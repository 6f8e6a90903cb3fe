//! Event actions. Each one mutates the shared gate, then re-renders.
use crate::app::state::AppState;
use crate::game::constants::ROUND_TRANSITION_MS;
use crate::game::{GuessOutcome, LocationStep, NotifyRequest, PermissionState, Puzzle};
use crate::i18n::t;
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

fn dispatch_in_background(state: &AppState, request: NotifyRequest) {
    let engine = state.engine.clone();
    spawn_local(async move {
        let outcome = engine.dispatch(&request).await;
        log::debug!("notification outcome: {outcome:?}");
    });
}

pub fn submit_name(state: &AppState) {
    let result = state.gate.borrow_mut().submit_name(&state.name_draft);
    match result {
        Ok(request) => {
            state.rerender();
            if let Some(request) = request {
                dispatch_in_background(state, request);
            }
        }
        Err(err) => log::debug!("name not accepted: {err}"),
    }
}

/// Run one location pass; alerts mirror the blocking prompts players expect.
pub fn request_location(state: &AppState) {
    let state = state.clone();
    spawn_local(async move {
        let step = state.engine.locate(&state.gate).await;
        state.rerender();
        match step {
            LocationStep::Unsupported => gloo::dialogs::alert(&t("location.unsupported")),
            LocationStep::Denied => gloo::dialogs::alert(&t("location.denied_alert")),
            LocationStep::Located(Some(request)) => dispatch_in_background(&state, request),
            LocationStep::Located(None) => {}
            LocationStep::Failed(err) => log::info!("location unavailable: {err}"),
        }
    });
}

/// Follow permission changes made in browser settings.
pub fn watch_permission(state: &AppState) {
    let state = state.clone();
    spawn_local(async move {
        let observer = state.clone();
        let watching = state
            .engine
            .geolocator()
            .watch_permission(move |permission: PermissionState| {
                let refetch = observer.gate.borrow_mut().permission_changed(permission);
                observer.rerender();
                if refetch {
                    request_location(&observer);
                }
            })
            .await;
        if !watching {
            log::debug!("permission changes will not be observed");
        }
    });
}

/// Apply an edit to cell `index` and move focus forward when a letter landed.
pub fn edit_cell(state: &AppState, index: usize, value: &str) {
    let accepted = state.gate.borrow_mut().update_cell(index, value);
    if !accepted {
        return;
    }
    state.rerender();
    if !value.is_empty() {
        let next = state.gate.borrow().puzzle().next_editable(index);
        if let Some(next) = next {
            crate::input::focus_cell(next);
        }
    }
}

/// Cell that should take focus after Backspace in cell `index`.
///
/// Only an already empty cell hands focus back to the previous editable one.
#[must_use]
pub fn backspace_target(puzzle: &Puzzle, index: usize) -> Option<usize> {
    let empty = puzzle
        .round()
        .is_some_and(|round| round.buffer.get(index).is_none());
    if empty {
        puzzle.previous_editable(index)
    } else {
        None
    }
}

pub fn backspace_cell(state: &AppState, index: usize) {
    let target = backspace_target(state.gate.borrow().puzzle(), index);
    if let Some(previous) = target {
        crate::input::focus_cell(previous);
    }
}

pub fn submit_guess(state: &AppState) {
    let outcome = state.gate.borrow_mut().submit_guess();
    let Some(outcome) = outcome else {
        return;
    };
    state.rerender();
    match outcome {
        GuessOutcome::Correct(token) => {
            crate::a11y::set_status(&t("result.correct"));
            let state = state.clone();
            spawn_local(async move {
                TimeoutFuture::new(ROUND_TRANSITION_MS).await;
                if state.gate.borrow_mut().advance_round(token) {
                    state.rerender();
                    focus_first_cell(&state);
                }
            });
        }
        GuessOutcome::Incorrect => {
            crate::a11y::set_status(&t("result.try_again"));
            focus_first_cell(state);
        }
    }
}

fn focus_first_cell(state: &AppState) {
    let first = state
        .gate
        .borrow()
        .puzzle()
        .round()
        .and_then(|round| round.mask.iter().next());
    if let Some(first) = first {
        crate::input::focus_cell(first);
    }
}
