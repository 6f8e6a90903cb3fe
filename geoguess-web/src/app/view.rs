use crate::app::handlers;
use crate::app::phase::Phase;
use crate::app::state::AppState;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::letter_grid::{LetterGrid, cells_for_round};
use crate::components::location_prompt::LocationPrompt;
use crate::components::name_form::NameForm;
use crate::components::result_message::ResultMessage;
use crate::game::{PermissionState, PuzzlePhase};
use yew::prelude::*;

fn render_playing(state: &AppState) -> Html {
    let gate = state.gate.borrow();
    let puzzle = gate.puzzle();
    let Some(round) = puzzle.round() else {
        return Html::default();
    };
    let cells = cells_for_round(round);
    let frozen = puzzle.phase() != PuzzlePhase::Active;
    let feedback = puzzle.feedback();

    let on_input = {
        let state = state.clone();
        Callback::from(move |(index, value): (usize, String)| {
            handlers::edit_cell(&state, index, &value);
        })
    };
    let on_backspace = {
        let state = state.clone();
        Callback::from(move |index: usize| handlers::backspace_cell(&state, index))
    };
    let on_submit = {
        let state = state.clone();
        Callback::from(move |()| handlers::submit_guess(&state))
    };

    html! {
        <>
            <LetterGrid {cells} {frozen} {on_input} {on_backspace} {on_submit} />
            <ResultMessage {feedback} />
        </>
    }
}

fn render_name_entry(state: &AppState) -> Html {
    let value = (*state.name_draft).clone();
    let on_input = {
        let draft = state.name_draft.clone();
        Callback::from(move |value: String| draft.set(value))
    };
    let on_submit = {
        let state = state.clone();
        Callback::from(move |()| handlers::submit_name(&state))
    };
    html! { <NameForm {value} {on_input} {on_submit} /> }
}

fn render_location_prompt(state: &AppState, unsupported: bool) -> Html {
    let denied = state.gate.borrow().permission() == PermissionState::Denied;
    let on_request = {
        let state = state.clone();
        Callback::from(move |()| handlers::request_location(&state))
    };
    html! { <LocationPrompt {denied} {unsupported} {on_request} /> }
}

#[must_use]
pub fn render_app(state: &AppState) -> Html {
    let body = match state.phase() {
        Phase::NameEntry => render_name_entry(state),
        Phase::LocationPrompt => render_location_prompt(state, false),
        Phase::Unsupported => render_location_prompt(state, true),
        Phase::Playing => render_playing(state),
    };
    let focus_css = crate::a11y::visible_focus_css();

    html! {
        <>
            <style>{ focus_css }</style>
            <Header />
            <main id="main" role="main" class="game-card">
                { body }
                <p id={crate::a11y::STATUS_REGION_ID} class="sr-only" aria-live="polite"></p>
            </main>
            <Footer />
        </>
    }
}
