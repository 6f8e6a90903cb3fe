use crate::app::handlers;
use crate::app::state::AppState;
use yew::prelude::*;

/// On mount: follow permission changes and ask for a fix straight away.
#[hook]
pub fn use_bootstrap(app_state: &AppState) {
    let state = app_state.clone();
    use_effect_with((), move |_| {
        handlers::watch_permission(&state);
        handlers::request_location(&state);
        || ()
    });
}
