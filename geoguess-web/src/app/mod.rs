use yew::prelude::*;

pub mod bootstrap;
pub mod handlers;
pub mod phase;
pub mod state;
pub mod view;

pub use phase::Phase;

#[function_component(App)]
pub fn app() -> Html {
    let app_state = state::use_app_state();
    bootstrap::use_bootstrap(&app_state);
    view::render_app(&app_state)
}
