#![cfg(target_arch = "wasm32")]

use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{EventTarget, HtmlButtonElement, HtmlInputElement, KeyboardEvent, KeyboardEventInit};
use yew::{Callback, Renderer};

use geoguess_web::app::App;
use geoguess_web::app::handlers::backspace_target;
use geoguess_web::components::letter_grid::{LetterGrid, Props as LetterGridProps, cells_for_round};
use geoguess_web::dom;
use geoguess_web::game::{CountryPool, Geolocator, Puzzle, SentFlag, SessionStorageFlag, WebGeolocator};
use geoguess_web::input::{cell_input_id, focus_cell};

wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document().expect("document");
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

fn render_app() {
    geoguess_web::i18n::set_lang("en");
    Renderer::<App>::with_root(ensure_app_root()).render();
}

#[wasm_bindgen_test]
async fn name_form_starts_with_disabled_submit() {
    render_app();
    gloo::timers::future::TimeoutFuture::new(0).await;
    let doc = dom::document().expect("document");
    let input: HtmlInputElement = doc
        .get_element_by_id("player-name")
        .expect("name input")
        .dyn_into()
        .expect("input element");
    assert_eq!(input.value(), "");
    let submit: HtmlButtonElement = doc
        .get_element_by_id("name-submit")
        .expect("submit button")
        .dyn_into()
        .expect("button element");
    assert!(submit.disabled());
}

#[wasm_bindgen_test]
fn skip_link_points_to_main_landmark() {
    render_app();
    let doc = dom::document().expect("document");
    let main = doc.get_element_by_id("main").expect("main landmark exists");
    assert_eq!(main.tag_name(), "MAIN");
    assert!(
        doc.query_selector("a[href='#main']")
            .expect("query skip link")
            .is_some()
    );
}

#[wasm_bindgen_test]
fn session_storage_flag_persists_within_tab() {
    let storage = dom::window()
        .and_then(|win| win.session_storage().ok().flatten())
        .expect("sessionStorage");
    let _ = storage.remove_item("email_sent");

    let flag = SessionStorageFlag;
    assert!(!flag.is_sent());
    flag.mark_sent();
    assert!(flag.is_sent());
    assert_eq!(
        storage.get_item("email_sent").ok().flatten().as_deref(),
        Some("true")
    );
    let _ = storage.remove_item("email_sent");
}

fn canada_puzzle() -> (Puzzle, Vec<usize>) {
    let pool = CountryPool::from_names(["Canada"]).expect("pool");
    let mut puzzle = Puzzle::new(pool, 9);
    let masked = puzzle.select_round().mask.iter().collect();
    (puzzle, masked)
}

async fn render_grid(puzzle: Puzzle) {
    geoguess_web::i18n::set_lang("en");
    let round = puzzle.round().expect("active round");
    let cells = cells_for_round(round);
    let puzzle = Rc::new(puzzle);
    let on_backspace = Callback::from(move |index: usize| {
        if let Some(previous) = backspace_target(&puzzle, index) {
            focus_cell(previous);
        }
    });
    let props = LetterGridProps {
        cells,
        frozen: false,
        on_input: Callback::noop(),
        on_backspace,
        on_submit: Callback::noop(),
    };
    Renderer::<LetterGrid>::with_root_and_props(ensure_app_root(), props).render();
    gloo::timers::future::TimeoutFuture::new(0).await;
}

fn press_backspace(index: usize) {
    let doc = dom::document().expect("document");
    let cell = doc
        .get_element_by_id(&cell_input_id(index))
        .expect("letter cell");
    let init = KeyboardEventInit::new();
    init.set_key("Backspace");
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event =
        KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).expect("keydown event");
    let target: &EventTarget = cell.as_ref();
    target.dispatch_event(&event).expect("dispatch keydown");
}

fn focused_id() -> Option<String> {
    dom::document()
        .and_then(|doc| doc.active_element())
        .map(|el| el.id())
}

#[wasm_bindgen_test]
async fn backspace_on_empty_cell_moves_focus_back() {
    let (puzzle, masked) = canada_puzzle();
    render_grid(puzzle).await;

    assert!(focus_cell(masked[1]));
    press_backspace(masked[1]);
    assert_eq!(focused_id(), Some(cell_input_id(masked[0])));
}

#[wasm_bindgen_test]
async fn backspace_on_filled_cell_keeps_focus() {
    let (mut puzzle, masked) = canada_puzzle();
    assert!(puzzle.update_cell(masked[1], "x"));
    render_grid(puzzle).await;

    assert!(focus_cell(masked[1]));
    press_backspace(masked[1]);
    assert_eq!(focused_id(), Some(cell_input_id(masked[1])));
}

#[wasm_bindgen_test]
fn browser_reports_geolocation_support() {
    assert!(WebGeolocator.is_supported());
}
