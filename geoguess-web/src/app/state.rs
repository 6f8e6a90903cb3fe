use crate::app::phase::{Phase, phase_for_gate};
use crate::game::{SessionGate, WebEngine, create_session_gate, create_web_engine};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

/// Page-lifetime state. The gate is shared with in-flight location and
/// transition tasks; `refresh` re-renders after they touch it.
#[derive(Clone)]
pub struct AppState {
    pub gate: Rc<RefCell<SessionGate>>,
    pub engine: Rc<WebEngine>,
    pub name_draft: UseStateHandle<String>,
    pub refresh: UseForceUpdateHandle,
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        gate: use_mut_ref(create_session_gate),
        engine: use_memo((), |_| create_web_engine()),
        name_draft: use_state(String::new),
        refresh: use_force_update(),
    }
}

impl AppState {
    #[must_use]
    pub fn phase(&self) -> Phase {
        phase_for_gate(&self.gate.borrow())
    }

    pub fn rerender(&self) {
        self.refresh.force_update();
    }
}
