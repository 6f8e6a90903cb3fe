//! Scripted collaborators that stand in for the browser.
use geoguess_game::{
    Coordinates, EmailConfig, GameEngine, Geolocator, LocationError, Mailer, MemorySentFlag,
    NotificationDispatcher, NotificationPayload, NotifyError, PermissionState, PositionOptions,
};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

pub type ScenarioEngine = GameEngine<ScriptedGeolocator, FlakyMailer, MemorySentFlag>;

/// Answers permission queries from a settable state and fixes from a queue.
#[derive(Debug)]
pub struct ScriptedGeolocator {
    supported: bool,
    permission: Cell<Option<PermissionState>>,
    fixes: RefCell<VecDeque<Result<Coordinates, LocationError>>>,
    requests: Cell<usize>,
}

impl ScriptedGeolocator {
    pub fn new(permission: Option<PermissionState>) -> Self {
        Self {
            supported: true,
            permission: Cell::new(permission),
            fixes: RefCell::new(VecDeque::new()),
            requests: Cell::new(0),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new(None)
        }
    }

    pub fn push_fix(&self, fix: Result<Coordinates, LocationError>) {
        self.fixes.borrow_mut().push_back(fix);
    }

    pub fn set_permission(&self, permission: PermissionState) {
        self.permission.set(Some(permission));
    }

    /// Number of position requests made so far.
    pub fn requests(&self) -> usize {
        self.requests.get()
    }
}

impl Geolocator for ScriptedGeolocator {
    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn query_permission(&self) -> Option<PermissionState> {
        self.permission.get()
    }

    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinates, LocationError> {
        self.requests.set(self.requests.get() + 1);
        self.fixes
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(LocationError::PositionUnavailable))
    }
}

/// Fails the first `failures` sends, then records every payload.
#[derive(Debug, Default)]
pub struct FlakyMailer {
    failures: Cell<usize>,
    attempts: Cell<usize>,
    delivered: RefCell<Vec<NotificationPayload>>,
}

impl FlakyMailer {
    pub fn failing(failures: usize) -> Self {
        Self {
            failures: Cell::new(failures),
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }

    pub fn delivered(&self) -> Vec<NotificationPayload> {
        self.delivered.borrow().clone()
    }
}

impl Mailer for FlakyMailer {
    async fn send(
        &self,
        _config: &EmailConfig,
        payload: &NotificationPayload,
    ) -> Result<(), NotifyError> {
        self.attempts.set(self.attempts.get() + 1);
        let remaining = self.failures.get();
        if remaining > 0 {
            self.failures.set(remaining - 1);
            return Err(NotifyError::Transport("simulated outage".into()));
        }
        self.delivered.borrow_mut().push(payload.clone());
        Ok(())
    }
}

pub fn test_email_config() -> EmailConfig {
    EmailConfig {
        service_id: "service_test".into(),
        template_id: "template_test".into(),
        public_key: "public_test".into(),
        ..EmailConfig::default()
    }
}

pub fn scenario_engine(geolocator: ScriptedGeolocator, mailer: FlakyMailer) -> ScenarioEngine {
    GameEngine::new(
        geolocator,
        NotificationDispatcher::new(mailer, test_email_config()),
        MemorySentFlag::new(),
    )
}
