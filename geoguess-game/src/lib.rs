//! GeoGuess Game Engine
//!
//! Platform-agnostic core for the GeoGuess country puzzle: the country pool,
//! mask generation, the guessing state machine, the session gate and the
//! one-shot notification. Browser APIs stay behind the [`Geolocator`],
//! [`Mailer`] and [`SentFlag`] traits.

pub mod constants;
pub mod location;
pub mod mask;
pub mod notify;
pub mod pool;
pub mod puzzle;
pub mod session;

use std::cell::RefCell;

// Re-export commonly used types
pub use location::{Coordinates, Geolocator, LocationError, PermissionState, PositionOptions};
pub use mask::{MaskSet, generate_mask, mask_size};
pub use notify::{
    DispatchOutcome, EmailConfig, Mailer, MemorySentFlag, NotificationDispatcher,
    NotificationPayload, NotifyError, SentFlag,
};
pub use pool::{CountryPool, PoolError};
pub use puzzle::{
    Feedback, GuessOutcome, InputBuffer, Puzzle, PuzzlePhase, Round, RoundToken,
};
pub use session::{NotifyRequest, SessionError, SessionGate, Stage};

/// Result of one pass through the location flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationUpdate {
    /// The runtime has no geolocation; the session is halted.
    Unsupported,
    /// Permission is denied; the player has to change it in the browser.
    Denied,
    /// A fix arrived. `dispatch` is set when this fix started play.
    Located { dispatch: Option<DispatchOutcome> },
    /// The request failed or timed out; the player is back at the prompt.
    Failed(LocationError),
}

/// A location pass before any notification is sent.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationStep {
    Unsupported,
    Denied,
    /// Carries the play-start request when this fix started play.
    Located(Option<NotifyRequest>),
    Failed(LocationError),
}

/// Local wall-clock time for notification payloads.
#[must_use]
pub fn timestamp_now() -> String {
    chrono::Local::now()
        .format(constants::TIMESTAMP_FORMAT)
        .to_string()
}

/// Binds the platform collaborators to a [`SessionGate`].
pub struct GameEngine<G, M, F>
where
    G: Geolocator,
    M: Mailer,
    F: SentFlag,
{
    geolocator: G,
    dispatcher: NotificationDispatcher<M>,
    sent_flag: F,
}

impl<G, M, F> GameEngine<G, M, F>
where
    G: Geolocator,
    M: Mailer,
    F: SentFlag,
{
    /// Create a new engine with the provided collaborators
    pub const fn new(geolocator: G, dispatcher: NotificationDispatcher<M>, sent_flag: F) -> Self {
        Self {
            geolocator,
            dispatcher,
            sent_flag,
        }
    }

    pub const fn geolocator(&self) -> &G {
        &self.geolocator
    }

    pub const fn dispatcher(&self) -> &NotificationDispatcher<M> {
        &self.dispatcher
    }

    pub const fn sent_flag(&self) -> &F {
        &self.sent_flag
    }

    /// Check support and permission, then request a fresh fix.
    ///
    /// The gate is only borrowed between awaits, so UI events may touch it
    /// while the request is in flight. Any play-start request is handed back
    /// undispatched.
    pub async fn locate(&self, gate: &RefCell<SessionGate>) -> LocationStep {
        if !self.geolocator.is_supported() {
            gate.borrow_mut().location_unsupported();
            return LocationStep::Unsupported;
        }

        match self.geolocator.query_permission().await {
            Some(PermissionState::Denied) => {
                gate.borrow_mut().location_denied();
                return LocationStep::Denied;
            }
            Some(permission) => gate.borrow_mut().record_permission(permission),
            None => log::debug!("permission state unavailable; requesting fix directly"),
        }

        let fix = self
            .geolocator
            .current_position(&PositionOptions::default())
            .await;
        match fix {
            Ok(coords) => LocationStep::Located(gate.borrow_mut().location_acquired(coords)),
            Err(err) => {
                gate.borrow_mut().location_failed(&err);
                LocationStep::Failed(err)
            }
        }
    }

    /// [`Self::locate`], then dispatch the notification if play started.
    pub async fn request_location(&self, gate: &RefCell<SessionGate>) -> LocationUpdate {
        match self.locate(gate).await {
            LocationStep::Unsupported => LocationUpdate::Unsupported,
            LocationStep::Denied => LocationUpdate::Denied,
            LocationStep::Failed(err) => LocationUpdate::Failed(err),
            LocationStep::Located(request) => {
                let dispatch = match request {
                    Some(request) => Some(self.dispatch(&request).await),
                    None => None,
                };
                LocationUpdate::Located { dispatch }
            }
        }
    }

    /// Submit the player's name, notifying if that starts play.
    ///
    /// # Errors
    ///
    /// Returns an error if the gate rejects the name.
    pub async fn submit_name(
        &self,
        gate: &RefCell<SessionGate>,
        name: &str,
    ) -> Result<Option<DispatchOutcome>, SessionError> {
        let request = gate.borrow_mut().submit_name(name)?;
        Ok(match request {
            Some(request) => Some(self.dispatch(&request).await),
            None => None,
        })
    }

    /// Hand a play-start request to the notifier, stamped with local time.
    pub async fn dispatch(&self, request: &NotifyRequest) -> DispatchOutcome {
        self.dispatcher
            .notify_once(&self.sent_flag, request, timestamp_now())
            .await
    }
}
