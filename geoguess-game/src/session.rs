//! Session gate: name entry, location permission, then play.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::location::{Coordinates, LocationError, PermissionState};
use crate::puzzle::{GuessOutcome, Puzzle, RoundToken};

/// Which prerequisite the player is currently facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    AwaitingName,
    AwaitingLocation,
    Playing,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("name must not be blank")]
    EmptyName,
    #[error("a name was already submitted for this session")]
    NameAlreadySubmitted,
}

/// Emitted once when play starts; the caller hands it to the notifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NotifyRequest {
    pub name: Option<String>,
    pub coords: Coordinates,
}

/// Owns the session stage and the puzzle it unlocks.
#[derive(Debug, Clone)]
pub struct SessionGate {
    stage: Stage,
    name: Option<String>,
    permission: PermissionState,
    coords: Option<Coordinates>,
    halted: bool,
    puzzle: Puzzle,
}

impl SessionGate {
    #[must_use]
    pub const fn new(puzzle: Puzzle) -> Self {
        Self {
            stage: Stage::AwaitingName,
            name: None,
            permission: PermissionState::Unknown,
            coords: None,
            halted: false,
            puzzle,
        }
    }

    /// Gate over the built-in pool with a seeded puzzle.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Puzzle::with_seed(seed))
    }

    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub const fn permission(&self) -> PermissionState {
        self.permission
    }

    #[must_use]
    pub const fn coords(&self) -> Option<Coordinates> {
        self.coords
    }

    /// Geolocation is unavailable; nothing further can unlock play.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    #[must_use]
    pub const fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Record the player's name and move on to the location prompt.
    ///
    /// Returns the notification request when a location fix was already in
    /// hand and play started immediately.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank name or a second submission; the stage
    /// does not change.
    pub fn submit_name(&mut self, name: &str) -> Result<Option<NotifyRequest>, SessionError> {
        if self.stage != Stage::AwaitingName {
            return Err(SessionError::NameAlreadySubmitted);
        }
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyName);
        }
        self.name = Some(trimmed.to_string());
        self.stage = Stage::AwaitingLocation;
        Ok(self.try_enter_play())
    }

    /// Note a permission reported by the runtime without requesting a fix.
    pub fn record_permission(&mut self, permission: PermissionState) {
        self.permission = permission;
    }

    /// The runtime reported an explicit denial before any fix was requested.
    pub fn location_denied(&mut self) {
        self.permission = PermissionState::Denied;
    }

    /// A fresh fix arrived.
    ///
    /// Starts play (first round plus one notification request) when the name
    /// is already in; otherwise the fix waits for [`Self::submit_name`].
    pub fn location_acquired(&mut self, coords: Coordinates) -> Option<NotifyRequest> {
        self.permission = PermissionState::Granted;
        self.coords = Some(coords);
        self.try_enter_play()
    }

    /// The fix failed or timed out: back to the allow-location prompt.
    pub fn location_failed(&mut self, error: &LocationError) {
        log::warn!("location request failed: {error}");
        self.permission = PermissionState::Denied;
        self.coords = None;
        if self.stage == Stage::Playing {
            self.stage = Stage::AwaitingLocation;
        }
    }

    pub fn location_unsupported(&mut self) {
        log::warn!("geolocation unsupported; session halted");
        self.halted = true;
    }

    /// Apply an external permission change.
    ///
    /// Returns `true` when the caller should request a fix again without
    /// waiting for the player.
    pub fn permission_changed(&mut self, permission: PermissionState) -> bool {
        self.permission = permission;
        permission == PermissionState::Granted
            && self.coords.is_none()
            && !self.halted
            && self.stage != Stage::Playing
    }

    fn try_enter_play(&mut self) -> Option<NotifyRequest> {
        if self.stage != Stage::AwaitingLocation {
            return None;
        }
        let coords = self.coords?;
        self.name.as_ref()?;
        self.stage = Stage::Playing;
        self.puzzle.select_round();
        Some(NotifyRequest {
            name: self.name.clone(),
            coords,
        })
    }

    /// See [`Puzzle::update_cell`]; inert outside of play.
    pub fn update_cell(&mut self, index: usize, value: &str) -> bool {
        self.stage == Stage::Playing && self.puzzle.update_cell(index, value)
    }

    /// See [`Puzzle::submit_guess`]; `None` outside of play.
    pub fn submit_guess(&mut self) -> Option<GuessOutcome> {
        if self.stage != Stage::Playing {
            return None;
        }
        self.puzzle.submit_guess()
    }

    /// See [`Puzzle::advance_round`].
    pub fn advance_round(&mut self, token: RoundToken) -> bool {
        self.puzzle.advance_round(token)
    }
}
