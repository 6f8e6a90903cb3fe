//! Geolocation collaborator boundary.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use thiserror::Error;

use crate::constants::{LOCATION_HIGH_ACCURACY, LOCATION_MAX_AGE_MS, LOCATION_TIMEOUT_MS};

/// A position fix in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Latitude: {}, Longitude: {}", self.lat, self.lng)
    }
}

/// Location permission as last reported by the runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    /// Not yet decided; the runtime will prompt.
    #[default]
    Unknown,
    Granted,
    Denied,
}

/// Options forwarded to the position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: LOCATION_HIGH_ACCURACY,
            timeout_ms: LOCATION_TIMEOUT_MS,
            maximum_age_ms: LOCATION_MAX_AGE_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("geolocation is not supported by this runtime")]
    Unsupported,
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("location request timed out")]
    Timeout,
    #[error("location error: {0}")]
    Other(String),
}

impl LocationError {
    /// Map a W3C `GeolocationPositionError.code` to an error.
    #[must_use]
    pub fn from_code(code: u16, message: &str) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            _ => Self::Other(message.to_string()),
        }
    }
}

/// Source of permission state and position fixes.
///
/// Implementations are single-threaded; the futures need not be `Send`.
pub trait Geolocator {
    /// Whether the runtime exposes geolocation at all.
    fn is_supported(&self) -> bool;

    /// Current permission, or `None` when the runtime cannot report it.
    fn query_permission(&self) -> impl Future<Output = Option<PermissionState>>;

    /// Request one fresh position fix.
    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = Result<Coordinates, LocationError>>;
}
