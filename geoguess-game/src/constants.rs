//! Shared tuning values for the puzzle and session flow.

/// Fraction of a word's letters hidden from the player, as `NUM / DEN` (0.6).
pub const MASK_RATIO_NUM: usize = 3;
pub const MASK_RATIO_DEN: usize = 5;

/// Delay between a correct guess and the next round, in milliseconds.
pub const ROUND_TRANSITION_MS: u32 = 1_000;

/// Upper bound on a single geolocation request, in milliseconds.
pub const LOCATION_TIMEOUT_MS: u32 = 10_000;

/// Cached position fixes are never accepted.
pub const LOCATION_MAX_AGE_MS: u32 = 0;

pub const LOCATION_HIGH_ACCURACY: bool = true;

/// Session-scoped storage key marking that the notification went out.
pub const EMAIL_SENT_KEY: &str = "email_sent";

/// Sender name used when the player never typed one.
pub const FALLBACK_USER_NAME: &str = "Unknown";

/// Human-readable timestamp layout for notification payloads.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
