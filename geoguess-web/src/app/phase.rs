use crate::game::{SessionGate, Stage};

/// Which screen the page shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NameEntry,
    LocationPrompt,
    /// Geolocation is missing; the prompt can never succeed.
    Unsupported,
    Playing,
}

#[must_use]
pub const fn phase_for_gate(gate: &SessionGate) -> Phase {
    match gate.stage() {
        Stage::AwaitingName => Phase::NameEntry,
        Stage::AwaitingLocation if gate.is_halted() => Phase::Unsupported,
        Stage::AwaitingLocation => Phase::LocationPrompt,
        Stage::Playing => Phase::Playing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Coordinates, LocationError};

    #[test]
    fn phases_follow_gate_stage() {
        let mut gate = SessionGate::with_seed(7);
        assert_eq!(phase_for_gate(&gate), Phase::NameEntry);

        gate.submit_name("Ada").unwrap();
        assert_eq!(phase_for_gate(&gate), Phase::LocationPrompt);

        gate.location_acquired(Coordinates::new(0.0, 0.0));
        assert_eq!(phase_for_gate(&gate), Phase::Playing);

        gate.location_failed(&LocationError::Timeout);
        assert_eq!(phase_for_gate(&gate), Phase::LocationPrompt);
    }

    #[test]
    fn halted_gate_shows_unsupported_after_name() {
        let mut gate = SessionGate::with_seed(8);
        gate.location_unsupported();
        assert_eq!(phase_for_gate(&gate), Phase::NameEntry);
        gate.submit_name("Ada").unwrap();
        assert_eq!(phase_for_gate(&gate), Phase::Unsupported);
    }
}
