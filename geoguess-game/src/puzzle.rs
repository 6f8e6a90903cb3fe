//! Fill-in-the-blanks puzzle over a single country name.
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::mask::MaskSet;
use crate::pool::CountryPool;

/// Lifecycle of the puzzle between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzlePhase {
    /// No country chosen yet.
    Idle,
    /// A round is on screen and accepting input.
    Active,
    /// The round was solved; the next one starts once the delay elapses.
    Transitioning,
}

/// Transient message shown after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Correct,
    TryAgain,
}

/// Identifies the round a deferred transition was scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess matched; call [`Puzzle::advance_round`] with the token after the delay.
    Correct(RoundToken),
    /// The guess missed; the masked cells were cleared.
    Incorrect,
}

impl GuessOutcome {
    #[must_use]
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct(_))
    }
}

/// One slot per character of the current country.
///
/// Revealed slots always hold their letter; masked slots hold the player's
/// upper-cased guess or nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputBuffer(Vec<Option<char>>);

impl InputBuffer {
    /// Revealed letters in place, blanks at masked positions.
    #[must_use]
    pub fn masked_blank(country: &str, mask: &MaskSet) -> Self {
        Self(
            country
                .chars()
                .enumerate()
                .map(|(i, c)| if mask.contains(i) { None } else { Some(c) })
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<char> {
        self.0.get(index).copied().flatten()
    }

    pub fn cells(&self) -> impl Iterator<Item = Option<char>> + '_ {
        self.0.iter().copied()
    }

    /// All slots concatenated, blanks contributing nothing.
    #[must_use]
    pub fn joined(&self) -> String {
        self.0.iter().flatten().collect()
    }

    fn set(&mut self, index: usize, value: Option<char>) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = value;
        }
    }
}

/// Country, mask and input buffer for the round on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub country: String,
    pub mask: MaskSet,
    pub buffer: InputBuffer,
    token: RoundToken,
}

impl Round {
    #[must_use]
    pub const fn token(&self) -> RoundToken {
        self.token
    }

    /// Character at `index`, whether or not it is masked.
    #[must_use]
    pub fn letter(&self, index: usize) -> Option<char> {
        self.country.chars().nth(index)
    }
}

/// The masking/guessing state machine.
#[derive(Debug, Clone)]
pub struct Puzzle {
    pool: CountryPool,
    rng: ChaCha20Rng,
    round: Option<Round>,
    phase: PuzzlePhase,
    feedback: Option<Feedback>,
    rounds_started: u64,
}

impl Puzzle {
    #[must_use]
    pub fn new(pool: CountryPool, seed: u64) -> Self {
        Self {
            pool,
            rng: ChaCha20Rng::seed_from_u64(seed),
            round: None,
            phase: PuzzlePhase::Idle,
            feedback: None,
            rounds_started: 0,
        }
    }

    /// Built-in pool with a deterministic random source.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(CountryPool::builtin(), seed)
    }

    #[must_use]
    pub const fn phase(&self) -> PuzzlePhase {
        self.phase
    }

    #[must_use]
    pub const fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    #[must_use]
    pub const fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.round.as_ref().map(|r| r.country.as_str())
    }

    #[must_use]
    pub const fn rounds_started(&self) -> u64 {
        self.rounds_started
    }

    #[must_use]
    pub const fn pool(&self) -> &CountryPool {
        &self.pool
    }

    /// Pick a country, mask it and build its buffer, then swap all three in at once.
    pub fn select_round(&mut self) -> &Round {
        let country = self.pool.choose(&mut self.rng).unwrap_or_default();
        let mask = MaskSet::for_word(&country, &mut self.rng);
        let buffer = InputBuffer::masked_blank(&country, &mask);
        self.rounds_started += 1;
        let round = Round {
            country,
            mask,
            buffer,
            token: RoundToken(self.rounds_started),
        };
        self.feedback = None;
        self.phase = PuzzlePhase::Active;
        self.round.insert(round)
    }

    /// Write the first character of `value`, upper-cased, into a masked cell.
    ///
    /// An empty `value` clears the cell. Returns `false` and leaves the buffer
    /// untouched for revealed or out-of-range positions, or while no round is
    /// accepting input.
    pub fn update_cell(&mut self, index: usize, value: &str) -> bool {
        if self.phase != PuzzlePhase::Active {
            return false;
        }
        let Some(round) = self.round.as_mut() else {
            return false;
        };
        if index >= round.buffer.len() || !round.mask.contains(index) {
            return false;
        }
        let next = value.chars().next().and_then(|c| c.to_uppercase().next());
        round.buffer.set(index, next);
        true
    }

    /// Compare the buffer against the country.
    ///
    /// Returns `None` when no round is accepting guesses (before the first
    /// round, or during the post-solve delay).
    pub fn submit_guess(&mut self) -> Option<GuessOutcome> {
        if self.phase != PuzzlePhase::Active {
            return None;
        }
        let round = self.round.as_mut()?;
        let guess = round.buffer.joined().trim().to_uppercase();
        if guess == round.country.to_uppercase() {
            self.phase = PuzzlePhase::Transitioning;
            self.feedback = Some(Feedback::Correct);
            Some(GuessOutcome::Correct(round.token))
        } else {
            round.buffer = InputBuffer::masked_blank(&round.country, &round.mask);
            self.feedback = Some(Feedback::TryAgain);
            Some(GuessOutcome::Incorrect)
        }
    }

    /// Apply the deferred transition scheduled by a correct guess.
    ///
    /// A token from an older round is ignored so a late timer cannot replace
    /// a round started in the meantime.
    pub fn advance_round(&mut self, token: RoundToken) -> bool {
        let pending = self.phase == PuzzlePhase::Transitioning
            && self.round.as_ref().is_some_and(|r| r.token == token);
        if pending {
            self.select_round();
        }
        pending
    }

    /// Next masked position after `index`, for moving focus forward on entry.
    #[must_use]
    pub fn next_editable(&self, index: usize) -> Option<usize> {
        self.round
            .as_ref()?
            .mask
            .iter()
            .find(|&i| i > index)
    }

    /// Previous masked position before `index`, for backspace on an empty cell.
    #[must_use]
    pub fn previous_editable(&self, index: usize) -> Option<usize> {
        self.round
            .as_ref()?
            .mask
            .iter()
            .rev()
            .find(|&i| i < index)
    }
}
