use anyhow::{Context, Result, bail, ensure};
use geoguess_game::{
    Coordinates, DispatchOutcome, GuessOutcome, LocationError, LocationUpdate, NotifyError,
    PermissionState, Round, SessionGate, Stage, mask_size,
};
use std::cell::RefCell;

use super::doubles::{FlakyMailer, ScenarioEngine, ScriptedGeolocator, scenario_engine};

const PLAYER_NAME: &str = "Tester";
const PLAYER_COORDS: Coordinates = Coordinates::new(52.52, 13.405);
const SMOKE_ROUNDS: usize = 3;
const WRONG_GUESSES: usize = 4;

/// What a passing run observed, for verbose output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScenarioRun {
    pub rounds_solved: usize,
    pub mail_attempts: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    Smoke,
    Denied,
    Timeout,
    MailFailure,
    WrongGuesses,
    Unsupported,
}

impl ScenarioKind {
    pub const ALL: [Self; 6] = [
        Self::Smoke,
        Self::Denied,
        Self::Timeout,
        Self::MailFailure,
        Self::WrongGuesses,
        Self::Unsupported,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Smoke => "smoke",
            Self::Denied => "denied",
            Self::Timeout => "timeout",
            Self::MailFailure => "mail-failure",
            Self::WrongGuesses => "wrong-guesses",
            Self::Unsupported => "unsupported",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Smoke => "Name, location, one notification, several solved rounds",
            Self::Denied => "Denied permission blocks play until it is granted",
            Self::Timeout => "A timed-out fix returns to the prompt; a retry starts play",
            Self::MailFailure => "A failed send leaves the flag unset so a later start retries",
            Self::WrongGuesses => "Wrong guesses clear input but keep country and mask",
            Self::Unsupported => "Missing geolocation halts the session",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub async fn run(self, seed: u64) -> Result<ScenarioRun> {
        match self {
            Self::Smoke => smoke(seed).await,
            Self::Denied => denied(seed).await,
            Self::Timeout => timeout(seed).await,
            Self::MailFailure => mail_failure(seed).await,
            Self::WrongGuesses => wrong_guesses(seed).await,
            Self::Unsupported => unsupported(seed).await,
        }
    }
}

pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    ScenarioKind::ALL
        .into_iter()
        .map(|kind| (kind.key(), kind.description()))
}

fn granted_engine(mailer: FlakyMailer) -> ScenarioEngine {
    let geolocator = ScriptedGeolocator::new(Some(PermissionState::Granted));
    geolocator.push_fix(Ok(PLAYER_COORDS));
    scenario_engine(geolocator, mailer)
}

fn check_round(round: &Round) -> Result<()> {
    let letters = round.country.chars().filter(|c| !c.is_whitespace()).count();
    ensure!(
        round.mask.len() == mask_size(letters),
        "{} has {} hidden letters, expected {}",
        round.country,
        round.mask.len(),
        mask_size(letters)
    );
    for index in round.mask.iter() {
        ensure!(
            round.buffer.get(index).is_none(),
            "masked cell {index} of {} starts filled",
            round.country
        );
    }
    Ok(())
}

fn current_round(gate: &RefCell<SessionGate>) -> Result<Round> {
    gate.borrow()
        .puzzle()
        .round()
        .cloned()
        .context("no round on screen")
}

/// Type the hidden letters in, submit, and apply the transition.
fn solve_round(gate: &RefCell<SessionGate>) -> Result<()> {
    let round = current_round(gate)?;
    check_round(&round)?;
    for index in round.mask.iter() {
        let letter = round.letter(index).context("mask points past the name")?;
        ensure!(
            gate.borrow_mut().update_cell(index, &letter.to_lowercase().to_string()),
            "cell {index} rejected"
        );
    }

    let outcome = gate.borrow_mut().submit_guess().context("guess ignored")?;
    let GuessOutcome::Correct(token) = outcome else {
        bail!("spelled-out {} judged incorrect", round.country);
    };
    if let Some(first) = round.mask.iter().next() {
        ensure!(
            !gate.borrow_mut().update_cell(first, "Z"),
            "input accepted during transition"
        );
    }
    ensure!(
        gate.borrow_mut().submit_guess().is_none(),
        "guess accepted during transition"
    );
    ensure!(
        gate.borrow_mut().advance_round(token),
        "transition token rejected"
    );
    ensure!(
        !gate.borrow_mut().advance_round(token),
        "stale transition token accepted"
    );
    Ok(())
}

async fn start_play(engine: &ScenarioEngine, gate: &RefCell<SessionGate>) -> Result<()> {
    let named = engine.submit_name(gate, PLAYER_NAME).await?;
    ensure!(named.is_none(), "a name alone started play");
    let update = engine.request_location(gate).await;
    ensure!(
        matches!(
            update,
            LocationUpdate::Located {
                dispatch: Some(DispatchOutcome::Sent)
            }
        ),
        "unexpected location update: {update:?}"
    );
    ensure!(gate.borrow().stage() == Stage::Playing, "play did not start");
    Ok(())
}

async fn smoke(seed: u64) -> Result<ScenarioRun> {
    let engine = granted_engine(FlakyMailer::default());
    let gate = RefCell::new(SessionGate::with_seed(seed));
    start_play(&engine, &gate).await?;

    for _ in 0..SMOKE_ROUNDS {
        solve_round(&gate)?;
    }
    let started = gate.borrow().puzzle().rounds_started();
    ensure!(
        started == u64::try_from(SMOKE_ROUNDS + 1)?,
        "expected {} rounds started, saw {started}",
        SMOKE_ROUNDS + 1
    );

    let mailer = engine.dispatcher().mailer();
    let delivered = mailer.delivered();
    ensure!(delivered.len() == 1, "sent {} notifications", delivered.len());
    ensure!(delivered[0].user_name == PLAYER_NAME, "wrong user name");
    ensure!(
        delivered[0].coords == PLAYER_COORDS.to_string(),
        "wrong coordinates: {}",
        delivered[0].coords
    );
    Ok(ScenarioRun {
        rounds_solved: SMOKE_ROUNDS,
        mail_attempts: mailer.attempts(),
    })
}

async fn denied(seed: u64) -> Result<ScenarioRun> {
    let geolocator = ScriptedGeolocator::new(Some(PermissionState::Denied));
    geolocator.push_fix(Ok(PLAYER_COORDS));
    let engine = scenario_engine(geolocator, FlakyMailer::default());
    let gate = RefCell::new(SessionGate::with_seed(seed));
    engine.submit_name(&gate, PLAYER_NAME).await?;

    let update = engine.request_location(&gate).await;
    ensure!(
        matches!(update, LocationUpdate::Denied),
        "expected denial, got {update:?}"
    );
    ensure!(engine.geolocator().requests() == 0, "fix requested while denied");
    ensure!(
        gate.borrow().stage() == Stage::AwaitingLocation,
        "denied player left the prompt"
    );
    ensure!(
        !gate.borrow_mut().permission_changed(PermissionState::Denied),
        "refetch requested for a denial"
    );

    engine.geolocator().set_permission(PermissionState::Granted);
    ensure!(
        gate.borrow_mut().permission_changed(PermissionState::Granted),
        "grant did not request a fix"
    );
    let update = engine.request_location(&gate).await;
    ensure!(
        matches!(
            update,
            LocationUpdate::Located {
                dispatch: Some(DispatchOutcome::Sent)
            }
        ),
        "grant did not start play: {update:?}"
    );
    solve_round(&gate)?;
    Ok(ScenarioRun {
        rounds_solved: 1,
        mail_attempts: engine.dispatcher().mailer().attempts(),
    })
}

async fn timeout(seed: u64) -> Result<ScenarioRun> {
    let geolocator = ScriptedGeolocator::new(Some(PermissionState::Unknown));
    geolocator.push_fix(Err(LocationError::Timeout));
    geolocator.push_fix(Ok(PLAYER_COORDS));
    let engine = scenario_engine(geolocator, FlakyMailer::default());
    let gate = RefCell::new(SessionGate::with_seed(seed));
    engine.submit_name(&gate, PLAYER_NAME).await?;

    let update = engine.request_location(&gate).await;
    ensure!(
        matches!(update, LocationUpdate::Failed(LocationError::Timeout)),
        "expected timeout, got {update:?}"
    );
    {
        let gate = gate.borrow();
        ensure!(gate.coords().is_none(), "coordinates kept after failure");
        ensure!(
            gate.permission() == PermissionState::Denied,
            "failure not treated as denial"
        );
        ensure!(gate.puzzle().round().is_none(), "round started without a fix");
    }

    let retry = engine.request_location(&gate).await;
    ensure!(
        matches!(retry, LocationUpdate::Located { dispatch: Some(_) }),
        "retry did not start play: {retry:?}"
    );
    Ok(ScenarioRun {
        rounds_solved: 0,
        mail_attempts: engine.dispatcher().mailer().attempts(),
    })
}

async fn mail_failure(seed: u64) -> Result<ScenarioRun> {
    let engine = granted_engine(FlakyMailer::failing(1));
    engine.geolocator().push_fix(Err(LocationError::PositionUnavailable));
    engine.geolocator().push_fix(Ok(PLAYER_COORDS));
    let gate = RefCell::new(SessionGate::with_seed(seed));
    engine.submit_name(&gate, PLAYER_NAME).await?;

    let first = engine.request_location(&gate).await;
    ensure!(
        matches!(
            first,
            LocationUpdate::Located {
                dispatch: Some(DispatchOutcome::Failed(NotifyError::Transport(_)))
            }
        ),
        "expected failed send, got {first:?}"
    );
    ensure!(gate.borrow().stage() == Stage::Playing, "send failure blocked play");
    solve_round(&gate)?;

    let lost = engine.request_location(&gate).await;
    ensure!(
        matches!(lost, LocationUpdate::Failed(_)),
        "expected lost fix, got {lost:?}"
    );
    let again = engine.request_location(&gate).await;
    ensure!(
        matches!(
            again,
            LocationUpdate::Located {
                dispatch: Some(DispatchOutcome::Sent)
            }
        ),
        "retry did not send: {again:?}"
    );
    let mailer = engine.dispatcher().mailer();
    ensure!(mailer.attempts() == 2, "made {} send attempts", mailer.attempts());
    Ok(ScenarioRun {
        rounds_solved: 1,
        mail_attempts: mailer.attempts(),
    })
}

async fn wrong_guesses(seed: u64) -> Result<ScenarioRun> {
    let engine = granted_engine(FlakyMailer::default());
    let gate = RefCell::new(SessionGate::with_seed(seed));
    start_play(&engine, &gate).await?;
    let before = current_round(&gate)?;

    for attempt in 0..WRONG_GUESSES {
        for index in before.mask.iter() {
            gate.borrow_mut().update_cell(index, "#");
        }
        let outcome = gate.borrow_mut().submit_guess();
        ensure!(
            outcome == Some(GuessOutcome::Incorrect),
            "wrong guess {attempt} judged {outcome:?}"
        );
        let after = current_round(&gate)?;
        ensure!(after.country == before.country, "country changed");
        ensure!(after.mask == before.mask, "mask changed");
        ensure!(after.token() == before.token(), "round replaced");
        check_round(&after)?;
    }

    solve_round(&gate)?;
    Ok(ScenarioRun {
        rounds_solved: 1,
        mail_attempts: engine.dispatcher().mailer().attempts(),
    })
}

async fn unsupported(seed: u64) -> Result<ScenarioRun> {
    let engine = scenario_engine(ScriptedGeolocator::unsupported(), FlakyMailer::default());
    let gate = RefCell::new(SessionGate::with_seed(seed));
    engine.submit_name(&gate, PLAYER_NAME).await?;

    let update = engine.request_location(&gate).await;
    ensure!(
        matches!(update, LocationUpdate::Unsupported),
        "expected unsupported, got {update:?}"
    );
    ensure!(gate.borrow().is_halted(), "session not halted");
    ensure!(
        !gate.borrow_mut().permission_changed(PermissionState::Granted),
        "halted session asked for a fix"
    );
    ensure!(engine.dispatcher().mailer().attempts() == 0, "mail sent");
    Ok(ScenarioRun::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_scenario_passes_on_fixed_seeds() {
        for kind in ScenarioKind::ALL {
            for seed in [1, 42, 1337] {
                if let Err(err) = kind.run(seed).await {
                    panic!("{} failed on seed {seed}: {err:#}", kind.key());
                }
            }
        }
    }

    #[test]
    fn keys_round_trip() {
        for kind in ScenarioKind::ALL {
            assert_eq!(ScenarioKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(ScenarioKind::from_key("nope"), None);
        assert_eq!(list_scenarios().count(), ScenarioKind::ALL.len());
    }
}
