use geoguess_game::{
    Coordinates, CountryPool, Feedback, GuessOutcome, Puzzle, PuzzlePhase, SessionGate, Stage,
    mask_size,
};

fn playing_gate(seed: u64) -> SessionGate {
    let mut gate = SessionGate::with_seed(seed);
    gate.submit_name("Ada").unwrap();
    gate.location_acquired(Coordinates::new(-33.87, 151.21))
        .expect("play should start");
    gate
}

fn solve(gate: &mut SessionGate) -> GuessOutcome {
    let round = gate.puzzle().round().unwrap().clone();
    for i in round.mask.iter() {
        let letter = round.letter(i).unwrap().to_ascii_lowercase().to_string();
        assert!(gate.update_cell(i, &letter));
    }
    gate.submit_guess().unwrap()
}

#[test]
fn solved_rounds_advance_with_fresh_masks() {
    for seed in 0..32 {
        let mut gate = playing_gate(seed);
        for _ in 0..5 {
            let GuessOutcome::Correct(token) = solve(&mut gate) else {
                panic!("filling the mask with the answer must win (seed {seed})");
            };
            assert_eq!(gate.puzzle().feedback(), Some(Feedback::Correct));
            assert!(gate.advance_round(token));

            let round = gate.puzzle().round().unwrap();
            let length = round.country.chars().count();
            assert_eq!(round.mask.len(), mask_size(length));
            assert_eq!(round.buffer.len(), length);
            assert_eq!(gate.puzzle().feedback(), None);
            assert_eq!(gate.puzzle().phase(), PuzzlePhase::Active);
        }
    }
}

#[test]
fn wrong_guesses_never_change_country_or_mask() {
    let mut gate = playing_gate(77);
    let before = gate.puzzle().round().unwrap().clone();
    for attempt in 0..10 {
        for i in before.mask.iter() {
            gate.update_cell(i, "#");
        }
        assert_eq!(gate.submit_guess(), Some(GuessOutcome::Incorrect), "attempt {attempt}");
        let after = gate.puzzle().round().unwrap();
        assert_eq!(after.country, before.country);
        assert_eq!(after.mask, before.mask);
        assert_eq!(after.buffer, before.buffer);
        assert_eq!(gate.puzzle().feedback(), Some(Feedback::TryAgain));
    }
    assert_eq!(gate.stage(), Stage::Playing);
}

fn canada_gate_hiding_last_letter() -> SessionGate {
    (0..64)
        .map(|seed| {
            let pool = CountryPool::from_names(["Canada"]).unwrap();
            let mut gate = SessionGate::new(Puzzle::new(pool, seed));
            gate.submit_name("Ada").unwrap();
            gate.location_acquired(Coordinates::new(45.42, -75.69))
                .unwrap();
            gate
        })
        .find(|gate| gate.puzzle().round().unwrap().mask.contains(5))
        .expect("some seed hides the last letter")
}

#[test]
fn canada_with_wrong_last_letter_is_incorrect() {
    let mut gate = canada_gate_hiding_last_letter();
    let round = gate.puzzle().round().unwrap().clone();
    for i in round.mask.iter() {
        let letter = if i == 5 { "B" } else { &"CANADA"[i..=i] };
        assert!(gate.update_cell(i, letter));
    }
    assert_eq!(gate.puzzle().round().unwrap().buffer.joined(), "CANADB");
    assert_eq!(gate.submit_guess(), Some(GuessOutcome::Incorrect));

    let reset = gate.puzzle().round().unwrap();
    for (i, cell) in reset.buffer.cells().enumerate() {
        if round.mask.contains(i) {
            assert_eq!(cell, None);
        } else {
            assert_eq!(cell, round.letter(i));
        }
    }
}

#[test]
fn canada_spelled_out_is_correct() {
    let mut gate = canada_gate_hiding_last_letter();
    assert!(solve(&mut gate).is_correct());
    assert_eq!(gate.puzzle().round().unwrap().buffer.joined(), "CANADA");
}
