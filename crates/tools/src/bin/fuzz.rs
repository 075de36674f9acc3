use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use std::collections::{BTreeSet, HashSet};
use whowho_core::{
    BOARD_SIZE, Board, BoardSelection, GameCode, GameSession, Gesture, MemoryStore, SessionEvent,
    SessionState, Slot, load, save,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    games: u32,
    /// Upper bound on gestures played per game
    #[arg(long, default_value_t = 60)]
    max_gestures: u32,
}

fn random_code(rng: &mut ChaCha8Rng) -> Result<GameCode> {
    let digits: String =
        (0..5).map(|_| char::from(b'0' + (rng.next_u64() % 10) as u8)).collect();
    GameCode::parse(&digits).with_context(|| format!("fuzz built an invalid code {digits}"))
}

fn random_gesture(rng: &mut ChaCha8Rng) -> Result<Gesture> {
    let slot = Slot::new(rng.next_u64() as usize % BOARD_SIZE).context("slot off the board")?;
    Ok(match rng.next_u64() % 5 {
        // Bias toward taps
        0..=2 => Gesture::Tap(slot),
        3 => Gesture::LongPress(slot),
        _ => Gesture::TapSecretDisplay,
    })
}

fn check_board(code: &GameCode) -> Result<Board> {
    let board = Board::generate(code).with_context(|| format!("board for {code}"))?;

    let indices: HashSet<_> = board.selection().indices().iter().collect();
    ensure!(indices.len() == BOARD_SIZE, "Invariant failed: duplicate index on board {code}");

    let names: HashSet<&str> = board.slots().map(|(_, _, name)| name).collect();
    ensure!(names.len() == BOARD_SIZE, "Invariant failed: duplicate name on board {code}");

    let again = Board::generate(code)?;
    ensure!(again == board, "Invariant failed: board {code} is not deterministic");

    let json = serde_json::to_string(board.selection())?;
    let decoded: BoardSelection = serde_json::from_str(&json)
        .with_context(|| format!("selection for {code} failed its own validation"))?;
    ensure!(&decoded == board.selection(), "Invariant failed: selection JSON round trip");

    Ok(board)
}

fn check_transition(
    before: SessionState,
    hidden_before: &BTreeSet<Slot>,
    gesture: Gesture,
    event: Option<&SessionEvent>,
    after: &GameSession,
) -> Result<()> {
    match (before, gesture, event) {
        (SessionState::NoSecret, Gesture::TapSecretDisplay, None) => {}
        (SessionState::NoSecret, Gesture::Tap(slot) | Gesture::LongPress(slot), Some(_)) => {
            ensure!(after.secret() == Some(slot), "Invariant failed: first pick not recorded");
        }
        (SessionState::SecretChosen(current), Gesture::Tap(slot), Some(_)) => {
            ensure!(after.secret() == Some(current), "Invariant failed: tap moved the secret");
            ensure!(
                after.is_hidden(slot) != hidden_before.contains(&slot),
                "Invariant failed: tap did not toggle slot {slot}"
            );
            return Ok(());
        }
        (SessionState::SecretChosen(current), Gesture::LongPress(slot), Some(_)) => {
            let expected = (current != slot).then_some(slot);
            ensure!(after.secret() == expected, "Invariant failed: long press result");
        }
        (SessionState::SecretChosen(_), Gesture::TapSecretDisplay, Some(_)) => {
            ensure!(after.secret().is_none(), "Invariant failed: secret survived clear");
        }
        (state, gesture, event) => {
            bail!("Invariant failed: {gesture:?} in {state:?} produced {event:?}")
        }
    }
    // Only a tap with a secret chosen may touch the hidden set.
    ensure!(
        after.hidden_slots() == hidden_before,
        "Invariant failed: {gesture:?} changed the hidden set"
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for {} games...", args.seed, args.games);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut store = MemoryStore::new();
    let mut total_gestures = 0u64;

    for game in 0..args.games {
        let code = random_code(&mut rng)?;
        check_board(&code)?;

        let mut session = load(&code, &store);
        let gestures = rng.next_u64() % (u64::from(args.max_gestures) + 1);
        for _ in 0..gestures {
            let gesture = random_gesture(&mut rng)?;
            let before = session.state();
            let hidden_before = session.hidden_slots().clone();
            let event = session.apply(gesture);
            check_transition(before, &hidden_before, gesture, event.as_ref(), &session)?;

            save(&session, &mut store).context("memory store rejected a save")?;
            let reloaded = load(&code, &store);
            ensure!(reloaded == session, "Invariant failed: save/load changed game {code}");
            ensure!(reloaded.log().is_empty(), "Invariant failed: clean save reloaded with noise");
            total_gestures += 1;
        }

        if game % 100 == 99 {
            println!(
                "{} games, {} gestures, {} stored keys",
                game + 1,
                total_gestures,
                store.len()
            );
        }
    }

    println!(
        "Fuzz finished: {} games, {} gestures, all invariants held",
        args.games, total_gestures
    );
    Ok(())
}
