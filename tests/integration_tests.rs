//! End-to-end scenarios wiring input, core, and scores together.

use blockfall::core::GameState;
use blockfall::input::{handle_key_event, InputHandler};
use blockfall::scores::{ScoreBoard, ScoreStore};
use blockfall::types::{Command, PieceKind, StepOutcome, BOARD_WIDTH};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Starts a game and swaps the randomly drawn opener away so play proceeds
/// deterministically from `kinds`.
fn scripted_game(seed: u32, kinds: &[PieceKind]) -> GameState {
    let mut state = GameState::new(seed);
    state.preload_queue(kinds);
    state.apply_command(Command::Hold);
    state
}

/// Walks the active piece to `column` and hard-drops it.
fn drop_at(state: &mut GameState, column: i8) -> StepOutcome {
    for _ in 0..BOARD_WIDTH {
        let x = state.active().expect("piece in play").x;
        if x == column {
            break;
        }
        let cmd = if x > column {
            Command::MoveLeft
        } else {
            Command::MoveRight
        };
        state.apply_command(cmd);
    }
    assert_eq!(state.active().expect("piece in play").x, column);
    state.apply_command(Command::HardDrop)
}

fn board_is_empty(state: &GameState) -> bool {
    state.board().cells().iter().all(|cell| cell.is_none())
}

#[test]
fn test_rounds_of_doubles_score_and_level_up() {
    // Five O pieces tile two full rows: each round of five drops clears a
    // double. Ten rounds walk the game from level 1 to level 3 and leave the
    // board exactly as empty as it started.
    let mut state = scripted_game(777, &[PieceKind::O; 50]);

    for round in 1..=10 {
        for (i, column) in [0, 2, 4, 6, 8].into_iter().enumerate() {
            let outcome = drop_at(&mut state, column);
            if i < 4 {
                assert_eq!(outcome.lines_cleared, 0, "round {round} drop {i}");
            } else {
                assert_eq!(outcome.lines_cleared, 2, "round {round} final drop");
            }
        }

        match round {
            1 => {
                assert_eq!(state.lines(), 2);
                assert_eq!(state.score(), 300);
                assert_eq!(state.level(), 1);
            }
            5 => {
                // Doubles at level 1 are worth 300 each; the tenth cleared
                // line tips the game into level 2.
                assert_eq!(state.lines(), 10);
                assert_eq!(state.score(), 1500);
                assert_eq!(state.level(), 2);
            }
            10 => {
                assert_eq!(state.lines(), 20);
                assert_eq!(state.score(), 4500);
                assert_eq!(state.level(), 3);
            }
            _ => {}
        }
        assert!(board_is_empty(&state), "round {round} left cells behind");
    }

    // Gravity sped up with the levels.
    assert_eq!(state.drop_interval_ms(), 800);
}

#[test]
fn test_key_events_drive_the_game_through_the_input_handler() {
    let mut state = scripted_game(777, &[PieceKind::T]);
    let mut input = InputHandler::with_config(100, 50);
    let spawn_x = state.active().unwrap().x;

    // A key press maps to a command and moves the piece immediately.
    let event = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
    let cmd = handle_key_event(event).expect("left arrow maps to a command");
    if let Some(cmd) = input.press(cmd) {
        state.apply_command(cmd);
    }
    assert_eq!(state.active().unwrap().x, spawn_x - 1);

    // Holding past the DAS delay emits repeats at the ARR cadence.
    for cmd in input.update(100) {
        state.apply_command(cmd);
    }
    assert_eq!(state.active().unwrap().x, spawn_x - 1);
    for cmd in input.update(50) {
        state.apply_command(cmd);
    }
    assert_eq!(state.active().unwrap().x, spawn_x - 2);

    // Releasing the key stops the repeats.
    input.release(Command::MoveLeft);
    assert!(input.update(500).is_empty());
    assert_eq!(state.active().unwrap().x, spawn_x - 2);
}

#[test]
fn test_ghost_rides_on_top_of_the_stack() {
    let mut state = scripted_game(3, &[PieceKind::O; 2]);

    // Empty board: the O falls all the way down.
    assert_eq!(state.ghost_y(), Some(18));
    state.apply_command(Command::HardDrop);

    // The next O spawns over the first and its ghost rests on the stack.
    assert_eq!(state.ghost_y(), Some(16));
}

#[test]
fn test_finished_game_feeds_the_score_table() {
    // One round of doubles for a non-zero score, then a single column of O
    // pieces until the spawn cell is blocked.
    let mut state = scripted_game(42, &[PieceKind::O; 15]);
    for column in [0, 2, 4, 6, 8] {
        drop_at(&mut state, column);
    }
    assert_eq!(state.score(), 300);

    let mut over = false;
    for _ in 0..10 {
        if state.apply_command(Command::HardDrop).game_over {
            over = true;
            break;
        }
    }
    assert!(over, "stacking one column should top out");

    let mut scores = ScoreBoard::default();
    assert!(scores.record(state.score()), "first score is a new best");
    assert_eq!(scores.high_score(), 300);
    assert_eq!(scores.entries()[0].score, 300);
    assert_eq!(scores.entries()[0].date.len(), 10);

    // Round-trip through the savefile.
    let path = std::env::temp_dir().join(format!(
        "blockfall_integration_scores_{}.json",
        std::process::id()
    ));
    let store = ScoreStore::with_path(&path);
    store.save(&scores).unwrap();
    let loaded = store.load().unwrap();
    assert_eq!(loaded.high_score(), scores.high_score());
    assert_eq!(loaded.entries(), scores.entries());
    let _ = std::fs::remove_file(&path);
}
