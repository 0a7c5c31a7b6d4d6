//! Game state machine tests against the public facade.

use blockfall::core::{ActivePiece, GameState};
use blockfall::types::{Command, GameConfig, Phase, PieceKind};

/// Starts a game and swaps the randomly drawn opener away so the first
/// playable piece comes from `kinds`.
fn scripted_game(seed: u32, kinds: &[PieceKind]) -> GameState {
    let mut state = GameState::new(seed);
    state.preload_queue(kinds);
    state.apply_command(Command::Hold);
    state
}

#[test]
fn test_new_game_starts_active_with_a_piece() {
    let state = GameState::new(777);

    assert_eq!(state.phase(), Phase::Active);
    assert!(state.active().is_some());
    assert_eq!(state.score(), 0);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.level(), 1);
}

#[test]
fn test_spawn_anchor_centers_pieces() {
    assert_eq!((ActivePiece::spawn(PieceKind::I).x, ActivePiece::spawn(PieceKind::I).y), (3, 0));
    assert_eq!(ActivePiece::spawn(PieceKind::O).x, 4);
    assert_eq!(ActivePiece::spawn(PieceKind::T).x, 4);
    assert_eq!(ActivePiece::spawn(PieceKind::Z).x, 4);
}

#[test]
fn test_movement_commands_shift_the_active_piece() {
    let mut state = scripted_game(777, &[PieceKind::T]);
    let spawn_x = state.active().unwrap().x;

    state.apply_command(Command::MoveLeft);
    assert_eq!(state.active().unwrap().x, spawn_x - 1);

    state.apply_command(Command::MoveRight);
    state.apply_command(Command::MoveRight);
    assert_eq!(state.active().unwrap().x, spawn_x + 1);
}

#[test]
fn test_walls_stop_horizontal_movement() {
    let mut state = scripted_game(777, &[PieceKind::T]);

    for _ in 0..10 {
        state.apply_command(Command::MoveLeft);
    }
    assert_eq!(state.active().unwrap().x, 0);

    for _ in 0..20 {
        state.apply_command(Command::MoveRight);
    }
    // T occupies three columns, so its anchor stops at x=7 on a 10-wide board.
    assert_eq!(state.active().unwrap().x, 7);
}

#[test]
fn test_soft_drop_steps_down_and_resets_gravity() {
    let mut state = scripted_game(777, &[PieceKind::T]);
    let spawn_y = state.active().unwrap().y;

    state.tick(400);
    let outcome = state.apply_command(Command::SoftDrop);

    assert!(!outcome.locked);
    assert_eq!(state.active().unwrap().y, spawn_y + 1);
    assert_eq!(state.drop_timer_ms(), 0);
}

#[test]
fn test_hard_drop_locks_at_the_ghost_row() {
    let mut state = scripted_game(777, &[PieceKind::T, PieceKind::O]);

    assert_eq!(state.ghost_y(), Some(18));
    let outcome = state.apply_command(Command::HardDrop);

    assert!(outcome.locked);
    assert_eq!(outcome.lines_cleared, 0);
    // T anchored at x=4, y=18 leaves its nub at (5,18) and base on row 19.
    assert_eq!(state.board().get(5, 18), Some(Some(PieceKind::T)));
    assert_eq!(state.board().get(4, 19), Some(Some(PieceKind::T)));
    assert_eq!(state.board().get(5, 19), Some(Some(PieceKind::T)));
    assert_eq!(state.board().get(6, 19), Some(Some(PieceKind::T)));
    // The next scripted piece spawned.
    assert_eq!(state.active().unwrap().kind, PieceKind::O);
}

#[test]
fn test_pause_gates_movement_and_gravity() {
    let mut state = scripted_game(777, &[PieceKind::T]);
    let x = state.active().unwrap().x;
    let y = state.active().unwrap().y;

    state.apply_command(Command::TogglePause);
    assert_eq!(state.phase(), Phase::Paused);

    state.apply_command(Command::MoveLeft);
    state.tick(10_000);
    assert_eq!(state.active().unwrap().x, x);
    assert_eq!(state.active().unwrap().y, y);

    state.apply_command(Command::TogglePause);
    assert_eq!(state.phase(), Phase::Active);
    state.apply_command(Command::MoveLeft);
    assert_eq!(state.active().unwrap().x, x - 1);
}

#[test]
fn test_hold_stashes_once_per_piece() {
    let mut state = GameState::new(7);
    let opener = state.active().unwrap().kind;

    state.apply_command(Command::Hold);
    assert_eq!(state.held_kind(), Some(opener));
    assert!(!state.can_hold());

    // A second hold before locking is ignored.
    let current = state.active().unwrap().kind;
    state.apply_command(Command::Hold);
    assert_eq!(state.held_kind(), Some(opener));
    assert_eq!(state.active().unwrap().kind, current);
}

#[test]
fn test_hold_rearms_after_the_next_lock() {
    let mut state = GameState::new(7);
    state.apply_command(Command::Hold);
    assert!(!state.can_hold());

    state.apply_command(Command::HardDrop);
    assert!(state.can_hold());
}

#[test]
fn test_restart_begins_a_fresh_game() {
    let mut state = scripted_game(777, &[PieceKind::T, PieceKind::O, PieceKind::I]);
    state.apply_command(Command::HardDrop);
    state.apply_command(Command::HardDrop);

    state.apply_command(Command::Restart);

    assert_eq!(state.phase(), Phase::Active);
    assert_eq!(state.score(), 0);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.level(), 1);
    assert!(state.active().is_some());
    assert!(state.held_kind().is_none());
    assert!(state.board().cells().iter().all(|cell| cell.is_none()));
}

#[test]
fn test_stacking_out_ends_the_game() {
    let mut state = scripted_game(99, &[PieceKind::O; 12]);

    let mut over = false;
    for _ in 0..10 {
        let outcome = state.apply_command(Command::HardDrop);
        if outcome.game_over {
            over = true;
            break;
        }
    }

    assert!(over, "a single column of O pieces should top out");
    assert_eq!(state.phase(), Phase::Over);
    assert!(state.active().is_none());

    // Further commands are ignored once the game is over.
    let outcome = state.apply_command(Command::HardDrop);
    assert!(!outcome.locked);
    state.apply_command(Command::MoveLeft);
    assert!(state.active().is_none());
}

#[test]
fn test_lookahead_is_configurable() {
    let state = GameState::with_config(5, GameConfig::default().with_lookahead(6));
    assert_eq!(state.snapshot().next.len(), 6);

    let state = GameState::new(5);
    assert_eq!(state.snapshot().next.len(), 4);
}
