//! Read-only view of a game for renderers.
//!
//! The driver takes one snapshot per frame between state transitions; the
//! renderer never touches live game state. `GameSnapshot::clear` plus
//! `GameState::snapshot_into` let callers reuse one buffer across frames.

use arrayvec::ArrayVec;

use blockfall_types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, MAX_LOOKAHEAD};

use crate::game::ActivePiece;
use crate::shape::Shape;

/// The falling piece as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(piece: ActivePiece) -> Self {
        Self {
            kind: piece.kind,
            shape: piece.shape,
            x: piece.x,
            y: piece.y,
        }
    }
}

/// Everything a frame needs to draw: locked cells, the falling piece and
/// its ghost, the hold slot, the upcoming queue, and scalar stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Locked cells: 0 empty, 1-7 piece identity (color table index).
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    /// Row the active piece would land on, for the ghost preview.
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    /// Upcoming pieces, soonest first, up to the configured lookahead.
    pub next: ArrayVec<PieceKind, MAX_LOOKAHEAD>,
    pub can_hold: bool,
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl GameSnapshot {
    /// Resets to the empty pre-game state so the buffer can be refilled.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            next: ArrayVec::new(),
            can_hold: true,
            phase: Phase::Active,
            score: 0,
            level: 1,
            lines: 0,
        }
    }
}
