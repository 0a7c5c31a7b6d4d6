//! Shared vocabulary for the blockfall workspace.
//!
//! Plain data only: constants, the piece/command/phase enums, and the small
//! structs passed between the core, input, and rendering crates. Nothing in
//! here depends on another workspace crate, so every layer can speak these
//! types without dragging in the rest.
//!
//! # Playfield
//!
//! The well is 10 columns by 20 rows, indexed from the top-left corner.
//! Pieces spawn anchored at `x = width/2 - shape_size/2`, `y = 0`.
//!
//! # Timing
//!
//! All timing is integer milliseconds. The driver steps the game on a fixed
//! 16ms tick. Gravity starts at one row per second and gains 100ms of speed
//! per level until it hits the 100ms floor, so the interval at a level is
//! `max(100, 1000 - (level - 1) * 100)`:
//!
//! | Level | Drop interval |
//! |-------|---------------|
//! | 1 | 1000ms |
//! | 2 | 900ms |
//! | 5 | 600ms |
//! | 10+ | 100ms |
//!
//! Held movement keys repeat after a 150ms delayed-auto-shift and then
//! every 50ms. A held soft drop skips the delay and repeats every 50ms.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Piece kinds carry a stable nonzero cell value used for board
//! // encoding and color lookup.
//! let piece = PieceKind::T;
//! assert_eq!(piece.cell_value(), 6);
//! assert_eq!(PieceKind::from_cell_value(6), Some(PieceKind::T));
//!
//! // Discrete commands drive the game core.
//! assert_ne!(Command::HardDrop, Command::SoftDrop);
//!
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

/// Columns in the well.
pub const BOARD_WIDTH: u8 = 10;

/// Rows in the well.
pub const BOARD_HEIGHT: u8 = 20;

/// Driver timestep in milliseconds, roughly one frame at 60Hz.
pub const TICK_MS: u32 = 16;

/// Level-1 gravity: one row per second.
pub const BASE_DROP_MS: u32 = 1000;

/// Milliseconds shaved off the drop interval per level.
pub const DROP_MS_PER_LEVEL: u32 = 100;

/// Gravity floor; levels past 10 drop no faster than this.
pub const MIN_DROP_MS: u32 = 100;

/// Lines cleared per level-up (level = lines / 10 + 1)
pub const LINES_PER_LEVEL: u32 = 10;

/// Base points for clearing 1-4 rows at once, multiplied by the level
/// in effect when the rows cleared. Index 0 is a placeholder.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Default number of upcoming pieces visible in the queue
pub const DEFAULT_LOOKAHEAD: usize = 4;

/// Hard cap on queue lookahead (bounds the preview buffer in snapshots)
pub const MAX_LOOKAHEAD: usize = 8;

/// Hold time before a movement key starts auto-repeating (DAS).
pub const DEFAULT_DAS_MS: u32 = 150;

/// Interval between repeats once the DAS delay has expired (ARR).
pub const DEFAULT_ARR_MS: u32 = 50;

/// A held soft drop starts repeating with no delay.
pub const SOFT_DROP_DAS_MS: u32 = 0;

/// Repeat interval for a held soft drop.
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// The seven tetromino kinds.
///
/// Declaration order is significant: `cell_value` is the 1-based position
/// in this order, and locked board cells are encoded with that value (0 is
/// an empty cell). Renderers index their color tables with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All piece kinds in cell-value order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Nonzero cell value identifying this kind on the board (1-7).
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.cell_value(), 1);
    /// assert_eq!(PieceKind::Z.cell_value(), 7);
    /// ```
    #[inline]
    pub const fn cell_value(self) -> u8 {
        self as u8 + 1
    }

    /// Inverse of [`cell_value`](Self::cell_value); `None` for 0 (empty)
    /// and anything above 7.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_cell_value(4), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_cell_value(0), None);
    /// assert_eq!(PieceKind::from_cell_value(8), None);
    /// ```
    pub const fn from_cell_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Single-letter label for panels and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// A single board cell: empty or locked with a piece identity.
pub type Cell = Option<PieceKind>;

/// Discrete commands accepted by the game core.
///
/// Mapping physical keys to commands is the input layer's concern; the core
/// never sees key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Drop the active piece one row, locking on contact
    SoftDrop,
    /// Drop the active piece to the floor and lock immediately
    HardDrop,
    /// Rotate the active piece clockwise, kicking sideways on conflict
    Rotate,
    /// Stash the active piece, or swap it with the stashed one
    Hold,
    /// Toggle between Active and Paused
    TogglePause,
    /// Abandon the current game and start a fresh one
    Restart,
}

/// Lifecycle phase of a game.
///
/// `Over` is terminal: no transition leaves it except a full restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Active,
    Paused,
    Over,
}

/// What the hold slot stores when the active piece is stashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HoldPolicy {
    /// Reset the piece to its spawn orientation on the way in and out.
    #[default]
    SpawnOrientation,
    /// Preserve the piece's orientation across the swap.
    KeepOrientation,
}

/// Tunable rules for a game instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of upcoming pieces kept visible in the queue.
    /// Clamped to `1..=MAX_LOOKAHEAD`.
    pub lookahead: usize,
    /// Orientation semantics of the hold slot.
    pub hold_policy: HoldPolicy,
}

impl GameConfig {
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    pub fn with_hold_policy(mut self, hold_policy: HoldPolicy) -> Self {
        self.hold_policy = hold_policy;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
            hold_policy: HoldPolicy::default(),
        }
    }
}

/// What a single core step changed, reported back to the driver loop.
///
/// Returned by `tick` and by the command-applying operations so the caller
/// can react (record a final score, flash the board) without inspecting
/// internal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// A piece was merged into the board during this step.
    pub locked: bool,
    /// Rows cleared by that lock (0-4).
    pub lines_cleared: u32,
    /// The step ended the game (spawn or swap collision).
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_values_are_one_based_and_match_declaration_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.cell_value(), i as u8 + 1);
            assert_eq!(PieceKind::from_cell_value(i as u8 + 1), Some(*kind));
        }
        assert_eq!(PieceKind::from_cell_value(0), None);
        assert_eq!(PieceKind::from_cell_value(8), None);
    }

    #[test]
    fn line_scores_match_classic_single_double_triple_quad() {
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
    }

    #[test]
    fn config_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.lookahead, DEFAULT_LOOKAHEAD);
        assert_eq!(config.hold_policy, HoldPolicy::SpawnOrientation);
    }

    #[test]
    fn config_builders() {
        let config = GameConfig::default()
            .with_lookahead(6)
            .with_hold_policy(HoldPolicy::KeepOrientation);
        assert_eq!(config.lookahead, 6);
        assert_eq!(config.hold_policy, HoldPolicy::KeepOrientation);
    }

    #[test]
    fn gravity_constants_are_consistent() {
        // The per-level speedup steps from BASE_DROP_MS down to MIN_DROP_MS
        // in whole increments.
        assert_eq!((BASE_DROP_MS - MIN_DROP_MS) % DROP_MS_PER_LEVEL, 0);
        assert!(MIN_DROP_MS > TICK_MS);
    }

    #[test]
    fn step_outcome_default_is_quiet() {
        let outcome = StepOutcome::default();
        assert!(!outcome.locked);
        assert_eq!(outcome.lines_cleared, 0);
        assert!(!outcome.game_over);
    }
}
