//! Game state machine: falling, locking, clearing, scoring, game over.
//!
//! [`GameState`] owns the board, the active piece, the upcoming queue, and
//! the hold slot. A driver loop feeds it elapsed time through [`tick`] and
//! discrete [`Command`]s through [`apply_command`]; both report what changed
//! in a [`StepOutcome`] so the driver can react (record a final score, flash
//! the board) without poking at internals.
//!
//! All transitions are synchronous and atomic: a command either fully
//! applies or leaves the state untouched. The only terminal condition is a
//! piece that cannot spawn, which flips the phase to [`Phase::Over`].
//!
//! [`tick`]: GameState::tick
//! [`apply_command`]: GameState::apply_command

use blockfall_types::{
    Command, GameConfig, HoldPolicy, Phase, PieceKind, StepOutcome, BOARD_WIDTH,
};

use crate::board::Board;
use crate::queue::PieceQueue;
use crate::scoring;
use crate::shape::{resolve_rotation, spawn_shape, Shape};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};

/// The falling piece: kind, current orientation, and board anchor.
///
/// The anchor is the board coordinate of the shape matrix's (0,0) cell.
/// Copy-sized so movement can be expressed as building a shifted candidate
/// and committing it only if it fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Creates a piece in spawn orientation at the top-center anchor.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = spawn_shape(kind);
        let x = spawn_x(&shape);
        Self { kind, shape, x, y: 0 }
    }
}

/// Spawn anchor column: centers the shape matrix on the board.
fn spawn_x(shape: &Shape) -> i8 {
    (BOARD_WIDTH as i8) / 2 - (shape.size() as i8) / 2
}

/// Contents of the hold slot.
#[derive(Debug, Clone, Copy)]
struct HeldPiece {
    kind: PieceKind,
    shape: Shape,
}

/// Complete game state. Owns every mutable part of a running game; no
/// globals, so independent games can run side by side and tests need no
/// environment setup.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    queue: PieceQueue,
    active: Option<ActivePiece>,
    held: Option<HeldPiece>,
    can_hold: bool,
    phase: Phase,
    score: u32,
    level: u32,
    lines: u32,
    /// Elapsed time accumulated toward the next gravity step.
    drop_timer_ms: u32,
    config: GameConfig,
}

impl GameState {
    /// Starts a new game with default rules. The first piece is already
    /// spawned and falling when this returns.
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, GameConfig::default())
    }

    /// Starts a new game with custom rules.
    pub fn with_config(seed: u32, config: GameConfig) -> Self {
        let mut state = Self {
            board: Board::new(),
            queue: PieceQueue::new(seed, config.lookahead),
            active: None,
            held: None,
            can_hold: true,
            phase: Phase::Active,
            score: 0,
            level: 1,
            lines: 0,
            drop_timer_ms: 0,
            config,
        };
        state.spawn_next();
        state
    }

    // --- Getters ---

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn held_kind(&self) -> Option<PieceKind> {
        self.held.map(|held| held.kind)
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Upcoming piece kinds, soonest first.
    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.preview()
    }

    /// Gravity interval for the current level.
    pub fn drop_interval_ms(&self) -> u32 {
        scoring::drop_interval_ms(self.level)
    }

    /// Time accumulated toward the next gravity step.
    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    // --- Time ---

    /// Advances game time. Once the accumulated time reaches the gravity
    /// interval, the active piece takes one automatic descent step and the
    /// accumulator resets. Does nothing unless the game is Active.
    pub fn tick(&mut self, delta_ms: u32) -> StepOutcome {
        if self.phase != Phase::Active {
            return StepOutcome::default();
        }
        self.drop_timer_ms = self.drop_timer_ms.saturating_add(delta_ms);
        if self.drop_timer_ms >= self.drop_interval_ms() {
            self.drop_timer_ms = 0;
            return self.descend_step();
        }
        StepOutcome::default()
    }

    // --- Commands ---

    /// Applies a discrete player command. Commands that do not apply in the
    /// current phase are ignored.
    pub fn apply_command(&mut self, cmd: Command) -> StepOutcome {
        match cmd {
            Command::MoveLeft => {
                self.move_horizontal(-1);
                StepOutcome::default()
            }
            Command::MoveRight => {
                self.move_horizontal(1);
                StepOutcome::default()
            }
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::Rotate => {
                self.rotate();
                StepOutcome::default()
            }
            Command::Hold => self.hold(),
            Command::TogglePause => {
                self.toggle_pause();
                StepOutcome::default()
            }
            Command::Restart => {
                self.restart();
                StepOutcome::default()
            }
        }
    }

    /// Shifts the active piece one column left (-1) or right (+1).
    /// Returns false if the move was blocked.
    pub fn move_horizontal(&mut self, dir: i8) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        let x = active.x + dir;
        if self.board.collides(&active.shape, x, active.y) {
            return false;
        }
        self.active = Some(ActivePiece { x, ..active });
        true
    }

    /// Rotates the active piece clockwise, kicking sideways when the turned
    /// shape would overlap. Returns false if the rotation was abandoned.
    pub fn rotate(&mut self) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        let board = &self.board;
        let y = active.y;
        let resolved = resolve_rotation(&active.shape, active.x, |shape, x| {
            board.collides(shape, x, y)
        });
        match resolved {
            Some((shape, x)) => {
                self.active = Some(ActivePiece { shape, x, ..active });
                true
            }
            None => false,
        }
    }

    /// Drops the active piece one row. On contact with the stack or floor
    /// the piece locks instead, which may clear lines, spawn the next piece,
    /// or end the game.
    pub fn soft_drop(&mut self) -> StepOutcome {
        if self.phase != Phase::Active {
            return StepOutcome::default();
        }
        self.descend_step()
    }

    /// Drops the active piece straight to its landing row and locks it.
    pub fn hard_drop(&mut self) -> StepOutcome {
        if self.phase != Phase::Active {
            return StepOutcome::default();
        }
        let Some(active) = self.active else {
            return StepOutcome::default();
        };
        let mut y = active.y;
        while !self.board.collides(&active.shape, active.x, y + 1) {
            y += 1;
        }
        self.active = Some(ActivePiece { y, ..active });
        self.lock_active()
    }

    /// Stashes the active piece, spawning a replacement from the queue, or
    /// swaps it with the previously stashed piece. Usable once per piece
    /// placement; the gate re-arms when a piece spawns through the normal
    /// lock cycle.
    pub fn hold(&mut self) -> StepOutcome {
        if self.phase != Phase::Active || !self.can_hold {
            return StepOutcome::default();
        }
        let Some(active) = self.active else {
            return StepOutcome::default();
        };

        let outcome = match self.held.take() {
            None => {
                self.held = Some(self.stash(active));
                let spawned = self.spawn_next();
                StepOutcome {
                    locked: false,
                    lines_cleared: 0,
                    game_over: !spawned,
                }
            }
            Some(stored) => {
                self.held = Some(self.stash(active));
                let shape = match self.config.hold_policy {
                    HoldPolicy::SpawnOrientation => spawn_shape(stored.kind),
                    HoldPolicy::KeepOrientation => stored.shape,
                };
                let piece = ActivePiece {
                    kind: stored.kind,
                    shape,
                    x: spawn_x(&shape),
                    y: 0,
                };
                if self.board.collides(&piece.shape, piece.x, piece.y) {
                    self.phase = Phase::Over;
                    self.active = None;
                    StepOutcome {
                        locked: false,
                        lines_cleared: 0,
                        game_over: true,
                    }
                } else {
                    self.active = Some(piece);
                    StepOutcome::default()
                }
            }
        };
        self.can_hold = false;
        outcome
    }

    /// Toggles between Active and Paused. Resuming resets the gravity
    /// accumulator so stale elapsed time cannot cause an instant drop.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Active => self.phase = Phase::Paused,
            Phase::Paused => {
                self.phase = Phase::Active;
                self.drop_timer_ms = 0;
            }
            Phase::Over => {}
        }
    }

    /// Abandons the current game and starts a new one, reseeding from the
    /// RNG's current state so restarts don't replay the same sequence.
    pub fn restart(&mut self) {
        let seed = self.queue.seed();
        *self = Self::with_config(seed, self.config);
    }

    /// Pushes a scripted piece sequence to the front of the queue (after
    /// the already-spawned active piece).
    pub fn preload_queue(&mut self, kinds: &[PieceKind]) {
        self.queue.preload(kinds);
    }

    // --- Views ---

    /// Row the active piece would land on from its current position.
    /// Preview only; never mutates state.
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        let mut y = active.y;
        while !self.board.collides(&active.shape, active.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Fills a reusable snapshot buffer with the current frame's view.
    pub fn snapshot_into(&self, snap: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut snap.board);
        snap.active = self.active.map(ActiveSnapshot::from);
        snap.ghost_y = self.ghost_y();
        snap.hold = self.held_kind();
        snap.next.clear();
        snap.next
            .extend(self.queue.preview().take(self.queue.lookahead()));
        snap.can_hold = self.can_hold;
        snap.phase = self.phase;
        snap.score = self.score;
        snap.level = self.level;
        snap.lines = self.lines;
    }

    /// Allocates a fresh snapshot of the current frame.
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    // --- Internals ---

    /// One descent step: move down if clear, otherwise lock in place.
    fn descend_step(&mut self) -> StepOutcome {
        let Some(active) = self.active else {
            return StepOutcome::default();
        };
        if self.board.collides(&active.shape, active.x, active.y + 1) {
            return self.lock_active();
        }
        self.active = Some(ActivePiece {
            y: active.y + 1,
            ..active
        });
        self.drop_timer_ms = 0;
        StepOutcome::default()
    }

    /// The atomic lock event: merge, clear, score, spawn.
    ///
    /// Points are computed with the level in effect before the cleared
    /// lines are counted.
    fn lock_active(&mut self) -> StepOutcome {
        let Some(active) = self.active.take() else {
            return StepOutcome::default();
        };
        self.board.merge(&active.shape, active.x, active.y);
        let cleared = self.board.clear_lines();
        if cleared > 0 {
            self.score = self
                .score
                .saturating_add(scoring::line_clear_points(cleared, self.level));
            self.lines += cleared;
            self.level = scoring::level_for_lines(self.lines);
        }
        self.drop_timer_ms = 0;
        let spawned = self.spawn_next();
        StepOutcome {
            locked: true,
            lines_cleared: cleared,
            game_over: !spawned,
        }
    }

    /// Draws the next piece and places it at spawn. A spawn that overlaps
    /// the stack ends the game. Returns false on game over.
    fn spawn_next(&mut self) -> bool {
        let piece = ActivePiece::spawn(self.queue.draw());
        if self.board.collides(&piece.shape, piece.x, piece.y) {
            self.phase = Phase::Over;
            self.active = None;
            return false;
        }
        self.active = Some(piece);
        self.can_hold = true;
        true
    }

    /// Normalizes the active piece for the hold slot per the configured
    /// policy.
    fn stash(&self, piece: ActivePiece) -> HeldPiece {
        let shape = match self.config.hold_policy {
            HoldPolicy::SpawnOrientation => spawn_shape(piece.kind),
            HoldPolicy::KeepOrientation => piece.shape,
        };
        HeldPiece {
            kind: piece.kind,
            shape,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
