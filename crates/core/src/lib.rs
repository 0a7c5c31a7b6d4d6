//! The game rules, with no UI or I/O anywhere in the dependency tree.
//!
//! Everything here is driven by explicit commands and elapsed-time ticks,
//! so the same game runs identically under the terminal binary, a unit
//! test, or a bench: same seed, same game, every time, and no terminal is
//! needed to simulate play.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 playfield with collision queries and line clearing
//! - [`shape`]: Piece shape matrices, rotation, and the kick-offset search
//! - [`queue`]: Seeded random piece generation with a lookahead window
//! - [`scoring`]: Line-clear points, leveling, and the gravity curve
//! - [`game`]: The state machine composing all of the above
//! - [`snapshot`]: Per-frame read-only view for renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: Every piece is an independent uniform draw;
//!   the queue keeps a fixed number of upcoming pieces visible
//! - **Offset-search kicks**: Rotations blocked in place probe +1, -1, +2
//!   horizontally (bounded by the shape's width) before giving up
//! - **Immediate lock**: A piece locks the moment it cannot descend;
//!   there is no lock-delay grace period
//! - **Hold**: Stash one piece per placement; the slot re-arms on the next
//!   lock-cycle spawn
//! - **Ghost piece**: the landing row is always computed for display
//! - **Scoring**: 100/300/500/800 base points for 1-4 rows, multiplied by
//!   the pre-clear level; one level per ten lines
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::Command;
//!
//! let mut game = GameState::new(777);
//!
//! game.apply_command(Command::MoveRight);
//! game.apply_command(Command::Rotate);
//! let outcome = game.apply_command(Command::HardDrop);
//!
//! assert!(outcome.locked);
//! ```
//!
//! # Timing
//!
//! The driver calls [`GameState::tick`](game::GameState::tick) every frame
//! with elapsed milliseconds. Gravity starts at one row per second and
//! speeds up by 100ms per level down to a 100ms floor.

pub mod board;
pub mod game;
pub mod queue;
pub mod scoring;
pub mod shape;
pub mod snapshot;

pub use blockfall_types as types;

// The flat names cover everything a driver needs.
pub use board::Board;
pub use game::{ActivePiece, GameState};
pub use queue::{PieceQueue, SimpleRng};
pub use shape::{resolve_rotation, spawn_shape, Shape};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
