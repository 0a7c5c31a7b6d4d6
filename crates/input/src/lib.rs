//! Terminal input handling.
//!
//! Two small pieces with no UI framework between them: [`map`] turns
//! `crossterm` key events into [`Command`](types::Command)s, and
//! [`handler`] adds DAS/ARR repeats for held keys, including on terminals
//! that never report key releases.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
