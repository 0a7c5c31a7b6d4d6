//! Terminal rendering for blockfall.
//!
//! A deliberately small pipeline: [`GameView`] lays a game snapshot out into
//! a [`FrameBuffer`] of styled character cells, and [`TerminalRenderer`]
//! diffs consecutive framebuffers and writes only the changed spans as ANSI
//! sequences. No widget toolkit sits in between, which keeps cell geometry
//! (for instance two columns per board cell) under direct control and keeps
//! the core crate free of any terminal dependency.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{write_frame_diff, write_full_frame, TerminalRenderer};
