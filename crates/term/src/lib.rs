//! Terminal rendering for the game.
//!
//! A small game-oriented layer: [`GameView`] paints a [`core::GameSnapshot`]
//! into a [`FrameBuffer`], and [`TerminalRenderer`] flushes that buffer to the
//! terminal, repainting only what changed between frames.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use classic_tetris_core as core;
pub use classic_tetris_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{GameView, Layout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, for_each_changed_run, TerminalRenderer};
