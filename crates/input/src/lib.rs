//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`] commands.
//! Key presses are discrete: one press, one command. There is no auto-repeat
//! handling beyond what the terminal itself sends.

pub mod map;

pub use classic_tetris_types as types;

pub use map::{handle_key_event, should_quit};
