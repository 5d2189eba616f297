//! Classic Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `classic_tetris::{core, input, term, types}` and hosts the runner's
//! configuration and event log.

pub mod config;
pub mod event_log;

pub use classic_tetris_core as core;
pub use classic_tetris_input as input;
pub use classic_tetris_term as term;
pub use classic_tetris_types as types;
