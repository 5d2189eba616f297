//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the falling-block simulation: shapes, the locked-cell
//! board, the active piece, scoring and the per-frame state machine. It has
//! no dependencies on terminals, input devices or the clock.
//!
//! # Module Structure
//!
//! - [`geometry`]: shape templates, colors and rotation offset tables
//! - [`board`]: locked cells, collision checks and row clearing
//! - [`piece`]: the active tetromino (translate, rotate, drop)
//! - [`scoring`]: line-clear points and the level speed table
//! - [`rng`]: injectable piece sources
//! - [`game_state`]: spawn, gravity, lock delay, clears, phases
//! - [`snapshot`]: read-only frame data for renderers
//!
//! # Example
//!
//! ```
//! use classic_tetris_core::{GameState, SequenceSource};
//! use classic_tetris_types::{GameAction, PieceKind, Phase};
//!
//! let mut game = GameState::new(SequenceSource::repeat(PieceKind::O));
//! assert_eq!(game.phase(), Phase::Intro);
//!
//! game.apply_action(GameAction::Confirm);
//! game.apply_action(GameAction::MoveLeft);
//! game.apply_action(GameAction::HardDrop);
//!
//! // The piece rests on the floor but only locks after two gravity checks.
//! for _ in 0..96 {
//!     game.tick();
//! }
//! assert_eq!(game.board().occupied_count(), 4);
//! ```

pub mod board;
pub mod game_state;
pub mod geometry;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use classic_tetris_types as types;

pub use board::{Board, Playfield};
pub use game_state::GameState;
pub use geometry::{color, get_shape, offset_table, OffsetTable};
pub use piece::{Mino, Piece};
pub use rng::{PieceSource, SequenceSource, SimpleRng, UniformSource};
pub use scoring::{calculate_score, fall_interval_for_level};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
