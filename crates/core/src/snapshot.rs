//! Read-only copy of everything a renderer needs for one frame.

use crate::piece::Piece;
use crate::types::{PieceKind, Phase, Position, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub anchor: Position,
    pub cells: [Position; 4],
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            anchor: value.anchor(),
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Visible grid as kind codes, see [`crate::board::kind_code`].
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: ActiveSnapshot,
    pub next: PieceKind,
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fall_interval: u32,
    pub lock_delay: u32,
    pub frame: u64,
}

impl GameSnapshot {
    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let origin = Position::default();
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: ActiveSnapshot {
                kind: PieceKind::I,
                rotation: Rotation::North,
                anchor: origin,
                cells: [origin; 4],
            },
            next: PieceKind::I,
            phase: Phase::Intro,
            score: 0,
            level: 0,
            lines: 0,
            fall_interval: 0,
            lock_delay: 0,
            frame: 0,
        }
    }
}
