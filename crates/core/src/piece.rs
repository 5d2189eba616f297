//! Piece module - the active tetromino and its movement rules
//!
//! A piece owns its four minoes. Every mutation goes through a legality check
//! against a [`Playfield`]; a rejected move leaves the piece untouched.

use crate::board::Playfield;
use crate::geometry::{color, get_shape, offset_table, rotate_offset_cw};
use crate::types::{PieceKind, Position, Rgb, Rotation, SPAWN_COL, SPAWN_ROW};

/// A single unit cell of a piece or of the locked stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mino {
    pub position: Position,
    pub kind: PieceKind,
}

impl Mino {
    pub fn color(&self) -> Rgb {
        color(self.kind)
    }
}

/// Active falling piece
///
/// Invariant: the minoes are the kind's template, rotated `rotation` times
/// about the anchor (with kicks applied to the anchor), so they never overlap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rotation: Rotation,
    anchor: Position,
    minoes: [Mino; 4],
}

impl Piece {
    /// Create a new piece at the spawn anchor
    pub fn spawn(kind: PieceKind) -> Self {
        Self::at(kind, Position::new(SPAWN_COL, SPAWN_ROW))
    }

    /// Create a piece in its spawn orientation at an arbitrary anchor
    pub fn at(kind: PieceKind, anchor: Position) -> Self {
        let minoes = get_shape(kind).map(|(dx, dy)| Mino {
            position: anchor.shifted(dx as i32, dy as i32),
            kind,
        });
        Self {
            kind,
            rotation: Rotation::North,
            anchor,
            minoes,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn anchor(&self) -> Position {
        self.anchor
    }

    pub fn color(&self) -> Rgb {
        color(self.kind)
    }

    pub fn minoes(&self) -> &[Mino; 4] {
        &self.minoes
    }

    /// Absolute cell positions of the four minoes
    pub fn cells(&self) -> [Position; 4] {
        self.minoes.map(|m| m.position)
    }

    /// Give up the minoes (used when locking into the board).
    pub fn into_minoes(self) -> [Mino; 4] {
        self.minoes
    }

    /// Shift the piece by (dx, dy) if every shifted cell is legal.
    ///
    /// Returns false and leaves the piece unchanged otherwise.
    pub fn translate(&mut self, dx: i32, dy: i32, field: &impl Playfield) -> bool {
        let candidate = self.cells().map(|p| p.shifted(dx, dy));
        if !field.is_position_legal(&candidate) {
            return false;
        }
        self.anchor = self.anchor.shifted(dx, dy);
        self.place(candidate);
        true
    }

    /// Rotate 90° clockwise, trying each kick offset in order.
    ///
    /// Returns false and leaves the piece unchanged if no kick fits.
    pub fn rotate(&mut self, field: &impl Playfield) -> bool {
        let target = self.rotation.rotate_cw();
        let anchor = self.anchor;
        let rotated = self.cells().map(|p| {
            let (x, y) = rotate_offset_cw(p.col - anchor.col, p.row - anchor.row);
            Position::new(x, y)
        });

        for (dx, dy) in offset_table(self.kind).kicks(self.rotation) {
            let kicked = anchor.shifted(dx, dy);
            let candidate = rotated.map(|r| r.shifted(kicked.col, kicked.row));
            if field.is_position_legal(&candidate) {
                self.anchor = kicked;
                self.rotation = target;
                self.place(candidate);
                return true;
            }
        }

        false
    }

    /// Move straight down until blocked. Returns the number of rows travelled.
    pub fn drop(&mut self, field: &impl Playfield) -> u32 {
        let mut rows = 0;
        while self.translate(0, 1, field) {
            rows += 1;
        }
        rows
    }

    /// True when the piece cannot move one row down.
    pub fn is_dropped(&self, field: &impl Playfield) -> bool {
        let below = self.cells().map(|p| p.shifted(0, 1));
        !field.is_position_legal(&below)
    }

    fn place(&mut self, cells: [Position; 4]) {
        for (mino, pos) in self.minoes.iter_mut().zip(cells) {
            mino.position = pos;
        }
    }
}
