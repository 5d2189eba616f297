//! Board module - owns the locked cells
//!
//! The visible 10x20 grid is a flat row-major array of cells for cache locality.
//! Coordinates: (col, row) where col ranges 0..9 (left to right) and row ranges
//! 0..19 (top to bottom). Pieces spawn partly above the grid, so cells locked
//! at negative rows are kept in a small spawn-buffer list; they still collide
//! and they move down with the stack when rows are cleared.

use arrayvec::ArrayVec;

use crate::piece::{Mino, Piece};
use crate::types::{PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_ROW};

/// A cell on the visible grid: `None` when empty, otherwise the kind that locked there.
pub type Cell = Option<PieceKind>;

/// Total number of visible cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Rows cleared by one call, top to bottom.
pub type ClearedRows = ArrayVec<i32, { BOARD_HEIGHT as usize }>;

/// Collision seam used by [`Piece`] movement.
///
/// [`Board`] is the real implementation; tests can pass any
/// `Fn(Position) -> bool` instead.
pub trait Playfield {
    /// Whether a single cell may be occupied by an active piece.
    fn is_cell_free(&self, pos: Position) -> bool;

    /// Whether every candidate cell may be occupied.
    fn is_position_legal(&self, cells: &[Position]) -> bool {
        cells.iter().all(|&pos| self.is_cell_free(pos))
    }
}

impl<F> Playfield for F
where
    F: Fn(Position) -> bool,
{
    fn is_cell_free(&self, pos: Position) -> bool {
        self(pos)
    }
}

/// The locked stack
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of visible cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
    /// Cells locked above the visible grid (row < 0)
    buffer: Vec<Mino>,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            buffer: Vec::new(),
        }
    }

    /// Calculate flat index for a visible cell
    #[inline(always)]
    fn index(col: i32, row: i32) -> Option<usize> {
        if col < 0 || col >= BOARD_WIDTH as i32 || row < 0 || row >= BOARD_HEIGHT as i32 {
            return None;
        }
        Some((row as usize) * (BOARD_WIDTH as usize) + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get a visible cell. Returns None if outside the visible grid.
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Set a visible cell. Returns false if outside the visible grid.
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a locked mino sits at `pos` (visible grid or spawn buffer).
    pub fn is_occupied(&self, pos: Position) -> bool {
        if pos.row < 0 {
            return self.buffer.iter().any(|m| m.position == pos);
        }
        matches!(self.get(pos.col, pos.row), Some(Some(_)))
    }

    /// Check if a visible row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = row * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Number of locked minoes.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count() + self.buffer.len()
    }

    /// Move a piece's minoes into the locked cells.
    ///
    /// Returns true when the piece topped out (see [`Board::is_game_over`]).
    pub fn lock(&mut self, piece: Piece) -> bool {
        let topped_out = Self::is_game_over(&piece);
        for mino in piece.into_minoes() {
            let pos = mino.position;
            if pos.row < 0 {
                if !self.is_occupied(pos) {
                    self.buffer.push(mino);
                }
            } else {
                self.set(pos.col, pos.row, Some(mino.kind));
            }
        }
        topped_out
    }

    /// True when a piece being locked never left the spawn row.
    pub fn is_game_over(piece: &Piece) -> bool {
        piece.anchor().row == SPAWN_ROW
    }

    /// Remove every complete row, top to bottom, compacting after each one.
    ///
    /// Returns the cleared row indices in the order they were found.
    pub fn clear_complete_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        for row in 0..BOARD_HEIGHT as usize {
            if self.is_row_full(row) {
                self.collapse_row(row);
                cleared.push(row as i32);
            }
        }
        cleared
    }

    /// Drop row `y` and shift everything above it down by one.
    fn collapse_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells.copy_within(src_start..src_start + width, row * width);
        }
        self.cells[..width].fill(None);

        if self.buffer.is_empty() {
            return;
        }
        for mino in &mut self.buffer {
            mino.position.row += 1;
        }
        let (landed, above): (Vec<Mino>, Vec<Mino>) = self
            .buffer
            .drain(..)
            .partition(|m| m.position.row >= 0);
        self.buffer = above;
        for mino in landed {
            self.set(mino.position.col, mino.position.row, Some(mino.kind));
        }
    }

    /// All locked minoes: visible cells in row-major order, then the spawn buffer.
    pub fn locked_minoes(&self) -> impl Iterator<Item = Mino> + '_ {
        let width = BOARD_WIDTH as usize;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| {
                cell.map(|kind| Mino {
                    position: Position::new((i % width) as i32, (i / width) as i32),
                    kind,
                })
            })
            .chain(self.buffer.iter().copied())
    }

    /// Visible cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty the board, including the spawn buffer.
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.buffer.clear();
    }

    /// Write the visible grid as kind codes (0 = empty, 1..=7 = `PieceKind::ALL` order + 1).
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = kind_code(self.cells[y * width + x]);
            }
        }
    }

    /// Fill a whole visible row, leaving out the listed columns.
    pub fn fill_row_except(&mut self, row: i32, gaps: &[i32], kind: PieceKind) {
        for col in 0..BOARD_WIDTH as i32 {
            if !gaps.contains(&col) {
                self.set(col, row, Some(kind));
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Playfield for Board {
    /// In bounds horizontally, above the floor, and not locked.
    /// Rows above the grid are allowed.
    fn is_cell_free(&self, pos: Position) -> bool {
        pos.col >= 0
            && pos.col < BOARD_WIDTH as i32
            && pos.row < BOARD_HEIGHT as i32
            && !self.is_occupied(pos)
    }
}

/// Encode a cell as a snapshot byte.
pub fn kind_code(cell: Cell) -> u8 {
    match cell {
        None => 0,
        Some(kind) => PieceKind::ALL
            .iter()
            .position(|k| *k == kind)
            .map(|i| i as u8 + 1)
            .unwrap_or(0),
    }
}

/// Decode a snapshot byte back into a kind.
pub fn kind_from_code(code: u8) -> Option<PieceKind> {
    match code {
        1..=7 => Some(PieceKind::from_index(code as usize - 1)),
        _ => None,
    }
}
