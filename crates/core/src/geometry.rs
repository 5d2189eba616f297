//! Geometry module - tetromino shape templates, colors and rotation offsets
//!
//! Shapes are described at rotation 0 as four offsets from the piece anchor,
//! with y growing downward. Rotation is not stored per state: a piece rotates
//! its current cells about the anchor and then tries the kick candidates from
//! its offset table (see [`OffsetTable::kicks`]).
//!
//! Offset data follows the SRS offset tables.
//! Reference: https://harddrop.com/wiki/SRS

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rgb, Rotation};

/// Offset of a single mino relative to the piece anchor
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the piece anchor
pub type PieceShape = [MinoOffset; 4];

/// One offset per kick attempt
pub type OffsetRow = [MinoOffset; 5];

/// Offsets for each of the 4 rotation states
pub type SrsOffsets = [OffsetRow; 4];

/// Get the rotation-0 shape for a piece kind
pub fn get_shape(kind: PieceKind) -> PieceShape {
    match kind {
        PieceKind::I => [(0, 0), (-1, 0), (1, 0), (2, 0)],
        PieceKind::J => [(0, 0), (-1, 0), (-1, -1), (1, 0)],
        PieceKind::L => [(0, 0), (-1, 0), (1, 0), (1, -1)],
        PieceKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        PieceKind::S => [(0, 0), (-1, 0), (0, -1), (1, -1)],
        PieceKind::T => [(0, 0), (-1, 0), (1, 0), (0, -1)],
        PieceKind::Z => [(0, 0), (0, -1), (-1, -1), (1, 0)],
    }
}

/// Display color for a piece kind
pub fn color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(224, 108, 117),
        PieceKind::J => Rgb::new(152, 195, 121),
        PieceKind::L => Rgb::new(97, 175, 239),
        PieceKind::O => Rgb::new(229, 192, 123),
        PieceKind::S => Rgb::new(198, 120, 221),
        PieceKind::T => Rgb::new(86, 182, 194),
        PieceKind::Z => Rgb::new(190, 80, 70),
    }
}

/// Rotate an anchor-relative offset 90° clockwise: (x, y) -> (-y, x)
#[inline(always)]
pub fn rotate_offset_cw(x: i32, y: i32) -> (i32, i32) {
    (-y, x)
}

/// JLSTZ offset table (shared by J, L, S, T, Z)
const JLSTZ_OFFSETS: SrsOffsets = [
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// I piece offset table
const I_OFFSETS: SrsOffsets = [
    [(0, 0), (-1, 0), (2, 0), (-1, 0), (2, 0)],
    [(-1, 0), (0, 0), (0, 0), (0, 1), (0, -2)],
    [(-1, 1), (1, 1), (-2, 1), (1, 0), (-2, 0)],
    [(0, 1), (0, 1), (0, 1), (0, -1), (0, 2)],
];

/// O piece offsets, indexed by the rotation being left.
///
/// Each entry re-centres the rotated 2x2 block onto the cells it occupied
/// before the turn, so the O footprint never moves. This intentionally
/// differs from the usual SRS O table (0,0),(0,-1),(-1,-1),(-1,0), which
/// makes the O wobble and keeps it from turning flush to the left wall.
const O_OFFSETS: [MinoOffset; 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Rotation offset table used for kicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetTable {
    /// 4 rotation states x 5 kick attempts; the kick is `from[i] - to[i]`.
    Srs(&'static SrsOffsets),
    /// One offset per rotation state, applied as the only candidate.
    Fixed(&'static [MinoOffset; 4]),
}

impl OffsetTable {
    /// Kick candidates, in the order they must be tried, for a clockwise
    /// turn out of `from`.
    pub fn kicks(&self, from: Rotation) -> ArrayVec<(i32, i32), 5> {
        let mut out = ArrayVec::new();
        match self {
            OffsetTable::Srs(table) => {
                let to = from.rotate_cw();
                let (src, dst) = (&table[from.index()], &table[to.index()]);
                for (a, b) in src.iter().zip(dst.iter()) {
                    out.push(((a.0 - b.0) as i32, (a.1 - b.1) as i32));
                }
            }
            OffsetTable::Fixed(table) => {
                let (dx, dy) = table[from.index()];
                out.push((dx as i32, dy as i32));
            }
        }
        out
    }
}

/// Get the offset table for a piece kind
pub fn offset_table(kind: PieceKind) -> OffsetTable {
    match kind {
        PieceKind::I => OffsetTable::Srs(&I_OFFSETS),
        PieceKind::O => OffsetTable::Fixed(&O_OFFSETS),
        PieceKind::J | PieceKind::L | PieceKind::S | PieceKind::T | PieceKind::Z => {
            OffsetTable::Srs(&JLSTZ_OFFSETS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn shapes_have_four_distinct_cells_including_anchor() {
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            assert!(shape.contains(&(0, 0)), "{:?} must contain its anchor", kind);
            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert_ne!(shape[i], shape[j], "{:?} has duplicate cells", kind);
                }
            }
        }
    }

    #[test]
    fn srs_tables_are_4_by_5() {
        for table in [&JLSTZ_OFFSETS, &I_OFFSETS] {
            assert_eq!(table.len(), 4);
            assert!(table.iter().all(|row| row.len() == 5));
        }
    }

    #[test]
    fn jlstz_kicks_from_north() {
        let kicks = offset_table(PieceKind::T).kicks(Rotation::North);
        assert_eq!(
            kicks.as_slice(),
            &[(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]
        );
    }

    #[test]
    fn jlstz_kicks_from_east() {
        let kicks = offset_table(PieceKind::L).kicks(Rotation::East);
        assert_eq!(kicks.as_slice(), &[(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]);
    }

    #[test]
    fn i_kicks_from_north() {
        let kicks = offset_table(PieceKind::I).kicks(Rotation::North);
        assert_eq!(kicks.as_slice(), &[(1, 0), (-1, 0), (2, 0), (-1, -1), (2, 2)]);
    }

    #[test]
    fn o_has_a_single_candidate_per_state() {
        let table = offset_table(PieceKind::O);
        for (i, r) in [
            Rotation::North,
            Rotation::East,
            Rotation::South,
            Rotation::West,
        ]
        .iter()
        .enumerate()
        {
            let kicks = table.kicks(*r);
            assert_eq!(kicks.len(), 1);
            let (dx, dy) = O_OFFSETS[i];
            assert_eq!(kicks[0], (dx as i32, dy as i32));
        }
    }

    #[test]
    fn o_offsets_cancel_over_a_full_turn() {
        let (sx, sy) = O_OFFSETS
            .iter()
            .fold((0, 0), |(x, y), &(dx, dy)| (x + dx, y + dy));
        assert_eq!((sx, sy), (0, 0));
    }

    #[test]
    fn colors_are_distinct() {
        for a in PieceKind::ALL {
            for b in PieceKind::ALL {
                if a != b {
                    assert_ne!(color(a), color(b));
                }
            }
        }
    }

    #[test]
    fn rotate_offset_is_clockwise_on_screen() {
        // right -> down -> left -> up
        assert_eq!(rotate_offset_cw(1, 0), (0, 1));
        assert_eq!(rotate_offset_cw(0, 1), (-1, 0));
        assert_eq!(rotate_offset_cw(-1, 0), (0, -1));
        assert_eq!(rotate_offset_cw(0, -1), (1, 0));
    }
}
