//! Board tests

use classic_tetris::core::{Board, Piece, Playfield};
use classic_tetris::types::{PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for row in 0..BOARD_HEIGHT as i32 {
        for col in 0..BOARD_WIDTH as i32 {
            assert_eq!(board.get(col, row), Some(None), "({}, {})", col, row);
        }
    }
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
}

#[test]
fn test_cell_free_rules() {
    let mut board = Board::new();
    board.set(3, 10, Some(PieceKind::Z));

    assert!(board.is_cell_free(Position::new(0, 0)));
    // Above the grid is open space.
    assert!(board.is_cell_free(Position::new(4, -2)));
    assert!(!board.is_cell_free(Position::new(-1, 5)));
    assert!(!board.is_cell_free(Position::new(10, 5)));
    assert!(!board.is_cell_free(Position::new(4, 20)));
    assert!(!board.is_cell_free(Position::new(3, 10)));
}

#[test]
fn test_i_piece_completes_row_and_board_empties() {
    let mut board = Board::new();
    board.fill_row_except(19, &[3, 4, 5, 6], PieceKind::L);

    let piece = Piece::at(PieceKind::I, Position::new(4, 19));
    assert!(piece.cells().iter().all(|&p| board.is_cell_free(p)));
    assert!(!board.lock(piece));

    assert!(board.is_row_full(19));
    let cleared = board.clear_complete_rows();
    assert_eq!(cleared.as_slice(), &[19]);
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_clear_is_idempotent() {
    let mut board = Board::new();
    board.fill_row_except(19, &[], PieceKind::T);
    board.set(0, 18, Some(PieceKind::S));

    assert_eq!(board.clear_complete_rows().len(), 1);
    assert!(board.clear_complete_rows().is_empty());
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::S)));
    assert_eq!(board.occupied_count(), 1);
}

#[test]
fn test_non_adjacent_rows_clear_and_stack_collapses() {
    let mut board = Board::new();
    board.fill_row_except(19, &[], PieceKind::I);
    board.fill_row_except(18, &[9], PieceKind::J);
    board.fill_row_except(17, &[], PieceKind::I);
    board.set(2, 16, Some(PieceKind::O));

    let cleared = board.clear_complete_rows();
    assert_eq!(cleared.as_slice(), &[17, 19]);

    // The partial row lands on the floor, the loose cell right above it.
    assert!(!board.is_row_full(19));
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::J)));
    assert_eq!(board.get(9, 19), Some(None));
    assert_eq!(board.get(2, 18), Some(Some(PieceKind::O)));
    assert_eq!(board.occupied_count(), 10);
}

#[test]
fn test_locked_cells_above_grid_fall_into_view() {
    let mut board = Board::new();
    board.fill_row_except(0, &[5], PieceKind::L);
    // The turn kicks the I one column right, so it stands in the gap
    // with three cells above the grid.
    let mut piece = Piece::at(PieceKind::I, Position::new(4, -2));
    assert!(piece.rotate(&|_: Position| true));
    let above: Vec<Position> = piece.cells().iter().copied().filter(|p| p.row < 0).collect();
    assert_eq!(above.len(), 3);

    board.lock(piece);
    assert_eq!(board.clear_complete_rows().as_slice(), &[0]);

    let hidden = board.locked_minoes().filter(|m| m.position.row < 0).count();
    assert_eq!(hidden, above.len() - 1);
    assert_eq!(board.get(5, 0), Some(Some(PieceKind::I)));
}
