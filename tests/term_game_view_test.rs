//! Rendering a live game through the terminal view

use classic_tetris::core::{color, GameState, SequenceSource};
use classic_tetris::term::{encode_diff_into, encode_full_into, FrameBuffer, GameView, Viewport};
use classic_tetris::types::{GameAction, PieceKind};

fn text(fb: &FrameBuffer) -> String {
    (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect()
}

#[test]
fn intro_shows_title_overlay() {
    let game = GameState::new(SequenceSource::repeat(PieceKind::I));
    let fb = GameView::default().render(&game.snapshot(), Viewport::new(80, 24));
    let screen = text(&fb);
    assert!(screen.contains("TETRIS"));
    assert!(screen.contains("Press Enter to Play"));
}

#[test]
fn active_piece_appears_once_it_enters_the_grid() {
    let mut game = GameState::new(SequenceSource::repeat(PieceKind::I));
    game.apply_action(GameAction::Confirm);
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let layout = view.layout(vp);

    // Spawned two rows above the grid: nothing of it is visible.
    let fb = view.render(&game.snapshot(), vp);
    let well_top = layout.frame_y + 1;
    let blocks = fb
        .row_text(well_top)
        .chars()
        .filter(|&ch| ch == '█')
        .count();
    assert_eq!(blocks, 0);

    game.apply_action(GameAction::SoftDrop);
    game.apply_action(GameAction::SoftDrop);
    let fb = view.render(&game.snapshot(), vp);
    let glyph = fb.get(layout.frame_x + 1 + 3 * 2, well_top).unwrap();
    assert_eq!(glyph.ch, '█');
    assert_eq!(glyph.style.fg, color(PieceKind::I));
}

#[test]
fn diff_after_a_move_is_smaller_than_full_repaint() {
    let mut game = GameState::new(SequenceSource::repeat(PieceKind::T));
    game.apply_action(GameAction::Confirm);
    for _ in 0..5 {
        game.apply_action(GameAction::SoftDrop);
    }
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let before = view.render(&game.snapshot(), vp);
    game.apply_action(GameAction::MoveLeft);
    let after = view.render(&game.snapshot(), vp);

    let mut full = Vec::new();
    encode_full_into(&after, &mut full).unwrap();
    let mut diff = Vec::new();
    encode_diff_into(&before, &after, &mut diff).unwrap();
    assert!(!diff.is_empty());
    assert!(diff.len() < full.len() / 4);
}
