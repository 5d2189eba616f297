//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O) and can be unit-tested.

use crate::core::board::kind_from_code;
use crate::core::{color, get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Phase, BOARD_HEIGHT, BOARD_WIDTH};

const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(40, 44, 52);

/// Key legend shown under the NEXT preview.
const CONTROLS: [(&str, &str); 6] = [
    ("\u{2190} \u{2192}", "move"),
    ("\u{2193}", "soft drop"),
    ("\u{2191}", "rotate"),
    ("Space", "hard drop"),
    ("Esc", "pause"),
    ("q", "quit"),
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the well sits inside the viewport, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub panel_x: u16,
}

/// Draws the well, the side panel and the phase overlays.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps squares roughly square.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        let panel_w = 24;
        let total_w = frame_w + 2 + panel_w;
        let frame_x = viewport.width.saturating_sub(total_w) / 2;
        let frame_y = viewport.height.saturating_sub(frame_h) / 2;
        Layout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            panel_x: frame_x + frame_w + 2,
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(CellStyle::new(Rgb::new(171, 178, 191), PANEL_BG).glyph(' '));

        let layout = self.layout(viewport);
        self.draw_border(fb, &layout);
        self.draw_well(fb, snap, &layout);
        self.draw_panel(fb, snap, &layout);

        match snap.phase {
            Phase::Intro => self.draw_overlay(fb, &layout, "TETRIS", "Press Enter to Play"),
            Phase::Paused => self.draw_overlay(fb, &layout, "GAME PAUSED", "Press Enter to Resume"),
            Phase::GameOver => {
                self.draw_overlay(fb, &layout, "GAME OVER", "Press Enter to Play Again")
            }
            Phase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: &Layout) {
        let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let Layout {
            frame_x: x,
            frame_y: y,
            frame_w: w,
            frame_h: h,
            ..
        } = *layout;

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_well(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let empty = CellStyle::new(Rgb::new(90, 94, 104), WELL_BG).dim();
        for (row, cells) in snap.board.iter().enumerate() {
            for (col, &code) in cells.iter().enumerate() {
                match kind_from_code(code) {
                    Some(kind) => self.draw_block(fb, layout, col as u16, row as u16, kind),
                    None => self.fill_cell(fb, layout, col as u16, row as u16, '·', empty),
                }
            }
        }

        // The intro screen shows an empty well.
        if snap.phase == Phase::Intro {
            return;
        }
        for pos in snap.active.cells {
            // Rows above the grid are never drawn.
            if pos.row < 0 || pos.col < 0 {
                continue;
            }
            if pos.row < BOARD_HEIGHT as i32 && pos.col < BOARD_WIDTH as i32 {
                self.draw_block(fb, layout, pos.col as u16, pos.row as u16, snap.active.kind);
            }
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: &Layout, col: u16, row: u16, kind: PieceKind) {
        let style = CellStyle::new(color(kind), WELL_BG);
        self.fill_cell(fb, layout, col, row, '█', style);
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        col: u16,
        row: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = layout.frame_x + 1 + col * self.cell_w;
        let py = layout.frame_y + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let x = layout.panel_x;
        if x >= fb.width() {
            return;
        }
        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = value.dim();

        let mut y = layout.frame_y;
        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, v, value);
            y += 3;
        }

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        self.draw_preview(fb, x, y, snap.next);
        y += 4;

        for (keys, what) in CONTROLS {
            fb.put_str(x, y, keys, value);
            fb.put_str(x + 7, y, what, hint);
            y += 1;
        }
    }

    /// Next piece in its spawn orientation, inside a 4x3 cell box.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(color(kind), PANEL_BG);
        for (dx, dy) in get_shape(kind) {
            let px = x + (dx as i16 + 1) as u16 * 2;
            let py = y + (dy as i16 + 1) as u16;
            fb.fill_rect(px, py, 2, 1, '█', style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: &Layout, title: &str, prompt: &str) {
        let inner_x = layout.frame_x + 1;
        let inner_w = layout.frame_w - 2;
        let mid_y = layout.frame_y + layout.frame_h / 2;
        let box_style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG);

        fb.fill_rect(inner_x, mid_y - 2, inner_w, 5, ' ', box_style);
        fb.put_str_centered(inner_x, inner_w, mid_y - 1, title, box_style.bold());
        fb.put_str_centered(inner_x, inner_w, mid_y + 1, prompt, box_style);
    }
}
