//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure layout code, no I/O. The driver hands the filled framebuffer to the
//! renderer, which diffs and flushes it.

use blockfall_core::{GameSnapshot, Shape};
use blockfall_types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Size of the terminal drawing area.
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const TERM_BG: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(16, 16, 22);

const WELL_STYLE: CellStyle = CellStyle {
    fg: Rgb::new(70, 70, 82),
    bg: WELL_BG,
    bold: false,
    dim: false,
};
const DOT_STYLE: CellStyle = CellStyle {
    fg: Rgb::new(70, 70, 82),
    bg: WELL_BG,
    bold: false,
    dim: true,
};
const BORDER_STYLE: CellStyle = CellStyle {
    fg: Rgb::new(190, 190, 190),
    bg: TERM_BG,
    bold: false,
    dim: false,
};
const GHOST_STYLE: CellStyle = CellStyle {
    fg: Rgb::new(135, 135, 135),
    bg: WELL_BG,
    bold: false,
    dim: true,
};
const LABEL_STYLE: CellStyle = CellStyle {
    fg: Rgb::new(225, 225, 225),
    bg: TERM_BG,
    bold: true,
    dim: false,
};
const VALUE_STYLE: CellStyle = CellStyle {
    fg: Rgb::new(195, 195, 195),
    bg: TERM_BG,
    bold: false,
    dim: false,
};
const BANNER_STYLE: CellStyle = CellStyle {
    fg: Rgb::new(255, 255, 255),
    bg: TERM_BG,
    bold: true,
    dim: false,
};

/// Per-piece display color, following the classic web palette.
fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(255, 0, 0),
        PieceKind::J => Rgb::new(0, 255, 0),
        PieceKind::L => Rgb::new(0, 0, 255),
        PieceKind::O => Rgb::new(255, 255, 0),
        PieceKind::S => Rgb::new(255, 0, 255),
        PieceKind::T => Rgb::new(0, 255, 255),
        PieceKind::Z => Rgb::new(255, 128, 0),
    }
}

fn block_style(kind: PieceKind) -> CellStyle {
    CellStyle {
        fg: piece_color(kind),
        bg: WELL_BG,
        bold: true,
        dim: false,
    }
}

/// Pixel geometry of one frame: where the bordered board frame sits.
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Draws a [`GameSnapshot`] as a bordered well with a stats panel beside it.
pub struct GameView {
    /// Terminal columns per board cell.
    cell_w: u16,
    /// Terminal rows per board cell.
    cell_h: u16,
    anchor_y: AnchorY,
    best_score: u32,
}

impl Default for GameView {
    fn default() -> Self {
        // Terminal glyphs run about twice as tall as wide, so 2x1 cells
        // read square.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            best_score: 0,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Best score shown in the side panel (loaded from the score table).
    pub fn set_best_score(&mut self, best_score: u32) {
        self.best_score = best_score;
    }

    /// Render a game snapshot into an existing framebuffer.
    ///
    /// Reuses the caller's buffer; once it has reached its final size
    /// nothing in here allocates.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let lay = self.layout(viewport);

        fb.fill_rect(
            lay.x + 1,
            lay.y + 1,
            lay.w.saturating_sub(2),
            lay.h.saturating_sub(2),
            ' ',
            WELL_STYLE,
        );
        self.paint_frame(fb, lay);

        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match PieceKind::from_cell_value(snap.board[y as usize][x as usize]) {
                    Some(kind) => self.paint_cell(fb, lay, x, y, '█', block_style(kind)),
                    None => self.paint_dot(fb, lay, x, y),
                }
            }
        }

        if let (Some(piece), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            self.paint_piece(fb, lay, &piece.shape, piece.x, ghost_y, '░', GHOST_STYLE);
        }
        // The falling piece goes last so it wins any overlap with its ghost.
        if let Some(piece) = snap.active {
            let style = block_style(piece.kind);
            self.paint_piece(fb, lay, &piece.shape, piece.x, piece.y, '█', style);
        }

        self.paint_panel(fb, snap, viewport, lay);

        match snap.phase {
            Phase::Paused => self.paint_banner(fb, lay, "PAUSED"),
            Phase::Over => self.paint_banner(fb, lay, "GAME OVER"),
            Phase::Active => {}
        }
    }

    /// Convenience wrapper allocating a fresh framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Top => 0,
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
        };
        Layout { x, y, w, h }
    }

    fn paint_frame(&self, fb: &mut FrameBuffer, lay: Layout) {
        if lay.w < 2 || lay.h < 2 {
            return;
        }
        let (right, bottom) = (lay.x + lay.w - 1, lay.y + lay.h - 1);
        fb.fill_rect(lay.x + 1, lay.y, lay.w - 2, 1, '─', BORDER_STYLE);
        fb.fill_rect(lay.x + 1, bottom, lay.w - 2, 1, '─', BORDER_STYLE);
        fb.fill_rect(lay.x, lay.y + 1, 1, lay.h - 2, '│', BORDER_STYLE);
        fb.fill_rect(right, lay.y + 1, 1, lay.h - 2, '│', BORDER_STYLE);
        fb.put_char(lay.x, lay.y, '┌', BORDER_STYLE);
        fb.put_char(right, lay.y, '┐', BORDER_STYLE);
        fb.put_char(lay.x, bottom, '└', BORDER_STYLE);
        fb.put_char(right, bottom, '┘', BORDER_STYLE);
    }

    /// Fills the terminal rectangle backing board cell (x, y).
    fn paint_cell(&self, fb: &mut FrameBuffer, lay: Layout, x: u16, y: u16, ch: char, style: CellStyle) {
        fb.fill_rect(
            lay.x + 1 + x * self.cell_w,
            lay.y + 1 + y * self.cell_h,
            self.cell_w,
            self.cell_h,
            ch,
            style,
        );
    }

    /// Single centered dot marking an empty cell.
    fn paint_dot(&self, fb: &mut FrameBuffer, lay: Layout, x: u16, y: u16) {
        fb.put_char(
            lay.x + 1 + x * self.cell_w + self.cell_w.saturating_sub(1) / 2,
            lay.y + 1 + y * self.cell_h + self.cell_h.saturating_sub(1) / 2,
            '·',
            DOT_STYLE,
        );
    }

    fn paint_piece(
        &self,
        fb: &mut FrameBuffer,
        lay: Layout,
        shape: &Shape,
        at_x: i8,
        at_y: i8,
        ch: char,
        style: CellStyle,
    ) {
        for (dx, dy) in shape.occupied() {
            let x = at_x + dx as i8;
            let y = at_y + dy as i8;
            if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                self.paint_cell(fb, lay, x as u16, y as u16, ch, style);
            }
        }
    }

    fn paint_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, lay: Layout) {
        let x = lay.x.saturating_add(lay.w).saturating_add(2);
        if viewport.width.saturating_sub(x) < 12 {
            return;
        }

        let stat = |fb: &mut FrameBuffer, row: &mut u16, name: &str, value: u32| {
            fb.put_str(x, *row, name, LABEL_STYLE);
            fb.put_u32(x, row.saturating_add(1), value, VALUE_STYLE);
            *row = row.saturating_add(3);
        };

        let mut row = lay.y;
        stat(fb, &mut row, "SCORE", snap.score);
        stat(fb, &mut row, "BEST", self.best_score);
        stat(fb, &mut row, "LEVEL", snap.level);
        stat(fb, &mut row, "LINES", snap.lines);

        fb.put_str(x, row, "HOLD", LABEL_STYLE);
        // Dimmed once the hold has been used for the current piece.
        let held_style = if snap.can_hold {
            VALUE_STYLE
        } else {
            CellStyle {
                dim: true,
                ..VALUE_STYLE
            }
        };
        let held = snap.hold.map(PieceKind::as_str).unwrap_or("-");
        fb.put_str(x, row.saturating_add(1), held, held_style);
        row = row.saturating_add(3);

        fb.put_str(x, row, "NEXT", LABEL_STYLE);
        for (i, kind) in snap.next.iter().enumerate() {
            let y = row.saturating_add(1 + i as u16);
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, kind.as_str(), VALUE_STYLE);
        }
    }

    fn paint_banner(&self, fb: &mut FrameBuffer, lay: Layout, text: &str) {
        let width = text.chars().count() as u16;
        let x = lay.x + lay.w.saturating_sub(width) / 2;
        fb.put_str(x, lay.y + lay.h / 2, text, BANNER_STYLE);
    }
}
