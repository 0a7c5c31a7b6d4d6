//! Board module - the 10x20 playfield grid.
//!
//! Rows are stored top to bottom in a flat array for cache-friendly access.
//! The board is a passive grid: it answers occupancy queries, absorbs locked
//! pieces, and compacts full rows. All movement and timing rules live in the
//! game state machine.

use blockfall_types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::shape::Shape;

/// Total number of cells on the board.
pub const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The playfield grid.
///
/// Cells are `Option<PieceKind>`: `None` is empty, `Some(kind)` is a locked
/// block keeping its piece identity for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat row-major storage: `cells[y * WIDTH + x]`.
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Converts (x, y) board coordinates to a flat index.
    /// Returns `None` if out of bounds.
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at (x, y); `None` for out-of-bounds coordinates.
    #[inline]
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|i| self.cells[i])
    }

    /// Sets the cell at (x, y). Returns false if out of bounds.
    #[inline]
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Collision-oriented occupancy: true for filled cells, the side walls,
    /// and the floor. Rows above the top (y < 0) are open so pieces can
    /// spawn and kick while straddling the top edge.
    #[inline]
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        if y < 0 {
            return false;
        }
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Tests a shape anchored at (x, y) against the grid.
    ///
    /// Pure predicate; safe to call for any anchor, including positions
    /// outside the board (the ghost projection and the rotation kick
    /// search rely on that).
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape
            .occupied()
            .any(|(sx, sy)| self.is_occupied(x + sx as i8, y + sy as i8))
    }

    /// Merges a shape's occupied cells into the grid at (x, y).
    ///
    /// The caller guarantees the position is collision-free; out-of-bounds
    /// cells are dropped silently.
    pub fn merge(&mut self, shape: &Shape, x: i8, y: i8) {
        for (sx, sy) in shape.occupied() {
            if let Some(kind) = shape.cell(sx, sy) {
                self.set(x + sx as i8, y + sy as i8, Some(kind));
            }
        }
    }

    /// True if every cell in row y is filled.
    pub fn is_row_full(&self, y: usize) -> bool {
        let start = y * (BOARD_WIDTH as usize);
        self.cells[start..start + (BOARD_WIDTH as usize)]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Removes row y, shifting all rows above it down by one and inserting
    /// an empty row at the top.
    pub fn clear_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;
        for row in (1..=y).rev() {
            let src = (row - 1) * width;
            let dst = row * width;
            self.cells.copy_within(src..src + width, dst);
        }
        for cell in &mut self.cells[0..width] {
            *cell = None;
        }
    }

    /// Clears every full row, compacting the stack downward.
    ///
    /// Scans bottom to top; after removing a row the same index is examined
    /// again, because the row that slid down into it may itself be full.
    /// Returns the number of rows cleared.
    pub fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = (BOARD_HEIGHT as usize) - 1;
        loop {
            if self.is_row_full(y) {
                self.clear_row(y);
                cleared += 1;
                continue;
            }
            if y == 0 {
                break;
            }
            y -= 1;
        }
        cleared
    }

    /// Encodes the grid into a byte matrix: 0 for empty, 1-7 for locked
    /// cells by piece identity. Reuses the caller's buffer.
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for y in 0..BOARD_HEIGHT as usize {
            for x in 0..BOARD_WIDTH as usize {
                let cell = self.cells[y * (BOARD_WIDTH as usize) + x];
                out[y][x] = cell.map(PieceKind::cell_value).unwrap_or(0);
            }
        }
    }

    /// Empties the grid.
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Flat row-major view of the grid.
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
