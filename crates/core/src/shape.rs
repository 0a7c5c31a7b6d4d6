//! Piece shape matrices and rotation resolution.
//!
//! Every piece is a square matrix (2x2, 3x3, or 4x4) of cells; occupied
//! entries carry the piece's own identity. Rotation is a pure matrix
//! transform, and the kick search in [`resolve_rotation`] probes horizontal
//! offsets in a fixed alternating order when the rotated shape conflicts
//! with the board.

use blockfall_types::{Cell, PieceKind};

/// Largest shape matrix dimension (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// A square matrix of cells in one orientation.
///
/// Backed by a fixed 4x4 grid; only the top-left `size x size` window is
/// meaningful. Copy-sized so pieces can be passed and snapshot by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    size: usize,
}

impl Shape {
    /// Builds a shape from a 0/1 occupancy matrix, tagging occupied cells
    /// with `kind`.
    pub fn from_rows<const N: usize>(kind: PieceKind, rows: [[u8; N]; N]) -> Self {
        let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &occupied) in row.iter().enumerate() {
                if occupied != 0 {
                    cells[y][x] = Some(kind);
                }
            }
        }
        Self { cells, size: N }
    }

    /// Matrix dimension N (2, 3, or 4).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at column `x`, row `y` within the matrix window.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y][x]
    }

    /// Iterates the (x, y) matrix coordinates of occupied cells.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |y| {
            (0..self.size).filter_map(move |x| self.cells[y][x].map(|_| (x, y)))
        })
    }

    /// 90 degree clockwise rotation: `out[i][j] = in[N-1-j][i]`.
    ///
    /// Applying this four times returns the original shape bit for bit.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size;
        let mut out = Self {
            cells: [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
            size: n,
        };
        for i in 0..n {
            for j in 0..n {
                out.cells[i][j] = self.cells[n - 1 - j][i];
            }
        }
        out
    }
}

/// Canonical spawn-orientation shape for a piece kind.
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(
            kind,
            [
                [0, 0, 0, 0],
                [1, 1, 1, 1],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ],
        ),
        PieceKind::J => Shape::from_rows(kind, [[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
        PieceKind::L => Shape::from_rows(kind, [[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
        PieceKind::O => Shape::from_rows(kind, [[1, 1], [1, 1]]),
        PieceKind::S => Shape::from_rows(kind, [[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
        PieceKind::T => Shape::from_rows(kind, [[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
        PieceKind::Z => Shape::from_rows(kind, [[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
    }
}

/// Rotates a shape clockwise and searches for a non-colliding x anchor.
///
/// If the rotated shape collides at the caller's anchor, offsets are added
/// to x in the sequence +1, -2, +3, -4, ... (net positions +1, -1, +2, -2
/// from the origin) and the position is re-tested after each shift. The
/// search gives up once the pending offset exceeds the matrix width, so
/// wider pieces kick farther than narrow ones. This exact order and abort
/// threshold are part of the game's feel; do not swap in a standard kick
/// table.
///
/// Returns the rotated shape and resolved anchor, or `None` when the
/// rotation has to be abandoned (the caller keeps its current shape and
/// anchor untouched).
pub fn resolve_rotation(
    shape: &Shape,
    x: i8,
    collides_at: impl Fn(&Shape, i8) -> bool,
) -> Option<(Shape, i8)> {
    let rotated = shape.rotated_cw();
    let width = rotated.size() as i8;
    let mut x = x;
    let mut offset: i8 = 1;
    while collides_at(&rotated, x) {
        x += offset;
        offset = -(offset + offset.signum());
        if offset > width {
            return None;
        }
    }
    Some((rotated, x))
}
