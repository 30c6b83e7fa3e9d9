//! Square occupancy grid that pieces are packed onto.
//!
//! The grid is a flat row-major vector where each cell holds the symbol of
//! the piece covering it, or `None` when empty.

use crate::geometry::Cell;
use crate::pieces::{Shape, EMPTY_GLYPH};

/// A mutable square grid of fixed side length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    side: usize,
    cells: Vec<Option<char>>,
}

impl Grid {
    /// Creates an empty grid with `side * side` cells.
    pub fn new(side: usize) -> Self {
        Self {
            side,
            cells: vec![None; side * side],
        }
    }

    /// Side length of the grid.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Converts an `(x, y)` cell to a linear index, row-major.
    #[inline(always)]
    fn index(&self, (x, y): Cell) -> usize {
        y * self.side + x
    }

    /// Returns the symbol at `(x, y)`, or `None` if the cell is empty or out
    /// of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.side || y >= self.side {
            return None;
        }
        self.cells[self.index((x, y))]
    }

    /// Returns true if no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Iterates over the rows, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<char>]> {
        // `max(1)` keeps `chunks` happy on a zero-sized grid, which has no rows
        self.cells.chunks(self.side.max(1))
    }

    /// Checks whether `shape` fits with its local top-left at `(origin_x, origin_y)`.
    ///
    /// Every filled cell must land inside the grid on an empty cell.
    pub fn can_place(&self, shape: &Shape, origin_x: usize, origin_y: usize) -> bool {
        shape.cells().iter().all(|&(dx, dy)| {
            let (Some(x), Some(y)) = (origin_x.checked_add(dx), origin_y.checked_add(dy)) else {
                return false;
            };
            x < self.side && y < self.side && self.cells[self.index((x, y))].is_none()
        })
    }

    /// Writes `shape`'s symbol into every cell it covers at the origin.
    ///
    /// The caller must have checked [`Grid::can_place`] first; no bounds or
    /// overlap check is repeated here.
    pub fn place(&mut self, shape: &Shape, origin_x: usize, origin_y: usize) {
        debug_assert!(self.can_place(shape, origin_x, origin_y));
        for &(dx, dy) in shape.cells() {
            let index = self.index((origin_x + dx, origin_y + dy));
            self.cells[index] = Some(shape.symbol());
        }
    }

    /// Clears every cell `shape` covers at the origin.
    ///
    /// Only valid for a placement previously made with [`Grid::place`].
    pub fn remove(&mut self, shape: &Shape, origin_x: usize, origin_y: usize) {
        for &(dx, dy) in shape.cells() {
            let index = self.index((origin_x + dx, origin_y + dy));
            debug_assert_eq!(self.cells[index], Some(shape.symbol()));
            self.cells[index] = None;
        }
    }
}

/// Formats a grid as one line per row, with [`EMPTY_GLYPH`] for empty cells.
pub fn format_grid(grid: &Grid) -> String {
    let mut output = String::with_capacity(grid.side() * (grid.side() + 1));
    for row in grid.rows() {
        output.extend(row.iter().map(|cell| cell.unwrap_or(EMPTY_GLYPH)));
        output.push('\n');
    }
    output
}
