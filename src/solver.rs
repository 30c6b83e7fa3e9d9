//! Backtracking placement solver.
//!
//! Pieces are placed strictly in input order. For the current piece, origins
//! are scanned row-major (top row first, left to right); each fitting origin
//! is tried depth-first and undone if the remaining pieces cannot be placed.
//! The first complete arrangement found is returned, so results are fully
//! deterministic for a given grid size and piece list.

use log::{debug, info};

use crate::grid::Grid;
use crate::pieces::{Shape, CELLS_PER_PIECE};

/// Default upper bound on the grid side tried by [`solve_smallest`].
pub const DEFAULT_MAX_SIDE: usize = 20;

/// A piece stamped onto the grid for the lifetime of one search branch.
///
/// Dropping the guard removes the piece again unless [`PlacedGuard::keep`]
/// was called, so every return path out of a failed branch restores the grid.
struct PlacedGuard<'g, 's> {
    grid: &'g mut Grid,
    shape: &'s Shape,
    origin: (usize, usize),
    kept: bool,
}

impl<'g, 's> PlacedGuard<'g, 's> {
    fn place(grid: &'g mut Grid, shape: &'s Shape, x: usize, y: usize) -> Self {
        grid.place(shape, x, y);
        Self {
            grid,
            shape,
            origin: (x, y),
            kept: false,
        }
    }

    fn grid(&mut self) -> &mut Grid {
        &mut *self.grid
    }

    /// Leaves the piece on the grid when the guard goes out of scope.
    fn keep(mut self) {
        self.kept = true;
    }
}

impl Drop for PlacedGuard<'_, '_> {
    fn drop(&mut self) {
        if !self.kept {
            let (x, y) = self.origin;
            self.grid.remove(self.shape, x, y);
        }
    }
}

/// Places every shape in `remaining` onto `grid`, in order.
///
/// Returns true with all pieces stamped on success. On failure the grid is
/// left exactly as it was on entry.
fn place_remaining(grid: &mut Grid, remaining: &[Shape]) -> bool {
    let Some((current, rest)) = remaining.split_first() else {
        return true;
    };

    let side = grid.side();
    for y in 0..side {
        for x in 0..side {
            if !grid.can_place(current, x, y) {
                continue;
            }

            let mut placed = PlacedGuard::place(grid, current, x, y);
            if place_remaining(placed.grid(), rest) {
                placed.keep();
                return true;
            }
        }
    }

    false
}

/// Attempts to pack all `shapes` onto `grid`.
///
/// Returns the filled grid, or `None` when no arrangement exists at this
/// size. `None` is an ordinary outcome, not an error.
pub fn solve(mut grid: Grid, shapes: &[Shape]) -> Option<Grid> {
    place_remaining(&mut grid, shapes).then_some(grid)
}

/// Smallest square side whose area can hold `piece_count` tetrominoes,
/// i.e. `ceil(sqrt(4 * piece_count))`.
pub fn min_side(piece_count: usize) -> usize {
    let area = piece_count * CELLS_PER_PIECE;
    let mut side = 0;
    while side * side < area {
        side += 1;
    }
    side
}

/// Finds the smallest square grid holding all `shapes`.
///
/// Starts at [`min_side`] and grows the side by one after each failure,
/// searching a fresh empty grid every time. Returns `None` if no side up to
/// and including `max_side` works.
pub fn solve_smallest(shapes: &[Shape], max_side: usize) -> Option<Grid> {
    let start = min_side(shapes.len());

    for side in start..=max_side {
        debug!("trying {} pieces on a {side}x{side} grid", shapes.len());
        if let Some(grid) = solve(Grid::new(side), shapes) {
            info!("packed {} pieces on a {side}x{side} grid", shapes.len());
            return Some(grid);
        }
    }

    debug!("no arrangement found up to {max_side}x{max_side}");
    None
}
