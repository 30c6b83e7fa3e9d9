//! Cell coordinates and the shape-level geometry used by the validator.
//!
//! Coordinates are `(x, y)` with `x` the column and `y` the row, both growing
//! away from the top-left corner.

use rustc_hash::FxHashSet;

use crate::pieces::EMPTY_GLYPH;

/// A cell position within a piece canvas or a grid.
pub type Cell = (usize, usize);

/// Orthogonal neighbour offsets: down, up, right, left.
const NEIGHBOURS: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Counts the filled cells reachable from the first cell of `filled` through
/// up/down/left/right adjacency.
///
/// `filled` is expected in row-major scan order, so the seed is the first
/// filled cell met when scanning top row first. Diagonal contact does not
/// connect two cells.
pub fn connected_count(filled: &[Cell]) -> usize {
    let Some(&seed) = filled.first() else {
        return 0;
    };

    let cells: FxHashSet<Cell> = filled.iter().copied().collect();
    let mut visited: FxHashSet<Cell> = FxHashSet::default();
    let mut stack = vec![seed];
    visited.insert(seed);

    while let Some((x, y)) = stack.pop() {
        for (dx, dy) in NEIGHBOURS {
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };
            let neighbour = (nx, ny);
            if cells.contains(&neighbour) && visited.insert(neighbour) {
                stack.push(neighbour);
            }
        }
    }

    visited.len()
}

/// Crops glyph rows to the tight bounding box of their non-empty cells.
///
/// Leading and trailing rows and columns made only of [`EMPTY_GLYPH`] are
/// dropped. Rows with no filled cell at all crop to an empty list.
pub fn crop<S: AsRef<str>>(rows: &[S]) -> Vec<String> {
    let grid: Vec<Vec<char>> = rows.iter().map(|row| row.as_ref().chars().collect()).collect();

    let mut min_x = usize::MAX;
    let mut max_x = 0;
    let mut min_y = usize::MAX;
    let mut max_y = 0;

    for (y, row) in grid.iter().enumerate() {
        for (x, &glyph) in row.iter().enumerate() {
            if glyph != EMPTY_GLYPH {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }
    }

    if min_y == usize::MAX {
        return Vec::new();
    }

    grid[min_y..=max_y]
        .iter()
        .map(|row| {
            (min_x..=max_x)
                .map(|x| row.get(x).copied().unwrap_or(EMPTY_GLYPH))
                .collect()
        })
        .collect()
}
