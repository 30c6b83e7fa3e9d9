//! Tetromino Packing Library
//!
//! Packs a set of tetrominoes onto the smallest square grid that holds them
//! all, placing each piece exactly as drawn (no rotation or reflection).

pub mod geometry;
pub mod grid;
pub mod input;
pub mod pieces;
pub mod solver;

use std::path::Path;

use log::info;
use thiserror::Error;

use grid::Grid;
use input::InputError;
use pieces::Alphabet;

/// Settings for a packing run.
#[derive(Clone, Copy, Debug)]
pub struct PackConfig {
    /// Largest grid side tried before giving up.
    pub max_side: usize,
    /// Symbols handed to pieces in input order; its length caps the piece count.
    pub alphabet: Alphabet,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            max_side: solver::DEFAULT_MAX_SIDE,
            alphabet: Alphabet::LATIN,
        }
    }
}

/// Failure of a whole packing run.
///
/// Invalid input and an exhausted size search are kept apart: the first means
/// the file must be fixed, the second that no grid up to the cap worked.
#[derive(Debug, Error)]
pub enum PackError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("no solution found up to {max_side}x{max_side}")]
    Exhausted { max_side: usize },
}

/// Reads the pieces in `path` and packs them onto the smallest square grid.
pub fn pack_file(path: &Path, config: &PackConfig) -> Result<Grid, PackError> {
    let shapes = input::read_pieces(path, &config.alphabet)?;
    info!("read {} pieces from {}", shapes.len(), path.display());

    solver::solve_smallest(&shapes, config.max_side).ok_or(PackError::Exhausted {
        max_side: config.max_side,
    })
}
