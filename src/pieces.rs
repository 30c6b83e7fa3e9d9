//! Piece definitions: the validated, cropped `Shape` and the normalizer that
//! builds one from a raw 4x4 glyph block.

use thiserror::Error;

use crate::geometry::{connected_count, crop, Cell};

/// Glyph marking a filled cell in raw input.
pub const FILLED_GLYPH: char = '#';

/// Glyph marking an empty cell, both in raw input and in rendered output.
pub const EMPTY_GLYPH: char = '.';

/// Side length of the fixed input canvas every piece is drawn on.
pub const CANVAS_SIDE: usize = 4;

/// Number of filled cells in every piece.
pub const CELLS_PER_PIECE: usize = 4;

/// Maximum number of pieces, one per symbol in [`Alphabet::LATIN`].
pub const MAX_PIECES: usize = 26;

/// A raw block after validation: `canvas[y][x]` is true for filled cells.
pub type Canvas = [[bool; CANVAS_SIDE]; CANVAS_SIDE];

/// The set of symbols handed out to pieces, in input order.
///
/// Passed explicitly to the normalizer so the symbol limit is configuration
/// rather than a hidden global.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alphabet {
    first: char,
    len: usize,
}

impl Alphabet {
    /// Upper-case Latin letters `A` through `Z`.
    pub const LATIN: Self = Self {
        first: 'A',
        len: MAX_PIECES,
    };

    /// Creates an alphabet of `len` consecutive symbols starting at `first`.
    ///
    /// Returns `None` if `len` exceeds [`MAX_PIECES`], or if any symbol is not
    /// a printable ASCII character or is a glyph used for input or rendering.
    pub fn new(first: char, len: usize) -> Option<Self> {
        if len > MAX_PIECES {
            return None;
        }
        let alphabet = Self { first, len };
        let symbols_ok = (0..len).all(|index| {
            alphabet.symbol_unchecked(index).is_some_and(|symbol| {
                symbol.is_ascii_graphic() && symbol != EMPTY_GLYPH && symbol != FILLED_GLYPH
            })
        });
        symbols_ok.then_some(alphabet)
    }

    /// Number of symbols, and so the maximum number of pieces.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the symbol for the piece at `index`, or `None` once the
    /// alphabet is exhausted.
    pub fn symbol(&self, index: usize) -> Option<char> {
        if index >= self.len {
            return None;
        }
        self.symbol_unchecked(index)
    }

    fn symbol_unchecked(&self, index: usize) -> Option<char> {
        let offset = u32::try_from(index).ok()?;
        char::from_u32((self.first as u32).checked_add(offset)?)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::LATIN
    }
}

/// Reasons a raw block is rejected, in the order they are checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("piece must be {side} lines of {side} characters", side = CANVAS_SIDE)]
    MalformedDimensions,
    #[error("unexpected character '{glyph}' at line {line}, column {col}", line = .row + 1, col = .column + 1)]
    InvalidGlyph {
        glyph: char,
        row: usize,
        column: usize,
    },
    #[error("piece has {0} filled cells, expected {expected}", expected = CELLS_PER_PIECE)]
    WrongCellCount(usize),
    #[error("filled cells are not connected ({reached} of {total} reachable)")]
    Disconnected { reached: usize, total: usize },
}

/// An immutable piece cropped to its tight bounding box.
///
/// Filled cells are stored as local offsets from the top-left corner of the
/// box, in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    symbol: char,
    width: usize,
    height: usize,
    filled: Vec<Cell>,
}

impl Shape {
    /// Builds a shape from rows that are already relabeled and cropped.
    ///
    /// Every glyph other than [`EMPTY_GLYPH`] counts as filled. No validation
    /// happens here; [`normalize`] is the checked entry point.
    pub(crate) fn from_labeled_rows<S: AsRef<str>>(symbol: char, rows: &[S]) -> Self {
        let mut width = 0;
        let mut filled = Vec::with_capacity(CELLS_PER_PIECE);

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            width = width.max(row.chars().count());
            for (x, glyph) in row.chars().enumerate() {
                if glyph != EMPTY_GLYPH {
                    filled.push((x, y));
                }
            }
        }

        Self {
            symbol,
            width,
            height: rows.len(),
            filled,
        }
    }

    /// The symbol this piece is drawn with on the grid.
    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Number of columns in the bounding box.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows in the bounding box.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Local offsets of the filled cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.filled
    }

    /// Renders the cropped mask as rows of the symbol and [`EMPTY_GLYPH`].
    pub fn rows(&self) -> Vec<String> {
        let mut rows = vec![vec![EMPTY_GLYPH; self.width]; self.height];
        for &(x, y) in &self.filled {
            rows[y][x] = self.symbol;
        }
        rows.into_iter().map(|row| row.into_iter().collect()).collect()
    }
}

/// Checks a raw block and returns its filled-cell canvas.
///
/// Checks run in order and the first failure is reported: dimensions,
/// glyphs, filled-cell count, then 4-connectivity via flood fill from the
/// first filled cell in row-major order.
pub fn validate_block<S: AsRef<str>>(lines: &[S]) -> Result<Canvas, ShapeError> {
    if lines.len() != CANVAS_SIDE
        || lines
            .iter()
            .any(|line| line.as_ref().chars().count() != CANVAS_SIDE)
    {
        return Err(ShapeError::MalformedDimensions);
    }

    let mut canvas = [[false; CANVAS_SIDE]; CANVAS_SIDE];
    for (row, line) in lines.iter().enumerate() {
        for (column, glyph) in line.as_ref().chars().enumerate() {
            match glyph {
                FILLED_GLYPH => canvas[row][column] = true,
                EMPTY_GLYPH => {}
                _ => {
                    return Err(ShapeError::InvalidGlyph { glyph, row, column });
                }
            }
        }
    }

    let filled: Vec<Cell> = (0..CANVAS_SIDE)
        .flat_map(|y| (0..CANVAS_SIDE).map(move |x| (x, y)))
        .filter(|&(x, y)| canvas[y][x])
        .collect();

    if filled.len() != CELLS_PER_PIECE {
        return Err(ShapeError::WrongCellCount(filled.len()));
    }

    let reached = connected_count(&filled);
    if reached != filled.len() {
        return Err(ShapeError::Disconnected {
            reached,
            total: filled.len(),
        });
    }

    Ok(canvas)
}

/// Returns true if `lines` is a well-formed tetromino block.
pub fn is_valid_shape<S: AsRef<str>>(lines: &[S]) -> bool {
    validate_block(lines).is_ok()
}

/// Validates a raw block, relabels its filled cells with `symbol` and crops
/// it to the minimal shape.
pub fn normalize<S: AsRef<str>>(lines: &[S], symbol: char) -> Result<Shape, ShapeError> {
    let canvas = validate_block(lines)?;

    let labeled: Vec<String> = canvas
        .iter()
        .map(|row| {
            row.iter()
                .map(|&filled| if filled { symbol } else { EMPTY_GLYPH })
                .collect()
        })
        .collect();

    Ok(Shape::from_labeled_rows(symbol, &crop(&labeled)))
}
