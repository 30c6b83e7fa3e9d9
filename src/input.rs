//! Reading piece files.
//!
//! A piece file is plain 7-bit text holding one 4x4 block per piece, blocks
//! separated by a blank line. Every check here runs before any block reaches
//! the normalizer, and the first failure rejects the whole file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::trace;
use thiserror::Error;

use crate::pieces::{normalize, Alphabet, Shape, ShapeError};

/// Largest accepted piece file, in bytes.
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Required file extension, compared case-insensitively.
const EXTENSION: &str = "txt";

/// Problems with the input file or its contents.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid file type: {} must be .txt", .0.display())]
    InvalidExtension(PathBuf),
    #[error("could not read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a regular file", .0.display())]
    NotRegularFile(PathBuf),
    #[error("file too large (max {max} bytes)")]
    TooLarge { max: u64 },
    #[error("file contains invalid characters (non-ASCII)")]
    NonAscii,
    #[error("no tetrominoes found")]
    NoPieces,
    #[error("too many tetrominoes (max {max})")]
    TooManyPieces { max: usize },
    #[error("invalid tetromino at position {position}: {source}")]
    InvalidPiece {
        position: usize,
        #[source]
        source: ShapeError,
    },
}

/// Reads, checks and normalizes every piece in the file at `path`.
///
/// Pieces get symbols from `alphabet` in file order.
pub fn read_pieces(path: &Path, alphabet: &Alphabet) -> Result<Vec<Shape>, InputError> {
    check_file(path)?;

    let content = fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let text = std::str::from_utf8(&content).map_err(|_| InputError::NonAscii)?;

    parse_pieces(text, alphabet)
}

/// Checks the extension, type and size of the file before it is read.
fn check_file(path: &Path) -> Result<(), InputError> {
    let has_extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case(EXTENSION));
    if !has_extension {
        return Err(InputError::InvalidExtension(path.to_path_buf()));
    }

    let metadata = fs::metadata(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(InputError::NotRegularFile(path.to_path_buf()));
    }
    if metadata.len() > MAX_FILE_SIZE {
        return Err(InputError::TooLarge { max: MAX_FILE_SIZE });
    }

    Ok(())
}

/// Splits `text` into blank-line separated blocks and normalizes each one.
///
/// `\r\n` line endings are accepted. Fails without normalizing anything if
/// the text is not ASCII, holds no blocks, or holds more blocks than
/// `alphabet` has symbols.
pub fn parse_pieces(text: &str, alphabet: &Alphabet) -> Result<Vec<Shape>, InputError> {
    if !text.is_ascii() {
        return Err(InputError::NonAscii);
    }

    let text = text.replace("\r\n", "\n");
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::NoPieces);
    }

    let blocks: Vec<&str> = text.split("\n\n").collect();
    if blocks.len() > alphabet.len() {
        return Err(InputError::TooManyPieces {
            max: alphabet.len(),
        });
    }

    blocks
        .iter()
        .enumerate()
        .map(|(index, block)| -> Result<Shape, InputError> {
            let lines: Vec<&str> = block.trim_matches('\n').split('\n').collect();
            // the count check above guarantees a symbol for every block
            let symbol = alphabet
                .symbol(index)
                .ok_or(InputError::TooManyPieces {
                    max: alphabet.len(),
                })?;

            let shape = normalize(&lines, symbol).map_err(|source| InputError::InvalidPiece {
                position: index + 1,
                source,
            })?;
            trace!("piece {symbol}: {:?}", shape.rows());
            Ok(shape)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const L_PIECE: &str = "....\n##..\n.#..\n.#..\n";

    /// Writes `content` to a fresh file under the system temp directory.
    fn temp_file(name: &str, content: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tetropack-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_single_piece() {
        let pieces = parse_pieces(L_PIECE, &Alphabet::LATIN).unwrap();
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].symbol(), 'A');
        assert_eq!(pieces[0].rows(), vec!["AA", ".A", ".A"]);
    }

    #[test]
    fn test_multiple_pieces_get_letters_in_order() {
        let text = "....\n##..\n.#..\n.#..\n\n..##\n..##\n....\n....\n\n#...\n#...\n#...\n#...\n";
        let pieces = parse_pieces(text, &Alphabet::LATIN).unwrap();
        let symbols: Vec<char> = pieces.iter().map(Shape::symbol).collect();
        assert_eq!(symbols, vec!['A', 'B', 'C']);
        assert_eq!(pieces[1].rows(), vec!["BB", "BB"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "....\r\n##..\r\n.#..\r\n.#..\r\n\r\n..##\r\n..##\r\n....\r\n....\r\n";
        let pieces = parse_pieces(text, &Alphabet::LATIN).unwrap();
        assert_eq!(pieces.len(), 2);
    }

    #[test]
    fn test_invalid_piece_reports_position() {
        let text = format!("{L_PIECE}\n....\n##..\n....\n....\n");
        let error = parse_pieces(&text, &Alphabet::LATIN).unwrap_err();
        assert!(matches!(
            error,
            InputError::InvalidPiece {
                position: 2,
                source: ShapeError::WrongCellCount(2)
            }
        ));
        assert!(error.to_string().starts_with("invalid tetromino at position 2"));
    }

    #[test]
    fn test_wrong_block_size() {
        let error = parse_pieces("...\n##.\n.#.\n", &Alphabet::LATIN).unwrap_err();
        assert!(matches!(
            error,
            InputError::InvalidPiece {
                position: 1,
                source: ShapeError::MalformedDimensions
            }
        ));
    }

    #[test]
    fn test_two_extra_newlines_between_blocks_are_rejected() {
        let text = format!("{L_PIECE}\n\n\n{L_PIECE}");
        let error = parse_pieces(&text, &Alphabet::LATIN).unwrap_err();
        assert!(matches!(error, InputError::InvalidPiece { position: 2, .. }));
    }

    #[test]
    fn test_one_extra_newline_between_blocks_is_accepted() {
        // L_PIECE ends in '\n', so this is exactly three newlines in a row
        let text = format!("{L_PIECE}\n\n{L_PIECE}");
        assert!(text.contains("\n\n\n") && !text.contains("\n\n\n\n"));
        let pieces = parse_pieces(&text, &Alphabet::LATIN).unwrap();
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[1].symbol(), 'B');
        assert_eq!(pieces[1].rows(), vec!["BB", ".B", ".B"]);
    }

    #[test]
    fn test_too_many_pieces() {
        let text = [L_PIECE; 27].join("\n");
        let error = parse_pieces(&text, &Alphabet::LATIN).unwrap_err();
        assert!(matches!(error, InputError::TooManyPieces { max: 26 }));

        let text = [L_PIECE; 26].join("\n");
        assert_eq!(parse_pieces(&text, &Alphabet::LATIN).unwrap().len(), 26);
    }

    #[test]
    fn test_alphabet_limits_piece_count() {
        let alphabet = Alphabet::new('a', 2).unwrap();
        let text = [L_PIECE; 3].join("\n");
        let error = parse_pieces(&text, &alphabet).unwrap_err();
        assert!(matches!(error, InputError::TooManyPieces { max: 2 }));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            parse_pieces("", &Alphabet::LATIN),
            Err(InputError::NoPieces)
        ));
        assert!(matches!(
            parse_pieces("\n\n  \n", &Alphabet::LATIN),
            Err(InputError::NoPieces)
        ));
    }

    #[test]
    fn test_non_ascii_text() {
        let error = parse_pieces("....\n##..\n.#£.\n.#..\n", &Alphabet::LATIN).unwrap_err();
        assert!(matches!(error, InputError::NonAscii));
    }

    #[test]
    fn test_read_pieces_from_file() {
        let path = temp_file("read.txt", L_PIECE.as_bytes());
        let pieces = read_pieces(&path, &Alphabet::LATIN).unwrap();
        assert_eq!(pieces.len(), 1);
    }

    #[test]
    fn test_read_rejects_extension() {
        let path = temp_file("pieces.dat", L_PIECE.as_bytes());
        let error = read_pieces(&path, &Alphabet::LATIN).unwrap_err();
        assert!(matches!(error, InputError::InvalidExtension(_)));
    }

    #[test]
    fn test_read_accepts_upper_case_extension() {
        let path = temp_file("upper.TXT", L_PIECE.as_bytes());
        assert!(read_pieces(&path, &Alphabet::LATIN).is_ok());
    }

    #[test]
    fn test_read_missing_file() {
        let path = std::env::temp_dir().join("tetropack-does-not-exist.txt");
        let error = read_pieces(&path, &Alphabet::LATIN).unwrap_err();
        assert!(matches!(error, InputError::Io { .. }));
    }

    #[test]
    fn test_read_rejects_directory() {
        let dir = std::env::temp_dir().join(format!("tetropack-dir-{}.txt", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let error = read_pieces(&dir, &Alphabet::LATIN).unwrap_err();
        assert!(matches!(error, InputError::NotRegularFile(_)));
    }

    #[test]
    fn test_read_rejects_large_file() {
        let content = vec![b'.'; MAX_FILE_SIZE as usize + 1];
        let path = temp_file("large.txt", &content);
        let error = read_pieces(&path, &Alphabet::LATIN).unwrap_err();
        assert!(matches!(error, InputError::TooLarge { .. }));
    }

    #[test]
    fn test_read_rejects_invalid_utf8() {
        let path = temp_file("invalid.txt", &[b'#', 0xFF, b'\n']);
        let error = read_pieces(&path, &Alphabet::LATIN).unwrap_err();
        assert!(matches!(error, InputError::NonAscii));
    }

    #[test]
    fn test_read_rejects_non_ascii_bytes() {
        let path = temp_file("binary.txt", &[b'#', 0xC3, 0xA9, b'\n']);
        let error = read_pieces(&path, &Alphabet::LATIN).unwrap_err();
        assert!(matches!(error, InputError::NonAscii));
    }
}
