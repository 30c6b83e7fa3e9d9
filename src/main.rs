//! Tetromino Packer
//!
//! Reads a file of 4x4 tetromino drawings and prints the smallest square
//! arrangement holding all of them, each piece labelled with its letter.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::error;

use tetropack::grid::format_grid;
use tetropack::{input, solver, PackConfig, PackError};

/// Packs tetrominoes onto the smallest possible square.
#[derive(Parser)]
#[command(name = "tetropack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pack the pieces and print the grid.
    Solve {
        /// Piece file (.txt, blocks separated by blank lines).
        file: PathBuf,
        /// Largest grid side to try.
        #[arg(long, default_value_t = solver::DEFAULT_MAX_SIDE)]
        max_side: usize,
        /// Also write the packed grid to this file.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate the piece file without packing.
    Check {
        /// Piece file (.txt, blocks separated by blank lines).
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Solve {
            file,
            max_side,
            output,
        } => run_solve(file, max_side, output),
        Command::Check { file } => run_check(file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:?}");
            println!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Packs the file's pieces, prints the grid and optionally saves it.
fn run_solve(file: PathBuf, max_side: usize, output: Option<PathBuf>) -> Result<(), PackError> {
    let config = PackConfig {
        max_side,
        ..PackConfig::default()
    };
    let grid = tetropack::pack_file(&file, &config)?;
    let rendered = format_grid(&grid);

    println!("{rendered}");

    if let Some(path) = output {
        // the grid is already printed, so a failed save only warns
        if let Err(e) = fs::write(&path, &rendered) {
            eprintln!("Failed to save grid to {}: {}", path.display(), e);
        } else {
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

/// Validates the file and prints each cropped piece.
fn run_check(file: PathBuf) -> Result<(), PackError> {
    let config = PackConfig::default();
    let shapes = input::read_pieces(&file, &config.alphabet)?;

    println!("{} valid pieces", shapes.len());
    for shape in &shapes {
        println!();
        for row in shape.rows() {
            println!("{row}");
        }
    }

    Ok(())
}
