//! Reading the human player's column from the terminal

use std::io::{BufRead, Write};
use std::num::{IntErrorKind, ParseIntError};

use anyhow::{bail, Context, Result};
use games_connect4::{Board, MoveError};

/// Why a line of input was not accepted as a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    NotANumber,
    OutOfBounds,
    ColumnFull,
}

/// Turn one line of input into a playable column.
fn parse_choice(board: &Board, line: &str) -> Result<usize, Rejection> {
    // Integers too large for i64 are still numbers, just not columns
    let value: i64 = line
        .trim()
        .parse()
        .map_err(|e: ParseIntError| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Rejection::OutOfBounds,
            _ => Rejection::NotANumber,
        })?;
    let column = usize::try_from(value).map_err(|_| Rejection::OutOfBounds)?;

    match board.landing_row(column) {
        Ok(_) => Ok(column),
        Err(MoveError::ColumnFull(_)) => Err(Rejection::ColumnFull),
        Err(_) => Err(Rejection::OutOfBounds),
    }
}

/// Prompt until the player enters a playable column.
///
/// Running out of input is an error: the game cannot continue without a move.
pub fn read_human_move<R: BufRead, W: Write>(
    board: &Board,
    input: &mut R,
    output: &mut W,
) -> Result<usize> {
    let max_column = board.cols() - 1;

    loop {
        write!(output, "Enter your column choice (0-{}): ", max_column)?;
        output.flush()?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("failed to read player input")?;
        if read == 0 {
            bail!("input closed before a move was entered");
        }

        match parse_choice(board, &line) {
            Ok(column) => return Ok(column),
            Err(Rejection::NotANumber) => {
                writeln!(output, "Invalid input, please enter a number.")?;
            }
            Err(Rejection::OutOfBounds) => {
                writeln!(
                    output,
                    "Column out of bounds, please choose between 0-{}.",
                    max_column
                )?;
            }
            Err(Rejection::ColumnFull) => {
                writeln!(output, "Column is full, try another one.")?;
            }
        }
    }
}
