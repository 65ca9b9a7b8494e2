//! Connect 4 game implementation for the engine
//!
//! Connect 4 is a two-player connection game where players drop discs into a
//! vertically suspended grid. A disc falls to the lowest empty row of its
//! column. The first player to line up four discs horizontally, vertically or
//! diagonally wins; a full board with no line is a draw.
//!
//! # Board Layout
//!
//! The board is stored in row-major order, with row 0 at the **top**, which is
//! also the orientation used when rendering:
//! ```text
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Top
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 4: [28][29][30][31][32][33][34]
//! Row 5: [35][36][37][38][39][40][41]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! Cells hold signed player ids: `+1`, `-1`, or `0` for empty. A move is always
//! a column index; the row is derived by gravity.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{GameState, PLAYER_ONE, PLAYER_TWO};
//! use games_connect4::Board;
//!
//! let board = Board::new();
//! let board = board.apply_move(3, PLAYER_ONE).unwrap();
//! let board = board.apply_move(3, PLAYER_TWO).unwrap();
//!
//! assert_eq!(board.cell(5, 3), PLAYER_ONE);
//! assert_eq!(board.cell(4, 3), PLAYER_TWO);
//! assert_eq!(board.last_move(), Some((4, 3)));
//! ```

use std::fmt;
use std::str::FromStr;

use engine_core::game_utils::{is_cell_value, is_player};
use engine_core::{GameState, Player, EMPTY, PLAYER_ONE, PLAYER_TWO};
use thiserror::Error;

/// Standard board dimensions
pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const BOARD_SIZE: usize = ROWS * COLS; // 42

/// Discs in a row needed to win
pub const CONNECT: usize = 4;

/// Largest row or column count accepted by [`Board::with_size`]
pub const MAX_DIMENSION: usize = 64;

/// Direction vectors as (row delta, column delta): east, south, south-east, south-west.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Rejected moves. These are ordinary results for callers to inspect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {cols} columns)")]
    ColumnOutOfRange { column: usize, cols: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("invalid player id {0}, expected +1 or -1")]
    InvalidPlayer(Player),
}

/// Errors building a board from external data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board dimensions must be between 1 and {} per side, got {rows}x{cols}", MAX_DIMENSION)]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid cell value {value} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, value: i8 },

    #[error("disc at row {row}, column {col} sits above an empty cell")]
    FloatingDisc { row: usize, col: usize },

    #[error("unexpected character {0:?} in board text")]
    InvalidChar(char),
}

/// Connect 4 position
///
/// Logically immutable: [`Board::apply_move`] returns a new board and leaves
/// `self` untouched, so every search node can own its own snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Row-major cells, row 0 at the top
    cells: Vec<Player>,
    /// (row, column) of the most recent disc, if any
    last_move: Option<(usize, usize)>,
}

impl Board {
    /// Create an empty standard 6x7 board
    pub fn new() -> Self {
        Self {
            rows: ROWS,
            cols: COLS,
            cells: vec![EMPTY; BOARD_SIZE],
            last_move: None,
        }
    }

    /// Create an empty board with custom dimensions.
    ///
    /// Each side must be in `1..=MAX_DIMENSION`.
    pub fn with_size(rows: usize, cols: usize) -> Result<Self, BoardError> {
        let in_range = |n: usize| (1..=MAX_DIMENSION).contains(&n);
        let size = rows
            .checked_mul(cols)
            .filter(|_| in_range(rows) && in_range(cols))
            .ok_or(BoardError::InvalidDimensions { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            cells: vec![EMPTY; size],
            last_move: None,
        })
    }

    /// Build a board from explicit rows (top row first).
    ///
    /// Validates the shape, the cell values and that every disc rests on
    /// another disc or the floor. The last move is unknown and left unset.
    pub fn from_rows(grid: Vec<Vec<Player>>) -> Result<Self, BoardError> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        let mut board = Self::with_size(rows, cols)?;

        for (row, line) in grid.iter().enumerate() {
            if line.len() != cols {
                return Err(BoardError::RaggedRow {
                    row,
                    expected: cols,
                    actual: line.len(),
                });
            }
            for (col, &value) in line.iter().enumerate() {
                if !is_cell_value(value) {
                    return Err(BoardError::InvalidCell { row, col, value });
                }
                board.cells[row * cols + col] = value;
            }
        }

        // A disc may only sit on the floor or on another disc
        for row in 0..rows.saturating_sub(1) {
            for col in 0..cols {
                if board.cell(row, col) != EMPTY && board.cell(row + 1, col) == EMPTY {
                    return Err(BoardError::FloatingDisc { row, col });
                }
            }
        }

        Ok(board)
    }

    #[inline]
    fn pos(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell value at (row, col). Panics if out of bounds.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Player {
        self.cells[self.pos(row, col)]
    }

    /// (row, column) of the most recently dropped disc
    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    /// Column of the most recently dropped disc
    pub fn last_column(&self) -> Option<usize> {
        self.last_move.map(|(_, col)| col)
    }

    /// Number of discs on the board
    pub fn move_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY).count()
    }

    /// Columns whose top cell is empty, in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&col| self.cell(0, col) == EMPTY)
            .collect()
    }

    /// Row a disc dropped in `column` would land in, or `None` if the column
    /// is full or out of range.
    pub fn try_move(&self, column: usize) -> Option<usize> {
        self.landing_row(column).ok()
    }

    /// Like [`Board::try_move`] but says why a column is unavailable.
    pub fn landing_row(&self, column: usize) -> Result<usize, MoveError> {
        if column >= self.cols {
            return Err(MoveError::ColumnOutOfRange {
                column,
                cols: self.cols,
            });
        }
        if self.cell(0, column) != EMPTY {
            return Err(MoveError::ColumnFull(column));
        }

        let row = (0..self.rows)
            .find(|&row| self.cell(row, column) != EMPTY)
            .map_or(self.rows - 1, |occupied| occupied - 1);
        Ok(row)
    }

    /// True iff the top row has no empty cell (board full).
    ///
    /// Independent of [`Board::winner`]: a won board is usually not full.
    pub fn is_terminal(&self) -> bool {
        (0..self.cols).all(|col| self.cell(0, col) != EMPTY)
    }

    /// First player found with four in a row, scanning cells row by row and
    /// checking east, south, south-east and south-west from each disc.
    /// Returns [`EMPTY`] when there is no line.
    pub fn winner(&self) -> Player {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let player = self.cell(row, col);
                if player == EMPTY {
                    continue;
                }
                if DIRECTIONS
                    .iter()
                    .any(|&(dr, dc)| self.line_from(row, col, dr, dc, player))
                {
                    return player;
                }
            }
        }
        EMPTY
    }

    /// Whether the `CONNECT - 1` cells after (row, col) along (dr, dc) all
    /// belong to `player`.
    fn line_from(&self, row: usize, col: usize, dr: isize, dc: isize, player: Player) -> bool {
        (1..CONNECT as isize).all(|step| {
            let r = row as isize + dr * step;
            let c = col as isize + dc * step;
            r >= 0
                && c >= 0
                && (r as usize) < self.rows
                && (c as usize) < self.cols
                && self.cell(r as usize, c as usize) == player
        })
    }

    /// Drop a disc for `player` in `column` and return the new board.
    pub fn apply_move(&self, column: usize, player: Player) -> Result<Board, MoveError> {
        if !is_player(player) {
            return Err(MoveError::InvalidPlayer(player));
        }
        let row = self.landing_row(column)?;

        let mut next = self.clone();
        let pos = next.pos(row, column);
        next.cells[pos] = player;
        next.last_move = Some((row, column));
        Ok(next)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for Board {
    type Move = usize;
    type Error = MoveError;

    fn legal_moves(&self) -> Vec<usize> {
        Board::legal_moves(self)
    }

    fn is_terminal(&self) -> bool {
        Board::is_terminal(self)
    }

    fn winner(&self) -> Player {
        Board::winner(self)
    }

    fn apply_move(&self, column: usize, player: Player) -> Result<Self, MoveError> {
        Board::apply_move(self, column, player)
    }
}

/// Character used for a cell when rendering
fn cell_char(cell: Player) -> char {
    match cell {
        PLAYER_ONE => 'X',
        PLAYER_TWO => 'O',
        _ => '.',
    }
}

impl fmt::Display for Board {
    /// Rows top to bottom, cells separated by spaces: `X` = +1, `O` = -1.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: Vec<String> = (0..self.cols)
                .map(|col| cell_char(self.cell(row, col)).to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse the rendered form. Whitespace inside a line is ignored and blank
    /// lines are skipped, so `Display` output round-trips (minus last move).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let grid = s
            .lines()
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| match c {
                        'X' | 'x' => Ok(PLAYER_ONE),
                        'O' | 'o' => Ok(PLAYER_TWO),
                        '.' => Ok(EMPTY),
                        other => Err(BoardError::InvalidChar(other)),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .filter(|row| !matches!(row, Ok(cells) if cells.is_empty()))
            .collect::<Result<Vec<_>, _>>()?;

        Board::from_rows(grid)
    }
}
