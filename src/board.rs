use std::fmt;
use std::str::FromStr;

use crate::types::{CellState, StoneCount};

pub const BOARD_SIZE: usize = 8;
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// 8x8 grid of cell states, indexed `[row][col]`.
pub type Cells = [[CellState; BOARD_SIZE]; BOARD_SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("coordinates out of range: ({row}, {col})")]
    OutOfBounds { row: usize, col: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected 8 rows, got {0}")]
    RowCount(usize),

    #[error("row {row}: expected 8 cells, got {len}")]
    RowLength { row: usize, len: usize },

    #[error("row {row}: unexpected character {ch:?}")]
    InvalidCell { row: usize, ch: char },
}

/// Reversi board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Cells,
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        let mut cells = [[CellState::Empty; BOARD_SIZE]; BOARD_SIZE];
        cells[3][3] = CellState::White;
        cells[3][4] = CellState::Black;
        cells[4][3] = CellState::Black;
        cells[4][4] = CellState::White;
        Self { cells }
    }

    /// A board with no stones at all.
    pub fn empty() -> Self {
        Self::from_cells([[CellState::Empty; BOARD_SIZE]; BOARD_SIZE])
    }

    pub fn from_cells(cells: Cells) -> Self {
        Self { cells }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<CellState, BoardError> {
        check_bounds(row, col)?;
        Ok(self.cells[row][col])
    }

    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<(), BoardError> {
        check_bounds(row, col)?;
        self.cells[row][col] = state;
        Ok(())
    }

    pub fn count_stones(&self) -> StoneCount {
        self.cells
            .iter()
            .flatten()
            .fold(StoneCount::default(), |mut count, cell| {
                match cell {
                    CellState::Black => count.black += 1,
                    CellState::White => count.white += 1,
                    CellState::Empty => {}
                }
                count
            })
    }

    /// Returns a copy of the grid.
    pub fn cells(&self) -> Cells {
        self.cells
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_CELLS] {
        let mut board = [0u8; NUM_CELLS];
        for (out, cell) in board.iter_mut().zip(self.cells.iter().flatten()) {
            *out = cell.to_u8();
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{}", row + 1)?;
            for cell in cells {
                let ch = match cell {
                    CellState::Empty => '.',
                    CellState::Black => 'B',
                    CellState::White => 'W',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the grid printed by `Display`. The column header and row labels are optional.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| line.split_whitespace().collect::<String>() != "abcdefgh")
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(ParseBoardError::RowCount(rows.len()));
        }

        let mut cells = [[CellState::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in rows.iter().enumerate() {
            let line = line.trim_start_matches(|c: char| c.is_ascii_digit());
            let mut len = 0;
            for ch in line.chars().filter(|c| !c.is_whitespace()) {
                let cell = match ch {
                    '.' => CellState::Empty,
                    'B' | 'b' | 'X' | 'x' => CellState::Black,
                    'W' | 'w' | 'O' | 'o' => CellState::White,
                    _ => return Err(ParseBoardError::InvalidCell { row, ch }),
                };
                if len < BOARD_SIZE {
                    cells[row][len] = cell;
                }
                len += 1;
            }
            if len != BOARD_SIZE {
                return Err(ParseBoardError::RowLength { row, len });
            }
        }

        Ok(Self { cells })
    }
}

pub(crate) fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

fn check_bounds(row: usize, col: usize) -> Result<(), BoardError> {
    if row < BOARD_SIZE && col < BOARD_SIZE {
        Ok(())
    } else {
        Err(BoardError::OutOfBounds { row, col })
    }
}
