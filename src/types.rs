use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::board::BOARD_SIZE;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    fn not(self) -> Self {
        self.opponent()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => f.write_str("Black"),
            Self::White => f.write_str("White"),
        }
    }
}

/// Contents of a single square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum CellState {
    #[default]
    Empty,
    Black,
    White,
}

impl CellState {
    /// Wire encoding used by the JS side: 0=empty, 1=black, 2=white.
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Black => 1,
            Self::White => 2,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }
}

impl From<Player> for CellState {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Self::Black,
            Player::White => Self::White,
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Returns `None` when either coordinate is outside `0..8`.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }
}

/// Algebraic notation: column letter then 1-based row ("d3").
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = (b'a' + self.col) as char;
        write!(f, "{col}{}", self.row + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid position notation: {0:?}")]
pub struct ParsePositionError(pub String);

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError(s.to_string());
        let mut chars = s.chars();
        let col = chars.next().ok_or_else(err)?.to_ascii_lowercase();
        let row = chars.next().ok_or_else(err)?.to_digit(10).ok_or_else(err)?;
        if chars.next().is_some() || !col.is_ascii_lowercase() || row == 0 {
            return Err(err());
        }

        Position::new(row as u8 - 1, col as u8 - b'a').ok_or_else(err)
    }
}

/// Number of stones of each color on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoneCount {
    pub black: u8,
    pub white: u8,
}

impl StoneCount {
    pub fn empty(self) -> u8 {
        (BOARD_SIZE * BOARD_SIZE) as u8 - self.black - self.white
    }

    /// Decides the final result: more stones wins, equal counts draw.
    pub fn outcome(self) -> Outcome {
        if self.black > self.white {
            Outcome::Winner(Player::Black)
        } else if self.white > self.black {
            Outcome::Winner(Player::White)
        } else {
            Outcome::Draw
        }
    }
}

/// Final result, fixed when the game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

/// Public status returned to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Status {
    pub current_player: Player,
    pub active: bool,
    /// Contract:
    /// - `None` while the game is running.
    /// - `Some(_)` once the game is over; never changes until reset.
    pub winner: Option<Outcome>,
    pub black_count: u8,
    pub white_count: u8,
}
