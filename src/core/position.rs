//! Board coordinates.
//!
//! A `Position` is a validated (row, column) pair on the 8x8 board. Rows are
//! zero-based from SOUTH's edge; columns are zero-based from file A.
//!
//! ## Algebraic notation
//!
//! Squares are written as a file letter followed by a 1-based rank:
//!
//! ```
//! use sa_jin::core::Position;
//!
//! let pos: Position = "b2".parse().unwrap();
//! assert_eq!((pos.row(), pos.col()), (1, 1));
//! assert_eq!(pos.to_algebraic(), "B2");
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::{ActionErrorKind, ActionResult, IllegalAction};
use super::side::PlayerSide;

/// Width and height of the board.
pub const BOARD_SIZE: u8 = 8;

/// A square on the board. Always in bounds, including when decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    row: u8,
    col: u8,
}

/// Wire form of a `Position` before the bounds check.
#[derive(Deserialize)]
struct RawPosition {
    row: u8,
    col: u8,
}

impl TryFrom<RawPosition> for Position {
    type Error = IllegalAction;

    fn try_from(raw: RawPosition) -> ActionResult<Self> {
        Self::new(i32::from(raw.row), i32::from(raw.col))
    }
}

impl Position {
    /// Create a position, failing with `OutOfBounds` outside `0..8`.
    pub fn new(row: i32, col: i32) -> ActionResult<Self> {
        Self::checked(row, col).ok_or_else(|| {
            IllegalAction::new(
                ActionErrorKind::OutOfBounds,
                format!("Position out of bounds: {row}, {col}"),
            )
        })
    }

    fn checked(row: i32, col: i32) -> Option<Self> {
        let size = i32::from(BOARD_SIZE);
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Zero-based row.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Zero-based column.
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// The square offset by (`d_row`, `d_col`), or `None` if it falls off the board.
    #[must_use]
    pub fn translate(self, d_row: i32, d_col: i32) -> Option<Self> {
        Self::checked(i32::from(self.row) + d_row, i32::from(self.col) + d_col)
    }

    /// King-move distance between two squares.
    #[must_use]
    pub fn chebyshev_distance(self, other: Position) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// Check if the squares share a row or a column.
    #[must_use]
    pub fn is_aligned_with(self, other: Position) -> bool {
        self.row == other.row || self.col == other.col
    }

    /// Parse a file letter (any case) followed by a 1-based rank.
    pub fn from_algebraic(label: &str) -> ActionResult<Self> {
        let invalid = || {
            IllegalAction::new(
                ActionErrorKind::InvalidCoordinate,
                format!("Invalid coordinate {label:?}"),
            )
        };

        let mut chars = label.chars();
        let file = chars.next().ok_or_else(invalid)?;
        if !file.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let rank: i32 = chars.as_str().parse().map_err(|_| invalid())?;
        let col = i32::from(file.to_ascii_uppercase() as u8) - i32::from(b'A');

        Self::checked(rank - 1, col).ok_or_else(|| {
            IllegalAction::new(
                ActionErrorKind::InvalidCoordinate,
                format!("Coordinate {label:?} is outside the board"),
            )
        })
    }

    /// Algebraic label, e.g. `B2`.
    #[must_use]
    pub fn to_algebraic(self) -> String {
        self.to_string()
    }

    /// Every square on the board, row-major.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'A' + self.col) as char, self.row + 1)
    }
}

impl FromStr for Position {
    type Err = IllegalAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s.trim())
    }
}

/// Lazy iterator over one side's 32 home squares, row-major.
///
/// Clone it before consuming, or call [`iter_half_board`] again, to replay.
#[derive(Clone, Debug)]
pub struct HalfBoard {
    next: u16,
    end: u16,
}

impl Iterator for HalfBoard {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(Position {
            row: (index / u16::from(BOARD_SIZE)) as u8,
            col: (index % u16::from(BOARD_SIZE)) as u8,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.end.saturating_sub(self.next));
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for HalfBoard {}

/// All squares on `side`'s home rows.
#[must_use]
pub fn iter_half_board(side: PlayerSide) -> HalfBoard {
    let rows = side.home_rows();
    let width = u16::from(BOARD_SIZE);
    HalfBoard {
        next: u16::from(rows.start) * width,
        end: u16::from(rows.end) * width,
    }
}
