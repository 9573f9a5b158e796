//! Textual move notation.
//!
//! A move is written `"row,col"`: two positive decimal integers separated by
//! a single comma, 1-indexed, with no other characters. Row 1 is the bottom
//! row of the rendered board and column 1 the leftmost column.

use std::fmt;
use std::str::FromStr;

use crate::error::MoveError;

/// A target cell in 1-indexed `row,col` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Build a move from 0-based `(column, row)` grid indices.
    #[inline]
    pub(crate) fn from_index(col: usize, row: usize) -> Self {
        Self {
            row: row + 1,
            col: col + 1,
        }
    }

    /// 0-based `(column, row)` grid indices, or `None` when either
    /// coordinate is outside `1..=size`.
    #[inline]
    pub(crate) fn to_index(self, size: usize) -> Option<(usize, usize)> {
        if (1..=size).contains(&self.row) && (1..=size).contains(&self.col) {
            Some((self.col - 1, self.row - 1))
        } else {
            None
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || MoveError::Malformed {
            notation: s.to_string(),
        };
        let (row, col) = s.split_once(',').ok_or_else(malformed)?;
        let row = parse_coordinate(row).ok_or_else(malformed)?;
        let col = parse_coordinate(col).ok_or_else(malformed)?;
        Ok(Move { row, col })
    }
}

/// Digits only (no sign, no whitespace), value at least 1.
fn parse_coordinate(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<usize>().ok().filter(|&v| v >= 1)
}
