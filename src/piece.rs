//! The marks that can occupy a cell.

use derive_more::Display;

/// A cell's content: one of the two players' marks, or nothing.
///
/// `First` always opens the game and is the maximising side in search.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    #[display("X")]
    First,
    #[display("O")]
    Second,
    #[display(" ")]
    Empty,
}

impl Piece {
    /// One-character denotation used by the board renderer.
    #[inline]
    pub fn abbrev(self) -> &'static str {
        match self {
            Piece::First => "X",
            Piece::Second => "O",
            Piece::Empty => " ",
        }
    }

    /// The opposing player. `Empty` has no opponent and maps to itself.
    #[inline]
    pub fn other(self) -> Piece {
        match self {
            Piece::First => Piece::Second,
            Piece::Second => Piece::First,
            Piece::Empty => Piece::Empty,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Piece::Empty
    }

    /// Parse an abbreviation back into a piece (case-insensitive; `.` and
    /// space are both empty).
    pub fn from_abbrev(c: char) -> Option<Piece> {
        match c.to_ascii_uppercase() {
            'X' => Some(Piece::First),
            'O' => Some(Piece::Second),
            ' ' | '.' => Some(Piece::Empty),
            _ => None,
        }
    }
}
