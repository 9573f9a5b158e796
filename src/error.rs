//! Error types for board construction, move application, and search.

use derive_more::Display;

use crate::board::Outcome;
use crate::piece::Piece;

/// Reasons a move is rejected. The board is never modified when one of
/// these is returned.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Notation is not two positive integers separated by a comma.
    #[display("Illegal move: {notation:?} is not of the form \"row,col\"")]
    Malformed { notation: String },

    /// A coordinate lies outside `1..=size`.
    #[display("Illegal move: {row},{col} is off a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    /// The target cell already holds a piece.
    #[display("Illegal move: {row},{col} is already taken by {piece}")]
    Occupied { row: usize, col: usize, piece: Piece },

    /// The game has already ended.
    #[display("Illegal move: game is over ({outcome})")]
    GameOver { outcome: Outcome },
}

impl std::error::Error for MoveError {}

/// Reasons a board cannot be built from the given parts.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The requested size is zero or above `max`.
    #[display("board size {size} is not in 1..={max}")]
    BadSize { size: usize, max: usize },

    #[display("grid has no columns")]
    EmptyGrid,

    /// Column `column` has `len` cells where `size` were expected.
    #[display("grid is not square: column {column} has {len} cells, expected {size}")]
    NotSquare {
        column: usize,
        len: usize,
        size: usize,
    },

    #[display("the side to move must be X or O")]
    NoPlayer,
}

impl std::error::Error for BoardError {}

/// Search was asked for a move where none exists. This is a caller bug,
/// not a condition to recover from.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[display("cannot search a finished game ({outcome})")]
    GameOver { outcome: Outcome },

    #[display("no legal moves to search")]
    NoLegalMoves,
}

impl std::error::Error for SearchError {}
