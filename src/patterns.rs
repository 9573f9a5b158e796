//! Tactical shapes on the 3x3 board.
//!
//! Two shapes are recognised, both of which predict a forced result two
//! moves ahead:
//!
//! ## Corner double threat
//! A player holds a corner and both edge cells next to it, while the two
//! far corners of those lines are still empty. That is two open lines at
//! once, and only one can be blocked.
//!
//! ## Diagonal fork
//! A diagonal reads `X O X` or `O X O`: the outer player has taken opposite
//! corners around the opponent's centre.
//!
//! Shapes are written as 9-character strings, top row first, left to right:
//! - `X`: the player being tested
//! - `.`: empty
//! - `?`: anything
//!
//! Nothing here generalises beyond 3x3; every function returns `false` on
//! other sizes.

use crate::board::Board;
use crate::constants::TACTICAL_SIZE;
use crate::piece::Piece;

/// Corner double threats, one per corner.
const CORNER_SRC: &[&str] = &[
    // top right
    ".XX??X??.",
    // top left
    "XX.X??.??",
    // bottom right
    "??.??X.XX",
    // bottom left
    ".??X??XX.",
];

/// Check one shape for `owner`. Cell `i` of the source maps to column
/// `i % 3` and row `2 - i / 3`.
fn shape_match(board: &Board, src: &str, owner: Piece) -> bool {
    src.bytes().enumerate().all(|(i, ch)| {
        let Some(cell) = board.cell(i % TACTICAL_SIZE, TACTICAL_SIZE - 1 - i / TACTICAL_SIZE)
        else {
            return false;
        };
        match ch {
            b'X' => cell == owner,
            b'.' => cell.is_empty(),
            _ => true,
        }
    })
}

/// True if `owner` has a corner double threat anywhere on the board.
pub fn corner_double_threat(board: &Board, owner: Piece) -> bool {
    if board.size() != TACTICAL_SIZE || owner.is_empty() {
        return false;
    }
    CORNER_SRC.iter().any(|src| shape_match(board, src, owner))
}

/// True if either diagonal reads `X O X` or `O X O`.
pub fn diagonal_fork(board: &Board) -> bool {
    if board.size() != TACTICAL_SIZE {
        return false;
    }
    board.diagonals().iter().any(|diag| match diag.as_slice() {
        [a, b, c] => a == c && !a.is_empty() && *b == a.other(),
        _ => false,
    })
}
