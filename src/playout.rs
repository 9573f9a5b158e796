//! Random games.
//!
//! A playout plays uniformly random legal moves until the game ends. It is
//! the weakest possible opponent and a cheap source of varied positions for
//! exercising the board and the search.

use fastrand::Rng;

use crate::board::{Board, Outcome};
use crate::notation::Move;

/// A uniformly random legal move, or `None` once the game is over.
pub fn random_move(board: &Board, rng: &mut Rng) -> Option<Move> {
    let moves = board.legal_moves();
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}

/// Play random moves on `board` until the game ends and return the result.
pub fn random_playout(board: &mut Board, rng: &mut Rng) -> Option<Outcome> {
    while let Some(mv) = random_move(board, rng) {
        board.play(mv).ok()?;
    }
    board.outcome()
}
