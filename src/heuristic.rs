//! Static evaluation of board positions.
//!
//! Scores are absolute: positive favours `First`, negative favours
//! `Second`. `maximising` names the side the position is being judged for
//! (the player who just moved when called from search) and only affects
//! the tie, fork and tempo shading.
//!
//! Rules are tried in order and the first that applies decides the score:
//! 1. Finished game: tie, or the winner's extreme.
//! 2. One-ply look-ahead over the side to move's replies: a reply that ties,
//!    wins, or builds a corner double threat decides the score outright; a
//!    reply that forms a diagonal fork against a side holding an edge
//!    scores the fork bonus once every reply has been seen.
//! 3. Centre control plus a tempo bonus.

use crate::board::{Board, Outcome};
use crate::constants::{
    CENTER_SCORE, FORK_SCORE, IMMINENT_TIE_SCORE, LOSS_SCORE, TEMPO_SCORE, TIE_SCORE, WIN_SCORE,
};
use crate::patterns::{corner_double_threat, diagonal_fork};
use crate::piece::Piece;

/// Evaluate `board` for the side named by `maximising` (`true` = `First`).
#[must_use]
pub fn evaluate(board: &Board, maximising: bool) -> i32 {
    if let Some(outcome) = board.outcome() {
        return terminal_score(outcome);
    }

    let side = if maximising {
        Piece::First
    } else {
        Piece::Second
    };
    let mover = board.to_move();
    let mut fork = false;

    for (_, child) in board.children() {
        match child.outcome() {
            Some(Outcome::Tie) => return signed(IMMINENT_TIE_SCORE, maximising),
            Some(outcome) => return terminal_score(outcome),
            None => {}
        }
        if corner_double_threat(&child, mover) {
            return decisive(mover);
        }
        if !fork && diagonal_fork(&child) && child.edges().contains(&side) {
            fork = true;
        }
    }

    if fork {
        return signed(FORK_SCORE, maximising);
    }

    let center = match board.center() {
        Some(Piece::First) => CENTER_SCORE,
        Some(Piece::Second) => -CENTER_SCORE,
        _ => 0,
    };
    center + signed(TEMPO_SCORE, maximising)
}

fn terminal_score(outcome: Outcome) -> i32 {
    match outcome {
        Outcome::Tie => TIE_SCORE,
        Outcome::Win(piece) => decisive(piece),
    }
}

/// The extreme score for a forced win by `piece`.
#[inline]
fn decisive(piece: Piece) -> i32 {
    match piece {
        Piece::First => WIN_SCORE,
        Piece::Second => LOSS_SCORE,
        Piece::Empty => TIE_SCORE,
    }
}

#[inline]
fn signed(score: i32, maximising: bool) -> i32 {
    if maximising { score } else { -score }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Piece::{Empty as E, First as X, Second as O};

    fn grid(cols: [[Piece; 3]; 3]) -> Board {
        Board::from_grid(cols.iter().map(|c| c.to_vec()).collect()).unwrap()
    }

    fn played(moves: &[&str]) -> Board {
        let mut board = Board::default();
        for mv in moves {
            board.make_move(mv).unwrap();
        }
        board
    }

    #[test]
    fn test_terminal_scores_are_absolute() {
        let x_wins = grid([[X, X, X], [O, O, E], [E, E, E]]);
        assert_eq!(evaluate(&x_wins, true), WIN_SCORE);
        assert_eq!(evaluate(&x_wins, false), WIN_SCORE);

        let o_wins = grid([[O, X, X], [X, O, O], [E, E, O]]);
        assert_eq!(evaluate(&o_wins, true), LOSS_SCORE);
        assert_eq!(evaluate(&o_wins, false), LOSS_SCORE);

        let tie = grid([[X, O, X], [X, O, O], [O, X, X]]);
        assert_eq!(evaluate(&tie, true), TIE_SCORE);
        assert_eq!(evaluate(&tie, false), TIE_SCORE);
    }

    #[test]
    fn test_empty_board_is_tempo_only() {
        let board = Board::default();
        assert_eq!(evaluate(&board, true), TEMPO_SCORE);
        assert_eq!(evaluate(&board, false), -TEMPO_SCORE);
    }

    #[test]
    fn test_center_bonus() {
        let board = played(&["2,2"]);
        assert_eq!(evaluate(&board, true), CENTER_SCORE + TEMPO_SCORE);
        assert_eq!(evaluate(&board, false), CENTER_SCORE - TEMPO_SCORE);
    }

    #[test]
    fn test_imminent_tie() {
        let board = grid([[X, O, X], [X, O, O], [O, X, E]]);
        assert!(!board.is_game_over());
        assert_eq!(evaluate(&board, true), IMMINENT_TIE_SCORE);
        assert_eq!(evaluate(&board, false), -IMMINENT_TIE_SCORE);
    }

    #[test]
    fn test_winning_reply_decides() {
        // X to move with 1,3 completing the bottom row
        let board = played(&["1,1", "2,1", "1,2", "2,2"]);
        assert_eq!(evaluate(&board, false), WIN_SCORE);

        // O to move with 2,3 completing the middle row
        let board = played(&["1,1", "2,1", "1,2", "2,2", "3,3"]);
        assert_eq!(evaluate(&board, true), LOSS_SCORE);
    }

    #[test]
    fn test_corner_double_threat_reply_decides() {
        // X holds both edges next to the bottom-left corner and can take it
        let board = grid([[E, X, E], [X, O, E], [E, E, O]]);
        assert_eq!(board.to_move(), X);
        assert_eq!(evaluate(&board, false), WIN_SCORE);
    }

    #[test]
    fn test_diagonal_fork_bonus() {
        // O can answer at the top-right corner, making O X O on the main
        // diagonal while X holds the bottom edge.
        let board = grid([[O, E, E], [X, X, E], [E, E, E]])
            .with_to_move(O)
            .unwrap();
        assert_eq!(evaluate(&board, true), FORK_SCORE);

        // Judged for O the fork does not apply: O holds no edge.
        assert_eq!(evaluate(&board, false), CENTER_SCORE - TEMPO_SCORE);
    }

    #[test]
    fn test_win_on_last_cell_is_not_an_imminent_tie() {
        // X filling the last cell completes the main diagonal
        let board = grid([[X, O, X], [O, X, O], [O, X, E]]);
        assert_eq!(board.to_move(), X);
        assert_eq!(evaluate(&board, false), WIN_SCORE);
    }

    #[test]
    fn test_later_win_overrides_earlier_fork() {
        // O's third reply (3,1) makes O X O on the anti-diagonal while X
        // holds an edge, but the last reply (3,3) completes O's column.
        let board = grid([[E, E, E], [X, X, E], [O, O, E]])
            .with_to_move(O)
            .unwrap();
        let mut fork = board.clone();
        fork.make_move("3,1").unwrap();
        assert!(diagonal_fork(&fork));
        assert_eq!(board.legal_moves().last(), Some(&crate::notation::Move::new(3, 3)));

        assert_eq!(evaluate(&board, true), LOSS_SCORE);
    }

    #[test]
    fn test_larger_board_skips_tactics() {
        let board = Board::new(4).unwrap();
        assert_eq!(evaluate(&board, true), TEMPO_SCORE);
    }
}
