//! Depth-bounded minimax with alpha-beta pruning.
//!
//! `First` maximises and `Second` minimises. Every child is explored on its
//! own copy of the board, and each call returns both its score and the move
//! that produced it, so nothing is shared between sibling searches.
//!
//! Move choice is stable: children are tried in [`Board::legal_moves`] order
//! and only a strictly better score replaces the current best. When no child
//! improves on the bound the node was entered with (every reply scores the
//! same forced loss, for instance) the first legal move is reported.
//!
//! # Example
//!
//! ```
//! use tictac::{Board, SearchEngine};
//!
//! let mut board = Board::default();
//! board.make_move("2,2").unwrap();
//!
//! let engine = SearchEngine::new(2);
//! let reply = engine.select_move(&board).unwrap();
//! board.play(reply).unwrap();
//! ```

use tracing::{debug, instrument};

use crate::board::Board;
use crate::constants::{DEFAULT_DEPTH, LOSS_SCORE, WIN_SCORE};
use crate::error::SearchError;
use crate::heuristic::evaluate;
use crate::notation::Move;
use crate::piece::Piece;

/// The move chosen at the root and what the search thinks of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Minimax score of `best_move`, absolute (positive favours `First`).
    pub score: i32,
    /// Positions visited, root included.
    pub nodes: u64,
}

/// Score and chosen move of one node.
#[derive(Debug, Clone, Copy)]
struct Node {
    score: i32,
    best_move: Option<Move>,
}

/// Minimax searcher with a fixed depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchEngine {
    depth: u32,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl SearchEngine {
    /// A searcher looking `depth` plies ahead. Depth 0 is treated as 1 so
    /// that a move is always chosen by search rather than by default.
    pub fn new(depth: u32) -> Self {
        Self {
            depth: depth.max(1),
        }
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Search `board` and return the best move for the side to move.
    #[instrument(skip(self, board), fields(depth = self.depth, to_move = %board.to_move()))]
    pub fn search(&self, board: &Board) -> Result<SearchResult, SearchError> {
        if let Some(outcome) = board.outcome() {
            return Err(SearchError::GameOver { outcome });
        }
        let moves = board.legal_moves();
        let Some(&first) = moves.first() else {
            return Err(SearchError::NoLegalMoves);
        };

        let mut nodes = 0;
        let root = minimax(board, self.depth, LOSS_SCORE, WIN_SCORE, &mut nodes);
        let result = SearchResult {
            best_move: root.best_move.unwrap_or(first),
            score: root.score,
            nodes,
        };
        debug!(
            best = %result.best_move,
            score = result.score,
            nodes = result.nodes,
            "search complete"
        );
        Ok(result)
    }

    /// The best move for the side to move.
    pub fn select_move(&self, board: &Board) -> Result<Move, SearchError> {
        self.search(board).map(|r| r.best_move)
    }
}

/// Shorthand for `SearchEngine::new(depth).select_move(board)`.
pub fn select_move(board: &Board, depth: u32) -> Result<Move, SearchError> {
    SearchEngine::new(depth).select_move(board)
}

/// One node of the search. Leaves are scored for the player who moved
/// into them, i.e. the parent's side.
fn minimax(board: &Board, depth: u32, mut alpha: i32, mut beta: i32, nodes: &mut u64) -> Node {
    *nodes += 1;
    let maximising = board.to_move() == Piece::First;

    if depth == 0 || board.is_game_over() {
        return Node {
            score: evaluate(board, !maximising),
            best_move: None,
        };
    }

    let mut best = Node {
        score: if maximising { alpha } else { beta },
        best_move: None,
    };
    let mut first = None;

    for (mv, child) in board.children() {
        first.get_or_insert(mv);
        let score = minimax(&child, depth - 1, alpha, beta, nodes).score;

        if maximising {
            if score > best.score {
                best = Node {
                    score,
                    best_move: Some(mv),
                };
                alpha = alpha.max(score);
            }
        } else if score < best.score {
            best = Node {
                score,
                best_move: Some(mv),
            };
            beta = beta.min(score);
        }

        if alpha >= beta {
            break;
        }
    }

    if best.best_move.is_none() {
        best.best_move = first;
    }
    best
}
