//! Tictac-Rust: an N-in-a-row game engine with minimax search.
//!
//! The crate models tic-tac-toe style games on an NxN board (3x3 by
//! default) and picks moves with depth-bounded minimax, alpha-beta pruning,
//! and a hand-tuned positional heuristic.
//!
//! ## Modules
//!
//! - [`piece`] - The marks that fill cells
//! - [`notation`] - `row,col` move notation
//! - [`board`] - Game state, move legality, terminal detection
//! - [`patterns`] - 3x3 tactical shapes
//! - [`heuristic`] - Static position evaluation
//! - [`search`] - Minimax with alpha-beta pruning
//! - [`playout`] - Random moves and random games
//! - [`game`] - Interactive matches and scripted replays
//! - [`session`] - Line-oriented command protocol
//! - [`constants`] - Defaults and evaluation weights
//!
//! ## Example
//!
//! ```
//! use tictac::{Board, SearchEngine};
//!
//! // Create a new game and play the centre
//! let mut board = Board::default();
//! board.make_move("2,2").unwrap();
//!
//! // Let the engine answer
//! let reply = SearchEngine::default().select_move(&board).unwrap();
//! board.play(reply).unwrap();
//! println!("O plays {reply}\n{board}");
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod heuristic;
pub mod notation;
pub mod patterns;
pub mod piece;
pub mod playout;
pub mod search;
pub mod session;

pub use board::{Board, Outcome};
pub use error::{BoardError, MoveError, SearchError};
pub use notation::Move;
pub use piece::Piece;
pub use search::{SearchEngine, SearchResult, select_move};
