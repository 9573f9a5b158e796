//! Board defaults, search parameters, and evaluation weights.
//!
//! The evaluation weights are hand-tuned and shape which move the engine
//! picks at shallow depth. Changing any of them changes engine output.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). Standard tic-tac-toe is 3.
pub const DEFAULT_SIZE: usize = 3;

/// Largest board accepted. Search cost grows with the cell count, and
/// anything bigger is out of reach for the engine.
pub const MAX_SIZE: usize = 32;

/// Board size the tactical patterns are written for.
pub const TACTICAL_SIZE: usize = 3;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default search depth in plies: one ply of real search plus heuristic
/// evaluation of the resulting positions.
pub const DEFAULT_DEPTH: u32 = 1;

/// Depth that reaches the end of any game on the default board.
pub const FULL_DEPTH: u32 = (DEFAULT_SIZE * DEFAULT_SIZE) as u32;

// =============================================================================
// Evaluation Scores
// =============================================================================

/// Score of a forced win for the first player (the maximising side).
pub const WIN_SCORE: i32 = i32::MAX;

/// Score of a forced win for the second player (the minimising side).
pub const LOSS_SCORE: i32 = i32::MIN;

/// Score of a finished tie.
pub const TIE_SCORE: i32 = 0;

/// Shading when a single reply ends the game in a tie.
pub const IMMINENT_TIE_SCORE: i32 = 30;

/// Shading when a reply sets up a diagonal fork.
pub const FORK_SCORE: i32 = 100;

/// Bonus for holding the centre cell.
pub const CENTER_SCORE: i32 = 50;

/// Tempo bonus for the side the position is evaluated for.
pub const TEMPO_SCORE: i32 = 20;

// =============================================================================
// Engine Identity
// =============================================================================

/// Name reported by the command session.
pub const ENGINE_NAME: &str = "tictac-rust";
