//! Board state for N-in-a-row games.
//!
//! The grid is stored column-major: cell `(col, row)` lives at
//! `col * size + row`, with row 0 at the bottom of the rendered board.
//! The terminal state is cached and refreshed after every successful move,
//! so all terminal queries are plain reads.

use std::fmt;

use derive_more::Display;
use tracing::{debug, trace};

use crate::constants::{DEFAULT_SIZE, MAX_SIZE};
use crate::error::{BoardError, MoveError};
use crate::notation::Move;
use crate::piece::Piece;

/// How a finished game ended.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    #[display("{_0} wins")]
    Win(Piece),
    #[display("tie")]
    Tie,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Piece>,
    to_move: Piece,
    last_mover: Option<Piece>,
    outcome: Option<Outcome>,
}

impl Board {
    /// An empty `size`x`size` board with `First` to move. Sizes outside
    /// `1..=MAX_SIZE` are rejected.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        let cells = check_size(size)?;
        Ok(Self::blank(size, cells))
    }

    fn blank(size: usize, cells: usize) -> Self {
        Self {
            size,
            cells: vec![Piece::Empty; cells],
            to_move: Piece::First,
            last_mover: None,
            outcome: None,
        }
    }

    /// A board in the configuration given by `grid`, indexed
    /// `grid[column][row]`. `First` is to move; use [`Board::with_to_move`]
    /// to change that. A grid that already contains a complete line or is
    /// full starts out terminal.
    pub fn from_grid(grid: Vec<Vec<Piece>>) -> Result<Self, BoardError> {
        let size = grid.len();
        if size == 0 {
            return Err(BoardError::EmptyGrid);
        }
        check_size(size)?;
        if let Some((column, col)) = grid.iter().enumerate().find(|(_, c)| c.len() != size) {
            return Err(BoardError::NotSquare {
                column,
                len: col.len(),
                size,
            });
        }
        let mut board = Self {
            size,
            cells: grid.into_iter().flatten().collect(),
            to_move: Piece::First,
            last_mover: None,
            outcome: None,
        };
        board.refresh_outcome();
        Ok(board)
    }

    /// Set the side to move. Only meaningful before play starts from a
    /// hand-built position.
    pub fn with_to_move(mut self, piece: Piece) -> Result<Self, BoardError> {
        if piece.is_empty() {
            return Err(BoardError::NoPlayer);
        }
        self.to_move = piece;
        Ok(self)
    }

    #[inline]
    fn idx(&self, col: usize, row: usize) -> usize {
        col * self.size + row
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The player who moves next.
    #[inline]
    pub fn to_move(&self) -> Piece {
        self.to_move
    }

    /// The player who made the most recent move on this board, if any.
    #[inline]
    pub fn last_mover(&self) -> Option<Piece> {
        self.last_mover
    }

    /// Piece at 0-based `(col, row)`, or `None` off the board.
    pub fn cell(&self, col: usize, row: usize) -> Option<Piece> {
        if col >= self.size || row >= self.size {
            return None;
        }
        Some(self.cells[self.idx(col, row)])
    }

    /// Piece at the cell a move targets, or `None` off the board.
    pub fn get(&self, mv: Move) -> Option<Piece> {
        mv.to_index(self.size)
            .map(|(col, row)| self.cells[self.idx(col, row)])
    }

    /// Piece on the centre cell; `None` for even sizes.
    pub fn center(&self) -> Option<Piece> {
        if self.size % 2 == 0 {
            return None;
        }
        let mid = self.size / 2;
        self.cell(mid, mid)
    }

    // -------------------------------------------------------------------------
    // Moves
    // -------------------------------------------------------------------------

    /// Validate `mv` against this position and return its grid indices.
    fn check(&self, mv: Move) -> Result<(usize, usize), MoveError> {
        if let Some(outcome) = self.outcome {
            return Err(MoveError::GameOver { outcome });
        }
        let (col, row) = mv.to_index(self.size).ok_or(MoveError::OutOfBounds {
            row: mv.row,
            col: mv.col,
            size: self.size,
        })?;
        let piece = self.cells[self.idx(col, row)];
        if !piece.is_empty() {
            return Err(MoveError::Occupied {
                row: mv.row,
                col: mv.col,
                piece,
            });
        }
        Ok((col, row))
    }

    /// True iff `notation` is well formed, on the board, targets an empty
    /// cell, and the game is still running.
    pub fn is_legal(&self, notation: &str) -> bool {
        notation
            .parse::<Move>()
            .is_ok_and(|mv| self.check(mv).is_ok())
    }

    /// Parse and apply a move written as `"row,col"`.
    pub fn make_move(&mut self, notation: &str) -> Result<(), MoveError> {
        let mv = notation.parse::<Move>()?;
        self.play(mv)
    }

    /// Place the side to move at `mv` and pass the turn.
    pub fn play(&mut self, mv: Move) -> Result<(), MoveError> {
        let (col, row) = self.check(mv)?;
        self.place(col, row);
        Ok(())
    }

    /// Apply a move already known to be legal.
    pub(crate) fn place(&mut self, col: usize, row: usize) {
        let idx = self.idx(col, row);
        debug_assert!(self.outcome.is_none() && self.cells[idx].is_empty());
        let mover = self.to_move;
        self.cells[idx] = mover;
        self.last_mover = Some(mover);
        self.to_move = mover.other();
        trace!(player = %mover, mv = %Move::from_index(col, row), "placed");
        self.refresh_outcome();
    }

    /// Every empty cell, scanning columns left to right and, within a
    /// column, rows bottom to top. Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        let mut moves = Vec::with_capacity(self.cells.len());
        for col in 0..self.size {
            for row in 0..self.size {
                if self.cells[self.idx(col, row)].is_empty() {
                    moves.push(Move::from_index(col, row));
                }
            }
        }
        moves
    }

    /// Each legal move with the position it leads to, in
    /// [`Board::legal_moves`] order.
    pub(crate) fn children(&self) -> impl Iterator<Item = (Move, Board)> + '_ {
        let n = self.size;
        let open = self.outcome.is_none();
        (0..n)
            .flat_map(move |col| (0..n).map(move |row| (col, row)))
            .filter(move |&(col, row)| open && self.cells[self.idx(col, row)].is_empty())
            .map(move |(col, row)| {
                let mut child = self.clone();
                child.place(col, row);
                (Move::from_index(col, row), child)
            })
    }

    // -------------------------------------------------------------------------
    // Terminal state
    // -------------------------------------------------------------------------

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[inline]
    pub fn winner(&self) -> Option<Piece> {
        match self.outcome {
            Some(Outcome::Win(piece)) => Some(piece),
            _ => None,
        }
    }

    #[inline]
    pub fn in_tie(&self) -> bool {
        self.outcome == Some(Outcome::Tie)
    }

    /// Recompute the cached outcome. Lines are checked rows first, then
    /// columns, then the two diagonals; a full board without a line is a
    /// tie. A recorded outcome is never replaced.
    fn refresh_outcome(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        let n = self.size;
        let winner = (0..n)
            .find_map(|row| self.line_winner((0..n).map(|col| (col, row))))
            .or_else(|| (0..n).find_map(|col| self.line_winner((0..n).map(|row| (col, row)))))
            .or_else(|| self.line_winner((0..n).map(|i| (i, i))))
            .or_else(|| self.line_winner((0..n).map(|i| (i, n - 1 - i))));

        self.outcome = match winner {
            Some(piece) => {
                debug_assert!(self.last_mover.is_none_or(|m| m == piece));
                Some(Outcome::Win(piece))
            }
            None if self.empty_count() == 0 => Some(Outcome::Tie),
            None => None,
        };
        if let Some(outcome) = self.outcome {
            debug!(%outcome, "game over");
        }
    }

    /// The piece filling every cell of a line, if one does.
    fn line_winner(&self, mut line: impl Iterator<Item = (usize, usize)>) -> Option<Piece> {
        let (col, row) = line.next()?;
        let first = self.cells[self.idx(col, row)];
        if first.is_empty() {
            return None;
        }
        line.all(|(c, r)| self.cells[self.idx(c, r)] == first)
            .then_some(first)
    }

    // -------------------------------------------------------------------------
    // Lines
    // -------------------------------------------------------------------------

    /// Row `row` (0-based, bottom first), left to right.
    pub fn row(&self, row: usize) -> Option<Vec<Piece>> {
        (row < self.size).then(|| {
            (0..self.size)
                .map(|col| self.cells[self.idx(col, row)])
                .collect()
        })
    }

    /// Column `col` (0-based, left first), bottom to top.
    pub fn column(&self, col: usize) -> Option<Vec<Piece>> {
        (col < self.size).then(|| {
            let start = self.idx(col, 0);
            self.cells[start..start + self.size].to_vec()
        })
    }

    /// The main diagonal `(i, i)` and the anti-diagonal `(i, size-1-i)`,
    /// both ordered by column.
    pub fn diagonals(&self) -> [Vec<Piece>; 2] {
        let n = self.size;
        [
            (0..n).map(|i| self.cells[self.idx(i, i)]).collect(),
            (0..n).map(|i| self.cells[self.idx(i, n - 1 - i)]).collect(),
        ]
    }

    /// Border cells that are not corners, in column-major order. On a 3x3
    /// board these are the four edge midpoints.
    pub fn edges(&self) -> Vec<Piece> {
        let last = self.size.saturating_sub(1);
        let mut edges = Vec::new();
        for col in 0..self.size {
            for row in 0..self.size {
                let on_border = col == 0 || col == last || row == 0 || row == last;
                let is_corner = (col == 0 || col == last) && (row == 0 || row == last);
                if on_border && !is_corner {
                    edges.push(self.cells[self.idx(col, row)]);
                }
            }
        }
        edges
    }

    /// True if no piece has been placed.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|p| p.is_empty())
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|p| p.is_empty()).count()
    }
}

/// Cell count of a `size`x`size` board, if that size is allowed.
fn check_size(size: usize) -> Result<usize, BoardError> {
    let bad = BoardError::BadSize {
        size,
        max: MAX_SIZE,
    };
    if !(1..=MAX_SIZE).contains(&size) {
        return Err(bad);
    }
    size.checked_mul(size).ok_or(bad)
}

impl Default for Board {
    fn default() -> Self {
        Self::blank(DEFAULT_SIZE, DEFAULT_SIZE * DEFAULT_SIZE)
    }
}

/// Top row first, each cell framed by `|`, rows separated by dashes.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(2 * self.size + 1);
        writeln!(f, "{rule}")?;
        for row in (0..self.size).rev() {
            for col in 0..self.size {
                write!(f, "|{}", self.cells[self.idx(col, row)].abbrev())?;
            }
            writeln!(f, "|")?;
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Piece::{Empty as E, First as X, Second as O};

    fn grid(cols: [[Piece; 3]; 3]) -> Board {
        Board::from_grid(cols.iter().map(|c| c.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        assert_eq!(board.size(), 3);
        assert!(board.is_empty());
        assert_eq!(board.empty_count(), 9);
        assert_eq!(board.to_move(), X);
        assert_eq!(board.last_mover(), None);
        assert!(!board.is_game_over());
    }

    #[test]
    fn test_make_move_places_and_toggles() {
        let mut board = Board::default();
        board.make_move("1,2").unwrap();
        assert_eq!(board.cell(1, 0), Some(X));
        assert_eq!(board.get(Move::new(1, 2)), Some(X));
        assert_eq!(board.to_move(), O);
        assert_eq!(board.last_mover(), Some(X));

        board.make_move("3,3").unwrap();
        assert_eq!(board.cell(2, 2), Some(O));
        assert_eq!(board.to_move(), X);
        assert_eq!(board.empty_count(), 7);
    }

    #[test]
    fn test_illegal_moves_leave_board_unchanged() {
        let mut board = Board::default();
        board.make_move("2,2").unwrap();
        let before = board.clone();

        assert!(matches!(
            board.make_move("2,2"),
            Err(MoveError::Occupied { row: 2, col: 2, piece: X })
        ));
        assert!(matches!(
            board.make_move("4,1"),
            Err(MoveError::OutOfBounds { row: 4, col: 1, size: 3 })
        ));
        assert!(matches!(
            board.make_move("hello"),
            Err(MoveError::Malformed { .. })
        ));
        assert_eq!(board, before);
    }

    #[test]
    fn test_is_legal() {
        let mut board = Board::default();
        board.make_move("1,1").unwrap();
        assert!(!board.is_legal("1,1"));
        assert!(!board.is_legal("0,1"));
        assert!(!board.is_legal("3,4"));
        assert!(!board.is_legal("1,1,"));
        assert!(board.is_legal("3,3"));
    }

    #[test]
    fn test_legal_moves_scan_order() {
        let board = grid([[X, O, E], [X, X, O], [O, E, O]]);
        let moves: Vec<String> = board.legal_moves().iter().map(|m| m.to_string()).collect();
        assert_eq!(moves, ["3,1", "2,3"]);

        let moves: Vec<String> = Board::default()
            .legal_moves()
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(
            moves,
            ["1,1", "2,1", "3,1", "1,2", "2,2", "3,2", "1,3", "2,3", "3,3"]
        );
    }

    #[test]
    fn test_children_follow_legal_moves() {
        let board = grid([[X, O, E], [X, X, O], [O, E, O]])
            .with_to_move(O)
            .unwrap();
        let children: Vec<(Move, Board)> = board.children().collect();
        let moves: Vec<Move> = children.iter().map(|(mv, _)| *mv).collect();
        assert_eq!(moves, board.legal_moves());

        for (mv, child) in &children {
            let mut expected = board.clone();
            expected.play(*mv).unwrap();
            assert_eq!(child, &expected);
        }

        let finished = grid([[X, X, X], [O, O, E], [E, E, E]]);
        assert_eq!(finished.children().count(), 0);
    }

    #[test]
    fn test_row_win() {
        let mut board = Board::default();
        for mv in ["1,1", "2,1", "1,2", "2,2", "1,3"] {
            board.make_move(mv).unwrap();
        }
        assert!(board.is_game_over());
        assert_eq!(board.winner(), Some(X));
        assert!(!board.in_tie());
    }

    #[test]
    fn test_column_win() {
        let board = grid([[X, X, X], [O, O, E], [E, E, E]]);
        assert!(board.is_game_over());
        assert_eq!(board.winner(), Some(X));
        assert!(!board.in_tie());
    }

    #[test]
    fn test_diagonal_wins() {
        let main = grid([[O, X, X], [X, O, O], [E, E, O]]);
        assert_eq!(main.winner(), Some(O));

        let anti = grid([[E, O, X], [E, X, O], [X, E, E]]);
        assert_eq!(anti.winner(), Some(X));
    }

    #[test]
    fn test_tie() {
        let board = grid([[X, O, X], [X, O, O], [O, X, X]]);
        assert!(board.is_game_over());
        assert!(board.in_tie());
        assert_eq!(board.winner(), None);
        assert_eq!(board.outcome(), Some(Outcome::Tie));
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_tie() {
        let mut board = grid([[X, O, X], [O, X, O], [O, X, E]]);
        board.make_move("3,3").unwrap();
        assert_eq!(board.winner(), Some(X));
        assert!(!board.in_tie());
    }

    #[test]
    fn test_terminal_is_absorbing() {
        let mut board = Board::default();
        for mv in ["1,1", "2,1", "1,2", "2,2", "1,3"] {
            board.make_move(mv).unwrap();
        }
        let to_move = board.to_move();
        for _ in 0..3 {
            assert!(board.is_game_over());
            assert_eq!(board.winner(), Some(X));
            assert_eq!(board.to_move(), to_move);
        }
        assert_eq!(
            board.make_move("3,3"),
            Err(MoveError::GameOver {
                outcome: Outcome::Win(X)
            })
        );
        assert!(!board.is_legal("3,3"));
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::default();
        let mut copy = board.clone();
        copy.make_move("2,2").unwrap();
        assert!(board.is_empty());
        assert_eq!(board.to_move(), X);
        assert_eq!(copy.cell(1, 1), Some(X));
    }

    #[test]
    fn test_from_grid_validation() {
        assert_eq!(Board::from_grid(vec![]), Err(BoardError::EmptyGrid));
        assert_eq!(
            Board::from_grid(vec![vec![E, E], vec![E]]),
            Err(BoardError::NotSquare {
                column: 1,
                len: 1,
                size: 2
            })
        );
    }

    #[test]
    fn test_size_limits() {
        assert_eq!(Board::new(0), Err(BoardError::BadSize { size: 0, max: MAX_SIZE }));
        assert_eq!(
            Board::new(MAX_SIZE + 1),
            Err(BoardError::BadSize {
                size: MAX_SIZE + 1,
                max: MAX_SIZE
            })
        );
        // would overflow the cell count
        assert!(Board::new(usize::MAX / 2).is_err());
        assert!(Board::new(usize::MAX).is_err());

        let board = Board::new(MAX_SIZE).unwrap();
        assert_eq!(board.empty_count(), MAX_SIZE * MAX_SIZE);
        assert_eq!(Board::new(1).unwrap().legal_moves().len(), 1);
        assert_eq!(Board::new(DEFAULT_SIZE), Ok(Board::default()));
    }

    #[test]
    fn test_with_to_move() {
        let board = Board::default().with_to_move(O).unwrap();
        assert_eq!(board.to_move(), O);
        assert_eq!(
            Board::default().with_to_move(E),
            Err(BoardError::NoPlayer)
        );
    }

    #[test]
    fn test_lines() {
        let board = grid([[X, O, E], [X, X, O], [O, E, O]]);
        assert_eq!(board.column(0), Some(vec![X, O, E]));
        assert_eq!(board.row(0), Some(vec![X, X, O]));
        assert_eq!(board.row(2), Some(vec![E, O, O]));
        assert_eq!(board.row(3), None);
        assert_eq!(board.diagonals(), [vec![X, X, O], vec![E, X, O]]);
        assert_eq!(board.edges(), vec![O, X, O, E]);
        assert_eq!(board.center(), Some(X));
    }

    #[test]
    fn test_larger_board() {
        let mut board = Board::new(4).unwrap();
        assert_eq!(board.legal_moves().len(), 16);
        assert_eq!(board.edges().len(), 8);
        assert_eq!(board.center(), None);
        for mv in ["1,1", "2,1", "1,2", "2,2", "1,3", "2,3"] {
            board.make_move(mv).unwrap();
        }
        assert!(!board.is_game_over());
        board.make_move("1,4").unwrap();
        assert_eq!(board.winner(), Some(X));
    }

    #[test]
    fn test_display() {
        let mut board = Board::default();
        board.make_move("1,1").unwrap();
        board.make_move("3,3").unwrap();
        let expected = "\
-------
| | |O|
-------
| | | |
-------
|X| | |
-------
";
        assert_eq!(board.to_string(), expected);
    }
}
