//! Playing whole games: interactive matches and scripted replays.
//!
//! Everything here talks to the board only through `make_move`, `play`,
//! `is_game_over` and the search engine, and reads/writes through generic
//! `BufRead`/`Write` handles so games can be driven from stdin or from a
//! test buffer alike.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use fastrand::Rng;
use tracing::{debug, info, instrument};

use crate::board::{Board, Outcome};
use crate::piece::Piece;
use crate::playout::random_move;
use crate::search::SearchEngine;

/// Who makes the moves for one side.
#[derive(Debug)]
pub enum Seat {
    /// Moves are read from the input, one per line.
    Human,
    Engine(SearchEngine),
    Random(Rng),
}

/// A game between two seats. `X` always moves first.
#[derive(Debug)]
pub struct Match {
    x: Seat,
    o: Seat,
    show_board: bool,
}

impl Match {
    pub fn new(x: Seat, o: Seat) -> Self {
        Self {
            x,
            o,
            show_board: true,
        }
    }

    /// Human against the engine, with the human moving for `human`.
    pub fn against_engine(human: Piece, engine: SearchEngine) -> Self {
        match human {
            Piece::Second => Self::new(Seat::Engine(engine), Seat::Human),
            _ => Self::new(Seat::Human, Seat::Engine(engine)),
        }
    }

    /// Do not render the board after every move.
    pub fn quiet(mut self) -> Self {
        self.show_board = false;
        self
    }

    fn seat(&mut self, piece: Piece) -> &mut Seat {
        match piece {
            Piece::Second => &mut self.o,
            _ => &mut self.x,
        }
    }

    /// Play on `board` until the game ends. Returns `None` if a human's
    /// input runs out first.
    #[instrument(skip_all)]
    pub fn play<R: BufRead, W: Write>(
        &mut self,
        board: &mut Board,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<Outcome>> {
        while !board.is_game_over() {
            let piece = board.to_move();
            match self.seat(piece) {
                Seat::Human => {
                    writeln!(output, "Enter move")?;
                    output.flush()?;
                    let mut line = String::new();
                    if input.read_line(&mut line)? == 0 {
                        info!("input closed before the game ended");
                        return Ok(None);
                    }
                    if let Err(err) = board.make_move(line.trim()) {
                        debug!(%err, "rejected move");
                        writeln!(output, "This move is illegal")?;
                        continue;
                    }
                }
                Seat::Engine(engine) => {
                    let mv = engine.select_move(board)?;
                    board.play(mv)?;
                    writeln!(output, "{piece} plays {mv}")?;
                }
                Seat::Random(rng) => {
                    let Some(mv) = random_move(board, rng) else {
                        break;
                    };
                    board.play(mv)?;
                    writeln!(output, "{piece} plays {mv}")?;
                }
            }
            if self.show_board {
                write!(output, "{board}")?;
            }
        }

        let outcome = board.outcome();
        if let Some(outcome) = outcome {
            writeln!(output, "{}", announcement(outcome))?;
        }
        Ok(outcome)
    }
}

/// End-of-game message.
pub fn announcement(outcome: Outcome) -> String {
    match outcome {
        Outcome::Tie => "Tie Game!!!".to_string(),
        Outcome::Win(piece) => format!("{piece} has won!!!"),
    }
}

/// Interactive mode requested by a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    /// Two humans take over.
    Auto,
    /// A human takes the side to move against the engine.
    Comp,
}

/// Where a script left the game.
#[derive(Debug)]
pub struct Replay {
    pub board: Board,
    pub handoff: Option<Handoff>,
}

/// Replay a game script onto `board`.
///
/// Each line is a move in `row,col` notation, or one of:
/// - `display`: render the board to `output`
/// - `auto` / `comp`: stop and hand the game to an interactive match
///
/// Blank lines and lines starting with `#` are ignored. An illegal move
/// aborts the replay.
#[instrument(skip_all)]
pub fn replay<R: BufRead, W: Write>(mut board: Board, script: R, output: &mut W) -> Result<Replay> {
    for (n, line) in script.lines().enumerate() {
        let line = line.with_context(|| format!("reading script line {}", n + 1))?;
        let line = line.trim();
        match line {
            "" => continue,
            _ if line.starts_with('#') => continue,
            "display" => write!(output, "{board}")?,
            "auto" => {
                return Ok(Replay {
                    board,
                    handoff: Some(Handoff::Auto),
                });
            }
            "comp" => {
                return Ok(Replay {
                    board,
                    handoff: Some(Handoff::Comp),
                });
            }
            mv => board
                .make_move(mv)
                .with_context(|| format!("script line {}", n + 1))?,
        }
    }
    debug!(over = board.is_game_over(), "script finished");
    Ok(Replay {
        board,
        handoff: None,
    })
}
