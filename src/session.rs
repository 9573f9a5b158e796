//! Line-oriented command session.
//!
//! A small GTP-style protocol so the engine can be driven by another
//! program. Each command line may start with a numeric id; replies are
//! `=id message` on success and `?id message` on failure, followed by a
//! blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <n>` - start a fresh n x n game
//! - `clear_board` - start a fresh game at the current size
//! - `depth <plies>` - set the engine's search depth
//! - `play [x|o] <row,col>` - play a move for the side to move
//! - `genmove [x|o]` - let the engine move for the side to move
//! - `legal_moves` - list the legal moves, space separated
//! - `showboard` - render the board
//! - `status` - `X to move`, `X wins`, `O wins` or `tie`
//!
//! ## Example
//!
//! ```ignore
//! use tictac::session::Session;
//! let mut session = Session::new(3, 1)?;
//! session.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{self, BufRead, Write};

use tracing::{debug, instrument};

use crate::board::Board;
use crate::constants::{DEFAULT_DEPTH, ENGINE_NAME};
use crate::error::BoardError;
use crate::piece::Piece;
use crate::search::SearchEngine;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "depth",
    "genmove",
    "known_command",
    "legal_moves",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "status",
    "version",
];

/// Session state: the game in progress and the engine that plays it.
pub struct Session {
    board: Board,
    engine: SearchEngine,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            board: Board::default(),
            engine: SearchEngine::new(DEFAULT_DEPTH),
        }
    }
}

impl Session {
    pub fn new(size: usize, depth: u32) -> Result<Self, BoardError> {
        Ok(Self {
            board: Board::new(size)?,
            engine: SearchEngine::new(depth),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Answer commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional numeric command id from the start of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute one command and return (success, response).
    #[instrument(skip(self))]
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, ENGINE_NAME.to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Ok(size) = arg.parse::<usize>() else {
                    return (false, format!("unacceptable size {arg:?}"));
                };
                match Board::new(size) {
                    Ok(board) => {
                        self.board = board;
                        (true, String::new())
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            "clear_board" => match Board::new(self.board.size()) {
                Ok(board) => {
                    self.board = board;
                    (true, String::new())
                }
                Err(err) => (false, err.to_string()),
            },

            "depth" => {
                let Some(arg) = args.first() else {
                    return (true, self.engine.depth().to_string());
                };
                match arg.parse::<u32>() {
                    Ok(depth) => {
                        self.engine = SearchEngine::new(depth);
                        (true, String::new())
                    }
                    Err(_) => (false, format!("invalid depth {arg:?}")),
                }
            }

            "play" => {
                let (color, vertex) = match args {
                    [vertex] => (None, *vertex),
                    [color, vertex] => (Some(*color), *vertex),
                    _ => return (false, "expected [color] row,col".to_string()),
                };
                if let Err(message) = self.check_turn(color) {
                    return (false, message);
                }
                match self.board.make_move(vertex) {
                    Ok(()) => (true, String::new()),
                    Err(err) => (false, err.to_string()),
                }
            }

            "genmove" => {
                if let Err(message) = self.check_turn(args.first().copied()) {
                    return (false, message);
                }
                let mv = match self.engine.select_move(&self.board) {
                    Ok(mv) => mv,
                    Err(err) => return (false, err.to_string()),
                };
                match self.board.play(mv) {
                    Ok(()) => {
                        debug!(%mv, "engine moved");
                        (true, mv.to_string())
                    }
                    Err(err) => (false, err.to_string()),
                }
            }

            "legal_moves" => {
                let moves: Vec<String> = self
                    .board
                    .legal_moves()
                    .iter()
                    .map(|m| m.to_string())
                    .collect();
                (true, moves.join(" "))
            }

            "showboard" => {
                let board = self.board.to_string();
                (true, format!("\n{}", board.trim_end()))
            }

            "status" => {
                let status = match self.board.outcome() {
                    Some(outcome) => outcome.to_string(),
                    None => format!("{} to move", self.board.to_move()),
                };
                (true, status)
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// A color argument, when given, must name the side to move.
    fn check_turn(&self, color: Option<&str>) -> Result<(), String> {
        let Some(color) = color else {
            return Ok(());
        };
        let mut chars = color.chars();
        let piece = match (chars.next().and_then(Piece::from_abbrev), chars.next()) {
            (Some(piece), None) if !piece.is_empty() => piece,
            _ => return Err(format!("invalid color {color:?}")),
        };
        if piece != self.board.to_move() {
            return Err(format!("it is {}'s turn", self.board.to_move()));
        }
        Ok(())
    }
}
