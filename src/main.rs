//! Tictac-Rust: play N-in-a-row games against people or the engine.
//!
//! ## Usage
//!
//! - `tictac` / `tictac comp` - Play X against the engine
//! - `tictac auto` - Two players at one keyboard
//! - `tictac replay <script>` - Replay a scripted game
//! - `tictac selfplay` - Machine against machine, with a tally
//! - `tictac session` - Answer protocol commands on stdin

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fastrand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tictac::constants::{DEFAULT_DEPTH, DEFAULT_SIZE};
use tictac::game::{Handoff, Match, Seat, replay};
use tictac::session::Session;
use tictac::{Board, Outcome, Piece, SearchEngine};

/// Tictac-Rust: N-in-a-row with a minimax engine
#[derive(Parser)]
#[command(name = "tictac")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board size (N x N)
    #[arg(long, global = true, default_value_t = DEFAULT_SIZE, value_parser = parse_size)]
    size: usize,

    /// Log search and game events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Two human players take turns entering moves
    Auto,
    /// Play against the engine
    Comp {
        /// Search depth in plies
        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,
        /// Let the engine play X and move first
        #[arg(long)]
        engine_first: bool,
    },
    /// Replay a game script, then continue interactively if it asks to
    Replay {
        /// Script with one move or command per line
        script: PathBuf,
        /// Search depth used if the script hands over to `comp`
        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,
    },
    /// Machine against machine
    Selfplay {
        /// Who plays X
        #[arg(short = 'x', long, value_enum, default_value_t = SeatKind::Engine)]
        first: SeatKind,
        /// Who plays O
        #[arg(short = 'o', long, value_enum, default_value_t = SeatKind::Random)]
        second: SeatKind,
        /// Search depth in plies for engine seats
        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,
        /// Number of games to play
        #[arg(short = 'n', long, default_value_t = 1)]
        games: usize,
        /// Seed for random seats
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Answer protocol commands on stdin
    Session {
        /// Search depth in plies
        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SeatKind {
    Engine,
    Random,
}

fn parse_size(s: &str) -> Result<usize, String> {
    let size = s
        .parse::<usize>()
        .map_err(|_| format!("{s:?} is not a board size"))?;
    Board::new(size).map_err(|err| err.to_string())?;
    Ok(size)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let board = Board::new(cli.size)?;
    match cli.command {
        Some(Commands::Auto) => run_match(Match::new(Seat::Human, Seat::Human), board),
        Some(Commands::Comp {
            depth,
            engine_first,
        }) => {
            let human = if engine_first {
                Piece::Second
            } else {
                Piece::First
            };
            run_match(Match::against_engine(human, SearchEngine::new(depth)), board)
        }
        None => run_match(
            Match::against_engine(Piece::First, SearchEngine::default()),
            board,
        ),
        Some(Commands::Replay { script, depth }) => run_replay(script, depth, board),
        Some(Commands::Selfplay {
            first,
            second,
            depth,
            games,
            seed,
        }) => run_selfplay(first, second, depth, games, seed, cli.size),
        Some(Commands::Session { depth }) => {
            info!(size = cli.size, depth, "starting session");
            let mut session = Session::new(cli.size, depth)?;
            session.run(io::stdin().lock(), io::stdout())?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Play one match on stdin/stdout.
fn run_match(mut game: Match, mut board: Board) -> Result<()> {
    print!("{board}");
    game.play(&mut board, &mut io::stdin().lock(), &mut io::stdout())?;
    Ok(())
}

fn run_replay(script: PathBuf, depth: u32, board: Board) -> Result<()> {
    let file = File::open(&script)
        .with_context(|| format!("cannot open script {}", script.display()))?;
    let replayed = replay(board, BufReader::new(file), &mut io::stdout())
        .with_context(|| format!("replaying {}", script.display()))?;

    let board = replayed.board;
    match replayed.handoff {
        Some(Handoff::Auto) => run_match(Match::new(Seat::Human, Seat::Human), board),
        Some(Handoff::Comp) => {
            let human = board.to_move();
            run_match(Match::against_engine(human, SearchEngine::new(depth)), board)
        }
        None => Ok(()),
    }
}

fn run_selfplay(
    first: SeatKind,
    second: SeatKind,
    depth: u32,
    games: usize,
    seed: Option<u64>,
    size: usize,
) -> Result<()> {
    let mut rng = seed.map_or_else(Rng::new, Rng::with_seed);
    let mut seat = |kind: SeatKind| match kind {
        SeatKind::Engine => Seat::Engine(SearchEngine::new(depth)),
        SeatKind::Random => Seat::Random(Rng::with_seed(rng.u64(..))),
    };

    let (mut x_wins, mut o_wins, mut ties) = (0, 0, 0);
    for n in 0..games {
        let mut game = Match::new(seat(first), seat(second));
        if games > 1 {
            game = game.quiet();
        }
        let mut board = Board::new(size)?;
        let outcome = game.play(&mut board, &mut io::empty(), &mut io::sink())?;
        info!(game = n + 1, ?outcome, "game finished");
        match outcome {
            Some(Outcome::Win(Piece::First)) => x_wins += 1,
            Some(Outcome::Win(_)) => o_wins += 1,
            Some(Outcome::Tie) => ties += 1,
            None => {}
        }
        if games == 1 {
            print!("{board}");
        }
    }

    println!("X wins: {x_wins}  O wins: {o_wins}  ties: {ties}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictac::constants::MAX_SIZE;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("4"), Ok(4));
        assert_eq!(parse_size(&MAX_SIZE.to_string()), Ok(MAX_SIZE));
        assert!(parse_size("0").is_err());
        assert!(parse_size("4294967296").is_err());
        assert!(parse_size("three").is_err());
    }

    #[test]
    fn test_cli_rejects_bad_size() {
        assert!(Cli::try_parse_from(["tictac", "--size", "0", "auto"]).is_err());
        let cli = Cli::try_parse_from(["tictac", "session", "--size", "5"]).unwrap();
        assert_eq!(cli.size, 5);
    }
}
