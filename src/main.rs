//! Oware-Rust: search an Oware position and print the result.
//!
//! ## Usage
//!
//! - `oware-rust` - Search the initial position to the default depth
//! - `oware-rust search --depth 5` - Search the initial position to depth 5
//! - `oware-rust play 0 3 2` - Play moves from the initial position and show the board
//! - `oware-rust play 0 3 --depth 5` - Play moves, then search the resulting position
//!
//! Logs go to stderr. Set `RUST_LOG` or pass `--verbose` to see them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use oware_rust::board::{Board, Move};
use oware_rust::constants::SEARCH_DEPTH;
use oware_rust::game_tree::{GameTree, tree_search};

/// Oware-Rust: Oware engine with a fixed-depth negamax search
#[derive(Parser)]
#[command(name = "oware-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the initial position and print the result
    Search {
        /// Search depth in plies
        #[arg(long, default_value_t = SEARCH_DEPTH)]
        depth: u32,
    },
    /// Play moves (0-5, relative to the mover) from the initial position
    Play {
        /// Moves to play, alternating between A and B
        moves: Vec<Move>,
        /// Search the resulting position to this depth
        #[arg(long)]
        depth: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Search { depth }) => {
            run_search(Board::new(), depth);
        }
        Some(Commands::Play { moves, depth }) => {
            let board = play_moves(&moves)?;
            match depth {
                Some(depth) => {
                    let tree = run_search(board, depth);
                    match tree.best_move() {
                        Some(mv) => println!("best move: {mv}"),
                        None => println!("best move: none"),
                    }
                }
                None => print!("{board}"),
            }
        }
        None => {
            run_search(Board::new(), SEARCH_DEPTH);
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Search `board` to `depth` and print the tree dump.
fn run_search(board: Board, depth: u32) -> GameTree {
    info!(depth, player = %board.current_player(), "starting search");
    let mut tree = GameTree::new(board);
    tree_search(&mut tree, depth);
    info!(line = ?tree.principal_variation(), "principal variation");
    println!("{tree}");
    tree
}

/// Apply `moves` in order from the initial position.
fn play_moves(moves: &[Move]) -> Result<Board> {
    let mut board = Board::new();
    for (ply, &mv) in moves.iter().enumerate() {
        let player = board.current_player();
        board = board
            .execute_move(mv)
            .with_context(|| format!("move {mv} by player {player} at ply {}", ply + 1))?;
        info!(ply = ply + 1, mv, %player, "played move");
    }
    Ok(board)
}
