//! Sternhalma CLI - Command-line interface
//!
//! Commands:
//! - play: Play against the computer on stdin/stdout
//! - match: Computer vs computer series
//! - show: Print the board with cell labels

mod args;
mod match_cmd;
mod play_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sternhalma_core::{render_board, Board};

#[derive(Parser)]
#[command(name = "sternhalma")]
#[command(about = "Two-player Chinese checkers against an alpha-beta opponent")]
struct Cli {
    /// Random seed (starting side, opening moves)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game against the computer
    Play(play_cmd::PlayArgs),
    /// Play a series of computer vs computer games
    Match(match_cmd::MatchArgs),
    /// Print the starting board
    Show {
        /// Label every cell with its index instead of showing pieces
        #[arg(long)]
        indices: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::Show { indices } => show(indices),
    }
}

/// Print the starting board, or the cell index table
fn show(indices: bool) -> anyhow::Result<()> {
    let board = Board::new()?;

    if indices {
        for (number, row) in board.rows().enumerate() {
            let ids: Vec<String> = row.map(|id| format!("{:3}", id)).collect();
            println!("row {:2}: {}", number, ids.join(" "));
        }
    } else {
        print!("{}", render_board(&board, &Default::default()));
    }

    Ok(())
}
