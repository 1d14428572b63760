//! Match command - play games between two computer players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_configs(), play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use sternhalma_core::{legal_moves, AiConfig, ComputerPlayer, Game, GameResult, Move, Side};

use crate::args::{create_rng, AiArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Number of games to play (the first move alternates between sides)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Maximum plies per game before it is called a draw
    #[arg(long, default_value = "400")]
    pub max_plies: usize,

    /// Random legal moves played by each side before the engines take over
    #[arg(long, default_value = "0")]
    pub opening_plies: usize,

    /// Play games concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    // North AI options
    #[command(flatten)]
    pub north: AiArgs,

    /// South AI configuration JSON file (defaults to North's settings)
    #[arg(long, value_name = "FILE")]
    pub south_config: Option<std::path::PathBuf>,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    first: Side,
    result: GameResult,
    plies: usize,
    moves: Vec<Move>,
}

/// Aggregated match results
#[derive(Clone, Debug, Serialize)]
struct MatchResults {
    north: AiConfig,
    south: AiConfig,
    total_games: usize,
    north_wins: usize,
    south_wins: usize,
    draws: usize,
    avg_plies: f32,
    games: Vec<GameRecord>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// This function reads like a table of contents:
/// 1. Resolve both AI configurations
/// 2. Play the match (multiple games)
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let (north, south) = load_configs(&args)?;

    tracing::info!(
        "Starting match: north depth={} vs south depth={} ({} games)",
        north.depth,
        south.depth,
        args.games
    );

    let base_seed = seed.unwrap_or_else(|| create_rng(None).gen());
    let results = play_match(&north, &south, &args, base_seed)?;

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// North from the AI flags, South from its own file or North's settings
fn load_configs(args: &MatchArgs) -> Result<(AiConfig, AiConfig)> {
    let north = args.north.resolve()?;

    let south = match &args.south_config {
        Some(path) => AiConfig::load(path)
            .with_context(|| format!("Failed to load south AI config: {}", path.display()))?,
        None => north.clone(),
    };

    Ok((north, south))
}

/// Play all games in the match
fn play_match(north: &AiConfig, south: &AiConfig, args: &MatchArgs, base_seed: u64) -> Result<MatchResults> {
    let progress = ProgressBar::new(args.games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")?
            .progress_chars("█▓▒░  "),
    );

    let play = |index: usize| -> Result<GameRecord> {
        let record = play_single_game(north, south, index + 1, args, base_seed)?;
        tracing::info!("Game {}: {:?} ({} plies)", record.game_number, record.result, record.plies);
        progress.inc(1);
        Ok(record)
    };

    let games = if args.parallel {
        (0..args.games).into_par_iter().map(play).collect::<Result<Vec<_>>>()?
    } else {
        (0..args.games).map(play).collect::<Result<Vec<_>>>()?
    };

    progress.finish_and_clear();
    Ok(compute_match_statistics(north, south, games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game; odd-numbered games start with North
fn play_single_game(
    north: &AiConfig,
    south: &AiConfig,
    game_number: usize,
    args: &MatchArgs,
    base_seed: u64,
) -> Result<GameRecord> {
    let first = if game_number % 2 == 1 { Side::North } else { Side::South };
    let mut game = Game::new(first)?;

    let mut rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(game_number as u64));
    play_random_opening(&mut game, args.opening_plies * 2, &mut rng)?;

    let mut north_player = ComputerPlayer::new("north", north.clone());
    let mut south_player = ComputerPlayer::new("south", south.clone());
    let result = game.play_out(&mut north_player, &mut south_player, args.max_plies)?;

    Ok(GameRecord {
        game_number,
        first,
        result,
        plies: game.plies(),
        moves: game.history().to_vec(),
    })
}

/// Random legal moves to vary otherwise identical games
fn play_random_opening(game: &mut Game, plies: usize, rng: &mut ChaCha8Rng) -> Result<()> {
    for _ in 0..plies {
        if game.is_over() {
            break;
        }
        let moves = legal_moves(game.board(), game.to_move(), None);
        match moves.choose(rng) {
            Some(&mv) => game.apply(mv, "opening")?,
            None => break,
        }
    }
    Ok(())
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(north: &AiConfig, south: &AiConfig, games: Vec<GameRecord>) -> MatchResults {
    let count = |result: GameResult| games.iter().filter(|g| g.result == result).count();
    let north_wins = count(GameResult::NorthWins);
    let south_wins = count(GameResult::SouthWins);
    let draws = count(GameResult::Draw);

    let total_plies: usize = games.iter().map(|g| g.plies).sum();
    let avg_plies = if games.is_empty() {
        0.0
    } else {
        total_plies as f32 / games.len() as f32
    };

    MatchResults {
        north: north.clone(),
        south: south.clone(),
        total_games: games.len(),
        north_wins,
        south_wins,
        draws,
        avg_plies,
        games,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.total_games;

    println!("\n=== Match Results ===");
    println!("North: {}", describe(&results.north));
    println!("South: {}", describe(&results.south));
    println!("Total games: {}", total);
    println!("North wins:  {} ({:.1}%)", results.north_wins, percent(results.north_wins, total));
    println!("South wins:  {} ({:.1}%)", results.south_wins, percent(results.south_wins, total));
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Avg plies:   {:.1}", results.avg_plies);

    println!("\n--- Game Details ---");
    for game in &results.games {
        println!(
            "Game {:3}: {:<10} {:4} plies, {:?} first",
            game.game_number,
            format!("{:?}", game.result),
            game.plies,
            game.first
        );
    }
}

fn describe(config: &AiConfig) -> String {
    format!("depth {} {:?} {:?}", config.depth, config.scheme, config.filter)
}

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 * 100.0 / total as f32
    } else {
        0.0
    }
}
