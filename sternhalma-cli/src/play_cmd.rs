//! Play command - a person against the computer
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: setup(), play_game(), announce()
//! - Level 3: HumanPlayer turn handling
//! - Level 4: prompt and label parsing

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use clap::Args;
use rand::Rng;

use sternhalma_core::movegen::{destinations, movable_pieces};
use sternhalma_core::render::{label_cells, label_index, render_board};
use sternhalma_core::{AiConfig, Board, CellId, ComputerPlayer, Game, GameResult, Move, Player, Side};

use crate::args::{create_rng, AiArgs, SideArg};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Side you play (random when omitted)
    #[arg(long, value_enum)]
    pub side: Option<SideArg>,

    /// Side that moves first (random when omitted)
    #[arg(long, value_enum)]
    pub first: Option<SideArg>,

    #[command(flatten)]
    pub ai: AiArgs,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Pick sides and the computer's configuration
/// 2. Alternate turns until someone wins or cannot move
/// 3. Announce the result
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let (human_side, first, config) = setup(&args, seed)?;

    tracing::info!(
        "Starting game: human={:?} first={:?} depth={} scheme={:?}",
        human_side,
        first,
        config.depth,
        config.scheme
    );

    let stdin = io::stdin();
    let mut human = HumanPlayer::new("You", stdin.lock(), io::stdout());
    let mut computer = ComputerPlayer::new("Computer", config);

    let game = play_game(&mut human, &mut computer, human_side, first)?;

    announce(&game, human_side);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn setup(args: &PlayArgs, seed: Option<u64>) -> Result<(Side, Side, AiConfig)> {
    let mut rng = create_rng(seed);
    let mut pick = |arg: Option<SideArg>| match arg {
        Some(side) => Side::from(side),
        None if rng.gen_bool(0.5) => Side::North,
        None => Side::South,
    };

    let human_side = pick(args.side);
    let first = pick(args.first);
    let config = args.ai.resolve()?;

    Ok((human_side, first, config))
}

fn play_game(
    human: &mut dyn Player,
    computer: &mut dyn Player,
    human_side: Side,
    first: Side,
) -> Result<Game> {
    let mut game = Game::new(first)?;

    println!(
        "You play {} ({:?}). {:?} moves first.",
        human_side.glyph(),
        human_side,
        first
    );

    while !game.is_over() {
        let side = game.to_move();
        if side == human_side {
            game.play_turn(human)?;
        } else if let Some(mv) = game.play_turn(computer)? {
            println!("Computer moves {} -> {}", mv.from, mv.to);
        }
    }

    Ok(game)
}

fn announce(game: &Game, human_side: Side) {
    print!("\n{}", render_board(game.board(), &Default::default()));

    match game.result() {
        GameResult::Draw => println!("No legal move left: the game is drawn."),
        result => match result.winner() {
            Some(side) if side == human_side => {
                println!("You win in {} plies!", game.plies())
            }
            Some(side) => println!("{} wins in {} plies.", side.glyph(), game.plies()),
            None => println!("Game stopped."),
        },
    }
}

// ============================================================================
// LEVEL 3 - HUMAN PLAYER
// ============================================================================

/// A person choosing moves over a text stream
///
/// Each turn shows the board with the movable pieces labelled, then the
/// chosen piece's destinations labelled. `-` at the destination prompt goes
/// back to piece selection.
pub struct HumanPlayer<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self { name: name.into(), input, output }
    }

    /// Show `choices` on the board and read one label; `None` means go back
    fn select(&mut self, board: &Board, choices: &[CellId], what: &str) -> Result<Option<CellId>> {
        let overlay = label_cells(choices);
        write!(self.output, "\n{}", render_board(board, &overlay))?;

        loop {
            let answer = self.prompt(what)?;
            if answer == "-" {
                return Ok(None);
            }
            match parse_choice(&answer, choices.len()) {
                Some(index) => return Ok(Some(choices[index])),
                None => writeln!(self.output, "Invalid choice {:?}, enter one of the labels shown", answer)?,
            }
        }
    }

    fn prompt(&mut self, what: &str) -> Result<String> {
        write!(self.output, "{}: ", what)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed");
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, board: &Board, side: Side) -> Result<Option<Move>> {
        let pieces = movable_pieces(board, side);
        if pieces.is_empty() {
            return Ok(None);
        }

        loop {
            let Some(from) = self.select(board, &pieces, &format!("{} piece to move", side.glyph()))? else {
                continue;
            };
            let targets: Vec<CellId> = destinations(board, from).collect();
            if let Some(to) = self.select(board, &targets, "Destination (- to pick another piece)")? {
                return Ok(Some(Move::new(from, to)));
            }
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Index of a single-label answer among `count` labelled choices
fn parse_choice(answer: &str, count: usize) -> Option<usize> {
    let mut chars = answer.chars();
    let label = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    label_index(label).filter(|&index| index < count)
}
