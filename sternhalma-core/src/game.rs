//! Game loop: turn alternation, move validation, outcome

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardError};
use crate::cell::Side;
use crate::movegen::{is_legal, Move};
use crate::player::Player;

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    NorthWins,
    SouthWins,
    /// Ply limit reached or the side to move had no legal move
    Draw,
}

impl GameResult {
    pub fn winner(self) -> Option<Side> {
        match self {
            GameResult::NorthWins => Some(Side::North),
            GameResult::SouthWins => Some(Side::South),
            GameResult::Ongoing | GameResult::Draw => None,
        }
    }

    fn won_by(side: Side) -> Self {
        match side {
            Side::North => GameResult::NorthWins,
            Side::South => GameResult::SouthWins,
        }
    }
}

/// Errors raised while playing
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("{player} played illegal move {from} -> {to} for {side:?}")]
    IllegalMove { player: String, side: Side, from: usize, to: usize },

    #[error("game is already over: {0:?}")]
    Finished(GameResult),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("player {player} failed: {reason}")]
    Player { player: String, reason: anyhow::Error },
}

/// A game in progress
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Side,
    history: Vec<Move>,
    result: GameResult,
}

impl Game {
    /// Fresh board, `first` to move
    pub fn new(first: Side) -> Result<Self, GameError> {
        Ok(Self::from_board(Board::new()?, first))
    }

    pub fn from_board(board: Board, to_move: Side) -> Self {
        let result = board.winner().map_or(GameResult::Ongoing, GameResult::won_by);
        Self { board, to_move, history: Vec::new(), result }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn plies(&self) -> usize {
        self.history.len()
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result != GameResult::Ongoing
    }

    // ========================================================================
    // PLAY
    // ========================================================================

    /// Apply a move for the side to move after checking it is legal
    pub fn apply(&mut self, mv: Move, player: &str) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::Finished(self.result));
        }
        if !is_legal(&self.board, self.to_move, mv) || !self.board.move_piece(mv.from, mv.to) {
            return Err(GameError::IllegalMove {
                player: player.to_string(),
                side: self.to_move,
                from: mv.from,
                to: mv.to,
            });
        }

        self.history.push(mv);
        if let Some(winner) = self.board.winner() {
            self.result = GameResult::won_by(winner);
        }
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    /// Ask `player` for a move and apply it
    ///
    /// A player with no move ends the game as a draw.
    pub fn play_turn(&mut self, player: &mut dyn Player) -> Result<Option<Move>, GameError> {
        if self.is_over() {
            return Err(GameError::Finished(self.result));
        }

        let choice = player
            .choose_move(&self.board, self.to_move)
            .map_err(|reason| GameError::Player { player: player.name().to_string(), reason })?;

        match choice {
            Some(mv) => {
                self.apply(mv, player.name())?;
                tracing::debug!("Ply {}: {} {} -> {}", self.plies(), player.name(), mv.from, mv.to);
                Ok(Some(mv))
            }
            None => {
                tracing::debug!("{} ({:?}) has no legal move", player.name(), self.to_move);
                self.result = GameResult::Draw;
                Ok(None)
            }
        }
    }

    /// Alternate `north` and `south` until the game ends or `max_plies` pass
    pub fn play_out(
        &mut self,
        north: &mut dyn Player,
        south: &mut dyn Player,
        max_plies: usize,
    ) -> Result<GameResult, GameError> {
        while !self.is_over() {
            if self.plies() >= max_plies {
                self.result = GameResult::Draw;
                break;
            }
            match self.to_move {
                Side::North => self.play_turn(north)?,
                Side::South => self.play_turn(south)?,
            };
        }
        Ok(self.result)
    }
}
