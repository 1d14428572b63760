//! Sternhalma Core - Game engine and AI
//!
//! This crate provides the core game logic for two-player Chinese checkers:
//! - Board geometry (121-cell star as an explicit adjacency graph)
//! - Per-cell potential tables for evaluation
//! - Step and jump-chain move generation with pluggable move filters
//! - Depth-limited minimax with alpha-beta pruning
//! - Players and the turn-alternating game loop
//! - Text rendering of the board

pub mod cell;
pub mod board;
pub mod potential;
pub mod filter;
pub mod movegen;
pub mod eval;
pub mod search;
pub mod player;
pub mod game;
pub mod render;

// Re-exports for convenient access
pub use cell::{Cell, CellId, Direction, Side};
pub use board::{Board, BoardError, NUM_CELLS, PIECES_PER_SIDE, ROW_LENGTHS};
pub use potential::EvalScheme;
pub use filter::{AcceptAll, FilterKind, MoveFilter, NoRetreat};
pub use movegen::{destinations, is_legal, legal_moves, movable_pieces, Move};
pub use eval::{evaluate, Score, WIN_VALUE};
pub use search::{best_move, choose_move, parallel_best_move, SearchParams, SearchResult};
pub use player::{AiConfig, ComputerPlayer, Player};
pub use game::{Game, GameError, GameResult};
pub use render::{render_board, LABELS};
