//! Players and AI configuration

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cell::Side;
use crate::filter::{FilterKind, MoveFilter};
use crate::movegen::Move;
use crate::potential::EvalScheme;
use crate::search::{best_move, parallel_best_move, SearchParams};

/// Anything that can pick a move for a side
pub trait Player {
    /// Display name
    fn name(&self) -> &str;

    /// Pick a move for `side`, `Ok(None)` when it has none
    fn choose_move(&mut self, board: &Board, side: Side) -> anyhow::Result<Option<Move>>;
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Search configuration for a computer player
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Search depth in plies
    pub depth: u32,
    /// Potential table summed by the evaluator
    pub scheme: EvalScheme,
    /// Move filter applied at every node
    pub filter: FilterKind,
    /// Search root moves on the rayon pool
    pub parallel: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            scheme: EvalScheme::Distance,
            filter: FilterKind::AcceptAll,
            parallel: false,
        }
    }
}

impl AiConfig {
    pub fn with_depth(depth: u32) -> Self {
        Self { depth, ..Default::default() }
    }

    pub fn with_scheme(mut self, scheme: EvalScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_filter(mut self, filter: FilterKind) -> Self {
        self.filter = filter;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ============================================================================
// COMPUTER PLAYER
// ============================================================================

/// Alpha-beta player
pub struct ComputerPlayer {
    name: String,
    config: AiConfig,
    filter: Option<Arc<dyn MoveFilter>>,
}

impl ComputerPlayer {
    pub fn new(name: impl Into<String>, config: AiConfig) -> Self {
        let filter = config.filter.build();
        Self { name: name.into(), config, filter }
    }

    /// Use a custom filter instead of the configured one
    pub fn with_filter(mut self, filter: Arc<dyn MoveFilter>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }
}

impl Player for ComputerPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, board: &Board, side: Side) -> anyhow::Result<Option<Move>> {
        let params = SearchParams {
            depth: self.config.depth,
            scheme: self.config.scheme,
            filter: self.filter.as_deref(),
        };

        let result = if self.config.parallel {
            parallel_best_move(board, side, &params)
        } else {
            best_move(&mut board.clone(), side, &params)
        };

        tracing::trace!("{} picks {:?} (value {})", self.name, result.best, result.value);
        Ok(result.best)
    }
}
