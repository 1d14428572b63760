//! Shared command-line options

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use sternhalma_core::{AiConfig, EvalScheme, FilterKind, Side};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SideArg {
    North,
    South,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::North => Side::North,
            SideArg::South => Side::South,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SchemeArg {
    Distance,
    Positional,
}

impl From<SchemeArg> for EvalScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Distance => EvalScheme::Distance,
            SchemeArg::Positional => EvalScheme::Positional,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FilterArg {
    AcceptAll,
    NoRetreat,
}

impl From<FilterArg> for FilterKind {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::AcceptAll => FilterKind::AcceptAll,
            FilterArg::NoRetreat => FilterKind::NoRetreat,
        }
    }
}

/// Computer player options
///
/// A `--config` file is the base; flags given on the command line override it.
#[derive(Args, Clone, Debug)]
pub struct AiArgs {
    /// AI configuration JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Search depth in plies
    #[arg(long)]
    pub depth: Option<u32>,

    /// Evaluation scheme
    #[arg(long, value_enum)]
    pub scheme: Option<SchemeArg>,

    /// Move filter applied during search
    #[arg(long, value_enum)]
    pub filter: Option<FilterArg>,

    /// Search root moves in parallel
    #[arg(long)]
    pub parallel_search: bool,
}

impl AiArgs {
    pub fn resolve(&self) -> Result<AiConfig> {
        let mut config = match &self.config {
            Some(path) => AiConfig::load(path)
                .with_context(|| format!("Failed to load AI config: {}", path.display()))?,
            None => AiConfig::default(),
        };

        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if let Some(scheme) = self.scheme {
            config.scheme = scheme.into();
        }
        if let Some(filter) = self.filter {
            config.filter = filter.into();
        }
        if self.parallel_search {
            config.parallel = true;
        }

        Ok(config)
    }
}

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
