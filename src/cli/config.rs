//! Shared configuration types for CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    app::SessionConfig,
    world::{CaveLayout, Position},
};

/// Cave and session options shared by every command that starts a session
#[derive(Args, Debug, Clone, Default)]
pub struct LayoutArgs {
    /// Layout file (`W[r,c]`, `P[r,c]`, `G[r,c]`, ...); the classic 4x4
    /// cave when omitted
    #[arg(long, short = 'l')]
    pub layout: Option<PathBuf>,

    /// Override the move budget
    #[arg(long)]
    pub max_moves: Option<usize>,

    /// Override the start chamber, 1-indexed as `row,col`
    #[arg(long, value_parser = Position::parse_one_indexed)]
    pub start: Option<Position>,

    /// Random seed for reproducible tie-breaks
    #[arg(long)]
    pub seed: Option<u64>,
}

impl LayoutArgs {
    pub fn load_layout(&self) -> Result<CaveLayout> {
        match &self.layout {
            Some(path) => CaveLayout::load(path)
                .with_context(|| format!("Failed to load layout from {}", path.display())),
            None => Ok(CaveLayout::classic()),
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::new();
        if let Some(start) = self.start {
            config = config.with_start(start);
        }
        if let Some(max_moves) = self.max_moves {
            config = config.with_max_moves(max_moves);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}
