//! Configuration types for session creation.

use serde::{Deserialize, Serialize};

use crate::world::{CaveLayout, Position};

/// Per-session overrides applied on top of a [`CaveLayout`].
///
/// # Examples
///
/// ```
/// use wumpus::app::SessionConfig;
/// use wumpus::world::Position;
///
/// let config = SessionConfig::new()
///     .with_seed(42)
///     .with_max_moves(50)
///     .with_start(Position::new(0, 0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Start chamber; the layout's start when unset.
    pub start: Option<Position>,
    /// Move budget; the layout's budget when unset.
    pub max_moves: Option<usize>,
    /// Policy tie-break seed; the app default when unset.
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(mut self, start: Position) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = Some(max_moves);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The layout with this config's overrides applied.
    pub fn apply(&self, layout: &CaveLayout) -> CaveLayout {
        let mut layout = layout.clone();
        if let Some(start) = self.start {
            layout.start = start;
        }
        if let Some(max_moves) = self.max_moves {
            layout.max_moves = max_moves;
        }
        layout
    }
}
