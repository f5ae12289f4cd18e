use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of one exploration session.
///
/// Only `Active` accepts moves. `Exhausted` means the move budget ran out
/// with the agent still alive and short of the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentState {
    Active,
    Dead,
    Won,
    Exhausted,
}

impl AgentState {
    pub fn is_terminal(self) -> bool {
        self != AgentState::Active
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AgentState::Active => "ACTIVE",
            AgentState::Dead => "DEAD",
            AgentState::Won => "WON",
            AgentState::Exhausted => "EXHAUSTED",
        };
        f.write_str(label)
    }
}

/// Outcome of a move request: whether it succeeded plus a message for the
/// player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub success: bool,
    pub message: String,
}

impl MoveResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl fmt::Display for MoveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Snapshot of the run state for status displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStatus {
    pub alive: bool,
    pub has_won: bool,
    pub moves_made: usize,
    pub max_moves: usize,
    /// 1-indexed `(row, col)`.
    pub current_pos: (usize, usize),
    pub game_over: bool,
    pub state: AgentState,
}

/// What one autonomous step did: where the agent stood, what the policy
/// chose, and how the move went.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub from: crate::world::Position,
    /// `None` when the session was already over and the policy was not asked.
    pub choice: Option<crate::navigation::MoveChoice>,
    pub direction: Option<crate::world::Direction>,
    pub result: MoveResult,
}
