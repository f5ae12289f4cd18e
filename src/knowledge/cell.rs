use serde::{Deserialize, Serialize};

use crate::world::{HazardKind, PerceptSet};

/// What the agent believes about a single chamber.
///
/// `is_safe == false` means "not yet proven safe", not "dangerous".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellBelief {
    pub visited: bool,
    pub percepts: PerceptSet,
    pub is_safe: bool,
    pub prob_pit: f64,
    pub prob_wumpus: f64,
}

impl CellBelief {
    pub fn probability(&self, kind: HazardKind) -> f64 {
        match kind {
            HazardKind::Pit => self.prob_pit,
            HazardKind::Wumpus => self.prob_wumpus,
        }
    }

    pub fn set_probability(&mut self, kind: HazardKind, value: f64) {
        match kind {
            HazardKind::Pit => self.prob_pit = value,
            HazardKind::Wumpus => self.prob_wumpus = value,
        }
    }

    /// Combined hazard mass used for risk ranking and danger shading.
    pub fn total_danger(&self) -> f64 {
        self.prob_pit + self.prob_wumpus
    }

    /// Certain of at least one hazard.
    pub fn is_certainly_dangerous(&self) -> bool {
        self.prob_pit >= 1.0 || self.prob_wumpus >= 1.0
    }

    /// Neither visited nor proven safe.
    pub fn is_unknown(&self) -> bool {
        !self.visited && !self.is_safe
    }

    pub(crate) fn clear_probabilities(&mut self) {
        self.prob_pit = 0.0;
        self.prob_wumpus = 0.0;
    }

    pub(crate) fn mark_safe(&mut self) {
        self.is_safe = true;
        self.clear_probabilities();
    }
}
