//! Navigation policy: turn beliefs into the next chamber to enter.
//!
//! Candidates are the 4-connected neighbors of the agent, tried in strict
//! tiers:
//!
//! 1. **Frontier-safe**: unvisited and proven safe. Uniform random pick.
//! 2. **Backtrack**: already visited. Uniform random pick.
//! 3. **Calculated risk**: any unvisited neighbor, minimizing
//!    `prob_pit + prob_wumpus`; the first minimum in neighbor order wins.
//! 4. **Stuck**: stay in place.
//!
//! Randomness comes from an injected generator so runs are reproducible.

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    knowledge::BeliefGrid,
    world::{Direction, Position},
};

/// Which tier produced a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionTier {
    FrontierSafe,
    Backtrack,
    CalculatedRisk,
    Stuck,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveChoice {
    pub target: Position,
    pub tier: DecisionTier,
}

impl MoveChoice {
    /// Command that reaches the target, or `None` when staying put.
    pub fn direction_from(&self, current: Position) -> Option<Direction> {
        Direction::between(current, self.target)
    }
}

/// Tiered move selection with an injectable random source.
pub struct NavigationPolicy<R = StdRng> {
    rng: R,
}

impl<R> std::fmt::Debug for NavigationPolicy<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationPolicy").finish_non_exhaustive()
    }
}

impl NavigationPolicy<StdRng> {
    /// Deterministic policy for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Policy seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// Set or reset the tie-break seed.
    pub fn reseed(&mut self, seed: Option<u64>) {
        self.rng = match seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::from_rng(&mut rand::rng()),
        };
    }
}

impl<R: rand::Rng> NavigationPolicy<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Pick the next chamber to enter from `current`.
    pub fn choose(&mut self, current: Position, beliefs: &BeliefGrid) -> MoveChoice {
        let neighbors = beliefs.grid().neighbors(current);
        let belief = |p: &Position| beliefs.cell(*p);

        let frontier: Vec<Position> = neighbors
            .iter()
            .copied()
            .filter(|p| belief(p).is_some_and(|c| !c.visited && c.is_safe))
            .collect();
        let visited: Vec<Position> = neighbors
            .iter()
            .copied()
            .filter(|p| belief(p).is_some_and(|c| c.visited))
            .collect();

        tracing::trace!(%current, ?neighbors, ?frontier, ?visited, "choosing next move");

        if let Some(&target) = frontier.choose(&mut self.rng) {
            return MoveChoice {
                target,
                tier: DecisionTier::FrontierSafe,
            };
        }

        if let Some(&target) = visited.choose(&mut self.rng) {
            return MoveChoice {
                target,
                tier: DecisionTier::Backtrack,
            };
        }

        let mut least_risky: Option<(Position, f64)> = None;
        for &p in &neighbors {
            let Some(cell) = belief(&p) else { continue };
            if cell.visited {
                continue;
            }
            let danger = cell.total_danger();
            if least_risky.is_none_or(|(_, best)| danger < best) {
                least_risky = Some((p, danger));
            }
        }

        match least_risky {
            Some((target, danger)) => {
                tracing::debug!(%current, %target, danger, "taking a calculated risk");
                MoveChoice {
                    target,
                    tier: DecisionTier::CalculatedRisk,
                }
            }
            None => MoveChoice {
                target: current,
                tier: DecisionTier::Stuck,
            },
        }
    }
}
