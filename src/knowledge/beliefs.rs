//! Belief grid over hazard locations.
//!
//! Two kinds of inference run here:
//!
//! - **Deduction on observation.** Every hazard produces its indicator
//!   percept in all 4-connected neighbors, so a chamber with neither a
//!   breeze nor a stench proves each unvisited neighbor safe.
//! - **Evidence recompute.** [`BeliefGrid::update_probabilities`] rebuilds
//!   hazard probabilities from every visited chamber. An indicator with a
//!   single unproven neighbor pins the hazard there (probability 1.0); with
//!   `k > 1` unproven neighbors each receives `1/k`, and contributions from
//!   several sources combine by maximum rather than by sum.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    cell::CellBelief,
    report::{CellView, ChamberReport},
};
use crate::{
    Error, Result,
    world::{GridIndex, HazardKind, PerceptSet, Position},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeliefGrid {
    grid: GridIndex,
    start: Position,
    cells: Vec<CellBelief>,
    version: usize,
}

impl BeliefGrid {
    /// Fresh knowledge for an N×N cave. Only the start chamber is known safe.
    pub fn new(size: usize, start: Position) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidGridSize { size });
        }
        let grid = GridIndex::new(size);
        grid.check(start)?;
        let count = grid
            .checked_cell_count()
            .ok_or(Error::InvalidGridSize { size })?;

        let mut cells = vec![CellBelief::default(); count];
        cells[start.row * size + start.col].is_safe = true;

        Ok(Self {
            grid,
            start,
            cells,
            version: 0,
        })
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> GridIndex {
        self.grid
    }

    pub fn start(&self) -> Position {
        self.start
    }

    /// Monotone counter that changes whenever beliefs are updated.
    pub fn version(&self) -> usize {
        self.version
    }

    pub fn cell(&self, position: Position) -> Option<&CellBelief> {
        self.grid.index_of(position).map(|idx| &self.cells[idx])
    }

    /// Every chamber with its position, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &CellBelief)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| (self.grid.position_of(idx), cell))
    }

    fn slot(&self, position: Position) -> usize {
        position.row * self.grid.size() + position.col
    }

    /// Neighbors of `position` not yet proven safe.
    pub fn unknown_neighbors(&self, position: Position) -> Vec<Position> {
        self.grid
            .neighbors(position)
            .into_iter()
            .filter(|&n| !self.cells[self.slot(n)].is_safe)
            .collect()
    }

    /// Record what the agent perceived on entering `position`.
    ///
    /// Marks the chamber visited and safe. If no hazard indicator was
    /// perceived, every unvisited neighbor is proven safe as well. Entering
    /// the same chamber again recomputes the same state.
    pub fn update_percepts(&mut self, position: Position, percepts: PerceptSet) -> Result<()> {
        let idx = self
            .grid
            .index_of(position)
            .ok_or(Error::PositionOutOfBounds {
                position,
                size: self.grid.size(),
            })?;

        let hazard_free = percepts.is_hazard_free();
        tracing::debug!(%position, percepts = %percepts, "observed chamber");

        let cell = &mut self.cells[idx];
        cell.visited = true;
        cell.percepts = percepts;
        cell.mark_safe();

        if hazard_free {
            for neighbor in self.grid.neighbors(position) {
                let slot = self.slot(neighbor);
                let cell = &mut self.cells[slot];
                if !cell.visited {
                    cell.mark_safe();
                }
            }
        }

        self.version = self.version.wrapping_add(1);
        Ok(())
    }

    /// Recompute hazard probabilities for the whole grid from every visited
    /// chamber's percepts.
    ///
    /// Probabilities of unproven chambers are cleared first and re-derived,
    /// so a chamber pinned at 1.0 by elimination is pinned again as long as
    /// the evidence that pinned it is unchanged.
    pub fn update_probabilities(&mut self) {
        for cell in &mut self.cells {
            if cell.is_unknown() {
                cell.clear_probabilities();
            }
        }

        for kind in HazardKind::ALL {
            self.accumulate_evidence(kind);
        }

        self.version = self.version.wrapping_add(1);
    }

    fn accumulate_evidence(&mut self, kind: HazardKind) {
        let indicator = kind.indicator();
        let sources: Vec<Position> = self
            .cells()
            .filter(|(_, cell)| cell.visited && cell.percepts.contains(indicator))
            .map(|(position, _)| position)
            .collect();

        // Strongest distributed share per chamber.
        let mut shares: BTreeMap<usize, f64> = BTreeMap::new();

        for source in sources {
            match self.unknown_neighbors(source).as_slice() {
                [] => {}
                [only] => {
                    let slot = self.slot(*only);
                    let cell = &mut self.cells[slot];
                    cell.set_probability(kind, 1.0);
                    cell.is_safe = false;
                    tracing::trace!(%source, target = %only, ?kind, "eliminated to a single chamber");
                }
                candidates => {
                    let share = 1.0 / candidates.len() as f64;
                    for &candidate in candidates {
                        let best = shares.entry(self.slot(candidate)).or_insert(0.0);
                        *best = best.max(share);
                    }
                }
            }
        }

        for (slot, share) in shares {
            let cell = &mut self.cells[slot];
            let current = cell.probability(kind);
            if current < 1.0 {
                cell.set_probability(kind, current.max(share));
            }
        }
    }

    /// Status report for one chamber.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinates`] for positions off the grid.
    pub fn query(&self, position: Position) -> Result<ChamberReport> {
        let cell = self.cell(position).ok_or(Error::InvalidCoordinates)?;
        Ok(ChamberReport::new(position, cell))
    }

    /// One presentational entry per chamber, row-major. `agent`, when given,
    /// is marked instead of showing its percepts.
    pub fn snapshot(&self, agent: Option<Position>) -> Vec<CellView> {
        self.cells()
            .map(|(position, cell)| CellView::new(position, cell, Some(position) == agent))
            .collect()
    }

    /// Check structural and inference invariants, e.g. after deserializing.
    pub fn validate(&self) -> Result<()> {
        let corrupt = |message: String| Error::CorruptKnowledge { message };

        if self.grid.size() == 0 {
            return Err(corrupt("grid size is zero".to_string()));
        }
        let Some(expected) = self.grid.checked_cell_count() else {
            return Err(corrupt(format!(
                "grid size {} is too large to address",
                self.grid.size()
            )));
        };
        if self.cells.len() != expected {
            return Err(corrupt(format!(
                "expected {expected} cells for a {}x{} grid, found {}",
                self.grid.size(),
                self.grid.size(),
                self.cells.len()
            )));
        }
        if !self.grid.contains(self.start) {
            return Err(corrupt(format!("start {} is off the grid", self.start)));
        }
        if !self.cells[self.slot(self.start)].is_safe {
            return Err(corrupt(format!("start {} is not marked safe", self.start)));
        }

        for (position, cell) in self.cells() {
            for kind in HazardKind::ALL {
                let p = cell.probability(kind);
                if !(0.0..=1.0).contains(&p) {
                    return Err(corrupt(format!(
                        "{kind} probability {p} at {position} is outside [0, 1]"
                    )));
                }
            }
            if cell.visited && (!cell.is_safe || cell.total_danger() != 0.0) {
                return Err(corrupt(format!(
                    "visited chamber {position} must be safe with zero hazard probability"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Percept;

    #[test]
    fn start_is_safe_and_everything_else_unknown() {
        let beliefs = BeliefGrid::new(3, Position::new(1, 1)).unwrap();
        let safe: Vec<_> = beliefs
            .cells()
            .filter(|(_, c)| c.is_safe)
            .map(|(p, _)| p)
            .collect();
        assert_eq!(safe, vec![Position::new(1, 1)]);
    }

    #[test]
    fn construction_rejects_bad_inputs() {
        assert!(matches!(
            BeliefGrid::new(0, Position::new(0, 0)),
            Err(Error::InvalidGridSize { size: 0 })
        ));
        assert!(matches!(
            BeliefGrid::new(2, Position::new(2, 0)),
            Err(Error::PositionOutOfBounds { .. })
        ));
    }

    #[test]
    fn stench_does_not_prove_neighbors_safe() {
        let mut beliefs = BeliefGrid::new(4, Position::new(0, 0)).unwrap();
        beliefs
            .update_percepts(Position::new(0, 0), PerceptSet::from([Percept::Stench]))
            .unwrap();
        assert!(!beliefs.cell(Position::new(0, 1)).unwrap().is_safe);
        assert!(!beliefs.cell(Position::new(1, 0)).unwrap().is_safe);
    }

    #[test]
    fn glitter_alone_still_proves_neighbors_safe() {
        let mut beliefs = BeliefGrid::new(4, Position::new(0, 0)).unwrap();
        beliefs
            .update_percepts(Position::new(0, 0), PerceptSet::from([Percept::Glitter]))
            .unwrap();
        assert!(beliefs.cell(Position::new(0, 1)).unwrap().is_safe);
    }

    #[test]
    fn stench_splits_wumpus_probability_between_unknowns() {
        let mut beliefs = BeliefGrid::new(4, Position::new(0, 0)).unwrap();
        beliefs
            .update_percepts(Position::new(0, 0), PerceptSet::from([Percept::Stench]))
            .unwrap();
        beliefs.update_probabilities();

        for p in [Position::new(0, 1), Position::new(1, 0)] {
            let cell = beliefs.cell(p).unwrap();
            assert_eq!(cell.prob_wumpus, 0.5);
            assert_eq!(cell.prob_pit, 0.0);
        }
    }

    #[test]
    fn update_out_of_bounds_is_an_error() {
        let mut beliefs = BeliefGrid::new(2, Position::new(0, 0)).unwrap();
        let before = beliefs.clone();
        assert!(
            beliefs
                .update_percepts(Position::new(5, 5), PerceptSet::new())
                .is_err()
        );
        assert_eq!(beliefs, before);
    }

    #[test]
    fn validate_catches_visited_with_probability() {
        let mut beliefs = BeliefGrid::new(3, Position::new(0, 0)).unwrap();
        beliefs
            .update_percepts(Position::new(0, 0), PerceptSet::new())
            .unwrap();
        assert!(beliefs.validate().is_ok());

        beliefs.cells[0].prob_pit = 0.25;
        assert!(matches!(
            beliefs.validate(),
            Err(Error::CorruptKnowledge { .. })
        ));
    }

    #[test]
    fn unmarked_snapshot_keeps_start_percepts() {
        let mut beliefs = BeliefGrid::new(3, Position::new(0, 0)).unwrap();
        beliefs
            .update_percepts(Position::new(0, 0), PerceptSet::from([Percept::Breeze]))
            .unwrap();

        let marked = beliefs.snapshot(Some(Position::new(0, 0)));
        assert_eq!(marked[0].symbol, "A");

        let unmarked = beliefs.snapshot(None);
        assert_eq!(unmarked.len(), 9);
        assert_eq!(unmarked[0].symbol, "B");
        assert!(unmarked.iter().all(|view| view.symbol != "A"));
    }

    #[test]
    fn validate_rejects_unaddressable_grid_size() {
        for size in [usize::MAX / 2, 1usize << (usize::BITS / 2)] {
            let beliefs = BeliefGrid {
                grid: GridIndex::new(size),
                start: Position::new(0, 0),
                cells: Vec::new(),
                version: 0,
            };
            assert!(matches!(
                beliefs.validate(),
                Err(Error::CorruptKnowledge { .. })
            ));
        }
    }
}
