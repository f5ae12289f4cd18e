//! Common test utilities for the wumpus test suite.
//!
//! Builders for belief grids driven through explicit percept sequences and
//! for sessions on small hand-made caves.

#![allow(dead_code)]

use wumpus::{
    adapters::Cave,
    agent::AgentController,
    knowledge::BeliefGrid,
    navigation::NavigationPolicy,
    world::{CaveLayout, Percept, PerceptSet, Position},
};

pub fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

pub fn none() -> PerceptSet {
    PerceptSet::new()
}

pub fn breeze() -> PerceptSet {
    PerceptSet::from([Percept::Breeze])
}

/// Fresh 4x4 beliefs starting at (0, 0).
pub fn grid4() -> BeliefGrid {
    BeliefGrid::new(4, pos(0, 0)).unwrap()
}

/// Record each observation in order, recomputing after every one, the way
/// the controller does.
pub fn observe_all(beliefs: &mut BeliefGrid, observations: &[(Position, PerceptSet)]) {
    for (position, percepts) in observations {
        beliefs.update_percepts(*position, percepts.clone()).unwrap();
        beliefs.update_probabilities();
    }
}

/// Beliefs after a quiet walk that leaves (2, 0) and (3, 1) as the only
/// unknown neighbors of (2, 1), then a breeze at (2, 1).
pub fn breeze_between_two_unknowns() -> BeliefGrid {
    let mut beliefs = grid4();
    observe_all(
        &mut beliefs,
        &[
            (pos(0, 0), none()),
            (pos(0, 1), none()),
            (pos(1, 1), none()),
            (pos(1, 2), none()),
            (pos(2, 1), breeze()),
        ],
    );
    beliefs
}

/// Check the visited-cell invariant over the whole grid.
pub fn assert_visited_invariant(beliefs: &BeliefGrid) {
    for (position, cell) in beliefs.cells() {
        if cell.visited {
            assert!(cell.is_safe, "visited {position} must be safe");
            assert_eq!(cell.prob_pit, 0.0, "visited {position} has pit probability");
            assert_eq!(
                cell.prob_wumpus, 0.0,
                "visited {position} has wumpus probability"
            );
        }
    }
    beliefs.validate().unwrap();
}

/// Session on `layout` with a fixed policy seed.
pub fn session(layout: CaveLayout, seed: u64) -> AgentController<Cave> {
    let start = layout.start;
    let max_moves = layout.max_moves;
    AgentController::new(
        Cave::new(layout).unwrap(),
        start,
        max_moves,
        NavigationPolicy::seeded(seed),
    )
    .unwrap()
}
