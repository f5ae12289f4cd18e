//! Ground-truth cave built from a [`CaveLayout`].

use std::collections::HashMap;

use crate::{
    Result,
    ports::World,
    world::{CaveLayout, HazardKind, Percept, PerceptSet, Position},
};

/// The objective truth about a cave: hazard and goal locations plus the
/// percepts they cast on neighboring chambers.
#[derive(Debug, Clone)]
pub struct Cave {
    layout: CaveLayout,
    percepts: HashMap<Position, PerceptSet>,
}

impl Cave {
    /// Build a cave, validating the layout first.
    pub fn new(layout: CaveLayout) -> Result<Self> {
        layout.validate()?;

        let grid = layout.grid();
        let sources = layout
            .pits
            .iter()
            .map(|&pit| (pit, Percept::Breeze))
            .chain([
                (layout.wumpus, Percept::Stench),
                (layout.goal, Percept::Glitter),
            ]);

        let mut percepts: HashMap<Position, PerceptSet> = HashMap::new();
        for (origin, percept) in sources {
            for neighbor in grid.neighbors(origin) {
                percepts.entry(neighbor).or_default().insert(percept);
            }
        }

        Ok(Self { layout, percepts })
    }

    pub fn layout(&self) -> &CaveLayout {
        &self.layout
    }
}

impl World for Cave {
    fn size(&self) -> usize {
        self.layout.size
    }

    fn percepts_at(&self, position: Position) -> PerceptSet {
        self.percepts.get(&position).cloned().unwrap_or_default()
    }

    fn hazard_at(&self, position: Position) -> Option<HazardKind> {
        self.layout.hazard_at(position)
    }

    fn is_goal(&self, position: Position) -> bool {
        position == self.layout.goal
    }
}
