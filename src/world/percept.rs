//! Percepts and the hazards they indicate

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

/// A locally observable cue, reported for the agent's current chamber only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Percept {
    /// A pit lies in an adjacent chamber.
    Breeze,
    /// The wumpus lies in an adjacent chamber.
    Stench,
    /// The goal lies in an adjacent chamber.
    Glitter,
}

impl Percept {
    pub fn name(self) -> &'static str {
        match self {
            Percept::Breeze => "Breeze",
            Percept::Stench => "Stench",
            Percept::Glitter => "Glitter",
        }
    }

    /// Single-letter grid symbol.
    pub fn initial(self) -> char {
        match self {
            Percept::Breeze => 'B',
            Percept::Stench => 'S',
            Percept::Glitter => 'G',
        }
    }
}

impl fmt::Display for Percept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hazards the agent reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    Pit,
    Wumpus,
}

impl HazardKind {
    pub const ALL: [HazardKind; 2] = [HazardKind::Pit, HazardKind::Wumpus];

    /// The percept every neighbor of this hazard receives.
    pub fn indicator(self) -> Percept {
        match self {
            HazardKind::Pit => Percept::Breeze,
            HazardKind::Wumpus => Percept::Stench,
        }
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardKind::Pit => f.write_str("Pit"),
            HazardKind::Wumpus => f.write_str("Wumpus"),
        }
    }
}

/// Ordered set of percepts observed in one chamber.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerceptSet(BTreeSet<Percept>);

impl PerceptSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, percept: Percept) -> bool {
        self.0.insert(percept)
    }

    pub fn contains(&self, percept: Percept) -> bool {
        self.0.contains(&percept)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Percept> + '_ {
        self.0.iter().copied()
    }

    /// True when neither hazard indicator is present.
    pub fn is_hazard_free(&self) -> bool {
        HazardKind::ALL
            .iter()
            .all(|kind| !self.contains(kind.indicator()))
    }

    /// Literal listing such as `"Breeze, Stench"`, or `"None"`.
    pub fn describe(&self) -> String {
        if self.is_empty() {
            "None".to_string()
        } else {
            self.iter()
                .map(Percept::name)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    /// Concatenated initials such as `"BS"`; empty when there are none.
    pub fn initials(&self) -> String {
        self.iter().map(Percept::initial).collect()
    }
}

impl FromIterator<Percept> for PerceptSet {
    fn from_iter<I: IntoIterator<Item = Percept>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Percept; N]> for PerceptSet {
    fn from(percepts: [Percept; N]) -> Self {
        percepts.into_iter().collect()
    }
}

impl fmt::Display for PerceptSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
