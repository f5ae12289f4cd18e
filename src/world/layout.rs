//! Cave layout descriptions and the layout file format.
//!
//! A layout file lists one entry per line as `KEY[args]`, with 1-indexed
//! coordinates:
//!
//! ```text
//! # classic 4x4 cave
//! W[3,1]      # the wumpus
//! P[3,3]
//! P[4,4]
//! G[2,3]
//! MAX_MOVES[30]
//! ```
//!
//! `W` and `G` are required. `P` may repeat. `SIZE`, `START` and `MAX_MOVES`
//! are optional and default to 4, `(1,1)` and 20. Lines without a `[` are
//! skipped with a warning.

use std::{collections::BTreeSet, fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{
    grid::{GridIndex, Position},
    percept::HazardKind,
};
use crate::{Error, Result};

pub const DEFAULT_SIZE: usize = 4;
pub const DEFAULT_MAX_MOVES: usize = 20;

/// Ground-truth description of a cave: where the hazards and the goal are,
/// where the agent starts, and how many moves it gets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaveLayout {
    pub size: usize,
    pub start: Position,
    pub wumpus: Position,
    pub pits: BTreeSet<Position>,
    pub goal: Position,
    pub max_moves: usize,
}

impl CaveLayout {
    /// Layout with default size, start and move budget and no pits.
    pub fn new(wumpus: Position, goal: Position) -> Self {
        Self {
            size: DEFAULT_SIZE,
            start: Position::new(0, 0),
            wumpus,
            pits: BTreeSet::new(),
            goal,
            max_moves: DEFAULT_MAX_MOVES,
        }
    }

    /// The 4x4 cave from the module docs, used when no layout file is given.
    pub fn classic() -> Self {
        Self::new(Position::new(2, 0), Position::new(1, 2))
            .with_pits([Position::new(2, 2), Position::new(3, 3)])
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_start(mut self, start: Position) -> Self {
        self.start = start;
        self
    }

    pub fn with_pit(mut self, pit: Position) -> Self {
        self.pits.insert(pit);
        self
    }

    pub fn with_pits<I: IntoIterator<Item = Position>>(mut self, pits: I) -> Self {
        self.pits.extend(pits);
        self
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn grid(&self) -> GridIndex {
        GridIndex::new(self.size)
    }

    /// The hazard occupying a chamber. The wumpus wins over a pit.
    pub fn hazard_at(&self, position: Position) -> Option<HazardKind> {
        if position == self.wumpus {
            Some(HazardKind::Wumpus)
        } else if self.pits.contains(&position) {
            Some(HazardKind::Pit)
        } else {
            None
        }
    }

    /// Check bounds, the move budget, and that no hazard is adjacent
    /// (including diagonally) to the start.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidGridSize { size: self.size });
        }
        if self.max_moves == 0 {
            return Err(Error::InvalidConfiguration {
                message: "MAX_MOVES must be at least 1".to_string(),
            });
        }

        let grid = self.grid();
        grid.check(self.start)?;
        grid.check(self.goal)?;

        let hazards = std::iter::once((HazardKind::Wumpus, self.wumpus))
            .chain(self.pits.iter().map(|&p| (HazardKind::Pit, p)));
        for (kind, position) in hazards {
            grid.check(position)?;
            if position.chebyshev(self.start) <= 1 {
                return Err(Error::UnfairHazardPlacement { kind, position });
            }
        }
        Ok(())
    }

    /// Read and parse a layout file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read layout file {path:?}"),
            source,
        })?;
        text.parse()
    }
}

#[derive(Default)]
struct LayoutEntries {
    size: Option<usize>,
    start: Option<Position>,
    wumpus: Option<Position>,
    goal: Option<Position>,
    pits: BTreeSet<Position>,
    max_moves: Option<usize>,
}

impl LayoutEntries {
    fn apply(&mut self, key: &str, args: &str) -> std::result::Result<(), String> {
        match key {
            "W" => self.wumpus = Some(parse_coords(args)?),
            "G" => self.goal = Some(parse_coords(args)?),
            "P" => {
                self.pits.insert(parse_coords(args)?);
            }
            "START" => self.start = Some(parse_coords(args)?),
            "SIZE" => self.size = Some(parse_scalar(args)?),
            "MAX_MOVES" => self.max_moves = Some(parse_scalar(args)?),
            other => return Err(format!("unknown key '{other}'")),
        }
        Ok(())
    }

    fn finish(self) -> Result<CaveLayout> {
        let wumpus = self.wumpus.ok_or_else(|| Error::MissingLayoutKey {
            key: "W".to_string(),
        })?;
        let goal = self.goal.ok_or_else(|| Error::MissingLayoutKey {
            key: "G".to_string(),
        })?;

        let layout = CaveLayout {
            size: self.size.unwrap_or(DEFAULT_SIZE),
            start: self.start.unwrap_or(Position::new(0, 0)),
            wumpus,
            pits: self.pits,
            goal,
            max_moves: self.max_moves.unwrap_or(DEFAULT_MAX_MOVES),
        };
        layout.validate()?;
        Ok(layout)
    }
}

fn strip_brackets(args: &str) -> &str {
    args.trim().trim_end_matches(']').trim()
}

fn parse_scalar(args: &str) -> std::result::Result<usize, String> {
    let value = strip_brackets(args);
    value
        .parse()
        .map_err(|_| format!("expected a non-negative integer, got '{value}'"))
}

fn parse_coords(args: &str) -> std::result::Result<Position, String> {
    Position::parse_one_indexed(strip_brackets(args))
}

impl FromStr for CaveLayout {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let mut entries = LayoutEntries::default();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, rest)) = line.split_once('[') else {
                tracing::warn!(line_number = idx + 1, line, "skipping layout line without '['");
                continue;
            };

            let args = rest.split('#').next().unwrap_or_default();
            let key = key.trim().to_ascii_uppercase();

            entries
                .apply(&key, args)
                .map_err(|reason| Error::LayoutParse {
                    line_number: idx + 1,
                    line: line.to_string(),
                    reason,
                })?;
        }

        entries.finish()
    }
}
