//! Coordinates, directions and 4-connected adjacency for square grids

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A zero-indexed chamber coordinate.
///
/// Displayed 1-indexed, matching how chambers are named to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Build a position from 1-indexed coordinates.
    ///
    /// Returns `None` when either component is zero.
    ///
    /// ```
    /// use wumpus::world::Position;
    ///
    /// assert_eq!(Position::from_one_indexed(1, 2), Some(Position::new(0, 1)));
    /// assert_eq!(Position::from_one_indexed(0, 2), None);
    /// ```
    pub fn from_one_indexed(row: usize, col: usize) -> Option<Self> {
        Some(Self {
            row: row.checked_sub(1)?,
            col: col.checked_sub(1)?,
        })
    }

    /// Parse a 1-indexed `row,col` pair, as written in layout files and on
    /// the command line.
    ///
    /// ```
    /// use wumpus::world::Position;
    ///
    /// assert_eq!(Position::parse_one_indexed(" 2, 3 "), Ok(Position::new(1, 2)));
    /// assert!(Position::parse_one_indexed("0,1").is_err());
    /// ```
    pub fn parse_one_indexed(text: &str) -> Result<Self, String> {
        let text = text.trim();
        let (row, col) = text
            .split_once(',')
            .ok_or_else(|| format!("expected 'row,col', got '{text}'"))?;
        let row: usize = row
            .trim()
            .parse()
            .map_err(|_| format!("invalid row '{}'", row.trim()))?;
        let col: usize = col
            .trim()
            .parse()
            .map_err(|_| format!("invalid column '{}'", col.trim()))?;
        Self::from_one_indexed(row, col)
            .ok_or_else(|| format!("coordinates are 1-indexed, got ({row}, {col})"))
    }

    /// 1-indexed `(row, col)` pair.
    pub fn one_indexed(self) -> (usize, usize) {
        (self.row + 1, self.col + 1)
    }

    /// Chebyshev (king-move) distance to another position.
    pub fn chebyshev(self, other: Position) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    fn offset(self, dr: isize, dc: isize) -> Option<Position> {
        Some(Position {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, c) = self.one_indexed();
        write!(f, "({r}, {c})")
    }
}

/// A movement command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row/column delta for this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Inverse of [`Direction::delta`]; any other delta has no direction.
    pub fn from_delta(dr: isize, dc: isize) -> Option<Direction> {
        match (dr, dc) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Direction that takes `from` to the adjacent cell `to`.
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        let dr = to.row as isize - from.row as isize;
        let dc = to.col as isize - from.col as isize;
        Self::from_delta(dr, dc)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            _ => Err(crate::Error::UnknownDirection {
                input: s.to_string(),
            }),
        }
    }
}

/// Neighbor probe order: right, left, down, up.
const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Addressing and adjacency for an N×N grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridIndex {
    size: usize,
}

impl GridIndex {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// `size²`, or `None` when it does not fit in a `usize`.
    pub fn checked_cell_count(&self) -> Option<usize> {
        self.size.checked_mul(self.size)
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.size && position.col < self.size
    }

    /// Row-major index of an in-bounds position.
    pub fn index_of(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.row * self.size + position.col)
    }

    pub fn position_of(&self, index: usize) -> Position {
        Position::new(index / self.size, index % self.size)
    }

    /// Validate that a position lies on the grid.
    pub fn check(&self, position: Position) -> crate::Result<()> {
        if self.contains(position) {
            Ok(())
        } else {
            Err(crate::Error::PositionOutOfBounds {
                position,
                size: self.size,
            })
        }
    }

    /// The ≤4 in-bounds 4-connected neighbors, in right/left/down/up order.
    pub fn neighbors(&self, position: Position) -> Vec<Position> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| position.offset(dr, dc))
            .filter(|p| self.contains(*p))
            .collect()
    }

    /// Destination of a single step, if it stays on the grid.
    pub fn step(&self, position: Position, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.delta();
        position.offset(dr, dc).filter(|p| self.contains(*p))
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cell_count()).map(|i| self.position_of(i))
    }
}
