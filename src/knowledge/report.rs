//! Read-only views of the knowledge base: per-chamber query reports and
//! grid snapshots for display.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::cell::CellBelief;
use crate::{Error, world::Position};

/// Status of a chamber as reported to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChamberStatus {
    #[serde(rename = "DEFINITELY DANGEROUS")]
    DefinitelyDangerous,
    #[serde(rename = "SAFE (VISITED)")]
    SafeVisited,
    #[serde(rename = "SAFE")]
    Safe,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl ChamberStatus {
    /// Certainty of a hazard is checked before the visited and safe cases.
    pub fn of(cell: &CellBelief) -> Self {
        if cell.is_certainly_dangerous() {
            ChamberStatus::DefinitelyDangerous
        } else if cell.visited {
            ChamberStatus::SafeVisited
        } else if cell.is_safe {
            ChamberStatus::Safe
        } else {
            ChamberStatus::Unknown
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChamberStatus::DefinitelyDangerous => "DEFINITELY DANGEROUS",
            ChamberStatus::SafeVisited => "SAFE (VISITED)",
            ChamberStatus::Safe => "SAFE",
            ChamberStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ChamberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer to "what do you know about chamber (r, c)?".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChamberReport {
    /// 1-indexed `(row, col)`.
    pub coords: (usize, usize),
    pub status: ChamberStatus,
    pub percepts_observed: String,
    pub inferred_percepts: String,
    pub prob_pit: f64,
    pub prob_wumpus: f64,
}

impl ChamberReport {
    pub fn new(position: Position, cell: &CellBelief) -> Self {
        let percepts_observed = if cell.visited {
            cell.percepts.describe()
        } else {
            "None".to_string()
        };

        let mut inferred = Vec::new();
        if !cell.visited {
            if cell.prob_pit >= 1.0 {
                inferred.push("Pit CERTAIN (Prob=1.0)");
            }
            if cell.prob_wumpus >= 1.0 {
                inferred.push("Wumpus CERTAIN (Prob=1.0)");
            }
        }
        let inferred_percepts = if inferred.is_empty() {
            "None".to_string()
        } else {
            inferred.join(" / ")
        };

        Self {
            coords: position.one_indexed(),
            status: ChamberStatus::of(cell),
            percepts_observed,
            inferred_percepts,
            prob_pit: cell.prob_pit,
            prob_wumpus: cell.prob_wumpus,
        }
    }
}

/// Query result in its external shape: either a report or
/// `{"error": "Invalid Chamber Coordinates."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Report(ChamberReport),
    Error { error: String },
}

impl QueryResponse {
    pub fn report(&self) -> Option<&ChamberReport> {
        match self {
            QueryResponse::Report(report) => Some(report),
            QueryResponse::Error { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryResponse::Error { .. })
    }
}

impl From<crate::Result<ChamberReport>> for QueryResponse {
    fn from(result: crate::Result<ChamberReport>) -> Self {
        match result {
            Ok(report) => QueryResponse::Report(report),
            Err(err) => QueryResponse::Error {
                error: err.to_string(),
            },
        }
    }
}

impl From<Error> for QueryResponse {
    fn from(err: Error) -> Self {
        QueryResponse::Error {
            error: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellClass {
    Visited,
    Safe,
    Unknown,
}

/// Shading bucket from `prob_pit + prob_wumpus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DangerLevel {
    High,
    Low,
    None,
}

impl DangerLevel {
    pub fn from_total(total: f64) -> Self {
        if total > 0.9 {
            DangerLevel::High
        } else if total > 0.0 {
            DangerLevel::Low
        } else {
            DangerLevel::None
        }
    }
}

/// Display entry for one chamber of the knowledge grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    pub r: usize,
    pub c: usize,
    pub r_1idx: usize,
    pub c_1idx: usize,
    pub symbol: String,
    pub class: CellClass,
    pub danger: DangerLevel,
}

impl CellView {
    pub fn new(position: Position, cell: &CellBelief, is_agent: bool) -> Self {
        let class = if cell.visited {
            CellClass::Visited
        } else if cell.is_safe {
            CellClass::Safe
        } else {
            CellClass::Unknown
        };

        let symbol = if is_agent {
            "A".to_string()
        } else if cell.visited {
            let initials = cell.percepts.initials();
            if initials.is_empty() {
                "V".to_string()
            } else {
                initials
            }
        } else {
            "?".to_string()
        };

        let (r_1idx, c_1idx) = position.one_indexed();
        Self {
            r: position.row,
            c: position.col,
            r_1idx,
            c_1idx,
            symbol,
            class,
            danger: DangerLevel::from_total(cell.total_danger()),
        }
    }
}
