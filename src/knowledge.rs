//! The agent's knowledge base: per-chamber beliefs, deduction and
//! probabilistic inference over hazards, and read-only reports.

pub mod beliefs;
pub mod cell;
pub mod report;

pub use beliefs::BeliefGrid;
pub use cell::CellBelief;
pub use report::{CellClass, CellView, ChamberReport, ChamberStatus, DangerLevel, QueryResponse};
