//! Cave geometry, percepts, and layout descriptions

pub mod grid;
pub mod layout;
pub mod percept;

pub use grid::{Direction, GridIndex, Position};
pub use layout::CaveLayout;
pub use percept::{HazardKind, Percept, PerceptSet};
