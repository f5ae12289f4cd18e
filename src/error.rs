//! Error types for the wumpus crate

use thiserror::Error;

use crate::world::{HazardKind, Position};

/// Main error type for the wumpus crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Invalid Chamber Coordinates.")]
    InvalidCoordinates,

    #[error("position {position} is outside the {size}x{size} grid")]
    PositionOutOfBounds { position: Position, size: usize },

    #[error("grid size must be at least 1 (got {size})")]
    InvalidGridSize { size: usize },

    #[error("belief grid is {beliefs}x{beliefs} but the world is {world}x{world}")]
    GridSizeMismatch { beliefs: usize, world: usize },

    #[error("unknown direction '{input}' (expected up, down, left or right)")]
    UnknownDirection { input: String },

    #[error("layout line {line_number} ('{line}'): {reason}")]
    LayoutParse {
        line_number: usize,
        line: String,
        reason: String,
    },

    #[error("layout is missing required key '{key}'")]
    MissingLayoutKey { key: String },

    #[error("{kind} at {position} is too close to the start; the agent needs a fair chance")]
    UnfairHazardPlacement { kind: HazardKind, position: Position },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("knowledge base is inconsistent: {message}")]
    CorruptKnowledge { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
