//! Exploration pipeline
//!
//! Runs autonomous episodes on a cave layout and reports them to composable
//! observers:
//! - [`ExplorationPipeline`] drives many seeded episodes and aggregates an
//!   [`EvaluationResult`]
//! - [`explore`] drives a single session to its terminal outcome
//! - observers collect progress, metrics, and JSONL or CSV exports

pub mod episode;
pub mod exploration;
pub mod observers;

pub use episode::{EpisodeOutcome, EpisodeSummary, EvaluationResult, StepRecord};
pub use exploration::{ExplorationConfig, ExplorationPipeline, explore};
pub use observers::{
    CsvObserver, EpisodeLog, JsonlObserver, MetricsObserver, ProgressObserver, SharedObserver,
};

pub use crate::ports::Observer;
