//! Observer port - abstraction for exploration observation and data collection
//!
//! Observers let the exploration pipeline report what happens without
//! knowing where the data ends up: a progress bar, a metrics tally, or a
//! JSONL or CSV export.

use crate::{
    Result,
    pipeline::{EpisodeSummary, StepRecord},
};

/// Observer trait for monitoring exploration runs.
///
/// # Event Sequence
///
/// 1. `on_run_start(total_episodes)` - once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(step)` - for each autonomous step
///    - `on_episode_end(summary)`
/// 3. `on_run_end()` - once at the end
///
/// Every method defaults to doing nothing.
///
/// # Examples
///
/// ```
/// use wumpus::{pipeline::EpisodeSummary, ports::Observer};
///
/// struct WinCounter {
///     wins: usize,
/// }
///
/// impl Observer for WinCounter {
///     fn on_episode_end(&mut self, summary: &EpisodeSummary) -> wumpus::Result<()> {
///         if summary.outcome.is_win() {
///             self.wins += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called before the first episode.
    fn on_run_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts, with its 0-based index.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every step the policy takes.
    fn on_step(&mut self, _step: &StepRecord) -> Result<()> {
        Ok(())
    }

    /// Called when an episode reaches a terminal outcome.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called after the last episode. Flush buffered output here.
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
