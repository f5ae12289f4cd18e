//! Observer pattern for exploration pipelines
//!
//! Observers allow composable data collection during exploration without
//! coupling the pipeline to specific output formats.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::episode::{EpisodeOutcome, EpisodeSummary, EvaluationResult, StepRecord};
use crate::{Result, navigation::DecisionTier, ports::Observer};

/// Complete record of one episode, written as a JSONL line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeLog {
    pub summary: EpisodeSummary,
    pub steps: Vec<StepRecord>,
}

#[derive(Debug, Default, Clone, Copy)]
struct OutcomeTally {
    won: usize,
    died: usize,
    exhausted: usize,
    stuck: usize,
}

impl OutcomeTally {
    fn record(&mut self, outcome: EpisodeOutcome) {
        match outcome {
            EpisodeOutcome::Won => self.won += 1,
            EpisodeOutcome::Died => self.died += 1,
            EpisodeOutcome::Exhausted => self.exhausted += 1,
            EpisodeOutcome::Stuck => self.stuck += 1,
        }
    }

    fn message(&self) -> String {
        format!(
            "W:{} D:{} E:{} S:{}",
            self.won, self.died, self.exhausted, self.stuck
        )
    }
}

/// Progress bar observer - Shows exploration progress
#[derive(Default)]
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    tally: OutcomeTally,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.tally.record(summary.outcome);
        if let Some(pb) = &self.progress_bar {
            pb.set_position(summary.episode as u64 + 1);
            pb.set_message(self.tally.message());
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks outcomes and how the policy decided
#[derive(Debug, Default)]
pub struct MetricsObserver {
    summaries: Vec<EpisodeSummary>,
    tiers: HashMap<DecisionTier, usize>,
    steps: usize,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn episodes(&self) -> usize {
        self.summaries.len()
    }

    /// Total steps observed across all episodes
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of steps decided by a given tier
    pub fn tier_count(&self, tier: DecisionTier) -> usize {
        self.tiers.get(&tier).copied().unwrap_or(0)
    }

    pub fn summaries(&self) -> &[EpisodeSummary] {
        &self.summaries
    }

    pub fn result(&self) -> EvaluationResult {
        EvaluationResult::from_summaries(&self.summaries)
    }
}

impl Observer for MetricsObserver {
    fn on_step(&mut self, step: &StepRecord) -> Result<()> {
        self.steps += 1;
        if let Some(tier) = step.tier {
            *self.tiers.entry(tier).or_insert(0) += 1;
        }
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.summaries.push(summary.clone());
        Ok(())
    }
}

/// JSONL observer - Exports one episode per line, steps included
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_steps: Vec<StepRecord>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            current_steps: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.current_steps.clear();
        Ok(())
    }

    fn on_step(&mut self, step: &StepRecord) -> Result<()> {
        self.current_steps.push(step.clone());
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        let log = EpisodeLog {
            summary: summary.clone(),
            steps: std::mem::take(&mut self.current_steps),
        };

        serde_json::to_writer(&mut self.writer, &log)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// CSV observer - One row per episode summary
pub struct CsvObserver {
    writer: csv::Writer<File>,
}

impl CsvObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            writer: csv::Writer::from_path(path)?,
        })
    }
}

impl Observer for CsvObserver {
    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.writer.serialize(summary)?;
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Shares an observer with the caller so its data can be read after the
/// pipeline, which owns its boxed observers, has finished.
pub struct SharedObserver<O> {
    inner: Arc<Mutex<O>>,
}

impl<O: Observer> SharedObserver<O> {
    /// Wrap `observer`, returning the pipeline side and the caller's handle.
    pub fn new(observer: O) -> (Self, Arc<Mutex<O>>) {
        let inner = Arc::new(Mutex::new(observer));
        (
            Self {
                inner: Arc::clone(&inner),
            },
            inner,
        )
    }

    fn lock(&self) -> MutexGuard<'_, O> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<O: Observer> Observer for SharedObserver<O> {
    fn on_run_start(&mut self, total_episodes: usize) -> Result<()> {
        self.lock().on_run_start(total_episodes)
    }

    fn on_episode_start(&mut self, episode: usize) -> Result<()> {
        self.lock().on_episode_start(episode)
    }

    fn on_step(&mut self, step: &StepRecord) -> Result<()> {
        self.lock().on_step(step)
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.lock().on_episode_end(summary)
    }

    fn on_run_end(&mut self) -> Result<()> {
        self.lock().on_run_end()
    }
}
