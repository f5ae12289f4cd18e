//! Exploration pipeline for autonomous agents

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::episode::{EpisodeOutcome, EpisodeSummary, EvaluationResult, StepRecord};
use crate::{
    Result,
    agent::{AgentController, AgentState},
    app::{App, SessionConfig},
    navigation::DecisionTier,
    ports::{Observer, World},
    world::CaveLayout,
};

/// Exploration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorationConfig {
    /// Number of episodes to run
    pub episodes: usize,

    /// Seed of episode 0; episode `i` uses `base_seed + i` (wrapping).
    /// Falls back to the app's default seed, then to a random one.
    pub base_seed: Option<u64>,

    /// Override the layout's move budget
    pub max_moves: Option<usize>,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            base_seed: None,
            max_moves: None,
        }
    }
}

/// Drive a session until it wins, dies, exhausts its budget, or gets stuck.
///
/// `on_step` sees every step the policy takes. Returns the outcome together
/// with the number of calculated-risk moves.
pub fn explore<W, R, F>(
    controller: &mut AgentController<W, R>,
    episode: usize,
    mut on_step: F,
) -> Result<(EpisodeOutcome, usize)>
where
    W: World,
    R: Rng,
    F: FnMut(&StepRecord) -> Result<()>,
{
    let mut step = 0;
    let mut risky_moves = 0;

    loop {
        if controller.has_won() {
            return Ok((EpisodeOutcome::Won, risky_moves));
        }
        match controller.state() {
            AgentState::Active => {}
            AgentState::Won => return Ok((EpisodeOutcome::Won, risky_moves)),
            AgentState::Dead => return Ok((EpisodeOutcome::Died, risky_moves)),
            AgentState::Exhausted => return Ok((EpisodeOutcome::Exhausted, risky_moves)),
        }

        let decision = controller.advance();
        step += 1;

        let record = StepRecord::new(episode, step, &decision, controller);
        if record.is_calculated_risk() {
            risky_moves += 1;
        }
        on_step(&record)?;

        if decision
            .choice
            .is_some_and(|choice| choice.tier == DecisionTier::Stuck)
        {
            return Ok((EpisodeOutcome::Stuck, risky_moves));
        }
    }
}

/// Runs seeded episodes on one layout and reports them to observers
pub struct ExplorationPipeline {
    config: ExplorationConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl ExplorationPipeline {
    /// Create a new exploration pipeline
    pub fn new(config: ExplorationConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &ExplorationConfig {
        &self.config
    }

    /// Run every configured episode and aggregate the outcomes.
    pub fn run(&mut self, app: &App, layout: &CaveLayout) -> Result<EvaluationResult> {
        let base_seed = self
            .config
            .base_seed
            .or(app.default_seed())
            .unwrap_or_else(rand::random);

        tracing::info!(
            episodes = self.config.episodes,
            base_seed,
            "starting exploration run"
        );

        for observer in &mut self.observers {
            observer.on_run_start(self.config.episodes)?;
        }

        let mut summaries = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let seed = base_seed.wrapping_add(episode as u64);
            summaries.push(self.run_episode(app, layout, episode, seed)?);
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        let result = EvaluationResult::from_summaries(&summaries);
        tracing::info!(
            wins = result.wins,
            deaths = result.deaths,
            exhausted = result.exhausted,
            "exploration run finished"
        );
        Ok(result)
    }

    /// Run a single episode with an explicit policy seed.
    pub fn run_episode(
        &mut self,
        app: &App,
        layout: &CaveLayout,
        episode: usize,
        seed: u64,
    ) -> Result<EpisodeSummary> {
        let mut session = SessionConfig::new().with_seed(seed);
        if let Some(max_moves) = self.config.max_moves {
            session = session.with_max_moves(max_moves);
        }
        let mut controller = app.create_session(layout, session)?;

        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let observers = &mut self.observers;
        let (outcome, risky_moves) = explore(&mut controller, episode, |record| {
            for observer in observers.iter_mut() {
                observer.on_step(record)?;
            }
            Ok(())
        })?;

        let summary = EpisodeSummary::new(episode, Some(seed), outcome, risky_moves, &controller);
        tracing::debug!(episode, seed, %outcome, moves = summary.moves_made, "episode finished");

        for observer in &mut self.observers {
            observer.on_episode_end(&summary)?;
        }
        Ok(summary)
    }
}
