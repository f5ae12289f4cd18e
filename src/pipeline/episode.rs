//! Records produced while exploring: per-step logs, per-episode summaries
//! and aggregated evaluation results.

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    agent::{AgentController, AgentState, Decision},
    navigation::DecisionTier,
    ports::World,
    world::{Direction, HazardKind, Position},
};

/// How an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeOutcome {
    Won,
    Died,
    /// Move budget ran out with the agent alive.
    Exhausted,
    /// No neighboring chamber to move to.
    Stuck,
}

impl EpisodeOutcome {
    pub fn is_win(self) -> bool {
        self == EpisodeOutcome::Won
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EpisodeOutcome::Won => "won",
            EpisodeOutcome::Died => "died",
            EpisodeOutcome::Exhausted => "exhausted",
            EpisodeOutcome::Stuck => "stuck",
        }
    }
}

impl fmt::Display for EpisodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One autonomous step as seen from outside the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub episode: usize,
    /// 1-based step number within the episode.
    pub step: usize,
    pub from: Position,
    pub to: Position,
    pub direction: Option<Direction>,
    pub tier: Option<DecisionTier>,
    pub success: bool,
    pub message: String,
    /// Agent state after the step.
    pub state: AgentState,
}

impl StepRecord {
    pub fn new<W: World, R: rand::Rng>(
        episode: usize,
        step: usize,
        decision: &Decision,
        controller: &AgentController<W, R>,
    ) -> Self {
        Self {
            episode,
            step,
            from: decision.from,
            to: controller.position(),
            direction: decision.direction,
            tier: decision.choice.map(|choice| choice.tier),
            success: decision.result.success,
            message: decision.result.message.clone(),
            state: controller.state(),
        }
    }

    pub fn is_calculated_risk(&self) -> bool {
        self.tier == Some(DecisionTier::CalculatedRisk)
    }
}

/// Summary of one finished episode.
///
/// Kept flat so it doubles as a CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub episode: usize,
    pub seed: Option<u64>,
    pub outcome: EpisodeOutcome,
    pub death_cause: Option<HazardKind>,
    pub moves_made: usize,
    pub chambers_visited: usize,
    pub risky_moves: usize,
    /// 1-indexed final row.
    pub final_row: usize,
    /// 1-indexed final column.
    pub final_col: usize,
}

impl EpisodeSummary {
    pub fn new<W: World, R: rand::Rng>(
        episode: usize,
        seed: Option<u64>,
        outcome: EpisodeOutcome,
        risky_moves: usize,
        controller: &AgentController<W, R>,
    ) -> Self {
        let (final_row, final_col) = controller.position().one_indexed();
        Self {
            episode,
            seed,
            outcome,
            death_cause: controller.death_cause(),
            moves_made: controller.moves_made(),
            chambers_visited: controller
                .beliefs()
                .cells()
                .filter(|(_, cell)| cell.visited)
                .count(),
            risky_moves,
            final_row,
            final_col,
        }
    }
}

/// Aggregate statistics over a set of episodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub episodes: usize,
    pub wins: usize,
    pub deaths: usize,
    pub exhausted: usize,
    pub stuck: usize,
    pub pit_deaths: usize,
    pub wumpus_deaths: usize,
    pub win_rate: f64,
    pub death_rate: f64,
    pub exhaustion_rate: f64,
    /// Mean moves over all episodes.
    pub avg_moves: f64,
    /// Mean moves over won episodes, if any were won.
    pub avg_moves_to_win: Option<f64>,
}

impl EvaluationResult {
    pub fn from_summaries(summaries: &[EpisodeSummary]) -> Self {
        let episodes = summaries.len();
        let count = |outcome: EpisodeOutcome| {
            summaries
                .iter()
                .filter(|summary| summary.outcome == outcome)
                .count()
        };
        let deaths_by = |kind: HazardKind| {
            summaries
                .iter()
                .filter(|summary| summary.death_cause == Some(kind))
                .count()
        };
        let rate = |n: usize| {
            if episodes > 0 {
                n as f64 / episodes as f64
            } else {
                0.0
            }
        };

        let wins = count(EpisodeOutcome::Won);
        let deaths = count(EpisodeOutcome::Died);
        let exhausted = count(EpisodeOutcome::Exhausted);

        let total_moves: usize = summaries.iter().map(|s| s.moves_made).sum();
        let win_moves: usize = summaries
            .iter()
            .filter(|s| s.outcome.is_win())
            .map(|s| s.moves_made)
            .sum();

        Self {
            episodes,
            wins,
            deaths,
            exhausted,
            stuck: count(EpisodeOutcome::Stuck),
            pit_deaths: deaths_by(HazardKind::Pit),
            wumpus_deaths: deaths_by(HazardKind::Wumpus),
            win_rate: rate(wins),
            death_rate: rate(deaths),
            exhaustion_rate: rate(exhausted),
            avg_moves: if episodes > 0 {
                total_moves as f64 / episodes as f64
            } else {
                0.0
            },
            avg_moves_to_win: (wins > 0).then(|| win_moves as f64 / wins as f64),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}
