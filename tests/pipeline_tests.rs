//! Exploration pipeline: determinism, observer callbacks, and exports.

use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use wumpus::{
    app::App,
    navigation::DecisionTier,
    pipeline::{
        CsvObserver, EpisodeLog, EpisodeOutcome, EpisodeSummary, EvaluationResult,
        ExplorationConfig, ExplorationPipeline, JsonlObserver, MetricsObserver, Observer,
        SharedObserver, StepRecord,
    },
    world::CaveLayout,
};

fn config(episodes: usize, base_seed: u64) -> ExplorationConfig {
    ExplorationConfig {
        episodes,
        base_seed: Some(base_seed),
        max_moves: None,
    }
}

/// Records the order of callbacks.
#[derive(Default)]
struct EventLog {
    events: Vec<String>,
}

impl Observer for EventLog {
    fn on_run_start(&mut self, total_episodes: usize) -> wumpus::Result<()> {
        self.events.push(format!("run_start:{total_episodes}"));
        Ok(())
    }

    fn on_episode_start(&mut self, episode: usize) -> wumpus::Result<()> {
        self.events.push(format!("episode_start:{episode}"));
        Ok(())
    }

    fn on_step(&mut self, step: &StepRecord) -> wumpus::Result<()> {
        self.events.push(format!("step:{}:{}", step.episode, step.step));
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> wumpus::Result<()> {
        self.events.push(format!("episode_end:{}", summary.episode));
        Ok(())
    }

    fn on_run_end(&mut self) -> wumpus::Result<()> {
        self.events.push("run_end".to_string());
        Ok(())
    }
}

fn summaries(episodes: usize, base_seed: u64) -> Vec<EpisodeSummary> {
    let app = App::for_testing().build();
    let (observer, metrics) = SharedObserver::new(MetricsObserver::new());
    let mut pipeline =
        ExplorationPipeline::new(config(episodes, base_seed)).with_observer(Box::new(observer));
    pipeline.run(&app, &CaveLayout::classic()).unwrap();

    let metrics = metrics.lock().unwrap();
    metrics.summaries().to_vec()
}

#[test]
fn test_fixed_seed_runs_are_identical() {
    assert_eq!(summaries(12, 2024), summaries(12, 2024));
}

#[test]
fn test_episode_seeds_are_derived_from_the_base() {
    let runs = summaries(4, u64::MAX - 1);
    let seeds: Vec<_> = runs.iter().map(|s| s.seed).collect();
    assert_eq!(seeds, vec![Some(u64::MAX - 1), Some(u64::MAX), Some(0), Some(1)]);
}

#[test]
fn test_single_episode_matches_its_slot_in_a_run() {
    let app = App::for_testing().build();
    let mut pipeline = ExplorationPipeline::new(config(1, 0));
    let alone = pipeline
        .run_episode(&app, &CaveLayout::classic(), 3, 503)
        .unwrap();

    let run = summaries(4, 500);
    assert_eq!(alone, run[3]);
}

#[test]
fn test_observer_callback_order() {
    let app = App::for_testing().build();
    let (observer, log) = SharedObserver::new(EventLog::default());
    let mut pipeline = ExplorationPipeline::new(config(2, 7)).with_observer(Box::new(observer));
    pipeline.run(&app, &CaveLayout::classic()).unwrap();

    let log: Arc<Mutex<EventLog>> = log;
    let events = &log.lock().unwrap().events;
    assert_eq!(events.first().map(String::as_str), Some("run_start:2"));
    assert_eq!(events.last().map(String::as_str), Some("run_end"));
    assert_eq!(events[1], "episode_start:0");

    let second_start = events
        .iter()
        .position(|event| event == "episode_start:1")
        .unwrap();
    assert_eq!(events[second_start - 1], "episode_end:0");
    assert!(events[2..second_start - 1]
        .iter()
        .all(|event| event.starts_with("step:0:")));
}

#[test]
fn test_outcomes_are_consistent_with_summaries() {
    for summary in summaries(30, 11) {
        match summary.outcome {
            EpisodeOutcome::Won => {
                assert_eq!((summary.final_row, summary.final_col), (2, 3));
                assert!(summary.death_cause.is_none());
            }
            EpisodeOutcome::Died => assert!(summary.death_cause.is_some()),
            EpisodeOutcome::Exhausted => assert_eq!(summary.moves_made, 20),
            EpisodeOutcome::Stuck => panic!("the classic cave always has a neighbor"),
        }
        assert!(summary.moves_made <= 20);
        assert!(summary.chambers_visited >= 1);
    }
}

#[test]
fn test_max_moves_override_caps_every_episode() {
    let app = App::for_testing().build();
    let mut pipeline = ExplorationPipeline::new(ExplorationConfig {
        episodes: 10,
        base_seed: Some(1),
        max_moves: Some(1),
    });
    let result = pipeline.run(&app, &CaveLayout::classic()).unwrap();

    // One step from the start never reaches the goal or a hazard.
    assert_eq!(result.exhausted, 10);
    assert_eq!(result.avg_moves, 1.0);
}

#[test]
fn test_metrics_agree_with_the_returned_result() {
    let app = App::for_testing().build();
    let (observer, metrics) = SharedObserver::new(MetricsObserver::new());
    let mut pipeline = ExplorationPipeline::new(config(15, 77)).with_observer(Box::new(observer));
    let result = pipeline.run(&app, &CaveLayout::classic()).unwrap();

    let metrics = metrics.lock().unwrap();
    assert_eq!(metrics.result(), result);

    let decided: usize = [
        DecisionTier::FrontierSafe,
        DecisionTier::Backtrack,
        DecisionTier::CalculatedRisk,
        DecisionTier::Stuck,
    ]
    .into_iter()
    .map(|tier| metrics.tier_count(tier))
    .sum();
    assert_eq!(decided, metrics.steps());

    let total_moves: usize = metrics.summaries().iter().map(|s| s.moves_made).sum();
    assert_eq!(total_moves, metrics.steps());
}

#[test]
fn test_exports_to_jsonl_csv_and_json() {
    let temp_dir = TempDir::new().unwrap();
    let jsonl = temp_dir.path().join("episodes.jsonl");
    let csv = temp_dir.path().join("episodes.csv");
    let json = temp_dir.path().join("result.json");

    let app = App::for_testing().build();
    let mut pipeline = ExplorationPipeline::new(config(5, 3))
        .with_observer(Box::new(JsonlObserver::new(&jsonl).unwrap()))
        .with_observer(Box::new(CsvObserver::new(&csv).unwrap()));
    let result = pipeline.run(&app, &CaveLayout::classic()).unwrap();
    result.save(&json).unwrap();

    let logs: Vec<EpisodeLog> = std::fs::read_to_string(&jsonl)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(logs.len(), 5);
    for log in &logs {
        assert_eq!(log.steps.len(), log.summary.moves_made);
    }

    let csv_text = std::fs::read_to_string(&csv).unwrap();
    assert_eq!(csv_text.lines().count(), 6);

    assert_eq!(EvaluationResult::load(&json).unwrap(), result);
}
