//! Session behavior of the agent controller: termination, exhaustion,
//! winning, and the query surface.

mod common;

use common::*;
use wumpus::{
    agent::AgentState,
    world::{CaveLayout, Direction, HazardKind},
};

fn pit_ahead() -> CaveLayout {
    CaveLayout::new(pos(3, 3), pos(3, 0)).with_pit(pos(0, 2))
}

#[test]
fn test_walking_into_a_pit_ends_the_session() {
    let mut agent = session(pit_ahead(), 1);

    let first = agent.move_in(Direction::Right);
    assert!(first.success);
    assert_eq!(first.message, "Moved to (1, 2). Percepts: Breeze");

    let fatal = agent.move_in(Direction::Right);
    assert!(!fatal.success);
    assert_eq!(fatal.message, "TRAGEDY! Agent died at (1, 3) due to a Pit.");
    assert!(!agent.is_alive());
    assert_eq!(agent.death_cause(), Some(HazardKind::Pit));
    assert_eq!(agent.moves_made(), 2);

    let status = agent.status();
    assert!(!status.alive);
    assert!(status.game_over);
    assert_eq!(status.state, AgentState::Dead);
}

#[test]
fn test_no_moves_after_death() {
    let mut agent = session(pit_ahead(), 1);
    agent.move_in(Direction::Right);
    agent.move_in(Direction::Right);
    let position = agent.position();

    for direction in Direction::ALL {
        let result = agent.move_in(direction);
        assert!(!result.success);
        assert_eq!(result.message, "Simulation Ended.");
    }
    assert!(!agent.decide_next_move().success);
    assert_eq!(agent.moves_made(), 2);
    assert_eq!(agent.position(), position);
}

#[test]
fn test_reaching_the_goal_wins() {
    let mut agent = session(CaveLayout::classic(), 1);

    assert!(agent.move_named("right").success);
    let glitter = agent.move_named("right");
    assert_eq!(glitter.message, "Moved to (1, 3). Percepts: Glitter");

    let win = agent.move_named("down");
    assert!(win.success);
    assert_eq!(win.message, "Found paradise at (2, 3)! Horray!");
    assert!(agent.has_won());
    assert_eq!(agent.state(), AgentState::Won);

    let after = agent.move_named("down");
    assert!(!after.success);
    assert_eq!(after.message, "Simulation Ended.");
}

#[test]
fn test_goal_at_start_refuses_to_move() {
    let layout = CaveLayout::new(pos(3, 3), pos(0, 0));
    let mut agent = session(layout, 1);

    assert!(agent.has_won());
    let result = agent.move_in(Direction::Right);
    assert!(!result.success);
    assert_eq!(result.message, "No need to move from paradise! You already won!");
    assert_eq!(agent.moves_made(), 0);
}

#[test]
fn test_budget_exhaustion_is_terminal_but_not_death() {
    let mut agent = session(CaveLayout::classic().with_max_moves(2), 1);

    assert!(agent.move_in(Direction::Right).success);
    assert_eq!(agent.state(), AgentState::Active);
    assert!(agent.move_in(Direction::Left).success);
    assert_eq!(agent.state(), AgentState::Exhausted);

    let status = agent.status();
    assert!(status.alive);
    assert!(status.game_over);
    assert!(!status.has_won);
    assert_eq!(status.moves_made, 2);

    assert_eq!(agent.move_in(Direction::Down).message, "Simulation Ended.");
    assert_eq!(agent.moves_made(), 2);
}

#[test]
fn test_death_on_the_last_budgeted_move_stays_dead() {
    let mut agent = session(pit_ahead().with_max_moves(2), 1);

    assert!(agent.move_in(Direction::Right).success);
    let fatal = agent.move_in(Direction::Right);
    assert_eq!(fatal.message, "TRAGEDY! Agent died at (1, 3) due to a Pit.");
    assert_eq!(agent.moves_made(), agent.max_moves());
    assert_eq!(agent.state(), AgentState::Dead);
    assert!(!agent.status().alive);
}

#[test]
fn test_win_on_the_last_budgeted_move_stays_won() {
    let mut agent = session(CaveLayout::classic().with_max_moves(3), 1);

    assert!(agent.move_named("right").success);
    assert!(agent.move_named("right").success);
    let win = agent.move_named("down");
    assert_eq!(win.message, "Found paradise at (2, 3)! Horray!");
    assert_eq!(agent.moves_made(), agent.max_moves());
    assert_eq!(agent.state(), AgentState::Won);

    let status = agent.status();
    assert!(status.alive);
    assert!(status.has_won);
    assert!(status.game_over);
}

#[test]
fn test_autonomous_runs_keep_the_visited_invariant() {
    for seed in 0..25 {
        let mut agent = session(CaveLayout::classic(), seed);
        while !agent.state().is_terminal() {
            let decision = agent.advance();
            assert_visited_invariant(agent.beliefs());
            if !decision.result.success {
                break;
            }
        }
        assert!(agent.moves_made() <= agent.max_moves());
    }
}

#[test]
fn test_policy_never_walks_into_a_proven_hazard_when_safe_options_exist() {
    for seed in 0..25 {
        let mut agent = session(CaveLayout::classic(), seed);
        while !agent.state().is_terminal() {
            let decision = agent.advance();
            if let Some(choice) = decision.choice
                && choice.tier != wumpus::navigation::DecisionTier::CalculatedRisk
            {
                let cell = agent.beliefs().cell(choice.target).unwrap();
                assert!(cell.is_safe);
            }
            if !decision.result.success {
                break;
            }
        }
    }
}

#[test]
fn test_query_uses_one_indexed_coordinates() {
    let mut agent = session(CaveLayout::classic(), 1);
    agent.move_named("down");
    let before = agent.beliefs().clone();

    let report = agent.query(2, 1);
    let report = report.report().unwrap();
    assert_eq!(report.coords, (2, 1));
    assert_eq!(report.percepts_observed, "Stench");

    for (row, col) in [(0, 0), (0, 2), (5, 1), (1, 5)] {
        let response = agent.query(row, col);
        assert!(response.is_error());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({ "error": "Invalid Chamber Coordinates." })
        );
    }
    assert_eq!(agent.beliefs(), &before);
}

#[test]
fn test_snapshot_marks_the_agent() {
    let mut agent = session(CaveLayout::classic(), 1);
    agent.move_named("right");

    let snapshot = agent.snapshot();
    assert_eq!(snapshot.len(), 16);
    let marked: Vec<_> = snapshot.iter().filter(|view| view.symbol == "A").collect();
    assert_eq!(marked.len(), 1);
    assert_eq!((marked[0].r_1idx, marked[0].c_1idx), (1, 2));
    assert_eq!(snapshot[0].symbol, "V");
}
