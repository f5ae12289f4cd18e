//! Tier order and reproducibility of the navigation policy.

mod common;

use common::*;
use rand::{SeedableRng, rngs::StdRng};
use wumpus::{
    navigation::{DecisionTier, NavigationPolicy},
    world::Direction,
};

#[test]
fn test_frontier_beats_backtracking() {
    let mut beliefs = grid4();
    observe_all(&mut beliefs, &[(pos(0, 0), none()), (pos(0, 1), none())]);

    // From (0, 1): (0, 0) is visited, (0, 2) and (1, 1) are safe frontier.
    for seed in 0..20 {
        let choice = NavigationPolicy::seeded(seed).choose(pos(0, 1), &beliefs);
        assert_eq!(choice.tier, DecisionTier::FrontierSafe);
        assert!([pos(0, 2), pos(1, 1)].contains(&choice.target));
    }
}

#[test]
fn test_backtracks_before_taking_risks() {
    let mut beliefs = grid4();
    observe_all(&mut beliefs, &[(pos(0, 0), none()), (pos(0, 1), breeze())]);

    // From (0, 1): (0, 0) visited, (1, 1) and (0, 2) suspected.
    let choice = NavigationPolicy::seeded(3).choose(pos(0, 1), &beliefs);
    assert_eq!(choice.tier, DecisionTier::Backtrack);
    assert_eq!(choice.target, pos(0, 0));
    assert_eq!(choice.direction_from(pos(0, 1)), Some(Direction::Left));
}

#[test]
fn test_calculated_risk_prefers_lower_danger() {
    let mut beliefs = wumpus::BeliefGrid::new(4, pos(1, 1)).unwrap();
    observe_all(&mut beliefs, &[(pos(1, 1), breeze()), (pos(0, 0), breeze())]);

    // Around (1, 1): right and down carry 0.25, left and up carry 0.5.
    let choice = NavigationPolicy::seeded(9).choose(pos(1, 1), &beliefs);
    assert_eq!(choice.tier, DecisionTier::CalculatedRisk);
    assert_eq!(choice.target, pos(1, 2));
}

#[test]
fn test_same_seed_same_choices() {
    let mut beliefs = grid4();
    observe_all(&mut beliefs, &[(pos(0, 0), none()), (pos(1, 1), none())]);

    let picks = |seed| {
        let mut policy = NavigationPolicy::with_rng(StdRng::seed_from_u64(seed));
        (0..10)
            .map(|_| policy.choose(pos(1, 1), &beliefs).target)
            .collect::<Vec<_>>()
    };
    assert_eq!(picks(21), picks(21));
}

#[test]
fn test_reseed_restarts_the_sequence() {
    let mut beliefs = grid4();
    observe_all(&mut beliefs, &[(pos(0, 0), none()), (pos(1, 1), none())]);

    let mut policy = NavigationPolicy::seeded(5);
    let first: Vec<_> = (0..8)
        .map(|_| policy.choose(pos(1, 1), &beliefs).target)
        .collect();
    policy.reseed(Some(5));
    let again: Vec<_> = (0..8)
        .map(|_| policy.choose(pos(1, 1), &beliefs).target)
        .collect();
    assert_eq!(first, again);
}
