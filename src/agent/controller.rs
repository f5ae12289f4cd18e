//! Agent controller: one explicit session per game.
//!
//! The controller owns the ground-truth world, the agent's knowledge base,
//! its navigation policy and the run state (position, move count, outcome).
//! Every operation runs to completion; sessions share nothing.

use rand::{Rng, rngs::StdRng};

use super::state::{AgentState, AgentStatus, Decision, MoveResult};
use crate::{
    Error, Result,
    knowledge::{BeliefGrid, CellView, QueryResponse},
    navigation::{DecisionTier, NavigationPolicy},
    ports::World,
    world::{Direction, HazardKind, PerceptSet, Position},
};

pub struct AgentController<W, R = StdRng> {
    world: W,
    beliefs: BeliefGrid,
    policy: NavigationPolicy<R>,
    position: Position,
    moves_made: usize,
    max_moves: usize,
    state: AgentState,
    death_cause: Option<HazardKind>,
}

impl<W, R> std::fmt::Debug for AgentController<W, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentController")
            .field("position", &self.position)
            .field("moves_made", &self.moves_made)
            .field("max_moves", &self.max_moves)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<W: World, R: Rng> AgentController<W, R> {
    /// Start a session at `start`, observing the start chamber immediately.
    ///
    /// A `max_moves` of zero yields a session that is already exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the world has size zero or `start` is off the grid.
    pub fn new(
        world: W,
        start: Position,
        max_moves: usize,
        policy: NavigationPolicy<R>,
    ) -> Result<Self> {
        let beliefs = BeliefGrid::new(world.size(), start)?;
        if world.grid() != beliefs.grid() {
            return Err(Error::GridSizeMismatch {
                beliefs: beliefs.size(),
                world: world.grid().size(),
            });
        }

        let mut controller = Self {
            world,
            beliefs,
            policy,
            position: start,
            moves_made: 0,
            max_moves,
            state: AgentState::Active,
            death_cause: None,
        };
        controller.observe(start)?;
        if max_moves == 0 {
            controller.state = AgentState::Exhausted;
            tracing::info!(max_moves, "move budget exhausted");
        }
        Ok(controller)
    }

    fn observe(&mut self, position: Position) -> Result<PerceptSet> {
        let percepts = self.world.percepts_at(position);
        self.beliefs.update_percepts(position, percepts.clone())?;
        self.beliefs.update_probabilities();
        Ok(percepts)
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn beliefs(&self) -> &BeliefGrid {
        &self.beliefs
    }

    pub fn policy_mut(&mut self) -> &mut NavigationPolicy<R> {
        &mut self.policy
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn moves_made(&self) -> usize {
        self.moves_made
    }

    pub fn max_moves(&self) -> usize {
        self.max_moves
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state != AgentState::Dead
    }

    /// The hazard that killed the agent, once dead.
    pub fn death_cause(&self) -> Option<HazardKind> {
        self.death_cause
    }

    /// Standing on the goal chamber.
    pub fn has_won(&self) -> bool {
        self.world.is_goal(self.position)
    }

    pub fn status(&self) -> AgentStatus {
        AgentStatus {
            alive: self.is_alive(),
            has_won: self.has_won(),
            moves_made: self.moves_made,
            max_moves: self.max_moves,
            current_pos: self.position.one_indexed(),
            game_over: self.state.is_terminal(),
            state: self.state,
        }
    }

    /// Move one chamber in `direction`.
    ///
    /// Rejected moves (session over, already on the goal, off the grid)
    /// change nothing and do not count against the budget.
    pub fn move_in(&mut self, direction: Direction) -> MoveResult {
        if let Some(rejection) = self.closed() {
            return rejection;
        }
        let Some(destination) = self.beliefs.grid().step(self.position, direction) else {
            return MoveResult::rejected("Move cancelled: Out of bounds.");
        };

        self.position = destination;
        self.moves_made += 1;
        tracing::debug!(%direction, %destination, moves_made = self.moves_made, "moved");

        let result = if let Some(hazard) = self.world.hazard_at(destination) {
            self.state = AgentState::Dead;
            self.death_cause = Some(hazard);
            tracing::info!(%destination, %hazard, "agent died");
            MoveResult::rejected(format!(
                "TRAGEDY! Agent died at {destination} due to a {hazard}."
            ))
        } else {
            match self.observe(destination) {
                Ok(_) if self.world.is_goal(destination) => {
                    self.state = AgentState::Won;
                    tracing::info!(%destination, moves_made = self.moves_made, "goal reached");
                    MoveResult::ok(format!("Found paradise at {destination}! Horray!"))
                }
                Ok(percepts) => {
                    MoveResult::ok(format!("Moved to {destination}. Percepts: {percepts}"))
                }
                Err(err) => MoveResult::rejected(err.to_string()),
            }
        };

        if self.state == AgentState::Active && self.moves_made >= self.max_moves {
            self.state = AgentState::Exhausted;
            tracing::info!(max_moves = self.max_moves, "move budget exhausted");
        }

        result
    }

    fn closed(&self) -> Option<MoveResult> {
        if self.state.is_terminal() {
            Some(MoveResult::rejected("Simulation Ended."))
        } else if self.has_won() {
            Some(MoveResult::rejected(
                "No need to move from paradise! You already won!",
            ))
        } else {
            None
        }
    }

    /// Move by direction name (`up`, `down`, `left`, `right`, any case).
    pub fn move_named(&mut self, direction: &str) -> MoveResult {
        match direction.parse::<Direction>() {
            Ok(direction) => self.move_in(direction),
            Err(_) => MoveResult::rejected(format!(
                "Move cancelled: Unknown direction '{}'.",
                direction.trim()
            )),
        }
    }

    /// One autonomous step, keeping the policy's choice alongside the result.
    pub fn advance(&mut self) -> Decision {
        let from = self.position;
        if let Some(result) = self.closed() {
            return Decision {
                from,
                choice: None,
                direction: None,
                result,
            };
        }

        let choice = self.policy.choose(from, &self.beliefs);
        let direction = choice.direction_from(from);
        let result = match (choice.tier, direction) {
            (DecisionTier::Stuck, _) | (_, None) => {
                MoveResult::rejected("Agent is stuck: no neighbouring chamber to move to.")
            }
            (_, Some(direction)) => self.move_in(direction),
        };

        Decision {
            from,
            choice: Some(choice),
            direction,
            result,
        }
    }

    /// Let the navigation policy pick and make the next move.
    pub fn decide_next_move(&mut self) -> MoveResult {
        self.advance().result
    }

    /// Report on a chamber given 1-indexed coordinates.
    pub fn query(&self, row: usize, col: usize) -> QueryResponse {
        Position::from_one_indexed(row, col)
            .ok_or(Error::InvalidCoordinates)
            .and_then(|position| self.beliefs.query(position))
            .into()
    }

    /// Knowledge grid with the agent marked.
    pub fn snapshot(&self) -> Vec<CellView> {
        self.beliefs.snapshot(Some(self.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::Cave, world::CaveLayout};

    fn controller(layout: CaveLayout) -> AgentController<Cave> {
        let start = layout.start;
        let max_moves = layout.max_moves;
        AgentController::new(
            Cave::new(layout).unwrap(),
            start,
            max_moves,
            NavigationPolicy::seeded(3),
        )
        .unwrap()
    }

    #[test]
    fn start_chamber_is_observed_on_construction() {
        let agent = controller(CaveLayout::new(Position::new(3, 0), Position::new(3, 3)));
        let start = agent.beliefs().cell(Position::new(0, 0)).unwrap();
        assert!(start.visited);
        assert_eq!(agent.moves_made(), 0);
        assert_eq!(agent.state(), AgentState::Active);
    }

    #[test]
    fn zero_budget_session_starts_exhausted() {
        let layout = CaveLayout::classic();
        let start = layout.start;
        let mut agent = AgentController::new(
            Cave::new(layout).unwrap(),
            start,
            0,
            NavigationPolicy::seeded(1),
        )
        .unwrap();

        assert_eq!(agent.state(), AgentState::Exhausted);
        assert!(agent.is_alive());
        assert!(agent.status().game_over);

        let result = agent.move_in(Direction::Right);
        assert!(!result.success);
        assert_eq!(result.message, "Simulation Ended.");
        assert_eq!(agent.moves_made(), 0);
        assert_eq!(agent.position(), start);
        assert!(!agent.decide_next_move().success);
    }

    #[test]
    fn out_of_bounds_move_is_not_counted() {
        let mut agent = controller(CaveLayout::new(Position::new(3, 0), Position::new(3, 3)));
        let result = agent.move_in(Direction::Up);
        assert!(!result.success);
        assert_eq!(result.message, "Move cancelled: Out of bounds.");
        assert_eq!(agent.moves_made(), 0);
        assert_eq!(agent.position(), Position::new(0, 0));
    }

    #[test]
    fn unknown_direction_name_is_rejected() {
        let mut agent = controller(CaveLayout::new(Position::new(3, 0), Position::new(3, 3)));
        let result = agent.move_named("north");
        assert!(!result.success);
        assert_eq!(result.message, "Move cancelled: Unknown direction 'north'.");
        assert_eq!(agent.moves_made(), 0);
    }

    #[test]
    fn move_message_lists_percepts() {
        let layout = CaveLayout::new(Position::new(3, 0), Position::new(3, 3))
            .with_pit(Position::new(0, 2));
        let mut agent = controller(layout);
        let result = agent.move_named("RIGHT");
        assert!(result.success);
        assert_eq!(result.message, "Moved to (1, 2). Percepts: Breeze");
    }

    #[test]
    fn query_rejects_zero_and_overflowing_coordinates() {
        let agent = controller(CaveLayout::new(Position::new(3, 0), Position::new(3, 3)));
        assert!(agent.query(0, 1).is_error());
        assert!(agent.query(5, 1).is_error());
        assert_eq!(
            agent.query(1, 1).report().unwrap().status.as_str(),
            "SAFE (VISITED)"
        );
    }
}
