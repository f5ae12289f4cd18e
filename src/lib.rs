//! Knowledge-based agent for the Wumpus cave
//!
//! An agent explores an N×N grid of chambers hiding pits and one wumpus,
//! sensing only local percepts (breeze, stench, glitter). This crate
//! provides:
//! - A belief grid that deduces safe chambers and distributes hazard
//!   probability from percept evidence
//! - A tiered navigation policy with seedable tie-breaking
//! - An agent controller running one explicit session per game
//! - Cave layouts, knowledge persistence, and an exploration pipeline
//!   with composable observers
//! - The `wumpus` command-line interface
//!
//! ```
//! use wumpus::app::{App, SessionConfig};
//! use wumpus::world::CaveLayout;
//!
//! let app = App::for_testing().with_default_seed(7).build();
//! let mut session = app.create_session(&CaveLayout::classic(), SessionConfig::new())?;
//! while !session.state().is_terminal() && !session.has_won() {
//!     if !session.decide_next_move().success {
//!         break;
//!     }
//! }
//! println!("{:?}", session.status());
//! # Ok::<(), wumpus::Error>(())
//! ```

pub mod adapters;
pub mod agent;
pub mod app;
pub mod cli;
pub mod error;
pub mod knowledge;
pub mod navigation;
pub mod pipeline;
pub mod ports;
pub mod world;

pub use agent::{AgentController, AgentState, AgentStatus, MoveResult};
pub use error::{Error, Result};
pub use knowledge::{BeliefGrid, ChamberReport, QueryResponse};
pub use navigation::NavigationPolicy;
pub use world::{CaveLayout, Direction, Percept, PerceptSet, Position};
