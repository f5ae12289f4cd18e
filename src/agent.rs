//! The exploring agent: run state, move outcomes, and the controller that
//! ties world, knowledge base and navigation policy together.

pub mod controller;
pub mod state;

pub use controller::AgentController;
pub use state::{AgentState, AgentStatus, Decision, MoveResult};
