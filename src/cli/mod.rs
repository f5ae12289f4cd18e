//! CLI infrastructure for the wumpus explorer
//!
//! Subcommands run a single autonomous episode, evaluate the policy over
//! many seeded episodes, play interactively, or inspect a saved knowledge
//! base.

pub mod commands;
pub mod config;
pub mod output;
