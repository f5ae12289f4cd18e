//! CLI subcommands

pub mod evaluate;
pub mod inspect;
pub mod play;
pub mod run;
