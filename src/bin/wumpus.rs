//! Wumpus CLI - knowledge-based exploration of a hazardous cave
//!
//! This CLI provides:
//! - Single autonomous runs with a step log
//! - Multi-episode evaluation with JSON/CSV export
//! - An interactive play mode
//! - Inspection of saved knowledge bases

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "wumpus")]
#[command(version, about = "Knowledge-based agent for the Wumpus cave", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG wins when set
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Let the agent explore one cave on its own
    Run(wumpus::cli::commands::run::RunArgs),

    /// Evaluate the navigation policy over many seeded episodes
    Evaluate(wumpus::cli::commands::evaluate::EvaluateArgs),

    /// Explore a cave interactively
    Play(wumpus::cli::commands::play::PlayArgs),

    /// Inspect a saved knowledge base
    Inspect(wumpus::cli::commands::inspect::InspectArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "wumpus=warn",
        1 => "wumpus=debug",
        _ => "wumpus=trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run(args) => wumpus::cli::commands::run::execute(args),
        Commands::Evaluate(args) => wumpus::cli::commands::evaluate::execute(args),
        Commands::Play(args) => wumpus::cli::commands::play::execute(args),
        Commands::Inspect(args) => wumpus::cli::commands::inspect::execute(args),
    }
}
