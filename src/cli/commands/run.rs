//! Run command - One autonomous episode with a step log

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::{
        config::LayoutArgs,
        output::{print_kv, print_section, print_status, render_grid},
    },
    pipeline::{EpisodeSummary, explore},
};

#[derive(Parser, Debug)]
#[command(about = "Let the agent explore one cave on its own")]
pub struct RunArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Save the final knowledge base (MessagePack)
    #[arg(long)]
    pub save_knowledge: Option<PathBuf>,

    /// Print the episode summary as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let app = App::new();
    let layout = args.layout.load_layout()?;
    let mut session = app.create_session(&layout, args.layout.session_config())?;

    if !args.json {
        print_section("Wumpus Cave Exploration");
        print_kv("Grid", &format!("{0}x{0}", layout.size));
        print_kv("Start", &session.position().to_string());
        print_kv("Max moves", &session.max_moves().to_string());
        if let Some(seed) = args.layout.seed {
            print_kv("Seed", &seed.to_string());
        }
        println!();
    }

    let quiet = args.json;
    let (outcome, risky_moves) = explore(&mut session, 0, |step| {
        if !quiet {
            let direction = step
                .direction
                .map_or_else(|| "-".to_string(), |d| d.to_string());
            let tier = step
                .tier
                .map_or_else(|| "-".to_string(), |t| format!("{t:?}"));
            println!(
                "  #{:<3} {:<6} {:<15} {}",
                step.step, direction, tier, step.message
            );
        }
        Ok(())
    })?;

    let summary = EpisodeSummary::new(0, args.layout.seed, outcome, risky_moves, &session);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_section(&format!("Outcome: {outcome}"));
        print_status(&session.status());
        print_kv("Risky moves", &risky_moves.to_string());
        println!("\n{}", render_grid(&session.snapshot()));
    }

    if let Some(path) = &args.save_knowledge {
        app.save_knowledge(session.beliefs(), path)
            .with_context(|| format!("Failed to save knowledge to {}", path.display()))?;
        if !args.json {
            println!("✓ Knowledge saved to: {}", path.display());
        }
    }

    Ok(())
}
