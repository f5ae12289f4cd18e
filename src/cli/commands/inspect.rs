//! Inspect command - Examine a saved knowledge base

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::output::{format_query, print_kv, print_section, print_subsection, render_grid},
    knowledge::{BeliefGrid, ChamberStatus, QueryResponse},
    world::Position,
};

#[derive(Parser, Debug)]
#[command(about = "Inspect a saved knowledge base")]
pub struct InspectArgs {
    /// Knowledge base file (MessagePack)
    pub knowledge: PathBuf,

    /// Report on one chamber, 1-indexed as `row,col`
    #[arg(long, value_parser = Position::parse_one_indexed)]
    pub query: Option<Position>,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let app = App::new();
    let beliefs = app
        .load_knowledge(&args.knowledge)
        .with_context(|| format!("Failed to load knowledge from {}", args.knowledge.display()))?;

    if let Some(position) = args.query {
        let response: QueryResponse = beliefs.query(position).into();
        println!("{}", format_query(&response));
        return Ok(());
    }

    print_section(&format!("Knowledge base: {}", args.knowledge.display()));
    print_kv("Grid", &format!("{0}x{0}", beliefs.size()));
    print_kv("Start", &beliefs.start().to_string());
    print_kv("Version", &beliefs.version().to_string());
    print_kv("Visited", &count(&beliefs, |s| s == ChamberStatus::SafeVisited));
    print_kv("Proven safe", &count(&beliefs, |s| s == ChamberStatus::Safe));
    print_kv(
        "Certain hazards",
        &count(&beliefs, |s| s == ChamberStatus::DefinitelyDangerous),
    );

    // The agent's position is not persisted, so nothing is marked.
    println!("\n{}", render_grid(&beliefs.snapshot(None)));

    let suspects: Vec<_> = beliefs
        .cells()
        .filter(|(_, cell)| cell.total_danger() > 0.0)
        .collect();
    if !suspects.is_empty() {
        print_subsection("Suspected chambers");
        for (position, cell) in suspects {
            print_kv(
                &position.to_string(),
                &format!("pit {:.2}, wumpus {:.2}", cell.prob_pit, cell.prob_wumpus),
            );
        }
    }

    Ok(())
}

fn count(beliefs: &BeliefGrid, matches: impl Fn(ChamberStatus) -> bool) -> String {
    beliefs
        .cells()
        .filter(|(_, cell)| matches(ChamberStatus::of(cell)))
        .count()
        .to_string()
}
