//! Evaluate command - Many seeded episodes on one cave

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::{
        config::LayoutArgs,
        output::{print_evaluation, print_kv, print_section, print_subsection},
    },
    navigation::DecisionTier,
    pipeline::{
        CsvObserver, ExplorationConfig, ExplorationPipeline, JsonlObserver, MetricsObserver,
        ProgressObserver, SharedObserver,
    },
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate the navigation policy over many episodes")]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Number of episodes
    #[arg(long, short = 'n', default_value_t = 100)]
    pub episodes: usize,

    /// Export aggregated results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Write one CSV row per episode
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write one JSON line per episode, steps included
    #[arg(long)]
    pub jsonl: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let app = App::new();
    let layout = args.layout.load_layout()?;

    print_section("Evaluation Configuration");
    print_kv("Grid", &format!("{0}x{0}", layout.size));
    print_kv("Episodes", &args.episodes.to_string());
    print_kv(
        "Max moves",
        &args.layout.max_moves.unwrap_or(layout.max_moves).to_string(),
    );
    if let Some(seed) = args.layout.seed {
        print_kv("Base seed", &seed.to_string());
    }

    // Session overrides other than the seed go into the layout itself.
    let session = args.layout.session_config();
    let layout = session.apply(&layout);

    let config = ExplorationConfig {
        episodes: args.episodes,
        base_seed: args.layout.seed,
        max_moves: None,
    };
    let mut pipeline = ExplorationPipeline::new(config);

    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    let (metrics_observer, metrics) = SharedObserver::new(MetricsObserver::new());
    pipeline = pipeline.with_observer(Box::new(metrics_observer));

    if let Some(path) = &args.csv {
        let observer = CsvObserver::new(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }
    if let Some(path) = &args.jsonl {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let result = pipeline.run(&app, &layout)?;

    print_section("Evaluation Results");
    print_evaluation(&result);

    {
        let metrics = metrics
            .lock()
            .map_err(|_| anyhow::anyhow!("metrics observer lock poisoned"))?;
        print_subsection("Decisions by tier");
        for (label, tier) in [
            ("Frontier-safe", DecisionTier::FrontierSafe),
            ("Backtrack", DecisionTier::Backtrack),
            ("Calculated risk", DecisionTier::CalculatedRisk),
            ("Stuck", DecisionTier::Stuck),
        ] {
            print_kv(label, &metrics.tier_count(tier).to_string());
        }
    }

    if let Some(path) = &args.export {
        result
            .save(path)
            .with_context(|| format!("Failed to export results to {}", path.display()))?;
        println!("\n✓ Results exported to: {}", path.display());
    }
    if let Some(path) = &args.csv {
        println!("✓ Episode table written to: {}", path.display());
    }
    if let Some(path) = &args.jsonl {
        println!("✓ Episode log written to: {}", path.display());
    }

    Ok(())
}
