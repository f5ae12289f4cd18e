//! Output formatting and progress helpers for CLI

use crate::{
    agent::AgentStatus,
    knowledge::{CellClass, CellView, DangerLevel, QueryResponse},
    pipeline::EvaluationResult,
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print statistics table
pub fn print_stats_table(stats: &[(&str, String)]) {
    for (key, value) in stats {
        print_kv(key, value);
    }
}

fn cell_text(view: &CellView) -> String {
    match (view.class, view.danger) {
        _ if view.symbol == "A" => "A".to_string(),
        (CellClass::Visited, _) => view.symbol.clone(),
        (CellClass::Safe, _) => "ok".to_string(),
        (CellClass::Unknown, DangerLevel::High) => "!!".to_string(),
        (CellClass::Unknown, DangerLevel::Low) => "?~".to_string(),
        (CellClass::Unknown, DangerLevel::None) => "?".to_string(),
    }
}

/// Render a knowledge snapshot as a text grid with 1-indexed labels.
///
/// `A` marks the agent, visited chambers show their percept initials (`V`
/// when none), `ok` is proven safe, `?~` is suspected, `!!` is certain
/// danger.
pub fn render_grid(cells: &[CellView]) -> String {
    let size = cells.iter().map(|view| view.c_1idx).max().unwrap_or(0);
    let mut out = String::from("    ");
    for col in 1..=size {
        out.push_str(&format!("{col:^5}"));
    }
    out.push('\n');

    for row in cells.chunks(size.max(1)) {
        let label = row.first().map(|view| view.r_1idx).unwrap_or(0);
        out.push_str(&format!("{label:>3} "));
        for view in row {
            out.push_str(&format!("[{:^3}]", cell_text(view)));
        }
        out.push('\n');
    }
    out
}

pub fn print_status(status: &AgentStatus) {
    print_stats_table(&[
        ("State", status.state.to_string()),
        ("Alive", status.alive.to_string()),
        ("Won", status.has_won.to_string()),
        (
            "Moves",
            format!("{}/{}", status.moves_made, status.max_moves),
        ),
        (
            "Position",
            format!("({}, {})", status.current_pos.0, status.current_pos.1),
        ),
    ]);
}

/// Pretty JSON for a query answer, in its external shape.
pub fn format_query(response: &QueryResponse) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|err| format!("{{\"error\": \"{err}\"}}"))
}

pub fn print_evaluation(result: &EvaluationResult) {
    let pct = |rate: f64| format!("{:.1}%", rate * 100.0);
    print_stats_table(&[
        ("Episodes", result.episodes.to_string()),
        (
            "Wins",
            format!("{} ({})", result.wins, pct(result.win_rate)),
        ),
        (
            "Deaths",
            format!(
                "{} ({}; pit {}, wumpus {})",
                result.deaths,
                pct(result.death_rate),
                result.pit_deaths,
                result.wumpus_deaths
            ),
        ),
        (
            "Exhausted",
            format!("{} ({})", result.exhausted, pct(result.exhaustion_rate)),
        ),
        ("Stuck", result.stuck.to_string()),
        ("Avg moves", format!("{:.2}", result.avg_moves)),
        (
            "Avg moves to win",
            result
                .avg_moves_to_win
                .map_or_else(|| "n/a".to_string(), |moves| format!("{moves:.2}")),
        ),
    ]);
}
