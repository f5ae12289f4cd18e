//! Play command - Interactive session driven from stdin

use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::Cave,
    agent::AgentController,
    app::{App, SessionConfig},
    cli::{
        config::LayoutArgs,
        output::{format_query, render_grid},
    },
    world::{CaveLayout, Direction},
};

const HELP: &str = "\
Commands:
  up | down | left | right   move one chamber (u/d/l/r also work)
  auto [n]                   let the agent decide n moves (default 1)
  query <row> <col>          report on a chamber, 1-indexed
  state                      show the run state
  grid                       show the knowledge grid
  save <path>                save the knowledge base
  reset                      start over on the same cave
  help                       show this help
  quit                       leave";

#[derive(Parser, Debug)]
#[command(about = "Explore a cave interactively")]
pub struct PlayArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,
}

/// What the REPL should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Continue(String),
    Quit,
}

/// One interactive game: the cave, its session, and the command handler.
pub struct PlaySession<'a> {
    app: &'a App,
    layout: CaveLayout,
    config: SessionConfig,
    controller: AgentController<Cave>,
}

impl<'a> PlaySession<'a> {
    pub fn new(app: &'a App, layout: CaveLayout, config: SessionConfig) -> crate::Result<Self> {
        let controller = app.create_session(&layout, config.clone())?;
        Ok(Self {
            app,
            layout,
            config,
            controller,
        })
    }

    pub fn controller(&self) -> &AgentController<Cave> {
        &self.controller
    }

    /// Handle one input line.
    pub fn handle(&mut self, line: &str) -> Reply {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Reply::Continue(String::new());
        };
        let args: Vec<&str> = words.collect();

        let output = match command.to_ascii_lowercase().as_str() {
            "quit" | "exit" | "q" => return Reply::Quit,
            "help" | "?" => HELP.to_string(),
            "move" => match args.first() {
                Some(direction) => self.controller.move_named(direction).message,
                None => "usage: move <direction>".to_string(),
            },
            "auto" => self.auto(args.first().copied()),
            "query" => self.query(&args),
            "state" => serde_json::to_string_pretty(&self.controller.status())
                .unwrap_or_else(|err| err.to_string()),
            "grid" => render_grid(&self.controller.snapshot()),
            "save" => match args.first() {
                Some(path) => self.save(PathBuf::from(path)),
                None => "usage: save <path>".to_string(),
            },
            "reset" => match self.app.create_session(&self.layout, self.config.clone()) {
                Ok(controller) => {
                    self.controller = controller;
                    "Game reset.".to_string()
                }
                Err(err) => format!("Reset failed: {err}"),
            },
            other if other.parse::<Direction>().is_ok() => {
                self.controller.move_named(other).message
            }
            other => format!("Unknown command '{other}'. Type 'help' for the list."),
        };
        Reply::Continue(output)
    }

    fn auto(&mut self, count: Option<&str>) -> String {
        let count = match count.map(str::parse::<usize>) {
            None => 1,
            Some(Ok(n)) => n,
            Some(Err(_)) => return "usage: auto [n]".to_string(),
        };

        let mut lines = Vec::new();
        for _ in 0..count {
            let decision = self.controller.advance();
            let stop = !decision.result.success || self.controller.state().is_terminal();
            let direction = decision
                .direction
                .map_or_else(|| "-".to_string(), |d| d.to_string());
            lines.push(format!("{direction}: {}", decision.result.message));
            if stop {
                break;
            }
        }
        lines.join("\n")
    }

    fn query(&self, args: &[&str]) -> String {
        let parsed = match args {
            [row, col] => row.parse::<usize>().ok().zip(col.parse::<usize>().ok()),
            _ => None,
        };
        match parsed {
            Some((row, col)) => format_query(&self.controller.query(row, col)),
            None => "usage: query <row> <col>".to_string(),
        }
    }

    fn save(&self, path: PathBuf) -> String {
        match self.app.save_knowledge(self.controller.beliefs(), &path) {
            Ok(()) => format!("Knowledge saved to {}.", path.display()),
            Err(err) => format!("Save failed: {err}"),
        }
    }
}

/// Read commands from `input` until `quit` or end of input.
pub fn repl<R: BufRead, W: Write>(
    session: &mut PlaySession<'_>,
    input: R,
    mut output: W,
) -> Result<()> {
    write!(output, "> ")?;
    output.flush()?;
    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        match session.handle(&line) {
            Reply::Quit => break,
            Reply::Continue(text) => {
                if !text.is_empty() {
                    writeln!(output, "{text}")?;
                }
            }
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let app = App::new();
    let layout = args.layout.load_layout()?;
    let mut session = PlaySession::new(&app, layout, args.layout.session_config())?;

    println!("Wumpus cave. Type 'help' for commands.");
    println!("{}", render_grid(&session.controller().snapshot()));

    let stdin = std::io::stdin();
    repl(&mut session, stdin.lock(), std::io::stdout())
}
