use anyhow::{bail, Context, Result};
use clap::Parser;
use picobot::{logging, Config, RuleSet, StateMachine};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Run a Picobot rule set on a grid and report how much of it was covered.
#[derive(Debug, Parser)]
#[command(name = "picobot", version)]
struct Cli {
    /// TOML file describing the grid, agent and run options
    #[arg(long, default_value = "picobot.toml")]
    config: PathBuf,

    /// Rule file; overrides rules given inline in the config
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Stop after this many steps
    #[arg(long)]
    max_steps: Option<usize>,

    /// Record every applied step
    #[arg(long)]
    log: bool,

    /// Write the step log as JSON (implies --log)
    #[arg(long)]
    log_out: Option<PathBuf>,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;

    let rule_text = match (&cli.rules, &config.rules) {
        (Some(path), _) => fs::read_to_string(path)
            .with_context(|| format!("failed to read rules from {}", path.display()))?,
        (None, Some(inline)) => inline.clone(),
        (None, None) => bail!("no rules given: pass --rules or set `rules` in {}", cli.config.display()),
    };
    let rules = RuleSet::parse(&rule_text)?;

    let mut grid = config.build_grid()?;
    let agent = config.build_agent(&grid)?;
    // The starting square counts as visited
    grid.touch(agent.x(), agent.y())?;

    let log_out = cli
        .log_out
        .clone()
        .or_else(|| config.run.log_path.as_ref().map(PathBuf::from));
    let log_enabled = cli.log || config.run.log_steps || log_out.is_some();

    let mut machine = StateMachine::new(grid, rules, agent, log_enabled);
    let halted = match cli.max_steps.or(config.run.max_steps) {
        Some(max_steps) => machine.run_for(max_steps)?.halted,
        None => {
            machine.run()?;
            true
        }
    };

    let agent = machine.agent();
    let (covered, total) = machine.grid().coverage();
    println!("Position: ({}, {})", agent.x(), agent.y());
    println!("State: {}", agent.state());
    println!("Done: {}", agent.is_done());
    println!("Steps: {}{}", machine.steps(), if halted { "" } else { " (budget exhausted)" });
    println!("Coverage: {}/{}{}", covered, total, if machine.grid().finished() { " (finished)" } else { "" });

    if let Some(log) = machine.log() {
        println!("\n{}", log.summary());
        if let Some(path) = log_out {
            fs::write(&path, log.to_json()?)
                .with_context(|| format!("failed to write step log to {}", path.display()))?;
            println!("Step log written to {}", path.display());
        }
    }

    Ok(())
}
