//! Config Container CLI
//!
//! Load a JSON, TOML or YAML file into a hierarchical configuration container
//! and inspect it with dotted keys, globs and regular expressions.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)?;
    tracing::debug!(file = ?cli.file, "Starting cfgc");

    match &cli.command {
        Some(cmd) => execute_command(&cli, cmd),
        None => {
            // No command provided - show help hint
            println!("{} Config Container CLI", "cfgc".green().bold());
            println!();
            println!("Run {} for available commands.", "cfgc --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cli: &Cli, cmd: &Commands) -> Result<()> {
    let config = || commands::build_container(cli);

    match cmd {
        Commands::Get { key, default } => commands::run_get(&config()?, key, default.as_deref()),
        Commands::Has { key } => commands::run_has(&config()?, key),
        Commands::Node { key } => commands::run_node(&config()?, key.as_deref()),
        Commands::Flatten { key } => commands::run_flatten(&config()?, key.as_deref(), cli.json),
        Commands::Query { glob } => commands::run_query(&config()?, glob, cli.json),
        Commands::Search { pattern } => commands::run_search(&config()?, pattern, cli.json),
        Commands::Keys { pattern } => commands::run_keys(&config()?, pattern, cli.json),
        Commands::Options { key } => commands::run_options(&config()?, key.as_deref(), cli.json),
        // Environment lookups do not need a container
        Commands::Env { name, default } => commands::run_env(name, default.as_deref()),
    }
}
