//! Command implementations for config-cli

pub mod lookup;
pub mod options;
pub mod query;

pub use lookup::{run_env, run_get, run_has, run_node};
pub use options::run_options;
pub use query::{run_flatten, run_keys, run_query, run_search};

use std::fs;

use config_container::{ConfigContainer, Node, Value};
use tracing::debug;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Build the container described by the global arguments.
///
/// Loads `--file` (honouring `--format`), then applies each `--set`.
pub fn build_container(cli: &Cli) -> Result<ConfigContainer> {
    let mut config = match (&cli.file, cli.format) {
        (Some(path), Some(format)) => {
            let content = fs::read_to_string(path)?;
            ConfigContainer::from_str_as(&content, format.into())?
        }
        (Some(path), None) => ConfigContainer::load(path)?,
        (None, _) => ConfigContainer::new(),
    };

    for assignment in &cli.set {
        let (key, raw) = assignment.split_once('=').ok_or_else(|| {
            CliError::user(format!("Invalid assignment '{assignment}', expected KEY=VALUE"))
        })?;
        debug!(key, raw, "Applying assignment");
        config.set(key, parse_value(raw));
    }

    Ok(config)
}

/// Parse a command-line value as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> Node {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => Node::from(json),
        Err(_) => Node::from(raw),
    }
}

/// Render a node: bare strings print as-is, everything else as JSON.
pub fn render_node(node: &Node) -> Result<String> {
    match node {
        Node::Leaf(Value::String(s)) => Ok(s.clone()),
        Node::Leaf(value) => Ok(serde_json::Value::from(value).to_string()),
        Node::Branch(_) => Ok(serde_json::to_string_pretty(&serde_json::Value::from(node))?),
    }
}

/// Print `key = value` lines, or a single JSON object when `json` is set.
pub fn print_entries<I>(entries: I, json: bool) -> Result<()>
where
    I: IntoIterator<Item = (String, serde_json::Value)>,
{
    if json {
        let object: serde_json::Map<String, serde_json::Value> = entries.into_iter().collect();
        println!("{}", serde_json::to_string_pretty(&object)?);
    } else {
        for (key, value) in entries {
            println!("{key} = {value}");
        }
    }

    Ok(())
}
