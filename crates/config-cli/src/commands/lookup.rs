//! Point lookups: get, has, node and env

use config_container::{ConfigContainer, Node, Value, env};

use super::{parse_value, render_node};
use crate::error::{CliError, Result};

/// Print the value at `key`, or `default` when it is missing.
pub fn run_get(config: &ConfigContainer, key: &str, default: Option<&str>) -> Result<()> {
    let node = match default {
        Some(default) => config.get_or(key, parse_value(default)),
        None => config.require(key)?.clone(),
    };

    println!("{}", render_node(&node)?);
    Ok(())
}

/// Print `true` or `false`.
pub fn run_has(config: &ConfigContainer, key: &str) -> Result<()> {
    println!("{}", config.has(key));
    Ok(())
}

/// Print the subtree at `key`, or the whole tree.
pub fn run_node(config: &ConfigContainer, key: Option<&str>) -> Result<()> {
    let node = config
        .get_node(key)
        .ok_or_else(|| CliError::user(format!("No node at '{}'", key.unwrap_or_default())))?;

    println!("{}", render_node(node)?);
    Ok(())
}

/// Print an environment variable.
pub fn run_env(name: &str, default: Option<&str>) -> Result<()> {
    let value = env(name, default.map(Value::from))
        .ok_or_else(|| CliError::user(format!("Environment variable not set: {name}")))?;

    println!("{}", render_node(&Node::Leaf(value))?);
    Ok(())
}
