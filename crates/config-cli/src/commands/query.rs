//! Listings over the flattened key space

use config_container::{ConfigContainer, FlatMap, Value};

use super::print_entries;
use crate::error::{CliError, Result};

fn to_json(entries: impl IntoIterator<Item = (String, Value)>) -> Vec<(String, serde_json::Value)> {
    entries
        .into_iter()
        .map(|(key, value)| {
            let json = serde_json::Value::from(&value);
            (key, json)
        })
        .collect()
}

fn print_map(map: FlatMap, json: bool) -> Result<()> {
    print_entries(to_json(map), json)
}

/// List every leaf, or every leaf under `key`.
pub fn run_flatten(config: &ConfigContainer, key: Option<&str>, json: bool) -> Result<()> {
    let entries = match key {
        Some(key) => config
            .flatten_node(key)
            .ok_or_else(|| CliError::user(format!("No node at '{key}'")))?,
        None => config.flatten(),
    };

    print_entries(
        to_json(entries.into_iter().map(|(k, v)| (k, v.clone()))),
        json,
    )
}

/// List leaves matching a glob.
pub fn run_query(config: &ConfigContainer, glob: &str, json: bool) -> Result<()> {
    print_map(config.query(glob), json)
}

/// List leaves matching a delimited regular expression.
pub fn run_search(config: &ConfigContainer, pattern: &str, json: bool) -> Result<()> {
    print_map(config.search(pattern)?, json)
}

/// List the distinct first capture groups, one per line.
pub fn run_keys(config: &ConfigContainer, pattern: &str, json: bool) -> Result<()> {
    let groups = config.filter_keys(pattern)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else {
        for group in groups {
            println!("{group}");
        }
    }

    Ok(())
}
