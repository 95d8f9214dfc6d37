//! Projection of scalar leaves into runtime settings

use config_container::{ConfigContainer, RuntimeSettings};
use tracing::info;

use super::print_entries;
use crate::error::Result;

/// Project the tree, or the node at `key`, and list the resulting settings.
pub fn run_options(config: &ConfigContainer, key: Option<&str>, json: bool) -> Result<()> {
    let mut settings = RuntimeSettings::new();
    let applied = match key {
        Some(key) => config.apply_options_from_node(key, &mut settings)?,
        None => config.apply_options(&mut settings)?,
    };
    info!(applied, "Projected runtime options");

    print_entries(
        settings
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string()))),
        json,
    )
}
