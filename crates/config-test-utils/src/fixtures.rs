//! Sample configuration trees and temporary config files.

use std::fs;
use std::path::{Path, PathBuf};

use config_container::{Branch, ConfigContainer, Node};
use tempfile::TempDir;

/// A container with a small mixed tree:
///
/// ```text
/// simple_key                      = 123
/// testing.nested_key              = "abc"
/// testing.bool.true               = true
/// testing.bool.false              = false
/// set_from_array                  = 321
/// testing.nested_set_from_array   = "xyz"
/// testing.bool.true_from_array    = true
/// ```
///
/// The last three keys are merged with `set_from_tree` using dotted keys.
pub fn sample_container() -> ConfigContainer {
    let mut config = ConfigContainer::new();
    config.set("simple_key", 123);
    config.set("testing.nested_key", "abc");
    config.set("testing.bool.true", true);
    config.set("testing.bool.false", false);

    let mut merged = Branch::new();
    merged.insert("set_from_array".into(), Node::from(321));
    merged.insert("testing.nested_set_from_array".into(), Node::from("xyz"));
    merged.insert("testing.bool.true_from_array".into(), Node::from(true));
    config.set_from_tree(merged);

    config
}

/// Build a seed tree from a JSON object literal.
///
/// # Panics
/// Panics if `json` is not an object.
pub fn tree(json: serde_json::Value) -> Branch {
    match Node::from(json) {
        Node::Branch(children) => children,
        Node::Leaf(value) => panic!("tree: expected a JSON object, got {value:?}"),
    }
}

/// A temporary directory holding configuration files.
///
/// # Example
///
/// ```rust,no_run
/// use config_test_utils::ConfigDir;
///
/// let dir = ConfigDir::new();
/// let path = dir.write("app.toml", "[server]\nport = 8080\n");
/// assert!(path.exists());
/// ```
pub struct ConfigDir {
    temp_dir: TempDir,
}

impl Default for ConfigDir {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `name` inside the directory and return its path.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("ConfigDir::write: failed to write {}: {e}", path.display()));
        path
    }
}
