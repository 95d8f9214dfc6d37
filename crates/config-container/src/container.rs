//! The configuration container
//!
//! [`ConfigContainer`] stores a configuration tree addressed by dotted keys.
//! It offers two lookup contracts over the same storage:
//!
//! - strict: [`require`](ConfigContainer::require) fails with
//!   [`Error::NotFound`] and [`has`](ConfigContainer::has) checks existence
//! - lenient: [`get`](ConfigContainer::get), [`get_or`](ConfigContainer::get_or)
//!   and [`get_node`](ConfigContainer::get_node) fall back to `None` or a
//!   default
//!
//! # Example
//!
//! ```
//! use config_container::ConfigContainer;
//!
//! let mut config = ConfigContainer::new();
//! config.set("simple_key", 123);
//! config.set("testing.nested_key", "abc");
//!
//! assert_eq!(config.get("simple_key").and_then(|n| n.as_i64()), Some(123));
//! assert_eq!(config.get_or("testing.missing", "default").as_str(), Some("default"));
//! assert_eq!(config.query("*key").len(), 2);
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::flatten::{FlatEntry, flatten, flatten_prefixed};
use crate::loader::{self, Format};
use crate::options::{self, ScalarOptionSink};
use crate::path::{get_at_path, parse_key, set_at_path};
use crate::pattern::{compile_delimited, compile_glob};
use crate::value::{Branch, Node, Value};

/// Flattened `dotted key -> value` pairs returned by queries.
pub type FlatMap = BTreeMap<String, Value>;

/// Hierarchical configuration store with dotted keys.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigContainer {
    root: Node,
}

impl Default for ConfigContainer {
    fn default() -> Self {
        Self { root: Node::empty() }
    }
}

impl ConfigContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container seeded from a nested tree.
    ///
    /// The tree is merged with [`set_from_tree`](Self::set_from_tree), so keys
    /// in the tree may themselves contain dots.
    pub fn from_tree(tree: Branch) -> Self {
        let mut container = Self::new();
        container.set_from_tree(tree);
        container
    }

    /// Create a container seeded from a JSON object.
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        Ok(Self::from_tree(loader::into_branch(json)?))
    }

    /// Create a container from a JSON, TOML, or YAML document.
    pub fn from_str_as(content: &str, format: Format) -> Result<Self> {
        Ok(Self::from_tree(loader::parse_str(content, format)?))
    }

    /// Create a container from a file, detecting the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_tree(loader::load_path(path.as_ref())?))
    }

    /// Store `value` at the dotted key `id` and return the stored node.
    ///
    /// Missing intermediate nodes are created. Whatever was at `id` before,
    /// including an entire subtree, is replaced.
    pub fn set(&mut self, id: &str, value: impl Into<Node>) -> &Node {
        debug!(id, "Setting configuration key");
        set_at_path(&mut self.root, &parse_key(id), value.into())
    }

    /// Merge a nested tree into this container.
    ///
    /// The tree is flattened first and each leaf is set individually, so
    /// existing siblings are preserved and only addressed leaves change.
    pub fn set_from_tree(&mut self, tree: Branch) {
        let root = Node::Branch(tree);
        let entries: Vec<(String, Value)> = flatten(&root)
            .into_iter()
            .map(|(key, value)| (key, value.clone()))
            .collect();

        debug!(count = entries.len(), "Merging configuration tree");
        for (key, value) in entries {
            set_at_path(&mut self.root, &parse_key(&key), Node::Leaf(value));
        }
    }

    /// Look up the node at `id`.
    ///
    /// Returns `None` when a segment is missing or the walk hits a leaf early.
    /// A branch is returned as a structural subtree.
    pub fn get(&self, id: &str) -> Option<&Node> {
        get_at_path(&self.root, &parse_key(id))
    }

    /// Look up the node at `id`, falling back to `default`.
    pub fn get_or(&self, id: &str, default: impl Into<Node>) -> Node {
        match self.get(id) {
            Some(node) => node.clone(),
            None => default.into(),
        }
    }

    /// Look up a node, or the whole tree when `id` is `None`.
    pub fn get_node(&self, id: Option<&str>) -> Option<&Node> {
        match id {
            Some(id) => self.get(id),
            None => Some(&self.root),
        }
    }

    /// Look up the node at `id`, failing when it does not exist.
    pub fn require(&self, id: &str) -> Result<&Node> {
        self.get(id).ok_or_else(|| Error::not_found(id))
    }

    /// Whether a node, including an explicit null, exists at `id`.
    pub fn has(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The whole tree.
    pub fn root(&self) -> &Branch {
        match &self.root {
            Node::Branch(children) => children,
            Node::Leaf(_) => unreachable!("container root is always a branch"),
        }
    }

    /// Number of leaves in the tree.
    pub fn len(&self) -> usize {
        flatten(&self.root).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every leaf of the tree as `(dotted key, value)` pairs.
    pub fn flatten(&self) -> Vec<FlatEntry<'_>> {
        flatten(&self.root)
    }

    /// Every leaf under `id`, keyed by full dotted path.
    ///
    /// Returns `None` when `id` does not exist. A leaf at `id` yields a single
    /// entry keyed `id`.
    pub fn flatten_node(&self, id: &str) -> Option<Vec<FlatEntry<'_>>> {
        self.get(id).map(|node| flatten_prefixed(node, id))
    }

    /// Match flattened keys against a case-insensitive `*` glob.
    ///
    /// The glob must match the whole key. A glob without `*` is an exact,
    /// case-insensitive match. No match yields an empty map.
    pub fn query(&self, glob: &str) -> FlatMap {
        match compile_glob(glob) {
            Ok(re) => self.matching(&re),
            Err(e) => {
                warn!(glob, error = %e, "Glob did not compile");
                FlatMap::new()
            }
        }
    }

    /// Match flattened keys against a delimiter-wrapped regular expression.
    ///
    /// The expression matches anywhere in the key, e.g. `/nested/`.
    pub fn search(&self, pattern: &str) -> Result<FlatMap> {
        let re = compile_delimited(pattern)?;
        Ok(self.matching(&re))
    }

    /// Collect the distinct first capture group of `pattern` over all keys.
    ///
    /// Keys that do not match, or whose match does not take part in the first
    /// group, are skipped. A group that matched the empty string yields `""`.
    /// Results keep the order of first appearance.
    pub fn filter_keys(&self, pattern: &str) -> Result<Vec<String>> {
        let re = compile_delimited(pattern)?;

        let mut seen = HashSet::new();
        let mut groups = Vec::new();
        for (key, _) in self.flatten() {
            let Some(group) = re.captures(&key).and_then(|caps| caps.get(1)) else {
                continue;
            };

            let group = group.as_str();
            if seen.insert(group.to_string()) {
                groups.push(group.to_string());
            }
        }

        Ok(groups)
    }

    /// Project the scalar leaves under `id` into `sink`.
    ///
    /// Keys are relative to the node; a leaf at `id` is applied under `id`
    /// itself. Fails with [`Error::NotFound`] when `id` does not exist.
    pub fn apply_options_from_node<S>(&self, id: &str, sink: &mut S) -> Result<usize>
    where
        S: ScalarOptionSink + ?Sized,
    {
        let node = self.require(id)?;
        options::apply_node(id, node, sink)
    }

    /// Project every scalar leaf of the container into `sink`.
    pub fn apply_options<S>(&self, sink: &mut S) -> Result<usize>
    where
        S: ScalarOptionSink + ?Sized,
    {
        options::apply_options(self.root(), sink)
    }

    fn matching(&self, re: &Regex) -> FlatMap {
        self.flatten()
            .into_iter()
            .filter(|(key, _)| re.is_match(key))
            .map(|(key, value)| (key, value.clone()))
            .collect()
    }
}

impl From<Branch> for ConfigContainer {
    fn from(tree: Branch) -> Self {
        Self::from_tree(tree)
    }
}
