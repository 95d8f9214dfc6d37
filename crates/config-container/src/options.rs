//! Projection of scalar configuration values into runtime options
//!
//! A [`ScalarOptionSink`] receives `(key, value)` pairs for every scalar leaf
//! of a configuration tree. [`RuntimeSettings`] is the in-process sink.
//!
//! Projection is not transactional: when the sink rejects a key, options
//! applied before it stay applied.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::flatten::{FlatEntry, flatten_prefixed};
use crate::value::{Branch, Node};

/// Errors reported by an option sink
#[derive(Debug, thiserror::Error)]
pub enum OptionError {
    #[error("unknown option")]
    Unknown,

    #[error("{0}")]
    Rejected(String),
}

/// Destination for projected runtime options.
pub trait ScalarOptionSink {
    /// Set `key` to the stringified scalar `value`.
    fn set_scalar_option(&mut self, key: &str, value: &str) -> std::result::Result<(), OptionError>;

    /// Read back the current value of `key`.
    fn get_scalar_option(&self, key: &str) -> Result<String>;
}

/// Apply every scalar leaf of `tree` to `sink`, keyed by its dotted path.
///
/// Null, list and opaque leaves are skipped. Stops at the first rejected
/// key. Returns the number of options applied.
pub fn apply_options<S>(tree: &Branch, sink: &mut S) -> Result<usize>
where
    S: ScalarOptionSink + ?Sized,
{
    let mut applied = 0;
    for (key, value) in flatten_branch(tree) {
        let Some(rendered) = value.to_option_string() else {
            trace!(key = %key, "Skipping non-scalar option");
            continue;
        };

        if let Err(source) = sink.set_scalar_option(&key, &rendered) {
            warn!(key = %key, value = %rendered, error = %source, "Option rejected");
            return Err(Error::ScalarOption { key, source });
        }

        trace!(key = %key, value = %rendered, "Applied option");
        applied += 1;
    }

    debug!(applied, "Applied scalar options");
    Ok(applied)
}

fn flatten_branch(tree: &Branch) -> Vec<FlatEntry<'_>> {
    tree.iter()
        .flat_map(|(key, child)| flatten_prefixed(child, key))
        .collect()
}

/// In-memory runtime settings.
///
/// In open mode any key is accepted. Settings created with
/// [`RuntimeSettings::with_known_options`] only accept registered keys.
#[derive(Debug, Clone, Default)]
pub struct RuntimeSettings {
    values: BTreeMap<String, String>,
    known: Option<BTreeSet<String>>,
}

impl RuntimeSettings {
    /// Create settings that accept any key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create settings restricted to the given keys, each with a default.
    pub fn with_known_options<I, K, V>(options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values: BTreeMap<String, String> = options
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let known = values.keys().cloned().collect();

        Self {
            values,
            known: Some(known),
        }
    }

    /// All current settings, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ScalarOptionSink for RuntimeSettings {
    fn set_scalar_option(&mut self, key: &str, value: &str) -> std::result::Result<(), OptionError> {
        if self.known.as_ref().is_some_and(|known| !known.contains(key)) {
            return Err(OptionError::Unknown);
        }

        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_scalar_option(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| Error::not_found(key))
    }
}

/// Apply a single node: a branch projects its scalar leaves keyed relative
/// to the node, a leaf projects itself under `id`.
pub(crate) fn apply_node<S>(id: &str, node: &Node, sink: &mut S) -> Result<usize>
where
    S: ScalarOptionSink + ?Sized,
{
    match node {
        Node::Branch(children) => apply_options(children, sink),
        Node::Leaf(_) => {
            let mut single = Branch::new();
            single.insert(id.to_string(), node.clone());
            apply_options(&single, sink)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(json: serde_json::Value) -> Branch {
        match Node::from(json) {
            Node::Branch(children) => children,
            Node::Leaf(_) => panic!("expected object"),
        }
    }

    #[test]
    fn test_apply_options_skips_non_scalars() {
        let mut settings = RuntimeSettings::new();
        let applied = apply_options(
            &tree(json!({
                "memory_limit": "128M",
                "display_errors": false,
                "precision": 14,
                "nothing": null,
                "list": [1, 2],
                "date": {"timezone": "UTC"}
            })),
            &mut settings,
        )
        .unwrap();

        assert_eq!(applied, 4);
        assert_eq!(settings.get_scalar_option("memory_limit").unwrap(), "128M");
        assert_eq!(settings.get_scalar_option("display_errors").unwrap(), "0");
        assert_eq!(settings.get_scalar_option("precision").unwrap(), "14");
        assert_eq!(settings.get_scalar_option("date.timezone").unwrap(), "UTC");
        assert!(settings.get_scalar_option("nothing").is_err());
        assert!(settings.get_scalar_option("list").is_err());
    }

    #[test]
    fn test_known_options_reject_unknown_keys() {
        let mut settings = RuntimeSettings::with_known_options([("a", "0"), ("c", "0")]);
        let err = apply_options(&tree(json!({"a": 1, "b": 2, "c": 3})), &mut settings).unwrap_err();

        match err {
            Error::ScalarOption { key, source } => {
                assert_eq!(key, "b");
                assert!(matches!(source, OptionError::Unknown));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Keys before the failure stay applied, keys after it are untouched.
        assert_eq!(settings.get_scalar_option("a").unwrap(), "1");
        assert_eq!(settings.get_scalar_option("c").unwrap(), "0");
    }

    #[test]
    fn test_get_missing_option_is_not_found() {
        let settings = RuntimeSettings::new();
        assert!(matches!(
            settings.get_scalar_option("missing"),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_apply_leaf_node_uses_id() {
        let mut settings = RuntimeSettings::new();
        let applied = apply_node("php.precision", &Node::from(17), &mut settings).unwrap();
        assert_eq!(applied, 1);
        assert_eq!(settings.get_scalar_option("php.precision").unwrap(), "17");
    }
}
