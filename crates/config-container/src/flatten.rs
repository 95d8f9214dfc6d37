//! Flattening of configuration trees into dotted keys
//!
//! Every leaf at `p1 -> p2 -> ... -> pn` produces exactly one entry keyed
//! `"p1.p2....pn"`. Branches produce no entry of their own, so an empty
//! branch vanishes from the output.

use crate::path::join_key;
use crate::value::{Node, Value};

/// A flattened `(dotted key, leaf value)` pair borrowed from a tree.
pub type FlatEntry<'a> = (String, &'a Value);

/// Flatten a tree, keying entries relative to `node`.
///
/// A bare leaf flattens to a single entry with an empty key.
pub fn flatten(node: &Node) -> Vec<FlatEntry<'_>> {
    let mut out = Vec::new();
    flatten_into(node, None, &mut out);
    out
}

/// Flatten a tree, prefixing every key with `prefix`.
///
/// A bare leaf flattens to a single entry keyed `prefix`.
pub fn flatten_prefixed<'a>(node: &'a Node, prefix: &str) -> Vec<FlatEntry<'a>> {
    let mut out = Vec::new();
    flatten_into(node, Some(prefix), &mut out);
    out
}

fn flatten_into<'a>(node: &'a Node, prefix: Option<&str>, out: &mut Vec<FlatEntry<'a>>) {
    match node {
        Node::Leaf(value) => out.push((prefix.unwrap_or_default().to_string(), value)),
        Node::Branch(children) => {
            for (key, child) in children {
                let path = join_key(prefix, key);
                flatten_into(child, Some(&path), out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Branch;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn keys(entries: &[FlatEntry<'_>]) -> Vec<String> {
        entries.iter().map(|(k, _)| k.clone()).collect()
    }

    #[test]
    fn test_flatten_nested() {
        let tree = Node::from(json!({
            "simple": 1,
            "testing": {"bool": {"false": false, "true": true}, "nested": "abc"}
        }));

        let flat = flatten(&tree);
        assert_eq!(
            keys(&flat),
            vec!["simple", "testing.bool.false", "testing.bool.true", "testing.nested"]
        );
        assert_eq!(flat[1].1, &Value::Bool(false));
    }

    #[test]
    fn test_flatten_skips_empty_branches() {
        let mut root = Branch::new();
        root.insert("empty".into(), Node::empty());
        root.insert("leaf".into(), Node::from(1));

        assert_eq!(keys(&flatten(&Node::Branch(root))), vec!["leaf"]);
    }

    #[test]
    fn test_flatten_prefixed() {
        let tree = Node::from(json!({"a": {"b": 1}}));
        assert_eq!(keys(&flatten_prefixed(&tree, "root")), vec!["root.a.b"]);
        assert_eq!(keys(&flatten_prefixed(&Node::from(5), "only")), vec!["only"]);
    }

    #[test]
    fn test_flatten_leaf_without_prefix() {
        let leaf = Node::from("x");
        assert_eq!(keys(&flatten(&leaf)), vec![""]);
    }
}
