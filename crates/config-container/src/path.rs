//! Dotted key parsing and tree traversal
//!
//! Keys address nodes in the configuration tree with `.`-separated segments:
//! `database.primary.host` walks `database`, then `primary`, then `host`.
//!
//! # Examples
//!
//! ```
//! use config_container::path::{get_at_path, parse_key, set_at_path};
//! use config_container::Node;
//!
//! let mut root = Node::empty();
//! set_at_path(&mut root, &parse_key("server.port"), Node::from(8080));
//!
//! let port = get_at_path(&root, &parse_key("server.port"));
//! assert_eq!(port.and_then(Node::as_i64), Some(8080));
//! assert!(get_at_path(&root, &parse_key("server.port.extra")).is_none());
//! ```

use crate::value::{Branch, Node};

/// Separator between key segments.
pub const SEPARATOR: char = '.';

/// Split a dotted key into its segments.
///
/// Segments are taken verbatim, so `"a..b"` addresses a child named `""`.
///
/// ```
/// use config_container::path::parse_key;
///
/// assert_eq!(parse_key("config.database.host"), vec!["config", "database", "host"]);
/// assert_eq!(parse_key("simple"), vec!["simple"]);
/// ```
pub fn parse_key(key: &str) -> Vec<&str> {
    key.split(SEPARATOR).collect()
}

/// Join segments back into a dotted key.
pub fn join_key(prefix: Option<&str>, segment: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}{SEPARATOR}{segment}"),
        None => segment.to_string(),
    }
}

/// Get the node at the given path.
///
/// Returns `None` if any segment is missing or if the walk runs into a leaf
/// before the path is exhausted.
pub fn get_at_path<'a>(node: &'a Node, segments: &[&str]) -> Option<&'a Node> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(node);
    };

    match node {
        Node::Branch(children) => get_at_path(children.get(*first)?, rest),
        Node::Leaf(_) => None,
    }
}

/// Set the node at the given path, creating intermediate branches.
///
/// Missing intermediate nodes become empty branches. An intermediate leaf is
/// replaced by an empty branch. Whatever sits at the final segment, leaf or
/// whole subtree, is replaced by `value`. Returns the stored node.
pub fn set_at_path<'a>(node: &'a mut Node, segments: &[&str], value: Node) -> &'a mut Node {
    let Some((first, rest)) = segments.split_first() else {
        *node = value;
        return node;
    };

    let child = ensure_branch(node)
        .entry((*first).to_string())
        .or_insert_with(Node::empty);

    set_at_path(child, rest, value)
}

fn ensure_branch(node: &mut Node) -> &mut Branch {
    if node.is_leaf() {
        *node = Node::empty();
    }

    match node {
        Node::Branch(children) => children,
        Node::Leaf(_) => unreachable!("leaf was replaced by a branch"),
    }
}
