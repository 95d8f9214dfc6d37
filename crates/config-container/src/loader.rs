//! Format-agnostic loading of seed trees
//!
//! Parses JSON, TOML, or YAML documents into a [`Branch`] that can seed a
//! [`ConfigContainer`](crate::ConfigContainer). Only reading is supported.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::value::{Branch, Node, Value};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
    Yaml,
}

impl Format {
    /// Detect a format from a file extension, case-insensitively.
    ///
    /// - `json` -> JSON
    /// - `toml` -> TOML
    /// - `yaml`, `yml` -> YAML
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    /// Detect the format of `path` from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        Self::from_extension(extension).ok_or_else(|| Error::UnsupportedFormat {
            extension: extension.to_string(),
        })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Json => "JSON",
            Format::Toml => "TOML",
            Format::Yaml => "YAML",
        })
    }
}

/// Parse `content` into a seed tree.
///
/// The document's top level must be a mapping.
pub fn parse_str(content: &str, format: Format) -> Result<Branch> {
    let parse_error = |message: String| Error::Parse {
        format: format.to_string(),
        message,
    };

    let json: serde_json::Value = match format {
        Format::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        Format::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
    };

    into_branch(json)
}

/// Read and parse the file at `path`, detecting its format from the extension.
pub fn load_path(path: &Path) -> Result<Branch> {
    let format = Format::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), %format, "Loading configuration");
    parse_str(&content, format)
}

/// Convert a parsed document into a seed tree.
pub(crate) fn into_branch(json: serde_json::Value) -> Result<Branch> {
    match Node::from(json) {
        Node::Branch(children) => Ok(children),
        Node::Leaf(value) => Err(Error::NotAMapping {
            found: describe(&value).to_string(),
        }),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Integer(_) | Value::Float(_) => "a number",
        Value::String(_) => "a string",
        Value::List(_) => "a list",
        Value::Opaque(_) => "an opaque value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("json", Some(Format::Json))]
    #[case("TOML", Some(Format::Toml))]
    #[case("yaml", Some(Format::Yaml))]
    #[case("yml", Some(Format::Yaml))]
    #[case("ini", None)]
    fn test_format_from_extension(#[case] ext: &str, #[case] expected: Option<Format>) {
        assert_eq!(Format::from_extension(ext), expected);
    }

    #[test]
    fn test_unsupported_path() {
        let err = Format::from_path(Path::new("settings.ini")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { extension } if extension == "ini"));
    }

    #[test]
    fn test_parse_toml_tables() {
        let tree = parse_str(
            r#"
name = "app"

[database]
port = 5432
"#,
            Format::Toml,
        )
        .unwrap();

        assert_eq!(tree["name"].as_str(), Some("app"));
        assert_eq!(tree["database"].as_branch().unwrap()["port"].as_i64(), Some(5432));
    }

    #[test]
    fn test_parse_yaml() {
        let tree = parse_str("debug: true\nserver:\n  host: localhost\n", Format::Yaml).unwrap();
        assert_eq!(tree["debug"].as_bool(), Some(true));
        assert_eq!(tree["server"].as_branch().unwrap()["host"].as_str(), Some("localhost"));
    }

    #[test]
    fn test_parse_error_names_format() {
        let err = parse_str("{not json", Format::Json).unwrap_err();
        assert!(matches!(&err, Error::Parse { format, .. } if format == "JSON"));
    }

    #[test]
    fn test_top_level_must_be_mapping() {
        let err = parse_str("[1, 2]", Format::Json).unwrap_err();
        assert!(matches!(err, Error::NotAMapping { found } if found == "a list"));
    }
}
