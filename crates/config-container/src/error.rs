//! Error types for config-container

use std::path::PathBuf;

/// Result type for config-container operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in config-container operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Key not found: {id}")]
    NotFound { id: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Invalid regular expression {pattern:?}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to set option {key}: {source}")]
    ScalarOption {
        key: String,
        #[source]
        source: crate::options::OptionError,
    },

    #[error("Top-level configuration must be a mapping, found {found}")]
    NotAMapping { found: String },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Failed to parse {format} config: {message}")]
    Parse { format: String, message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// True for every rejected pattern, whether it failed validation or compilation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::InvalidRegex { .. })
    }
}
