//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use config_container::Format;

/// Config Container - Inspect and query hierarchical configuration
#[derive(Parser, Debug)]
#[command(name = "cfgc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to load (JSON, TOML or YAML)
    #[arg(short, long, global = true, env = "CFGC_FILE")]
    pub file: Option<PathBuf>,

    /// Format of the file, overriding detection from its extension
    #[arg(long, global = true, value_enum)]
    pub format: Option<FormatArg>,

    /// Extra assignment applied after loading (VALUE is parsed as JSON
    /// when possible, otherwise taken as a string)
    #[arg(short, long = "set", global = true, value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Print key/value listings as a JSON object
    #[arg(long, global = true)]
    pub json: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the value at a dotted key
    Get {
        /// Dotted key, e.g. database.host
        key: String,

        /// Value printed when the key does not exist
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Print whether a dotted key exists
    Has {
        /// Dotted key
        key: String,
    },

    /// Print the subtree at a key, or the whole tree, as JSON
    Node {
        /// Dotted key (defaults to the whole tree)
        key: Option<String>,
    },

    /// List every leaf as dotted key and value
    Flatten {
        /// Only list leaves under this key
        key: Option<String>,
    },

    /// List leaves whose key matches a case-insensitive `*` glob
    Query {
        /// Glob matched against the whole key, e.g. "*.host"
        glob: String,
    },

    /// List leaves whose key matches a delimited regular expression
    Search {
        /// Regular expression with delimiters, e.g. "/^db\./i"
        pattern: String,
    },

    /// List the distinct first capture group of a regex over all keys
    Keys {
        /// Regular expression with delimiters and one capture group
        pattern: String,
    },

    /// Print an environment variable, coercing "true"/"false" to booleans
    Env {
        /// Variable name
        name: String,

        /// Value printed when the variable is not set
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Project scalar leaves into runtime settings and list what was applied
    Options {
        /// Only project leaves under this key, keyed relative to it
        key: Option<String>,
    },
}

/// Configuration file formats accepted by `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Toml,
    Yaml,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Format::Json,
            FormatArg::Toml => Format::Toml,
            FormatArg::Yaml => Format::Yaml,
        }
    }
}
