//! Hierarchical in-memory configuration store
//!
//! Stores a configuration tree addressed by dotted keys (`database.host`),
//! with strict and lenient lookups, flattening, glob and regex queries over
//! the flattened key space, and projection of scalar values into runtime
//! option sinks.

pub mod container;
pub mod env;
pub mod error;
pub mod flatten;
pub mod loader;
pub mod options;
pub mod path;
pub mod pattern;
pub mod value;

pub use container::{ConfigContainer, FlatMap};
pub use env::{EnvSource, ProcessEnv, env, env_from};
pub use error::{Error, Result};
pub use loader::Format;
pub use options::{OptionError, RuntimeSettings, ScalarOptionSink, apply_options};
pub use value::{Branch, Node, Opaque, Value};
