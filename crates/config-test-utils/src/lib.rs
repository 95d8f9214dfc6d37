//! Shared test utilities for the config-container workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not
//! rebuild the same trees and files by hand. It is a dev-dependency only,
//! never published.
//!
//! # Modules
//!
//! - [`fixtures`]: the sample container and [`ConfigDir`] for config files
//! - [`sink`]: [`FailingSink`], an option sink that rejects chosen keys

pub mod fixtures;
pub mod sink;

pub use fixtures::{ConfigDir, sample_container, tree};
pub use sink::FailingSink;
