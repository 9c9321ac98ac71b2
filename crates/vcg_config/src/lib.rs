//! Parsing and validation of `vcg.toml` circuit descriptions.
//!
//! A `vcg.toml` names the entity, its external ports, the blocks to
//! instantiate with their parameters, and the connections between them.
//! This crate produces a strongly-typed [`ProjectConfig`]; turning it into a
//! graph is left to the caller.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE};
pub use types::*;
