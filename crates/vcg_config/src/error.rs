//! Errors from reading a project description.

use std::path::PathBuf;

/// Why a `vcg.toml` could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// The file that was looked up.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The text is not valid TOML or does not match the expected layout.
    #[error("malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required value is absent or empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// The description is well-formed but inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
