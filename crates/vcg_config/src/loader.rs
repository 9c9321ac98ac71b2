//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{Endpoint, ProjectConfig};
use std::collections::HashSet;
use std::path::Path;

/// The configuration file name looked up in a project directory.
pub const CONFIG_FILE: &str = "vcg.toml";

/// Loads and validates a `vcg.toml` configuration from a project directory.
///
/// Reads `<project_dir>/vcg.toml`, parses it, and validates it.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
        path: config_path.clone(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a `vcg.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates names, widths, and connection endpoints.
///
/// Block port names are not checked here; they depend on the block type.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.trim().is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }

    let mut ports = HashSet::new();
    for port in config.inputs.iter().chain(&config.outputs) {
        if port.name.trim().is_empty() {
            return Err(ConfigError::MissingField("port name".to_string()));
        }
        if port.width == 0 {
            return Err(ConfigError::Invalid(format!(
                "port `{}` must be at least one bit wide",
                port.name
            )));
        }
        if port.name.contains("__") {
            return Err(ConfigError::Invalid(format!(
                "port `{}` must not contain `__`",
                port.name
            )));
        }
        if !ports.insert(port.name.to_ascii_lowercase()) {
            return Err(ConfigError::Invalid(format!(
                "duplicate port `{}`",
                port.name
            )));
        }
    }

    let mut blocks = HashSet::new();
    let mut folded = HashSet::new();
    for block in &config.blocks {
        if block.kind.trim().is_empty() {
            return Err(ConfigError::MissingField("blocks.type".to_string()));
        }
        if let Some(name) = &block.name {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "block name must not be empty".to_string(),
                ));
            }
            blocks.insert(name.as_str());
            if !folded.insert(name.to_ascii_lowercase()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate block `{name}`"
                )));
            }
        }
    }

    let has_input = |name: &str| config.inputs.iter().any(|p| p.name == name);
    let has_output = |name: &str| config.outputs.iter().any(|p| p.name == name);
    let check_block = |ep: &Endpoint| -> Result<(), ConfigError> {
        match &ep.block {
            Some(block) if !blocks.contains(block.as_str()) => Err(ConfigError::Invalid(
                format!("connection endpoint `{ep}` names unknown block `{block}`"),
            )),
            _ => Ok(()),
        }
    };
    for conn in &config.connections {
        check_block(&conn.from)?;
        check_block(&conn.to)?;
        if conn.from.block.is_none() && !has_input(&conn.from.port) {
            return Err(ConfigError::Invalid(format!(
                "connection source `{}` is not a system input",
                conn.from
            )));
        }
        if conn.to.block.is_none() && !has_output(&conn.to.port) {
            return Err(ConfigError::Invalid(format!(
                "connection target `{}` is not a system output",
                conn.to
            )));
        }
    }
    Ok(())
}
