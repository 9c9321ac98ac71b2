//! Shared pipeline helpers for CLI commands.
//!
//! Contains project root resolution, the `vcg.toml` to [`System`] build step
//! used by `build` and `check`, and diagnostic rendering.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use vcg_blocks::{BlockOptions, BlockRegistry, ParamValue, SelectorWidth};
use vcg_config::{CodegenConfig, Endpoint, ProjectConfig, SelectorRule, CONFIG_FILE};
use vcg_diagnostics::{Diagnostic, DiagnosticRenderer, TerminalRenderer};
use vcg_ir::{BlockId, PortDirection, System};

use crate::GlobalArgs;

/// Walks up from `start` looking for the nearest directory containing `vcg.toml`.
///
/// Returns the directory containing `vcg.toml`, or an error if none is found.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--config` is specified, uses that path (file → parent dir, dir → itself).
/// Otherwise walks up from the current directory looking for `vcg.toml`.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            Ok(p.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        find_project_root(&std::env::current_dir()?)
    }
}

/// A loaded project: its root directory, configuration, and circuit graph.
pub struct Project {
    /// The directory containing `vcg.toml`.
    pub root: PathBuf,
    /// The parsed configuration.
    pub config: ProjectConfig,
    /// The circuit built from the configuration.
    pub system: System,
}

/// Resolves the project root, loads `vcg.toml`, and builds its circuit.
pub fn load_project(global: &GlobalArgs) -> Result<Project, Box<dyn std::error::Error>> {
    let root = resolve_project_root(global)?;
    let config = vcg_config::load_config(&root)?;
    let registry = BlockRegistry::with_builtins(block_options(&config.codegen));
    let system = build_system(&config, &registry)?;
    Ok(Project {
        root,
        config,
        system,
    })
}

/// Maps the configured selector rule onto the block library's options.
pub fn block_options(codegen: &CodegenConfig) -> BlockOptions {
    let selector_width = match codegen.selector_width {
        SelectorRule::Minimal => SelectorWidth::Minimal,
        SelectorRule::BitLength => SelectorWidth::BitLength,
    };
    BlockOptions { selector_width }
}

/// Converts a TOML parameter value into a block parameter value.
///
/// Only booleans, integers and strings are meaningful block parameters.
pub fn param_value(value: &toml::Value) -> Result<ParamValue, String> {
    match value {
        toml::Value::Boolean(b) => Ok(ParamValue::Bool(*b)),
        toml::Value::Integer(i) => Ok(ParamValue::Integer(*i)),
        toml::Value::String(s) => Ok(ParamValue::Text(s.clone())),
        other => Err(format!("unsupported {} value", other.type_str())),
    }
}

/// Builds the circuit graph described by `config`.
///
/// Blocks are created through `registry` in file order, then every
/// connection is resolved to block ports and attached.
pub fn build_system(
    config: &ProjectConfig,
    registry: &BlockRegistry,
) -> Result<System, Box<dyn std::error::Error>> {
    let inputs: Vec<(&str, u32)> = config
        .inputs
        .iter()
        .map(|p| (p.name.as_str(), p.width))
        .collect();
    let outputs: Vec<(&str, u32)> = config
        .outputs
        .iter()
        .map(|p| (p.name.as_str(), p.width))
        .collect();
    let mut system = System::new(&config.project.name, &inputs, &outputs)?;
    system.set_libraries(config.codegen.libraries.clone());

    let mut named: HashMap<&str, BlockId> = HashMap::new();
    for def in &config.blocks {
        let label = def.name.as_deref().unwrap_or(&def.kind);
        let mut params = BTreeMap::new();
        for (key, value) in &def.params {
            let value = param_value(value)
                .map_err(|e| format!("block `{label}`: parameter `{key}`: {e}"))?;
            params.insert(key.clone(), value);
        }
        let behavior = registry
            .create_named(&def.kind, &params)
            .map_err(|e| format!("block `{label}`: {e}"))?;
        let name = def.name.as_deref().or_else(|| {
            registry
                .get(&def.kind)
                .and_then(|factory| factory.default_name())
        });
        let id = system
            .add_block(behavior, name)
            .map_err(|e| format!("block `{label}`: {e}"))?;
        if let Some(name) = &def.name {
            named.insert(name.as_str(), id);
        }
    }

    for conn in &config.connections {
        let (from, from_index) = resolve(&system, &named, &conn.from, PortDirection::Output)?;
        let (to, to_index) = resolve(&system, &named, &conn.to, PortDirection::Input)?;
        system
            .connect(from, from_index, to, to_index, None)
            .map_err(|e| format!("connection `{}` -> `{}`: {e}", conn.from, conn.to))?;
    }

    tracing::debug!(
        system = system.name(),
        blocks = system.block_count(),
        connections = system.connection_count(),
        "built system from config"
    );
    Ok(system)
}

/// Resolves an endpoint to a block port facing `direction` from the block's
/// point of view.
///
/// A bare name refers to the boundary: a source is a system input (an
/// output of the `SystemInput` block), a target is a system output.
fn resolve(
    system: &System,
    named: &HashMap<&str, BlockId>,
    endpoint: &Endpoint,
    direction: PortDirection,
) -> Result<(BlockId, usize), String> {
    match &endpoint.block {
        None => {
            let (boundary, block) = match direction {
                PortDirection::Output => (PortDirection::Input, system.system_input()),
                PortDirection::Input => (PortDirection::Output, system.system_output()),
            };
            match system.find_boundary_port(&endpoint.port) {
                Some((found, index)) if found == boundary => Ok((block, index)),
                Some(_) => Err(format!(
                    "`{endpoint}` is a system {} and cannot be used here",
                    boundary_kind(direction)
                )),
                None => Err(format!("`{endpoint}` is not a system port")),
            }
        }
        Some(name) => {
            let id = *named
                .get(name.as_str())
                .ok_or_else(|| format!("unknown block `{name}` in `{endpoint}`"))?;
            let block = system
                .block(id)
                .ok_or_else(|| format!("unknown block `{name}` in `{endpoint}`"))?;
            match block.find_port(&endpoint.port) {
                Some((found, index)) if found == direction => Ok((id, index)),
                Some((found, _)) => Err(format!(
                    "`{endpoint}` is an {found} port but an {direction} port is required"
                )),
                None => Err(format!("block `{name}` has no port `{}`", endpoint.port)),
            }
        }
    }
}

fn boundary_kind(direction: PortDirection) -> &'static str {
    match direction {
        PortDirection::Output => "output",
        PortDirection::Input => "input",
    }
}

/// Renders diagnostics to stderr in the terminal format.
pub fn render_diagnostics(diagnostics: &[Diagnostic], global: &GlobalArgs) {
    let renderer = TerminalRenderer::new(global.color);
    for diag in diagnostics {
        eprint!("{}", renderer.render(diag));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcg_config::load_config_from_str;

    const MUX: &str = r#"
[project]
name = "mux_demo"

[[inputs]]
name = "a"

[[inputs]]
name = "b"

[[inputs]]
name = "s"

[[outputs]]
name = "y"

[[blocks]]
name = "mux"
type = "multiplexer"
params = { inputs = 2, width = 1, default = "0", enable = false }

[[connections]]
from = "a"
to = "mux.in0"

[[connections]]
from = "b"
to = "mux.in1"

[[connections]]
from = "s"
to = "mux.SELECT"

[[connections]]
from = "mux.out0"
to = "y"
"#;

    fn registry() -> BlockRegistry {
        BlockRegistry::with_builtins(BlockOptions::default())
    }

    fn build(text: &str) -> Result<System, Box<dyn std::error::Error>> {
        let config = load_config_from_str(text).unwrap();
        build_system(&config, &registry())
    }

    #[test]
    fn find_root_in_current_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("vcg.toml"), "").unwrap();
        let root = find_project_root(tmp.path()).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn find_root_in_parent() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("vcg.toml"), "").unwrap();
        let sub = tmp.path().join("build").join("nested");
        std::fs::create_dir_all(&sub).unwrap();
        let root = find_project_root(&sub).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn find_root_not_found() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(find_project_root(tmp.path()).is_err());
    }

    #[test]
    fn resolve_root_from_config_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("vcg.toml");
        std::fs::write(&file, "").unwrap();
        let global = GlobalArgs {
            quiet: false,
            verbose: false,
            color: false,
            config: Some(file.to_string_lossy().into_owned()),
        };
        assert_eq!(resolve_project_root(&global).unwrap(), tmp.path());
    }

    #[test]
    fn selector_rule_maps_to_options() {
        let mut codegen = CodegenConfig::default();
        assert_eq!(block_options(&codegen).selector_width, SelectorWidth::Minimal);
        codegen.selector_width = SelectorRule::BitLength;
        assert_eq!(block_options(&codegen).selector_width, SelectorWidth::BitLength);
    }

    #[test]
    fn param_value_conversion() {
        assert_eq!(param_value(&toml::Value::Boolean(true)), Ok(ParamValue::Bool(true)));
        assert_eq!(param_value(&toml::Value::Integer(4)), Ok(ParamValue::Integer(4)));
        assert_eq!(
            param_value(&toml::Value::String("z".into())),
            Ok(ParamValue::Text("z".into()))
        );
        assert!(param_value(&toml::Value::Float(1.5)).is_err());
        assert!(param_value(&toml::Value::Array(vec![])).is_err());
    }

    #[test]
    fn builds_mux_system() {
        let system = build(MUX).unwrap();
        assert_eq!(system.name(), "mux_demo");
        assert_eq!(system.block_count(), 1);
        assert_eq!(system.connection_count(), 4);
        let mux = system.find_block("mux").unwrap();
        assert!(system.driver_of(mux, 2).is_some());
    }

    #[test]
    fn unnamed_blocks_are_named_after_their_type() {
        let text = r#"
[project]
name = "gates"

[[blocks]]
type = "and"

[[blocks]]
type = "or"

[[blocks]]
type = "and"

[[blocks]]
type = "multiplexer"
params = { inputs = 2, width = 1 }
"#;
        let system = build(text).unwrap();
        let names: Vec<&str> = system.blocks().map(|b| b.name()).collect();
        assert_eq!(names, vec!["AND_GATE", "OR_GATE", "AND_GATE_2", "Multiplexer"]);
    }

    #[test]
    fn unknown_block_type_is_reported() {
        let text = "[project]\nname = \"x\"\n\n[[blocks]]\nname = \"g\"\ntype = \"adder\"\n";
        let err = build(text).unwrap_err().to_string();
        assert!(err.contains("block `g`"), "{err}");
        assert!(err.contains("adder"), "{err}");
    }

    #[test]
    fn unsupported_param_value_is_reported() {
        let text = "[project]\nname = \"x\"\n\n[[blocks]]\nname = \"g\"\ntype = \"and\"\nparams = { inputs = 2.5 }\n";
        let err = build(text).unwrap_err().to_string();
        assert!(err.contains("parameter `inputs`"), "{err}");
    }

    #[test]
    fn unknown_port_is_reported() {
        let text = MUX.replace("to = \"mux.in1\"", "to = \"mux.in7\"");
        let err = build(&text).unwrap_err().to_string();
        assert!(err.contains("has no port `in7`"), "{err}");
    }

    #[test]
    fn wrong_direction_is_reported() {
        let text = MUX.replace("from = \"mux.out0\"", "from = \"mux.in0\"");
        let err = build(&text).unwrap_err().to_string();
        assert!(err.contains("is an input port"), "{err}");
    }

    #[test]
    fn double_driver_is_reported() {
        let text = MUX.replace("from = \"b\"\nto = \"mux.in1\"", "from = \"b\"\nto = \"mux.in0\"");
        let err = build(&text).unwrap_err().to_string();
        assert!(err.contains("connection `b` -> `mux.in0`"), "{err}");
    }

    #[test]
    fn width_mismatch_is_reported() {
        let text = MUX.replace("name = \"a\"", "name = \"a\"\nwidth = 4");
        assert!(build(&text).is_err());
    }

    #[test]
    fn system_output_as_source_is_rejected() {
        let system = System::new("t", &[("a", 1)], &[("y", 1)]).unwrap();
        let named = HashMap::new();
        let ep = Endpoint::parse("y").unwrap();
        let err = resolve(&system, &named, &ep, PortDirection::Output).unwrap_err();
        assert!(err.contains("system output"), "{err}");
    }
}
