//! `vcg init`: project scaffolding command.
//!
//! Creates a project directory holding a sample `vcg.toml` that describes a
//! small gate-plus-multiplexer circuit ready for `vcg build`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use vcg_config::CONFIG_FILE;

use crate::GlobalArgs;

/// Runs the `vcg init` command.
///
/// If `name` is `Some`, creates a new subdirectory with that name.
/// Otherwise initializes in the current working directory, refusing to
/// overwrite an existing `vcg.toml`.
/// Returns exit code 0 on success.
pub fn run(name: Option<String>, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = match &name {
        Some(n) => {
            let dir = PathBuf::from(n);
            if dir.exists() {
                return Err(format!("directory '{}' already exists", n).into());
            }
            fs::create_dir_all(&dir)?;
            dir
        }
        None => {
            let dir = std::env::current_dir()?;
            if dir.join(CONFIG_FILE).exists() {
                return Err(format!("{CONFIG_FILE} already exists in {}", dir.display()).into());
            }
            dir
        }
    };

    let project_name = entity_name(&project_dir);

    if !global.quiet {
        eprintln!("  Creating new vcg project `{project_name}`");
    }

    write_vcg_toml(&project_dir, &project_name)?;

    if !global.quiet {
        eprintln!("     Created {}", project_dir.join(CONFIG_FILE).display());
    }

    Ok(0)
}

/// Derives a VHDL-friendly entity name from the directory name.
fn entity_name(dir: &Path) -> String {
    let raw = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("my_project");
    let mut name: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        name.insert_str(0, "top_");
    }
    name
}

/// Writes the sample `vcg.toml` configuration file.
pub(crate) fn write_vcg_toml(root: &Path, name: &str) -> io::Result<()> {
    let content = format!(
        r#"[project]
name = "{name}"
version = "0.1.0"
description = "AND gate feeding a two-way multiplexer"

[codegen]
libraries = ["ieee.std_logic_1164.all"]
selector_width = "minimal"

[[inputs]]
name = "a"

[[inputs]]
name = "b"

[[inputs]]
name = "c"

[[inputs]]
name = "sel"

[[outputs]]
name = "y"

[[blocks]]
name = "gate"
type = "and"
params = {{ inputs = 2, width = 1 }}

[[blocks]]
name = "mux"
type = "multiplexer"
params = {{ inputs = 2, width = 1, default = "0", enable = false }}

[[connections]]
from = "a"
to = "gate.in0"

[[connections]]
from = "b"
to = "gate.in1"

[[connections]]
from = "gate.out0"
to = "mux.in0"

[[connections]]
from = "c"
to = "mux.in1"

[[connections]]
from = "sel"
to = "mux.SELECT"

[[connections]]
from = "mux.out0"
to = "y"
"#
    );

    fs::write(root.join(CONFIG_FILE), content)
}
