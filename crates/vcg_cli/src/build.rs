//! `vcg build`: generate the VHDL program for a project.
//!
//! Loads `vcg.toml`, builds the circuit through the block registry, emits the
//! program, and writes it to the configured output path or stdout.

use std::fs;
use std::path::{Path, PathBuf};

use vcg_codegen::{emit_with_sink, EmitOptions};
use vcg_config::ProjectConfig;
use vcg_diagnostics::{DiagnosticSink, Severity};

use crate::pipeline::{load_project, render_diagnostics};
use crate::{BuildArgs, GlobalArgs};

/// Runs the `vcg build` command.
///
/// Returns exit code 0 if the program was produced, 1 if emission found
/// errors. Warnings are reported but do not fail the build.
pub fn run(args: &BuildArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    let config = &project.config;

    if !global.quiet {
        eprintln!(
            "   Building {} v{}",
            config.project.name, config.project.version
        );
    }

    let sink = DiagnosticSink::new();
    let options = EmitOptions {
        header: config.codegen.header,
    };
    let program = emit_with_sink(&project.system, &options, &sink);

    let error_count = sink.error_count();
    let shown: Vec<_> = sink
        .take_all()
        .into_iter()
        .filter(|d| !global.quiet || d.severity == Severity::Error)
        .collect();
    render_diagnostics(&shown, global);

    let Some(program) = program else {
        eprintln!(
            "error: could not build `{}` due to {} previous error(s)",
            config.project.name, error_count
        );
        return Ok(1);
    };

    if args.stdout {
        print!("{program}");
        return Ok(0);
    }

    let path = output_path(&project.root, config, args.output.as_deref());
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&path, &program)?;
    tracing::info!(path = %path.display(), bytes = program.len(), "wrote program");

    if !global.quiet {
        eprintln!("       Wrote {} ({} bytes)", path.display(), program.len());
    }

    Ok(0)
}

/// Picks the output file: the `--output` flag as given, else
/// `codegen.output` relative to the project root, else
/// `build/<name>.vhd` under the root.
fn output_path(root: &Path, config: &ProjectConfig, flag: Option<&str>) -> PathBuf {
    if let Some(path) = flag {
        return PathBuf::from(path);
    }
    match &config.codegen.output {
        Some(path) => root.join(path),
        None => root
            .join("build")
            .join(format!("{}.vhd", config.project.name)),
    }
}
