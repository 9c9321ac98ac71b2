//! `vcg check`: report circuit defects without writing a program.

use vcg_codegen::{emit_with_sink, EmitOptions};
use vcg_diagnostics::{Diagnostic, DiagnosticSink, Severity};

use crate::pipeline::{load_project, render_diagnostics};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Runs the `vcg check` command.
///
/// Runs the emission pass and reports every diagnostic it produced.
/// Returns exit code 0 if no errors, 1 if there are errors.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!(
            "   Checking {} v{}",
            project.config.project.name, project.config.project.version
        );
    }

    let diagnostics = collect(&project.system);

    match args.format {
        ReportFormat::Text => render_diagnostics(&diagnostics, global),
        ReportFormat::Json => {
            let json =
                serde_json::to_string_pretty(&diagnostics).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }

    let (errors, warnings) = counts(&diagnostics);
    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!("   Result: {} error(s), {} warning(s)", errors, warnings);
    }

    if errors > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

/// Runs emission for its diagnostics only.
fn collect(system: &vcg_ir::System) -> Vec<Diagnostic> {
    let sink = DiagnosticSink::new();
    let options = EmitOptions { header: false };
    let _ = emit_with_sink(system, &options, &sink);
    sink.take_all()
}

fn counts(diagnostics: &[Diagnostic]) -> (usize, usize) {
    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warnings = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    (errors, warnings)
}
