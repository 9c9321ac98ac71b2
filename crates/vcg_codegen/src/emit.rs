//! The emission pass: one walk over a system producing the program text.

use vcg_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use vcg_ir::{Block, ConcurrentStmt, Expr, Port, PortDirection, SignalClass, SignalDecl, System};

use crate::errors;
use crate::printer;

/// Options for [`emit_program`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Whether to start the program with the signature comment block.
    pub header: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self { header: true }
    }
}

/// Emission could not produce a program.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EmitError {
    /// Every error-severity defect found in the graph.
    #[error("cannot emit program: {} defect(s) found", .0.len())]
    Defects(Vec<Diagnostic>),
}

/// Emits the complete program for `system`.
///
/// Either the whole text is returned or every error found, never a partial
/// program. Warnings are logged and dropped; use [`emit_with_sink`] to keep
/// them.
pub fn emit_program(system: &System, options: &EmitOptions) -> Result<String, EmitError> {
    let sink = DiagnosticSink::new();
    let text = emit_with_sink(system, options, &sink);
    let (errors, rest): (Vec<Diagnostic>, Vec<Diagnostic>) = sink
        .take_all()
        .into_iter()
        .partition(|d| d.severity == Severity::Error);
    for warning in rest.iter().filter(|d| d.severity == Severity::Warning) {
        tracing::warn!(code = %warning.code, subject = ?warning.subject, "{}", warning.message);
    }
    text.ok_or(EmitError::Defects(errors))
}

/// Emits the complete program for `system`, reporting every defect and
/// warning into `sink`.
///
/// Returns `None` if any error was reported.
pub fn emit_with_sink(
    system: &System,
    options: &EmitOptions,
    sink: &DiagnosticSink,
) -> Option<String> {
    let _span = tracing::info_span!("emit", system = system.name()).entered();
    let errors_before = sink.error_count();

    check_boundary(system, sink);
    let wiring: Vec<Vec<ConcurrentStmt>> = system
        .blocks()
        .map(|block| input_wiring(system, block, sink))
        .collect();
    let behaviors: Vec<Vec<ConcurrentStmt>> = system
        .blocks()
        .map(|block| behavior(block, sink))
        .collect();
    let outputs = output_wiring(system, sink);

    if sink.error_count() > errors_before {
        return None;
    }

    let mut out = String::new();
    if options.header {
        out.push_str(&signature());
    }
    out.push_str(&libraries(system.libraries()));
    out.push_str(&entity(system));

    let name = system.name();
    out.push_str("\n-- Architecture Implementation\n");
    out.push_str(&format!("ARCHITECTURE Arq_{name} OF {name} IS\n"));
    out.push_str("-- Signal declarations\n");
    for block in system.blocks() {
        out.push_str(&declarations(block));
    }
    out.push_str("BEGIN\n");

    out.push_str("\n-- Defining connections\n");
    for stmts in &wiring {
        for s in stmts {
            out.push_str(&printer::stmt(s));
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str("\n-- Blocks implementation\n");
    for (block, stmts) in system.blocks().zip(&behaviors) {
        out.push_str(&format!("-- Implementation of {} block\n", block.name()));
        for s in stmts {
            out.push_str(&printer::stmt(s));
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str("-- Connecting outputs\n");
    for s in &outputs {
        out.push_str(&printer::stmt(s));
        out.push('\n');
    }
    out.push_str(&format!("END Arq_{name};\n"));

    tracing::debug!(blocks = system.block_count(), bytes = out.len(), "emitted program");
    Some(out)
}

/// The fixed signature comment that opens every program.
fn signature() -> String {
    let rule = "-".repeat(80);
    format!(
        "{rule}\n\
         -- Generated by vcg {}\n\
         -- Do not edit by hand; regenerate from the circuit description.\n\
         {rule}\n\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// `LIBRARY` clauses for the distinct library prefixes, then one `USE` per
/// included library.
fn libraries(included: &[String]) -> String {
    let mut out = String::from("-- Including libraries\n");
    let mut roots: Vec<&str> = Vec::new();
    for library in included {
        let root = library.split('.').next().unwrap_or(library.as_str());
        if !roots.contains(&root) {
            roots.push(root);
        }
    }
    for root in roots {
        out.push_str(&format!("LIBRARY {root};\n"));
    }
    for library in included {
        out.push_str(&format!("USE {library};\n"));
    }
    out.push('\n');
    out
}

fn entity(system: &System) -> String {
    let name = system.name();
    let mut out = format!("ENTITY {name} IS\n");
    let ports: Vec<String> = system
        .inputs()
        .iter()
        .map(|p| format!("{}: IN {}", p.name, printer::type_mark(p.width)))
        .chain(
            system
                .outputs()
                .iter()
                .map(|p| format!("{}: OUT {}", p.name, printer::type_mark(p.width))),
        )
        .collect();
    if !ports.is_empty() {
        out.push_str("-- Generating ports\nPORT (\n");
        out.push_str(&ports.join(";\n"));
        out.push_str(");\n");
    }
    out.push_str(&format!("END {name};\n"));
    out
}

fn declarations(block: &Block) -> String {
    let signals = block.signals();
    let group = |class: SignalClass| -> String {
        signals
            .iter()
            .filter(|s| s.class == class)
            .map(|s| {
                let decl = SignalDecl {
                    name: block.signal_name(&s.name),
                    width: s.width,
                };
                format!("{}\n", printer::signal_decl(&decl))
            })
            .collect()
    };
    let has_temporaries = !block.temporaries().is_empty();

    let mut out = format!(
        "\n-- Declaring {}'s ports{}\n",
        block.name(),
        if has_temporaries {
            " & temporary signals"
        } else {
            ""
        }
    );
    out.push_str("-- Input ports\n");
    out.push_str(&group(SignalClass::Input));
    out.push_str("\n-- Output ports\n");
    out.push_str(&group(SignalClass::Output));
    if has_temporaries {
        out.push_str("\n-- Temporary signals\n");
        out.push_str(&group(SignalClass::Temporary));
    }
    out
}

/// One assignment per input of `block` from its driver. Undriven inputs are
/// reported and skipped; unused outputs are reported as warnings.
fn input_wiring(system: &System, block: &Block, sink: &DiagnosticSink) -> Vec<ConcurrentStmt> {
    for (index, port) in block.outputs().iter().enumerate() {
        if port.fanout().is_empty() {
            sink.emit(errors::unused_output(
                &block.port_label(PortDirection::Output, index),
            ));
        }
    }

    let mut stmts = Vec::new();
    for (index, port) in block.inputs().iter().enumerate() {
        match driver_signal(system, port) {
            Some(source) => stmts.push(ConcurrentStmt::assign(
                block.signal_name(&port.name),
                Expr::signal(source),
            )),
            None => sink.emit(errors::undriven_input(
                &block.port_label(PortDirection::Input, index),
            )),
        }
    }
    stmts
}

fn behavior(block: &Block, sink: &DiagnosticSink) -> Vec<ConcurrentStmt> {
    tracing::debug!(block = block.name(), "generating");
    match block.generate() {
        Ok(stmts) => stmts,
        Err(err) => {
            sink.emit(errors::generate_failed(block.name(), &err));
            Vec::new()
        }
    }
}

fn output_wiring(system: &System, sink: &DiagnosticSink) -> Vec<ConcurrentStmt> {
    let mut stmts = Vec::new();
    for port in system.outputs() {
        match driver_signal(system, port) {
            Some(source) => stmts.push(ConcurrentStmt::assign(
                port.name.clone(),
                Expr::signal(source),
            )),
            None => sink.emit(errors::undriven_output(&port.name)),
        }
    }
    stmts
}

fn check_boundary(system: &System, sink: &DiagnosticSink) {
    for port in system.inputs() {
        if port.fanout().is_empty() {
            sink.emit(errors::unused_input(&port.name));
        }
    }
}

fn driver_signal(system: &System, port: &Port) -> Option<String> {
    let conn = system.connection(port.driver()?)?;
    system.source_signal(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_roots_deduplicated() {
        let text = libraries(&[
            "ieee.std_logic_1164.all".to_string(),
            "ieee.numeric_std.all".to_string(),
            "work.pkg.all".to_string(),
        ]);
        assert_eq!(
            text,
            "-- Including libraries\n\
             LIBRARY ieee;\n\
             LIBRARY work;\n\
             USE ieee.std_logic_1164.all;\n\
             USE ieee.numeric_std.all;\n\
             USE work.pkg.all;\n\n"
        );
    }

    #[test]
    fn entity_without_ports() {
        let sys = System::new("empty", &[], &[]).unwrap();
        assert_eq!(entity(&sys), "ENTITY empty IS\nEND empty;\n");
    }

    #[test]
    fn entity_port_list_terminated() {
        let sys = System::new("top", &[("a", 1), ("v", 8)], &[("y", 1)]).unwrap();
        assert_eq!(
            entity(&sys),
            "ENTITY top IS\n\
             -- Generating ports\n\
             PORT (\n\
             a: IN std_logic;\n\
             v: IN std_logic_vector(7 downto 0);\n\
             y: OUT std_logic);\n\
             END top;\n"
        );
    }

    #[test]
    fn signature_mentions_version() {
        assert!(signature().contains(env!("CARGO_PKG_VERSION")));
        assert!(signature().lines().all(|l| l.is_empty() || l.starts_with("--")));
    }
}
