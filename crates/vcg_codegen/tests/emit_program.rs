//! End-to-end emission tests over systems built from the built-in blocks.

use vcg_blocks::{GateKind, LogicGate, Multiplexer, SelectorWidth};
use vcg_codegen::{emit_program, emit_with_sink, errors, EmitError, EmitOptions};
use vcg_common::Logic;
use vcg_diagnostics::{DiagnosticSink, Severity};
use vcg_ir::{Block, BlockBehavior, BlockLayout, ConcurrentStmt, GenerateError, PortSpec, System};

fn bare() -> EmitOptions {
    EmitOptions { header: false }
}

fn and_system() -> System {
    let mut sys = System::new("top", &[("a", 1), ("b", 1)], &[("y", 1)]).unwrap();
    let g = sys
        .add_block(Box::new(LogicGate::new(GateKind::And, 2, 1).unwrap()), Some("g"))
        .unwrap();
    let input = sys.system_input();
    let output = sys.system_output();
    sys.connect(input, 0, g, 0, None).unwrap();
    sys.connect(input, 1, g, 1, None).unwrap();
    sys.connect(g, 0, output, 0, None).unwrap();
    sys
}

/// Two 4-bit inputs through an AND gate, then a multiplexer choosing between
/// the gate and `c`.
fn mixed_system() -> System {
    let mut sys = System::new(
        "mixed",
        &[("a", 4), ("b", 4), ("c", 4), ("sel", 1), ("en", 1)],
        &[("y", 4)],
    )
    .unwrap();
    let g = sys
        .add_block(Box::new(LogicGate::new(GateKind::And, 2, 4).unwrap()), None)
        .unwrap();
    let m = sys
        .add_block(
            Box::new(
                Multiplexer::new(2, 4, Logic::Zero, Some(Logic::One), SelectorWidth::Minimal)
                    .unwrap(),
            ),
            None,
        )
        .unwrap();
    let input = sys.system_input();
    let output = sys.system_output();
    sys.connect(input, 0, g, 0, None).unwrap();
    sys.connect(input, 1, g, 1, None).unwrap();
    sys.connect(g, 0, m, 0, None).unwrap();
    sys.connect(input, 2, m, 1, None).unwrap();
    sys.connect(input, 3, m, 2, None).unwrap();
    sys.connect(input, 4, m, 3, None).unwrap();
    sys.connect(m, 0, output, 0, None).unwrap();
    sys
}

/// Returns the lines between `start` and the next line equal to `end`.
fn section<'a>(text: &'a str, start: &str, end: &str) -> Vec<&'a str> {
    text.lines()
        .skip_while(|l| *l != start)
        .skip(1)
        .take_while(|l| *l != end)
        .collect()
}

#[test]
fn and_gate_full_text() {
    let text = emit_program(&and_system(), &bare()).unwrap();
    let expected = concat!(
        "-- Including libraries\n",
        "LIBRARY ieee;\n",
        "USE ieee.std_logic_1164.all;\n",
        "\n",
        "ENTITY top IS\n",
        "-- Generating ports\n",
        "PORT (\n",
        "a: IN std_logic;\n",
        "b: IN std_logic;\n",
        "y: OUT std_logic);\n",
        "END top;\n",
        "\n",
        "-- Architecture Implementation\n",
        "ARCHITECTURE Arq_top OF top IS\n",
        "-- Signal declarations\n",
        "\n",
        "-- Declaring g's ports\n",
        "-- Input ports\n",
        "signal g__in0: std_logic;\n",
        "signal g__in1: std_logic;\n",
        "\n",
        "-- Output ports\n",
        "signal g__out0: std_logic;\n",
        "BEGIN\n",
        "\n",
        "-- Defining connections\n",
        "g__in0 <= a;\n",
        "g__in1 <= b;\n",
        "\n",
        "\n",
        "-- Blocks implementation\n",
        "-- Implementation of g block\n",
        "g__out0 <= g__in0 and g__in1;\n",
        "\n",
        "-- Connecting outputs\n",
        "y <= g__out0;\n",
        "END Arq_top;\n",
    );
    assert_eq!(text, expected);
}

#[test]
fn header_comes_first() {
    let text = emit_program(&and_system(), &EmitOptions::default()).unwrap();
    assert!(text.starts_with("----"));
    assert!(text.contains("-- Generated by vcg"));
    let header_end = text.find("-- Including libraries").unwrap();
    assert!(text[..header_end].lines().all(|l| l.is_empty() || l.starts_with("--")));
}

#[test]
fn emission_is_idempotent() {
    let sys = mixed_system();
    let first = emit_program(&sys, &EmitOptions::default()).unwrap();
    let second = emit_program(&sys, &EmitOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn one_wiring_assignment_per_block_input() {
    let sys = mixed_system();
    let text = emit_program(&sys, &bare()).unwrap();
    let wiring: Vec<_> = section(&text, "-- Defining connections", "-- Blocks implementation")
        .into_iter()
        .filter(|l| l.contains(" <= "))
        .collect();
    let total_inputs: usize = sys.blocks().map(|b| b.inputs().len()).sum();
    assert_eq!(wiring.len(), total_inputs);
    assert_eq!(total_inputs, 6);
}

#[test]
fn behaviors_follow_insertion_order() {
    let sys = mixed_system();
    let text = emit_program(&sys, &bare()).unwrap();
    let headings: Vec<_> = text
        .lines()
        .filter(|l| l.starts_with("-- Implementation of "))
        .collect();
    let expected: Vec<_> = sys
        .blocks()
        .map(|b| format!("-- Implementation of {} block", b.name()))
        .collect();
    assert_eq!(headings, expected);
    assert_eq!(headings.len(), sys.block_count());
}

#[test]
fn system_inputs_use_raw_names() {
    let text = emit_program(&mixed_system(), &bare()).unwrap();
    assert!(text.contains("block0__in0 <= a;\n"));
    assert!(text.contains("block1__in0 <= block0__out0;\n"));
    assert!(text.contains("block1__SELECT <= sel;\n"));
    assert!(text.contains("y <= block1__out0;\n"));
}

#[test]
fn vector_gate_and_enabled_mux_text() {
    let text = emit_program(&mixed_system(), &bare()).unwrap();
    assert!(text.contains(
        "block0__out0 <= (block0__in0(3) and block0__in1(3)) & \
         (block0__in0(2) and block0__in1(2)) & \
         (block0__in0(1) and block0__in1(1)) & \
         (block0__in0(0) and block0__in1(0));\n"
    ));
    assert!(text.contains(
        "block1__CHOSEN <= block1__in0 when (block1__SELECT = '0') else\n\
         block1__in1 when (block1__SELECT = '1') else\n\
         \"0000\";\n"
    ));
    assert!(text.contains(
        "block1__out0 <= block1__CHOSEN when (block1__EN = '1') else\n\
         \"ZZZZ\";\n"
    ));
    assert!(text.contains("-- Declaring block1's ports & temporary signals\n"));
    assert!(text.contains("signal block1__CHOSEN: std_logic_vector(3 downto 0);\n"));
    assert!(text.contains("signal block1__EN: std_logic;\n"));
}

#[test]
fn declarations_precede_begin() {
    let text = emit_program(&mixed_system(), &bare()).unwrap();
    let begin = text.find("\nBEGIN\n").unwrap();
    let last_decl = text.rfind("\nsignal ").unwrap();
    assert!(last_decl < begin);
}

#[test]
fn output_driven_by_input_uses_raw_name() {
    let mut sys = System::new("wire", &[("a", 2)], &[("y", 2)]).unwrap();
    sys.connect(sys.system_input(), 0, sys.system_output(), 0, None)
        .unwrap();
    let text = emit_program(&sys, &bare()).unwrap();
    assert!(text.contains("-- Connecting outputs\ny <= a;\nEND Arq_wire;\n"));
    assert!(text.contains("a: IN std_logic_vector(1 downto 0);\n"));
}

#[test]
fn every_missing_driver_reported() {
    let mut sys = System::new("top", &[("a", 1)], &[("y", 1), ("z", 1)]).unwrap();
    let g = sys
        .add_block(Box::new(LogicGate::new(GateKind::Or, 3, 1).unwrap()), Some("g"))
        .unwrap();
    sys.connect(sys.system_input(), 0, g, 1, None).unwrap();
    sys.connect(g, 0, sys.system_output(), 0, None).unwrap();

    let EmitError::Defects(defects) = emit_program(&sys, &bare()).unwrap_err();
    let subjects: Vec<_> = defects.iter().filter_map(|d| d.subject.as_deref()).collect();
    assert_eq!(subjects, vec!["g.in0", "g.in2", "z"]);
    assert!(defects.iter().all(|d| d.code == errors::MISSING_DRIVER));
}

#[derive(Debug)]
struct Broken;

impl BlockBehavior for Broken {
    fn type_id(&self) -> &str {
        "broken"
    }

    fn layout(&self) -> BlockLayout {
        BlockLayout {
            outputs: vec![PortSpec::anonymous(1)],
            ..BlockLayout::default()
        }
    }

    fn generate(&self, block: &Block) -> Result<Vec<ConcurrentStmt>, GenerateError> {
        block.temporary_signal(0)?;
        Ok(Vec::new())
    }
}

#[test]
fn generator_failure_reported() {
    let mut sys = System::new("top", &[], &[("y", 1)]).unwrap();
    let b = sys.add_block(Box::new(Broken), Some("b")).unwrap();
    sys.connect(b, 0, sys.system_output(), 0, None).unwrap();

    let EmitError::Defects(defects) = emit_program(&sys, &bare()).unwrap_err();
    assert_eq!(defects.len(), 1);
    assert_eq!(defects[0].code, errors::GENERATE_FAILED);
    assert_eq!(defects[0].subject.as_deref(), Some("b"));
}

#[test]
fn warnings_do_not_block_emission() {
    let mut sys = System::new("top", &[("a", 1), ("unused", 1)], &[("y", 1)]).unwrap();
    let g = sys
        .add_block(Box::new(LogicGate::new(GateKind::Xor, 2, 1).unwrap()), Some("g"))
        .unwrap();
    let spare = sys
        .add_block(Box::new(LogicGate::new(GateKind::Nand, 2, 1).unwrap()), Some("spare"))
        .unwrap();
    let input = sys.system_input();
    sys.connect(input, 0, g, 0, None).unwrap();
    sys.connect(input, 0, g, 1, None).unwrap();
    sys.connect(input, 0, spare, 0, None).unwrap();
    sys.connect(input, 0, spare, 1, None).unwrap();
    sys.connect(g, 0, sys.system_output(), 0, None).unwrap();

    let sink = DiagnosticSink::new();
    let text = emit_with_sink(&sys, &bare(), &sink).unwrap();
    assert!(text.contains("spare__out0 <= not (spare__in0 and spare__in1);\n"));
    let diags = sink.take_all();
    assert_eq!(diags.len(), 2);
    assert!(diags.iter().all(|d| d.severity == Severity::Warning));
    assert!(diags.iter().any(|d| d.code == errors::UNUSED_INPUT));
    assert!(diags
        .iter()
        .any(|d| d.code == errors::UNUSED_OUTPUT && d.subject.as_deref() == Some("spare.out0")));
}

#[test]
fn extra_libraries_included() {
    let mut sys = and_system();
    sys.add_library("ieee.numeric_std.all");
    let text = emit_program(&sys, &bare()).unwrap();
    assert!(text.starts_with(
        "-- Including libraries\nLIBRARY ieee;\nUSE ieee.std_logic_1164.all;\nUSE ieee.numeric_std.all;\n\n"
    ));
}
