//! VHDL emission for circuit systems.
//!
//! [`emit_program`] walks a [`vcg_ir::System`] once and produces the full
//! program text: signature header, library clauses, the entity, and an
//! architecture holding every block's signal declarations, input wiring,
//! behavior, and the output wiring. Defects found on the way (undriven
//! inputs, failing generators) are collected as diagnostics instead of
//! aborting at the first one.
//!
//! The [`printer`] module renders the statement IR that block behaviors
//! produce, so no generator builds VHDL text by hand.

#![warn(missing_docs)]

mod emit;
pub mod errors;
pub mod printer;

pub use emit::{emit_program, emit_with_sink, EmitError, EmitOptions};
