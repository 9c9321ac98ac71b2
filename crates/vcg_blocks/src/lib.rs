//! Built-in block types and the block-factory registry.
//!
//! Every block type implements [`vcg_ir::BlockBehavior`]. A type is created
//! from a validated [`ParamRecord`] through its [`BlockFactory`]; factories
//! are looked up by type identifier in a [`BlockRegistry`].
//!
//! # Built-in types
//!
//! - `and`, `or`, `xor`, `nand`, `nor`, `xnor`: n-input logic gates ([`LogicGate`])
//! - `multiplexer`: priority-encoded multiplexer with optional enable ([`Multiplexer`])

#![warn(missing_docs)]

pub mod error;
pub mod gate;
pub mod mux;
pub mod params;
pub mod registry;

pub use error::BlockConfigError;
pub use gate::{GateKind, LogicGate};
pub use mux::{Multiplexer, SelectorWidth};
pub use params::{collect, collect_named, ParamError, ParamKind, ParamRecord, ParamSpec, ParamValue};
pub use registry::{BlockFactory, BlockOptions, BlockRegistry};
