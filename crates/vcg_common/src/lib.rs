//! Shared foundational types used across the vcg code generator.
//!
//! This crate provides IEEE 1164 logic symbols and the bit-level helpers
//! (selector widths, binary encodings, literal rendering) that both the block
//! library and the emitter depend on.

#![warn(missing_docs)]

pub mod bits;
pub mod logic;

pub use bits::{binary_literal, bit_length, minimal_selector_width};
pub use logic::{Logic, ParseLogicError};
