//! The capability every concrete block type implements.
//!
//! A [`BlockBehavior`] declares its port layout once, at construction, and
//! turns its configuration plus the block's resolved signal names into
//! concurrent statements. It never sees the rest of the graph.

use crate::block::Block;
use crate::port::PortDirection;
use crate::stmt::ConcurrentStmt;
use std::fmt;

/// A port or temporary requested by a behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    /// An explicit local name; ports without one are named `in<i>`/`out<i>`.
    pub name: Option<String>,
    /// The width in bits.
    pub width: u32,
}

impl PortSpec {
    /// A port with the default positional name.
    pub fn anonymous(width: u32) -> Self {
        Self { name: None, width }
    }

    /// A port or temporary with an explicit name.
    pub fn named(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: Some(name.into()),
            width,
        }
    }
}

/// The ports and temporaries a behavior needs, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockLayout {
    /// Input ports, in order.
    pub inputs: Vec<PortSpec>,
    /// Output ports, in order.
    pub outputs: Vec<PortSpec>,
    /// Internal temporaries; unnamed entries are named `tmp<i>`.
    pub temporaries: Vec<PortSpec>,
}

/// Errors raised while generating a block's statements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// The block has no behavior (a system boundary block).
    #[error("block `{block}` has no behavior to generate")]
    NotImplemented {
        /// The block name.
        block: String,
    },

    /// A behavior referenced a port its block does not have.
    #[error("block `{block}` has no {direction} port {index}")]
    MissingPort {
        /// The block name.
        block: String,
        /// Which port list was indexed.
        direction: PortDirection,
        /// The out-of-range index.
        index: usize,
    },

    /// A behavior referenced a temporary its block does not have.
    #[error("block `{block}` has no temporary {index}")]
    MissingTemporary {
        /// The block name.
        block: String,
        /// The out-of-range index.
        index: usize,
    },
}

/// A concrete block type: a logic gate, a multiplexer, ...
///
/// Implementations are configure-once: all parameters are validated when the
/// behavior is built, and [`generate`](Self::generate) is a pure function of
/// that configuration and the block's signal names.
pub trait BlockBehavior: fmt::Debug {
    /// Returns the registry identifier of this block type (e.g. `"and"`).
    fn type_id(&self) -> &str;

    /// Returns the ports and temporaries this block needs.
    fn layout(&self) -> BlockLayout;

    /// Produces the block's behavioral statements.
    ///
    /// Signal names are resolved through `block` (e.g.
    /// [`Block::input_signal`]); the behavior must not assume anything about
    /// other blocks.
    fn generate(&self, block: &Block) -> Result<Vec<ConcurrentStmt>, GenerateError>;
}
