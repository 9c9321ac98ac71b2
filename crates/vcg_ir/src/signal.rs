//! Signals owned by a block and the qualified names they are emitted under.

use serde::{Deserialize, Serialize};

/// The direction class of a block-owned signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalClass {
    /// Backs an input port.
    Input,
    /// Backs an output port.
    Output,
    /// An internal temporary used only by the block's behavior.
    Temporary,
}

/// An internal temporary signal declared by a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Temporary {
    /// The local name, unique within the owning block.
    pub name: String,
    /// The width in bits.
    pub width: u32,
}

/// One entry of [`Block::signals`](crate::block::Block::signals).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalEntry {
    /// The local name of the port or temporary.
    pub name: String,
    /// The width in bits.
    pub width: u32,
    /// Whether this is an input, output, or temporary.
    pub class: SignalClass,
}

/// A resolved, fully qualified signal as a behavior sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// The qualified name, `<BlockName>__<LocalName>`.
    pub name: String,
    /// The width in bits.
    pub width: u32,
}

/// Joins a block name and a local name in a qualified signal name.
pub const QUALIFIER: &str = "__";

/// Builds the qualified name of a block-owned signal.
pub fn qualified_name(block: &str, local: &str) -> String {
    format!("{block}{QUALIFIER}{local}")
}
