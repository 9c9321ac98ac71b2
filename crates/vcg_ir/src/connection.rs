//! Connections: directed edges from one output port to one input port.

use crate::ids::{BlockId, ConnectionId};
use serde::{Deserialize, Serialize};

/// Identifies one port of one block by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRef {
    /// The owning block.
    pub block: BlockId,
    /// The position within that block's input or output port list.
    pub index: usize,
}

impl PortRef {
    /// Creates a port reference.
    pub fn new(block: BlockId, index: usize) -> Self {
        Self { block, index }
    }
}

/// An opaque handle to the editor's visual for a connection.
///
/// The graph never interprets it; it is stored and returned as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// An immutable link record from an output port to an input port.
///
/// Connections are created only by [`System::connect`](crate::system::System::connect)
/// and compared by [`ConnectionId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// The unique ID of this connection.
    pub id: ConnectionId,
    /// The unique connection name (`conn0`, `conn1`, ...).
    pub name: String,
    /// The driving output port.
    pub from: PortRef,
    /// The driven input port.
    pub to: PortRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_serde_roundtrip() {
        let conn = Connection {
            id: ConnectionId::from_raw(0),
            name: "conn0".to_string(),
            from: PortRef::new(BlockId::from_raw(0), 1),
            to: PortRef::new(BlockId::from_raw(2), 0),
        };
        let json = serde_json::to_string(&conn).unwrap();
        let restored: Connection = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, conn);
    }
}
