//! Ports: the named, sized, directional terminals of a block.
//!
//! An input [`Port`] holds at most one driving connection; an output port
//! holds its fan-out list. Ports never own connections, they only store
//! [`ConnectionId`] handles into the owning system's arena.

use crate::ids::ConnectionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The direction of a port on a block boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// An input port (data flows into the block).
    Input,
    /// An output port (data flows out of the block).
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => write!(f, "input"),
            PortDirection::Output => write!(f, "output"),
        }
    }
}

/// The wiring carried by a port, shaped by its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortLink {
    /// An input port and its single driver, if connected.
    Driver(Option<ConnectionId>),
    /// An output port and every connection it drives, in creation order.
    Fanout(Vec<ConnectionId>),
}

/// A terminal on a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// The local port name, unique within the owning block.
    pub name: String,
    /// The width in bits; 1 is a scalar `std_logic`.
    pub width: u32,
    /// The driver or fan-out of this port.
    pub link: PortLink,
}

impl Port {
    /// Creates an unconnected input port.
    pub fn input(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
            link: PortLink::Driver(None),
        }
    }

    /// Creates an output port with an empty fan-out.
    pub fn output(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
            link: PortLink::Fanout(Vec::new()),
        }
    }

    /// Returns the direction implied by this port's link.
    pub fn direction(&self) -> PortDirection {
        match self.link {
            PortLink::Driver(_) => PortDirection::Input,
            PortLink::Fanout(_) => PortDirection::Output,
        }
    }

    /// Returns the driving connection of an input port.
    ///
    /// Always `None` for output ports.
    pub fn driver(&self) -> Option<ConnectionId> {
        match self.link {
            PortLink::Driver(driver) => driver,
            PortLink::Fanout(_) => None,
        }
    }

    /// Returns the connections driven by an output port.
    ///
    /// Always empty for input ports.
    pub fn fanout(&self) -> &[ConnectionId] {
        match &self.link {
            PortLink::Driver(_) => &[],
            PortLink::Fanout(fanout) => fanout,
        }
    }

    /// Returns `true` if this port is a vector (wider than one bit).
    pub fn is_vector(&self) -> bool {
        self.width > 1
    }
}
