//! Error types for graph construction and wiring.

use crate::port::PortDirection;

/// Errors raised while building or wiring a [`System`](crate::system::System).
///
/// Every variant is detected eagerly, before the graph is modified, so a
/// failed operation leaves the system unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The system (entity) name is empty.
    #[error("system name must not be empty")]
    EmptySystemName,

    /// A block name is empty.
    #[error("block name must not be empty")]
    EmptyBlockName,

    /// A port or temporary was declared with zero width.
    #[error("`{owner}.{name}` must be at least one bit wide")]
    ZeroWidth {
        /// The block (or system) declaring the signal.
        owner: String,
        /// The local signal name.
        name: String,
    },

    /// Two signals of the same block share a local name.
    #[error("duplicate signal name `{name}` in `{owner}`")]
    DuplicateSignal {
        /// The block (or system) declaring the signals.
        owner: String,
        /// The repeated local name.
        name: String,
    },

    /// A system port name contains the block qualifier `__`, so it could
    /// equal some block's qualified signal name.
    #[error("system port `{0}` must not contain `__`")]
    QualifiedPortName(String),

    /// A block ID does not belong to this system.
    #[error("unknown block {0}")]
    UnknownBlock(crate::ids::BlockId),

    /// A port index is out of range for the given block.
    #[error("block `{block}` has no {direction} port {index}")]
    NoSuchPort {
        /// The block name.
        block: String,
        /// Which port list was indexed.
        direction: PortDirection,
        /// The out-of-range index.
        index: usize,
    },

    /// The two ends of a connection have different widths.
    #[error("cannot connect `{from}` ({from_width} bits) to `{to}` ({to_width} bits)")]
    WidthMismatch {
        /// The driving port, as `block.port`.
        from: String,
        /// The driving port width.
        from_width: u32,
        /// The driven port, as `block.port`.
        to: String,
        /// The driven port width.
        to_width: u32,
    },

    /// The destination input already has a driver.
    #[error("input `{to}` is already driven by `{existing}`")]
    AlreadyDriven {
        /// The driven port, as `block.port`.
        to: String,
        /// The current driver, as `block.port`.
        existing: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_mismatch() {
        let err = GraphError::WidthMismatch {
            from: "a.out0".to_string(),
            from_width: 4,
            to: "b.in0".to_string(),
            to_width: 1,
        };
        assert_eq!(
            format!("{err}"),
            "cannot connect `a.out0` (4 bits) to `b.in0` (1 bits)"
        );
    }

    #[test]
    fn display_no_such_port() {
        let err = GraphError::NoSuchPort {
            block: "g".to_string(),
            direction: PortDirection::Output,
            index: 3,
        };
        assert_eq!(format!("{err}"), "block `g` has no output port 3");
    }

    #[test]
    fn display_already_driven() {
        let err = GraphError::AlreadyDriven {
            to: "g.in0".to_string(),
            existing: "h.out0".to_string(),
        };
        assert_eq!(format!("{err}"), "input `g.in0` is already driven by `h.out0`");
    }

    #[test]
    fn display_qualified_port_name() {
        let err = GraphError::QualifiedPortName("g__in0".to_string());
        assert_eq!(format!("{err}"), "system port `g__in0` must not contain `__`");
    }
}
