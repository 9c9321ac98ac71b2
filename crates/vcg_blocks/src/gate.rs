//! The logic-gate family: AND, OR, XOR and their negations.
//!
//! A gate has `inputs` data inputs and one output, all `width` bits wide.
//! A scalar gate combines the input signals directly; a vector gate builds
//! one combination per bit, most significant first, and concatenates them.

use std::fmt;

use serde::{Deserialize, Serialize};
use vcg_ir::{Block, BlockBehavior, BlockLayout, ConcurrentStmt, Expr, GenerateError, LogicOp, PortSpec};

use crate::error::BlockConfigError;

/// The operator a [`LogicGate`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateKind {
    /// `a and b`
    And,
    /// `a or b`
    Or,
    /// `a xor b`
    Xor,
    /// `not (a and b)`
    Nand,
    /// `not (a or b)`
    Nor,
    /// `not (a xor b)`
    Xnor,
}

impl GateKind {
    /// Every gate kind, in registry order.
    pub const ALL: [GateKind; 6] = [
        GateKind::And,
        GateKind::Or,
        GateKind::Xor,
        GateKind::Nand,
        GateKind::Nor,
        GateKind::Xnor,
    ];

    /// Returns the name given to an unnamed block of this kind
    /// (`"AND_GATE"`, ...).
    pub fn block_name(self) -> &'static str {
        match self {
            GateKind::And => "AND_GATE",
            GateKind::Or => "OR_GATE",
            GateKind::Xor => "XOR_GATE",
            GateKind::Nand => "NAND_GATE",
            GateKind::Nor => "NOR_GATE",
            GateKind::Xnor => "XNOR_GATE",
        }
    }

    /// Returns the registry identifier (`"and"`, `"nor"`, ...).
    pub fn type_id(self) -> &'static str {
        match self {
            GateKind::And => "and",
            GateKind::Or => "or",
            GateKind::Xor => "xor",
            GateKind::Nand => "nand",
            GateKind::Nor => "nor",
            GateKind::Xnor => "xnor",
        }
    }

    /// Returns the associative operator underneath this gate.
    pub fn op(self) -> LogicOp {
        match self {
            GateKind::And | GateKind::Nand => LogicOp::And,
            GateKind::Or | GateKind::Nor => LogicOp::Or,
            GateKind::Xor | GateKind::Xnor => LogicOp::Xor,
        }
    }

    /// Returns `true` if the combined value is inverted.
    pub fn is_negated(self) -> bool {
        matches!(self, GateKind::Nand | GateKind::Nor | GateKind::Xnor)
    }

    fn combine(self, operands: Vec<Expr>) -> Expr {
        let combined = Expr::Logic {
            op: self.op(),
            operands,
        };
        if self.is_negated() {
            combined.negate()
        } else {
            combined
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_id().to_uppercase())
    }
}

/// An n-input logic gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicGate {
    kind: GateKind,
    inputs: u32,
    width: u32,
}

impl LogicGate {
    /// The smallest supported input count.
    pub const MIN_INPUTS: u32 = 2;

    /// Creates a gate with `inputs` inputs of `width` bits each.
    pub fn new(kind: GateKind, inputs: u32, width: u32) -> Result<Self, BlockConfigError> {
        if inputs < Self::MIN_INPUTS {
            return Err(BlockConfigError::TooFewInputs {
                type_id: kind.type_id().to_string(),
                min: Self::MIN_INPUTS,
                got: inputs,
            });
        }
        if width == 0 {
            return Err(BlockConfigError::ZeroWidth {
                type_id: kind.type_id().to_string(),
            });
        }
        Ok(Self {
            kind,
            inputs,
            width,
        })
    }

    /// Returns the gate kind.
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// Returns the number of data inputs.
    pub fn inputs(&self) -> u32 {
        self.inputs
    }

    /// Returns the width of every port.
    pub fn width(&self) -> u32 {
        self.width
    }
}

impl BlockBehavior for LogicGate {
    fn type_id(&self) -> &str {
        self.kind.type_id()
    }

    fn layout(&self) -> BlockLayout {
        BlockLayout {
            inputs: (0..self.inputs).map(|_| PortSpec::anonymous(self.width)).collect(),
            outputs: vec![PortSpec::anonymous(self.width)],
            temporaries: Vec::new(),
        }
    }

    fn generate(&self, block: &Block) -> Result<Vec<ConcurrentStmt>, GenerateError> {
        let inputs = (0..self.inputs as usize)
            .map(|i| block.input_signal(i).map(|s| s.name))
            .collect::<Result<Vec<_>, _>>()?;
        let output = block.output_signal(0)?;

        let value = if self.width == 1 {
            self.kind
                .combine(inputs.iter().map(|name| Expr::signal(name.as_str())).collect())
        } else {
            Expr::Concat(
                (0..self.width)
                    .rev()
                    .map(|bit| {
                        self.kind.combine(
                            inputs
                                .iter()
                                .map(|name| Expr::bit(name.as_str(), bit))
                                .collect(),
                        )
                    })
                    .collect(),
            )
        };

        Ok(vec![ConcurrentStmt::assign(output.name, value)])
    }
}
