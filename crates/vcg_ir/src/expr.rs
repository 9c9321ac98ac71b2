//! Expression trees for concurrent signal assignments.
//!
//! [`Expr`] covers exactly what block generators need: signal references,
//! single-bit selects, constants, n-ary logical operators, negation,
//! concatenation, and equality tests. The emitter's printer decides where
//! parentheses are required, so generators never build text by hand.

use serde::{Deserialize, Serialize};
use vcg_common::Logic;

/// An associative logical operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicOp {
    /// Bitwise AND (`and`).
    And,
    /// Bitwise OR (`or`).
    Or,
    /// Bitwise XOR (`xor`).
    Xor,
}

impl LogicOp {
    /// Returns the VHDL keyword for this operator.
    pub fn keyword(self) -> &'static str {
        match self {
            LogicOp::And => "and",
            LogicOp::Or => "or",
            LogicOp::Xor => "xor",
        }
    }
}

/// An expression on the right-hand side of a concurrent assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// A whole signal, by qualified name.
    Signal(String),
    /// One bit of a vector signal.
    Bit {
        /// The qualified signal name.
        signal: String,
        /// The bit index (MSB is `width - 1`).
        index: u32,
    },
    /// A constant made of one symbol repeated `width` times.
    Fill {
        /// The repeated symbol.
        symbol: Logic,
        /// The constant width.
        width: u32,
    },
    /// An unsigned binary constant zero-padded to `width` bits.
    Binary {
        /// The encoded value.
        value: u32,
        /// The constant width.
        width: u32,
    },
    /// The operator applied left to right across all operands.
    Logic {
        /// The operator.
        op: LogicOp,
        /// At least one operand.
        operands: Vec<Expr>,
    },
    /// Logical negation.
    Not(Box<Expr>),
    /// Concatenation, most significant part first.
    Concat(Vec<Expr>),
    /// Equality test, used in conditions.
    Eq(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// A whole-signal reference.
    pub fn signal(name: impl Into<String>) -> Self {
        Expr::Signal(name.into())
    }

    /// A single-bit select.
    pub fn bit(signal: impl Into<String>, index: u32) -> Self {
        Expr::Bit {
            signal: signal.into(),
            index,
        }
    }

    /// An equality condition.
    pub fn eq(lhs: Expr, rhs: Expr) -> Self {
        Expr::Eq(Box::new(lhs), Box::new(rhs))
    }

    /// Negates `self`.
    pub fn negate(self) -> Self {
        Expr::Not(Box::new(self))
    }

    /// Returns `true` for expressions that print as a single token.
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            Expr::Signal(_) | Expr::Bit { .. } | Expr::Fill { .. } | Expr::Binary { .. }
        )
    }
}
