//! Concurrent statements and declarations produced for the emitted program.
//!
//! Block behaviors return [`ConcurrentStmt`]s; the emitter builds
//! [`SignalDecl`]s from each block's signals. One shared printer renders both.

use crate::expr::Expr;
use serde::{Deserialize, Serialize};

/// A signal declaration in the architecture's declarative region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalDecl {
    /// The qualified signal name.
    pub name: String,
    /// The width in bits; 1 declares a scalar.
    pub width: u32,
}

/// One `value when condition else` arm of a conditional assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CondBranch {
    /// The value selected when the condition holds.
    pub value: Expr,
    /// The condition tested, in priority order.
    pub condition: Expr,
}

/// A statement in the architecture body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcurrentStmt {
    /// A continuous assignment (`target <= value;`).
    Assign {
        /// The qualified target signal name.
        target: String,
        /// The driven value.
        value: Expr,
    },
    /// A priority-ordered conditional assignment
    /// (`target <= v0 when c0 else v1 when c1 else otherwise;`).
    Conditional {
        /// The qualified target signal name.
        target: String,
        /// Arms tested in order; the first match wins.
        branches: Vec<CondBranch>,
        /// The value when no arm matches.
        otherwise: Expr,
    },
}

impl ConcurrentStmt {
    /// Creates a continuous assignment.
    pub fn assign(target: impl Into<String>, value: Expr) -> Self {
        ConcurrentStmt::Assign {
            target: target.into(),
            value,
        }
    }

    /// Returns the signal this statement drives.
    pub fn target(&self) -> &str {
        match self {
            ConcurrentStmt::Assign { target, .. } | ConcurrentStmt::Conditional { target, .. } => {
                target
            }
        }
    }
}
