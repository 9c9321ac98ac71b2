//! Circuit graph model for the vcg code generator.
//!
//! This crate defines the [`System`] graph container with its [`Block`]s,
//! [`Port`]s, and [`Connection`]s, the unique-name registries that keep every
//! qualified signal name distinct, the [`BlockBehavior`] capability that
//! concrete block types implement, and the structured concurrent-statement IR
//! ([`Expr`], [`ConcurrentStmt`]) that behaviors produce.

#![warn(missing_docs)]

pub mod arena;
pub mod behavior;
pub mod block;
pub mod connection;
pub mod error;
pub mod expr;
pub mod ids;
pub mod names;
pub mod port;
pub mod signal;
pub mod stmt;
pub mod system;

pub use arena::{Arena, ArenaId};
pub use behavior::{BlockBehavior, BlockLayout, GenerateError, PortSpec};
pub use block::{Block, BlockKind};
pub use connection::{Connection, PortRef, VisualHandle};
pub use error::GraphError;
pub use expr::{Expr, LogicOp};
pub use ids::{BlockId, ConnectionId};
pub use names::NameRegistry;
pub use port::{Port, PortDirection, PortLink};
pub use signal::{qualified_name, Signal, SignalClass, SignalEntry, Temporary, QUALIFIER};
pub use stmt::{CondBranch, ConcurrentStmt, SignalDecl};
pub use system::{System, DEFAULT_LIBRARY, SYSTEM_INPUT, SYSTEM_OUTPUT};
