//! Structured reports about defects in a circuit graph.
//!
//! A [`Diagnostic`] carries a severity-prefixed [`DiagnosticCode`] (`E101`,
//! `W102`), a message, the graph element it is about, and optional notes and
//! help. The emission pass collects them in a [`DiagnosticSink`]; front ends
//! print them with a [`DiagnosticRenderer`] or serialize them as JSON.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{DiagnosticCode, ParseCodeError};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
