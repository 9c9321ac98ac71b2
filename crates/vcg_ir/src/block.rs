//! Blocks: named units with ordered ports, temporaries, and a behavior.

use std::collections::HashSet;

use crate::behavior::{BlockBehavior, BlockLayout, GenerateError};
use crate::error::GraphError;
use crate::ids::BlockId;
use crate::port::{Port, PortDirection};
use crate::signal::{qualified_name, Signal, SignalClass, SignalEntry, Temporary};
use crate::stmt::ConcurrentStmt;

/// What a block is: one of the two boundary blocks or a functional block.
#[derive(Debug)]
pub enum BlockKind {
    /// The external input boundary: no inputs, one output per system input.
    SystemInput,
    /// The external output boundary: one input per system output, no outputs.
    SystemOutput,
    /// A block with a behavior that generates statements.
    Functional(Box<dyn BlockBehavior>),
}

/// A named unit in a [`System`](crate::system::System).
///
/// Ports and temporaries are fixed at construction. The name is changed only
/// through [`System::rename_block`](crate::system::System::rename_block) so
/// that the system's name registry stays in sync.
#[derive(Debug)]
pub struct Block {
    pub(crate) id: BlockId,
    pub(crate) name: String,
    pub(crate) inputs: Vec<Port>,
    pub(crate) outputs: Vec<Port>,
    pub(crate) temporaries: Vec<Temporary>,
    pub(crate) kind: BlockKind,
}

impl Block {
    /// Builds a block from a layout, naming unnamed ports `in<i>`/`out<i>`
    /// and unnamed temporaries `tmp<i>`.
    ///
    /// Rejects zero widths and duplicate local names; `owner` is the name
    /// used in those errors.
    pub(crate) fn from_layout(
        id: BlockId,
        owner: &str,
        layout: BlockLayout,
        kind: BlockKind,
    ) -> Result<Self, GraphError> {
        let inputs: Vec<Port> = layout
            .inputs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Port::input(spec.name.unwrap_or_else(|| format!("in{i}")), spec.width))
            .collect();
        let outputs: Vec<Port> = layout
            .outputs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| {
                Port::output(spec.name.unwrap_or_else(|| format!("out{i}")), spec.width)
            })
            .collect();
        let temporaries: Vec<Temporary> = layout
            .temporaries
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Temporary {
                name: spec.name.unwrap_or_else(|| format!("tmp{i}")),
                width: spec.width,
            })
            .collect();

        let block = Self {
            id,
            name: owner.to_string(),
            inputs,
            outputs,
            temporaries,
            kind,
        };
        block.validate_signals(owner)?;
        Ok(block)
    }

    fn validate_signals(&self, owner: &str) -> Result<(), GraphError> {
        let mut seen = HashSet::new();
        for entry in self.signals() {
            if entry.width == 0 {
                return Err(GraphError::ZeroWidth {
                    owner: owner.to_string(),
                    name: entry.name,
                });
            }
            if !seen.insert(entry.name.clone()) {
                return Err(GraphError::DuplicateSignal {
                    owner: owner.to_string(),
                    name: entry.name,
                });
            }
        }
        Ok(())
    }

    /// Returns this block's ID.
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Returns this block's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the input ports in order.
    pub fn inputs(&self) -> &[Port] {
        &self.inputs
    }

    /// Returns the output ports in order.
    pub fn outputs(&self) -> &[Port] {
        &self.outputs
    }

    /// Returns the internal temporaries in order.
    pub fn temporaries(&self) -> &[Temporary] {
        &self.temporaries
    }

    /// Returns the input port at `index`.
    pub fn input(&self, index: usize) -> Option<&Port> {
        self.inputs.get(index)
    }

    /// Returns the output port at `index`.
    pub fn output(&self, index: usize) -> Option<&Port> {
        self.outputs.get(index)
    }

    /// Returns the port at `index` in the list for `direction`.
    pub fn port(&self, direction: PortDirection, index: usize) -> Option<&Port> {
        match direction {
            PortDirection::Input => self.input(index),
            PortDirection::Output => self.output(index),
        }
    }

    /// Returns what kind of block this is.
    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    /// Returns `true` for the system input and output boundary blocks.
    pub fn is_boundary(&self) -> bool {
        !matches!(self.kind, BlockKind::Functional(_))
    }

    /// Returns the behavior of a functional block.
    pub fn behavior(&self) -> Option<&dyn BlockBehavior> {
        match &self.kind {
            BlockKind::Functional(behavior) => Some(behavior.as_ref()),
            BlockKind::SystemInput | BlockKind::SystemOutput => None,
        }
    }

    /// Returns the qualified name `<BlockName>__<local>`.
    pub fn signal_name(&self, local: &str) -> String {
        qualified_name(&self.name, local)
    }

    /// Returns `block.port`, the form used in messages.
    pub fn port_label(&self, direction: PortDirection, index: usize) -> String {
        match self.port(direction, index) {
            Some(port) => format!("{}.{}", self.name, port.name),
            None => format!("{}.{direction}{index}", self.name),
        }
    }

    /// Resolves the qualified signal backing input `index`.
    pub fn input_signal(&self, index: usize) -> Result<Signal, GenerateError> {
        self.port_signal(PortDirection::Input, index)
    }

    /// Resolves the qualified signal backing output `index`.
    pub fn output_signal(&self, index: usize) -> Result<Signal, GenerateError> {
        self.port_signal(PortDirection::Output, index)
    }

    /// Resolves the qualified signal of temporary `index`.
    pub fn temporary_signal(&self, index: usize) -> Result<Signal, GenerateError> {
        self.temporaries
            .get(index)
            .map(|tmp| Signal {
                name: self.signal_name(&tmp.name),
                width: tmp.width,
            })
            .ok_or_else(|| GenerateError::MissingTemporary {
                block: self.name.clone(),
                index,
            })
    }

    fn port_signal(&self, direction: PortDirection, index: usize) -> Result<Signal, GenerateError> {
        self.port(direction, index)
            .map(|port| Signal {
                name: self.signal_name(&port.name),
                width: port.width,
            })
            .ok_or_else(|| GenerateError::MissingPort {
                block: self.name.clone(),
                direction,
                index,
            })
    }

    /// Returns every signal this block owns: inputs, then outputs, then
    /// temporaries, each tagged with its class and width.
    pub fn signals(&self) -> Vec<SignalEntry> {
        let ports = self
            .inputs
            .iter()
            .map(|p| (p, SignalClass::Input))
            .chain(self.outputs.iter().map(|p| (p, SignalClass::Output)))
            .map(|(port, class)| SignalEntry {
                name: port.name.clone(),
                width: port.width,
                class,
            });
        let temporaries = self.temporaries.iter().map(|tmp| SignalEntry {
            name: tmp.name.clone(),
            width: tmp.width,
            class: SignalClass::Temporary,
        });
        ports.chain(temporaries).collect()
    }

    /// Finds a port by local name, searching inputs before outputs.
    pub fn find_port(&self, name: &str) -> Option<(PortDirection, usize)> {
        if let Some(index) = self.inputs.iter().position(|p| p.name == name) {
            return Some((PortDirection::Input, index));
        }
        self.outputs
            .iter()
            .position(|p| p.name == name)
            .map(|index| (PortDirection::Output, index))
    }

    /// Produces this block's behavioral statements.
    ///
    /// Boundary blocks have no behavior and return
    /// [`GenerateError::NotImplemented`].
    pub fn generate(&self) -> Result<Vec<ConcurrentStmt>, GenerateError> {
        match &self.kind {
            BlockKind::Functional(behavior) => behavior.generate(self),
            BlockKind::SystemInput | BlockKind::SystemOutput => {
                Err(GenerateError::NotImplemented {
                    block: self.name.clone(),
                })
            }
        }
    }
}
