//! The graph container: blocks, connections, boundary blocks, and names.

use std::collections::{BTreeMap, HashSet};

use crate::arena::Arena;
use crate::behavior::{BlockBehavior, BlockLayout, PortSpec};
use crate::block::{Block, BlockKind};
use crate::connection::{Connection, PortRef, VisualHandle};
use crate::error::GraphError;
use crate::ids::{BlockId, ConnectionId};
use crate::names::NameRegistry;
use crate::port::{Port, PortDirection, PortLink};
use crate::signal::QUALIFIER;

/// Name of the boundary block that carries the declared system inputs.
pub const SYSTEM_INPUT: &str = "SystemInput";

/// Name of the boundary block that carries the declared system outputs.
pub const SYSTEM_OUTPUT: &str = "SystemOutput";

/// The library included when none is configured.
pub const DEFAULT_LIBRARY: &str = "ieee.std_logic_1164.all";

/// One authored circuit.
///
/// Owns every block and connection in arenas, the two boundary blocks, the
/// block and connection name registries, and the included-library list.
/// Functional blocks are kept in insertion order, which is also emission
/// order.
#[derive(Debug)]
pub struct System {
    name: String,
    blocks: Arena<BlockId, Block>,
    order: Vec<BlockId>,
    connections: Arena<ConnectionId, Connection>,
    /// Live connections and their editor handles.
    handles: BTreeMap<ConnectionId, Option<VisualHandle>>,
    block_names: NameRegistry,
    connection_names: NameRegistry,
    system_input: BlockId,
    system_output: BlockId,
    libraries: Vec<String>,
}

impl System {
    /// Creates a system (entity) with the given external inputs and outputs,
    /// each a `(name, width)` pair.
    ///
    /// Boundary port names must be unique across inputs and outputs,
    /// ignoring letter case, and must not contain the qualifier `__`. Every
    /// width must be positive.
    pub fn new(
        name: &str,
        inputs: &[(&str, u32)],
        outputs: &[(&str, u32)],
    ) -> Result<Self, GraphError> {
        if name.trim().is_empty() {
            return Err(GraphError::EmptySystemName);
        }

        let mut seen = HashSet::new();
        for (port, width) in inputs.iter().chain(outputs) {
            if *width == 0 {
                return Err(GraphError::ZeroWidth {
                    owner: name.to_string(),
                    name: port.to_string(),
                });
            }
            if port.contains(QUALIFIER) {
                return Err(GraphError::QualifiedPortName(port.to_string()));
            }
            if !seen.insert(port.to_ascii_lowercase()) {
                return Err(GraphError::DuplicateSignal {
                    owner: name.to_string(),
                    name: port.to_string(),
                });
            }
        }

        let mut blocks = Arena::new();
        let mut block_names = NameRegistry::new();

        let input_layout = BlockLayout {
            outputs: inputs.iter().map(|(n, w)| PortSpec::named(*n, *w)).collect(),
            ..BlockLayout::default()
        };
        let output_layout = BlockLayout {
            inputs: outputs.iter().map(|(n, w)| PortSpec::named(*n, *w)).collect(),
            ..BlockLayout::default()
        };

        let input_name = block_names.claim(SYSTEM_INPUT);
        let system_input = blocks.next_id();
        blocks.alloc(Block::from_layout(
            system_input,
            &input_name,
            input_layout,
            BlockKind::SystemInput,
        )?);

        let output_name = block_names.claim(SYSTEM_OUTPUT);
        let system_output = blocks.next_id();
        blocks.alloc(Block::from_layout(
            system_output,
            &output_name,
            output_layout,
            BlockKind::SystemOutput,
        )?);

        tracing::debug!(
            system = name,
            inputs = inputs.len(),
            outputs = outputs.len(),
            "created system"
        );

        Ok(Self {
            name: name.to_string(),
            blocks,
            order: Vec::new(),
            connections: Arena::new(),
            handles: BTreeMap::new(),
            block_names,
            connection_names: NameRegistry::new(),
            system_input,
            system_output,
            libraries: vec![DEFAULT_LIBRARY.to_string()],
        })
    }

    /// Returns the system (entity) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ID of the input boundary block.
    pub fn system_input(&self) -> BlockId {
        self.system_input
    }

    /// Returns the ID of the output boundary block.
    pub fn system_output(&self) -> BlockId {
        self.system_output
    }

    /// Returns the declared system inputs (the input boundary's output ports).
    pub fn inputs(&self) -> &[Port] {
        self.blocks[self.system_input].outputs()
    }

    /// Returns the declared system outputs (the output boundary's input ports).
    pub fn outputs(&self) -> &[Port] {
        self.blocks[self.system_output].inputs()
    }

    /// Adds a functional block built from `behavior`'s layout.
    ///
    /// Without a name the block is called `block<N>` for the first free `N`;
    /// an explicit name that is taken is suffixed (`foo_2`, `foo_3`, ...).
    pub fn add_block(
        &mut self,
        behavior: Box<dyn BlockBehavior>,
        name: Option<&str>,
    ) -> Result<BlockId, GraphError> {
        let name = match name {
            Some(requested) if requested.trim().is_empty() => {
                return Err(GraphError::EmptyBlockName)
            }
            Some(requested) => self.block_names.claim(requested),
            None => self.block_names.fresh("block"),
        };

        let id = self.blocks.next_id();
        let type_id = behavior.type_id().to_string();
        let layout = behavior.layout();
        let block = match Block::from_layout(id, &name, layout, BlockKind::Functional(behavior)) {
            Ok(block) => block,
            Err(err) => {
                self.block_names.release(&name);
                return Err(err);
            }
        };

        self.blocks.alloc(block);
        self.order.push(id);
        tracing::debug!(block = %name, type_id = %type_id, "added block");
        Ok(id)
    }

    /// Renames a block, releasing its old name. Returns the name actually
    /// assigned, which is suffixed if `name` is taken.
    pub fn rename_block(&mut self, id: BlockId, name: &str) -> Result<String, GraphError> {
        if name.trim().is_empty() {
            return Err(GraphError::EmptyBlockName);
        }
        let old = self.block(id).ok_or(GraphError::UnknownBlock(id))?.name.clone();
        self.block_names.release(&old);
        let assigned = self.block_names.claim(name);
        self.blocks[id].name = assigned.clone();
        tracing::debug!(from = %old, to = %assigned, "renamed block");
        Ok(assigned)
    }

    /// Connects output `from_index` of `from` to input `to_index` of `to`.
    ///
    /// Both ports must exist and have the same width, and the input must not
    /// already have a driver; use [`reconnect`](Self::reconnect) to replace
    /// one.
    pub fn connect(
        &mut self,
        from: BlockId,
        from_index: usize,
        to: BlockId,
        to_index: usize,
        handle: Option<VisualHandle>,
    ) -> Result<ConnectionId, GraphError> {
        let (source, target) = self.check_endpoints(from, from_index, to, to_index)?;
        if let Some(existing) = self.blocks[to].inputs[to_index].driver() {
            return Err(GraphError::AlreadyDriven {
                to: self.blocks[to].port_label(PortDirection::Input, to_index),
                existing: self.connection_source_label(existing),
            });
        }
        Ok(self.attach(source, target, handle))
    }

    /// Connects like [`connect`](Self::connect), but replaces an existing
    /// driver of the input instead of rejecting it.
    ///
    /// Returns the new connection and the replaced one, if any. The replaced
    /// connection is removed from its source's fan-out and from the
    /// connection table.
    pub fn reconnect(
        &mut self,
        from: BlockId,
        from_index: usize,
        to: BlockId,
        to_index: usize,
        handle: Option<VisualHandle>,
    ) -> Result<(ConnectionId, Option<ConnectionId>), GraphError> {
        let (source, target) = self.check_endpoints(from, from_index, to, to_index)?;
        let replaced = self.blocks[to].inputs[to_index].driver();
        if let Some(old) = replaced {
            self.detach(old);
        }
        Ok((self.attach(source, target, handle), replaced))
    }

    fn check_endpoints(
        &self,
        from: BlockId,
        from_index: usize,
        to: BlockId,
        to_index: usize,
    ) -> Result<(PortRef, PortRef), GraphError> {
        let source_block = self.block(from).ok_or(GraphError::UnknownBlock(from))?;
        let target_block = self.block(to).ok_or(GraphError::UnknownBlock(to))?;
        let source = source_block
            .output(from_index)
            .ok_or_else(|| GraphError::NoSuchPort {
                block: source_block.name.clone(),
                direction: PortDirection::Output,
                index: from_index,
            })?;
        let target = target_block
            .input(to_index)
            .ok_or_else(|| GraphError::NoSuchPort {
                block: target_block.name.clone(),
                direction: PortDirection::Input,
                index: to_index,
            })?;
        if source.width != target.width {
            return Err(GraphError::WidthMismatch {
                from: source_block.port_label(PortDirection::Output, from_index),
                from_width: source.width,
                to: target_block.port_label(PortDirection::Input, to_index),
                to_width: target.width,
            });
        }
        Ok((PortRef::new(from, from_index), PortRef::new(to, to_index)))
    }

    fn attach(&mut self, from: PortRef, to: PortRef, handle: Option<VisualHandle>) -> ConnectionId {
        let id = self.connections.next_id();
        let name = self.connection_names.fresh("conn");

        if let PortLink::Fanout(fanout) = &mut self.blocks[from.block].outputs[from.index].link {
            fanout.push(id);
        }
        self.blocks[to.block].inputs[to.index].link = PortLink::Driver(Some(id));

        tracing::debug!(
            connection = %name,
            from = %self.blocks[from.block].port_label(PortDirection::Output, from.index),
            to = %self.blocks[to.block].port_label(PortDirection::Input, to.index),
            "connected"
        );

        self.connections.alloc(Connection { id, name, from, to });
        self.handles.insert(id, handle);
        id
    }

    fn detach(&mut self, id: ConnectionId) {
        let Some(conn) = self.connections.get(id).cloned() else {
            return;
        };
        if let PortLink::Fanout(fanout) =
            &mut self.blocks[conn.from.block].outputs[conn.from.index].link
        {
            fanout.retain(|c| *c != id);
        }
        self.blocks[conn.to.block].inputs[conn.to.index].link = PortLink::Driver(None);
        self.handles.remove(&id);
        tracing::debug!(connection = %conn.name, "detached");
    }

    fn connection_source_label(&self, id: ConnectionId) -> String {
        match self.connections.get(id) {
            Some(conn) => self.blocks[conn.from.block].port_label(PortDirection::Output, conn.from.index),
            None => id.to_string(),
        }
    }

    /// Returns a live connection by ID.
    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        if self.handles.contains_key(&id) {
            self.connections.get(id)
        } else {
            None
        }
    }

    /// Iterates over live connections in creation order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.handles
            .keys()
            .filter_map(|id| self.connections.get(*id))
    }

    /// Returns the number of live connections.
    pub fn connection_count(&self) -> usize {
        self.handles.len()
    }

    /// Returns the editor handle stored with a live connection.
    pub fn connection_handle(&self, id: ConnectionId) -> Option<VisualHandle> {
        self.handles.get(&id).copied().flatten()
    }

    /// Returns the connection driving input `index` of `block`.
    pub fn driver_of(&self, block: BlockId, index: usize) -> Option<&Connection> {
        let driver = self.block(block)?.input(index)?.driver()?;
        self.connection(driver)
    }

    /// Returns the signal name a connection's source is referenced by.
    ///
    /// A port of the input boundary is referenced by its raw external name;
    /// any other output by its qualified `<Block>__<port>` name.
    pub fn source_signal(&self, conn: &Connection) -> Option<String> {
        let block = self.block(conn.from.block)?;
        let port = block.output(conn.from.index)?;
        if conn.from.block == self.system_input {
            Some(port.name.clone())
        } else {
            Some(block.signal_name(&port.name))
        }
    }

    /// Finds a block (boundary blocks included) by name.
    pub fn find_block(&self, name: &str) -> Option<BlockId> {
        self.blocks
            .iter()
            .find(|(_, block)| block.name == name)
            .map(|(id, _)| id)
    }

    /// Finds a declared system port by name.
    ///
    /// Returns [`PortDirection::Input`] and the index among the system
    /// inputs, or [`PortDirection::Output`] and the index among the system
    /// outputs.
    pub fn find_boundary_port(&self, name: &str) -> Option<(PortDirection, usize)> {
        if let Some(index) = self.inputs().iter().position(|p| p.name == name) {
            return Some((PortDirection::Input, index));
        }
        self.outputs()
            .iter()
            .position(|p| p.name == name)
            .map(|index| (PortDirection::Output, index))
    }

    /// Returns any block (boundary blocks included) by ID.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id)
    }

    /// Iterates over functional blocks in insertion order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.order.iter().map(|id| &self.blocks[*id])
    }

    /// Returns the number of functional blocks.
    pub fn block_count(&self) -> usize {
        self.order.len()
    }

    /// Returns the included libraries (`ieee.std_logic_1164.all`, ...).
    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }

    /// Replaces the included-library list.
    pub fn set_libraries(&mut self, libraries: Vec<String>) {
        self.libraries = libraries;
    }

    /// Appends a library unless it is already included.
    pub fn add_library(&mut self, library: impl Into<String>) {
        let library = library.into();
        if !self.libraries.contains(&library) {
            self.libraries.push(library);
        }
    }
}
