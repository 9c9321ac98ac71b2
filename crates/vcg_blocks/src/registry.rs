//! The block-factory contract and the registry of block types.

use std::collections::BTreeMap;

use vcg_common::Logic;
use vcg_ir::BlockBehavior;

use crate::error::BlockConfigError;
use crate::gate::{GateKind, LogicGate};
use crate::mux::{Multiplexer, SelectorWidth, MUX_BLOCK_NAME, MUX_TYPE_ID};
use crate::params::{collect, collect_named, ParamKind, ParamRecord, ParamSpec, ParamValue};

/// Builds block behaviors of one type from validated parameters.
pub trait BlockFactory: Send + Sync {
    /// Returns the identifier this factory is registered under.
    fn type_id(&self) -> &str;

    /// Returns a one-line description for listings.
    fn description(&self) -> &str;

    /// Returns the base name for blocks created without one. Repeats are
    /// suffixed by the system (`AND_GATE`, `AND_GATE_2`, ...).
    fn default_name(&self) -> Option<&str> {
        None
    }

    /// Returns the construction parameters, in positional order.
    fn params(&self) -> Vec<ParamSpec>;

    /// Builds a behavior from a record collected against [`params`](Self::params).
    fn build(&self, params: &ParamRecord) -> Result<Box<dyn BlockBehavior>, BlockConfigError>;
}

/// Settings shared by the built-in factories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockOptions {
    /// The selector-width rule for multiplexers.
    pub selector_width: SelectorWidth,
}

/// Maps block type identifiers to their factories.
#[derive(Default)]
pub struct BlockRegistry {
    factories: BTreeMap<String, Box<dyn BlockFactory>>,
}

impl BlockRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in block type.
    pub fn with_builtins(options: BlockOptions) -> Self {
        let mut registry = Self::new();
        for kind in GateKind::ALL {
            registry.register(Box::new(GateFactory { kind }));
        }
        registry.register(Box::new(MuxFactory {
            selector_width: options.selector_width,
        }));
        registry
    }

    /// Registers a factory, replacing any factory with the same identifier.
    pub fn register(&mut self, factory: Box<dyn BlockFactory>) {
        tracing::debug!(type_id = factory.type_id(), "registered block type");
        self.factories.insert(factory.type_id().to_string(), factory);
    }

    /// Returns the factory for `type_id`.
    pub fn get(&self, type_id: &str) -> Option<&dyn BlockFactory> {
        self.factories.get(type_id).map(|f| f.as_ref())
    }

    /// Iterates over factories sorted by identifier.
    pub fn iter(&self) -> impl Iterator<Item = &dyn BlockFactory> {
        self.factories.values().map(|f| f.as_ref())
    }

    /// Returns the number of registered types.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Builds a behavior from positional parameter values.
    pub fn create(
        &self,
        type_id: &str,
        values: Vec<ParamValue>,
    ) -> Result<Box<dyn BlockBehavior>, BlockConfigError> {
        let factory = self.lookup(type_id)?;
        let record = collect(&factory.params(), values)?;
        factory.build(&record)
    }

    /// Builds a behavior from named parameter values.
    pub fn create_named(
        &self,
        type_id: &str,
        values: &BTreeMap<String, ParamValue>,
    ) -> Result<Box<dyn BlockBehavior>, BlockConfigError> {
        let factory = self.lookup(type_id)?;
        let record = collect_named(&factory.params(), values)?;
        factory.build(&record)
    }

    fn lookup(&self, type_id: &str) -> Result<&dyn BlockFactory, BlockConfigError> {
        self.get(type_id)
            .ok_or_else(|| BlockConfigError::UnknownType(type_id.to_string()))
    }
}

struct GateFactory {
    kind: GateKind,
}

impl BlockFactory for GateFactory {
    fn type_id(&self) -> &str {
        self.kind.type_id()
    }

    fn description(&self) -> &str {
        match self.kind {
            GateKind::And => "n-input AND gate",
            GateKind::Or => "n-input OR gate",
            GateKind::Xor => "n-input XOR gate",
            GateKind::Nand => "n-input NAND gate",
            GateKind::Nor => "n-input NOR gate",
            GateKind::Xnor => "n-input XNOR gate",
        }
    }

    fn default_name(&self) -> Option<&str> {
        Some(self.kind.block_name())
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::optional(
                "inputs",
                ParamKind::Count,
                ParamValue::Integer(2),
                "number of inputs",
            ),
            ParamSpec::optional(
                "width",
                ParamKind::Count,
                ParamValue::Integer(1),
                "width of every port in bits",
            ),
        ]
    }

    fn build(&self, params: &ParamRecord) -> Result<Box<dyn BlockBehavior>, BlockConfigError> {
        let gate = LogicGate::new(self.kind, params.count("inputs")?, params.count("width")?)?;
        Ok(Box::new(gate))
    }
}

struct MuxFactory {
    selector_width: SelectorWidth,
}

impl BlockFactory for MuxFactory {
    fn type_id(&self) -> &str {
        MUX_TYPE_ID
    }

    fn description(&self) -> &str {
        "multiplexer with optional enable"
    }

    fn default_name(&self) -> Option<&str> {
        Some(MUX_BLOCK_NAME)
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::required("inputs", ParamKind::Count, "number of data inputs"),
            ParamSpec::required("width", ParamKind::Count, "width of each data input in bits"),
            ParamSpec::optional(
                "default",
                ParamKind::Symbol,
                ParamValue::Text("Z".to_string()),
                "output when no select value matches (0, 1 or Z)",
            ),
            ParamSpec::optional(
                "enable",
                ParamKind::Flag,
                ParamValue::Bool(true),
                "include an EN input",
            ),
            ParamSpec::optional(
                "active",
                ParamKind::Symbol,
                ParamValue::Text("0".to_string()),
                "level at which EN passes the data (0 or 1)",
            ),
        ]
    }

    fn build(&self, params: &ParamRecord) -> Result<Box<dyn BlockBehavior>, BlockConfigError> {
        let default: Logic = params.symbol("default")?;
        let enable = if params.flag("enable")? {
            Some(params.symbol("active")?)
        } else {
            None
        };
        let mux = Multiplexer::new(
            params.count("inputs")?,
            params.count("width")?,
            default,
            enable,
            self.selector_width,
        )?;
        Ok(Box::new(mux))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamError;

    #[test]
    fn builtins_registered() {
        let registry = BlockRegistry::with_builtins(BlockOptions::default());
        assert_eq!(registry.len(), 7);
        let ids: Vec<_> = registry.iter().map(|f| f.type_id().to_string()).collect();
        assert_eq!(
            ids,
            vec!["and", "multiplexer", "nand", "nor", "or", "xnor", "xor"]
        );
    }

    #[test]
    fn create_gate_positional() {
        let registry = BlockRegistry::with_builtins(BlockOptions::default());
        let behavior = registry
            .create("and", vec![ParamValue::Integer(3), ParamValue::Integer(4)])
            .unwrap();
        assert_eq!(behavior.type_id(), "and");
        let layout = behavior.layout();
        assert_eq!(layout.inputs.len(), 3);
        assert_eq!(layout.outputs[0].width, 4);
    }

    #[test]
    fn create_mux_positional_dialog_order() {
        let registry = BlockRegistry::with_builtins(BlockOptions::default());
        let behavior = registry
            .create(
                "multiplexer",
                vec![
                    ParamValue::Integer(2),
                    ParamValue::Integer(1),
                    ParamValue::Text("0".to_string()),
                    ParamValue::Bool(false),
                ],
            )
            .unwrap();
        let layout = behavior.layout();
        assert_eq!(layout.inputs.len(), 3);
        assert!(layout.temporaries.is_empty());
    }

    #[test]
    fn create_mux_named_uses_selector_option() {
        let registry = BlockRegistry::with_builtins(BlockOptions {
            selector_width: SelectorWidth::BitLength,
        });
        let mut values = BTreeMap::new();
        values.insert("inputs".to_string(), ParamValue::Integer(4));
        values.insert("width".to_string(), ParamValue::Integer(1));
        let behavior = registry.create_named("multiplexer", &values).unwrap();
        let layout = behavior.layout();
        assert_eq!(layout.inputs[4].name.as_deref(), Some("SELECT"));
        assert_eq!(layout.inputs[4].width, 3);
        assert_eq!(layout.inputs[5].name.as_deref(), Some("EN"));
    }

    #[test]
    fn builtins_name_unnamed_blocks_by_type() {
        let registry = BlockRegistry::with_builtins(BlockOptions::default());
        let name = |id: &str| registry.get(id).and_then(|f| f.default_name());
        assert_eq!(name("and"), Some("AND_GATE"));
        assert_eq!(name("xnor"), Some("XNOR_GATE"));
        assert_eq!(name("multiplexer"), Some("Multiplexer"));
    }

    #[test]
    fn unknown_type() {
        let registry = BlockRegistry::with_builtins(BlockOptions::default());
        assert_eq!(
            registry.create("flipflop", Vec::new()).unwrap_err(),
            BlockConfigError::UnknownType("flipflop".to_string())
        );
    }

    #[test]
    fn parameter_errors_surface() {
        let registry = BlockRegistry::with_builtins(BlockOptions::default());
        assert_eq!(
            registry.create("multiplexer", vec![ParamValue::Integer(2)]).unwrap_err(),
            BlockConfigError::Param(ParamError::Missing {
                name: "width".to_string()
            })
        );
        assert!(matches!(
            registry.create("or", vec![ParamValue::Integer(1)]),
            Err(BlockConfigError::TooFewInputs { .. })
        ));
    }
}
