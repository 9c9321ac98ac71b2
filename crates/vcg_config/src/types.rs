//! Configuration types deserialized from `vcg.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

/// The top-level circuit description parsed from `vcg.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Project metadata; the name is also the entity name.
    pub project: ProjectMeta,
    /// Code generation settings.
    #[serde(default)]
    pub codegen: CodegenConfig,
    /// External inputs, in port order.
    #[serde(default)]
    pub inputs: Vec<PortDef>,
    /// External outputs, in port order.
    #[serde(default)]
    pub outputs: Vec<PortDef>,
    /// Blocks to instantiate, in emission order.
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
    /// Wiring between system ports and block ports.
    #[serde(default)]
    pub connections: Vec<ConnectionDef>,
}

/// Core project metadata.
#[derive(Debug, Deserialize)]
pub struct ProjectMeta {
    /// The project (and entity) name.
    pub name: String,
    /// The project version string.
    #[serde(default = "default_version")]
    pub version: String,
    /// A brief description of the project.
    #[serde(default)]
    pub description: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Settings for the emitted program.
#[derive(Debug, Deserialize)]
pub struct CodegenConfig {
    /// Libraries to `USE`, e.g. `ieee.std_logic_1164.all`.
    ///
    /// Accepts a single string or a list of strings.
    #[serde(
        default = "default_libraries",
        deserialize_with = "deserialize_string_or_vec"
    )]
    pub libraries: Vec<String>,
    /// How multiplexer selector widths are derived.
    #[serde(default)]
    pub selector_width: SelectorRule,
    /// Output file, relative to the project directory. Defaults to
    /// `build/<name>.vhd`.
    #[serde(default)]
    pub output: Option<String>,
    /// Whether to emit the signature header.
    #[serde(default = "default_true")]
    pub header: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            libraries: default_libraries(),
            selector_width: SelectorRule::default(),
            output: None,
            header: true,
        }
    }
}

fn default_libraries() -> Vec<String> {
    vec!["ieee.std_logic_1164.all".to_string()]
}

fn default_true() -> bool {
    true
}

/// Deserializes a field that can be either a single string or a list of strings.
///
/// Allows `libraries = "ieee.std_logic_1164.all"` as well as a list.
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Rule for deriving a multiplexer's selector width from its input count.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SelectorRule {
    /// Bits needed to encode the largest input index.
    #[default]
    Minimal,
    /// Bit length of the input count.
    BitLength,
}

/// An external port of the entity.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PortDef {
    /// The port name.
    pub name: String,
    /// The width in bits.
    #[serde(default = "default_width")]
    pub width: u32,
}

fn default_width() -> u32 {
    1
}

/// A block to instantiate.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockDef {
    /// The block name; unnamed blocks are named after their type
    /// (`AND_GATE`, `AND_GATE_2`, ...).
    #[serde(default)]
    pub name: Option<String>,
    /// The registered block type (e.g. `"and"`, `"multiplexer"`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Construction parameters by name.
    #[serde(default)]
    pub params: BTreeMap<String, toml::Value>,
}

/// A directed connection between two endpoints.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ConnectionDef {
    /// The driving end: a system input or `block.port` output.
    pub from: Endpoint,
    /// The driven end: a system output or `block.port` input.
    pub to: Endpoint,
}

/// One end of a connection.
///
/// Written as a bare port name for a system port, or `block.port` for a
/// block port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// The block name, or `None` for a system port.
    pub block: Option<String>,
    /// The port name.
    pub port: String,
}

impl Endpoint {
    /// Parses `port` or `block.port`. Returns `None` for empty parts.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        match text.split_once('.') {
            Some((block, port)) if !block.is_empty() && !port.is_empty() && !port.contains('.') => {
                Some(Self {
                    block: Some(block.to_string()),
                    port: port.to_string(),
                })
            }
            Some(_) => None,
            None if text.is_empty() => None,
            None => Some(Self {
                block: None,
                port: text.to_string(),
            }),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.block {
            Some(block) => write!(f, "{block}.{}", self.port),
            None => write!(f, "{}", self.port),
        }
    }
}

impl<'de> Deserialize<'de> for Endpoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EndpointVisitor;

        impl<'de> Visitor<'de> for EndpointVisitor {
            type Value = Endpoint;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a port name or `block.port`")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Endpoint::parse(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(EndpointVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_forms() {
        assert_eq!(
            Endpoint::parse("a"),
            Some(Endpoint {
                block: None,
                port: "a".to_string()
            })
        );
        let ep = Endpoint::parse("mux.SELECT").unwrap();
        assert_eq!(ep.block.as_deref(), Some("mux"));
        assert_eq!(ep.port, "SELECT");
        assert_eq!(ep.to_string(), "mux.SELECT");
    }

    #[test]
    fn endpoint_rejects_malformed() {
        assert_eq!(Endpoint::parse(""), None);
        assert_eq!(Endpoint::parse(".in0"), None);
        assert_eq!(Endpoint::parse("g."), None);
        assert_eq!(Endpoint::parse("a.b.c"), None);
    }

    #[test]
    fn selector_rule_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            rule: SelectorRule,
        }
        let w: Wrapper = toml::from_str("rule = \"bit-length\"").unwrap();
        assert_eq!(w.rule, SelectorRule::BitLength);
    }

    #[test]
    fn codegen_defaults() {
        let c = CodegenConfig::default();
        assert_eq!(c.libraries, vec!["ieee.std_logic_1164.all"]);
        assert_eq!(c.selector_width, SelectorRule::Minimal);
        assert!(c.header);
        assert!(c.output.is_none());
    }
}
