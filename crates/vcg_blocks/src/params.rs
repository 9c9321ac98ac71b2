//! The parameter-collection contract.
//!
//! A block type publishes its construction parameters as an ordered list of
//! [`ParamSpec`]s. A caller (a dialog, a config file) supplies values either
//! positionally ([`collect`]) or by name ([`collect_named`]) and gets back a
//! validated [`ParamRecord`] or a [`ParamError`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use vcg_common::Logic;

/// The type of value a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// A non-negative integer (input count, width).
    Count,
    /// A boolean switch.
    Flag,
    /// A single logic symbol (`0`, `1`, `X`, `Z`).
    Symbol,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Count => write!(f, "count"),
            ParamKind::Flag => write!(f, "flag"),
            ParamKind::Symbol => write!(f, "symbol"),
        }
    }
}

/// A raw parameter value as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A boolean.
    Bool(bool),
    /// An integer.
    Integer(i64),
    /// A string.
    Text(String),
}

impl ParamValue {
    fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "boolean",
            ParamValue::Integer(_) => "integer",
            ParamValue::Text(_) => "string",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Integer(i) => write!(f, "{i}"),
            ParamValue::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

/// One construction parameter of a block type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    /// The parameter name, used for named collection.
    pub name: &'static str,
    /// The accepted value type.
    pub kind: ParamKind,
    /// The value used when none is supplied; `None` means required.
    pub default: Option<ParamValue>,
    /// A one-line description for listings.
    pub description: &'static str,
}

impl ParamSpec {
    /// A parameter that must be supplied.
    pub fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            default: None,
            description,
        }
    }

    /// A parameter with a default value.
    pub fn optional(
        name: &'static str,
        kind: ParamKind,
        default: ParamValue,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            default: Some(default),
            description,
        }
    }
}

/// Errors raised while collecting parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// More positional values than declared parameters.
    #[error("expected at most {expected} parameters, got {got}")]
    TooManyValues {
        /// The number of declared parameters.
        expected: usize,
        /// The number of supplied values.
        got: usize,
    },

    /// A required parameter was not supplied.
    #[error("missing parameter `{name}`")]
    Missing {
        /// The parameter name.
        name: String,
    },

    /// A named value matches no declared parameter.
    #[error("unknown parameter `{name}`")]
    Unknown {
        /// The supplied name.
        name: String,
    },

    /// A value of the wrong type.
    #[error("parameter `{name}` expects a {expected}, got a {found}")]
    WrongKind {
        /// The parameter name.
        name: String,
        /// The declared kind.
        expected: ParamKind,
        /// The supplied value's type.
        found: &'static str,
    },

    /// A count that does not fit an unsigned 32-bit integer.
    #[error("parameter `{name}` is out of range: {value}")]
    OutOfRange {
        /// The parameter name.
        name: String,
        /// The supplied value.
        value: i64,
    },

    /// A symbol that is not a logic value.
    #[error("parameter `{name}` is not a logic symbol: `{value}`")]
    InvalidSymbol {
        /// The parameter name.
        name: String,
        /// The supplied text.
        value: String,
    },
}

/// A validated, normalized set of parameter values in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParamRecord {
    values: Vec<(String, ParamValue)>,
}

impl ParamRecord {
    /// Returns the value of `name`, if declared.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Iterates over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns a count parameter.
    pub fn count(&self, name: &str) -> Result<u32, ParamError> {
        match self.require(name)? {
            ParamValue::Integer(i) => u32::try_from(*i).map_err(|_| ParamError::OutOfRange {
                name: name.to_string(),
                value: *i,
            }),
            other => Err(wrong_kind(name, ParamKind::Count, other)),
        }
    }

    /// Returns a flag parameter.
    pub fn flag(&self, name: &str) -> Result<bool, ParamError> {
        match self.require(name)? {
            ParamValue::Bool(b) => Ok(*b),
            other => Err(wrong_kind(name, ParamKind::Flag, other)),
        }
    }

    /// Returns a symbol parameter.
    pub fn symbol(&self, name: &str) -> Result<Logic, ParamError> {
        match self.require(name)? {
            ParamValue::Text(s) => s.parse().map_err(|_| ParamError::InvalidSymbol {
                name: name.to_string(),
                value: s.clone(),
            }),
            other => Err(wrong_kind(name, ParamKind::Symbol, other)),
        }
    }

    fn require(&self, name: &str) -> Result<&ParamValue, ParamError> {
        self.get(name).ok_or_else(|| ParamError::Missing {
            name: name.to_string(),
        })
    }
}

fn wrong_kind(name: &str, expected: ParamKind, found: &ParamValue) -> ParamError {
    ParamError::WrongKind {
        name: name.to_string(),
        expected,
        found: found.type_name(),
    }
}

/// Checks `value` against `spec` and returns its normalized form.
///
/// Symbols are stored upper-case; the integers 0 and 1 are accepted as
/// symbols.
fn normalize(spec: &ParamSpec, value: ParamValue) -> Result<ParamValue, ParamError> {
    let name = spec.name;
    match (spec.kind, value) {
        (ParamKind::Count, ParamValue::Integer(i)) => {
            if u32::try_from(i).is_ok() {
                Ok(ParamValue::Integer(i))
            } else {
                Err(ParamError::OutOfRange {
                    name: name.to_string(),
                    value: i,
                })
            }
        }
        (ParamKind::Flag, ParamValue::Bool(b)) => Ok(ParamValue::Bool(b)),
        (ParamKind::Symbol, ParamValue::Text(s)) => match s.parse::<Logic>() {
            Ok(logic) => Ok(ParamValue::Text(logic.to_string())),
            Err(_) => Err(ParamError::InvalidSymbol {
                name: name.to_string(),
                value: s,
            }),
        },
        (ParamKind::Symbol, ParamValue::Integer(i @ (0 | 1))) => {
            Ok(ParamValue::Text(i.to_string()))
        }
        (kind, other) => Err(wrong_kind(name, kind, &other)),
    }
}

fn resolve(spec: &ParamSpec, value: Option<ParamValue>) -> Result<(String, ParamValue), ParamError> {
    let value = match value.or_else(|| spec.default.clone()) {
        Some(value) => normalize(spec, value)?,
        None => {
            return Err(ParamError::Missing {
                name: spec.name.to_string(),
            })
        }
    };
    Ok((spec.name.to_string(), value))
}

/// Collects positional values against `specs`.
///
/// Values are matched to specs in order; trailing parameters that are not
/// supplied take their defaults.
pub fn collect(specs: &[ParamSpec], values: Vec<ParamValue>) -> Result<ParamRecord, ParamError> {
    if values.len() > specs.len() {
        return Err(ParamError::TooManyValues {
            expected: specs.len(),
            got: values.len(),
        });
    }
    let mut values = values.into_iter();
    let values = specs
        .iter()
        .map(|spec| resolve(spec, values.next()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ParamRecord { values })
}

/// Collects named values against `specs`.
///
/// Every name must match a declared parameter; parameters not named take
/// their defaults.
pub fn collect_named(
    specs: &[ParamSpec],
    named: &BTreeMap<String, ParamValue>,
) -> Result<ParamRecord, ParamError> {
    if let Some(unknown) = named
        .keys()
        .find(|key| !specs.iter().any(|spec| spec.name == key.as_str()))
    {
        return Err(ParamError::Unknown {
            name: unknown.clone(),
        });
    }
    let values = specs
        .iter()
        .map(|spec| resolve(spec, named.get(spec.name).cloned()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ParamRecord { values })
}
