//! The `std_logic` symbols a generated circuit writes as constants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A constant `std_logic` value.
///
/// Generated programs only ever need driven levels, the unknown value (for
/// completeness) and high impedance, so the other IEEE 1164 symbols are not
/// modelled.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Logic {
    /// Driven low.
    #[serde(rename = "0")]
    Zero,
    /// Driven high.
    #[serde(rename = "1")]
    One,
    /// Unknown.
    #[serde(rename = "X")]
    X,
    /// Not driven.
    #[serde(rename = "Z")]
    Z,
}

impl Logic {
    /// The symbol as written inside a VHDL literal.
    pub fn symbol(self) -> char {
        match self {
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::X => 'X',
            Logic::Z => 'Z',
        }
    }

    /// Reads a symbol, ignoring case.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            '0' => Some(Logic::Zero),
            '1' => Some(Logic::One),
            'X' => Some(Logic::X),
            'Z' => Some(Logic::Z),
            _ => None,
        }
    }

    /// `0` or `1`.
    pub fn is_level(self) -> bool {
        matches!(self, Logic::Zero | Logic::One)
    }

    /// This symbol on every bit of a `width`-bit signal: `'Z'` for one bit,
    /// `"ZZZZ"` for four.
    pub fn literal(self, width: u32) -> String {
        if width <= 1 {
            return format!("'{}'", self.symbol());
        }
        let mut out = String::with_capacity(width as usize + 2);
        out.push('"');
        out.extend(std::iter::repeat(self.symbol()).take(width as usize));
        out.push('"');
        out
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Text that is not a single logic symbol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a logic symbol (expected 0, 1, X or Z)")]
pub struct ParseLogicError(pub String);

/// Accepts `Z`, `z` and the quoted `'Z'` form.
impl FromStr for Logic {
    type Err = ParseLogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let inner = text
            .strip_prefix('\'')
            .and_then(|t| t.strip_suffix('\''))
            .unwrap_or(text);
        let mut chars = inner.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Logic::from_symbol(c),
            _ => None,
        }
        .ok_or_else(|| ParseLogicError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Logic::*;
    use super::*;

    #[test]
    fn symbols_roundtrip() {
        for value in [Zero, One, X, Z] {
            assert_eq!(Logic::from_symbol(value.symbol()), Some(value));
            assert_eq!(value.to_string(), value.symbol().to_string());
        }
        assert_eq!(Logic::from_symbol('z'), Some(Z));
        assert_eq!(Logic::from_symbol('2'), None);
        assert_eq!(Logic::from_symbol('U'), None);
    }

    #[test]
    fn only_zero_and_one_are_levels() {
        assert!(Zero.is_level() && One.is_level());
        assert!(!X.is_level() && !Z.is_level());
    }

    #[test]
    fn literals_by_width() {
        assert_eq!(Zero.literal(1), "'0'");
        assert_eq!(Z.literal(0), "'Z'");
        assert_eq!(Z.literal(4), "\"ZZZZ\"");
        assert_eq!(One.literal(2), "\"11\"");
    }

    #[test]
    fn parse_forms() {
        assert_eq!("0".parse::<Logic>(), Ok(Zero));
        assert_eq!(" z ".parse::<Logic>(), Ok(Z));
        assert_eq!("'1'".parse::<Logic>(), Ok(One));
        assert!("01".parse::<Logic>().is_err());
        assert!("''".parse::<Logic>().is_err());
        assert_eq!(
            "q".parse::<Logic>().unwrap_err().to_string(),
            "`q` is not a logic symbol (expected 0, 1, X or Z)"
        );
    }

    #[test]
    fn serialized_as_symbol() {
        assert_eq!(serde_json::to_string(&Z).unwrap(), "\"Z\"");
        assert_eq!(serde_json::from_str::<Logic>("\"0\"").unwrap(), Zero);
    }
}
