//! Diagnostic codes: a severity letter and three digits.

use crate::severity::Severity;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identifies one kind of diagnostic, written `E101`, `W102`, ...
///
/// The letter fixes the severity, so a code is never reported at a
/// different level. Serialized as its written form.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct DiagnosticCode {
    severity: Severity,
    number: u16,
}

impl DiagnosticCode {
    /// An error code, `E<number>`.
    pub const fn error(number: u16) -> Self {
        Self {
            severity: Severity::Error,
            number,
        }
    }

    /// A warning code, `W<number>`.
    pub const fn warning(number: u16) -> Self {
        Self {
            severity: Severity::Warning,
            number,
        }
    }

    /// The severity implied by the prefix.
    pub fn severity(self) -> Severity {
        self.severity
    }

    /// The numeric part.
    pub fn number(self) -> u16 {
        self.number
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.severity.prefix(), self.number)
    }
}

/// A string that is not a diagnostic code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid diagnostic code `{0}`: expected E or W followed by three digits")]
pub struct ParseCodeError(String);

impl FromStr for DiagnosticCode {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseCodeError(s.to_string());
        let mut chars = s.chars();
        let severity = chars
            .next()
            .and_then(Severity::from_prefix)
            .ok_or_else(invalid)?;
        let digits = chars.as_str();
        if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number = digits.parse().map_err(|_| invalid())?;
        Ok(Self { severity, number })
    }
}

impl Serialize for DiagnosticCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DiagnosticCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_form_is_zero_padded() {
        assert_eq!(DiagnosticCode::error(101).to_string(), "E101");
        assert_eq!(DiagnosticCode::warning(7).to_string(), "W007");
    }

    #[test]
    fn parse_written_form() {
        let code: DiagnosticCode = "W102".parse().unwrap();
        assert_eq!(code, DiagnosticCode::warning(102));
        assert_eq!(code.severity(), Severity::Warning);
        assert_eq!(code.number(), 102);
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["", "E", "E10", "E1011", "X101", "e101", "E1a1"] {
            assert!(bad.parse::<DiagnosticCode>().is_err(), "{bad}");
        }
    }

    #[test]
    fn json_uses_written_form() {
        let json = serde_json::to_string(&DiagnosticCode::error(102)).unwrap();
        assert_eq!(json, "\"E102\"");
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DiagnosticCode::error(102));
        assert!(serde_json::from_str::<DiagnosticCode>("\"Q1\"").is_err());
    }
}
