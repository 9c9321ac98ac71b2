//! How serious a diagnostic is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic. Errors sort above warnings.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Suspicious but harmless; the program is still produced.
    Warning,
    /// The program cannot be produced.
    Error,
}

impl Severity {
    /// The letter that starts codes of this severity.
    pub fn prefix(self) -> char {
        match self {
            Severity::Warning => 'W',
            Severity::Error => 'E',
        }
    }

    /// Maps a code prefix back to its severity.
    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'W' => Some(Severity::Warning),
            'E' => Some(Severity::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_outrank_warnings() {
        assert!(Severity::Error > Severity::Warning);
    }

    #[test]
    fn prefix_roundtrip() {
        for s in [Severity::Warning, Severity::Error] {
            assert_eq!(Severity::from_prefix(s.prefix()), Some(s));
        }
        assert_eq!(Severity::from_prefix('T'), None);
    }

    #[test]
    fn lowercase_everywhere() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
    }
}
