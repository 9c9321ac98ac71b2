//! Diagnostic codes raised during emission.

use vcg_diagnostics::{Diagnostic, DiagnosticCode};

/// A block input or system output has no driver.
pub const MISSING_DRIVER: DiagnosticCode = DiagnosticCode::error(101);

/// A block's generator failed.
pub const GENERATE_FAILED: DiagnosticCode = DiagnosticCode::error(102);

/// A block output drives nothing.
pub const UNUSED_OUTPUT: DiagnosticCode = DiagnosticCode::warning(101);

/// A system input is never read.
pub const UNUSED_INPUT: DiagnosticCode = DiagnosticCode::warning(102);

/// Reports an undriven block input, given as `block.port`.
pub fn undriven_input(port: &str) -> Diagnostic {
    Diagnostic::new(MISSING_DRIVER, format!("block input `{port}` has no driver"))
        .with_subject(port)
        .with_help(format!("connect an output to `{port}`"))
}

/// Reports an undriven system output.
pub fn undriven_output(name: &str) -> Diagnostic {
    Diagnostic::new(MISSING_DRIVER, format!("system output `{name}` has no driver"))
        .with_subject(name)
        .with_help(format!("connect a block output or system input to `{name}`"))
}

/// Reports a generator failure for `block`.
pub fn generate_failed(block: &str, reason: &dyn std::error::Error) -> Diagnostic {
    Diagnostic::new(GENERATE_FAILED, format!("cannot generate block `{block}`"))
        .with_subject(block)
        .with_note(reason.to_string())
}

/// Reports a block output with an empty fan-out, given as `block.port`.
pub fn unused_output(port: &str) -> Diagnostic {
    Diagnostic::new(UNUSED_OUTPUT, format!("output `{port}` drives nothing"))
        .with_subject(port)
}

/// Reports a system input that no block reads.
pub fn unused_input(name: &str) -> Diagnostic {
    Diagnostic::new(UNUSED_INPUT, format!("system input `{name}` is never read"))
        .with_subject(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcg_diagnostics::Severity;

    #[test]
    fn codes_render() {
        assert_eq!(MISSING_DRIVER.to_string(), "E101");
        assert_eq!(GENERATE_FAILED.to_string(), "E102");
        assert_eq!(UNUSED_OUTPUT.to_string(), "W101");
        assert_eq!(UNUSED_INPUT.to_string(), "W102");
    }

    #[test]
    fn undriven_input_diagnostic() {
        let diag = undriven_input("mux.SELECT");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.subject.as_deref(), Some("mux.SELECT"));
        assert_eq!(diag.message, "block input `mux.SELECT` has no driver");
        assert_eq!(diag.help, vec!["connect an output to `mux.SELECT`".to_string()]);
    }

    #[test]
    fn warnings_are_warnings() {
        assert_eq!(unused_output("g.out0").severity, Severity::Warning);
        assert_eq!(unused_input("a").code, UNUSED_INPUT);
    }
}
