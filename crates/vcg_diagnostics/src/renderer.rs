//! Terminal rendering of diagnostics.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Turns a diagnostic into printable text.
pub trait DiagnosticRenderer {
    /// The text for `diag`, ending in a newline.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// The compiler-style layout:
/// ```text
/// error[E101]: input `in1` of block `and0` has no driver
///   --> and0.in1
///    = note: ...
///    = help: ...
/// ```
pub struct TerminalRenderer {
    /// Color the severity label with ANSI escapes.
    pub color: bool,
}

impl TerminalRenderer {
    /// A renderer that colors when `color` is set.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let label = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return label;
        }
        let ansi = match diag.severity {
            Severity::Error => "\x1b[1;31m",
            Severity::Warning => "\x1b[1;33m",
        };
        format!("{ansi}{label}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}: {}\n", self.header(diag), diag.message);

        if let Some(subject) = &diag.subject {
            out.push_str(&format!("  --> {subject}\n"));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }

        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DiagnosticCode;

    #[test]
    fn render_error_with_subject() {
        let code = DiagnosticCode::error(101);
        let diag = Diagnostic::new(code, "input `in1` of block `and0` has no driver")
            .with_subject("and0.in1");

        let output = TerminalRenderer::new(false).render(&diag);

        assert!(output.starts_with("error[E101]: input `in1` of block `and0` has no driver\n"));
        assert!(output.contains("  --> and0.in1\n"));
    }

    #[test]
    fn render_warning_with_notes() {
        let code = DiagnosticCode::warning(101);
        let diag = Diagnostic::new(code, "output drives nothing")
            .with_note("the value is computed but never used")
            .with_help("connect the output or remove the block");

        let output = TerminalRenderer::new(false).render(&diag);

        assert!(output.contains("warning[W101]: output drives nothing"));
        assert!(output.contains("= note: the value is computed but never used"));
        assert!(output.contains("= help: connect the output or remove the block"));
        assert!(!output.contains("-->"));
    }

    #[test]
    fn render_with_color() {
        let code = DiagnosticCode::error(102);
        let diag = Diagnostic::new(code, "boom");
        let output = TerminalRenderer::new(true).render(&diag);
        assert!(output.starts_with("\x1b[1;31merror[E102]\x1b[0m: boom"));
    }
}
