//! Collects diagnostics during one emission pass.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::cell::RefCell;

/// Shared collector for the diagnostics of an emission pass.
///
/// The pass is single-threaded and its checks only hold `&DiagnosticSink`,
/// so storage sits behind a `RefCell`. Each diagnostic is also traced at
/// debug level; printing is up to the caller.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `diag`.
    pub fn emit(&self, diag: Diagnostic) {
        tracing::debug!(
            severity = %diag.severity,
            code = %diag.code,
            subject = ?diag.subject,
            "{}",
            diag.message
        );
        self.diagnostics.borrow_mut().push(diag);
    }

    /// Whether any held diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(Diagnostic::is_error)
    }

    /// Number of held errors.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of held warnings.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Removes and returns everything held, in emission order.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    /// Copies everything held, in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DiagnosticCode;

    fn missing_driver() -> Diagnostic {
        Diagnostic::new(DiagnosticCode::error(101), "no driver")
    }

    fn unused() -> Diagnostic {
        Diagnostic::new(DiagnosticCode::warning(101), "drives nothing")
    }

    #[test]
    fn starts_empty() {
        let sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        assert_eq!((sink.error_count(), sink.warning_count()), (0, 0));
    }

    #[test]
    fn counts_by_severity() {
        let sink = DiagnosticSink::new();
        sink.emit(unused());
        assert!(!sink.has_errors());
        sink.emit(missing_driver());
        sink.emit(missing_driver());
        assert!(sink.has_errors());
        assert_eq!((sink.error_count(), sink.warning_count()), (2, 1));
    }

    #[test]
    fn take_all_drains_in_order() {
        let sink = DiagnosticSink::new();
        sink.emit(unused());
        sink.emit(missing_driver());
        assert_eq!(sink.diagnostics().len(), 2);
        let all = sink.take_all();
        assert_eq!(all[0].severity, Severity::Warning);
        assert_eq!(all[1].severity, Severity::Error);
        assert!(sink.take_all().is_empty());
        assert_eq!(sink.error_count(), 0);
    }
}
