//! Collector for accumulating diagnostics during a conversion.
//!
//! The [`DiagnosticCollector`] lets the conversion phases report every
//! non-fatal condition they meet instead of stopping at the first one. The
//! accumulated list is returned alongside the best-effort map; strict
//! callers treat a non-empty list as failure.

use log::warn;

use crate::diagnostic::Diagnostic;

/// A collector for accumulating diagnostics during a conversion.
///
/// # Example
///
/// ```
/// # use plastid_core::diagnostic::{Diagnostic, DiagnosticCollector, DiagnosticKind};
/// # use plastid_core::identifier::Id;
/// let mut collector = DiagnosticCollector::new();
///
/// collector.emit(
///     Diagnostic::warning(DiagnosticKind::UnsupportedVariant, "no transformer for key")
///         .with_element(Id::new("re3")),
/// );
///
/// assert_eq!(collector.len(), 1);
/// let diagnostics = collector.into_diagnostics();
/// assert_eq!(diagnostics.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    ///
    /// The diagnostic is logged as it arrives and, if it is an error, the
    /// collector is marked as having errors.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        warn!(kind:% = diagnostic.kind(); "{diagnostic}");
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns true when no diagnostics have been emitted.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The number of diagnostics emitted so far.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns true if any emitted diagnostic was an error.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Borrow the accumulated diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Finish collection and return the accumulated diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
