//! Non-fatal condition reporting for the conversion pipeline.
//!
//! A conversion can finish usefully even when parts of the input are not
//! convertible. A [`Diagnostic`] records one such condition (an element
//! variant with no registered transformer, or degenerate connector geometry)
//! and the [`collector::DiagnosticCollector`] accumulates them so a phase
//! reports every condition instead of stopping at the first.

pub mod collector;

pub use collector::DiagnosticCollector;

use std::fmt;

use crate::identifier::Id;

/// The severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The element was skipped or a fallback was used; the map is best-effort.
    Warning,
    /// Reserved for conditions that invalidate the element entirely.
    Error,
}

impl Severity {
    /// Returns true for [`Severity::Error`]
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// The category of a reported condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// No transformer is registered for the element's discriminant key;
    /// the element was skipped.
    UnsupportedVariant,
    /// Connector reference points coincide; a default frame or the shape
    /// center was used instead.
    DegenerateGeometry,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnsupportedVariant => write!(f, "unsupported variant"),
            DiagnosticKind::DegenerateGeometry => write!(f, "degenerate geometry"),
        }
    }
}

/// A single reported condition with its kind, message, and the native
/// element it was observed on.
///
/// The element ID is the only source location this pipeline has: the input
/// is an already-parsed tree, so there are no text spans to point at.
///
/// # Example
///
/// ```
/// # use plastid_core::diagnostic::{Diagnostic, DiagnosticKind, Severity};
/// # use plastid_core::identifier::Id;
/// let diag = Diagnostic::warning(
///     DiagnosticKind::UnsupportedVariant,
///     "no transformer registered for key REACTION/FISSION",
/// )
/// .with_element(Id::new("re1"));
///
/// assert_eq!(diag.severity(), Severity::Warning);
/// assert_eq!(diag.element(), Some(Id::new("re1")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    kind: DiagnosticKind,
    message: String,
    element: Option<Id>,
}

impl Diagnostic {
    fn new(severity: Severity, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            element: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, kind, message)
    }

    /// Create an error diagnostic.
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, kind, message)
    }

    /// Attach the native element the condition was observed on.
    pub fn with_element(mut self, element: Id) -> Self {
        self.element = Some(element);
        self
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the condition category.
    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the native element ID the condition was observed on, if any.
    pub fn element(&self) -> Option<Id> {
        self.element
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.element {
            Some(element) => {
                write!(f, "{}: {} ({}): {}", self.severity, self.kind, element, self.message)
            }
            None => write!(f, "{}: {}: {}", self.severity, self.kind, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_construction() {
        let diag = Diagnostic::warning(DiagnosticKind::DegenerateGeometry, "points coincide");
        assert_eq!(diag.severity(), Severity::Warning);
        assert_eq!(diag.kind(), DiagnosticKind::DegenerateGeometry);
        assert_eq!(diag.message(), "points coincide");
        assert_eq!(diag.element(), None);
    }

    #[test]
    fn test_with_element() {
        let diag = Diagnostic::warning(DiagnosticKind::UnsupportedVariant, "skipped")
            .with_element(Id::new("re9"));
        assert_eq!(diag.element(), Some(Id::new("re9")));
    }

    #[test]
    fn test_severity_is_error() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
    }

    #[test]
    fn test_display_includes_element() {
        let diag = Diagnostic::warning(DiagnosticKind::UnsupportedVariant, "skipped")
            .with_element(Id::new("x1"));
        let rendered = diag.to_string();
        assert!(rendered.contains("unsupported variant"));
        assert!(rendered.contains("x1"));
    }
}
