//! Error types for Plastid conversions.
//!
//! Only internally inconsistent documents abort a conversion; everything
//! else is reported through the diagnostics list returned alongside the map
//! (see [`crate::Conversion`]).

use thiserror::Error;

use plastid_core::{diagnostic::Diagnostic, identifier::Id};

/// A fatal conversion error.
///
/// The document is internally inconsistent: a construct names an ID the
/// document never defines. No partial map is produced.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A required cross-reference points at an ID absent from the document.
    #[error("{referrer} references `{target}` as {role}, which the document does not define")]
    MissingReference {
        /// The element holding the dangling reference
        referrer: Id,
        /// The ID that could not be resolved
        target: Id,
        /// What the reference was supposed to resolve to
        role: &'static str,
    },
}

/// Error returned by [`crate::Conversion::into_strict`] when a best-effort
/// map carries diagnostics.
#[derive(Debug, Error)]
#[error("conversion finished with {} diagnostic(s)", diagnostics.len())]
pub struct StrictError {
    diagnostics: Vec<Diagnostic>,
}

impl StrictError {
    pub(crate) fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// The diagnostics that made the conversion non-strict.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
