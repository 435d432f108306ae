//! Plastid - a converter from CellDesigner-family pathway documents to
//! synchronized model and layout graphs.
//!
//! The input is a fully-parsed [`document::Document`] produced by an
//! external deserializer. The converter resolves the document's layers of ID
//! indirection and produces a [`PathwayMap`]: the semantic model graph
//! (entities, templates, reactions, modifiers, boolean combinators), the
//! geometric layout graph (positioned glyphs and routed connectors), and
//! the annotation side table. Non-fatal conditions accumulate into a
//! diagnostics list next to the best-effort map.

pub mod annotation;
pub mod config;
pub mod detect;
pub mod document;
pub mod layout;
pub mod model;

mod convert;
mod error;
mod map;

pub use config::ConvertOptions;
pub use error::{ConvertError, StrictError};
pub use map::{Conversion, PathwayMap};

pub use plastid_core::{diagnostic, geometry, identifier};

use log::info;

/// Converter for parsed pathway documents.
///
/// # Examples
///
/// ```rust
/// use plastid::{MapConverter, ConvertOptions, document::Document};
///
/// let document = Document::default();
///
/// let converter = MapConverter::new(ConvertOptions::default());
/// let conversion = converter.convert(&document).expect("conversion failed");
///
/// // Best-effort callers take the map as-is.
/// assert!(conversion.map().model().is_empty());
///
/// // Strict callers reject any diagnostics.
/// let map = conversion.into_strict().expect("diagnostics reported");
/// assert!(map.layout().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MapConverter {
    options: ConvertOptions,
}

impl MapConverter {
    /// Create a converter with the given options.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Convert a parsed document into a pathway map.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] when the document is internally
    /// inconsistent: a construct references an ID the document never
    /// defines. No partial map is produced in that case. Conditions that
    /// only affect single elements (unregistered variants, degenerate
    /// connector geometry) do not fail the conversion; they are returned as
    /// diagnostics on the [`Conversion`].
    pub fn convert(&self, document: &document::Document) -> Result<Conversion, ConvertError> {
        info!("Building pathway map");
        convert::assemble::run(document, &self.options)
    }
}

/// Convert a document with default options.
///
/// # Errors
///
/// See [`MapConverter::convert`].
pub fn convert(document: &document::Document) -> Result<Conversion, ConvertError> {
    MapConverter::default().convert(document)
}
