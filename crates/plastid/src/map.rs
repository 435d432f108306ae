//! The immutable conversion output.

use plastid_core::diagnostic::Diagnostic;

use crate::{annotation::AnnotationTable, error::StrictError, layout::LayoutGraph, model::ModelGraph};

/// A converted pathway map: the model graph, the layout graph, and the
/// annotation side table.
///
/// The map is a frozen value. Model-graph families iterate lexicographically
/// by ID; layout elements keep construction order under the root canvas.
#[derive(Debug, Clone)]
pub struct PathwayMap {
    model: ModelGraph,
    layout: LayoutGraph,
    annotations: AnnotationTable,
}

impl PathwayMap {
    pub(crate) fn new(model: ModelGraph, layout: LayoutGraph, annotations: AnnotationTable) -> Self {
        Self {
            model,
            layout,
            annotations,
        }
    }

    /// The semantic model graph.
    pub fn model(&self) -> &ModelGraph {
        &self.model
    }

    /// The geometric layout graph.
    pub fn layout(&self) -> &LayoutGraph {
        &self.layout
    }

    /// The annotation side table.
    pub fn annotations(&self) -> &AnnotationTable {
        &self.annotations
    }
}

/// The result of a conversion: a best-effort map plus every non-fatal
/// condition met while building it.
#[derive(Debug)]
pub struct Conversion {
    map: PathwayMap,
    diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    pub(crate) fn new(map: PathwayMap, diagnostics: Vec<Diagnostic>) -> Self {
        Self { map, diagnostics }
    }

    /// The converted map.
    pub fn map(&self) -> &PathwayMap {
        &self.map
    }

    /// The non-fatal conditions met during conversion.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the conversion, accepting the best-effort map regardless of
    /// diagnostics.
    pub fn into_map(self) -> PathwayMap {
        self.map
    }

    /// Consumes the conversion, treating any diagnostic as failure.
    ///
    /// # Errors
    ///
    /// Returns [`StrictError`] carrying the diagnostics when the list is
    /// non-empty.
    pub fn into_strict(self) -> Result<PathwayMap, StrictError> {
        if self.diagnostics.is_empty() {
            Ok(self.map)
        } else {
            Err(StrictError::new(self.diagnostics))
        }
    }
}
