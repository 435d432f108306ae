//! The conversion pipeline.
//!
//! One [`MapBuilder`] instance drives a conversion: it runs the ID index
//! pass once, then walks the document's top-level elements in a fixed phase
//! order, reducing each to a discriminant key and handing it to the matching
//! transformer variant. Transformers recurse into owned children (complex
//! members, modifier entries, gates) and register every built pair in the
//! cross-reference context.

pub(crate) mod assemble;
pub(crate) mod compartment;
pub(crate) mod context;
pub(crate) mod dispatch;
pub(crate) mod gate;
pub(crate) mod index;
pub(crate) mod influence;
pub(crate) mod modifier;
pub(crate) mod reaction;
pub(crate) mod species;
pub(crate) mod template;

use log::trace;

use plastid_core::{
    diagnostic::{Diagnostic, DiagnosticKind},
    geometry::{Anchor, Bounds, Frame, Point, Shape, Size},
    identifier::Id,
};

use crate::{
    config::ConvertOptions,
    document::{Document, MetadataEntry, RawBounds, RawPoint},
    error::ConvertError,
};

use self::{
    context::{Context, Owner},
    dispatch::{ElementKey, Registry},
    index::{IdIndex, NativeRef},
};

/// The conversion driver, holding the document, the read-only index, the
/// dispatch registry, and the single-writer context.
pub(crate) struct MapBuilder<'doc> {
    pub(crate) doc: &'doc Document,
    pub(crate) options: &'doc ConvertOptions,
    pub(crate) index: IdIndex,
    registry: Registry,
    pub(crate) ctx: Context,
}

impl<'doc> MapBuilder<'doc> {
    /// Runs the index pass and prepares the builder.
    pub(crate) fn new(
        doc: &'doc Document,
        options: &'doc ConvertOptions,
    ) -> Result<Self, ConvertError> {
        Ok(Self {
            doc,
            options,
            index: IdIndex::build(doc)?,
            registry: Registry::standard(),
            ctx: Context::new(),
        })
    }

    /// Reduces a native element to its key and invokes the registered
    /// transformer. Unregistered keys skip the element with a diagnostic.
    pub(crate) fn dispatch(
        &mut self,
        target: NativeRef,
        owner: Option<Owner>,
    ) -> Result<Option<Id>, ConvertError> {
        let Some(key) = ElementKey::derive(self.doc, &self.index, target)? else {
            self.emit_unsupported(target, "no discriminant key for element");
            return Ok(None);
        };
        let Some(handler) = self.registry.get(key) else {
            self.emit_unsupported(target, &format!("no transformer registered for {key:?}"));
            return Ok(None);
        };
        trace!(element:? = target, key:?; "Dispatching element");
        handler(self, target, owner)
    }

    pub(crate) fn emit_unsupported(&mut self, target: NativeRef, message: &str) {
        let mut diagnostic =
            Diagnostic::warning(DiagnosticKind::UnsupportedVariant, message.to_owned());
        if let Some(id) = self.native_id(target) {
            diagnostic = diagnostic.with_element(id);
        }
        self.ctx.diagnostics.emit(diagnostic);
    }

    /// The document ID of a native element, when it has one of its own.
    fn native_id(&self, target: NativeRef) -> Option<Id> {
        let doc = self.doc;
        match target {
            NativeRef::Compartment(i) => Some(Id::new(&doc.compartments[i].id)),
            NativeRef::CompartmentAlias(i) => Some(Id::new(&doc.compartment_aliases[i].id)),
            NativeRef::Template(i) => Some(Id::new(&doc.templates[i].id)),
            NativeRef::Residue { template, residue } => {
                let template = &doc.templates[template];
                Some(Id::new(&template.id).composite(&template.residues[residue].id))
            }
            NativeRef::Species(i) => Some(Id::new(&doc.species[i].id)),
            NativeRef::IncludedSpecies(i) => Some(Id::new(&doc.included_species[i].id)),
            NativeRef::SpeciesAlias(i) => Some(Id::new(&doc.species_aliases[i].id)),
            NativeRef::ComplexAlias(i) => Some(Id::new(&doc.complex_aliases[i].id)),
            NativeRef::Reaction(i)
            | NativeRef::Modifier { reaction: i, .. }
            | NativeRef::GateMember { reaction: i, .. } => Some(Id::new(&doc.reactions[i].id)),
        }
    }

    // ========================================================================
    // Shared resolution helpers
    // ========================================================================

    /// Resolves `target` to an already-built species in the context.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MissingReference`] when the context holds no
    /// species under `target`: the pass ordering guarantees every species is
    /// built before reactions, so a miss means the document is inconsistent.
    pub(crate) fn resolve_built_species(
        &self,
        target: Id,
        referrer: Id,
        role: &'static str,
    ) -> Result<Id, ConvertError> {
        if self.ctx.model.species_by_id(target).is_some() {
            Ok(target)
        } else {
            Err(ConvertError::MissingReference {
                referrer,
                target,
                role,
            })
        }
    }

    /// The routing shape of an already-built glyph.
    pub(crate) fn glyph_shape(&self, alias: Id, referrer: Id) -> Result<Shape, ConvertError> {
        self.ctx
            .layout
            .glyph(alias)
            .map(|glyph| glyph.shape())
            .ok_or(ConvertError::MissingReference {
                referrer,
                target: alias,
                role: "a participant occurrence",
            })
    }

    /// Parses an explicit anchor name; unknown names fall back to border
    /// routing with a diagnostic. The source marks disabled anchors with
    /// `INACTIVE`, which is simply no anchor.
    pub(crate) fn parse_anchor(&mut self, raw: Option<&str>, element: Id) -> Option<Anchor> {
        let raw = raw?;
        if raw == "INACTIVE" {
            return None;
        }
        match raw.parse() {
            Ok(anchor) => Some(anchor),
            Err(_) => {
                self.ctx.diagnostics.emit(
                    Diagnostic::warning(
                        DiagnosticKind::UnsupportedVariant,
                        format!("unknown anchor name `{raw}`"),
                    )
                    .with_element(element),
                );
                None
            }
        }
    }

    /// The point a connector attaches to on `shape`: the explicit anchor
    /// when one was given, the boundary crossing toward `toward` otherwise.
    pub(crate) fn attachment(
        &mut self,
        shape: Shape,
        anchor: Option<Anchor>,
        toward: Point,
        element: Id,
    ) -> Point {
        if let Some(anchor) = anchor {
            return shape.anchor_point(anchor);
        }
        match shape.border_point(toward) {
            Ok(point) => point,
            Err(err) => {
                self.ctx.diagnostics.emit(
                    Diagnostic::warning(DiagnosticKind::DegenerateGeometry, err.to_string())
                        .with_element(element),
                );
                shape.center()
            }
        }
    }

    /// Assembles a connector polyline as `[start] + intermediates + [end]`,
    /// mapping the frame-local intermediate points through the frame spanned
    /// by the two endpoints. Coincident endpoints fall back to the identity
    /// frame with a diagnostic.
    pub(crate) fn route(
        &mut self,
        element: Id,
        start: Point,
        end: Point,
        edit_points: &[RawPoint],
    ) -> Vec<Point> {
        let frame = match Frame::between(start, end) {
            Ok(frame) => frame,
            Err(err) => {
                self.ctx.diagnostics.emit(
                    Diagnostic::warning(DiagnosticKind::DegenerateGeometry, err.to_string())
                        .with_element(element),
                );
                Frame::identity()
            }
        };
        let mut points = Vec::with_capacity(edit_points.len() + 2);
        points.push(start);
        points.extend(
            edit_points
                .iter()
                .map(|point| frame.to_global(Point::new(point.x, point.y))),
        );
        points.push(end);
        points
    }

    /// Turns a raw alias bounds box into glyph bounds, substituting the
    /// fallback extent for collapsed boxes.
    pub(crate) fn glyph_bounds(&self, raw: &RawBounds) -> Bounds {
        let fallback = self.options.fallback_glyph_size;
        let width = if raw.width > 0.0 { raw.width } else { fallback };
        let height = if raw.height > 0.0 { raw.height } else { fallback };
        Bounds::from_top_left(Point::new(raw.x, raw.y), Size::new(width, height))
    }

    /// Merges an element's metadata block into the annotation table.
    pub(crate) fn extract_annotations(&mut self, element: Id, metadata: &[MetadataEntry]) {
        self.ctx.annotations.extract(element, metadata);
    }

    // ========================================================================
    // Owner appends
    // ========================================================================

    /// Appends a built component species to its owning complex. A complex
    /// drawn by several occurrences sees each component once.
    pub(crate) fn append_component(&mut self, complex: Id, component: Id) {
        if let Some(crate::model::ModelElement::Species(species)) = self.ctx.model.get_mut(complex)
        {
            if !species.components().contains(&component) {
                species.push_component(component);
            }
        }
    }

    /// Appends a modifier to its owning reaction.
    pub(crate) fn append_modifier(&mut self, reaction: Id, modifier: crate::model::Modifier) {
        if let Some(crate::model::ModelElement::Reaction(element)) =
            self.ctx.model.get_mut(reaction)
        {
            element.push_modifier(modifier);
        }
    }

    /// Appends a gate reference to its owning reaction.
    pub(crate) fn append_gate(&mut self, reaction: Id, gate: Id) {
        if let Some(crate::model::ModelElement::Reaction(element)) =
            self.ctx.model.get_mut(reaction)
        {
            element.push_gate(gate);
        }
    }
}
