//! Compartment transformer variants.
//!
//! Compartments are first-class shared elements: one compartment is
//! referenced by its aliases, by species, and by other compartments through
//! "outside" nesting, so construction is an idempotent build-or-fetch.

use log::debug;

use plastid_core::{geometry::ShapeClass, identifier::Id};

use crate::{
    convert::{MapBuilder, context::Owner, index::NativeRef},
    document::CompartmentClass,
    error::ConvertError,
    layout::{Glyph, LayoutElement},
    model::{Compartment, ModelElement},
};

/// Transformer for a compartment alias: builds (or fetches) the semantic
/// compartment and registers the positioned glyph.
pub(crate) fn build_alias(
    builder: &mut MapBuilder<'_>,
    target: NativeRef,
    _owner: Option<Owner>,
) -> Result<Option<Id>, ConvertError> {
    let NativeRef::CompartmentAlias(i) = target else {
        builder.emit_unsupported(target, "compartment transformer on a non-compartment element");
        return Ok(None);
    };
    let doc = builder.doc;
    let alias = &doc.compartment_aliases[i];
    let alias_id = Id::new(&alias.id);

    let compartment_id = builder.ensure_compartment(Id::new(&alias.compartment), alias_id)?;

    if !builder.ctx.layout.contains(alias_id) {
        let class = match alias.class {
            CompartmentClass::Square => ShapeClass::Rectangle,
            CompartmentClass::Oval => ShapeClass::Ellipse,
        };
        let bounds = builder.glyph_bounds(&alias.bounds);
        let label = builder
            .ctx
            .model
            .compartment(compartment_id)
            .and_then(|compartment| compartment.name().map(str::to_owned));
        builder
            .ctx
            .layout
            .insert(LayoutElement::Glyph(Glyph::new(alias_id, class, bounds, label)), true);
    }

    Ok(Some(compartment_id))
}

impl MapBuilder<'_> {
    /// Builds the compartment registered under `id`, or fetches it when an
    /// earlier reference already built it.
    ///
    /// The compartment is registered before its "outside" parent is ensured,
    /// so nesting chains (and even malformed nesting cycles) terminate.
    pub(crate) fn ensure_compartment(
        &mut self,
        id: Id,
        referrer: Id,
    ) -> Result<Id, ConvertError> {
        if self.ctx.model.compartment(id).is_some() {
            return Ok(id);
        }
        let Some(NativeRef::Compartment(i)) = self.index.get(id) else {
            return Err(ConvertError::MissingReference {
                referrer,
                target: id,
                role: "a compartment",
            });
        };
        let doc = self.doc;
        let spec = &doc.compartments[i];
        let outside = spec.outside.as_deref().map(Id::new);

        debug!(compartment:% = id; "Building compartment");
        self.ctx.model.insert(ModelElement::Compartment(Compartment::new(
            id,
            spec.name.clone(),
            outside,
        )));
        self.extract_annotations(id, &spec.metadata);

        if let Some(outside) = outside {
            self.ensure_compartment(outside, id)?;
        }
        Ok(id)
    }
}
