//! Species transformer variants.
//!
//! One shared build-species routine serves top-level species, complexes,
//! and complex components; the variants differ in how their occurrence is
//! nested and in whether they recurse into members.

use log::{debug, trace};

use plastid_core::{
    diagnostic::{Diagnostic, DiagnosticKind},
    geometry::ShapeClass,
    identifier::Id,
};

use crate::{
    convert::{MapBuilder, context::Owner, index::NativeRef},
    document::{Activity, IdentitySpec, MetadataEntry, ResidueState},
    error::ConvertError,
    layout::{Glyph, LayoutElement},
    model::{ModelElement, Modification, Species, SpeciesKind, StructuralState},
};

/// Transformer for a species occurrence (top-level or complex component).
pub(crate) fn build_alias(
    builder: &mut MapBuilder<'_>,
    target: NativeRef,
    owner: Option<Owner>,
) -> Result<Option<Id>, ConvertError> {
    let NativeRef::SpeciesAlias(i) = target else {
        builder.emit_unsupported(target, "species transformer on a non-species occurrence");
        return Ok(None);
    };
    let doc = builder.doc;
    let alias = &doc.species_aliases[i];
    let alias_id = Id::new(&alias.id);

    let species_id = builder.ensure_species(Id::new(&alias.species), alias_id, alias.activity)?;

    if !builder.ctx.layout.contains(alias_id) {
        let kind = builder
            .ctx
            .model
            .species_by_id(species_id)
            .map(Species::kind);
        let label = builder
            .ctx
            .model
            .species_by_id(species_id)
            .and_then(|species| species.name().map(str::to_owned));
        let class = match kind {
            Some(SpeciesKind::Ion) | Some(SpeciesKind::Degraded) => ShapeClass::Ellipse,
            _ => ShapeClass::Rectangle,
        };
        let bounds = builder.glyph_bounds(&alias.bounds);
        builder.ctx.layout.insert(
            LayoutElement::Glyph(Glyph::new(alias_id, class, bounds, label)),
            owner.is_none(),
        );
        if let Some(owner_glyph) = owner.and_then(|owner| owner.glyph) {
            if let Some(glyph) = builder.ctx.layout.glyph_mut(owner_glyph) {
                glyph.push_child(alias_id);
            }
        }
    }

    if let Some(owner) = owner {
        builder.append_component(owner.model, species_id);
    }
    Ok(Some(species_id))
}

/// Transformer for a complex occurrence: builds the complex species, its
/// glyph, and recurses into the member occurrences collected by the index.
pub(crate) fn build_complex_alias(
    builder: &mut MapBuilder<'_>,
    target: NativeRef,
    owner: Option<Owner>,
) -> Result<Option<Id>, ConvertError> {
    let NativeRef::ComplexAlias(i) = target else {
        builder.emit_unsupported(target, "complex transformer on a non-complex occurrence");
        return Ok(None);
    };
    let doc = builder.doc;
    let alias = &doc.complex_aliases[i];
    let alias_id = Id::new(&alias.id);

    let species_id = builder.ensure_species(Id::new(&alias.species), alias_id, alias.activity)?;

    if !builder.ctx.layout.contains(alias_id) {
        let label = builder
            .ctx
            .model
            .species_by_id(species_id)
            .and_then(|species| species.name().map(str::to_owned));
        let bounds = builder.glyph_bounds(&alias.bounds);
        builder.ctx.layout.insert(
            LayoutElement::Glyph(Glyph::new(alias_id, ShapeClass::Rectangle, bounds, label)),
            owner.is_none(),
        );
        if let Some(owner_glyph) = owner.and_then(|owner| owner.glyph) {
            if let Some(glyph) = builder.ctx.layout.glyph_mut(owner_glyph) {
                glyph.push_child(alias_id);
            }
        }
    }

    if let Some(owner) = owner {
        builder.append_component(owner.model, species_id);
    }

    // Members were collected by the index pass from the member-of
    // back-references. Self-nesting is forbidden by the format, so the
    // recursion terminates.
    let members = builder.index.complex_members(alias_id).to_vec();
    let member_owner = Owner {
        model: species_id,
        glyph: Some(alias_id),
    };
    for member in members {
        let Some(member_target) = builder.index.get(member) else {
            continue;
        };
        trace!(complex:% = alias_id, member:% = member; "Building complex member");
        builder.dispatch(member_target, Some(member_owner))?;
    }

    Ok(Some(species_id))
}

impl MapBuilder<'_> {
    /// The shared build-species routine: builds the semantic species
    /// registered under `id`, or fetches it when another occurrence already
    /// built it.
    ///
    /// Resolves the compartment and template references, the homomultimer
    /// count, the structural state, and the modification list, including an
    /// explicit empty-state modification for every template-declared residue
    /// the species does not override.
    pub(crate) fn ensure_species(
        &mut self,
        id: Id,
        referrer: Id,
        activity: Activity,
    ) -> Result<Id, ConvertError> {
        if self.ctx.model.species_by_id(id).is_some() {
            return Ok(id);
        }
        let doc = self.doc;
        let (name, compartment, identity, metadata): (
            Option<&str>,
            Option<&str>,
            &IdentitySpec,
            &[MetadataEntry],
        ) = match self.index.get(id) {
            Some(NativeRef::Species(s)) => {
                let spec = &doc.species[s];
                (
                    spec.name.as_deref(),
                    spec.compartment.as_deref(),
                    &spec.identity,
                    &spec.metadata,
                )
            }
            Some(NativeRef::IncludedSpecies(s)) => {
                let spec = &doc.included_species[s];
                (spec.name.as_deref(), None, &spec.identity, &spec.metadata)
            }
            _ => {
                return Err(ConvertError::MissingReference {
                    referrer,
                    target: id,
                    role: "the occurrence's species",
                });
            }
        };

        let compartment = compartment
            .map(|compartment| self.ensure_compartment(Id::new(compartment), id))
            .transpose()?;
        let template = identity
            .template
            .as_deref()
            .map(|template| self.ensure_template(Id::new(template), id))
            .transpose()?;

        let template_kind = template.and_then(|template| {
            self.ctx
                .model
                .template(template)
                .map(|template| template.kind())
        });
        let kind = SpeciesKind::from_class(identity.class, template_kind);

        let state = identity.state.as_ref();
        let homomultimer = state.and_then(|state| state.homomultimer).unwrap_or(1);
        let structural_state = state.and_then(|state| state.structural_state.as_ref()).map(
            |structural| StructuralState::new(structural.value.clone(), structural.angle),
        );
        let modifications = match template {
            Some(template) => self.collect_modifications(id, template, identity),
            None => Vec::new(),
        };

        debug!(species:% = id, kind:?; "Building species");
        self.ctx.model.insert(ModelElement::Species(Species::new(
            id,
            kind,
            name.map(str::to_owned),
            compartment,
            template,
            homomultimer,
            identity.hypothetical.unwrap_or(false),
            activity == Activity::Active,
            structural_state,
            modifications,
        )));
        self.extract_annotations(id, metadata);
        Ok(id)
    }

    /// One modification per template residue, in template declaration
    /// order: the explicitly overridden state where the species supplies
    /// one, the empty state everywhere else.
    fn collect_modifications(
        &mut self,
        species: Id,
        template: Id,
        identity: &IdentitySpec,
    ) -> Vec<Modification> {
        let doc = self.doc;
        let Some(NativeRef::Template(t)) = self.index.get(template) else {
            return Vec::new();
        };
        let residues = &doc.templates[t].residues;
        let overrides: &[_] = identity
            .state
            .as_ref()
            .map(|state| state.modifications.as_slice())
            .unwrap_or_default();

        for unknown in overrides
            .iter()
            .filter(|entry| !residues.iter().any(|residue| residue.id == entry.residue))
        {
            self.ctx.diagnostics.emit(
                Diagnostic::warning(
                    DiagnosticKind::UnsupportedVariant,
                    format!(
                        "modification names residue `{}` which template `{template}` does not declare",
                        unknown.residue
                    ),
                )
                .with_element(species),
            );
        }

        residues
            .iter()
            .map(|residue| {
                let state = overrides
                    .iter()
                    .find(|entry| entry.residue == residue.id)
                    .map(|entry| entry.state)
                    .unwrap_or(ResidueState::Empty);
                Modification::new(template.composite(&residue.id), state)
            })
            .collect()
    }
}

