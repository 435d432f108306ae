//! The map assembler: the fixed phase order over the document.
//!
//! Phases: (1) ID index, (2) compartments, aliases first, then unaliased
//! ones, (3) templates, (4) top-level species and complex occurrences not
//! consumed as complex members, (5) reactions, (6) canvas finalization and
//! freeze. Each phase walks the document in order and hands every element to
//! the dispatch table.

use log::{debug, info};

use plastid_core::{
    geometry::{Point, Size},
    identifier::Id,
};

use crate::{
    config::ConvertOptions,
    convert::{MapBuilder, index::NativeRef},
    document::Document,
    error::ConvertError,
    layout::Canvas,
    map::{Conversion, PathwayMap},
};

/// Runs a full conversion.
pub(crate) fn run(doc: &Document, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    info!(
        species = doc.species.len(),
        reactions = doc.reactions.len();
        "Converting pathway document"
    );
    let mut builder = MapBuilder::new(doc, options)?;
    builder.build_compartments()?;
    builder.build_templates()?;
    builder.build_species()?;
    builder.build_reactions()?;
    Ok(builder.finish())
}

impl MapBuilder<'_> {
    /// Phase 2: compartment aliases first, so "outside" nesting resolves
    /// against already-built parents; then every compartment the document
    /// never draws.
    pub(crate) fn build_compartments(&mut self) -> Result<(), ConvertError> {
        debug!("Phase: compartments");
        let doc = self.doc;
        for i in 0..doc.compartment_aliases.len() {
            self.dispatch(NativeRef::CompartmentAlias(i), None)?;
        }
        for spec in &doc.compartments {
            let id = Id::new(&spec.id);
            if !self.ctx.model.contains(id) {
                self.ensure_compartment(id, id)?;
            }
        }
        Ok(())
    }

    /// Phase 3: every species-template family.
    pub(crate) fn build_templates(&mut self) -> Result<(), ConvertError> {
        debug!("Phase: templates");
        let doc = self.doc;
        for i in 0..doc.templates.len() {
            self.dispatch(NativeRef::Template(i), None)?;
        }
        Ok(())
    }

    /// Phase 4: every top-level occurrence not already consumed as a complex
    /// member; complexes recurse into their members themselves.
    pub(crate) fn build_species(&mut self) -> Result<(), ConvertError> {
        debug!("Phase: species");
        let doc = self.doc;
        for (i, alias) in doc.species_aliases.iter().enumerate() {
            if alias.complex_alias.is_none() {
                self.dispatch(NativeRef::SpeciesAlias(i), None)?;
            }
        }
        for (i, alias) in doc.complex_aliases.iter().enumerate() {
            if alias.complex_alias.is_none() {
                self.dispatch(NativeRef::ComplexAlias(i), None)?;
            }
        }
        Ok(())
    }

    /// Phase 5: every reaction; participants, modifiers, modulations, and
    /// gates are built inside the reaction variants.
    pub(crate) fn build_reactions(&mut self) -> Result<(), ConvertError> {
        debug!("Phase: reactions");
        let doc = self.doc;
        for i in 0..doc.reactions.len() {
            self.dispatch(NativeRef::Reaction(i), None)?;
        }
        Ok(())
    }

    /// Phase 6: canvas bounds, deterministic ordering, immutable map.
    pub(crate) fn finish(self) -> Conversion {
        let mut ctx = self.ctx;

        let canvas = match self.doc.canvas {
            Some(spec) => Canvas::new(Point::new(0.0, 0.0), Size::new(spec.width, spec.height)),
            None => match ctx.layout.glyph_bounds() {
                Some(bounds) => Canvas::new(bounds.min_point(), bounds.to_size()),
                None => Canvas::default(),
            },
        };
        ctx.layout.set_canvas(canvas);

        ctx.model.freeze();
        ctx.annotations.freeze();

        let diagnostics = ctx.diagnostics.into_diagnostics();
        info!(
            model_elements = ctx.model.len(),
            layout_elements = ctx.layout.len(),
            diagnostics = diagnostics.len();
            "Conversion finished"
        );
        Conversion::new(
            PathwayMap::new(ctx.model, ctx.layout, ctx.annotations),
            diagnostics,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::index::IdIndex;
    use crate::document::{
        CompartmentAliasSpec, CompartmentClass, CompartmentSpec, IdentitySpec, ParticipantSpec,
        RawBounds, ReactionSpec, ReactionTag, ResidueSpec, SpeciesAliasSpec, SpeciesClass,
        SpeciesSpec, TemplateFamily, TemplateSpec,
    };

    fn alias(id: &str, species: &str, x: f64) -> SpeciesAliasSpec {
        SpeciesAliasSpec {
            id: id.to_owned(),
            species: species.to_owned(),
            compartment_alias: None,
            complex_alias: None,
            bounds: RawBounds {
                x,
                y: 0.0,
                width: 20.0,
                height: 10.0,
            },
            activity: Default::default(),
        }
    }

    /// A document exercising every indexed family, with one template shared
    /// by two species and one compartment referenced from both.
    fn shared_reference_document() -> Document {
        let mut doc = Document::default();
        doc.compartments.push(CompartmentSpec {
            id: "c1".to_owned(),
            name: Some("cytosol".to_owned()),
            outside: None,
            metadata: Vec::new(),
        });
        doc.compartment_aliases.push(CompartmentAliasSpec {
            id: "ca1".to_owned(),
            compartment: "c1".to_owned(),
            class: CompartmentClass::Square,
            bounds: RawBounds {
                x: 0.0,
                y: 0.0,
                width: 200.0,
                height: 100.0,
            },
        });
        doc.templates.push(TemplateSpec {
            id: "pr1".to_owned(),
            family: TemplateFamily::Generic,
            name: None,
            residues: vec![ResidueSpec {
                id: "rs1".to_owned(),
                name: None,
                angle: None,
            }],
            metadata: Vec::new(),
        });
        for species_id in ["s1", "s2"] {
            doc.species.push(SpeciesSpec {
                id: species_id.to_owned(),
                name: None,
                compartment: Some("c1".to_owned()),
                identity: IdentitySpec {
                    class: SpeciesClass::Protein,
                    template: Some("pr1".to_owned()),
                    hypothetical: None,
                    state: None,
                },
                metadata: Vec::new(),
            });
        }
        doc.species_aliases.push(alias("sa1", "s1", 10.0));
        doc.species_aliases.push(alias("sa2", "s2", 60.0));
        doc.reactions.push(ReactionSpec {
            id: "re1".to_owned(),
            kind: ReactionTag::StateTransition,
            reversible: true,
            base_reactants: vec![ParticipantSpec {
                species: "s1".to_owned(),
                alias: "sa1".to_owned(),
                anchor: None,
            }],
            base_products: vec![ParticipantSpec {
                species: "s2".to_owned(),
                alias: "sa2".to_owned(),
                anchor: None,
            }],
            reactant_links: Vec::new(),
            product_links: Vec::new(),
            edit_points: Vec::new(),
            modifiers: Vec::new(),
            gate_members: Vec::new(),
            metadata: Vec::new(),
        });
        doc
    }

    #[test]
    fn every_indexed_id_resolves_to_exactly_one_element() {
        let doc = shared_reference_document();
        let index = IdIndex::build(&doc).unwrap();
        let conversion = run(&doc, &ConvertOptions::default()).unwrap();
        assert!(conversion.diagnostics().is_empty());
        let map = conversion.map();

        // Every ID the index covers (compartments, aliases, templates and
        // their residues, species, reactions) resolves to exactly one
        // element: semantic IDs in the model table, occurrence IDs in the
        // layout table, no matter how many paths referenced them.
        for id in index.ids() {
            let in_model = map.model().get(id).is_some();
            let in_layout = map.layout().get(id).is_some();
            assert!(in_model || in_layout, "indexed ID `{id}` was never built");
        }

        // Shared references collapsed: one template, one compartment.
        assert_eq!(map.model().templates().count(), 1);
        assert_eq!(map.model().compartments().count(), 1);
    }
}
