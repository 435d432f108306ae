//! Process-reaction transformer variants.
//!
//! A reaction builds its semantic element first, then routes its connectors:
//! the main polyline between the first base reactant and the first base
//! product, side connectors for every further participant, and one connector
//! per modifier entry (built by the modifier variants it dispatches to).

use log::debug;

use plastid_core::{geometry::Point, identifier::Id};

use crate::{
    convert::{MapBuilder, context::Owner, index::NativeRef},
    document::{LinkSpec, ParticipantSpec},
    error::ConvertError,
    layout::{Connector, LayoutElement},
    model::{ModelElement, Participant, Reaction, ReactionKind},
};

/// The routed main segment of a reaction: where reactant-side connectors
/// end and product-side connectors start.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MainSegment {
    pub start: Point,
    pub end: Point,
}

impl MainSegment {
    /// The reaction node: modifier connectors terminate here.
    pub(crate) fn node(self) -> Point {
        self.start.midpoint(self.end)
    }
}

/// Transformer for a process reaction.
pub(crate) fn build(
    builder: &mut MapBuilder<'_>,
    target: NativeRef,
    _owner: Option<Owner>,
) -> Result<Option<Id>, ConvertError> {
    let NativeRef::Reaction(i) = target else {
        builder.emit_unsupported(target, "reaction transformer on a non-reaction element");
        return Ok(None);
    };
    let doc = builder.doc;
    let spec = &doc.reactions[i];
    let id = Id::new(&spec.id);
    let Some(kind) = ReactionKind::from_tag(spec.kind) else {
        builder.emit_unsupported(target, "reaction tag is not a process kind");
        return Ok(None);
    };

    let reactants = builder.resolve_participants(&spec.base_reactants, id, "a base reactant")?;
    let products = builder.resolve_participants(&spec.base_products, id, "a base product")?;

    debug!(reaction:% = id, kind:?; "Building reaction");
    builder.ctx.model.insert(ModelElement::Reaction(Reaction::new(
        id,
        kind,
        spec.reversible,
        reactants,
        products,
    )));
    builder.extract_annotations(id, &spec.metadata);

    let main = builder.route_main_connector(i, id)?;
    if let Some(main) = main {
        builder.route_side_connectors(i, id, main)?;
    }

    for entry in 0..spec.modifiers.len() {
        builder.dispatch(
            NativeRef::Modifier {
                reaction: i,
                entry,
            },
            Some(Owner {
                model: id,
                glyph: None,
            }),
        )?;
    }

    Ok(Some(id))
}

impl MapBuilder<'_> {
    /// Resolves participant specs against the already-built species.
    pub(crate) fn resolve_participants(
        &mut self,
        specs: &[ParticipantSpec],
        reaction: Id,
        role: &'static str,
    ) -> Result<Vec<Participant>, ConvertError> {
        specs
            .iter()
            .map(|spec| {
                let species = self.resolve_built_species(Id::new(&spec.species), reaction, role)?;
                Ok(Participant::new(species, Id::new(&spec.alias)))
            })
            .collect()
    }

    /// Routes the main connector between the first base reactant and the
    /// first base product. Reactions without both sides route nothing.
    fn route_main_connector(
        &mut self,
        i: usize,
        id: Id,
    ) -> Result<Option<MainSegment>, ConvertError> {
        let doc = self.doc;
        let spec = &doc.reactions[i];
        let (Some(reactant), Some(product)) =
            (spec.base_reactants.first(), spec.base_products.first())
        else {
            return Ok(None);
        };

        let reactant_shape = self.glyph_shape(Id::new(&reactant.alias), id)?;
        let product_shape = self.glyph_shape(Id::new(&product.alias), id)?;

        let reactant_anchor = self.parse_anchor(reactant.anchor.as_deref(), id);
        let product_anchor = self.parse_anchor(product.anchor.as_deref(), id);

        let start = self.attachment(reactant_shape, reactant_anchor, product_shape.center(), id);
        let end = self.attachment(product_shape, product_anchor, reactant_shape.center(), id);

        let points = self.route(id, start, end, &spec.edit_points);
        self.ctx
            .layout
            .insert(LayoutElement::Connector(Connector::new(id, points)), true);

        Ok(Some(MainSegment { start, end }))
    }

    /// Routes connectors for participants beyond the first pair: extra base
    /// reactants and products, then reactant and product links. Link
    /// participants are appended to the owning reaction as they are routed.
    fn route_side_connectors(
        &mut self,
        i: usize,
        id: Id,
        main: MainSegment,
    ) -> Result<(), ConvertError> {
        let doc = self.doc;
        let spec = &doc.reactions[i];

        for (k, participant) in spec.base_reactants.iter().enumerate().skip(1) {
            let connector_id = id.composite(&format!("reactant_{k}"));
            self.route_stub(connector_id, id, participant, main.start, true)?;
        }
        for (k, participant) in spec.base_products.iter().enumerate().skip(1) {
            let connector_id = id.composite(&format!("product_{k}"));
            self.route_stub(connector_id, id, participant, main.end, false)?;
        }

        for (k, link) in spec.reactant_links.iter().enumerate() {
            let species = self.resolve_built_species(Id::new(&link.species), id, "a linked reactant")?;
            let participant = Participant::new(species, Id::new(&link.alias));
            if let Some(ModelElement::Reaction(reaction)) = self.ctx.model.get_mut(id) {
                reaction.push_reactant(participant);
            }
            let connector_id = id.composite(&format!("reactant_link_{k}"));
            self.route_link(connector_id, id, link, main.start, true)?;
        }
        for (k, link) in spec.product_links.iter().enumerate() {
            let species = self.resolve_built_species(Id::new(&link.species), id, "a linked product")?;
            let participant = Participant::new(species, Id::new(&link.alias));
            if let Some(ModelElement::Reaction(reaction)) = self.ctx.model.get_mut(id) {
                reaction.push_product(participant);
            }
            let connector_id = id.composite(&format!("product_link_{k}"));
            self.route_link(connector_id, id, link, main.end, false)?;
        }

        Ok(())
    }

    /// One extra base participant: a straight stub between the occurrence
    /// border (or anchor) and the main-segment endpoint.
    fn route_stub(
        &mut self,
        connector_id: Id,
        reaction: Id,
        participant: &ParticipantSpec,
        segment_point: Point,
        toward_segment: bool,
    ) -> Result<(), ConvertError> {
        let shape = self.glyph_shape(Id::new(&participant.alias), reaction)?;
        let anchor = self.parse_anchor(participant.anchor.as_deref(), reaction);
        let attachment = self.attachment(shape, anchor, segment_point, reaction);
        let points = if toward_segment {
            vec![attachment, segment_point]
        } else {
            vec![segment_point, attachment]
        };
        self.ctx.layout.insert(
            LayoutElement::Connector(Connector::new(connector_id, points)),
            true,
        );
        Ok(())
    }

    /// One linked participant: like a stub, but with the link's own
    /// intermediate points routed through the endpoint frame.
    fn route_link(
        &mut self,
        connector_id: Id,
        reaction: Id,
        link: &LinkSpec,
        segment_point: Point,
        toward_segment: bool,
    ) -> Result<(), ConvertError> {
        let shape = self.glyph_shape(Id::new(&link.alias), reaction)?;
        let anchor = self.parse_anchor(link.anchor.as_deref(), reaction);
        let attachment = self.attachment(shape, anchor, segment_point, reaction);
        let (start, end) = if toward_segment {
            (attachment, segment_point)
        } else {
            (segment_point, attachment)
        };
        let points = self.route(reaction, start, end, &link.edit_points);
        self.ctx.layout.insert(
            LayoutElement::Connector(Connector::new(connector_id, points)),
            true,
        );
        Ok(())
    }

    /// The routed main segment of an already-built reaction, recovered from
    /// its registered connector.
    pub(crate) fn main_segment(&self, reaction: Id) -> Option<MainSegment> {
        let connector = self.ctx.layout.connector(reaction)?;
        Some(MainSegment {
            start: connector.start(),
            end: connector.end(),
        })
    }
}
