//! Reduced-notation influence transformer variants.
//!
//! An influence reaction is not a process: it connects a regulating species
//! (or a gate over several) directly to a regulated species. The model
//! counterpart is a [`Modulation`].

use log::debug;

use plastid_core::identifier::Id;

use crate::{
    convert::{MapBuilder, context::Owner, index::NativeRef},
    error::ConvertError,
    layout::{Connector, LayoutElement},
    model::{BooleanGate, ModelElement, Modulation, ModulationKind},
};

/// Transformer for a plain influence reaction.
pub(crate) fn build(
    builder: &mut MapBuilder<'_>,
    target: NativeRef,
    _owner: Option<Owner>,
) -> Result<Option<Id>, ConvertError> {
    let NativeRef::Reaction(i) = target else {
        builder.emit_unsupported(target, "influence transformer on a non-reaction element");
        return Ok(None);
    };
    let doc = builder.doc;
    let spec = &doc.reactions[i];
    let id = Id::new(&spec.id);
    let Some(kind) = ModulationKind::from_tag(spec.kind) else {
        builder.emit_unsupported(target, "reaction tag is not an influence kind");
        return Ok(None);
    };
    let (Some(source), Some(regulated)) = (spec.base_reactants.first(), spec.base_products.first())
    else {
        builder.emit_unsupported(target, "influence reaction lacks a source or a target");
        return Ok(None);
    };

    let source_species =
        builder.resolve_built_species(Id::new(&source.species), id, "the influence source")?;
    let target_species =
        builder.resolve_built_species(Id::new(&regulated.species), id, "the influence target")?;

    debug!(modulation:% = id, kind:?; "Building modulation");
    builder.ctx.model.insert(ModelElement::Modulation(Modulation::new(
        id,
        kind,
        source_species,
        target_species,
        None,
    )));
    builder.extract_annotations(id, &spec.metadata);

    let source_shape = builder.glyph_shape(Id::new(&source.alias), id)?;
    let target_shape = builder.glyph_shape(Id::new(&regulated.alias), id)?;
    let source_anchor = builder.parse_anchor(source.anchor.as_deref(), id);
    let target_anchor = builder.parse_anchor(regulated.anchor.as_deref(), id);
    let start = builder.attachment(source_shape, source_anchor, target_shape.center(), id);
    let end = builder.attachment(target_shape, target_anchor, source_shape.center(), id);
    let points = builder.route(id, start, end, &spec.edit_points);
    builder
        .ctx
        .layout
        .insert(LayoutElement::Connector(Connector::new(id, points)), true);

    Ok(Some(id))
}

/// Transformer for an influence reaction whose gate member overrides the
/// plain key: the gate aggregates the inputs, and the modulation's source is
/// the synthesized gate.
pub(crate) fn build_gated(
    builder: &mut MapBuilder<'_>,
    target: NativeRef,
    _owner: Option<Owner>,
) -> Result<Option<Id>, ConvertError> {
    let NativeRef::Reaction(i) = target else {
        builder.emit_unsupported(target, "influence transformer on a non-reaction element");
        return Ok(None);
    };
    let doc = builder.doc;
    let spec = &doc.reactions[i];
    let id = Id::new(&spec.id);
    // Key derivation guarantees a first member.
    let Some(member) = spec.gate_members.first() else {
        builder.emit_unsupported(target, "gated influence carries no gate member");
        return Ok(None);
    };
    let Some(regulated) = spec.base_products.first() else {
        builder.emit_unsupported(target, "gated influence lacks a target");
        return Ok(None);
    };

    let member_ref = NativeRef::GateMember {
        reaction: i,
        member: 0,
    };
    let inputs = builder.resolve_gate_inputs(member_ref, &member.species);
    if inputs.is_empty() {
        builder.emit_unsupported(member_ref, "gate member has no resolvable inputs");
        return Ok(None);
    }

    let target_species =
        builder.resolve_built_species(Id::new(&regulated.species), id, "the influence target")?;

    let gate_id = builder.ctx.next_gate_id(&builder.options.gate_id_prefix);
    debug!(gate:% = gate_id, kind:? = member.gate, inputs = inputs.len(); "Building boolean gate");
    builder.ctx.model.insert(ModelElement::Gate(BooleanGate::new(
        gate_id,
        member.gate.into(),
        inputs,
    )));
    builder.ctx.set_source_override(member_ref, gate_id);

    let kind = ModulationKind::from_modifier_tag(member.modification);
    debug!(modulation:% = id, kind:?; "Building gated modulation");
    builder.ctx.model.insert(ModelElement::Modulation(Modulation::new(
        id,
        kind,
        gate_id,
        target_species,
        Some(gate_id),
    )));
    builder.extract_annotations(id, &spec.metadata);

    // The gate has no occurrence of its own; the connector runs from the
    // first input occurrence to the regulated occurrence.
    if let Some(alias) = member.aliases.first() {
        let source_shape = builder.glyph_shape(Id::new(alias), id)?;
        let target_shape = builder.glyph_shape(Id::new(&regulated.alias), id)?;
        let target_anchor = builder.parse_anchor(regulated.anchor.as_deref(), id);
        let start = builder.attachment(source_shape, None, target_shape.center(), id);
        let end = builder.attachment(target_shape, target_anchor, source_shape.center(), id);
        let points = builder.route(id, start, end, &member.edit_points);
        builder
            .ctx
            .layout
            .insert(LayoutElement::Connector(Connector::new(id, points)), true);
    }

    Ok(Some(id))
}
