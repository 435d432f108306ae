//! Plain modifier transformer variants.
//!
//! A modifier entry regulates the reaction it is listed on. The source is
//! the entry's species unless a gate variant already claimed the entry
//! through the source-override table, in which case the synthesized gate is
//! the source.

use log::trace;

use plastid_core::identifier::Id;

use crate::{
    convert::{MapBuilder, context::Owner, index::NativeRef},
    document::ModifierEntryTag,
    error::ConvertError,
    layout::{Connector, LayoutElement},
    model::{Modifier, ModifierKind},
};

/// Transformer for a plain modifier entry.
pub(crate) fn build(
    builder: &mut MapBuilder<'_>,
    target: NativeRef,
    owner: Option<Owner>,
) -> Result<Option<Id>, ConvertError> {
    let NativeRef::Modifier { reaction, entry } = target else {
        builder.emit_unsupported(target, "modifier transformer on a non-modifier element");
        return Ok(None);
    };
    let doc = builder.doc;
    let spec = &doc.reactions[reaction].modifiers[entry];
    let reaction_id = owner
        .map(|owner| owner.model)
        .unwrap_or_else(|| Id::new(&doc.reactions[reaction].id));
    let ModifierEntryTag::Plain(tag) = spec.kind else {
        builder.emit_unsupported(target, "gate entry reached the plain modifier transformer");
        return Ok(None);
    };

    let source = match builder.ctx.source_override(target) {
        Some(gate) => gate,
        None => {
            let Some(species) = spec.species.first() else {
                builder.emit_unsupported(target, "modifier entry names no species");
                return Ok(None);
            };
            let species = Id::new(species);
            if builder.ctx.is_consumed_gate_input(reaction, species) {
                // The per-input entry duplicates a gate input visually; the
                // gate's single modifier already covers it.
                trace!(reaction:% = reaction_id, species:% = species; "Skipping gate-input modifier entry");
                return Ok(None);
            }
            if builder.ctx.model.species_by_id(species).is_none() {
                builder.emit_unsupported(
                    target,
                    &format!("modifier source `{species}` is not a convertible element"),
                );
                return Ok(None);
            }
            species
        }
    };

    builder.attach_modifier(reaction, entry, reaction_id, ModifierKind::from(tag), source);
    Ok(None)
}

impl MapBuilder<'_> {
    /// Appends the modifier to its reaction and routes its connector from
    /// the first listed occurrence to the reaction node.
    ///
    /// Shared by the plain and the gate modifier variants; the gate variant
    /// passes the synthesized gate as `source`.
    pub(crate) fn attach_modifier(
        &mut self,
        reaction: usize,
        entry: usize,
        reaction_id: Id,
        kind: ModifierKind,
        source: Id,
    ) {
        self.append_modifier(reaction_id, Modifier::new(kind, source));

        let Some(main) = self.main_segment(reaction_id) else {
            return;
        };
        let doc = self.doc;
        let spec = &doc.reactions[reaction].modifiers[entry];
        let Some(alias) = spec.aliases.first() else {
            return;
        };
        let Ok(shape) = self.glyph_shape(Id::new(alias), reaction_id) else {
            self.emit_unsupported(
                NativeRef::Modifier { reaction, entry },
                &format!("modifier occurrence `{alias}` has no glyph"),
            );
            return;
        };

        let node = main.node();
        let anchor = self.parse_anchor(spec.anchor.as_deref(), reaction_id);
        let start = self.attachment(shape, anchor, node, reaction_id);
        let points = self.route(reaction_id, start, node, &spec.edit_points);
        let connector_id = reaction_id.composite(&format!("modifier_{entry}"));
        self.ctx.layout.insert(
            LayoutElement::Connector(Connector::new(connector_id, points)),
            true,
        );
    }
}
