//! Boolean-gate transformer variants.
//!
//! Gates never carry a document ID: the variant allocates a synthesized ID,
//! resolves the comma-separated input references through the cross-reference
//! context (an input may be a species or a previously synthesized gate),
//! rewrites the owning entry's source through the override table, and only
//! then delegates construction of the dependent modifier.

use log::debug;

use plastid_core::identifier::Id;

use crate::{
    convert::{MapBuilder, context::Owner, index::NativeRef},
    document::ModifierEntryTag,
    error::ConvertError,
    model::{BooleanGate, ModelElement, ModifierKind},
};

/// Transformer for a gate modifier entry on a process reaction.
pub(crate) fn build_modifier_gate(
    builder: &mut MapBuilder<'_>,
    target: NativeRef,
    owner: Option<Owner>,
) -> Result<Option<Id>, ConvertError> {
    let NativeRef::Modifier { reaction, entry } = target else {
        builder.emit_unsupported(target, "gate transformer on a non-modifier element");
        return Ok(None);
    };
    let doc = builder.doc;
    let spec = &doc.reactions[reaction].modifiers[entry];
    let reaction_id = owner
        .map(|owner| owner.model)
        .unwrap_or_else(|| Id::new(&doc.reactions[reaction].id));
    let ModifierEntryTag::Gate(gate_tag) = spec.kind else {
        builder.emit_unsupported(target, "plain entry reached the gate transformer");
        return Ok(None);
    };
    let Some(modification) = spec.modification else {
        builder.emit_unsupported(target, "gate entry carries no modification kind");
        return Ok(None);
    };

    let inputs = builder.resolve_gate_inputs(target, &spec.species);
    if inputs.is_empty() {
        builder.emit_unsupported(target, "gate entry has no resolvable inputs");
        return Ok(None);
    }

    let gate_id = builder.ctx.next_gate_id(&builder.options.gate_id_prefix);
    debug!(gate:% = gate_id, kind:? = gate_tag, inputs = inputs.len(); "Building boolean gate");
    builder.ctx.model.insert(ModelElement::Gate(BooleanGate::new(
        gate_id,
        gate_tag.into(),
        inputs.clone(),
    )));
    builder.append_gate(reaction_id, gate_id);

    for input in &inputs {
        builder.ctx.consume_gate_input(reaction, *input);
    }
    builder.ctx.set_source_override(target, gate_id);

    builder.attach_modifier(
        reaction,
        entry,
        reaction_id,
        ModifierKind::from(modification),
        gate_id,
    );
    Ok(Some(gate_id))
}

impl MapBuilder<'_> {
    /// Resolves gate input references through the cross-reference context.
    ///
    /// Inputs that resolve to neither a built species nor an earlier gate
    /// are dropped with a diagnostic rather than guessed at.
    pub(crate) fn resolve_gate_inputs(&mut self, target: NativeRef, raw: &[String]) -> Vec<Id> {
        let mut inputs = Vec::with_capacity(raw.len());
        for input in raw {
            let id = Id::new(input);
            let resolvable = self.ctx.model.species_by_id(id).is_some()
                || self.ctx.model.gate(id).is_some();
            if resolvable {
                inputs.push(id);
            } else {
                self.emit_unsupported(
                    target,
                    &format!("gate input `{id}` is not a convertible element; dropped"),
                );
            }
        }
        inputs
    }
}
