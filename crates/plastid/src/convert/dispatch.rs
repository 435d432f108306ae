//! The dispatch table: discriminant keys to transformer variants.
//!
//! Every native element is reduced to an [`ElementKey`]: a single tag, a
//! tag pair, or a tag triple (the included marker plus class and family).
//! The the [`Registry`] maps keys to handler functions. An unregistered key
//! is a non-fatal condition: the element is skipped with a diagnostic.

use std::collections::HashMap;

use plastid_core::identifier::Id;

use crate::{
    convert::{MapBuilder, compartment, gate, influence, modifier, reaction, species, template},
    convert::context::Owner,
    convert::index::{IdIndex, NativeRef},
    document::{
        CompartmentClass, Document, GateTag, IdentitySpec, ModifierEntryTag, ModifierTag,
        ReactionTag, SpeciesClass, TemplateFamily,
    },
    error::ConvertError,
};

/// The discriminant key of a native element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ElementKey {
    /// Compartment alias, by rendering class.
    Compartment(CompartmentClass),
    /// Species template, by family.
    Template(TemplateFamily),
    /// Species occurrence without a template.
    Species(SpeciesClass),
    /// Species occurrence with its template's family.
    TemplatedSpecies(SpeciesClass, TemplateFamily),
    /// Complex component occurrence without a template.
    IncludedSpecies(SpeciesClass),
    /// Complex component occurrence with its template's family.
    IncludedTemplatedSpecies(SpeciesClass, TemplateFamily),
    /// Process reaction or reduced-notation influence.
    Reaction(ReactionTag),
    /// Influence reaction whose gate member overrides the plain key.
    GateReaction(GateTag, ModifierTag),
    /// Plain modifier entry on a reaction.
    Modifier(ModifierTag),
    /// Gate modifier entry on a reaction.
    GateModifier(GateTag, ModifierTag),
}

impl ElementKey {
    /// Derives the key for a native element, or `None` when the element's
    /// declared fields do not form a key this converter knows about.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MissingReference`] when an occurrence names a
    /// species the document does not define: that is a broken
    /// cross-reference, not merely an unknown variant.
    pub(crate) fn derive(
        doc: &Document,
        index: &IdIndex,
        target: NativeRef,
    ) -> Result<Option<Self>, ConvertError> {
        let key = match target {
            NativeRef::CompartmentAlias(i) => {
                Some(ElementKey::Compartment(doc.compartment_aliases[i].class))
            }
            NativeRef::Template(i) => Some(ElementKey::Template(doc.templates[i].family)),
            NativeRef::SpeciesAlias(i) => {
                let alias = &doc.species_aliases[i];
                let species = Id::new(&alias.species);
                match index.get(species) {
                    Some(NativeRef::Species(s)) => {
                        Some(species_key(doc, index, &doc.species[s].identity, false))
                    }
                    Some(NativeRef::IncludedSpecies(s)) => {
                        Some(species_key(doc, index, &doc.included_species[s].identity, true))
                    }
                    _ => {
                        return Err(ConvertError::MissingReference {
                            referrer: Id::new(&alias.id),
                            target: species,
                            role: "the occurrence's species",
                        });
                    }
                }
            }
            NativeRef::ComplexAlias(i) => {
                let alias = &doc.complex_aliases[i];
                let species = Id::new(&alias.species);
                match index.get(species) {
                    Some(NativeRef::Species(s)) => {
                        Some(species_key(doc, index, &doc.species[s].identity, false))
                    }
                    _ => {
                        return Err(ConvertError::MissingReference {
                            referrer: Id::new(&alias.id),
                            target: species,
                            role: "the occurrence's complex species",
                        });
                    }
                }
            }
            NativeRef::Reaction(i) => {
                let reaction = &doc.reactions[i];
                match reaction.gate_members.first() {
                    Some(member) if reaction.kind.is_influence() => {
                        Some(ElementKey::GateReaction(member.gate, member.modification))
                    }
                    _ => Some(ElementKey::Reaction(reaction.kind)),
                }
            }
            NativeRef::Modifier { reaction, entry } => {
                let entry = &doc.reactions[reaction].modifiers[entry];
                match entry.kind {
                    ModifierEntryTag::Plain(tag) => Some(ElementKey::Modifier(tag)),
                    ModifierEntryTag::Gate(gate) => {
                        entry.modification.map(|tag| ElementKey::GateModifier(gate, tag))
                    }
                }
            }
            // Never dispatched directly: compartments are built through
            // their aliases or the unaliased sweep, residues through their
            // template, gate members through their reaction.
            _ => None,
        };
        Ok(key)
    }
}

/// The class/family key of one species occurrence.
fn species_key(
    doc: &Document,
    index: &IdIndex,
    identity: &IdentitySpec,
    included: bool,
) -> ElementKey {
    let family = identity
        .template
        .as_deref()
        .and_then(|template| match index.get(Id::new(template)) {
            Some(NativeRef::Template(t)) => Some(doc.templates[t].family),
            _ => None,
        });
    match (included, family) {
        (false, None) => ElementKey::Species(identity.class),
        (false, Some(family)) => ElementKey::TemplatedSpecies(identity.class, family),
        (true, None) => ElementKey::IncludedSpecies(identity.class),
        (true, Some(family)) => ElementKey::IncludedTemplatedSpecies(identity.class, family),
    }
}

/// A transformer variant: consumes one native element, registers its model
/// and layout pair, and returns the model element's ID.
pub(crate) type Handler =
    fn(&mut MapBuilder<'_>, NativeRef, Option<Owner>) -> Result<Option<Id>, ConvertError>;

/// The key-to-transformer registry.
pub(crate) struct Registry {
    handlers: HashMap<ElementKey, Handler>,
}

impl Registry {
    /// The full standard registry.
    pub(crate) fn standard() -> Self {
        let mut handlers: HashMap<ElementKey, Handler> = HashMap::new();

        handlers.insert(
            ElementKey::Compartment(CompartmentClass::Square),
            compartment::build_alias as Handler,
        );
        handlers.insert(
            ElementKey::Compartment(CompartmentClass::Oval),
            compartment::build_alias as Handler,
        );

        const FAMILIES: [TemplateFamily; 7] = [
            TemplateFamily::Generic,
            TemplateFamily::IonChannel,
            TemplateFamily::Receptor,
            TemplateFamily::Truncated,
            TemplateFamily::Gene,
            TemplateFamily::Rna,
            TemplateFamily::AntisenseRna,
        ];
        for family in FAMILIES {
            handlers.insert(ElementKey::Template(family), template::build as Handler);
        }

        // Species occurrences. Complexes get their own variant; everything
        // else shares the build-species routine.
        const PLAIN_CLASSES: [SpeciesClass; 10] = [
            SpeciesClass::Protein,
            SpeciesClass::Gene,
            SpeciesClass::Rna,
            SpeciesClass::AntisenseRna,
            SpeciesClass::Phenotype,
            SpeciesClass::Ion,
            SpeciesClass::SimpleMolecule,
            SpeciesClass::Drug,
            SpeciesClass::Unknown,
            SpeciesClass::Degraded,
        ];
        for class in PLAIN_CLASSES {
            handlers.insert(ElementKey::Species(class), species::build_alias as Handler);
            handlers.insert(
                ElementKey::IncludedSpecies(class),
                species::build_alias as Handler,
            );
        }
        handlers.insert(
            ElementKey::Species(SpeciesClass::Complex),
            species::build_complex_alias as Handler,
        );

        const TEMPLATED: [(SpeciesClass, TemplateFamily); 7] = [
            (SpeciesClass::Protein, TemplateFamily::Generic),
            (SpeciesClass::Protein, TemplateFamily::IonChannel),
            (SpeciesClass::Protein, TemplateFamily::Receptor),
            (SpeciesClass::Protein, TemplateFamily::Truncated),
            (SpeciesClass::Gene, TemplateFamily::Gene),
            (SpeciesClass::Rna, TemplateFamily::Rna),
            (SpeciesClass::AntisenseRna, TemplateFamily::AntisenseRna),
        ];
        for (class, family) in TEMPLATED {
            handlers.insert(
                ElementKey::TemplatedSpecies(class, family),
                species::build_alias as Handler,
            );
            handlers.insert(
                ElementKey::IncludedTemplatedSpecies(class, family),
                species::build_alias as Handler,
            );
        }

        const PROCESS_TAGS: [ReactionTag; 9] = [
            ReactionTag::StateTransition,
            ReactionTag::KnownTransitionOmitted,
            ReactionTag::UnknownTransition,
            ReactionTag::Transcription,
            ReactionTag::Translation,
            ReactionTag::Transport,
            ReactionTag::HeterodimerAssociation,
            ReactionTag::Dissociation,
            ReactionTag::Truncation,
        ];
        for tag in PROCESS_TAGS {
            handlers.insert(ElementKey::Reaction(tag), reaction::build as Handler);
        }

        const INFLUENCE_TAGS: [ReactionTag; 9] = [
            ReactionTag::Catalysis,
            ReactionTag::UnknownCatalysis,
            ReactionTag::Inhibition,
            ReactionTag::UnknownInhibition,
            ReactionTag::PhysicalStimulation,
            ReactionTag::Modulation,
            ReactionTag::Trigger,
            ReactionTag::PositiveInfluence,
            ReactionTag::NegativeInfluence,
        ];
        for tag in INFLUENCE_TAGS {
            handlers.insert(ElementKey::Reaction(tag), influence::build as Handler);
        }

        const GATES: [GateTag; 4] = [GateTag::And, GateTag::Or, GateTag::Not, GateTag::Unknown];
        const MODIFIER_TAGS: [ModifierTag; 7] = [
            ModifierTag::Catalysis,
            ModifierTag::UnknownCatalysis,
            ModifierTag::Inhibition,
            ModifierTag::UnknownInhibition,
            ModifierTag::PhysicalStimulation,
            ModifierTag::Modulation,
            ModifierTag::Trigger,
        ];
        for tag in MODIFIER_TAGS {
            handlers.insert(ElementKey::Modifier(tag), modifier::build as Handler);
        }
        for gate_tag in GATES {
            for tag in MODIFIER_TAGS {
                handlers.insert(
                    ElementKey::GateModifier(gate_tag, tag),
                    gate::build_modifier_gate as Handler,
                );
                handlers.insert(
                    ElementKey::GateReaction(gate_tag, tag),
                    influence::build_gated as Handler,
                );
            }
        }

        Self { handlers }
    }

    /// The handler registered for `key`, if any.
    pub(crate) fn get(&self, key: ElementKey) -> Option<Handler> {
        self.handlers.get(&key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_covers_core_keys() {
        let registry = Registry::standard();
        assert!(registry
            .get(ElementKey::Compartment(CompartmentClass::Oval))
            .is_some());
        assert!(registry
            .get(ElementKey::TemplatedSpecies(
                SpeciesClass::Protein,
                TemplateFamily::Receptor
            ))
            .is_some());
        assert!(registry
            .get(ElementKey::Reaction(ReactionTag::Dissociation))
            .is_some());
        assert!(registry
            .get(ElementKey::GateModifier(GateTag::And, ModifierTag::Catalysis))
            .is_some());
        // The bare gate marker without members has no transformer.
        assert!(registry
            .get(ElementKey::Reaction(ReactionTag::BooleanLogicGate))
            .is_none());
    }
}
