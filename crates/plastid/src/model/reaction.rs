//! Reactions, modifiers, and reduced-notation modulations.

use plastid_core::identifier::Id;

use crate::document::{ModifierTag, ReactionTag};

/// The process-reaction family vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    StateTransition,
    KnownTransitionOmitted,
    UnknownTransition,
    Transcription,
    Translation,
    Transport,
    HeterodimerAssociation,
    Dissociation,
    Truncation,
}

impl ReactionKind {
    /// Maps a document reaction tag to the process family, when it is one.
    pub fn from_tag(tag: ReactionTag) -> Option<Self> {
        match tag {
            ReactionTag::StateTransition => Some(ReactionKind::StateTransition),
            ReactionTag::KnownTransitionOmitted => Some(ReactionKind::KnownTransitionOmitted),
            ReactionTag::UnknownTransition => Some(ReactionKind::UnknownTransition),
            ReactionTag::Transcription => Some(ReactionKind::Transcription),
            ReactionTag::Translation => Some(ReactionKind::Translation),
            ReactionTag::Transport => Some(ReactionKind::Transport),
            ReactionTag::HeterodimerAssociation => Some(ReactionKind::HeterodimerAssociation),
            ReactionTag::Dissociation => Some(ReactionKind::Dissociation),
            ReactionTag::Truncation => Some(ReactionKind::Truncation),
            _ => None,
        }
    }
}

/// The modifier family vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    Catalyzer,
    UnknownCatalyzer,
    Inhibitor,
    UnknownInhibitor,
    PhysicalStimulator,
    Modulator,
    Trigger,
}

impl From<ModifierTag> for ModifierKind {
    fn from(tag: ModifierTag) -> Self {
        match tag {
            ModifierTag::Catalysis => ModifierKind::Catalyzer,
            ModifierTag::UnknownCatalysis => ModifierKind::UnknownCatalyzer,
            ModifierTag::Inhibition => ModifierKind::Inhibitor,
            ModifierTag::UnknownInhibition => ModifierKind::UnknownInhibitor,
            ModifierTag::PhysicalStimulation => ModifierKind::PhysicalStimulator,
            ModifierTag::Modulation => ModifierKind::Modulator,
            ModifierTag::Trigger => ModifierKind::Trigger,
        }
    }
}

/// The reduced-notation influence family vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModulationKind {
    Catalysis,
    UnknownCatalysis,
    Inhibition,
    UnknownInhibition,
    PhysicalStimulation,
    Modulation,
    Triggering,
    PositiveInfluence,
    NegativeInfluence,
}

impl ModulationKind {
    /// Maps a document reaction tag to the influence family, when it is one.
    pub fn from_tag(tag: ReactionTag) -> Option<Self> {
        match tag {
            ReactionTag::Catalysis => Some(ModulationKind::Catalysis),
            ReactionTag::UnknownCatalysis => Some(ModulationKind::UnknownCatalysis),
            ReactionTag::Inhibition => Some(ModulationKind::Inhibition),
            ReactionTag::UnknownInhibition => Some(ModulationKind::UnknownInhibition),
            ReactionTag::PhysicalStimulation => Some(ModulationKind::PhysicalStimulation),
            ReactionTag::Modulation => Some(ModulationKind::Modulation),
            ReactionTag::Trigger => Some(ModulationKind::Triggering),
            ReactionTag::PositiveInfluence => Some(ModulationKind::PositiveInfluence),
            ReactionTag::NegativeInfluence => Some(ModulationKind::NegativeInfluence),
            _ => None,
        }
    }

    /// The influence driven by a gate member's modification tag.
    pub fn from_modifier_tag(tag: ModifierTag) -> Self {
        match tag {
            ModifierTag::Catalysis => ModulationKind::Catalysis,
            ModifierTag::UnknownCatalysis => ModulationKind::UnknownCatalysis,
            ModifierTag::Inhibition => ModulationKind::Inhibition,
            ModifierTag::UnknownInhibition => ModulationKind::UnknownInhibition,
            ModifierTag::PhysicalStimulation => ModulationKind::PhysicalStimulation,
            ModifierTag::Modulation => ModulationKind::Modulation,
            ModifierTag::Trigger => ModulationKind::Triggering,
        }
    }
}

/// One reactant or product of a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    species: Id,
    alias: Id,
}

impl Participant {
    pub fn new(species: Id, alias: Id) -> Self {
        Self { species, alias }
    }

    /// The participating species.
    pub fn species(&self) -> Id {
        self.species
    }

    /// The visual occurrence the connector attaches to.
    pub fn alias(&self) -> Id {
        self.alias
    }
}

/// A regulator attached to one reaction.
///
/// The source is a species or, for gate-driven modifiers, a boolean gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modifier {
    kind: ModifierKind,
    source: Id,
}

impl Modifier {
    pub fn new(kind: ModifierKind, source: Id) -> Self {
        Self { kind, source }
    }

    pub fn kind(&self) -> ModifierKind {
        self.kind
    }

    /// The referred species or gate.
    pub fn source(&self) -> Id {
        self.source
    }
}

/// A process reaction in the model graph.
#[derive(Debug, Clone)]
pub struct Reaction {
    id: Id,
    kind: ReactionKind,
    reversible: bool,
    reactants: Vec<Participant>,
    products: Vec<Participant>,
    modifiers: Vec<Modifier>,
    gates: Vec<Id>,
}

impl Reaction {
    pub fn new(
        id: Id,
        kind: ReactionKind,
        reversible: bool,
        reactants: Vec<Participant>,
        products: Vec<Participant>,
    ) -> Self {
        Self {
            id,
            kind,
            reversible,
            reactants,
            products,
            modifiers: Vec::new(),
            gates: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> ReactionKind {
        self.kind
    }

    pub fn reversible(&self) -> bool {
        self.reversible
    }

    /// All reactants: base participants first, linked ones after.
    pub fn reactants(&self) -> &[Participant] {
        &self.reactants
    }

    /// All products: base participants first, linked ones after.
    pub fn products(&self) -> &[Participant] {
        &self.products
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// Gates feeding this reaction's modifiers.
    pub fn gates(&self) -> &[Id] {
        &self.gates
    }

    /// Owner appends during construction.
    pub(crate) fn push_reactant(&mut self, participant: Participant) {
        self.reactants.push(participant);
    }

    pub(crate) fn push_product(&mut self, participant: Participant) {
        self.products.push(participant);
    }

    pub(crate) fn push_modifier(&mut self, modifier: Modifier) {
        self.modifiers.push(modifier);
    }

    pub(crate) fn push_gate(&mut self, gate: Id) {
        self.gates.push(gate);
    }
}

/// A reduced-notation influence: one source regulating one target, outside
/// any process reaction.
#[derive(Debug, Clone)]
pub struct Modulation {
    id: Id,
    kind: ModulationKind,
    source: Id,
    target: Id,
    gate: Option<Id>,
}

impl Modulation {
    pub fn new(id: Id, kind: ModulationKind, source: Id, target: Id, gate: Option<Id>) -> Self {
        Self {
            id,
            kind,
            source,
            target,
            gate,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> ModulationKind {
        self.kind
    }

    /// The regulating species or gate.
    pub fn source(&self) -> Id {
        self.source
    }

    /// The regulated species.
    pub fn target(&self) -> Id {
        self.target
    }

    /// The gate behind the source, for gate-driven influences.
    pub fn gate(&self) -> Option<Id> {
        self.gate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_kind_from_tag() {
        assert_eq!(
            ReactionKind::from_tag(ReactionTag::Transport),
            Some(ReactionKind::Transport)
        );
        assert_eq!(ReactionKind::from_tag(ReactionTag::Catalysis), None);
    }

    #[test]
    fn test_modulation_kind_from_tag() {
        assert_eq!(
            ModulationKind::from_tag(ReactionTag::Trigger),
            Some(ModulationKind::Triggering)
        );
        assert_eq!(ModulationKind::from_tag(ReactionTag::StateTransition), None);
    }

    #[test]
    fn test_modifier_kind_mapping() {
        assert_eq!(
            ModifierKind::from(ModifierTag::Catalysis),
            ModifierKind::Catalyzer
        );
        assert_eq!(
            ModifierKind::from(ModifierTag::UnknownInhibition),
            ModifierKind::UnknownInhibitor
        );
    }

    #[test]
    fn test_reaction_owner_appends() {
        let mut reaction = Reaction::new(
            Id::new("re1"),
            ReactionKind::StateTransition,
            true,
            vec![Participant::new(Id::new("s1"), Id::new("sa1"))],
            vec![Participant::new(Id::new("s2"), Id::new("sa2"))],
        );
        reaction.push_modifier(Modifier::new(ModifierKind::Catalyzer, Id::new("s3")));
        reaction.push_gate(Id::new("gate_0"));

        assert_eq!(reaction.modifiers().len(), 1);
        assert_eq!(reaction.gates(), &[Id::new("gate_0")]);
    }
}
