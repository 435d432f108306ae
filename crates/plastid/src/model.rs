//! The semantic model graph.
//!
//! Model elements are stored arena-style in a single ID-keyed table; every
//! cross-link between elements is an [`Id`], never a direct reference. The
//! families:
//!
//! - [`Compartment`] - containers species live in
//! - [`SpeciesTemplate`] / [`ModificationResidue`] - shared definitions
//! - [`Species`] - entities, including complexes and their components
//! - [`Reaction`] / [`Modifier`] - processes and their regulators
//! - [`Modulation`] - reduced-notation influences
//! - [`BooleanGate`] - synthetic regulatory aggregators

pub mod element;
pub mod reaction;
pub mod species;

pub use element::{
    BooleanGate, Compartment, GateKind, ModificationResidue, SpeciesTemplate, TemplateKind,
};
pub use reaction::{
    Modifier, ModifierKind, Modulation, ModulationKind, Participant, Reaction, ReactionKind,
};
pub use species::{Modification, Species, SpeciesKind, StructuralState};

use indexmap::IndexMap;

use plastid_core::identifier::Id;

/// One element of the model graph.
#[derive(Debug, Clone)]
pub enum ModelElement {
    Compartment(Compartment),
    Template(SpeciesTemplate),
    Residue(ModificationResidue),
    Species(Species),
    Reaction(Reaction),
    Modulation(Modulation),
    Gate(BooleanGate),
}

impl ModelElement {
    /// The element's ID (native, composite, or synthesized).
    pub fn id(&self) -> Id {
        match self {
            ModelElement::Compartment(element) => element.id(),
            ModelElement::Template(element) => element.id(),
            ModelElement::Residue(element) => element.id(),
            ModelElement::Species(element) => element.id(),
            ModelElement::Reaction(element) => element.id(),
            ModelElement::Modulation(element) => element.id(),
            ModelElement::Gate(element) => element.id(),
        }
    }

    /// A short family name for logging and diagnostics.
    pub fn family(&self) -> &'static str {
        match self {
            ModelElement::Compartment(_) => "compartment",
            ModelElement::Template(_) => "template",
            ModelElement::Residue(_) => "residue",
            ModelElement::Species(_) => "species",
            ModelElement::Reaction(_) => "reaction",
            ModelElement::Modulation(_) => "modulation",
            ModelElement::Gate(_) => "gate",
        }
    }
}

/// The ID-keyed model graph.
///
/// Iteration order is lexicographic by resolved ID once the graph is frozen;
/// during construction it is insertion order.
#[derive(Debug, Clone, Default)]
pub struct ModelGraph {
    elements: IndexMap<Id, ModelElement>,
}

impl ModelGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up any element by ID.
    pub fn get(&self, id: Id) -> Option<&ModelElement> {
        self.elements.get(&id)
    }

    /// Returns true when an element is registered under `id`.
    pub fn contains(&self, id: Id) -> bool {
        self.elements.contains_key(&id)
    }

    /// The total number of elements across all families.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true when the graph holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over every element.
    pub fn iter(&self) -> impl Iterator<Item = (Id, &ModelElement)> {
        self.elements.iter().map(|(id, element)| (*id, element))
    }

    /// The compartment registered under `id`, if any.
    pub fn compartment(&self, id: Id) -> Option<&Compartment> {
        match self.elements.get(&id)? {
            ModelElement::Compartment(element) => Some(element),
            _ => None,
        }
    }

    /// The template registered under `id`, if any.
    pub fn template(&self, id: Id) -> Option<&SpeciesTemplate> {
        match self.elements.get(&id)? {
            ModelElement::Template(element) => Some(element),
            _ => None,
        }
    }

    /// The species registered under `id`, if any.
    pub fn species_by_id(&self, id: Id) -> Option<&Species> {
        match self.elements.get(&id)? {
            ModelElement::Species(element) => Some(element),
            _ => None,
        }
    }

    /// The reaction registered under `id`, if any.
    pub fn reaction(&self, id: Id) -> Option<&Reaction> {
        match self.elements.get(&id)? {
            ModelElement::Reaction(element) => Some(element),
            _ => None,
        }
    }

    /// The gate registered under `id`, if any.
    pub fn gate(&self, id: Id) -> Option<&BooleanGate> {
        match self.elements.get(&id)? {
            ModelElement::Gate(element) => Some(element),
            _ => None,
        }
    }

    /// All compartments, in graph order.
    pub fn compartments(&self) -> impl Iterator<Item = &Compartment> {
        self.elements.values().filter_map(|element| match element {
            ModelElement::Compartment(compartment) => Some(compartment),
            _ => None,
        })
    }

    /// All templates, in graph order.
    pub fn templates(&self) -> impl Iterator<Item = &SpeciesTemplate> {
        self.elements.values().filter_map(|element| match element {
            ModelElement::Template(template) => Some(template),
            _ => None,
        })
    }

    /// All species, in graph order.
    pub fn species(&self) -> impl Iterator<Item = &Species> {
        self.elements.values().filter_map(|element| match element {
            ModelElement::Species(species) => Some(species),
            _ => None,
        })
    }

    /// All reactions, in graph order.
    pub fn reactions(&self) -> impl Iterator<Item = &Reaction> {
        self.elements.values().filter_map(|element| match element {
            ModelElement::Reaction(reaction) => Some(reaction),
            _ => None,
        })
    }

    /// All modulations, in graph order.
    pub fn modulations(&self) -> impl Iterator<Item = &Modulation> {
        self.elements.values().filter_map(|element| match element {
            ModelElement::Modulation(modulation) => Some(modulation),
            _ => None,
        })
    }

    /// All boolean gates, in graph order.
    pub fn gates(&self) -> impl Iterator<Item = &BooleanGate> {
        self.elements.values().filter_map(|element| match element {
            ModelElement::Gate(gate) => Some(gate),
            _ => None,
        })
    }

    /// Registers an element under its ID. The first registration wins;
    /// re-registering the same ID is a caller bug.
    pub(crate) fn insert(&mut self, element: ModelElement) {
        let id = element.id();
        debug_assert!(
            !self.elements.contains_key(&id),
            "model element registered twice: {id}"
        );
        self.elements.insert(id, element);
    }

    /// Mutable access for owner appends during construction.
    pub(crate) fn get_mut(&mut self, id: Id) -> Option<&mut ModelElement> {
        self.elements.get_mut(&id)
    }

    /// Sorts elements lexicographically by resolved ID. Called once when the
    /// map is frozen.
    pub(crate) fn freeze(&mut self) {
        self.elements
            .sort_by(|a, _, b, _| a.resolve().cmp(&b.resolve()));
    }
}
