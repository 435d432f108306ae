//! The ID index: one pass over the native tree before any element is built.
//!
//! The index gives every later phase O(1) resolution from a native ID to the
//! element that declares it, as a typed position into the document's arrays
//! rather than a reference into the tree. It also pre-computes complex
//! membership by inverting the member-of back-references on aliases; a
//! back-reference whose target the document never defines makes the whole
//! document unusable and aborts the conversion.

use indexmap::IndexMap;

use log::debug;

use plastid_core::identifier::Id;

use crate::{document::Document, error::ConvertError};

/// A typed position of a native element inside the document.
///
/// Indices, not pointers: holding a `NativeRef` never borrows the document.
/// The nested variants address constructs that carry no document-level ID of
/// their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum NativeRef {
    Compartment(usize),
    CompartmentAlias(usize),
    Template(usize),
    Residue { template: usize, residue: usize },
    Species(usize),
    IncludedSpecies(usize),
    SpeciesAlias(usize),
    ComplexAlias(usize),
    Reaction(usize),
    /// One entry of a reaction's modifier list.
    Modifier { reaction: usize, entry: usize },
    /// One gate member of an influence reaction.
    GateMember { reaction: usize, member: usize },
}

/// The read-only ID index produced by the pre-pass.
#[derive(Debug, Default)]
pub(crate) struct IdIndex {
    elements: IndexMap<Id, NativeRef>,
    complex_members: IndexMap<Id, Vec<Id>>,
}

impl IdIndex {
    /// Runs the index pass over the document.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MissingReference`] when an alias declares
    /// membership in a complex alias the document does not define.
    pub(crate) fn build(doc: &Document) -> Result<Self, ConvertError> {
        let mut index = Self::default();

        for (i, compartment) in doc.compartments.iter().enumerate() {
            index.insert(&compartment.id, NativeRef::Compartment(i));
        }
        for (i, alias) in doc.compartment_aliases.iter().enumerate() {
            index.insert(&alias.id, NativeRef::CompartmentAlias(i));
        }
        for (i, template) in doc.templates.iter().enumerate() {
            let template_id = index.insert(&template.id, NativeRef::Template(i));
            for (j, residue) in template.residues.iter().enumerate() {
                index.elements.insert(
                    template_id.composite(&residue.id),
                    NativeRef::Residue {
                        template: i,
                        residue: j,
                    },
                );
            }
        }
        for (i, species) in doc.species.iter().enumerate() {
            index.insert(&species.id, NativeRef::Species(i));
        }
        for (i, species) in doc.included_species.iter().enumerate() {
            index.insert(&species.id, NativeRef::IncludedSpecies(i));
        }
        for (i, alias) in doc.species_aliases.iter().enumerate() {
            index.insert(&alias.id, NativeRef::SpeciesAlias(i));
        }
        for (i, alias) in doc.complex_aliases.iter().enumerate() {
            index.insert(&alias.id, NativeRef::ComplexAlias(i));
        }
        for (i, reaction) in doc.reactions.iter().enumerate() {
            index.insert(&reaction.id, NativeRef::Reaction(i));
        }

        index.collect_complex_members(doc)?;

        debug!(
            elements = index.elements.len(),
            complexes = index.complex_members.len();
            "ID index built"
        );
        Ok(index)
    }

    fn insert(&mut self, id: &str, target: NativeRef) -> Id {
        let id = Id::new(id);
        self.elements.insert(id, target);
        id
    }

    /// Inverts the member-of back-references into per-complex member lists,
    /// preserving document order.
    fn collect_complex_members(&mut self, doc: &Document) -> Result<(), ConvertError> {
        let memberships = doc
            .species_aliases
            .iter()
            .filter_map(|alias| {
                alias
                    .complex_alias
                    .as_deref()
                    .map(|target| (alias.id.as_str(), target))
            })
            .chain(doc.complex_aliases.iter().filter_map(|alias| {
                alias
                    .complex_alias
                    .as_deref()
                    .map(|target| (alias.id.as_str(), target))
            }));

        for (member, target) in memberships {
            let member = Id::new(member);
            let target = Id::new(target);
            if !matches!(
                self.elements.get(&target),
                Some(NativeRef::ComplexAlias(_))
            ) {
                return Err(ConvertError::MissingReference {
                    referrer: member,
                    target,
                    role: "the enclosing complex alias",
                });
            }
            self.complex_members.entry(target).or_default().push(member);
        }
        Ok(())
    }

    /// Resolves a native ID to its element.
    pub(crate) fn get(&self, id: Id) -> Option<NativeRef> {
        self.elements.get(&id).copied()
    }

    /// Iterates every indexed ID.
    pub(crate) fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.elements.keys().copied()
    }

    /// The total number of indexed IDs.
    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    /// The ordered member aliases of a complex alias.
    pub(crate) fn complex_members(&self, complex_alias: Id) -> &[Id] {
        self.complex_members
            .get(&complex_alias)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
