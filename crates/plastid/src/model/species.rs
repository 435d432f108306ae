//! Species: the entities of the model graph.

use plastid_core::identifier::Id;

pub use crate::document::identity::ResidueState;
use crate::document::identity::SpeciesClass;
use crate::model::element::TemplateKind;

/// The species family vocabulary of the model graph.
///
/// Protein families are split by their template kind; the remaining
/// families map one-to-one from the document's class tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeciesKind {
    GenericProtein,
    IonChannelProtein,
    ReceptorProtein,
    TruncatedProtein,
    Gene,
    Rna,
    AntisenseRna,
    Phenotype,
    Ion,
    SimpleMolecule,
    Drug,
    Unknown,
    Complex,
    Degraded,
}

impl SpeciesKind {
    /// Derives the model kind from a document class tag and the template
    /// kind it resolved to, when any.
    pub fn from_class(class: SpeciesClass, template: Option<TemplateKind>) -> Self {
        match (class, template) {
            (SpeciesClass::Protein, Some(TemplateKind::IonChannelProtein)) => {
                SpeciesKind::IonChannelProtein
            }
            (SpeciesClass::Protein, Some(TemplateKind::ReceptorProtein)) => {
                SpeciesKind::ReceptorProtein
            }
            (SpeciesClass::Protein, Some(TemplateKind::TruncatedProtein)) => {
                SpeciesKind::TruncatedProtein
            }
            (SpeciesClass::Protein, _) => SpeciesKind::GenericProtein,
            (SpeciesClass::Gene, _) => SpeciesKind::Gene,
            (SpeciesClass::Rna, _) => SpeciesKind::Rna,
            (SpeciesClass::AntisenseRna, _) => SpeciesKind::AntisenseRna,
            (SpeciesClass::Phenotype, _) => SpeciesKind::Phenotype,
            (SpeciesClass::Ion, _) => SpeciesKind::Ion,
            (SpeciesClass::SimpleMolecule, _) => SpeciesKind::SimpleMolecule,
            (SpeciesClass::Drug, _) => SpeciesKind::Drug,
            (SpeciesClass::Unknown, _) => SpeciesKind::Unknown,
            (SpeciesClass::Complex, _) => SpeciesKind::Complex,
            (SpeciesClass::Degraded, _) => SpeciesKind::Degraded,
        }
    }
}

/// One residue-state assignment on a species.
///
/// Every residue declared by the species' template appears exactly once in
/// the species' modification list: explicitly overridden states keep the
/// document's value, all other residues carry the empty state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modification {
    residue: Id,
    state: ResidueState,
}

impl Modification {
    pub fn new(residue: Id, state: ResidueState) -> Self {
        Self { residue, state }
    }

    /// The residue's composite ID.
    pub fn residue(&self) -> Id {
        self.residue
    }

    pub fn state(&self) -> ResidueState {
        self.state
    }
}

/// A structural state such as "open" or "closed". Carries no layout.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralState {
    value: String,
    angle: Option<f64>,
}

impl StructuralState {
    pub fn new(value: String, angle: Option<f64>) -> Self {
        Self { value, angle }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn angle(&self) -> Option<f64> {
        self.angle
    }
}

/// A species in the model graph.
///
/// Covers top-level species and complex components alike; components are
/// referenced from their owning complex through [`Species::components`] on
/// the owner.
#[derive(Debug, Clone)]
pub struct Species {
    id: Id,
    kind: SpeciesKind,
    name: Option<String>,
    compartment: Option<Id>,
    template: Option<Id>,
    homomultimer: u32,
    hypothetical: bool,
    active: bool,
    structural_state: Option<StructuralState>,
    modifications: Vec<Modification>,
    components: Vec<Id>,
}

impl Species {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Id,
        kind: SpeciesKind,
        name: Option<String>,
        compartment: Option<Id>,
        template: Option<Id>,
        homomultimer: u32,
        hypothetical: bool,
        active: bool,
        structural_state: Option<StructuralState>,
        modifications: Vec<Modification>,
    ) -> Self {
        Self {
            id,
            kind,
            name,
            compartment,
            template,
            homomultimer,
            hypothetical,
            active,
            structural_state,
            modifications,
            components: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> SpeciesKind {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The containing compartment.
    pub fn compartment(&self) -> Option<Id> {
        self.compartment
    }

    /// The shared template this species was built from.
    pub fn template(&self) -> Option<Id> {
        self.template
    }

    /// Number of identical subunits; 1 for non-multimers.
    pub fn homomultimer(&self) -> u32 {
        self.homomultimer
    }

    pub fn hypothetical(&self) -> bool {
        self.hypothetical
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn structural_state(&self) -> Option<&StructuralState> {
        self.structural_state.as_ref()
    }

    /// Residue states, one entry per template-declared residue.
    pub fn modifications(&self) -> &[Modification] {
        &self.modifications
    }

    /// Component species of a complex, in member order.
    pub fn components(&self) -> &[Id] {
        &self.components
    }

    /// Owner append during complex construction.
    pub(crate) fn push_component(&mut self, component: Id) {
        self.components.push(component);
    }
}
