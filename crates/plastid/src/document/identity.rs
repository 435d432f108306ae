//! Species identity: class tag, template reference, and state block.

use serde::{Deserialize, Serialize};

/// The species class vocabulary of the source format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpeciesClass {
    Protein,
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

/// The identity block distinguishing what a species is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentitySpec {
    pub class: SpeciesClass,
    /// Reference to the shared template, for templated classes.
    #[serde(default)]
    pub template: Option<String>,
    /// Marks a species whose existence is hypothesized, not observed.
    #[serde(default)]
    pub hypothetical: Option<bool>,
    #[serde(default)]
    pub state: Option<StateSpec>,
}

impl IdentitySpec {
    /// A bare identity with just a class tag.
    pub fn of_class(class: SpeciesClass) -> Self {
        Self {
            class,
            template: None,
            hypothetical: None,
            state: None,
        }
    }
}

/// The state block of a species identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSpec {
    /// Number of identical subunits when the species is a homomultimer.
    pub homomultimer: Option<u32>,
    pub structural_state: Option<StructuralStateSpec>,
    /// Explicit residue states; residues the species does not mention stay
    /// in the empty state.
    pub modifications: Vec<ResidueStateSpec>,
}

/// A structural state such as "open" or "closed", with its decoration angle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralStateSpec {
    pub value: String,
    #[serde(default)]
    pub angle: Option<f64>,
}

/// An explicit residue-state assignment on a species.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResidueStateSpec {
    /// The residue's template-local ID.
    pub residue: String,
    pub state: ResidueState,
}

/// The residue modification-state vocabulary of the source format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResidueState {
    #[serde(rename = "phosphorylated")]
    Phosphorylated,
    #[serde(rename = "acetylated")]
    Acetylated,
    #[serde(rename = "ubiquitinated")]
    Ubiquitinated,
    #[serde(rename = "methylated")]
    Methylated,
    #[serde(rename = "hydroxylated")]
    Hydroxylated,
    #[serde(rename = "glycosylated")]
    Glycosylated,
    #[serde(rename = "myristoylated")]
    Myristoylated,
    #[serde(rename = "palmitoylated")]
    Palmitoylated,
    #[serde(rename = "prenylated")]
    Prenylated,
    #[serde(rename = "protonated")]
    Protonated,
    #[serde(rename = "sulfated")]
    Sulfated,
    #[serde(rename = "don't care")]
    DontCare,
    #[serde(rename = "unknown")]
    Unknown,
    #[default]
    #[serde(rename = "empty")]
    Empty,
}
