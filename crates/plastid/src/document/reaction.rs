//! Reaction elements: participants, connective geometry, modifier entries,
//! and boolean-gate members.

use serde::{Deserialize, Serialize};

use super::{MetadataEntry, RawPoint};

/// The reaction kind vocabulary.
///
/// The first group are process reactions; the second group are
/// reduced-notation influences that connect a source species directly to a
/// target species; the gate marker flags a reaction whose meaning lives in
/// its gate members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionTag {
    StateTransition,
    KnownTransitionOmitted,
    UnknownTransition,
    Transcription,
    Translation,
    Transport,
    HeterodimerAssociation,
    Dissociation,
    Truncation,
    Catalysis,
    UnknownCatalysis,
    Inhibition,
    UnknownInhibition,
    PhysicalStimulation,
    Modulation,
    Trigger,
    PositiveInfluence,
    NegativeInfluence,
    BooleanLogicGate,
}

impl ReactionTag {
    /// Returns true for reduced-notation influence kinds.
    pub fn is_influence(self) -> bool {
        matches!(
            self,
            ReactionTag::Catalysis
                | ReactionTag::UnknownCatalysis
                | ReactionTag::Inhibition
                | ReactionTag::UnknownInhibition
                | ReactionTag::PhysicalStimulation
                | ReactionTag::Modulation
                | ReactionTag::Trigger
                | ReactionTag::PositiveInfluence
                | ReactionTag::NegativeInfluence
                | ReactionTag::BooleanLogicGate
        )
    }
}

/// The modifier kind vocabulary used by modifier entries and gate members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModifierTag {
    Catalysis,
    UnknownCatalysis,
    Inhibition,
    UnknownInhibition,
    PhysicalStimulation,
    Modulation,
    Trigger,
}

/// The boolean logic gate vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateTag {
    #[serde(rename = "BOOLEAN_LOGIC_GATE_AND")]
    And,
    #[serde(rename = "BOOLEAN_LOGIC_GATE_OR")]
    Or,
    #[serde(rename = "BOOLEAN_LOGIC_GATE_NOT")]
    Not,
    #[serde(rename = "BOOLEAN_LOGIC_GATE_UNKNOWN")]
    Unknown,
}

/// A base reactant or base product of a reaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantSpec {
    /// The semantic species taking part.
    pub species: String,
    /// The visual occurrence the connector attaches to.
    pub alias: String,
    /// Explicit anchor name on the occurrence's shape, if the document
    /// pinned one; compass vocabulary (`N`, `NNE`, ...).
    #[serde(default)]
    pub anchor: Option<String>,
}

/// An additional reactant or product link beyond the base participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSpec {
    pub species: String,
    pub alias: String,
    #[serde(default)]
    pub anchor: Option<String>,
    /// Intermediate connector points, frame-local.
    #[serde(default)]
    pub edit_points: Vec<RawPoint>,
}

/// The discriminant of a modifier entry: either a plain modifier kind or a
/// boolean gate aggregating several inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModifierEntryTag {
    Gate(GateTag),
    Plain(ModifierTag),
}

/// One entry of a reaction's modifier list.
///
/// A plain entry names one modifying species. A gate entry names every input
/// of the gate in `species`/`aliases` (the document stores them as one
/// comma-separated attribute; the deserializer tokenizes) and carries the
/// modifier kind the gate drives in `modification`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierSpec {
    pub kind: ModifierEntryTag,
    /// Modifying species; one entry for plain modifiers, the ordered input
    /// list for gates. A gate input may name an earlier gate entry's input
    /// list position instead of a species.
    pub species: Vec<String>,
    /// Visual occurrences paired with `species`.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// The modifier kind a gate drives; unset on plain entries.
    #[serde(default)]
    pub modification: Option<ModifierTag>,
    #[serde(default)]
    pub anchor: Option<String>,
    #[serde(default)]
    pub edit_points: Vec<RawPoint>,
}

/// One gate member of a reduced-notation influence reaction.
///
/// Influence reactions express their gate through members rather than
/// modifier entries: the gate member carries the gate tag and the influence
/// kind the gate drives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateMemberSpec {
    pub gate: GateTag,
    /// The influence kind driven by the gate.
    pub modification: ModifierTag,
    /// Ordered gate inputs.
    pub species: Vec<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub edit_points: Vec<RawPoint>,
}

/// A reaction element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionSpec {
    pub id: String,
    pub kind: ReactionTag,
    #[serde(default = "default_reversible")]
    pub reversible: bool,
    #[serde(default)]
    pub base_reactants: Vec<ParticipantSpec>,
    #[serde(default)]
    pub base_products: Vec<ParticipantSpec>,
    #[serde(default)]
    pub reactant_links: Vec<LinkSpec>,
    #[serde(default)]
    pub product_links: Vec<LinkSpec>,
    /// Intermediate points of the main connector, frame-local.
    #[serde(default)]
    pub edit_points: Vec<RawPoint>,
    #[serde(default)]
    pub modifiers: Vec<ModifierSpec>,
    #[serde(default)]
    pub gate_members: Vec<GateMemberSpec>,
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

fn default_reversible() -> bool {
    true
}
