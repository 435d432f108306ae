//! The native element tree of a parsed pathway document.
//!
//! This module is the converter's input contract. An external deserializer
//! turns raw bytes into a [`Document`]; the converter only ever reads fields
//! from it. Every type derives `Serialize`/`Deserialize` so a serde-based
//! deserializer can produce the tree directly.
//!
//! IDs are plain strings here. The flat document namespace holds every
//! top-level ID; nested items (modification residues) carry IDs that are
//! only locally unique, and the converter widens them to composite IDs.

pub mod identity;
pub mod reaction;

pub use identity::{
    IdentitySpec, ResidueState, ResidueStateSpec, SpeciesClass, StateSpec, StructuralStateSpec,
};
pub use reaction::{
    GateMemberSpec, GateTag, LinkSpec, ModifierEntryTag, ModifierSpec, ModifierTag,
    ParticipantSpec, ReactionSpec, ReactionTag,
};

use serde::{Deserialize, Serialize};

/// A complete parsed pathway document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Canvas dimensions declared by the document, if any.
    pub canvas: Option<CanvasSpec>,
    /// Semantic compartments.
    pub compartments: Vec<CompartmentSpec>,
    /// Visual occurrences of compartments.
    pub compartment_aliases: Vec<CompartmentAliasSpec>,
    /// Species templates across all seven families.
    pub templates: Vec<TemplateSpec>,
    /// Top-level semantic species.
    pub species: Vec<SpeciesSpec>,
    /// Species that only exist inside a complex.
    pub included_species: Vec<IncludedSpeciesSpec>,
    /// Visual occurrences of non-complex species.
    pub species_aliases: Vec<SpeciesAliasSpec>,
    /// Visual occurrences of complex species.
    pub complex_aliases: Vec<ComplexAliasSpec>,
    /// Reactions, including reduced-notation influences.
    pub reactions: Vec<ReactionSpec>,
}

/// Declared canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSpec {
    pub width: f64,
    pub height: f64,
}

/// A rectangle in document coordinates: top-left corner plus extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBounds {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "w")]
    pub width: f64,
    #[serde(rename = "h")]
    pub height: f64,
}

/// A point in document or frame-local coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub x: f64,
    pub y: f64,
}

/// One qualifier-tagged group of external resource URIs from an embedded
/// metadata block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// The relation qualifier, e.g. `is` or `hasPart`.
    pub qualifier: String,
    /// External resource URIs the qualifier applies to.
    pub resources: Vec<String>,
}

/// A semantic compartment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompartmentSpec {
    pub id: String,
    pub name: Option<String>,
    /// The enclosing compartment's ID, if nested.
    pub outside: Option<String>,
    pub metadata: Vec<MetadataEntry>,
}

/// Rendering class of a compartment alias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompartmentClass {
    #[default]
    Square,
    Oval,
}

/// A visual occurrence of a compartment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompartmentAliasSpec {
    pub id: String,
    /// The compartment this alias draws.
    pub compartment: String,
    pub class: CompartmentClass,
    pub bounds: RawBounds,
}

/// The template family vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateFamily {
    Generic,
    IonChannel,
    Receptor,
    Truncated,
    Gene,
    Rna,
    AntisenseRna,
}

/// A nested modification-residue declaration on a template.
///
/// The `id` is only unique within the owning template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResidueSpec {
    pub id: String,
    pub name: Option<String>,
    /// Angular placement of the residue decoration, in radians.
    pub angle: Option<f64>,
}

/// A species template: the reusable definition many species share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub id: String,
    pub family: TemplateFamily,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub residues: Vec<ResidueSpec>,
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

/// A top-level semantic species.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesSpec {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// The containing compartment's ID.
    #[serde(default)]
    pub compartment: Option<String>,
    pub identity: IdentitySpec,
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

/// A species that exists only as a component of a complex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncludedSpeciesSpec {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// The complex species owning this component.
    pub complex_species: String,
    pub identity: IdentitySpec,
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

/// Activity marker on an alias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    #[default]
    Inactive,
    Active,
}

/// A visual occurrence of a non-complex species.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesAliasSpec {
    pub id: String,
    /// The species this alias draws.
    pub species: String,
    /// The compartment alias this occurrence sits in, if any.
    #[serde(default)]
    pub compartment_alias: Option<String>,
    /// Back-reference to the complex alias this occurrence is a member of.
    #[serde(default)]
    pub complex_alias: Option<String>,
    pub bounds: RawBounds,
    #[serde(default)]
    pub activity: Activity,
}

/// A visual occurrence of a complex species.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexAliasSpec {
    pub id: String,
    /// The complex species this alias draws.
    pub species: String,
    #[serde(default)]
    pub compartment_alias: Option<String>,
    /// Complex aliases may themselves be members of an enclosing complex.
    #[serde(default)]
    pub complex_alias: Option<String>,
    pub bounds: RawBounds,
    #[serde(default)]
    pub activity: Activity,
}
