//! Shared fixture builders for the integration suites.
#![allow(dead_code)]

use plastid::document::{
    Activity, CompartmentAliasSpec, CompartmentClass, CompartmentSpec, Document, IdentitySpec,
    MetadataEntry, ParticipantSpec, RawBounds, ReactionSpec, ReactionTag, ResidueSpec,
    SpeciesAliasSpec, SpeciesClass, SpeciesSpec, TemplateFamily, TemplateSpec,
};

pub fn bounds(x: f64, y: f64, width: f64, height: f64) -> RawBounds {
    RawBounds {
        x,
        y,
        width,
        height,
    }
}

pub fn compartment(id: &str, name: &str, outside: Option<&str>) -> CompartmentSpec {
    CompartmentSpec {
        id: id.to_owned(),
        name: Some(name.to_owned()),
        outside: outside.map(str::to_owned),
        metadata: Vec::new(),
    }
}

pub fn compartment_alias(id: &str, compartment: &str, bounds: RawBounds) -> CompartmentAliasSpec {
    CompartmentAliasSpec {
        id: id.to_owned(),
        compartment: compartment.to_owned(),
        class: CompartmentClass::Square,
        bounds,
    }
}

pub fn species(id: &str, name: &str, compartment: Option<&str>, class: SpeciesClass) -> SpeciesSpec {
    SpeciesSpec {
        id: id.to_owned(),
        name: Some(name.to_owned()),
        compartment: compartment.map(str::to_owned),
        identity: IdentitySpec::of_class(class),
        metadata: Vec::new(),
    }
}

pub fn species_alias(id: &str, species: &str, bounds: RawBounds) -> SpeciesAliasSpec {
    SpeciesAliasSpec {
        id: id.to_owned(),
        species: species.to_owned(),
        compartment_alias: None,
        complex_alias: None,
        bounds,
        activity: Activity::Inactive,
    }
}

pub fn template(id: &str, family: TemplateFamily, residues: &[&str]) -> TemplateSpec {
    TemplateSpec {
        id: id.to_owned(),
        family,
        name: Some(id.to_owned()),
        residues: residues
            .iter()
            .map(|residue| ResidueSpec {
                id: (*residue).to_owned(),
                name: None,
                angle: None,
            })
            .collect(),
        metadata: Vec::new(),
    }
}

pub fn participant(species: &str, alias: &str) -> ParticipantSpec {
    ParticipantSpec {
        species: species.to_owned(),
        alias: alias.to_owned(),
        anchor: None,
    }
}

pub fn reaction(id: &str, kind: ReactionTag) -> ReactionSpec {
    ReactionSpec {
        id: id.to_owned(),
        kind,
        reversible: true,
        base_reactants: Vec::new(),
        base_products: Vec::new(),
        reactant_links: Vec::new(),
        product_links: Vec::new(),
        edit_points: Vec::new(),
        modifiers: Vec::new(),
        gate_members: Vec::new(),
        metadata: Vec::new(),
    }
}

pub fn metadata(qualifier: &str, uris: &[&str]) -> MetadataEntry {
    MetadataEntry {
        qualifier: qualifier.to_owned(),
        resources: uris.iter().map(|uri| (*uri).to_owned()).collect(),
    }
}

/// A compartment, two positioned species, and nothing else: the smallest
/// document a reaction test can build on.
pub fn two_species_document() -> Document {
    let mut doc = Document::default();
    doc.compartments.push(compartment("c1", "cytosol", None));
    doc.compartment_aliases
        .push(compartment_alias("ca1", "c1", bounds(0.0, 0.0, 400.0, 300.0)));
    doc.species.push(species(
        "s1",
        "A",
        Some("c1"),
        SpeciesClass::SimpleMolecule,
    ));
    doc.species.push(species(
        "s2",
        "B",
        Some("c1"),
        SpeciesClass::SimpleMolecule,
    ));
    doc.species_aliases
        .push(species_alias("sa1", "s1", bounds(0.0, 0.0, 20.0, 10.0)));
    doc.species_aliases
        .push(species_alias("sa2", "s2", bounds(100.0, 0.0, 20.0, 10.0)));
    doc
}
