//! End-to-end conversion tests over programmatically built documents.

mod common;

use common::*;

use float_cmp::approx_eq;

use plastid::{
    annotation::Qualifier,
    convert,
    diagnostic::DiagnosticKind,
    document::{
        Activity, CanvasSpec, ComplexAliasSpec, Document, IdentitySpec, IncludedSpeciesSpec,
        RawBounds, ReactionTag, ResidueState, ResidueStateSpec, SpeciesClass, StateSpec,
        TemplateFamily,
    },
    geometry::Point,
    identifier::Id,
    model::{ModulationKind, SpeciesKind},
    ConvertError,
};

#[test]
fn simple_molecule_round_trip() {
    let mut doc = Document::default();
    doc.compartments.push(compartment("C1", "cytosol", None));
    doc.compartment_aliases
        .push(compartment_alias("ca1", "C1", bounds(0.0, 0.0, 400.0, 300.0)));
    doc.species.push(species(
        "S1",
        "glucose",
        Some("C1"),
        SpeciesClass::SimpleMolecule,
    ));
    doc.species_aliases
        .push(species_alias("sa1", "S1", bounds(10.0, 20.0, 30.0, 15.0)));

    let map = convert(&doc).unwrap().into_strict().unwrap();

    let compartment = map.model().compartment(Id::new("C1")).unwrap();
    assert_eq!(compartment.name(), Some("cytosol"));
    assert_eq!(map.model().compartments().count(), 1);

    let species = map.model().species_by_id(Id::new("S1")).unwrap();
    assert_eq!(species.kind(), SpeciesKind::SimpleMolecule);
    assert_eq!(species.compartment(), Some(Id::new("C1")));

    let glyph = map.layout().glyph(Id::new("sa1")).unwrap();
    assert_eq!(glyph.position(), Point::new(25.0, 27.5));
    assert_eq!(glyph.width(), 30.0);
    assert_eq!(glyph.height(), 15.0);
}

#[test]
fn shared_outside_compartment_is_built_once() {
    let mut doc = Document::default();
    doc.compartments.push(compartment("outer", "extracellular", None));
    doc.compartments
        .push(compartment("c1", "cytosol", Some("outer")));
    doc.compartments
        .push(compartment("c2", "nucleus", Some("outer")));
    doc.species
        .push(species("s1", "A", Some("c1"), SpeciesClass::SimpleMolecule));
    doc.species
        .push(species("s2", "B", Some("c2"), SpeciesClass::SimpleMolecule));
    doc.species_aliases
        .push(species_alias("sa1", "s1", bounds(0.0, 0.0, 20.0, 10.0)));
    doc.species_aliases
        .push(species_alias("sa2", "s2", bounds(50.0, 0.0, 20.0, 10.0)));

    let map = convert(&doc).unwrap().into_strict().unwrap();

    assert_eq!(map.model().compartments().count(), 3);
    let c1 = map.model().compartment(Id::new("c1")).unwrap();
    let c2 = map.model().compartment(Id::new("c2")).unwrap();
    assert_eq!(c1.outside(), Some(Id::new("outer")));
    assert_eq!(c2.outside(), c1.outside());
}

#[test]
fn template_residues_materialize_empty_states() {
    let mut doc = Document::default();
    doc.templates.push(template(
        "pr1",
        TemplateFamily::Generic,
        &["rs1", "rs2"],
    ));
    let mut protein = species("s1", "p53", None, SpeciesClass::Protein);
    protein.identity = IdentitySpec {
        class: SpeciesClass::Protein,
        template: Some("pr1".to_owned()),
        hypothetical: None,
        state: Some(StateSpec {
            homomultimer: None,
            structural_state: None,
            modifications: vec![ResidueStateSpec {
                residue: "rs1".to_owned(),
                state: ResidueState::Phosphorylated,
            }],
        }),
    };
    doc.species.push(protein);
    doc.species_aliases
        .push(species_alias("sa1", "s1", bounds(0.0, 0.0, 40.0, 20.0)));

    let map = convert(&doc).unwrap().into_strict().unwrap();

    let template = map.model().template(Id::new("pr1")).unwrap();
    assert_eq!(template.residues().len(), 2);

    let species = map.model().species_by_id(Id::new("s1")).unwrap();
    assert_eq!(species.kind(), SpeciesKind::GenericProtein);
    assert_eq!(species.template(), Some(Id::new("pr1")));

    let modifications = species.modifications();
    assert_eq!(modifications.len(), 2);
    assert_eq!(modifications[0].residue(), Id::new("pr1").composite("rs1"));
    assert_eq!(modifications[0].state(), ResidueState::Phosphorylated);
    assert_eq!(modifications[1].residue(), Id::new("pr1").composite("rs2"));
    assert_eq!(modifications[1].state(), ResidueState::Empty);
}

#[test]
fn shared_template_is_built_once() {
    let mut doc = Document::default();
    doc.templates
        .push(template("pr1", TemplateFamily::Receptor, &[]));
    for (species_id, alias_id, x) in [("s1", "sa1", 0.0), ("s2", "sa2", 60.0)] {
        let mut spec = species(species_id, species_id, None, SpeciesClass::Protein);
        spec.identity.template = Some("pr1".to_owned());
        doc.species.push(spec);
        doc.species_aliases
            .push(species_alias(alias_id, species_id, bounds(x, 0.0, 40.0, 20.0)));
    }

    let map = convert(&doc).unwrap().into_strict().unwrap();

    assert_eq!(map.model().templates().count(), 1);
    for id in ["s1", "s2"] {
        let species = map.model().species_by_id(Id::new(id)).unwrap();
        assert_eq!(species.kind(), SpeciesKind::ReceptorProtein);
        assert_eq!(species.template(), Some(Id::new("pr1")));
    }
}

#[test]
fn reaction_connectors_start_on_boundaries() {
    let mut doc = two_species_document();
    doc.species
        .push(species("s3", "C", Some("c1"), SpeciesClass::SimpleMolecule));
    doc.species_aliases
        .push(species_alias("sa3", "s3", bounds(0.0, 50.0, 20.0, 10.0)));

    let mut re = reaction("re1", ReactionTag::StateTransition);
    re.base_reactants.push(participant("s1", "sa1"));
    re.base_reactants.push(participant("s3", "sa3"));
    re.base_products.push(participant("s2", "sa2"));
    doc.reactions.push(re);

    let map = convert(&doc).unwrap().into_strict().unwrap();

    let reaction = map.model().reaction(Id::new("re1")).unwrap();
    assert_eq!(reaction.reactants().len(), 2);
    assert_eq!(reaction.products().len(), 1);

    // Main connector: sa1 center (10, 5) toward sa2 center (110, 5) crosses
    // sa1's right edge; the product side crosses sa2's left edge.
    let main = map.layout().connector(Id::new("re1")).unwrap();
    assert_eq!(main.start(), Point::new(20.0, 5.0));
    assert_eq!(main.end(), Point::new(100.0, 5.0));

    // The second reactant's stub ends on the main segment's start point.
    let stub = map
        .layout()
        .connector(Id::new("re1").composite("reactant_1"))
        .unwrap();
    assert_eq!(stub.end(), main.start());
    // Its start lies on sa3's boundary (top edge, y = 50).
    assert!(approx_eq!(f64, stub.start().y(), 50.0, epsilon = 1e-9));
}

#[test]
fn coincident_participants_fall_back_with_diagnostics() {
    let mut doc = two_species_document();
    // Product occupies the exact same box as the reactant.
    doc.species_aliases[1].bounds = RawBounds {
        x: 0.0,
        y: 0.0,
        width: 20.0,
        height: 10.0,
    };
    let mut re = reaction("re1", ReactionTag::StateTransition);
    re.base_reactants.push(participant("s1", "sa1"));
    re.base_products.push(participant("s2", "sa2"));
    doc.reactions.push(re);

    let conversion = convert(&doc).unwrap();

    // The reaction is still built, with its connector collapsed to the
    // shared center.
    assert!(conversion.map().model().reaction(Id::new("re1")).is_some());
    let connector = conversion.map().layout().connector(Id::new("re1")).unwrap();
    assert_eq!(connector.start(), connector.end());

    assert!(
        conversion
            .diagnostics()
            .iter()
            .any(|diagnostic| diagnostic.kind() == DiagnosticKind::DegenerateGeometry)
    );
    // Strict callers treat the same outcome as failure.
    assert!(conversion.into_strict().is_err());
}

#[test]
fn complex_members_nest_in_model_and_layout() {
    let mut doc = Document::default();
    doc.species
        .push(species("s_cx", "dimer", None, SpeciesClass::Complex));
    doc.included_species.push(IncludedSpeciesSpec {
        id: "is1".to_owned(),
        name: Some("subunit".to_owned()),
        complex_species: "s_cx".to_owned(),
        identity: IdentitySpec::of_class(SpeciesClass::Protein),
        metadata: Vec::new(),
    });
    doc.complex_aliases.push(ComplexAliasSpec {
        id: "csa1".to_owned(),
        species: "s_cx".to_owned(),
        compartment_alias: None,
        complex_alias: None,
        bounds: bounds(0.0, 0.0, 100.0, 80.0),
        activity: Activity::Inactive,
    });
    let mut member = species_alias("sa1", "is1", bounds(10.0, 10.0, 40.0, 20.0));
    member.complex_alias = Some("csa1".to_owned());
    doc.species_aliases.push(member);

    let map = convert(&doc).unwrap().into_strict().unwrap();

    let complex = map.model().species_by_id(Id::new("s_cx")).unwrap();
    assert_eq!(complex.kind(), SpeciesKind::Complex);
    assert_eq!(complex.components(), &[Id::new("is1")]);

    let subunit = map.model().species_by_id(Id::new("is1")).unwrap();
    assert_eq!(subunit.kind(), SpeciesKind::GenericProtein);

    let complex_glyph = map.layout().glyph(Id::new("csa1")).unwrap();
    assert_eq!(complex_glyph.children(), &[Id::new("sa1")]);
    // The member glyph is nested, not a root.
    assert!(map.layout().glyph(Id::new("sa1")).is_some());
    assert!(!map.layout().roots().contains(&Id::new("sa1")));
}

#[test]
fn influence_reaction_becomes_modulation() {
    let mut doc = two_species_document();
    let mut re = reaction("re1", ReactionTag::Inhibition);
    re.base_reactants.push(participant("s1", "sa1"));
    re.base_products.push(participant("s2", "sa2"));
    doc.reactions.push(re);

    let map = convert(&doc).unwrap().into_strict().unwrap();

    let modulation = map.model().modulations().next().unwrap();
    assert_eq!(modulation.id(), Id::new("re1"));
    assert_eq!(modulation.kind(), ModulationKind::Inhibition);
    assert_eq!(modulation.source(), Id::new("s1"));
    assert_eq!(modulation.target(), Id::new("s2"));
    assert!(modulation.gate().is_none());

    let connector = map.layout().connector(Id::new("re1")).unwrap();
    assert_eq!(connector.start(), Point::new(20.0, 5.0));
    assert_eq!(connector.end(), Point::new(100.0, 5.0));
}

#[test]
fn unregistered_reaction_kind_is_skipped_not_fatal() {
    let mut doc = two_species_document();
    // The bare gate marker without gate members has no transformer.
    let mut re = reaction("re1", ReactionTag::BooleanLogicGate);
    re.base_reactants.push(participant("s1", "sa1"));
    re.base_products.push(participant("s2", "sa2"));
    doc.reactions.push(re);

    let conversion = convert(&doc).unwrap();

    assert!(conversion.map().model().reaction(Id::new("re1")).is_none());
    assert_eq!(conversion.map().model().species().count(), 2);
    assert!(
        conversion
            .diagnostics()
            .iter()
            .any(|diagnostic| diagnostic.kind() == DiagnosticKind::UnsupportedVariant)
    );
}

#[test]
fn dangling_species_reference_aborts() {
    let mut doc = Document::default();
    doc.species_aliases
        .push(species_alias("sa1", "ghost", bounds(0.0, 0.0, 20.0, 10.0)));

    let err = convert(&doc).unwrap_err();
    assert!(matches!(err, ConvertError::MissingReference { .. }));
}

#[test]
fn annotations_are_extracted_per_element() {
    let mut doc = Document::default();
    let mut spec = species("s1", "p53", None, SpeciesClass::Protein);
    spec.metadata.push(metadata("is", &["urn:miriam:uniprot:P04637"]));
    spec.metadata
        .push(metadata("is", &["urn:miriam:hgnc.symbol:TP53"]));
    spec.metadata
        .push(metadata("isDescribedBy", &["urn:miriam:pubmed:10635333"]));
    doc.species.push(spec);
    doc.species_aliases
        .push(species_alias("sa1", "s1", bounds(0.0, 0.0, 40.0, 20.0)));

    let map = convert(&doc).unwrap().into_strict().unwrap();

    let resources = map.annotations().get(Id::new("s1")).unwrap();
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[&Qualifier::Is].len(), 2);
    assert!(resources[&Qualifier::IsDescribedBy].contains("urn:miriam:pubmed:10635333"));
}

#[test]
fn canvas_comes_from_the_document_when_declared() {
    let mut doc = two_species_document();
    doc.canvas = Some(CanvasSpec {
        width: 800.0,
        height: 600.0,
    });

    let map = convert(&doc).unwrap().into_strict().unwrap();
    assert_eq!(map.layout().canvas().width(), 800.0);
    assert_eq!(map.layout().canvas().height(), 600.0);

    // Without a declaration the canvas tightens to the glyph bounds.
    let mut doc = two_species_document();
    doc.canvas = None;
    let map = convert(&doc).unwrap().into_strict().unwrap();
    assert_eq!(map.layout().canvas().width(), 400.0);
    assert_eq!(map.layout().canvas().height(), 300.0);
}

#[test]
fn model_families_iterate_lexicographically() {
    let mut doc = Document::default();
    for id in ["s2", "s10", "s1"] {
        doc.species
            .push(species(id, id, None, SpeciesClass::SimpleMolecule));
    }
    for (alias, species_id, x) in [("sa1", "s2", 0.0), ("sa2", "s10", 40.0), ("sa3", "s1", 80.0)] {
        doc.species_aliases
            .push(species_alias(alias, species_id, bounds(x, 0.0, 20.0, 10.0)));
    }

    let map = convert(&doc).unwrap().into_strict().unwrap();

    let order: Vec<String> = map
        .model()
        .species()
        .map(|species| species.id().resolve())
        .collect();
    assert_eq!(order, vec!["s1", "s10", "s2"]);

    // Layout keeps construction order, not ID order.
    let layout_order: Vec<String> = map
        .layout()
        .roots()
        .iter()
        .map(|id| id.resolve())
        .collect();
    assert_eq!(layout_order, vec!["sa1", "sa2", "sa3"]);
}
