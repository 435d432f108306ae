//! Biology-qualifier annotations extracted from embedded metadata blocks.
//!
//! Document elements may carry metadata blocks tagging external resource
//! URIs with a relation qualifier ("is", "hasPart", ...). The extractor
//! pulls those into a side table keyed by the element's ID, grouped per
//! qualifier with duplicate URIs collapsed.

use std::{collections::BTreeSet, fmt, str::FromStr};

use indexmap::IndexMap;

use plastid_core::identifier::Id;

use crate::document::MetadataEntry;

/// A biology relation qualifier.
///
/// The vocabulary is the source format's; unknown qualifier strings are
/// preserved verbatim rather than dropped, since downstream consumers may
/// understand qualifiers this converter does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Qualifier {
    Is,
    HasPart,
    IsPartOf,
    IsVersionOf,
    HasVersion,
    IsHomologTo,
    IsDescribedBy,
    Encodes,
    IsEncodedBy,
    OccursIn,
    HasProperty,
    IsPropertyOf,
    HasTaxon,
    Other(String),
}

impl FromStr for Qualifier {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "is" => Qualifier::Is,
            "hasPart" => Qualifier::HasPart,
            "isPartOf" => Qualifier::IsPartOf,
            "isVersionOf" => Qualifier::IsVersionOf,
            "hasVersion" => Qualifier::HasVersion,
            "isHomologTo" => Qualifier::IsHomologTo,
            "isDescribedBy" => Qualifier::IsDescribedBy,
            "encodes" => Qualifier::Encodes,
            "isEncodedBy" => Qualifier::IsEncodedBy,
            "occursIn" => Qualifier::OccursIn,
            "hasProperty" => Qualifier::HasProperty,
            "isPropertyOf" => Qualifier::IsPropertyOf,
            "hasTaxon" => Qualifier::HasTaxon,
            other => Qualifier::Other(other.to_owned()),
        })
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Qualifier::Is => "is",
            Qualifier::HasPart => "hasPart",
            Qualifier::IsPartOf => "isPartOf",
            Qualifier::IsVersionOf => "isVersionOf",
            Qualifier::HasVersion => "hasVersion",
            Qualifier::IsHomologTo => "isHomologTo",
            Qualifier::IsDescribedBy => "isDescribedBy",
            Qualifier::Encodes => "encodes",
            Qualifier::IsEncodedBy => "isEncodedBy",
            Qualifier::OccursIn => "occursIn",
            Qualifier::HasProperty => "hasProperty",
            Qualifier::IsPropertyOf => "isPropertyOf",
            Qualifier::HasTaxon => "hasTaxon",
            Qualifier::Other(other) => other,
        };
        write!(f, "{name}")
    }
}

/// Qualifier-grouped resource URIs for one element.
pub type QualifiedResources = IndexMap<Qualifier, BTreeSet<String>>;

/// The annotation side table: element ID to qualifier-grouped URI sets.
///
/// Entries keep construction order during the build and are sorted
/// lexicographically by element ID when the table is frozen into the map.
#[derive(Debug, Clone, Default)]
pub struct AnnotationTable {
    entries: IndexMap<Id, QualifiedResources>,
}

impl AnnotationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts the metadata entries of one element into the table.
    ///
    /// Elements without usable entries get no table row. Merging the same
    /// element twice unions the URI sets per qualifier.
    pub fn extract(&mut self, element: Id, metadata: &[MetadataEntry]) {
        for entry in metadata {
            let uris: Vec<&String> = entry.resources.iter().filter(|uri| !uri.is_empty()).collect();
            if uris.is_empty() {
                continue;
            }
            let qualifier: Qualifier = entry
                .qualifier
                .parse()
                .unwrap_or(Qualifier::Other(String::new()));
            let group = self.entries.entry(element).or_default();
            let set = group.entry(qualifier).or_default();
            for uri in uris {
                set.insert(uri.clone());
            }
        }
    }

    /// The qualifier-grouped resources for one element, if any.
    pub fn get(&self, element: Id) -> Option<&QualifiedResources> {
        self.entries.get(&element)
    }

    /// The number of annotated elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no element is annotated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over annotated elements and their resources.
    pub fn iter(&self) -> impl Iterator<Item = (Id, &QualifiedResources)> {
        self.entries.iter().map(|(id, resources)| (*id, resources))
    }

    /// Sorts entries lexicographically by element ID. Called once when the
    /// map is frozen.
    pub(crate) fn freeze(&mut self) {
        self.entries.sort_by(|a, _, b, _| a.resolve().cmp(&b.resolve()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(qualifier: &str, uris: &[&str]) -> MetadataEntry {
        MetadataEntry {
            qualifier: qualifier.to_owned(),
            resources: uris.iter().map(|uri| (*uri).to_owned()).collect(),
        }
    }

    #[test]
    fn test_qualifier_parse() {
        assert_eq!("is".parse::<Qualifier>().unwrap(), Qualifier::Is);
        assert_eq!("hasPart".parse::<Qualifier>().unwrap(), Qualifier::HasPart);
        assert_eq!(
            "customRelation".parse::<Qualifier>().unwrap(),
            Qualifier::Other("customRelation".to_owned())
        );
    }

    #[test]
    fn test_extract_groups_by_qualifier() {
        let mut table = AnnotationTable::new();
        let element = Id::new("s1");
        table.extract(
            element,
            &[
                entry("is", &["urn:miriam:uniprot:P04637"]),
                entry("hasPart", &["urn:miriam:chebi:15377"]),
            ],
        );

        let resources = table.get(element).unwrap();
        assert_eq!(resources.len(), 2);
        assert!(resources[&Qualifier::Is].contains("urn:miriam:uniprot:P04637"));
        assert!(resources[&Qualifier::HasPart].contains("urn:miriam:chebi:15377"));
    }

    #[test]
    fn test_extract_merges_duplicate_qualifiers() {
        let mut table = AnnotationTable::new();
        let element = Id::new("s2");
        table.extract(element, &[entry("is", &["urn:a", "urn:b"])]);
        table.extract(element, &[entry("is", &["urn:b", "urn:c"])]);

        let set = &table.get(element).unwrap()[&Qualifier::Is];
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_extract_skips_empty_entries() {
        let mut table = AnnotationTable::new();
        table.extract(Id::new("s3"), &[entry("is", &[])]);
        table.extract(Id::new("s4"), &[entry("is", &[""])]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_freeze_sorts_by_element_id() {
        let mut table = AnnotationTable::new();
        table.extract(Id::new("s2"), &[entry("is", &["urn:a"])]);
        table.extract(Id::new("c1"), &[entry("is", &["urn:b"])]);
        table.freeze();

        let ids: Vec<String> = table.iter().map(|(id, _)| id.resolve()).collect();
        assert_eq!(ids, vec!["c1".to_owned(), "s2".to_owned()]);
    }
}
