//! Identifier management using string interning for efficient storage and comparison
//!
//! Every cross-reference table in the converter is keyed by [`Id`]. Documents
//! reference one entity from many places, so identifiers are interned once
//! and compared as symbols.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> &'static Mutex<DefaultStringInterner> {
    INTERNER.get_or_init(|| Mutex::new(DefaultStringInterner::new()))
}

/// Interned identifier for native document IDs and synthesized IDs.
///
/// # Examples
///
/// ```
/// use plastid_core::identifier::Id;
///
/// // Native IDs straight from the document
/// let species = Id::new("s1");
/// let alias = Id::new("sa1");
///
/// // Composite IDs for nested items (owner ID + local tag)
/// let residue = Id::new("pr1").composite("rs1");
/// assert_eq!(residue, "pr1::rs1");
///
/// // Synthesized IDs for constructs with no native ID
/// let gate = Id::synthesized("gate", 0);
/// assert_eq!(gate, "gate_0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        let mut interner = interner().lock().expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }

    /// Creates an `Id` for a construct the document never names.
    ///
    /// Callers keep `seq` unique per prefix; the converter uses one counter
    /// per conversion for this.
    pub fn synthesized(prefix: &str, seq: usize) -> Self {
        let name = format!("{prefix}_{seq}");
        Self::new(&name)
    }

    /// Creates a composite ID by combining this owner ID with a local tag.
    ///
    /// Nested document items (modification residues) have IDs that are only
    /// unique within their owner; the composite form is unique in the flat
    /// document namespace.
    pub fn composite(&self, local: &str) -> Self {
        let name = {
            let interner = interner().lock().expect("Failed to acquire interner lock");
            let owner = interner
                .resolve(self.0)
                .expect("Owner ID should exist in interner");
            format!("{owner}::{local}")
        };
        Self::new(&name)
    }

    /// Returns the string form of the identifier.
    ///
    /// Family collections iterate in lexicographic order of this string
    /// wherever ordering is observable.
    pub fn resolve(&self) -> String {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        interner
            .resolve(self.0)
            .expect("Symbol should exist in interner")
            .to_owned()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{}", str_value)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_interns_once() {
        let id1 = Id::new("s1");
        let id2 = Id::new("s1");
        let id3 = Id::new("s2");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "s1");
    }

    #[test]
    fn test_synthesized() {
        let id1 = Id::synthesized("gate", 0);
        let id2 = Id::synthesized("gate", 1);
        let id3 = Id::synthesized("gate", 0);

        assert_ne!(id1, id2);
        assert_eq!(id1, id3);
        assert_eq!(id2, "gate_1");
    }

    #[test]
    fn test_composite() {
        let owner = Id::new("pr1");
        let r1 = owner.composite("rs1");
        let r2 = owner.composite("rs2");

        assert_ne!(r1, r2);
        assert_eq!(r1, "pr1::rs1");
        assert_eq!(r2, "pr1::rs2");
    }

    #[test]
    fn test_composite_is_flat_namespace_unique() {
        // Two owners with the same local tag must not collide.
        let a = Id::new("pr1").composite("rs1");
        let b = Id::new("pr2").composite("rs1");
        assert_ne!(a, b);
    }

    #[test]
    fn test_resolve_and_display() {
        let id = Id::new("c1");
        assert_eq!(id.resolve(), "c1");
        assert_eq!(format!("{id}"), "c1");
    }

    #[test]
    fn test_hash_map_key() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(Id::new("k1"), 1);
        map.insert(Id::new("k2"), 2);

        assert_eq!(map.get(&Id::new("k1")), Some(&1));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_lexicographic_ordering_via_resolve() {
        let mut ids = vec![Id::new("s10"), Id::new("s1"), Id::new("c2")];
        ids.sort_by_key(|id| id.resolve());
        assert_eq!(ids[0], "c2");
        assert_eq!(ids[1], "s1");
        assert_eq!(ids[2], "s10");
    }
}
