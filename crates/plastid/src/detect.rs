//! Format detection for the supported document family.
//!
//! Detection looks for the extension namespace marker that every document of
//! this family declares. It is a cheap sniff over raw text, not validation:
//! a detected document may still fail to deserialize or convert.

/// The namespace marker unique to this document family.
pub const FORMAT_MARKER: &str = "http://www.sbml.org/2001/ns/celldesigner";

/// Returns true when `text` carries the family's namespace marker.
///
/// # Examples
///
/// ```
/// use plastid::detect::is_pathway_document;
///
/// assert!(is_pathway_document(
///     r#"<sbml xmlns:celldesigner="http://www.sbml.org/2001/ns/celldesigner">"#
/// ));
/// assert!(!is_pathway_document("<sbml xmlns=\"http://www.sbml.org/sbml/level2\">"));
/// ```
pub fn is_pathway_document(text: &str) -> bool {
    text.contains(FORMAT_MARKER)
}
