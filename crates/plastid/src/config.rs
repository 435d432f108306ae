//! Conversion options.
//!
//! Options are deliberately small: the converter is a deterministic batch
//! transform, and almost everything it needs comes from the document itself.

use serde::{Deserialize, Serialize};

/// Options controlling a conversion run.
///
/// # Examples
///
/// ```
/// use plastid::ConvertOptions;
///
/// let defaults = ConvertOptions::default();
/// assert_eq!(defaults.fallback_glyph_size, 10.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Side length used for glyphs whose alias carries a collapsed or
    /// missing bounds box.
    pub fallback_glyph_size: f64,
    /// Synthesized-ID prefix for boolean logic gates.
    pub gate_id_prefix: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            fallback_glyph_size: 10.0,
            gate_id_prefix: "gate".to_owned(),
        }
    }
}
