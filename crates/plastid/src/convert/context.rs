//! The cross-reference context threaded through every transformer call.
//!
//! One context instance exists per conversion and has exactly one writer at
//! a time. Every indirection between elements resolves through its tables,
//! never through references into the native tree.

use std::collections::{HashMap, HashSet};

use plastid_core::{diagnostic::DiagnosticCollector, identifier::Id};

use crate::{
    annotation::AnnotationTable, convert::index::NativeRef, layout::LayoutGraph, model::ModelGraph,
};

/// The owner a nested construct is built under.
///
/// Complex members append themselves to the owning complex; their glyphs
/// nest inside the owning complex glyph.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Owner {
    /// The owning model element.
    pub model: Id,
    /// The owning glyph, when the owner carries layout.
    pub glyph: Option<Id>,
}

/// The mutable state of one conversion run.
#[derive(Debug, Default)]
pub(crate) struct Context {
    /// Native (or synthesized) ID to model element.
    pub model: ModelGraph,
    /// Native ID to layout element.
    pub layout: LayoutGraph,
    /// Element ID to qualifier-grouped resource URIs.
    pub annotations: AnnotationTable,
    /// Non-fatal conditions accumulated across the run.
    pub diagnostics: DiagnosticCollector,
    /// Source overrides: a modifier entry whose regulator is a freshly
    /// synthesized gate is resolved against this table instead of the
    /// entry's own species list. Keeps the native tree untouched.
    source_overrides: HashMap<NativeRef, Id>,
    /// Species consumed as gate inputs, per reaction index. Their per-input
    /// modifier entries are visual duplicates of the gate's single modifier.
    consumed_gate_inputs: HashMap<usize, HashSet<Id>>,
    /// Sequence for synthesized gate IDs.
    gate_seq: usize,
}

impl Context {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Allocates the next synthesized gate ID.
    pub(crate) fn next_gate_id(&mut self, prefix: &str) -> Id {
        let id = Id::synthesized(prefix, self.gate_seq);
        self.gate_seq += 1;
        id
    }

    /// Records that `entry`'s regulator is the gate `source`.
    pub(crate) fn set_source_override(&mut self, entry: NativeRef, source: Id) {
        self.source_overrides.insert(entry, source);
    }

    /// The overridden regulator for `entry`, if a gate claimed it.
    pub(crate) fn source_override(&self, entry: NativeRef) -> Option<Id> {
        self.source_overrides.get(&entry).copied()
    }

    /// Marks `species` as consumed by a gate of reaction `reaction`.
    pub(crate) fn consume_gate_input(&mut self, reaction: usize, species: Id) {
        self.consumed_gate_inputs
            .entry(reaction)
            .or_default()
            .insert(species);
    }

    /// Returns true when `species` already feeds a gate of `reaction`.
    pub(crate) fn is_consumed_gate_input(&self, reaction: usize, species: Id) -> bool {
        self.consumed_gate_inputs
            .get(&reaction)
            .is_some_and(|inputs| inputs.contains(&species))
    }
}
