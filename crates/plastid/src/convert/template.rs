//! Species-template transformer variants.
//!
//! Templates are the most heavily shared elements in a document: every
//! species of a templated family references one. Construction is an
//! idempotent build-or-fetch, and nested residue declarations are registered
//! under composite IDs alongside their owner.

use log::debug;

use plastid_core::identifier::Id;

use crate::{
    convert::{MapBuilder, context::Owner, index::NativeRef},
    error::ConvertError,
    model::{ModelElement, ModificationResidue, SpeciesTemplate},
};

/// Transformer for a species template and its residues. Templates carry no
/// layout.
pub(crate) fn build(
    builder: &mut MapBuilder<'_>,
    target: NativeRef,
    _owner: Option<Owner>,
) -> Result<Option<Id>, ConvertError> {
    let NativeRef::Template(i) = target else {
        builder.emit_unsupported(target, "template transformer on a non-template element");
        return Ok(None);
    };
    let id = Id::new(&builder.doc.templates[i].id);
    Ok(Some(builder.build_template_at(i, id)))
}

impl MapBuilder<'_> {
    /// Builds the template registered under `id`, or fetches it when an
    /// earlier species already built it.
    pub(crate) fn ensure_template(&mut self, id: Id, referrer: Id) -> Result<Id, ConvertError> {
        if self.ctx.model.template(id).is_some() {
            return Ok(id);
        }
        let Some(NativeRef::Template(i)) = self.index.get(id) else {
            return Err(ConvertError::MissingReference {
                referrer,
                target: id,
                role: "a species template",
            });
        };
        Ok(self.build_template_at(i, id))
    }

    fn build_template_at(&mut self, i: usize, id: Id) -> Id {
        if self.ctx.model.template(id).is_some() {
            return id;
        }
        let doc = self.doc;
        let spec = &doc.templates[i];

        debug!(template:% = id, family:? = spec.family; "Building species template");
        let mut template = SpeciesTemplate::new(id, spec.family.into(), spec.name.clone());
        for residue in &spec.residues {
            let residue_id = id.composite(&residue.id);
            self.ctx.model.insert(ModelElement::Residue(ModificationResidue::new(
                residue_id,
                residue.name.clone(),
                residue.angle,
            )));
            template.push_residue(residue_id);
        }
        self.ctx.model.insert(ModelElement::Template(template));
        self.extract_annotations(id, &spec.metadata);
        id
    }
}
