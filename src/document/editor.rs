// file: src/document/editor.rs
// description: read-transform-write orchestration of benefit edits against a document store
// reference: scoped request/response over whole-document text

use crate::clock::ClockIdProvider;
use crate::document::mutator::{delete_benefit, find_block, insert_benefit, update_benefit};
use crate::document::store::DocumentStore;
use crate::error::{BenefitError, Result};
use crate::models::{Benefit, BenefitDraft, Provenance};
use crate::parser::record::BlockParser;
use crate::utils::validation::Validator;
use std::path::Path;
use tracing::info;

/// Applies one edit per call: the note is read in full, transformed, and
/// written back. Writes to the same note must be serialized by the caller.
pub struct BenefitEditor<S: DocumentStore, C: ClockIdProvider> {
    store: S,
    clock: C,
}

impl<S: DocumentStore, C: ClockIdProvider> BenefitEditor<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn parser(&self) -> BlockParser<'_, C> {
        BlockParser::new(&self.clock)
    }

    pub async fn list(&self, path: &Path, provenance: &Provenance) -> Result<Vec<Benefit>> {
        let document = self.store.read(path).await?;
        Ok(self.parser().parse_document(&document, provenance))
    }

    pub async fn add(&self, path: &Path, draft: BenefitDraft) -> Result<Benefit> {
        let draft = Validator::normalize_draft(draft)?;
        let benefit = draft.into_benefit(self.clock.new_id(), self.clock.now());

        let document = self.store.read(path).await?;
        let updated = insert_benefit(&document, &benefit);
        self.store.write(path, &updated).await?;

        info!("Added benefit {} to {}", benefit.id, path.display());
        Ok(benefit)
    }

    pub async fn update(&self, path: &Path, id: &str, draft: BenefitDraft) -> Result<Benefit> {
        let draft = Validator::normalize_draft(draft)?;
        let content_type = draft.content_type;
        let replacement = draft.into_benefit(id.to_string(), self.clock.now());

        let document = self.store.read(path).await?;
        let updated = update_benefit(&document, id, &replacement, &self.clock)?;

        let range = find_block(&updated, id)?;
        let mut benefit = self.parser().parse_block(&updated[range])?;
        benefit.provenance.content_type = content_type;

        self.store.write(path, &updated).await?;

        info!("Updated benefit {} in {}", id, path.display());
        Ok(benefit)
    }

    pub async fn delete(&self, path: &Path, id: &str) -> Result<()> {
        let document = self.store.read(path).await?;
        let updated = delete_benefit(&document, id)?;
        self.store.write(path, &updated).await?;

        info!("Deleted benefit {} from {}", id, path.display());
        Ok(())
    }

    /// Looks a single record up by id.
    pub async fn get(&self, path: &Path, id: &str, provenance: &Provenance) -> Result<Benefit> {
        self.list(path, provenance)
            .await?
            .into_iter()
            .find(|benefit| benefit.id == id)
            .ok_or_else(|| BenefitError::not_found(id))
    }
}
