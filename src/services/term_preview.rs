//! Cache of generated preview images for ring terminology.

use crate::models::{Collection, TermPreview, term_document_id};
use crate::services::CollectionStore;
use crate::{Error, Result};
use std::collections::BTreeMap;

/// Stores one preview per term in the `term_previews` collection.
#[derive(Clone)]
pub struct TermPreviewCache {
    store: CollectionStore,
}

impl TermPreviewCache {
    /// Creates the cache over a collection store.
    #[must_use]
    pub const fn new(store: CollectionStore) -> Self {
        Self { store }
    }

    /// Saves (or replaces) the preview for a term.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a term with no usable characters, or an
    /// error if unconfigured or the write fails.
    pub fn save(&self, term: &str, image_url: &str, caption: &str) -> Result<TermPreview> {
        let id = term_document_id(term.trim());
        if id.is_empty() {
            return Err(Error::InvalidInput("term must not be empty".to_string()));
        }

        let preview = TermPreview {
            term: term.trim().to_string(),
            image_url: image_url.to_string(),
            caption: caption.to_string(),
            generated_at: Some(crate::now()),
        };
        self.store.create(Collection::TermPreviews, &id, &preview)?;

        tracing::info!(term = %preview.term, document = %id, "Saved term preview");
        Ok(preview)
    }

    /// Returns every cached preview keyed by term. Documents without a term
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if unconfigured or the read fails.
    pub fn all(&self) -> Result<BTreeMap<String, TermPreview>> {
        Ok(self
            .store
            .list::<TermPreview>(Collection::TermPreviews)?
            .into_iter()
            .filter(|preview| !preview.term.is_empty())
            .map(|preview| (preview.term.clone(), preview))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DocumentStore, Fields, InMemoryDocumentStore};
    use std::sync::Arc;

    #[test]
    fn test_save_and_list() {
        let backend = Arc::new(InMemoryDocumentStore::new());
        let cache = TermPreviewCache::new(CollectionStore::new(backend.clone()));

        cache
            .save("Round Brilliant", "https://img/rb.png", "58 facets")
            .unwrap();
        cache
            .save("round brilliant", "https://img/rb2.png", "replaced")
            .unwrap();
        cache.save("Halo", "https://img/h.png", "ring of stones").unwrap();

        assert!(
            backend
                .get_document(Collection::TermPreviews, "round_brilliant")
                .unwrap()
                .is_some()
        );
        assert_eq!(backend.document_count(Collection::TermPreviews), 2);

        let all = cache.all().unwrap();
        assert_eq!(all["Halo"].caption, "ring of stones");
        assert_eq!(all["round brilliant"].image_url, "https://img/rb2.png");
    }

    #[test]
    fn test_skips_documents_without_term() {
        let backend = Arc::new(InMemoryDocumentStore::new());
        backend
            .put_document(Collection::TermPreviews, "orphan", &Fields::new())
            .unwrap();
        let cache = TermPreviewCache::new(CollectionStore::new(backend));

        assert!(cache.all().unwrap().is_empty());
    }

    #[test]
    fn test_rejects_blank_term() {
        let cache = TermPreviewCache::new(CollectionStore::new(Arc::new(
            InMemoryDocumentStore::new(),
        )));
        assert!(matches!(cache.save("   ", "u", "c"), Err(Error::InvalidInput(_))));
    }
}
