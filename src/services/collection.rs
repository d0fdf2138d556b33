//! Collection CRUD over the document store.

use crate::models::{Collection, DesignRecord, Ring, RingDraft, SavedDesign, TrashedRing};
use crate::storage::mapper::{self, DocumentRecord};
use crate::storage::traits::DocumentStore;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::instrument;

/// CRUD against the named collections.
///
/// When the document store is not configured every operation fails with
/// [`Error::NotConfigured`] before touching the backend.
#[derive(Clone)]
pub struct CollectionStore {
    backend: Arc<dyn DocumentStore>,
    configured: bool,
}

impl CollectionStore {
    /// Creates a configured store over a backend.
    #[must_use]
    pub fn new(backend: Arc<dyn DocumentStore>) -> Self {
        Self {
            backend,
            configured: true,
        }
    }

    /// Creates a store that refuses every operation.
    #[must_use]
    pub fn unconfigured(backend: Arc<dyn DocumentStore>) -> Self {
        Self {
            backend,
            configured: false,
        }
    }

    /// Returns whether operations will reach the backend.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.configured
    }

    /// Returns the backend name.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub(crate) fn ensure_configured(&self) -> Result<()> {
        if self.configured {
            Ok(())
        } else {
            Err(Error::firebase_not_configured())
        }
    }

    /// Writes a record at `collection/id`, replacing any existing document.
    ///
    /// # Errors
    ///
    /// Returns an error if unconfigured or the write fails.
    #[instrument(skip(self, record), fields(collection = %collection))]
    pub fn create<R: DocumentRecord>(
        &self,
        collection: Collection,
        id: &str,
        record: &R,
    ) -> Result<String> {
        self.ensure_configured()?;
        self.backend
            .put_document(collection, id, &mapper::encode(record))?;
        Ok(id.to_string())
    }

    /// Writes a record under a store-assigned name and returns that name.
    ///
    /// # Errors
    ///
    /// Returns an error if unconfigured or the write fails.
    #[instrument(skip(self, record), fields(collection = %collection))]
    pub fn create_with_generated_id<R: DocumentRecord>(
        &self,
        collection: Collection,
        record: &R,
    ) -> Result<String> {
        self.ensure_configured()?;
        self.backend
            .create_document(collection, &mapper::encode(record))
    }

    /// Reads one record.
    ///
    /// # Errors
    ///
    /// Returns an error if unconfigured or the read fails.
    pub fn get<R: DocumentRecord>(&self, collection: Collection, id: &str) -> Result<Option<R>> {
        self.ensure_configured()?;
        Ok(self
            .backend
            .get_document(collection, id)?
            .map(|doc| mapper::decode(&doc)))
    }

    /// Lists a collection, most recent first. A missing collection is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if unconfigured or the read fails.
    #[instrument(skip(self), fields(collection = %collection))]
    pub fn list<R: DocumentRecord>(&self, collection: Collection) -> Result<Vec<R>> {
        self.ensure_configured()?;
        let mut records: Vec<R> = self
            .backend
            .list_documents(collection)?
            .iter()
            .map(mapper::decode)
            .collect();
        mapper::sort_most_recent_first(&mut records);
        Ok(records)
    }

    /// Deletes a document. Deleting something absent succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if unconfigured or the delete fails.
    #[instrument(skip(self), fields(collection = %collection))]
    pub fn remove(&self, collection: Collection, id: &str) -> Result<()> {
        self.ensure_configured()?;
        if !self.backend.delete_document(collection, id)? {
            tracing::debug!(id, "Document already absent");
        }
        Ok(())
    }

    /// Saves a new ring to the active collection under `ring_<millis>`.
    ///
    /// # Errors
    ///
    /// Returns an error if unconfigured or the write fails.
    pub fn save_to_collection(&self, draft: RingDraft) -> Result<Ring> {
        self.ensure_configured()?;
        let created_at = crate::now();
        let ring = Ring::from_draft(
            format!("ring_{}", created_at.timestamp_millis()),
            draft,
            created_at,
        );

        self.create(Collection::Rings, &ring.id, &ring)?;

        tracing::info!(ring_id = %ring.id, kind = %ring.kind, "Saved ring to collection");
        metrics::counter!("collection_ring_saved_total").increment(1);
        Ok(ring)
    }

    /// Lists the active collection.
    ///
    /// # Errors
    ///
    /// Returns an error if unconfigured or the read fails.
    pub fn get_collection(&self) -> Result<Vec<Ring>> {
        self.list(Collection::Rings)
    }

    /// Lists the trash, most recently deleted first.
    ///
    /// # Errors
    ///
    /// Returns an error if unconfigured or the read fails.
    pub fn get_trash(&self) -> Result<Vec<TrashedRing>> {
        self.list(Collection::Trash)
    }

    /// Archives a confirmed design and returns its document name.
    ///
    /// # Errors
    ///
    /// Returns an error if unconfigured or the write fails.
    pub fn save_design(&self, design: &SavedDesign) -> Result<String> {
        self.ensure_configured()?;
        let record = DesignRecord::from_design(design, crate::now());
        let name = self.create_with_generated_id(Collection::Designs, &record)?;
        tracing::info!(document = %name, "Archived design");
        Ok(name)
    }

    /// Lists archived designs, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if unconfigured or the read fails.
    pub fn get_designs(&self) -> Result<Vec<DesignRecord>> {
        self.list(Collection::Designs)
    }

    /// Returns the newest archived design.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the archive is empty.
    pub fn get_latest_design(&self) -> Result<DesignRecord> {
        self.get_designs()?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound("No designs found".to_string()))
    }
}
