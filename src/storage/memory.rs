//! In-memory document store for testing and offline use.

use crate::models::Collection;
use crate::storage::document::{Document, Fields};
use crate::storage::traits::{DocumentStore, validate_document_id};
use crate::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory document store.
///
/// Uses `RwLock` for thread-safe access. Documents get full resource names
/// under the `local` project so decoding behaves as it does against the
/// remote store. Data is not persisted between runs.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<Collection, BTreeMap<String, Document>>>,
    next_id: AtomicU64,
}

impl InMemoryDocumentStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents in a collection.
    #[must_use]
    pub fn document_count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .map(|c| c.get(&collection).map_or(0, BTreeMap::len))
            .unwrap_or(0)
    }

    fn resource_name(collection: Collection, id: &str) -> String {
        format!(
            "projects/local/databases/(default)/documents/{}/{id}",
            collection.as_str()
        )
    }

    fn insert(
        &self,
        operation: &str,
        collection: Collection,
        id: &str,
        fields: &Fields,
    ) -> Result<String> {
        let name = Self::resource_name(collection, id);
        let mut collections = self.collections.write().map_err(|_| Error::OperationFailed {
            operation: operation.to_string(),
            cause: "Lock poisoned".to_string(),
        })?;

        let document = Document {
            name: Some(name.clone()),
            fields: fields.clone(),
            create_time: None,
            update_time: Some(crate::format_timestamp(&crate::now())),
        };
        collections
            .entry(collection)
            .or_default()
            .insert(id.to_string(), document);
        Ok(name)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn create_document(&self, collection: Collection, fields: &Fields) -> Result<String> {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.insert("create_document", collection, &format!("auto_{n:08}"), fields)
    }

    fn put_document(&self, collection: Collection, id: &str, fields: &Fields) -> Result<()> {
        validate_document_id(id)?;
        self.insert("put_document", collection, id, fields)
            .map(|_| ())
    }

    fn get_document(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        validate_document_id(id)?;
        let collections = self.collections.read().map_err(|_| Error::OperationFailed {
            operation: "get_document".to_string(),
            cause: "Lock poisoned".to_string(),
        })?;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    fn list_documents(&self, collection: Collection) -> Result<Vec<Document>> {
        let collections = self.collections.read().map_err(|_| Error::OperationFailed {
            operation: "list_documents".to_string(),
            cause: "Lock poisoned".to_string(),
        })?;
        Ok(collections
            .get(&collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    fn delete_document(&self, collection: Collection, id: &str) -> Result<bool> {
        validate_document_id(id)?;
        let mut collections = self.collections.write().map_err(|_| Error::OperationFailed {
            operation: "delete_document".to_string(),
            cause: "Lock poisoned".to_string(),
        })?;
        Ok(collections
            .get_mut(&collection)
            .is_some_and(|docs| docs.remove(id).is_some()))
    }
}
