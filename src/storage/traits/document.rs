//! Document store trait.

use crate::Result;
use crate::models::Collection;
use crate::storage::document::{Document, Fields};

/// Trait for document store backends.
///
/// Backends report absence rather than failing: a collection that was never
/// created lists as empty, and deleting a missing document returns `false`.
/// Any other failure is an error.
pub trait DocumentStore: Send + Sync {
    /// Backend name, for logs.
    fn name(&self) -> &'static str;

    /// Creates a document with a store-assigned id and returns its full name.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn create_document(&self, collection: Collection, fields: &Fields) -> Result<String>;

    /// Writes a document at a caller-chosen id, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is invalid or the write fails.
    fn put_document(&self, collection: Collection, id: &str, fields: &Fields) -> Result<()>;

    /// Reads a single document.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails for a reason other than absence.
    fn get_document(&self, collection: Collection, id: &str) -> Result<Option<Document>>;

    /// Lists every document in a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails for a reason other than absence.
    fn list_documents(&self, collection: Collection) -> Result<Vec<Document>>;

    /// Deletes a document. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails for a reason other than absence.
    fn delete_document(&self, collection: Collection, id: &str) -> Result<bool>;
}

/// Checks that a document id is safe to place in a resource path.
///
/// Only alphanumerics, `-` and `_` are allowed, up to 1500 bytes.
#[must_use]
pub fn is_valid_document_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 1500
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Validates a document id.
///
/// # Errors
///
/// Returns `InvalidInput` if the id contains path or reserved characters.
pub fn validate_document_id(id: &str) -> Result<()> {
    if is_valid_document_id(id) {
        Ok(())
    } else {
        Err(crate::Error::InvalidInput(format!(
            "document id contains invalid characters: {id:?}"
        )))
    }
}
