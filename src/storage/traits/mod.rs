//! Storage backend traits.

mod document;
mod key_value;

pub use document::{DocumentStore, is_valid_document_id, validate_document_id};
pub use key_value::KeyValueStore;
