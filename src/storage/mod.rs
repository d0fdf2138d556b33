//! Storage layer.
//!
//! Two independent stores back the application:
//! - **Document store**: the remote collections (`Firestore` REST, or in memory)
//! - **Local mirror**: the current design in a key/value store
//!
//! The [`mapper`] converts domain values to and from the document store's
//! typed-field representation.

// Allow significant_drop_tightening - lock guards live for a single lookup.
#![allow(clippy::significant_drop_tightening)]

pub mod document;
pub mod firestore;
pub mod local;
pub mod mapper;
pub mod memory;
pub mod traits;

pub use document::{Document, Fields, Value};
pub use firestore::FirestoreClient;
pub use local::{FileKeyValueStore, LocalMirror, MemoryKeyValueStore};
pub use mapper::DocumentRecord;
pub use memory::InMemoryDocumentStore;
pub use traits::{DocumentStore, KeyValueStore};
