//! Key/value store trait backing the local mirror.

use crate::Result;

/// A synchronous string key/value store.
pub trait KeyValueStore: Send + Sync {
    /// Reads a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a key, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
