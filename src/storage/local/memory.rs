//! In-memory key/value store.

use crate::storage::traits::KeyValueStore;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// Non-persistent key/value store.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().map_err(|_| Error::OperationFailed {
            operation: "get_value".to_string(),
            cause: "Lock poisoned".to_string(),
        })?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| Error::OperationFailed {
            operation: "set_value".to_string(),
            cause: "Lock poisoned".to_string(),
        })?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
