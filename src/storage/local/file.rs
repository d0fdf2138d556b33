//! File-backed key/value store.
//!
//! Each key is one file under the base directory, holding the raw value.
//!
//! # Security
//!
//! - **Path traversal**: keys are validated before they become file names
//! - **File size limits**: oversized files are refused on read

use crate::storage::traits::KeyValueStore;
use crate::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Maximum size of a stored value (1MB).
const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Key/value store keeping one file per key.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `base_path`. The directory is created on
    /// first write.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Returns the base path.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the path for a key.
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if !Self::is_safe_key(key) {
            return Err(Error::InvalidInput(format!(
                "Storage key contains invalid characters: {key}"
            )));
        }
        Ok(self.base_path.join(key))
    }

    /// Only alphanumerics, dash and underscore; no separators or dots.
    fn is_safe_key(key: &str) -> bool {
        !key.is_empty()
            && key.len() <= 255
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::OperationFailed {
                    operation: "read_value_metadata".to_string(),
                    cause: e.to_string(),
                });
            },
        };

        if metadata.len() > MAX_FILE_SIZE {
            return Err(Error::InvalidInput(format!(
                "Stored value exceeds maximum size of {MAX_FILE_SIZE} bytes: {}",
                path.display()
            )));
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| Error::OperationFailed {
                operation: "read_value_file".to_string(),
                cause: e.to_string(),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;

        fs::create_dir_all(&self.base_path).map_err(|e| Error::OperationFailed {
            operation: "create_storage_dir".to_string(),
            cause: e.to_string(),
        })?;

        fs::write(&path, value).map_err(|e| Error::OperationFailed {
            operation: "write_value_file".to_string(),
            cause: e.to_string(),
        })
    }
}
