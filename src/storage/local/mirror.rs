//! Local mirror of the current design.
//!
//! Holds exactly one [`SavedDesign`] as three keyed entries: the JSON payload,
//! the confirmation timestamp, and the type tag. Writes are sequential with
//! no rollback; reads treat anything malformed as "no design".

use crate::Result;
use crate::config::StorageKeys;
use crate::models::{DesignKind, SavedDesign};
use crate::storage::traits::KeyValueStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Always-available copy of the most recently confirmed design.
#[derive(Clone)]
pub struct LocalMirror {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl LocalMirror {
    /// Creates a mirror over a key/value store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    /// Returns the key names in use.
    #[must_use]
    pub const fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Writes the design, then its timestamp, then its type tag.
    ///
    /// # Errors
    ///
    /// Returns the first failing write. Earlier writes are kept.
    pub fn save(&self, design: &SavedDesign) -> Result<()> {
        let payload = serde_json::to_string(design).map_err(|e| crate::Error::OperationFailed {
            operation: "serialize_design".to_string(),
            cause: e.to_string(),
        })?;

        self.store.set(&self.keys.design, &payload)?;
        self.store
            .set(&self.keys.timestamp, &crate::format_timestamp(&design.timestamp))?;
        self.store.set(&self.keys.design_type, design.kind.as_str())?;

        tracing::debug!(kind = %design.kind, "Saved design to local mirror");
        Ok(())
    }

    /// Reads the design back. Missing, unreadable or malformed content is
    /// `None`.
    #[must_use]
    pub fn load(&self) -> Option<SavedDesign> {
        let raw = match self.store.get(&self.keys.design) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Failed to read local design: {e}");
                return None;
            },
        };

        match serde_json::from_str(&raw) {
            Ok(design) => Some(design),
            Err(e) => {
                tracing::warn!("Ignoring malformed local design: {e}");
                None
            },
        }
    }

    /// Reads the stored confirmation timestamp.
    #[must_use]
    pub fn load_timestamp(&self) -> Option<DateTime<Utc>> {
        self.store
            .get(&self.keys.timestamp)
            .ok()
            .flatten()
            .and_then(|raw| crate::parse_timestamp(raw.trim()))
    }

    /// Reads the stored type tag.
    #[must_use]
    pub fn load_kind(&self) -> Option<DesignKind> {
        self.store
            .get(&self.keys.design_type)
            .ok()
            .flatten()
            .and_then(|raw| DesignKind::parse(&raw))
    }

    /// Returns true when a readable design is stored.
    #[must_use]
    pub fn has_design_in_progress(&self) -> bool {
        self.load().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::local::{FileKeyValueStore, MemoryKeyValueStore};
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn design() -> SavedDesign {
        SavedDesign {
            kind: DesignKind::Gallery,
            image_url: "https://img/oval.png".to_string(),
            description: "Oval halo".to_string(),
            prompt: None,
            title: Some("Oval Halo".to_string()),
            timestamp: Utc.timestamp_opt(1_718_000_000, 0).unwrap(),
        }
    }

    /// Fails every write after the first `allowed`.
    struct FlakyStore {
        inner: MemoryKeyValueStore,
        allowed: usize,
        writes: AtomicUsize,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if self.writes.fetch_add(1, Ordering::SeqCst) >= self.allowed {
                return Err(crate::Error::OperationFailed {
                    operation: "set_value".to_string(),
                    cause: "disk full".to_string(),
                });
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_save_and_load() {
        let mirror = LocalMirror::new(
            Arc::new(MemoryKeyValueStore::new()),
            StorageKeys::default(),
        );
        assert!(!mirror.has_design_in_progress());

        mirror.save(&design()).unwrap();

        assert_eq!(mirror.load(), Some(design()));
        assert_eq!(mirror.load_timestamp(), Some(design().timestamp));
        assert_eq!(mirror.load_kind(), Some(DesignKind::Gallery));
        assert!(mirror.has_design_in_progress());
    }

    #[test]
    fn test_save_overwrites() {
        let mirror = LocalMirror::new(
            Arc::new(MemoryKeyValueStore::new()),
            StorageKeys::default(),
        );
        mirror.save(&design()).unwrap();

        let mut custom = design();
        custom.kind = DesignKind::Custom;
        custom.prompt = Some("twisted band".to_string());
        mirror.save(&custom).unwrap();

        assert_eq!(mirror.load(), Some(custom));
        assert_eq!(mirror.load_kind(), Some(DesignKind::Custom));
    }

    #[test]
    fn test_malformed_payload_is_absent() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set("ring_design", "{not json").unwrap();
        let mirror = LocalMirror::new(store, StorageKeys::default());

        assert_eq!(mirror.load(), None);
        assert!(!mirror.has_design_in_progress());
    }

    #[test]
    fn test_partial_save_keeps_earlier_writes() {
        let store = Arc::new(FlakyStore {
            inner: MemoryKeyValueStore::new(),
            allowed: 1,
            writes: AtomicUsize::new(0),
        });
        let mirror = LocalMirror::new(store.clone(), StorageKeys::default());

        assert!(mirror.save(&design()).is_err());
        assert_eq!(mirror.load(), Some(design()));
        assert_eq!(mirror.load_timestamp(), None);
        assert_eq!(mirror.load_kind(), None);
    }

    #[test]
    fn test_file_backed_mirror_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let keys = StorageKeys::default();

        LocalMirror::new(Arc::new(FileKeyValueStore::new(dir.path())), keys.clone())
            .save(&design())
            .unwrap();

        let reopened = LocalMirror::new(Arc::new(FileKeyValueStore::new(dir.path())), keys);
        assert_eq!(reopened.load(), Some(design()));
    }
}
