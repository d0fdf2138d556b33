//! Business logic services.
//!
//! Services orchestrate the storage backends and provide the high-level
//! operations: collection CRUD, soft delete, the favorite flag, design
//! confirmation and the term preview cache.

mod collection;
mod design;
mod term_preview;
mod the_one;
mod trash;

pub use collection::CollectionStore;
pub use design::{Confirmation, DesignService};
pub use term_preview::TermPreviewCache;
pub use the_one::TheOneService;
pub use trash::{StagedMove, SweepAction, SweepItem, TrashService, TrashSweep};

use crate::config::RingConfig;
use crate::storage::{DocumentStore, FileKeyValueStore, FirestoreClient, LocalMirror};
use std::sync::Arc;

/// Directory under the data dir holding the local mirror.
const MIRROR_DIR: &str = "mirror";

/// All services wired over one document store and one local mirror.
#[derive(Clone)]
pub struct ServiceContainer {
    collections: CollectionStore,
    trash: TrashService,
    the_one: TheOneService,
    designs: DesignService,
    previews: TermPreviewCache,
    mirror: LocalMirror,
}

impl ServiceContainer {
    /// Wires services over an existing store and mirror.
    #[must_use]
    pub fn new(collections: CollectionStore, mirror: LocalMirror) -> Self {
        Self {
            trash: TrashService::new(collections.clone()),
            the_one: TheOneService::new(collections.clone()),
            designs: DesignService::new(mirror.clone(), collections.clone()),
            previews: TermPreviewCache::new(collections.clone()),
            collections,
            mirror,
        }
    }

    /// Builds the Firestore-backed services described by `config`.
    ///
    /// A placeholder project id yields services that refuse every remote
    /// operation; the local mirror works regardless.
    #[must_use]
    pub fn from_config(config: &RingConfig) -> Self {
        let backend: Arc<dyn DocumentStore> =
            Arc::new(FirestoreClient::new(&config.firestore).with_http_config(config.http));
        let collections = if config.firestore.is_configured() {
            CollectionStore::new(backend)
        } else {
            tracing::debug!("Document store not configured, remote operations disabled");
            CollectionStore::unconfigured(backend)
        };

        let mirror = LocalMirror::new(
            Arc::new(FileKeyValueStore::new(config.data_dir.join(MIRROR_DIR))),
            config.storage_keys.clone(),
        );

        Self::new(collections, mirror)
    }

    /// Collection CRUD.
    #[must_use]
    pub const fn collections(&self) -> &CollectionStore {
        &self.collections
    }

    /// Trash operations.
    #[must_use]
    pub const fn trash(&self) -> &TrashService {
        &self.trash
    }

    /// The favorite flag.
    #[must_use]
    pub const fn the_one(&self) -> &TheOneService {
        &self.the_one
    }

    /// Design confirmation.
    #[must_use]
    pub const fn designs(&self) -> &DesignService {
        &self.designs
    }

    /// Term previews.
    #[must_use]
    pub const fn previews(&self) -> &TermPreviewCache {
        &self.previews
    }

    /// The local mirror.
    #[must_use]
    pub const fn mirror(&self) -> &LocalMirror {
        &self.mirror
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_default_config_is_offline() {
        let dir = TempDir::new().unwrap();
        let config = RingConfig::default().with_data_dir(dir.path());
        let services = ServiceContainer::from_config(&config);

        assert!(!services.collections().is_configured());
        assert_eq!(services.collections().backend_name(), "firestore");
        assert!(services.trash().empty_trash(None).is_err());
        assert!(!services.mirror().has_design_in_progress());
    }

    #[test]
    fn test_from_config_with_project() {
        let dir = TempDir::new().unwrap();
        let config = RingConfig::default()
            .with_data_dir(dir.path())
            .with_project_id("ring-b6de2");
        let services = ServiceContainer::from_config(&config);

        assert!(services.collections().is_configured());
    }
}
