//! Design confirmation: local mirror first, then the cloud archive.

use crate::models::SavedDesign;
use crate::services::CollectionStore;
use crate::storage::LocalMirror;
use serde::Serialize;
use tracing::instrument;

/// What a confirmation managed to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    /// The design as written, with its confirmation timestamp.
    pub design: SavedDesign,
    /// Whether the local mirror write succeeded.
    pub saved_locally: bool,
    /// Document name of the cloud archive entry, when that write succeeded.
    pub cloud_id: Option<String>,
    /// Why the cloud write did not happen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_error: Option<String>,
}

impl Confirmation {
    /// Returns true when at least one copy was written.
    #[must_use]
    pub const fn persisted(&self) -> bool {
        self.saved_locally || self.cloud_id.is_some()
    }
}

/// Writes confirmed designs to both stores.
///
/// The two writes are independent. Neither failure stops the other, and
/// nothing reconciles them afterwards.
#[derive(Clone)]
pub struct DesignService {
    mirror: LocalMirror,
    store: CollectionStore,
}

impl DesignService {
    /// Creates the service.
    #[must_use]
    pub const fn new(mirror: LocalMirror, store: CollectionStore) -> Self {
        Self { mirror, store }
    }

    /// Stamps the design with the current time and writes it locally and to
    /// the cloud archive.
    #[instrument(skip(self, design), fields(kind = %design.kind))]
    pub fn confirm(&self, mut design: SavedDesign) -> Confirmation {
        design.timestamp = crate::now();

        let saved_locally = match self.mirror.save(&design) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Local design save failed: {e}");
                false
            },
        };

        let (cloud_id, cloud_error) = match self.store.save_design(&design) {
            Ok(id) => (Some(id), None),
            Err(e) => {
                tracing::warn!("Cloud design save skipped: {e}");
                (None, Some(e.to_string()))
            },
        };

        Confirmation {
            design,
            saved_locally,
            cloud_id,
            cloud_error,
        }
    }

    /// Returns the locally mirrored design, if any.
    #[must_use]
    pub fn current(&self) -> Option<SavedDesign> {
        self.mirror.load()
    }

    /// Returns true when a design from an earlier session is stored locally.
    #[must_use]
    pub fn has_design_in_progress(&self) -> bool {
        self.mirror.has_design_in_progress()
    }
}
