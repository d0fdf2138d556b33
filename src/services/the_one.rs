//! "The One": the single ring flagged as the user's final choice.

use crate::models::{Collection, Ring};
use crate::services::CollectionStore;
use crate::{Error, Result};
use tracing::instrument;

/// Service maintaining the single-favorite flag across the collection.
///
/// Consistency is best effort. Clearing the previous favorite is not retried
/// or rolled back; a failed clear can leave two flagged rings until the next
/// successful [`TheOneService::mark_as_the_one`].
#[derive(Clone)]
pub struct TheOneService {
    store: CollectionStore,
}

impl TheOneService {
    /// Creates the service over a collection store.
    #[must_use]
    pub const fn new(store: CollectionStore) -> Self {
        Self { store }
    }

    fn find(&self, id: &str) -> Result<(Ring, Vec<Ring>)> {
        let rings = self.store.get_collection()?;
        let target = rings
            .iter()
            .find(|ring| ring.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Ring not found".to_string()))?;
        Ok((target, rings))
    }

    /// Flags `id` as The One, clearing the flag on every other ring first.
    ///
    /// Clears run one at a time. A failed clear is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the ring is not in the collection (nothing is
    /// changed), or an error if the listing or the final write fails.
    #[instrument(skip(self))]
    pub fn mark_as_the_one(&self, id: &str) -> Result<Ring> {
        let (target, rings) = self.find(id)?;

        for ring in rings.into_iter().filter(|r| r.is_the_one && r.id != id) {
            let ring_id = ring.id.clone();
            if let Err(e) = self
                .store
                .create(Collection::Rings, &ring_id, &ring.with_the_one(false))
            {
                tracing::warn!(ring_id = %ring_id, "Failed to clear previous favorite: {e}");
            }
        }

        let marked = target.with_the_one(true);
        self.store.create(Collection::Rings, id, &marked)?;

        tracing::info!(ring_id = id, "Marked as The One");
        metrics::counter!("the_one_marked_total").increment(1);
        Ok(marked)
    }

    /// Clears the flag on `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the ring is not in the collection, or an error if
    /// the listing or write fails.
    #[instrument(skip(self))]
    pub fn unmark_as_the_one(&self, id: &str) -> Result<Ring> {
        let (target, _) = self.find(id)?;
        let unmarked = target.with_the_one(false);
        self.store.create(Collection::Rings, id, &unmarked)?;

        tracing::info!(ring_id = id, "Unmarked as The One");
        Ok(unmarked)
    }

    /// Returns the flagged ring. With several flagged, the most recent wins.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no ring is flagged.
    pub fn get_the_one(&self) -> Result<Ring> {
        self.store
            .get_collection()?
            .into_iter()
            .find(|ring| ring.is_the_one)
            .ok_or_else(|| Error::NotFound("No ring marked as The One".to_string()))
    }
}
