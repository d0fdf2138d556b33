//! Soft delete: moving rings between the active collection and the trash.
//!
//! Every move is two-phase. The record is first staged at its destination
//! ([`StagedMove`]); only [`StagedMove::confirm`] deletes the source. A failure
//! between the phases leaves the ring in both collections. That duplicated
//! state is the recovery point: repeating the operation converges, and the
//! ring is never in neither collection.

use crate::models::{BatchKind, BatchOutcome, Collection, Ring, TrashedRing};
use crate::services::CollectionStore;
use crate::{Error, Result};
use std::vec;
use tracing::instrument;

/// A record written to its destination whose source still exists.
#[must_use = "the source copy stays until the move is confirmed"]
pub struct StagedMove<'a> {
    store: &'a CollectionStore,
    id: String,
    from: Collection,
    to: Collection,
}

impl StagedMove<'_> {
    /// The ring being moved.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Deletes the source copy, completing the move.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails; the ring then remains in both
    /// collections.
    pub fn confirm(self) -> Result<()> {
        self.store.remove(self.from, &self.id).inspect_err(|e| {
            tracing::error!(
                ring_id = %self.id,
                from = %self.from,
                to = %self.to,
                "Move staged but source not deleted, ring is in both collections: {e}"
            );
        })
    }
}

/// What a sweep does to each trashed ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepAction {
    /// Restore to the active collection.
    Restore,
    /// Delete permanently.
    Purge,
}

impl SweepAction {
    const fn verb(self) -> &'static str {
        match self {
            Self::Restore => "restore",
            Self::Purge => "delete",
        }
    }

    const fn batch_kind(self) -> BatchKind {
        match self {
            Self::Restore => BatchKind::Restore,
            Self::Purge => BatchKind::Delete,
        }
    }
}

/// Result for one ring of a sweep.
#[derive(Debug)]
pub struct SweepItem {
    /// Ring id.
    pub id: String,
    /// Outcome of the action.
    pub result: Result<()>,
}

/// Lazily applies one action to every ring that was in the trash when the
/// sweep started, in listing order, one at a time.
///
/// Each call to [`TrashService::restore_sweep`] or
/// [`TrashService::purge_sweep`] lists the trash afresh.
pub struct TrashSweep<'a> {
    service: &'a TrashService,
    action: SweepAction,
    pending: vec::IntoIter<String>,
    total: usize,
}

impl TrashSweep<'_> {
    /// Number of rings the sweep will visit.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Runs the sweep to completion, recording failures and continuing.
    ///
    /// `on_progress(done, total)` is called after each successful item.
    #[must_use]
    pub fn run(self, mut on_progress: Option<&mut dyn FnMut(usize, usize)>) -> BatchOutcome {
        let total = self.total;
        let kind = self.action.batch_kind();
        if total == 0 {
            return BatchOutcome::empty(kind);
        }

        let verb = self.action.verb();
        let mut processed = 0;
        let mut errors = Vec::new();

        for item in self {
            match item.result {
                Ok(()) => {
                    processed += 1;
                    if let Some(report) = on_progress.as_mut() {
                        report(processed, total);
                    }
                },
                Err(e) => errors.push(format!("Failed to {verb} {}: {e}", item.id)),
            }
        }

        tracing::info!(
            action = verb,
            processed,
            total,
            failed = errors.len(),
            "Trash sweep finished"
        );
        BatchOutcome::from_counts(kind, processed, total, errors)
    }
}

impl Iterator for TrashSweep<'_> {
    type Item = SweepItem;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.pending.next()?;
        let result = match self.action {
            SweepAction::Restore => self.service.restore_from_trash(&id).map(|_| ()),
            SweepAction::Purge => self.service.permanently_delete(&id),
        };
        Some(SweepItem { id, result })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pending.size_hint()
    }
}

/// Service for trash operations.
#[derive(Clone)]
pub struct TrashService {
    store: CollectionStore,
}

impl TrashService {
    /// Creates a trash service over a collection store.
    #[must_use]
    pub const fn new(store: CollectionStore) -> Self {
        Self { store }
    }

    /// Writes a ring into the trash, stamped with the deletion time.
    ///
    /// The ring is not removed from the active collection.
    ///
    /// # Errors
    ///
    /// Returns an error if unconfigured or the write fails.
    #[instrument(skip(self, ring), fields(ring_id = %ring.id))]
    pub fn move_to_trash(&self, ring: &Ring) -> Result<TrashedRing> {
        let id = if ring.id.is_empty() {
            format!("ring_{}", crate::now().timestamp_millis())
        } else {
            ring.id.clone()
        };
        let mut ring = ring.clone();
        ring.id.clone_from(&id);

        let trashed = TrashedRing::from_ring(ring, crate::now());
        self.store.create(Collection::Trash, &id, &trashed)?;

        tracing::info!(ring_id = %id, "Moved ring to trash");
        metrics::counter!("trash_moved_total").increment(1);
        Ok(trashed)
    }

    /// Stages a ring in the trash; confirming deletes it from the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the trash write fails.
    pub fn stage_to_trash(&self, ring: &Ring) -> Result<StagedMove<'_>> {
        let trashed = self.move_to_trash(ring)?;
        Ok(StagedMove {
            store: &self.store,
            id: trashed.ring.id,
            from: Collection::Rings,
            to: Collection::Trash,
        })
    }

    /// Soft-deletes a ring: copy into the trash, then delete from the
    /// collection.
    ///
    /// A ring missing from the collection listing is still deleted from the
    /// collection, without a trash copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing, the trash write or the delete fails.
    /// Nothing is deleted unless the trash copy was written.
    #[instrument(skip(self))]
    pub fn remove_from_collection(&self, id: &str) -> Result<()> {
        let ring = self
            .store
            .get_collection()?
            .into_iter()
            .find(|ring| ring.id == id);

        match ring {
            Some(ring) => self.stage_to_trash(&ring)?.confirm()?,
            None => {
                tracing::warn!(
                    ring_id = id,
                    "Ring not in collection listing, deleting without trash copy"
                );
                self.store.remove(Collection::Rings, id)?;
            },
        }

        tracing::info!(ring_id = id, "Removed ring from collection");
        Ok(())
    }

    /// Stages a trashed ring back in the collection, with its original
    /// creation time; confirming deletes it from the trash.
    ///
    /// A ring trashed while it was "The One" comes back unflagged when
    /// another ring has been marked since.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the ring is not in the trash, or an error if the
    /// read or write fails.
    pub fn stage_restore(&self, id: &str) -> Result<(Ring, StagedMove<'_>)> {
        let trashed: TrashedRing = self
            .store
            .get(Collection::Trash, id)?
            .ok_or_else(|| Error::NotFound("Ring not found in trash".to_string()))?;

        let mut ring = trashed.into_ring(crate::now());
        if ring.id.is_empty() {
            ring.id = id.to_string();
        }
        if ring.is_the_one && self.other_ring_is_the_one(id)? {
            tracing::info!(ring_id = id, "Another ring is The One, restoring unflagged");
            ring.is_the_one = false;
        }
        self.store.create(Collection::Rings, id, &ring)?;

        let staged = StagedMove {
            store: &self.store,
            id: id.to_string(),
            from: Collection::Trash,
            to: Collection::Rings,
        };
        Ok((ring, staged))
    }

    fn other_ring_is_the_one(&self, id: &str) -> Result<bool> {
        Ok(self
            .store
            .get_collection()?
            .iter()
            .any(|ring| ring.is_the_one && ring.id != id))
    }

    /// Restores a ring from the trash: write to the collection, then delete
    /// from the trash.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the ring is not in the trash, or an error if any
    /// step fails.
    #[instrument(skip(self))]
    pub fn restore_from_trash(&self, id: &str) -> Result<Ring> {
        let (ring, staged) = self.stage_restore(id)?;
        staged.confirm()?;

        tracing::info!(ring_id = id, "Restored ring from trash");
        metrics::counter!("trash_restored_total").increment(1);
        Ok(ring)
    }

    /// Deletes a ring from the trash. Deleting something absent succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if unconfigured or the delete fails.
    #[instrument(skip(self))]
    pub fn permanently_delete(&self, id: &str) -> Result<()> {
        self.store.remove(Collection::Trash, id)?;

        tracing::info!(ring_id = id, "Permanently deleted ring");
        metrics::counter!("trash_purged_total").increment(1);
        Ok(())
    }

    /// Lists the trash and returns a sweep restoring each entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the trash cannot be listed.
    pub fn restore_sweep(&self) -> Result<TrashSweep<'_>> {
        self.sweep(SweepAction::Restore)
    }

    /// Lists the trash and returns a sweep deleting each entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the trash cannot be listed.
    pub fn purge_sweep(&self) -> Result<TrashSweep<'_>> {
        self.sweep(SweepAction::Purge)
    }

    fn sweep(&self, action: SweepAction) -> Result<TrashSweep<'_>> {
        let ids: Vec<String> = self
            .store
            .get_trash()?
            .into_iter()
            .map(|trashed| trashed.ring.id)
            .collect();

        Ok(TrashSweep {
            service: self,
            action,
            total: ids.len(),
            pending: ids.into_iter(),
        })
    }

    /// Restores every trashed ring, one at a time, continuing past failures.
    ///
    /// # Errors
    ///
    /// Returns an error only if the trash cannot be listed; per-ring failures
    /// are reported in the outcome.
    #[instrument(skip(self, on_progress))]
    pub fn restore_all_from_trash(
        &self,
        on_progress: Option<&mut dyn FnMut(usize, usize)>,
    ) -> Result<BatchOutcome> {
        Ok(self.restore_sweep()?.run(on_progress))
    }

    /// Permanently deletes every trashed ring, one at a time, continuing past
    /// failures. An empty trash issues no deletes.
    ///
    /// # Errors
    ///
    /// Returns an error only if the trash cannot be listed.
    #[instrument(skip(self, on_progress))]
    pub fn empty_trash(
        &self,
        on_progress: Option<&mut dyn FnMut(usize, usize)>,
    ) -> Result<BatchOutcome> {
        Ok(self.purge_sweep()?.run(on_progress))
    }
}
