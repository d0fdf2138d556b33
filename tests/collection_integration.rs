//! Integration tests for collection, trash and "The One" operations.
//!
//! Drives the services over the in-memory document store, wrapped to count
//! backend calls or to inject failures for chosen documents.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use ring_designer::models::{Collection, DesignKind, Ring, RingDraft, RingKind, SavedDesign};
use ring_designer::services::{CollectionStore, TermPreviewCache, TheOneService, TrashService};
use ring_designer::storage::{Document, DocumentStore, Fields, InMemoryDocumentStore};
use ring_designer::{Error, Result};

/// Counts every backend call.
#[derive(Default)]
struct CountingStore {
    inner: InMemoryDocumentStore,
    calls: AtomicUsize,
}

impl CountingStore {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl DocumentStore for CountingStore {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn create_document(&self, collection: Collection, fields: &Fields) -> Result<String> {
        self.tick();
        self.inner.create_document(collection, fields)
    }

    fn put_document(&self, collection: Collection, id: &str, fields: &Fields) -> Result<()> {
        self.tick();
        self.inner.put_document(collection, id, fields)
    }

    fn get_document(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        self.tick();
        self.inner.get_document(collection, id)
    }

    fn list_documents(&self, collection: Collection) -> Result<Vec<Document>> {
        self.tick();
        self.inner.list_documents(collection)
    }

    fn delete_document(&self, collection: Collection, id: &str) -> Result<bool> {
        self.tick();
        self.inner.delete_document(collection, id)
    }
}

/// Fails writes or deletes of chosen documents and records every delete.
#[derive(Default)]
struct FaultyStore {
    inner: InMemoryDocumentStore,
    failing_puts: Mutex<HashSet<(Collection, String)>>,
    failing_deletes: Mutex<HashSet<(Collection, String)>>,
    deletes: Mutex<Vec<(Collection, String)>>,
}

impl FaultyStore {
    fn fail_put(&self, collection: Collection, id: &str) {
        self.failing_puts
            .lock()
            .unwrap()
            .insert((collection, id.to_string()));
    }

    fn fail_delete(&self, collection: Collection, id: &str) {
        self.failing_deletes
            .lock()
            .unwrap()
            .insert((collection, id.to_string()));
    }

    fn deletes(&self) -> Vec<(Collection, String)> {
        self.deletes.lock().unwrap().clone()
    }

    fn ids(&self, collection: Collection) -> Vec<String> {
        self.inner
            .list_documents(collection)
            .unwrap()
            .iter()
            .filter_map(|doc| doc.document_id().map(str::to_string))
            .collect()
    }

    fn injected(operation: &str) -> Error {
        Error::NetworkFailure {
            operation: operation.to_string(),
            status: Some(503),
            cause: "Firebase error: 503".to_string(),
        }
    }
}

impl DocumentStore for FaultyStore {
    fn name(&self) -> &'static str {
        "faulty"
    }

    fn create_document(&self, collection: Collection, fields: &Fields) -> Result<String> {
        self.inner.create_document(collection, fields)
    }

    fn put_document(&self, collection: Collection, id: &str, fields: &Fields) -> Result<()> {
        if self
            .failing_puts
            .lock()
            .unwrap()
            .contains(&(collection, id.to_string()))
        {
            return Err(Self::injected("put_document"));
        }
        self.inner.put_document(collection, id, fields)
    }

    fn get_document(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        self.inner.get_document(collection, id)
    }

    fn list_documents(&self, collection: Collection) -> Result<Vec<Document>> {
        self.inner.list_documents(collection)
    }

    fn delete_document(&self, collection: Collection, id: &str) -> Result<bool> {
        self.deletes
            .lock()
            .unwrap()
            .push((collection, id.to_string()));
        if self
            .failing_deletes
            .lock()
            .unwrap()
            .contains(&(collection, id.to_string()))
        {
            return Err(Self::injected("delete_document"));
        }
        self.inner.delete_document(collection, id)
    }
}

fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn ring(id: &str, secs: i64, is_the_one: bool) -> Ring {
    Ring {
        id: id.to_string(),
        image_url: format!("https://img/{id}.png"),
        prompt: String::new(),
        title: id.to_uppercase(),
        kind: RingKind::Gallery,
        designer_name: "Ada".to_string(),
        is_the_one,
        created_at: Some(ts(secs)),
    }
}

fn seed(store: &CollectionStore, collection: Collection, rings: &[Ring]) {
    for r in rings {
        store.create(collection, &r.id, r).unwrap();
    }
}

fn seed_trash(store: &CollectionStore, trash: &TrashService, rings: &[Ring]) {
    for r in rings {
        trash.move_to_trash(r).unwrap();
    }
    assert_eq!(store.get_trash().unwrap().len(), rings.len());
}

#[test]
fn test_unconfigured_store_makes_no_backend_calls() {
    let backend = Arc::new(CountingStore::default());
    let store = CollectionStore::unconfigured(backend.clone());
    let trash = TrashService::new(store.clone());
    let the_one = TheOneService::new(store.clone());
    let previews = TermPreviewCache::new(store.clone());

    let not_configured = |result: Result<()>| {
        let err = result.unwrap_err();
        assert!(matches!(err, Error::NotConfigured { .. }), "{err}");
        assert_eq!(err.to_string(), "Firebase not configured");
    };

    not_configured(store.get_collection().map(|_| ()));
    not_configured(store.get_trash().map(|_| ()));
    not_configured(store.get_designs().map(|_| ()));
    not_configured(store.get_latest_design().map(|_| ()));
    not_configured(store.save_to_collection(RingDraft::default()).map(|_| ()));
    not_configured(
        store
            .save_design(&SavedDesign {
                kind: DesignKind::Custom,
                image_url: "https://img/1.png".to_string(),
                description: "Oval halo".to_string(),
                prompt: None,
                title: None,
                timestamp: ts(0),
            })
            .map(|_| ()),
    );
    not_configured(trash.remove_from_collection("ring_1"));
    not_configured(trash.restore_from_trash("ring_1").map(|_| ()));
    not_configured(trash.permanently_delete("ring_1"));
    not_configured(trash.restore_all_from_trash(None).map(|_| ()));
    not_configured(trash.empty_trash(None).map(|_| ()));
    not_configured(the_one.mark_as_the_one("ring_1").map(|_| ()));
    not_configured(the_one.unmark_as_the_one("ring_1").map(|_| ()));
    not_configured(the_one.get_the_one().map(|_| ()));
    not_configured(previews.save("Round", "https://img/r.png", "Round").map(|_| ()));
    not_configured(previews.all().map(|_| ()));

    assert_eq!(backend.calls(), 0);
}

#[test]
fn test_configured_store_reaches_backend() {
    let backend = Arc::new(CountingStore::default());
    let store = CollectionStore::new(backend.clone());

    assert!(store.get_collection().unwrap().is_empty());
    assert_eq!(backend.calls(), 1);
}

#[test]
fn test_mark_as_the_one_leaves_single_flag() {
    let store = CollectionStore::new(Arc::new(InMemoryDocumentStore::new()));
    seed(
        &store,
        Collection::Rings,
        &[
            ring("ring_a", 100, true),
            ring("ring_b", 200, false),
            ring("ring_c", 300, false),
        ],
    );
    let the_one = TheOneService::new(store.clone());

    let marked = the_one.mark_as_the_one("ring_c").unwrap();
    assert!(marked.is_the_one);

    let flagged: Vec<String> = store
        .get_collection()
        .unwrap()
        .into_iter()
        .filter(|r| r.is_the_one)
        .map(|r| r.id)
        .collect();
    assert_eq!(flagged, vec!["ring_c".to_string()]);
    assert_eq!(the_one.get_the_one().unwrap().id, "ring_c");

    // Other attributes survive the flag rewrite.
    let a = store
        .get_collection()
        .unwrap()
        .into_iter()
        .find(|r| r.id == "ring_a")
        .unwrap();
    assert_eq!(a, ring("ring_a", 100, false));
}

#[test]
fn test_mark_unknown_ring_changes_nothing() {
    let store = CollectionStore::new(Arc::new(InMemoryDocumentStore::new()));
    seed(&store, Collection::Rings, &[ring("ring_a", 100, true)]);
    let the_one = TheOneService::new(store.clone());

    assert!(matches!(
        the_one.mark_as_the_one("ring_missing"),
        Err(Error::NotFound(_))
    ));
    assert_eq!(the_one.get_the_one().unwrap().id, "ring_a");
}

#[test]
fn test_failed_clear_is_skipped_not_rolled_back() {
    let backend = Arc::new(FaultyStore::default());
    let store = CollectionStore::new(backend.clone());
    seed(
        &store,
        Collection::Rings,
        &[
            ring("ring_a", 100, true),
            ring("ring_b", 200, true),
            ring("ring_c", 300, false),
        ],
    );
    backend.fail_put(Collection::Rings, "ring_a");
    let the_one = TheOneService::new(store.clone());

    let marked = the_one.mark_as_the_one("ring_c").unwrap();
    assert!(marked.is_the_one);
    assert_eq!(marked.id, "ring_c");

    let flagged: HashSet<String> = store
        .get_collection()
        .unwrap()
        .into_iter()
        .filter(|r| r.is_the_one)
        .map(|r| r.id)
        .collect();
    let expected: HashSet<String> = ["ring_a", "ring_c"].map(str::to_string).into();
    assert_eq!(flagged, expected);
    assert_eq!(the_one.get_the_one().unwrap().id, "ring_c");
}

#[test]
fn test_restore_after_new_favorite_keeps_single_flag() {
    let store = CollectionStore::new(Arc::new(InMemoryDocumentStore::new()));
    seed(
        &store,
        Collection::Rings,
        &[ring("ring_a", 100, false), ring("ring_b", 200, false)],
    );
    let trash = TrashService::new(store.clone());
    let the_one = TheOneService::new(store.clone());

    the_one.mark_as_the_one("ring_a").unwrap();
    trash.remove_from_collection("ring_a").unwrap();
    the_one.mark_as_the_one("ring_b").unwrap();
    trash.restore_all_from_trash(None).unwrap();

    let flagged: Vec<String> = store
        .get_collection()
        .unwrap()
        .into_iter()
        .filter(|r| r.is_the_one)
        .map(|r| r.id)
        .collect();
    assert_eq!(flagged, vec!["ring_b".to_string()]);
}

#[test]
fn test_remove_then_restore_preserves_creation_time() {
    let store = CollectionStore::new(Arc::new(InMemoryDocumentStore::new()));
    seed(&store, Collection::Rings, &[ring("ring_a", 100, true)]);
    let trash = TrashService::new(store.clone());

    trash.remove_from_collection("ring_a").unwrap();
    assert!(store.get_collection().unwrap().is_empty());

    let trashed = store.get_trash().unwrap();
    assert_eq!(trashed.len(), 1);
    assert_eq!(trashed[0].original_created_at(), Some(ts(100)));
    assert!(trashed[0].deleted_at.is_some());

    let restored = trash.restore_from_trash("ring_a").unwrap();
    assert_eq!(restored, ring("ring_a", 100, true));
    assert_eq!(store.get_collection().unwrap(), vec![ring("ring_a", 100, true)]);
    assert!(store.get_trash().unwrap().is_empty());
}

#[test]
fn test_restore_missing_ring_is_not_found() {
    let store = CollectionStore::new(Arc::new(InMemoryDocumentStore::new()));
    let trash = TrashService::new(store);

    let err = trash.restore_from_trash("ring_missing").unwrap_err();
    assert_eq!(err.to_string(), "not found: Ring not found in trash");
}

#[test]
fn test_failed_trash_copy_keeps_ring_in_collection() {
    let backend = Arc::new(FaultyStore::default());
    let store = CollectionStore::new(backend.clone());
    seed(&store, Collection::Rings, &[ring("ring_a", 100, false)]);
    backend.fail_put(Collection::Trash, "ring_a");

    let trash = TrashService::new(store);
    assert!(trash.remove_from_collection("ring_a").is_err());

    assert_eq!(backend.ids(Collection::Rings), vec!["ring_a".to_string()]);
    assert!(backend.ids(Collection::Trash).is_empty());
    assert!(backend.deletes().is_empty());
}

#[test]
fn test_failed_source_delete_leaves_duplicate() {
    let backend = Arc::new(FaultyStore::default());
    let store = CollectionStore::new(backend.clone());
    seed(&store, Collection::Rings, &[ring("ring_a", 100, false)]);
    backend.fail_delete(Collection::Rings, "ring_a");

    let trash = TrashService::new(store);
    assert!(trash.remove_from_collection("ring_a").is_err());

    assert_eq!(backend.ids(Collection::Rings), vec!["ring_a".to_string()]);
    assert_eq!(backend.ids(Collection::Trash), vec!["ring_a".to_string()]);
}

#[test]
fn test_restore_all_reports_progress() {
    let store = CollectionStore::new(Arc::new(InMemoryDocumentStore::new()));
    let trash = TrashService::new(store.clone());
    let rings: Vec<Ring> = (1..=5)
        .map(|i| ring(&format!("ring_{i}"), i * 100, false))
        .collect();
    seed_trash(&store, &trash, &rings);

    let mut reports = Vec::new();
    let mut on_progress = |done: usize, total: usize| reports.push((done, total));
    let outcome = trash.restore_all_from_trash(Some(&mut on_progress)).unwrap();

    assert!(outcome.success);
    assert_eq!((outcome.processed, outcome.total), (5, 5));
    assert!(outcome.errors.is_empty());
    assert_eq!(reports, vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);
    assert_eq!(store.get_collection().unwrap().len(), 5);
    assert!(store.get_trash().unwrap().is_empty());
}

#[test]
fn test_restore_all_keeps_going_past_failures() {
    let backend = Arc::new(FaultyStore::default());
    let store = CollectionStore::new(backend.clone());
    let trash = TrashService::new(store.clone());
    seed_trash(
        &store,
        &trash,
        &[
            ring("ring_1", 100, false),
            ring("ring_2", 200, false),
            ring("ring_3", 300, false),
        ],
    );
    backend.fail_put(Collection::Rings, "ring_2");

    let outcome = trash.restore_all_from_trash(None).unwrap();
    assert!(outcome.success);
    assert_eq!((outcome.processed, outcome.total), (2, 3));
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].starts_with("Failed to restore ring_2: "));

    // The failed ring is still in the trash, nowhere else.
    assert_eq!(backend.ids(Collection::Trash), vec!["ring_2".to_string()]);
    assert_eq!(
        backend.ids(Collection::Rings),
        vec!["ring_1".to_string(), "ring_3".to_string()]
    );

    match outcome.ensure_complete() {
        Err(Error::PartialFailure {
            succeeded,
            total,
            errors,
        }) => {
            assert_eq!((succeeded, total), (2, 3));
            assert_eq!(errors.len(), 1);
        },
        other => panic!("expected partial failure, got {other:?}"),
    }
}

#[test]
fn test_restore_all_fails_when_every_item_fails() {
    let backend = Arc::new(FaultyStore::default());
    let store = CollectionStore::new(backend.clone());
    let trash = TrashService::new(store.clone());
    seed_trash(&store, &trash, &[ring("ring_1", 100, false)]);
    backend.fail_put(Collection::Rings, "ring_1");

    let outcome = trash.restore_all_from_trash(None).unwrap();
    assert!(!outcome.success);
    assert_eq!((outcome.processed, outcome.total), (0, 1));
}

#[test]
fn test_empty_trash_on_empty_trash_issues_no_deletes() {
    let backend = Arc::new(FaultyStore::default());
    let trash = TrashService::new(CollectionStore::new(backend.clone()));

    let mut calls = 0;
    let mut on_progress = |_: usize, _: usize| calls += 1;
    let outcome = trash.empty_trash(Some(&mut on_progress)).unwrap();

    assert!(outcome.success);
    assert_eq!((outcome.processed, outcome.total), (0, 0));
    assert_eq!(calls, 0);
    assert!(backend.deletes().is_empty());
}

#[test]
fn test_empty_trash_deletes_each_entry_once() {
    let backend = Arc::new(FaultyStore::default());
    let store = CollectionStore::new(backend.clone());
    let trash = TrashService::new(store.clone());
    seed_trash(
        &store,
        &trash,
        &[ring("ring_1", 100, false), ring("ring_2", 200, false)],
    );
    backend.fail_delete(Collection::Trash, "ring_1");

    let outcome = trash.empty_trash(None).unwrap();
    assert_eq!((outcome.processed, outcome.total), (1, 2));
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].starts_with("Failed to delete ring_1: "));

    let mut deleted: Vec<String> = backend.deletes().into_iter().map(|(_, id)| id).collect();
    deleted.sort();
    assert_eq!(deleted, vec!["ring_1".to_string(), "ring_2".to_string()]);
    assert_eq!(backend.ids(Collection::Trash), vec!["ring_1".to_string()]);
}

#[test]
fn test_permanently_delete_absent_ring_succeeds() {
    let store = CollectionStore::new(Arc::new(InMemoryDocumentStore::new()));
    let trash = TrashService::new(store);
    trash.permanently_delete("ring_never_existed").unwrap();
}

#[test]
fn test_listings_are_most_recent_first() {
    let store = CollectionStore::new(Arc::new(InMemoryDocumentStore::new()));
    let mut undated = ring("ring_undated", 0, false);
    undated.created_at = None;
    seed(
        &store,
        Collection::Rings,
        &[
            ring("ring_old", 100, false),
            undated,
            ring("ring_new", 300, false),
        ],
    );

    let ids: Vec<String> = store
        .get_collection()
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["ring_new", "ring_old", "ring_undated"]);
}
