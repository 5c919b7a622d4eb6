//! End-to-end flows against an on-disk database.

use tempfile::TempDir;
use zennotes::{Error, NoteId, NoteStore, Persistence, Storage};

fn open_store(dir: &TempDir) -> NoteStore<Storage> {
    let storage = Storage::open(dir.path().join("notes.db")).unwrap();
    NoteStore::open(Persistence::new(storage))
}

#[test]
fn test_notes_survive_reopen() {
    let dir = TempDir::new().unwrap();

    let (first, second) = {
        let mut store = open_store(&dir);
        let first = store.create("Groceries", "milk, eggs");
        let second = store.create("Ideas", "write a CLI");
        assert!(store.is_durable());
        (first, second)
    };

    let store = open_store(&dir);
    assert_eq!(store.len(), 2);
    assert_eq!(store.list()[0], second);
    assert_eq!(store.list()[1], first);
}

#[test]
fn test_update_and_delete_survive_reopen() {
    let dir = TempDir::new().unwrap();

    let kept = {
        let mut store = open_store(&dir);
        let doomed = store.create("Old", "remove me");
        let kept = store.create("Draft", "first pass");
        store.update(&kept.id, "Final", "second pass").unwrap();
        assert!(store.delete(&doomed.id));
        kept
    };

    let store = open_store(&dir);
    assert_eq!(store.len(), 1);
    let note = store.get(&kept.id).unwrap();
    assert_eq!(note.title, "Final");
    assert_eq!(note.content, "second pass");
    assert_eq!(note.created_at, kept.created_at);
    assert!(note.updated_at >= kept.updated_at);
}

#[test]
fn test_update_unknown_id_is_not_found() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.create("Only", "note");

    let err = store
        .update(&NoteId::from("missing"), "t", "c")
        .unwrap_err();
    assert!(matches!(err, Error::NoteNotFound { .. }));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_search_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir);
    store.create("Groceries", "Buy MILK");
    store.create("Work", "standup notes");

    let hits = store.search("milk");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Groceries");
    assert_eq!(store.search("").len(), 2);
}

#[test]
fn test_export_then_import_into_fresh_database() {
    let source_dir = TempDir::new().unwrap();
    let exported = {
        let mut store = open_store(&source_dir);
        store.create("One", "first");
        store.create("Two", "second");
        store.export().unwrap()
    };

    let target_dir = TempDir::new().unwrap();
    {
        let mut store = open_store(&target_dir);
        store.create("Local", "already here");
        let report = store.import(&exported).unwrap();
        assert_eq!(report.imported, 2);
        assert_eq!(report.total, 3);
    }

    let store = open_store(&target_dir);
    let titles: Vec<&str> = store.list().iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, ["Two", "One", "Local"]);
}

#[test]
fn test_failed_import_leaves_database_unchanged() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = open_store(&dir);
        store.create("Keep", "me");
        assert!(store.import("{\"not\": \"an array\"}").is_err());
        assert!(store.import("not json").is_err());
        assert!(store.import("[{\"foo\": 1}]").is_err());
    }

    let store = open_store(&dir);
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].title, "Keep");
}

#[test]
fn test_custom_storage_key_is_isolated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.db");

    {
        let storage = Storage::open(&path).unwrap();
        let mut store = NoteStore::open(Persistence::with_key(storage, "work"));
        store.create("Work", "only under the work key");
    }

    let storage = Storage::open(&path).unwrap();
    let store = NoteStore::open(Persistence::new(storage));
    assert!(store.is_empty());
}
