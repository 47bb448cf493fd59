//! JSON snapshot store tests.
//!
//! Run with: `cargo test -p rems-persistence --test json_store_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use rems_core::snapshot::{SnapshotError, SnapshotStore};
use rems_persistence::JsonSnapshotStore;
use rems_testing::fixtures::sample_ledger;

#[tokio::test]
async fn load_before_any_save_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSnapshotStore::new(dir.path().join("rems.json"));

    let loaded = store.load().await.expect("missing file is not an error");
    assert!(loaded.is_none());
}

#[tokio::test]
async fn snapshot_round_trips_through_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSnapshotStore::new(dir.path().join("rems.json"));

    let ledger = sample_ledger();
    store.save(ledger.snapshot()).await.expect("save succeeds");

    let loaded = store
        .load()
        .await
        .expect("load succeeds")
        .expect("snapshot present");
    assert_eq!(loaded.ledger, ledger);

    // No staging leftovers after a completed save.
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("rems.json")]);
}

#[tokio::test]
async fn later_saves_replace_earlier_ones() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSnapshotStore::new(dir.path().join("rems.json"));

    let mut ledger = sample_ledger();
    store.save(ledger.snapshot()).await.unwrap();

    let env = rems_core::environment::LedgerEnvironment::default();
    ledger.create_project(&env, "Second Project");
    store.save(ledger.snapshot()).await.unwrap();

    let loaded = store.load().await.unwrap().expect("snapshot present");
    assert_eq!(loaded.ledger.projects().len(), ledger.projects().len());
}

#[tokio::test]
async fn corrupt_file_is_a_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rems.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let store = JsonSnapshotStore::new(path);
    let result = store.load().await;
    assert!(matches!(result, Err(SnapshotError::Serialization(_))));
}
