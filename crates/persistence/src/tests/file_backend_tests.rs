// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_ticket;
use crate::{DocumentStore, RecordStore};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique test data directories.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each test directory receives a unique sequential ID.
static DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

fn create_test_dir() -> PathBuf {
    let id: u64 = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("helpdesk-store-{}-{id}", std::process::id()))
}

#[test]
fn test_documents_survive_store_reconstruction() {
    let dir: PathBuf = create_test_dir();
    {
        let mut store: DocumentStore = DocumentStore::new_with_dir(&dir).unwrap();
        store.upsert_ticket(&create_test_ticket(1)).unwrap();
    }

    let reopened: DocumentStore = DocumentStore::new_with_dir(&dir).unwrap();
    let tickets = reopened.read_tickets();

    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].id, 1);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_collections_map_to_one_file_each() {
    let dir: PathBuf = create_test_dir();
    let mut store: DocumentStore = DocumentStore::new_with_dir(&dir).unwrap();

    store.upsert_ticket(&create_test_ticket(1)).unwrap();

    assert!(dir.join("tickets.json").is_file());
    assert!(!dir.join("users.json").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_corrupted_file_recovers_as_empty() {
    let dir: PathBuf = create_test_dir();
    let store: DocumentStore = DocumentStore::new_with_dir(&dir).unwrap();
    fs::write(dir.join("tickets.json"), "][ definitely not json").unwrap();

    assert!(store.read_tickets().is_empty());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_removed_ticket_collection_rewrites_the_file() {
    let dir: PathBuf = create_test_dir();
    let mut store: DocumentStore = DocumentStore::new_with_dir(&dir).unwrap();
    store.upsert_ticket(&create_test_ticket(1)).unwrap();

    store.remove_ticket(1).unwrap();

    let payload: String = fs::read_to_string(dir.join("tickets.json")).unwrap();
    assert_eq!(payload.trim(), "[]");

    fs::remove_dir_all(&dir).unwrap();
}
