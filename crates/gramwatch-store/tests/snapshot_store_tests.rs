//! Integration tests for the SQLite snapshot store.
//!
//! Covers the round-trip contract (`replace(S, t); load() == S` for any S
//! including the empty set), partition isolation, and the new-account case.

use chrono::Utc;
use gramwatch_core::run::SnapshotStore;
use gramwatch_core_types::{Identity, RelationKind};
use gramwatch_store::SqliteSnapshotStore;
use std::collections::HashSet;

fn set(members: &[&str]) -> HashSet<Identity> {
    members.iter().map(|m| Identity::from(*m)).collect()
}

fn store() -> SqliteSnapshotStore {
    SqliteSnapshotStore::open_in_memory(&Identity::from("target")).unwrap()
}

#[test]
fn test_new_account_loads_empty_set() {
    let mut store = store();
    for kind in RelationKind::ALL {
        assert!(store.load(kind).unwrap().is_empty());
    }
}

#[test]
fn test_replace_then_load_round_trip() {
    let mut store = store();
    let members = set(&["alice", "bob", "carol"]);

    store
        .replace(RelationKind::Followers, &members, Utc::now())
        .unwrap();

    assert_eq!(store.load(RelationKind::Followers).unwrap(), members);
}

#[test]
fn test_replace_with_empty_set_round_trips() {
    let mut store = store();
    store
        .replace(RelationKind::Followers, &set(&["a"]), Utc::now())
        .unwrap();

    // A legitimate total loss persists as the empty set.
    store
        .replace(RelationKind::Followers, &set(&[]), Utc::now())
        .unwrap();
    assert!(store.load(RelationKind::Followers).unwrap().is_empty());
}

#[test]
fn test_replace_is_full_not_incremental() {
    let mut store = store();
    store
        .replace(RelationKind::Followers, &set(&["alice", "bob"]), Utc::now())
        .unwrap();
    store
        .replace(
            RelationKind::Followers,
            &set(&["alice", "carol"]),
            Utc::now(),
        )
        .unwrap();

    // bob is gone entirely, not merged
    assert_eq!(
        store.load(RelationKind::Followers).unwrap(),
        set(&["alice", "carol"])
    );
}

#[test]
fn test_relation_kinds_are_isolated() {
    let mut store = store();
    store
        .replace(RelationKind::Followers, &set(&["fan"]), Utc::now())
        .unwrap();
    store
        .replace(RelationKind::Followees, &set(&["fave"]), Utc::now())
        .unwrap();

    assert_eq!(store.load(RelationKind::Followers).unwrap(), set(&["fan"]));
    assert_eq!(store.load(RelationKind::Followees).unwrap(), set(&["fave"]));

    store
        .replace(RelationKind::Followers, &set(&[]), Utc::now())
        .unwrap();
    // Clearing one partition does not disturb the other.
    assert_eq!(store.load(RelationKind::Followees).unwrap(), set(&["fave"]));
}

#[test]
fn test_accounts_use_separate_database_files() {
    let dir = tempfile::tempdir().unwrap();
    let alice = Identity::from("alice_account");
    let bob = Identity::from("bob_account");

    let mut store_a = SqliteSnapshotStore::open(dir.path(), &alice).unwrap();
    let mut store_b = SqliteSnapshotStore::open(dir.path(), &bob).unwrap();

    store_a
        .replace(RelationKind::Followers, &set(&["x"]), Utc::now())
        .unwrap();

    assert!(store_b.load(RelationKind::Followers).unwrap().is_empty());
    assert!(dir.path().join("alice_account_monitor.db").exists());
    assert!(dir.path().join("bob_account_monitor.db").exists());
}

#[test]
fn test_reopen_preserves_committed_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let account = Identity::from("target");

    {
        let mut store = SqliteSnapshotStore::open(dir.path(), &account).unwrap();
        store
            .replace(RelationKind::Followees, &set(&["x", "y"]), Utc::now())
            .unwrap();
    }

    let mut reopened = SqliteSnapshotStore::open(dir.path(), &account).unwrap();
    assert_eq!(
        reopened.load(RelationKind::Followees).unwrap(),
        set(&["x", "y"])
    );
}
