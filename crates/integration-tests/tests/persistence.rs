//! File-backed persistence across restarts and state written by older
//! versions of the app.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{Datelike, Utc};
use ewaste_core::{ListingId, Role, UserId};
use ewaste_integration_tests::{TestContext, classification, listing, test_config};
use ewaste_tracker::AppState;
use ewaste_tracker::insights::CalculatorInputs;
use ewaste_tracker::models::session::keys;
use ewaste_tracker::storage::{FileStorage, MemoryStorage, SharedStorage, Storage};

fn file_context(dir: &tempfile::TempDir) -> TestContext {
    let storage: SharedStorage = Arc::new(FileStorage::open(dir.path()).unwrap());
    TestContext::with_storage(storage, true)
}

#[test]
fn test_everything_survives_a_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = file_context(&dir);
    assert!(ctx.state.session_mut().register("Frank", "frank@x.com", "pw", Role::User));
    let frank = ctx.state.require_identity().unwrap().clone();

    let record = ctx
        .state
        .classifications_mut()
        .add(classification(&frank.id, "Router"))
        .unwrap();
    let posted = ctx
        .state
        .marketplace_mut()
        .add(listing(&frank.id, &frank.name, "Keyboard"))
        .unwrap();
    ctx.state
        .calculator()
        .calculate(&frank.id, CalculatorInputs::default());
    drop(ctx);

    let ctx = file_context(&dir);
    assert_eq!(ctx.state.require_identity().unwrap(), &frank);
    assert_eq!(ctx.state.classifications().get(&record.id), Some(&record));
    assert_eq!(ctx.state.marketplace().get(&posted.id), Some(&posted));
    assert!(ctx.state.calculator().load(&frank.id).results.is_some());
    assert!(dir.path().join("registeredUsers.json").exists());
}

#[test]
fn test_legacy_camel_case_state_is_readable() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(
            keys::CLASSIFICATIONS,
            r#"[{"id":"1700000000000","userId":"42","imageUrl":"blob:x","objectName":"Tablet",
                "category":"Mobile Device","hazardousElements":["Lithium"],"confidence":77.5,
                "createdAt":"2024-02-01T10:00:00.000Z"}]"#,
        )
        .unwrap();
    storage
        .set(
            keys::LISTINGS,
            r#"[{"id":"9","sellerId":"42","sellerName":"Gus","title":"Tablet","description":"",
                "price":120,"condition":"fair","category":"Tablets","images":["a"],
                "createdAt":"2024-02-01T10:00:00.000Z","isActive":true}]"#,
        )
        .unwrap();

    let ctx = TestContext::with_storage(storage, true);
    let owner = UserId::new("42");

    let records = ctx.state.classifications().by_user(&owner);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].created_at.month(), 2);
    assert_eq!(ctx.state.marketplace().by_user(&owner)[0].price.to_string(), "$120.00");
    assert_eq!(ctx.state.marketplace().len(), 1);
}

#[test]
fn test_legacy_roster_without_ids_can_log_in() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(
            keys::ROSTER,
            r#"[{"email":"admin@example.com","password":"password","name":"Admin User","role":"admin"},
                {"email":"hal@x.com","password":"pw","name":"Hal","role":"user"}]"#,
        )
        .unwrap();

    let mut ctx = TestContext::with_storage(storage.clone(), true);
    assert!(ctx.state.session_mut().login("hal@x.com", "pw"));
    let id = ctx.state.require_identity().unwrap().id.clone();
    assert_ne!(id.as_str(), "1");

    let mut ctx = ctx.restart();
    ctx.state.session_mut().logout();
    assert!(ctx.state.session_mut().login("hal@x.com", "pw"));
    assert_eq!(ctx.state.require_identity().unwrap().id, id);
    assert!(storage.get(keys::ROSTER).unwrap().unwrap().contains("\"id\""));
}

#[test]
fn test_corrupt_state_falls_back_to_seed() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(keys::CLASSIFICATIONS, "not json").unwrap();
    storage.set(keys::LISTINGS, "{}").unwrap();
    storage.set(keys::TOKEN, "\"mock-jwt-token\"").unwrap();
    storage.set(keys::CURRENT_USER, "{\"id\":").unwrap();

    let ctx = TestContext::with_storage(storage.clone(), true);
    assert_eq!(ctx.state.classifications().len(), 3);
    assert_eq!(ctx.state.marketplace().len(), 2);
    assert!(!ctx.state.session().is_authenticated());
    assert!(storage.get(keys::TOKEN).unwrap().is_none());
}

#[test]
fn test_deleted_seed_listings_stay_deleted_after_restart() {
    let mut ctx = TestContext::new();
    assert!(ctx.state.session_mut().login("admin@example.com", "password"));
    let admin = ctx.state.require_identity().unwrap().clone();
    for id in ["1", "2"] {
        let removed = ctx
            .state
            .marketplace_mut()
            .remove(&ListingId::new(id), &admin)
            .unwrap();
        assert!(removed.is_some());
    }

    let ctx = ctx.restart();
    assert!(ctx.state.marketplace().active().is_empty());
    assert_eq!(ctx.state.classifications().len(), 3);
}

#[test]
fn test_unseeded_state_starts_empty() {
    let state = AppState::with_storage(test_config(false), Arc::new(MemoryStorage::new()));
    assert!(state.classifications().is_empty());
    assert!(state.marketplace().is_empty());
    assert_eq!(state.session().roster_len(), 1);
}

#[test]
fn test_new_records_are_stamped_now() {
    let mut ctx = TestContext::new();
    let before = Utc::now();
    let record = ctx
        .state
        .classifications_mut()
        .add(classification(&UserId::new("1"), "Router"))
        .unwrap();
    assert!(record.created_at >= before);
    assert!(record.created_at <= Utc::now());
}
