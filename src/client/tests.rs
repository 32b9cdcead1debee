use super::DistributionClient;
use super::memory::MemoryClient;
use super::store::FileStore;
use crate::core::models::{App, Group, Tester};
use crate::core::types::{AppFilter, TesterKind};
use crate::errors::Error;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_path() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let uniq = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir()
        .join(format!("pilot-store-test-{nanos}-{uniq}"))
        .join("store.json")
}

fn app() -> App {
    App::new(42, "com.example.app", "Example")
}

fn seeded() -> MemoryClient {
    MemoryClient::new()
        .with_app(app())
        .with_group(Group::new(42, "Default", true))
        .with_group(Group::new(42, "Beta", false))
        .with_group(Group::new(7, "Other App Group", true))
}

#[test]
fn find_app_matches_id_or_bundle() {
    let client = seeded();
    let by_id = client.find_app(&AppFilter::AppleId(42)).unwrap();
    let by_bundle = client
        .find_app(&AppFilter::BundleId("COM.example.app".into()))
        .unwrap();
    assert_eq!(by_id, Some(app()));
    assert_eq!(by_bundle, Some(app()));
    assert!(client.find_app(&AppFilter::AppleId(1)).unwrap().is_none());
}

#[test]
fn add_without_groups_uses_default_group() {
    let mut client = seeded();
    let tester = client.create_external_tester("a@x.io", "A", "X").unwrap();
    let groups = client.add_tester_to_groups(&tester, &app(), None).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "Default");

    let found = client
        .find_tester(TesterKind::External, "A@X.IO")
        .unwrap()
        .unwrap();
    assert_eq!(found.groups, vec!["Default".to_string()]);
}

#[test]
fn add_to_unknown_group_changes_nothing() {
    let mut client = seeded();
    let tester = client.create_external_tester("a@x.io", "A", "X").unwrap();
    let names = vec!["Beta".to_string(), "Nope".to_string()];
    let err = client
        .add_tester_to_groups(&tester, &app(), Some(&names))
        .unwrap_err();
    assert!(matches!(err, Error::Remote(_)));
    assert!(client.state().groups.iter().all(|g| g.testers.is_empty()));
}

#[test]
fn internal_testers_get_app_access_not_groups() {
    let mut client = seeded().with_tester(Tester::new(TesterKind::Internal, "i@x.io", "I", "N"));
    let tester = client
        .find_tester(TesterKind::Internal, "i@x.io")
        .unwrap()
        .unwrap();
    let groups = client.add_tester_to_groups(&tester, &app(), None).unwrap();
    assert!(groups.is_empty());

    let listed = client.testers_by_app(TesterKind::Internal, &app()).unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].groups.is_empty());
}

#[test]
fn by_app_listing_scopes_groups_and_drops_devices() {
    let mut tester = Tester::new(TesterKind::External, "e@x.io", "E", "X");
    tester.devices.push(crate::core::models::Device::new("iPhone 15", "17.2"));
    let mut client = seeded().with_tester(tester.clone());
    let other = App::new(7, "com.example.other", "Other");
    client.add_tester_to_groups(&tester, &app(), None).unwrap();
    client.add_tester_to_groups(&tester, &other, None).unwrap();

    let listed = client.testers_by_app(TesterKind::External, &app()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].groups, vec!["Default".to_string()]);
    assert!(listed[0].devices.is_empty());

    let global = client.all_testers(TesterKind::External).unwrap();
    assert_eq!(global[0].groups.len(), 2);
    assert_eq!(global[0].devices.len(), 1);
}

#[test]
fn all_testers_requires_team_permission() {
    let client = seeded().deny_team_listing();
    let err = client.all_testers(TesterKind::Internal).unwrap_err();
    assert!(matches!(err, Error::Permission(_)));
}

#[test]
fn remove_from_app_requires_membership() {
    let mut client = seeded();
    let tester = client.create_external_tester("a@x.io", "A", "X").unwrap();
    let err = client.remove_tester_from_app(&tester, &app()).unwrap_err();
    assert!(matches!(err, Error::Remote(_)));

    client.add_tester_to_groups(&tester, &app(), None).unwrap();
    client.remove_tester_from_app(&tester, &app()).unwrap();
    assert!(client.testers_by_app(TesterKind::External, &app()).unwrap().is_empty());
}

#[test]
fn memory_client_records_mutating_calls_only() {
    let mut client = seeded();
    let tester = client.create_external_tester("a@x.io", "A", "X").unwrap();
    client.find_tester(TesterKind::External, "a@x.io").unwrap();
    client.delete_tester(&tester).unwrap();
    assert_eq!(client.calls(), ["create", "delete"]);
}

#[test]
fn create_rejects_duplicate_external() {
    let mut client = seeded();
    client.create_external_tester("a@x.io", "A", "X").unwrap();
    let err = client.create_external_tester("A@x.io", "A", "X").unwrap_err();
    assert!(matches!(err, Error::Remote(_)));
}

#[test]
fn file_store_missing_file_is_empty_service() {
    let store = FileStore::open(temp_path()).unwrap();
    assert!(store.state().testers.is_empty());
    assert!(store.state().team_listing_allowed);
}

#[test]
fn file_store_persists_mutations() {
    let path = temp_path();
    let seed = seeded();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, serde_json::to_string_pretty(seed.state()).unwrap()).unwrap();

    let mut store = FileStore::open(&path).unwrap();
    let tester = store.create_external_tester("p@x.io", "P", "X").unwrap();
    let beta = vec!["beta".to_string()];
    store.add_tester_to_groups(&tester, &app(), Some(&beta)).unwrap();

    let reopened = FileStore::open(&path).unwrap();
    let found = reopened
        .find_tester(TesterKind::External, "p@x.io")
        .unwrap()
        .unwrap();
    assert_eq!(found.groups, vec!["Beta".to_string()]);
}

#[test]
fn file_store_reports_invalid_document() {
    let path = temp_path();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{").unwrap();
    let err = FileStore::open(&path).unwrap_err();
    match err {
        Error::Parse(msg) => assert!(msg.starts_with("Invalid store document")),
        other => panic!("expected parse error, got {other:?}"),
    }
}
