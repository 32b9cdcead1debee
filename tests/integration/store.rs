use std::io;

use pilot::core::models::Group;
use pilot::core::types::{AppFilter, TesterKind};
use pilot::errors::Error;
use pilot::manager::NewTester;

use crate::common::{build_context, read_store, seeded_dir};

fn groups_of<'a>(groups: &'a [Group], email: &str) -> Vec<&'a str> {
    groups
        .iter()
        .filter(|g| g.contains(email))
        .map(|g| g.name.as_str())
        .collect()
}

#[test]
fn add_to_named_groups_persists_membership() {
    let dir = seeded_dir("store-add", true);
    let mut ctx = build_context(&dir);
    let groups = vec!["QA".to_string(), "Everyone".to_string()];
    let new = NewTester {
        email: "pat@example.com",
        first_name: "Pat",
        last_name: "Tester",
    };
    ctx.manager()
        .unwrap()
        .add_tester(&new, Some(&AppFilter::AppleId(42)), Some(groups.as_slice()))
        .unwrap();

    let store = read_store(&dir);
    let mut joined = groups_of(&store.state().groups, "pat@example.com");
    joined.sort_unstable();
    assert_eq!(joined, ["Everyone", "QA"]);
}

#[test]
fn adding_twice_keeps_one_tester() {
    let dir = seeded_dir("store-twice", true);
    let new = NewTester {
        email: "twice@example.com",
        first_name: "T",
        last_name: "W",
    };
    let filter = AppFilter::BundleId("com.example.beta".into());
    for _ in 0..2 {
        let mut ctx = build_context(&dir);
        ctx.manager().unwrap().add_tester(&new, Some(&filter), None).unwrap();
    }
    let store = read_store(&dir);
    let count = store
        .state()
        .testers
        .iter()
        .filter(|t| t.email == "twice@example.com")
        .count();
    assert_eq!(count, 1);
}

#[test]
fn remove_from_app_drops_all_group_memberships() {
    let dir = seeded_dir("store-remove-app", true);
    let mut ctx = build_context(&dir);
    ctx.manager()
        .unwrap()
        .remove_tester("ext@example.com", Some(&AppFilter::AppleId(42)), None)
        .unwrap();

    let store = read_store(&dir);
    assert!(groups_of(&store.state().groups, "ext@example.com").is_empty());
    assert!(
        store
            .state()
            .testers
            .iter()
            .any(|t| t.email == "ext@example.com"),
        "leaving an app keeps the account"
    );
}

#[test]
fn remove_without_app_deletes_the_account() {
    let dir = seeded_dir("store-remove-all", true);
    let mut ctx = build_context(&dir);
    ctx.manager()
        .unwrap()
        .remove_tester("staff@example.com", None, None)
        .unwrap();

    let store = read_store(&dir);
    assert!(store.state().testers.iter().all(|t| t.email != "staff@example.com"));
    assert!(store.state().app_access.is_empty());
}

#[test]
fn find_prefers_internal_records() {
    let dir = seeded_dir("store-find", true);
    let mut ctx = build_context(&dir);
    let new = NewTester {
        email: "staff@example.com",
        first_name: "Sam",
        last_name: "Staff",
    };
    // reuse path: the internal record is found, nothing is created
    ctx.manager()
        .unwrap()
        .add_tester(&new, Some(&AppFilter::AppleId(42)), None)
        .unwrap();
    let found = ctx
        .manager()
        .unwrap()
        .find_tester("staff@example.com", &mut io::sink())
        .unwrap();
    assert_eq!(found.kind, TesterKind::Internal);
}

#[test]
fn unknown_app_is_not_found() {
    let dir = seeded_dir("store-no-app", true);
    let mut ctx = build_context(&dir);
    let mut out = Vec::new();
    match ctx
        .manager()
        .unwrap()
        .list_testers(Some(&AppFilter::AppleId(7)), &mut out)
    {
        Err(Error::NotFound(msg)) => assert_eq!(msg, "Couldn't find app with '7'"),
        other => panic!("expected not found, got {other:?}"),
    }
    assert!(out.is_empty());
}
