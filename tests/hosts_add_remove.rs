//! add with duplicate policy, and remove by query.

mod common;

use hostsfile::{Entry, EntrySequence, Error, Hosts};

fn loaded(content: &str) -> (tempfile::TempDir, Hosts) {
    let dir = common::temp_dir();
    let hosts = Hosts::new(common::hosts_file(dir.path(), content));
    (dir, hosts)
}

#[test]
fn add_appends() {
    let (_dir, mut hosts) = loaded("127.0.0.1\tlocalhost\n");
    hosts.add(Entry::parse("10.0.0.1", "a").unwrap(), false).unwrap();
    assert_eq!(hosts.len().unwrap(), 2);
    assert_eq!(hosts.get(1).unwrap().hostname(), "a");
}

#[test]
fn add_same_address_conflicts() {
    let (_dir, mut hosts) = loaded("10.0.0.1\ta\n");
    let err = hosts.add(Entry::parse("10.0.0.1", "b").unwrap(), false).unwrap_err();
    match err {
        Error::Duplicate { existing } => assert_eq!(existing.hostname(), "a"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(hosts.len().unwrap(), 1);
}

#[test]
fn add_same_hostname_conflicts() {
    let (_dir, mut hosts) = loaded("10.0.0.1\ta\n");
    let err = hosts.add(Entry::parse("10.0.0.2", "a").unwrap(), false).unwrap_err();
    assert!(matches!(err, Error::Duplicate { .. }));
    assert_eq!(hosts.len().unwrap(), 1);
}

#[test]
fn add_overlapping_alias_conflicts() {
    let (_dir, mut hosts) = loaded("10.0.0.1\tweb\twww\n");
    let new = Entry::parse("10.0.0.2", "other").unwrap().with_aliases(["www"]).unwrap();
    assert!(matches!(hosts.add(new, false), Err(Error::Duplicate { .. })));

    let new = Entry::parse("10.0.0.3", "www").unwrap();
    assert!(matches!(hosts.add(new, false), Err(Error::Duplicate { .. })));
    assert_eq!(hosts.len().unwrap(), 1);
}

#[test]
fn add_allow_duplicates() {
    let (_dir, mut hosts) = loaded("10.0.0.1\ta\n");
    hosts.add(Entry::parse("10.0.0.1", "a").unwrap(), true).unwrap();
    assert_eq!(hosts.find("a").unwrap().len(), 2);
}

#[test]
fn remove_all_matches() {
    let (_dir, mut hosts) = loaded("10.0.0.1\ta\n10.0.0.2\tb\ta2\n10.0.0.1\tc\n");
    assert_eq!(hosts.remove("10.0.0.1").unwrap(), 2);
    assert_eq!(hosts.len().unwrap(), 1);
    assert_eq!(hosts.remove("a2").unwrap(), 1);
    assert!(hosts.is_empty().unwrap());
}

#[test]
fn remove_without_match_returns_zero() {
    let (_dir, mut hosts) = loaded("10.0.0.1\ta\n10.0.0.2\tb\n");
    let before: Vec<Entry> = hosts.entries().unwrap().to_vec();
    assert_eq!(hosts.remove("x").unwrap(), 0);
    assert_eq!(hosts.entries().unwrap(), before.as_slice());
}
