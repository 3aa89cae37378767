//! Integration tests for the switch-catalogue-sqlite crate.

use std::collections::BTreeSet;

use switch_catalogue_core::{Catalogue, CommandEntry};
use switch_catalogue_sqlite::{StoreError, SwitchStore};

fn switches(tokens: &[&str]) -> BTreeSet<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

#[test]
fn open_creates_schema_on_fresh_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("switch.sqlite3");

    let store = SwitchStore::open(&path).unwrap();
    assert_eq!(store.command_count().unwrap(), 0);
    assert!(path.exists());
}

#[test]
fn open_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/output/switch.sqlite3");

    SwitchStore::open(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn reopen_preserves_catalogue_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("switch.sqlite3");

    let first_id;
    {
        let mut store = SwitchStore::open(&path).unwrap();
        let system = store.resolve_system("Fedora41").unwrap();
        first_id = store
            .record_command(
                system,
                &CommandEntry::from_manpage("grep", Some(1), switches(&["-i", "-v"])),
            )
            .unwrap();
    }

    let mut store = SwitchStore::open(&path).unwrap();
    let system = store.resolve_system("Fedora41").unwrap();
    assert!(store.known_commands(system).unwrap().contains("grep"));

    // Reparse in a later run: same row, fresh switch set.
    let second_id = store
        .record_command(
            system,
            &CommandEntry::from_manpage("grep", Some(1), switches(&["-E"])),
        )
        .unwrap();
    assert_eq!(first_id, second_id);
    assert_eq!(store.switches_for(second_id).unwrap(), vec!["-E"]);
}

#[test]
fn open_rejects_foreign_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.sqlite3");

    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE unrelated (id INTEGER PRIMARY KEY);")
        .unwrap();
    drop(conn);

    match SwitchStore::open(&path) {
        Err(StoreError::SchemaMismatch { found, expected }) => {
            assert_eq!(found, 0);
            assert_eq!(expected, 3);
        }
        other => panic!("expected SchemaMismatch, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn store_idempotence_through_catalogue_trait() {
    let mut store = SwitchStore::open_in_memory().unwrap();
    let system = store.resolve_system("TestOS1.0").unwrap();

    let first = store
        .record_command(
            system,
            &CommandEntry::from_manpage("ls", Some(1), switches(&["-a", "-b"])),
        )
        .unwrap();
    let second = store
        .record_command(
            system,
            &CommandEntry::from_manpage("ls", Some(1), switches(&["-c"])),
        )
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(store.switches_for(second).unwrap(), vec!["-c"]);
}

#[test]
fn bare_seeding_then_help_probe_reuses_the_row() {
    let mut store = SwitchStore::open_in_memory().unwrap();
    let system = store.resolve_system("TestOS1.0").unwrap();

    let names: BTreeSet<String> = ["mytool".to_string()].into_iter().collect();
    store.record_bare_commands(system, &names).unwrap();

    let id = store
        .record_command(
            system,
            &CommandEntry::from_help("mytool", switches(&["--help", "--json"])),
        )
        .unwrap();

    assert_eq!(store.command_count().unwrap(), 1);
    assert_eq!(store.switches_for(id).unwrap(), vec!["--help", "--json"]);
}
