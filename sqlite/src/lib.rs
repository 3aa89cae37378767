//! SQLite storage backend for the switch catalogue.
//!
//! Persists `system`, `command`, and `switch` rows in an embedded SQLite
//! file with idempotent upsert semantics: systems and commands are
//! find-or-create, and re-recording a command replaces its switch set
//! wholesale inside one transaction.
//!
//! # Quick start
//!
//! ```no_run
//! use switch_catalogue_core::{Catalogue, CommandEntry};
//! use switch_catalogue_sqlite::SwitchStore;
//! use std::collections::BTreeSet;
//!
//! let mut store = SwitchStore::open("switch.sqlite3").unwrap();
//! let system = store.resolve_system("Fedora41").unwrap();
//!
//! let switches: BTreeSet<String> =
//!     ["-a", "--all"].into_iter().map(String::from).collect();
//! let entry = CommandEntry::from_manpage("ls", Some(1), switches);
//! store.record_command(system, &entry).unwrap();
//! ```
//!
//! # Schema bootstrap
//!
//! [`SwitchStore::open`] applies the schema to a fresh database file and
//! verifies the expected tables on a pre-existing one. A database that
//! exists but lacks the tables is rejected with
//! [`StoreError::SchemaMismatch`] before any extraction work begins.

mod error;
mod schema;
mod store;

pub use error::{Result, StoreError};
pub use schema::{EXPECTED_TABLES, generate_schema_sql};
pub use store::SwitchStore;
