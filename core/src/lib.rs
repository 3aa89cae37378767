//! Core types for the switch catalogue.
//!
//! This crate defines the shared data model for cataloguing command-line
//! switches extracted from manual pages and `--help` output:
//!
//! - [`CommandEntry`] — one invocable command with its extracted switch set.
//! - [`Catalogue`] — the store contract: find-or-create systems, record
//!   commands with replace-on-reparse switch semantics, list what is
//!   already catalogued.
//! - [`CatalogueError`] — the error type crossing the store boundary.
//!
//! The extraction crate writes through the [`Catalogue`] trait and never
//! touches a concrete store; the sqlite crate provides the embedded
//! relational implementation.
//!
//! # Example
//!
//! ```
//! use switch_catalogue_core::CommandEntry;
//! use std::collections::BTreeSet;
//!
//! let switches: BTreeSet<String> = ["-a", "--all", "-l"]
//!     .into_iter()
//!     .map(String::from)
//!     .collect();
//! let entry = CommandEntry::from_manpage("LS", Some(1), switches);
//!
//! assert_eq!(entry.command, "ls");
//! assert_eq!(entry.manpage_name.as_deref(), Some("LS"));
//! assert_eq!(entry.section, Some(1));
//! ```

mod catalogue;
mod error;
mod types;

pub use catalogue::Catalogue;
pub use error::CatalogueError;
pub use types::{CommandEntry, CommandId, SystemId};
