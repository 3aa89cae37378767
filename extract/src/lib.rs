//! Switch-token extraction from rendered manual pages and help output.
//!
//! This crate turns a host's documentation into catalogue entries:
//!
//! - [`tokenizer`] — recognizes option-like substrings (`-a`, `--all`, `+x`)
//!   inside free-form rendered text.
//! - [`builtins`] — splits the composite shell-builtins manual page into
//!   per-command sub-documents with an explicit state machine.
//! - [`identity`] — derives a command's canonical name and manual section
//!   from its file path and rendered content, including `.so` indirection
//!   stubs.
//! - [`render`] — the external text-formatting collaborator: gzip-aware
//!   reading plus a `groff` pipeline, with escape/overstrike stripping.
//! - [`enumerate`] / [`shell`] — collaborators supplying manual-page files
//!   and installed/builtin command names.
//! - [`probe`] — time-bounded `--help` scraping.
//! - [`pipeline`] — the single-threaded orchestrator writing through the
//!   [`Catalogue`](switch_catalogue_core::Catalogue) trait.
//!
//! # Example
//!
//! ```
//! use switch_catalogue_extract::tokenizer::extract_switches;
//!
//! let rendered = "\
//! ls - list directory contents
//!
//! OPTIONS
//!   -a, --all   do not ignore entries
//!   -l   use a long listing format
//! ";
//!
//! let switches = extract_switches(rendered);
//! assert!(switches.contains("-a"));
//! assert!(switches.contains("--all"));
//! assert!(switches.contains("-l"));
//! ```

pub mod builtins;
pub mod enumerate;
mod error;
pub mod identity;
pub mod pipeline;
pub mod probe;
pub mod render;
pub mod report;
pub mod shell;
pub mod tokenizer;

pub use error::{ExtractError, Result};
pub use pipeline::{ScanConfig, scan_man_pages, scrape_help};
pub use render::{GroffRenderer, PageRenderer};
pub use report::RunReport;
