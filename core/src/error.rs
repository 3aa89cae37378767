//! Error type crossing the catalogue store boundary.

use thiserror::Error;

/// Errors reported by a [`Catalogue`](crate::Catalogue) implementation.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// Underlying storage failure (database access, constraint violation).
    #[error("storage error: {0}")]
    Storage(String),

    /// The store exists but does not carry the expected tables.
    ///
    /// This is fatal for a run: a half-initialized catalogue cannot safely
    /// accept idempotent upserts.
    #[error("schema mismatch: expected tables system, command, switch ({0})")]
    SchemaMismatch(String),
}
