//! Error types for the SQLite catalogue store.

use thiserror::Error;

/// Errors that can occur while operating the switch catalogue store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite database operation failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Filesystem failure while preparing the database location.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A pre-existing database file lacks the expected tables.
    #[error("schema mismatch: found {found} of {expected} expected tables")]
    SchemaMismatch { found: usize, expected: usize },
}

impl From<StoreError> for switch_catalogue_core::CatalogueError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SchemaMismatch { .. } => Self::SchemaMismatch(err.to_string()),
            other => Self::Storage(other.to_string()),
        }
    }
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
