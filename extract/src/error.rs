//! Error types for the extraction crate.

use thiserror::Error;

/// Errors that can occur during extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Filesystem or process I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The external text formatter failed for a page.
    #[error("render failed for '{path}': {message}")]
    Render { path: String, message: String },

    /// Report serialization failure.
    #[error("report serialization failed: {0}")]
    Report(#[from] serde_json::Error),

    /// Failure crossing the catalogue store boundary.
    #[error(transparent)]
    Store(#[from] switch_catalogue_core::CatalogueError),
}

/// Convenience alias for results with [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;
