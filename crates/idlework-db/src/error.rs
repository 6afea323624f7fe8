//! Error types for the persistence layer.
//!
//! Store and codec failures surface as [`DbError`]. The save gateway never
//! lets them escape: it logs and reports "no save" or "save skipped".

use std::path::PathBuf;

/// Errors that can occur in a key-value store or while encoding records.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key cannot be used by this store.
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),
}

impl DbError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
