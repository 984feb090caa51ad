//! Error types for the session crate.

use std::path::PathBuf;

use thiserror::Error;

/// The saved-analyses store could not be read or written.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read saved analyses from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write saved analyses to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("saved analyses in {path} are corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Save was requested with no current analysis.
    #[error("no current analysis to save")]
    NothingToSave,

    /// No saved analysis at this position.
    #[error("no saved analysis at position {0}")]
    NotFound(usize),

    /// The local store failed. The current analysis is unaffected.
    #[error("persistence failure: {0}")]
    PersistenceFailure(#[from] StoreError),
}
