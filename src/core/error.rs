//! Store mutation errors.
//!
//! Reads never produce these: a missing or unreadable store is an empty
//! document. Only append/replace can fail.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Rejected input; the store was not touched
    #[error("{0}")]
    Validation(String),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}
