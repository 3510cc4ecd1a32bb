//! Storage error model.

use thiserror::Error;

/// Failure inside a store.
///
/// Stores report *infrastructure* failures only; "row not found" is an
/// `Ok(None)`/`Ok(false)` answer, not an error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store error: {0}")]
    Other(String),
}

impl StoreError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
