//! Error handling for energen-store
//!
//! Wraps kernel errors with store-specific variants.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Store error taxonomy
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying SQLite failure
    #[error("persistence failed: {0}")]
    Persistence(String),

    /// A stored record could not be (de)serialized
    #[error("stored record is corrupt: {0}")]
    Corrupt(String),

    /// No record for the requested quote
    #[error("quote not found: {quote_id}")]
    QuoteNotFound { quote_id: String },

    /// Migration could not be applied
    #[error("migration {id} failed: {reason}")]
    Migration { id: u32, reason: String },

    /// Kernel error surfaced through a store operation
    #[error(transparent)]
    Quote(#[from] energen_core::QuoteError),
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> StoreError {
    StoreError::Persistence(err.to_string())
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Corrupt(err.to_string())
    }
}
