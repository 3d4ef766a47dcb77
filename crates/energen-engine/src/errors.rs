//! Error handling for energen-engine
//!
//! Wraps kernel and store errors surfaced through workflows.

use thiserror::Error;

/// Result type alias using EngineError
pub type Result<T> = std::result::Result<T, EngineError>;

/// Engine error taxonomy
#[derive(Error, Debug)]
pub enum EngineError {
    /// Kernel error (classification, lifecycle, hashing)
    #[error(transparent)]
    Quote(#[from] energen_core::QuoteError),

    /// Storage port error
    #[error(transparent)]
    Store(#[from] energen_store::StoreError),

    /// No stored metadata for the quote being operated on
    #[error("quote not found: {quote_id}")]
    QuoteNotFound { quote_id: String },

    /// Transport failure talking to the backend
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected the request
    #[error("backend returned {status}: {body}")]
    Backend { status: u16, body: String },
}
