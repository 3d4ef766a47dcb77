//! Domain identifiers for quotes and bids
//!
//! A `QuoteId` is an opaque UUID assigned when a quote is first saved.
//! A `BidNumber` is the human-facing number assigned at promotion time;
//! its presence is what distinguishes an official quote from a draft.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a quote, stable across revisions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(String);

impl QuoteId {
    /// Generate a new random QuoteId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for QuoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for QuoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-facing bid number assigned when a draft is promoted to official
///
/// Bid numbers are issued by the sales workflow (e.g. `BID-0001`) and are
/// embedded verbatim in official filenames. The kernel treats them as
/// opaque non-empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BidNumber(String);

impl BidNumber {
    /// Wrap a bid number string, trimming surrounding whitespace.
    ///
    /// Returns `None` if the trimmed input is empty: an empty bid number
    /// must never reach filename generation or promotion.
    pub fn new(s: impl Into<String>) -> Option<Self> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BidNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
