use thiserror::Error;

/// Result type alias using QuoteError
pub type Result<T> = std::result::Result<T, QuoteError>;

/// Canonical error taxonomy for kernel operations
///
/// Each variant maps to a stable error code that can be used for
/// programmatic handling, testing, and external API responses.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteError {
    /// Both the primary digest and the degraded fallback failed.
    /// A hashing failure must never silently yield an empty or zero hash.
    #[error("hashing failed: {reason}")]
    HashingFailure { reason: String },

    /// Version string does not match `v?<major>.<minor>`
    #[error("invalid version string: {input:?}")]
    InvalidVersionString { input: String },

    /// Revision requested on a draft (no bid number assigned)
    #[error("cannot revise a draft quote: no bid number assigned")]
    DraftNotRevisable,

    /// Supersession requested on a quote that is already superseded
    #[error("quote is already superseded by {by}")]
    AlreadySuperseded { by: String },

    /// Supersession requested outside the official-replaced-by-major case
    #[error("cannot supersede {status} quote with {replacement}: only an official quote replaced by a major revision may be superseded")]
    InvalidSupersession {
        status: String,
        replacement: String,
    },

    /// Lifecycle transition outside draft -> official -> superseded
    #[error("invalid status transition: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// Official/superseded filename requested without a bid number
    #[error("a filename for an {status} quote requires a bid number")]
    MissingBidNumber { status: String },

    /// Canonical serialization of a snapshot failed
    #[error("serialization failed: {detail}")]
    Serialization { detail: String },

    /// The injected pricing port failed to price a service
    #[error("pricing lookup failed for service {service_code}: {detail}")]
    Pricing {
        service_code: String,
        detail: String,
    },
}

impl QuoteError {
    /// Get the stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            QuoteError::HashingFailure { .. } => "ERR_HASHING_FAILURE",
            QuoteError::InvalidVersionString { .. } => "ERR_INVALID_VERSION_STRING",
            QuoteError::DraftNotRevisable => "ERR_DRAFT_NOT_REVISABLE",
            QuoteError::AlreadySuperseded { .. } => "ERR_ALREADY_SUPERSEDED",
            QuoteError::InvalidSupersession { .. } => "ERR_INVALID_SUPERSESSION",
            QuoteError::InvalidStatusTransition { .. } => "ERR_INVALID_STATUS_TRANSITION",
            QuoteError::MissingBidNumber { .. } => "ERR_MISSING_BID_NUMBER",
            QuoteError::Serialization { .. } => "ERR_SERIALIZATION",
            QuoteError::Pricing { .. } => "ERR_PRICING",
        }
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::Serialization {
            detail: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable_and_distinct() {
        let errors = [
            QuoteError::HashingFailure {
                reason: "x".into(),
            },
            QuoteError::InvalidVersionString { input: "x".into() },
            QuoteError::DraftNotRevisable,
            QuoteError::AlreadySuperseded { by: "v2.0".into() },
            QuoteError::MissingBidNumber {
                status: "official".into(),
            },
        ];
        let codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        let mut deduped = codes.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(codes.len(), deduped.len());
        assert!(codes.iter().all(|c| c.starts_with("ERR_")));
    }

    #[test]
    fn test_display_includes_context() {
        let err = QuoteError::InvalidVersionString {
            input: "2.x".into(),
        };
        assert!(err.to_string().contains("2.x"));
    }
}
