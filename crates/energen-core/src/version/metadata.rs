//! Quote version metadata schema.

use crate::version::tag::{IncrementKind, VersionTag};
use chrono::{DateTime, Utc};
use energen_core_types::BidNumber;
use serde::{Deserialize, Serialize};

/// Quote lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    /// Working copy; no bid number, freely mutable
    Draft,
    /// Issued to the customer under a bid number
    Official,
    /// Prior official copy replaced by a major revision
    Superseded,
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteStatus::Draft => write!(f, "draft"),
            QuoteStatus::Official => write!(f, "official"),
            QuoteStatus::Superseded => write!(f, "superseded"),
        }
    }
}

/// One entry in a quote's revision change log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogEntry {
    pub timestamp: DateTime<Utc>,
    pub from_version: VersionTag,
    pub to_version: VersionTag,
    pub increment_type: IncrementKind,
    pub reason: String,
    /// Itemized deltas from the change report
    pub changes: Vec<String>,
}

/// Versioning metadata for one stored copy of a quote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteVersionMetadata {
    pub version: VersionTag,

    pub status: QuoteStatus,

    /// Present exactly when the quote has been promoted to official
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_number: Option<BidNumber>,

    pub created_at: DateTime<Utc>,

    pub modified_at: DateTime<Utc>,

    /// Version this copy was revised from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_version: Option<VersionTag>,

    /// Fingerprint of the calculation state this copy was built from
    pub calc_state_hash: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub officialized_at: Option<DateTime<Utc>>,

    /// Version of the major revision that replaced this copy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<VersionTag>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_at: Option<DateTime<Utc>>,

    /// Strictly version-increasing revision history
    #[serde(default)]
    pub change_log: Vec<ChangeLogEntry>,
}

impl QuoteVersionMetadata {
    /// Metadata for a brand-new draft at v1.0.
    pub fn new_draft(calc_state_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            version: VersionTag::initial(),
            status: QuoteStatus::Draft,
            bid_number: None,
            created_at: now,
            modified_at: now,
            previous_version: None,
            calc_state_hash,
            officialized_at: None,
            superseded_by: None,
            superseded_at: None,
            change_log: Vec::new(),
        }
    }

    /// True iff this copy is official: status official AND bid number
    /// assigned. Both must hold before a revision may be created.
    pub fn is_official(&self) -> bool {
        self.status == QuoteStatus::Official && self.bid_number.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_new_draft_is_v1_0_without_bid() {
        let meta = QuoteVersionMetadata::new_draft("abc123".into(), now());
        assert_eq!(meta.version, VersionTag::initial());
        assert_eq!(meta.status, QuoteStatus::Draft);
        assert!(meta.bid_number.is_none());
        assert!(meta.change_log.is_empty());
        assert!(!meta.is_official());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&QuoteStatus::Superseded).unwrap(),
            "\"superseded\""
        );
    }

    #[test]
    fn test_metadata_round_trips_through_json() {
        let meta = QuoteVersionMetadata::new_draft("abc123".into(), now());
        let json = serde_json::to_string(&meta).unwrap();
        let restored: QuoteVersionMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(meta, restored);
        // Unset options are omitted from the wire form entirely.
        assert!(!json.contains("bidNumber"));
        assert!(!json.contains("supersededBy"));
    }
}
