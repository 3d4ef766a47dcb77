//! Version lifecycle operations.
//!
//! Precondition checks run first and throw; compute steps are pure; the
//! caller owns persistence. `create_revision` returning `Ok(None)` is the
//! no-change contract: callers must treat it as a no-op, not an error.

use crate::diff::engine::detect_changes;
use crate::diff::model::{ChangeReport, ChangeScope};
use crate::errors::{QuoteError, Result};
use crate::snapshot::digest::{HashResult, Hasher};
use crate::snapshot::model::CalculationSnapshot;
use crate::version::metadata::{ChangeLogEntry, QuoteStatus, QuoteVersionMetadata};
use crate::version::tag::{IncrementKind, VersionTag};
use chrono::{DateTime, Utc};
use energen_core_types::BidNumber;

/// Decision produced by comparing two fingerprints.
#[derive(Debug, Clone, PartialEq)]
pub struct IncrementDecision {
    pub increment: IncrementKind,
    /// Major revisions break the issued quote and supersede it
    pub is_breaking: bool,
    /// Major revisions require explicit approval before re-issue
    pub requires_approval: bool,
    pub report: ChangeReport,
}

impl IncrementDecision {
    fn none(report: ChangeReport) -> Self {
        Self {
            increment: IncrementKind::None,
            is_breaking: false,
            requires_approval: false,
            report,
        }
    }
}

/// A newly created revision, ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct Revision {
    /// Metadata for the new official copy
    pub metadata: QuoteVersionMetadata,
    /// Fingerprint of the state the revision was built from
    pub hash: HashResult,
    pub decision: IncrementDecision,
}

/// Decide the version increment between two hash results.
///
/// An absent previous hash is a first version, not an error: there is
/// nothing to revise against, so the increment is `none`. Identical
/// hashes are `none`. Differing hashes delegate to change detection on
/// the included snapshots; a differing hash with an empty report (e.g. a
/// hash-format migration) classifies as `minor`.
pub fn detect_version_increment(
    prev: Option<&HashResult>,
    curr: &HashResult,
) -> IncrementDecision {
    let prev = match prev {
        Some(prev) => prev,
        None => {
            let mut report = ChangeReport::unchanged();
            report.note("no previous calculation hash (first version)");
            return IncrementDecision::none(report);
        }
    };

    if prev.hash == curr.hash {
        return IncrementDecision::none(ChangeReport::unchanged());
    }

    let report = detect_changes(Some(&prev.included_data), Some(&curr.included_data));
    decision_from_report(report)
}

fn decision_from_report(report: ChangeReport) -> IncrementDecision {
    match report.scope {
        ChangeScope::Major => IncrementDecision {
            increment: IncrementKind::Major,
            is_breaking: true,
            requires_approval: true,
            report,
        },
        // The hash differs, so something changed even if the classifier
        // itemized nothing; a minor bump keeps the audit trail honest.
        ChangeScope::Minor | ChangeScope::None => IncrementDecision {
            increment: IncrementKind::Minor,
            is_breaking: false,
            requires_approval: false,
            report,
        },
    }
}

/// Create a revision of an official quote from the current live state.
///
/// Re-hashes `current` immediately (reusing a stale hash across an
/// intervening mutation causes false negatives), compares against the
/// stored fingerprint, and returns `Ok(None)` when nothing changed.
///
/// `previous_snapshot` is the stored state the quote was issued from;
/// passing `None` (snapshot lost) classifies as major per the missing-
/// comparison-data rule.
///
/// # Errors
///
/// - `DraftNotRevisable` — quote has no bid number
/// - `InvalidStatusTransition` — quote is superseded
/// - `Serialization` / `HashingFailure` — fingerprinting failed
pub fn create_revision(
    meta: &QuoteVersionMetadata,
    previous_snapshot: Option<&CalculationSnapshot>,
    current: &CalculationSnapshot,
    hasher: &Hasher,
    now: DateTime<Utc>,
) -> Result<Option<Revision>> {
    match meta.status {
        QuoteStatus::Draft => return Err(QuoteError::DraftNotRevisable),
        QuoteStatus::Superseded => {
            return Err(QuoteError::InvalidStatusTransition {
                from: QuoteStatus::Superseded.to_string(),
                to: QuoteStatus::Official.to_string(),
            })
        }
        QuoteStatus::Official => {}
    }
    if meta.bid_number.is_none() {
        return Err(QuoteError::DraftNotRevisable);
    }

    let hash = hasher.hash_snapshot(current)?;
    if hash.hash == meta.calc_state_hash {
        return Ok(None);
    }

    let report = detect_changes(previous_snapshot, Some(current));
    let decision = decision_from_report(report);

    let new_version = meta.version.increment(decision.increment);
    let entry = ChangeLogEntry {
        timestamp: now,
        from_version: meta.version,
        to_version: new_version,
        increment_type: decision.increment,
        reason: format!("{} calculation change", decision.increment),
        changes: decision.report.details.clone(),
    };

    let mut change_log = meta.change_log.clone();
    change_log.push(entry);

    let metadata = QuoteVersionMetadata {
        version: new_version,
        status: QuoteStatus::Official,
        bid_number: meta.bid_number.clone(),
        created_at: meta.created_at,
        modified_at: now,
        previous_version: Some(meta.version),
        calc_state_hash: hash.hash.clone(),
        officialized_at: meta.officialized_at,
        superseded_by: None,
        superseded_at: None,
        change_log,
    };

    Ok(Some(Revision {
        metadata,
        hash,
        decision,
    }))
}

/// Mark an official quote as superseded by a major revision.
///
/// # Errors
///
/// - `AlreadySuperseded` — quote is already superseded
/// - `InvalidSupersession` — quote is a draft, or the replacement is not
///   a major bump over the current version
pub fn mark_as_superseded(
    meta: &QuoteVersionMetadata,
    new_version: VersionTag,
    now: DateTime<Utc>,
) -> Result<QuoteVersionMetadata> {
    match meta.status {
        QuoteStatus::Superseded => {
            let by = meta
                .superseded_by
                .map(|v| v.as_string())
                .unwrap_or_else(|| "unknown".to_string());
            return Err(QuoteError::AlreadySuperseded { by });
        }
        QuoteStatus::Draft => {
            return Err(QuoteError::InvalidSupersession {
                status: QuoteStatus::Draft.to_string(),
                replacement: new_version.as_string(),
            })
        }
        QuoteStatus::Official => {}
    }

    // Only a major revision supersedes: the replacement must open a new
    // major line above the current one.
    if new_version.major <= meta.version.major {
        return Err(QuoteError::InvalidSupersession {
            status: meta.status.to_string(),
            replacement: new_version.as_string(),
        });
    }

    let mut superseded = meta.clone();
    superseded.status = QuoteStatus::Superseded;
    superseded.superseded_by = Some(new_version);
    superseded.superseded_at = Some(now);
    superseded.modified_at = now;
    Ok(superseded)
}

/// Promote a draft to official under an assigned bid number.
///
/// The version stays where the draft left it (v1.0 for a fresh draft).
///
/// # Errors
///
/// Returns `InvalidStatusTransition` unless the quote is a draft.
pub fn promote_to_official(
    meta: &QuoteVersionMetadata,
    bid_number: BidNumber,
    now: DateTime<Utc>,
) -> Result<QuoteVersionMetadata> {
    if meta.status != QuoteStatus::Draft {
        return Err(QuoteError::InvalidStatusTransition {
            from: meta.status.to_string(),
            to: QuoteStatus::Official.to_string(),
        });
    }

    let mut official = meta.clone();
    official.status = QuoteStatus::Official;
    official.bid_number = Some(bid_number);
    official.officialized_at = Some(now);
    official.modified_at = now;
    Ok(official)
}
