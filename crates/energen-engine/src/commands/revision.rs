//! Revision creation workflow.
//!
//! Pipeline (in order):
//! 1. Load stored metadata and the snapshot the quote was issued from
//! 2. Re-hash the **current** live state (never a cached hash: an
//!    intervening mutation would make change detection lie)
//! 3. Kernel `create_revision` — `None` means no change, a no-op
//! 4. Major increment: mark the prior copy superseded
//! 5. Persist new metadata + snapshot, append the ledger entry
//! 6. Assemble the backend request payload

use crate::api::RevisionRequest;
use crate::errors::{EngineError, Result};
use chrono::{DateTime, Utc};
use energen_core::snapshot::builder::{build_snapshot, QuoteState};
use energen_core::snapshot::digest::Hasher;
use energen_core::version::lifecycle as version_ops;
use energen_core::version::metadata::QuoteVersionMetadata;
use energen_core::version::tag::IncrementKind;
use energen_core::{log_op_end, log_op_start};
use energen_core_types::QuoteId;
use energen_store::{LedgerEntry, QuoteStore};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Caller-supplied revision options, forwarded to the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RevisionOptions {
    /// Free-form reason shown in the revision history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Result of a revision attempt.
#[derive(Debug, Clone)]
pub enum RevisionOutcome {
    /// Fingerprints matched; nothing was written
    NoChange,
    /// A revision was created and persisted
    Created {
        metadata: QuoteVersionMetadata,
        /// The prior copy, marked superseded (major increments only)
        superseded: Option<QuoteVersionMetadata>,
        /// Payload for `POST /api/quote/create-revision`
        request: RevisionRequest,
    },
}

/// Create a revision of a stored official quote from live state.
///
/// Returns [`RevisionOutcome::NoChange`] when the live state hashes to
/// the stored fingerprint — a no-op by contract, not an error.
pub fn create_revision(
    store: &mut dyn QuoteStore,
    hasher: &Hasher,
    quote_id: &QuoteId,
    state: &QuoteState,
    options: RevisionOptions,
    now: DateTime<Utc>,
) -> Result<RevisionOutcome> {
    let started = Instant::now();
    log_op_start!("create_revision", quote_id = %quote_id);

    let meta = store
        .load_metadata(quote_id)?
        .ok_or_else(|| EngineError::QuoteNotFound {
            quote_id: quote_id.to_string(),
        })?;
    let previous_snapshot = store.load_snapshot(quote_id)?;

    let current = build_snapshot(state, None);
    let revision =
        version_ops::create_revision(&meta, previous_snapshot.as_ref(), &current, hasher, now)?;

    let Some(revision) = revision else {
        log_op_end!(
            "create_revision",
            duration_ms = started.elapsed().as_millis() as u64,
            scope = "none"
        );
        return Ok(RevisionOutcome::NoChange);
    };

    let superseded = if revision.decision.increment == IncrementKind::Major {
        Some(version_ops::mark_as_superseded(
            &meta,
            revision.metadata.version,
            now,
        )?)
    } else {
        None
    };

    store.save_metadata(quote_id, &revision.metadata, now)?;
    store.save_snapshot(quote_id, &current, now)?;
    store.append_ledger(&LedgerEntry {
        quote_id: quote_id.clone(),
        from_version: meta.version,
        to_version: revision.metadata.version,
        increment_type: revision.decision.increment,
        report: revision.decision.report.clone(),
        created_at: now,
    })?;

    // The backend archives the prior copy; send the superseded form when
    // one exists so its watermark state travels with it.
    let current_quote = superseded.clone().unwrap_or(meta);
    let request = RevisionRequest {
        current_quote,
        revision: revision.metadata.clone(),
        options,
        quote_data: current,
    };

    log_op_end!(
        "create_revision",
        duration_ms = started.elapsed().as_millis() as u64,
        version = %revision.metadata.version.as_string()
    );
    Ok(RevisionOutcome::Created {
        metadata: revision.metadata,
        superseded,
        request,
    })
}
