//! Draft initialization and promotion workflows.

use crate::errors::{EngineError, Result};
use chrono::{DateTime, Utc};
use energen_core::snapshot::builder::{build_snapshot, QuoteState};
use energen_core::snapshot::digest::Hasher;
use energen_core::version::metadata::QuoteVersionMetadata;
use energen_core::{log_op_end, log_op_start};
use energen_core_types::{BidNumber, QuoteId};
use energen_store::QuoteStore;
use std::time::Instant;

/// Create and persist a fresh draft (v1.0) for the given state.
pub fn initialize_draft(
    store: &mut dyn QuoteStore,
    hasher: &Hasher,
    quote_id: &QuoteId,
    state: &QuoteState,
    now: DateTime<Utc>,
) -> Result<QuoteVersionMetadata> {
    let started = Instant::now();
    log_op_start!("initialize_draft", quote_id = %quote_id);

    let snapshot = build_snapshot(state, None);
    let hash = hasher.hash_snapshot(&snapshot)?;
    let metadata = QuoteVersionMetadata::new_draft(hash.hash.clone(), now);

    store.save_metadata(quote_id, &metadata, now)?;
    store.save_snapshot(quote_id, &snapshot, now)?;

    log_op_end!(
        "initialize_draft",
        duration_ms = started.elapsed().as_millis() as u64,
        hash = %hash.hash
    );
    Ok(metadata)
}

/// Promote a stored draft to official under an assigned bid number.
pub fn promote_to_official(
    store: &mut dyn QuoteStore,
    quote_id: &QuoteId,
    bid_number: BidNumber,
    now: DateTime<Utc>,
) -> Result<QuoteVersionMetadata> {
    let started = Instant::now();
    log_op_start!("promote_to_official", quote_id = %quote_id, bid_number = %bid_number);

    let meta = store
        .load_metadata(quote_id)?
        .ok_or_else(|| EngineError::QuoteNotFound {
            quote_id: quote_id.to_string(),
        })?;
    let official = energen_core::promote_to_official(&meta, bid_number, now)?;
    store.save_metadata(quote_id, &official, now)?;

    log_op_end!(
        "promote_to_official",
        duration_ms = started.elapsed().as_millis() as u64
    );
    Ok(official)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use energen_core::version::metadata::QuoteStatus;
    use energen_store::MemoryQuoteStore;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_initialize_then_promote() {
        let mut store = MemoryQuoteStore::new();
        let quote_id = QuoteId::new();
        let hasher = Hasher::new();

        let draft = initialize_draft(
            &mut store,
            &hasher,
            &quote_id,
            &QuoteState::default(),
            now(),
        )
        .unwrap();
        assert_eq!(draft.status, QuoteStatus::Draft);
        assert!(store.load_snapshot(&quote_id).unwrap().is_some());

        let official = promote_to_official(
            &mut store,
            &quote_id,
            BidNumber::new("BID-0001").unwrap(),
            now(),
        )
        .unwrap();
        assert!(official.is_official());
        assert_eq!(
            store.load_metadata(&quote_id).unwrap().unwrap(),
            official
        );
    }

    #[test]
    fn test_promote_unknown_quote_fails() {
        let mut store = MemoryQuoteStore::new();
        let err = promote_to_official(
            &mut store,
            &QuoteId::new(),
            BidNumber::new("BID-0001").unwrap(),
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::QuoteNotFound { .. }));
    }
}
