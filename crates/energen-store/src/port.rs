//! The storage port injected into quoting workflows.
//!
//! Workflows own an explicit `&mut dyn QuoteStore`; nothing in the kernel
//! reaches for shared module state.

use crate::errors::Result;
use chrono::{DateTime, Utc};
use energen_core::snapshot::builder::SettingsInput;
use energen_core::version::metadata::QuoteVersionMetadata;
use energen_core::version::tag::{IncrementKind, VersionTag};
use energen_core::{CalculationSnapshot, ChangeReport};
use energen_core_types::QuoteId;
use serde::{Deserialize, Serialize};

/// One appended revision-ledger row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub quote_id: QuoteId,
    pub from_version: VersionTag,
    pub to_version: VersionTag,
    pub increment_type: IncrementKind,
    pub report: ChangeReport,
    pub created_at: DateTime<Utc>,
}

/// Key/value persistence for settings, quote metadata, stored snapshots,
/// and the revision ledger.
pub trait QuoteStore {
    /// Load the persisted settings record, if one exists.
    fn load_settings(&self) -> Result<Option<SettingsInput>>;

    /// Replace the persisted settings record.
    fn save_settings(&mut self, settings: &SettingsInput, now: DateTime<Utc>) -> Result<()>;

    /// Load version metadata for a quote.
    fn load_metadata(&self, quote_id: &QuoteId) -> Result<Option<QuoteVersionMetadata>>;

    /// Upsert version metadata for a quote.
    fn save_metadata(
        &mut self,
        quote_id: &QuoteId,
        metadata: &QuoteVersionMetadata,
        now: DateTime<Utc>,
    ) -> Result<()>;

    /// Load the snapshot the quote's current fingerprint was computed
    /// from (needed for change detection on the next revision).
    fn load_snapshot(&self, quote_id: &QuoteId) -> Result<Option<CalculationSnapshot>>;

    /// Store the snapshot alongside the quote's metadata.
    fn save_snapshot(
        &mut self,
        quote_id: &QuoteId,
        snapshot: &CalculationSnapshot,
        now: DateTime<Utc>,
    ) -> Result<()>;

    /// Append a revision-ledger entry.
    fn append_ledger(&mut self, entry: &LedgerEntry) -> Result<()>;

    /// All ledger entries for a quote, oldest first.
    fn ledger_for(&self, quote_id: &QuoteId) -> Result<Vec<LedgerEntry>>;
}
