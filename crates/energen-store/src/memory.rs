//! In-memory implementation of the quote storage port.
//!
//! Used by tests and by preview workflows that must never touch disk.

use crate::errors::{Result, StoreError};
use crate::port::{LedgerEntry, QuoteStore};
use chrono::{DateTime, Utc};
use energen_core::snapshot::builder::SettingsInput;
use energen_core::version::metadata::QuoteVersionMetadata;
use energen_core::CalculationSnapshot;
use energen_core_types::QuoteId;
use std::collections::BTreeMap;

/// Quote store backed by plain maps.
#[derive(Default)]
pub struct MemoryQuoteStore {
    settings: Option<SettingsInput>,
    metadata: BTreeMap<String, QuoteVersionMetadata>,
    snapshots: BTreeMap<String, CalculationSnapshot>,
    ledger: Vec<LedgerEntry>,
}

impl MemoryQuoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuoteStore for MemoryQuoteStore {
    fn load_settings(&self) -> Result<Option<SettingsInput>> {
        Ok(self.settings.clone())
    }

    fn save_settings(&mut self, settings: &SettingsInput, _now: DateTime<Utc>) -> Result<()> {
        self.settings = Some(settings.clone());
        Ok(())
    }

    fn load_metadata(&self, quote_id: &QuoteId) -> Result<Option<QuoteVersionMetadata>> {
        Ok(self.metadata.get(quote_id.as_str()).cloned())
    }

    fn save_metadata(
        &mut self,
        quote_id: &QuoteId,
        metadata: &QuoteVersionMetadata,
        _now: DateTime<Utc>,
    ) -> Result<()> {
        self.metadata
            .insert(quote_id.as_str().to_string(), metadata.clone());
        Ok(())
    }

    fn load_snapshot(&self, quote_id: &QuoteId) -> Result<Option<CalculationSnapshot>> {
        Ok(self.snapshots.get(quote_id.as_str()).cloned())
    }

    fn save_snapshot(
        &mut self,
        quote_id: &QuoteId,
        snapshot: &CalculationSnapshot,
        _now: DateTime<Utc>,
    ) -> Result<()> {
        if !self.metadata.contains_key(quote_id.as_str()) {
            return Err(StoreError::QuoteNotFound {
                quote_id: quote_id.to_string(),
            });
        }
        self.snapshots
            .insert(quote_id.as_str().to_string(), snapshot.clone());
        Ok(())
    }

    fn append_ledger(&mut self, entry: &LedgerEntry) -> Result<()> {
        self.ledger.push(entry.clone());
        Ok(())
    }

    fn ledger_for(&self, quote_id: &QuoteId) -> Result<Vec<LedgerEntry>> {
        Ok(self
            .ledger
            .iter()
            .filter(|entry| entry.quote_id == *quote_id)
            .cloned()
            .collect())
    }
}
