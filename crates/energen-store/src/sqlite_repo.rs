//! SQLite implementation of the quote storage port.

use crate::errors::{from_rusqlite, Result, StoreError};
use crate::port::{LedgerEntry, QuoteStore};
use crate::{db, migrations};
use chrono::{DateTime, Utc};
use energen_core::snapshot::builder::SettingsInput;
use energen_core::version::metadata::QuoteVersionMetadata;
use energen_core::version::tag::{IncrementKind, VersionTag};
use energen_core::CalculationSnapshot;
use energen_core_types::QuoteId;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

/// Single-row key under which the settings document is stored.
const SETTINGS_KEY: &str = "calculator";

/// SQLite-backed quote store.
pub struct SqliteQuoteStore {
    conn: Connection,
}

impl SqliteQuoteStore {
    /// Open (and migrate) a store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut conn = db::open(path)?;
        db::configure(&conn)?;
        migrations::apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        migrations::apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }
}

impl QuoteStore for SqliteQuoteStore {
    fn load_settings(&self) -> Result<Option<SettingsInput>> {
        let row: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                [SETTINGS_KEY],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)?;
        row.map(|json| serde_json::from_str(&json).map_err(StoreError::from))
            .transpose()
    }

    fn save_settings(&mut self, settings: &SettingsInput, now: DateTime<Utc>) -> Result<()> {
        let json = serde_json::to_string(settings)?;
        self.conn
            .execute(
                "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                rusqlite::params![SETTINGS_KEY, json, now.to_rfc3339()],
            )
            .map_err(from_rusqlite)?;
        Ok(())
    }

    fn load_metadata(&self, quote_id: &QuoteId) -> Result<Option<QuoteVersionMetadata>> {
        let row: Option<String> = self
            .conn
            .query_row(
                "SELECT metadata FROM quotes WHERE quote_id = ?1",
                [quote_id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)?;
        row.map(|json| serde_json::from_str(&json).map_err(StoreError::from))
            .transpose()
    }

    fn save_metadata(
        &mut self,
        quote_id: &QuoteId,
        metadata: &QuoteVersionMetadata,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let json = serde_json::to_string(metadata)?;
        self.conn
            .execute(
                "INSERT INTO quotes (quote_id, metadata, snapshot, updated_at)
                 VALUES (?1, ?2, NULL, ?3)
                 ON CONFLICT(quote_id) DO UPDATE SET
                    metadata = excluded.metadata,
                    updated_at = excluded.updated_at",
                rusqlite::params![quote_id.as_str(), json, now.to_rfc3339()],
            )
            .map_err(from_rusqlite)?;
        Ok(())
    }

    fn load_snapshot(&self, quote_id: &QuoteId) -> Result<Option<CalculationSnapshot>> {
        let row: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT snapshot FROM quotes WHERE quote_id = ?1",
                [quote_id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)?;
        row.flatten()
            .map(|json| serde_json::from_str(&json).map_err(StoreError::from))
            .transpose()
    }

    fn save_snapshot(
        &mut self,
        quote_id: &QuoteId,
        snapshot: &CalculationSnapshot,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        let updated = self
            .conn
            .execute(
                "UPDATE quotes SET snapshot = ?2, updated_at = ?3 WHERE quote_id = ?1",
                rusqlite::params![quote_id.as_str(), json, now.to_rfc3339()],
            )
            .map_err(from_rusqlite)?;
        if updated == 0 {
            return Err(StoreError::QuoteNotFound {
                quote_id: quote_id.to_string(),
            });
        }
        Ok(())
    }

    fn append_ledger(&mut self, entry: &LedgerEntry) -> Result<()> {
        let report = serde_json::to_string(&entry.report)?;
        self.conn
            .execute(
                "INSERT INTO revision_ledger
                    (quote_id, from_version, to_version, increment_type, report, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    entry.quote_id.as_str(),
                    entry.from_version.as_string(),
                    entry.to_version.as_string(),
                    entry.increment_type.to_string(),
                    report,
                    entry.created_at.to_rfc3339(),
                ],
            )
            .map_err(from_rusqlite)?;
        Ok(())
    }

    fn ledger_for(&self, quote_id: &QuoteId) -> Result<Vec<LedgerEntry>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT from_version, to_version, increment_type, report, created_at
                 FROM revision_ledger WHERE quote_id = ?1 ORDER BY id",
            )
            .map_err(from_rusqlite)?;

        let rows = stmt
            .query_map([quote_id.as_str()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })
            .map_err(from_rusqlite)?;

        let mut entries = Vec::new();
        for row in rows {
            let (from_version, to_version, increment_type, report, created_at) =
                row.map_err(from_rusqlite)?;
            entries.push(LedgerEntry {
                quote_id: quote_id.clone(),
                from_version: VersionTag::parse(&from_version)
                    .map_err(|e| StoreError::Corrupt(e.to_string()))?,
                to_version: VersionTag::parse(&to_version)
                    .map_err(|e| StoreError::Corrupt(e.to_string()))?,
                increment_type: parse_increment(&increment_type)?,
                report: serde_json::from_str(&report)?,
                created_at: created_at
                    .parse::<DateTime<Utc>>()
                    .map_err(|e| StoreError::Corrupt(e.to_string()))?,
            });
        }
        Ok(entries)
    }
}

fn parse_increment(value: &str) -> Result<IncrementKind> {
    match value {
        "none" => Ok(IncrementKind::None),
        "minor" => Ok(IncrementKind::Minor),
        "major" => Ok(IncrementKind::Major),
        other => Err(StoreError::Corrupt(format!(
            "unknown increment type {:?}",
            other
        ))),
    }
}
