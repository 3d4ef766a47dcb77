//! Embedded schema migrations.
//!
//! Migrations are compiled in and applied in order, tracked through
//! `PRAGMA user_version`. Each entry runs in its own transaction.

use crate::errors::{from_rusqlite, Result, StoreError};
use rusqlite::Connection;

/// Ordered migration list. Append only; never edit an applied entry.
const MIGRATIONS: &[&str] = &[
    // 0001: settings record (single-row JSON document)
    "CREATE TABLE settings (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    // 0002: quote version metadata and the snapshot it was issued from
    "CREATE TABLE quotes (
        quote_id TEXT PRIMARY KEY,
        metadata TEXT NOT NULL,
        snapshot TEXT,
        updated_at TEXT NOT NULL
    )",
    // 0003: append-only revision ledger
    "CREATE TABLE revision_ledger (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        quote_id TEXT NOT NULL,
        from_version TEXT NOT NULL,
        to_version TEXT NOT NULL,
        increment_type TEXT NOT NULL,
        report TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    // 0004: ledger lookups are always per quote
    "CREATE INDEX idx_revision_ledger_quote ON revision_ledger (quote_id, id)",
];

/// Apply all pending migrations.
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    let applied: u32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(from_rusqlite)?;

    for (index, sql) in MIGRATIONS.iter().enumerate().skip(applied as usize) {
        let id = (index + 1) as u32;
        let tx = conn.transaction().map_err(from_rusqlite)?;
        tx.execute_batch(sql).map_err(|e| StoreError::Migration {
            id,
            reason: e.to_string(),
        })?;
        tx.pragma_update(None, "user_version", id)
            .map_err(from_rusqlite)?;
        tx.commit().map_err(from_rusqlite)?;
        tracing::debug!(migration = id, "applied store migration");
    }

    Ok(())
}
