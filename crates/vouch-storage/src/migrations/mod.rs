//! Versioned schema migrations.
//!
//! Each step runs in its own transaction and records its version in
//! `schema_version`. Steps already applied are skipped, so running the
//! migrations on every open is safe.

mod v001_entity_records;

use rusqlite::Connection;

use vouch_core::errors::StorageError;
use vouch_core::{VouchError, VouchResult};

use crate::to_storage_err;

type Migration = fn(&Connection) -> rusqlite::Result<()>;

const MIGRATIONS: &[(u32, Migration)] = &[(1, v001_entity_records::migrate)];

/// Highest schema version this build knows about.
pub const LATEST_VERSION: u32 = 1;

/// Apply every migration newer than the database's current version.
pub fn run_migrations(conn: &mut Connection) -> VouchResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    if current > LATEST_VERSION {
        return Err(migration_err(
            current,
            format!("database is newer than this build (latest {LATEST_VERSION})"),
        ));
    }

    for &(version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let tx = conn
            .transaction()
            .map_err(|e| migration_err(version, e.to_string()))?;
        migrate(&tx).map_err(|e| migration_err(version, e.to_string()))?;
        tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
            .map_err(|e| migration_err(version, e.to_string()))?;
        tx.commit()
            .map_err(|e| migration_err(version, e.to_string()))?;
        tracing::info!(event = "storage.migrated", version, "applied schema migration");
    }

    current_version(conn)
}

/// Highest applied version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> VouchResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

fn migration_err(version: u32, reason: String) -> VouchError {
    VouchError::Storage(StorageError::Migration { version, reason })
}
