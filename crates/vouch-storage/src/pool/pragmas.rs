//! PRAGMA configuration applied to every connection.
//!
//! File-backed databases run in WAL mode with NORMAL sync. In-memory
//! databases keep SQLite's memory journal.

use rusqlite::Connection;

use vouch_core::VouchResult;

use crate::to_storage_err;

pub fn apply_pragmas(conn: &Connection, file_backed: bool) -> VouchResult<()> {
    if file_backed {
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    }
    conn.execute_batch(
        "
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Whether WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> VouchResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
