//! Raw entity_records CRUD.
//!
//! Entity ids are `u64` but SQLite integers are signed, so ids are stored
//! bit-cast to `i64` and cast back on read.

use rusqlite::{params, Connection, OptionalExtension};

use vouch_core::VouchResult;

use crate::to_storage_err;

/// One stored row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub entity: u64,
    pub version: u8,
    pub record: Vec<u8>,
    pub updated_at: String,
}

/// Insert or replace the row for `entity`.
pub fn upsert_record(
    conn: &Connection,
    entity: u64,
    version: u8,
    record: &[u8],
    updated_at: &str,
) -> VouchResult<()> {
    conn.execute(
        "INSERT INTO entity_records (entity, version, record, updated_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(entity) DO UPDATE SET
             version = excluded.version,
             record = excluded.record,
             updated_at = excluded.updated_at",
        params![entity as i64, version, record, updated_at],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_record(conn: &Connection, entity: u64) -> VouchResult<Option<RawRecord>> {
    conn.query_row(
        "SELECT entity, version, record, updated_at FROM entity_records WHERE entity = ?1",
        params![entity as i64],
        row_to_raw,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Every row, ordered by unsigned entity id.
pub fn all_records(conn: &Connection) -> VouchResult<Vec<RawRecord>> {
    let mut stmt = conn
        .prepare("SELECT entity, version, record, updated_at FROM entity_records")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], row_to_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut records = rows
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    records.sort_by_key(|r| r.entity);
    Ok(records)
}

pub fn count_records(conn: &Connection) -> VouchResult<u64> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM entity_records", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as u64)
}

pub fn delete_record(conn: &Connection, entity: u64) -> VouchResult<bool> {
    let deleted = conn
        .execute(
            "DELETE FROM entity_records WHERE entity = ?1",
            params![entity as i64],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(deleted > 0)
}

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRecord> {
    let entity: i64 = row.get(0)?;
    Ok(RawRecord {
        entity: entity as u64,
        version: row.get(1)?,
        record: row.get(2)?,
        updated_at: row.get(3)?,
    })
}
