//! v001: entity_records table.

use rusqlite::Connection;

pub fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS entity_records (
            entity      INTEGER PRIMARY KEY,
            version     INTEGER NOT NULL,
            record      BLOB NOT NULL,
            updated_at  TEXT NOT NULL
        );
        ",
    )
}
