use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{SecondsFormat, Utc};
use rusqlite::Connection;
use tracing::instrument;

use vouch_core::errors::StorageError;
use vouch_core::models::EntityId;
use vouch_core::{VouchError, VouchResult};
use vouch_engine::codec::RECORD_VERSION;
use vouch_engine::{decode, encode, EntityStats, ReputationEngine};

use crate::migrations::run_migrations;
use crate::pool::apply_pragmas;
use crate::queries::record_ops::{self, RawRecord};
use crate::to_storage_err;

/// SQLite store of encoded entity records.
///
/// One connection behind a mutex serialises every write.
pub struct EntityStore {
    conn: Mutex<Connection>,
}

impl EntityStore {
    /// Open (or create) a database file and bring its schema up to date.
    pub fn open(path: impl AsRef<Path>) -> VouchResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        Self::init(conn, true)
    }

    pub fn open_in_memory() -> VouchResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::init(conn, false)
    }

    fn init(mut conn: Connection, file_backed: bool) -> VouchResult<Self> {
        apply_pragmas(&conn, file_backed)?;
        run_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` with the locked connection.
    pub fn with_conn<F, T>(&self, f: F) -> VouchResult<T>
    where
        F: FnOnce(&Connection) -> VouchResult<T>,
    {
        let guard = self.lock()?;
        f(&guard)
    }

    #[instrument(skip(self, record), fields(entity = %record.entity))]
    pub fn save(&self, record: &EntityStats) -> VouchResult<()> {
        let conn = self.lock()?;
        write_record(&conn, record, &now_stamp())
    }

    #[instrument(skip(self))]
    pub fn load(&self, entity: EntityId) -> VouchResult<Option<EntityStats>> {
        let conn = self.lock()?;
        record_ops::get_record(&conn, entity.0)?
            .map(|raw| decode_row(&raw))
            .transpose()
    }

    /// Every stored record, ordered by entity id.
    #[instrument(skip(self))]
    pub fn load_all(&self) -> VouchResult<Vec<EntityStats>> {
        let conn = self.lock()?;
        record_ops::all_records(&conn)?
            .iter()
            .map(decode_row)
            .collect()
    }

    pub fn count(&self) -> VouchResult<u64> {
        let conn = self.lock()?;
        record_ops::count_records(&conn)
    }

    #[instrument(skip(self))]
    pub fn delete(&self, entity: EntityId) -> VouchResult<bool> {
        let conn = self.lock()?;
        record_ops::delete_record(&conn, entity.0)
    }

    /// Write every record the engine holds in one transaction.
    #[instrument(skip(self, engine))]
    pub fn persist_engine(&self, engine: &ReputationEngine) -> VouchResult<usize> {
        let records = engine.export_records()?;
        let stamp = now_stamp();
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| to_storage_err(e.to_string()))?;
        for record in &records {
            write_record(&tx, record, &stamp)?;
        }
        tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
        tracing::info!(event = "storage.persisted", records = records.len(), "engine persisted");
        Ok(records.len())
    }

    /// Load every stored record into the engine, replacing records for the
    /// same entities. Nothing is imported if any row fails to decode.
    #[instrument(skip(self, engine))]
    pub fn restore_engine(&self, engine: &ReputationEngine) -> VouchResult<usize> {
        let records = self.load_all()?;
        let restored = records.len();
        for record in records {
            engine.import_record(record)?;
        }
        tracing::info!(event = "storage.restored", records = restored, "engine restored");
        Ok(restored)
    }

    fn lock(&self) -> VouchResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| VouchError::LockPoisoned(e.to_string()))
    }
}

fn write_record(conn: &Connection, record: &EntityStats, stamp: &str) -> VouchResult<()> {
    let bytes = encode(record);
    record_ops::upsert_record(conn, record.entity.0, RECORD_VERSION, &bytes, stamp)
}

fn decode_row(raw: &RawRecord) -> VouchResult<EntityStats> {
    let corrupt = |details: String| {
        VouchError::Storage(StorageError::Corrupt {
            entity: raw.entity,
            details,
        })
    };
    let record = decode(&raw.record).map_err(|e| corrupt(e.to_string()))?;
    if record.entity.0 != raw.entity {
        return Err(corrupt(format!("blob belongs to entity {}", record.entity)));
    }
    Ok(record)
}

fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
