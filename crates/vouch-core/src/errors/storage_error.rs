/// Storage-layer errors for SQLite persistence of entity records.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    Migration { version: u32, reason: String },

    #[error("corrupt record for entity {entity}: {details}")]
    Corrupt { entity: u64, details: String },
}
