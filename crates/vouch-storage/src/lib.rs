//! # vouch-storage
//!
//! Keeps encoded entity records in SQLite, one row per entity. The blob is
//! the fixed-size record produced by [`vouch_engine::encode`], so a row never
//! grows with the entity's history.

pub mod migrations;
pub mod pool;
pub mod queries;
mod store;

pub use store::EntityStore;

use vouch_core::errors::StorageError;
use vouch_core::VouchError;

/// Wrap a SQLite failure message.
pub(crate) fn to_storage_err(message: String) -> VouchError {
    VouchError::Storage(StorageError::Sqlite { message })
}
