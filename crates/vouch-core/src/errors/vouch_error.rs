use super::storage_error::StorageError;
use crate::models::EntityId;

/// Top-level error for every vouch operation.
///
/// Hard failures only. A revoke that cannot find its target is not an error;
/// it is reported through [`crate::RevokeOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum VouchError {
    /// An input was outside its allowed bounds. Nothing was mutated.
    #[error("validation failed for {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A counter would have exceeded its integer range.
    #[error("counter overflow: {counter}")]
    Overflow { counter: &'static str },

    /// An administrative config update was outside its allowed bounds.
    /// The previous configuration is still in effect.
    #[error("config value out of bounds for {field}: {reason}")]
    ConfigBounds { field: &'static str, reason: String },

    /// The config document could not be parsed.
    #[error("config parse error: {0}")]
    Config(String),

    /// The entity has no record yet.
    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),

    /// A per-entity or config lock was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// A persisted record could not be decoded.
    #[error("record codec error: {0}")]
    Codec(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VouchError {
    /// Shorthand for a [`VouchError::Validation`].
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`VouchError::ConfigBounds`].
    pub fn config_bounds(field: &'static str, reason: impl Into<String>) -> Self {
        Self::ConfigBounds {
            field,
            reason: reason.into(),
        }
    }

    /// Whether the error came from rejected input rather than internal state.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
