//! Span definitions per engine operation.

/// Create an ingest span.
#[macro_export]
macro_rules! ingest_span {
    ($entity:expr, $sequence:expr) => {
        tracing::debug_span!("vouch.ingest", entity = %$entity, sequence = $sequence)
    };
}

/// Create a revoke span.
#[macro_export]
macro_rules! revoke_span {
    ($entity:expr, $sequence:expr) => {
        tracing::debug_span!("vouch.revoke", entity = %$entity, sequence = $sequence)
    };
}

/// Create a response span.
#[macro_export]
macro_rules! response_span {
    ($entity:expr, $sequence:expr) => {
        tracing::debug_span!("vouch.response", entity = %$entity, sequence = $sequence)
    };
}

/// Create a batch ingest span.
#[macro_export]
macro_rules! batch_span {
    ($events:expr, $entities:expr) => {
        tracing::info_span!("vouch.batch", events = $events, entities = $entities)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const INGEST: &str = "vouch.ingest";
    pub const REVOKE: &str = "vouch.revoke";
    pub const RESPONSE: &str = "vouch.response";
    pub const BATCH: &str = "vouch.batch";
}
