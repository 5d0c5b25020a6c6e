//! # vouch-core
//!
//! Foundation crate for the vouch reputation engine.
//! Defines ids, inputs and results, trust tiers, errors, config, constants,
//! and the integer fixed-point helpers every scoring component shares.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod fixed;
pub mod models;

// Re-export the most commonly used types at the crate root.
pub use config::VouchConfig;
pub use errors::{StorageError, VouchError, VouchResult};
pub use models::{
    DigestHeads, EntityId, EntitySummary, FeedbackInput, Fingerprint, Placement, RaterId,
    ResponseInput, ResponseResult, RevokeInput, RevokeOutcome, RevokeResult, SealHash,
    TierTransition, TrustTier, UpdateResult,
};
