//! # vouch-sketch
//!
//! Fixed-size structures that remember raters without storing them:
//!
//! - [`fingerprint`]: entity-scoped rater fingerprints and per-entity salts
//! - [`cardinality`]: 256-register distinct-rater estimator
//! - [`recency`]: recency ring with residency-guarded eviction and a bypass list

pub mod cardinality;
pub mod fingerprint;
pub mod recency;

pub use cardinality::CardinalityEstimator;
pub use fingerprint::{derive_fingerprint, derive_salt};
pub use recency::{RecencyBuffer, RevokeLookup, Slot, SlotLocation, WriteOutcome};
