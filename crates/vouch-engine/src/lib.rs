//! # vouch-engine
//!
//! Composes the sketches, statistics and digest chains into one fixed-size
//! record per entity, and serves ingest, revoke and respond over a
//! concurrent registry of those records.
//!
//! ```
//! use vouch_core::models::{EntityId, FeedbackInput, RaterId, SealHash};
//! use vouch_engine::ReputationEngine;
//!
//! let engine = ReputationEngine::default();
//! let result = engine
//!     .ingest(&FeedbackInput {
//!         entity: EntityId(1),
//!         rater: RaterId::from_seed(7),
//!         score: 90,
//!         sequence_index: 1,
//!         time_marker: 1_000,
//!         seal: SealHash::default(),
//!     })
//!     .unwrap();
//! assert!(result.is_unique);
//! ```

pub mod codec;
pub mod engine;
pub mod metrics;
pub mod orchestrator;
pub mod record;
pub mod tracing_setup;

pub use codec::{decode, encode, RECORD_LEN};
pub use engine::ReputationEngine;
pub use metrics::{EngineMetrics, MetricsSnapshot};
pub use record::EntityStats;
pub use tracing_setup::init_tracing;
