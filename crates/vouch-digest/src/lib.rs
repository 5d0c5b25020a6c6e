//! # vouch-digest
//!
//! Three independent rolling hash chains per entity, one each for feedback,
//! revoke and response events:
//!
//! ```text
//! leaf  = blake3("vouch.leaf.v1" ‖ entity ‖ rater ‖ sequence ‖ seal ‖ time)
//! head' = blake3(chain_domain ‖ head ‖ leaf)
//! ```
//!
//! The seal is an opaque caller commitment over the full event payload. It is
//! hashed in as given. Only the heads are stored; a verifier holding the full
//! event list rebuilds them with [`DigestChain::replay`].

pub mod chain;
pub mod leaf;

pub use chain::{ChainKind, DigestChain};
pub use leaf::EventLeaf;
