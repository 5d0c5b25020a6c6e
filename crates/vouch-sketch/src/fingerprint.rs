//! Fingerprint derivation.
//!
//! Fingerprints mix the entity's salt, so one rater produces unrelated
//! fingerprints against different entities. They are reproducible, not
//! secret: anyone who can read the salt can recompute them.
//!
//! # Examples
//!
//! ```
//! use vouch_core::models::{EntityId, RaterId};
//! use vouch_sketch::derive_fingerprint;
//!
//! let rater = RaterId::from_seed(1);
//! let a = derive_fingerprint(7, EntityId(1), &rater);
//! assert_eq!(a, derive_fingerprint(7, EntityId(1), &rater));
//! assert_ne!(a, derive_fingerprint(7, EntityId(2), &rater));
//! ```

use vouch_core::models::{EntityId, Fingerprint, RaterId};

/// blake3 key-derivation context for fingerprints.
pub const FINGERPRINT_CONTEXT: &str = "vouch fingerprint v1";

/// blake3 key-derivation context for entity salts.
pub const SALT_CONTEXT: &str = "vouch entity salt v1";

/// Derive the 56-bit fingerprint of `rater` against `entity`.
pub fn derive_fingerprint(salt: u64, entity: EntityId, rater: &RaterId) -> Fingerprint {
    let mut hasher = blake3::Hasher::new_derive_key(FINGERPRINT_CONTEXT);
    hasher.update(&salt.to_le_bytes());
    hasher.update(&entity.to_le_bytes());
    hasher.update(rater.as_bytes());
    Fingerprint::new(leading_u64(hasher.finalize().as_bytes()))
}

/// Derive an entity's salt from its first accepted feedback.
pub fn derive_salt(entity: EntityId, first_rater: &RaterId, first_time: u64) -> u64 {
    let mut hasher = blake3::Hasher::new_derive_key(SALT_CONTEXT);
    hasher.update(&entity.to_le_bytes());
    hasher.update(first_rater.as_bytes());
    hasher.update(&first_time.to_le_bytes());
    leading_u64(hasher.finalize().as_bytes())
}

fn leading_u64(bytes: &[u8; 32]) -> u64 {
    let mut head = [0u8; 8];
    head.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(head)
}
