//! Identifier newtypes.
//!
//! # Examples
//!
//! ```
//! use vouch_core::models::{EntityId, Fingerprint, RaterId};
//!
//! let entity = EntityId::from(7);
//! assert_eq!(entity.to_string(), "7");
//!
//! let rater = RaterId::from_seed(42);
//! assert_ne!(rater, RaterId::from_seed(43));
//!
//! assert_eq!(Fingerprint::new(u64::MAX).value(), (1u64 << 56) - 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::FINGERPRINT_MASK;

/// Identifier of a scored entity (an agent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Little-endian bytes fed into every hash that mentions this entity.
    pub fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A rater's identity commitment, as handed over by the identity layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RaterId(pub [u8; 32]);

impl RaterId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Build a commitment from a numeric handle. The handle occupies the first
    /// eight bytes; the rest stay zero.
    pub fn from_seed(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&seed.to_le_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for RaterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_hex(&self.0))
    }
}

/// Opaque caller-computed commitment over a full feedback, revoke, or
/// response payload. The engine hashes it in and never inspects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SealHash(pub [u8; 32]);

impl SealHash {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for SealHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_hex(&self.0))
    }
}

/// Entity-scoped 56-bit rater fingerprint. The de-duplication key for the
/// cardinality estimator and the recency ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Create a fingerprint, discarding bits above the fingerprint width.
    pub fn new(raw: u64) -> Self {
        Self(raw & FINGERPRINT_MASK)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:014x}", self.0)
    }
}

/// Lowercase hex encoding.
pub fn to_hex(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push(DIGITS[(b >> 4) as usize] as char);
        out.push(DIGITS[(b & 0x0f) as usize] as char);
    }
    out
}
