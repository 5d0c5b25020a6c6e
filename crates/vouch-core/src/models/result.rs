//! Results returned to the caller for external event emission.

use serde::{Deserialize, Serialize};

use super::ids::{EntityId, Fingerprint};
use super::tier::TrustTier;

/// Where an ingested fingerprint landed in the recency buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// Written into a free ring slot.
    RingInsert,
    /// The fingerprint was already in the ring; its score was overwritten.
    RingOverwrite,
    /// The ring was full and `evicted` made room.
    RingEvict { evicted: Fingerprint },
    /// Residency protection blocked eviction; written to the bypass list.
    Bypass,
    /// The fingerprint was already in the bypass list; its score was overwritten.
    BypassOverwrite,
}

impl Placement {
    /// Whether the fingerprint was already resident.
    pub fn is_repeat(self) -> bool {
        matches!(self, Self::RingOverwrite | Self::BypassOverwrite)
    }

    pub fn is_bypass(self) -> bool {
        matches!(self, Self::Bypass | Self::BypassOverwrite)
    }
}

/// How the confirmed tier moved during one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TierTransition {
    Unchanged,
    Promoted { from: TrustTier, to: TrustTier },
    Demoted { from: TrustTier, to: TrustTier },
}

/// Outcome of an ingest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    pub entity: EntityId,
    pub tier: TrustTier,
    /// Quality score, `0..=10000`.
    pub quality: u32,
    /// Confidence, `0..=100`.
    pub confidence: u8,
    /// Risk, `0..=100`.
    pub risk: u8,
    /// Diversity ratio, `0..=255`.
    pub diversity: u8,
    /// True when the fingerprint was not resident in the ring or bypass list
    /// and raised a cardinality register. A fingerprint is unique at most
    /// once per entity; a new rater whose register was already higher is
    /// not reported as unique.
    pub is_unique: bool,
    pub placement: Placement,
    pub transition: TierTransition,
}

/// Why a revoke did or did not take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevokeOutcome {
    Revoked,
    /// Not in the ring or bypass list (aged out, or never seen), or the
    /// resident write carries a different sequence index.
    NotFound,
    AlreadyRevoked,
}

/// Outcome of a revoke. Soft fails carry `had_impact = false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokeResult {
    pub entity: EntityId,
    pub original_score: Option<u8>,
    pub had_impact: bool,
    pub outcome: RevokeOutcome,
    pub new_tier: TrustTier,
    pub new_quality: u32,
    pub new_confidence: u8,
}

/// Outcome of an owner response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseResult {
    pub entity: EntityId,
    pub response_count: u32,
    pub response_digest: [u8; 32],
}
