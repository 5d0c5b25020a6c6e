use serde::{Deserialize, Serialize};

use super::ids::{to_hex, EntityId};
use super::tier::TrustTier;

/// Read-only public snapshot of an entity's reputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub entity: EntityId,
    pub tier: TrustTier,
    pub quality: u32,
    pub risk: u8,
    pub confidence: u8,
    pub diversity_ratio: u8,
    pub feedback_count: u32,
    pub unique_estimate: u32,
    pub ema_fast: u32,
    pub ema_slow: u32,
    pub loyalty_score: u8,
    pub first_seen_time: u64,
    pub last_seen_time: u64,
}

/// Heads of the three digest chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DigestHeads {
    pub feedback: [u8; 32],
    pub revoke: [u8; 32],
    pub response: [u8; 32],
}

impl DigestHeads {
    pub fn feedback_hex(&self) -> String {
        to_hex(&self.feedback)
    }

    pub fn revoke_hex(&self) -> String {
        to_hex(&self.revoke)
    }

    pub fn response_hex(&self) -> String {
        to_hex(&self.response)
    }
}
