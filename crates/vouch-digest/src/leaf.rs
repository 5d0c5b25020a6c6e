use blake3::Hasher;

use vouch_core::models::{EntityId, FeedbackInput, RaterId, ResponseInput, RevokeInput, SealHash};

const LEAF_DOMAIN: &[u8] = b"vouch.leaf.v1";

/// Fields hashed into one chain leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventLeaf {
    pub entity: EntityId,
    pub rater: RaterId,
    pub sequence_index: u64,
    pub seal: SealHash,
    pub time_marker: u64,
}

impl EventLeaf {
    pub fn hash(&self) -> [u8; 32] {
        let mut hasher = Hasher::new();
        hasher.update(LEAF_DOMAIN);
        hasher.update(&self.entity.to_le_bytes());
        hasher.update(self.rater.as_bytes());
        hasher.update(&self.sequence_index.to_le_bytes());
        hasher.update(self.seal.as_bytes());
        hasher.update(&self.time_marker.to_le_bytes());
        *hasher.finalize().as_bytes()
    }
}

impl From<&FeedbackInput> for EventLeaf {
    fn from(input: &FeedbackInput) -> Self {
        Self {
            entity: input.entity,
            rater: input.rater,
            sequence_index: input.sequence_index,
            seal: input.seal,
            time_marker: input.time_marker,
        }
    }
}

impl From<&RevokeInput> for EventLeaf {
    fn from(input: &RevokeInput) -> Self {
        Self {
            entity: input.entity,
            rater: input.rater,
            sequence_index: input.sequence_index,
            seal: input.claimed_seal,
            time_marker: input.time_marker,
        }
    }
}

impl From<&ResponseInput> for EventLeaf {
    fn from(input: &ResponseInput) -> Self {
        Self {
            entity: input.entity,
            rater: input.rater,
            sequence_index: input.sequence_index,
            seal: input.seal,
            time_marker: input.time_marker,
        }
    }
}
