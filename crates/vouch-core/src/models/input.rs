//! Pre-validated inputs handed over by the identity layer.
//!
//! The identity layer has already rejected self-ratings and checked
//! ownership. The engine re-checks only the numeric bounds it depends on.

use serde::{Deserialize, Serialize};

use super::ids::{EntityId, RaterId, SealHash};
use crate::constants::SCORE_MAX;
use crate::errors::{VouchError, VouchResult};

/// One feedback event for an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackInput {
    pub entity: EntityId,
    pub rater: RaterId,
    /// Integer score in `[0, 100]`.
    pub score: u8,
    /// Per-(entity, rater) sequence index, starting at 1.
    pub sequence_index: u64,
    /// Monotonic time marker in seconds.
    pub time_marker: u64,
    /// Commitment over the full feedback payload (score, tags, endpoint, URIs, file hash).
    pub seal: SealHash,
}

impl FeedbackInput {
    pub fn validate(&self) -> VouchResult<()> {
        if self.score > SCORE_MAX {
            return Err(VouchError::validation(
                "score",
                format!("{} is outside [0, {SCORE_MAX}]", self.score),
            ));
        }
        validate_sequence(self.sequence_index)
    }
}

/// Revocation of an earlier feedback by its rater.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokeInput {
    pub entity: EntityId,
    pub rater: RaterId,
    /// Sequence index of the feedback being revoked.
    pub sequence_index: u64,
    pub time_marker: u64,
    /// Seal the rater claims for the revoked feedback.
    pub claimed_seal: SealHash,
}

impl RevokeInput {
    pub fn validate(&self) -> VouchResult<()> {
        validate_sequence(self.sequence_index)
    }
}

/// A response appended by the entity's owner to one of its feedbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseInput {
    pub entity: EntityId,
    /// Rater of the feedback being answered.
    pub rater: RaterId,
    /// Sequence index of the feedback being answered.
    pub sequence_index: u64,
    pub time_marker: u64,
    /// Commitment over the full response payload.
    pub seal: SealHash,
}

impl ResponseInput {
    pub fn validate(&self) -> VouchResult<()> {
        validate_sequence(self.sequence_index)
    }
}

fn validate_sequence(sequence_index: u64) -> VouchResult<()> {
    if sequence_index == 0 {
        return Err(VouchError::validation(
            "sequence_index",
            "sequence indices start at 1",
        ));
    }
    Ok(())
}
