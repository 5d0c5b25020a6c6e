//! Data types shared by every vouch crate.

pub mod ids;
pub mod input;
pub mod result;
pub mod summary;
pub mod tier;

pub use ids::{EntityId, Fingerprint, RaterId, SealHash};
pub use input::{FeedbackInput, ResponseInput, RevokeInput};
pub use result::{
    Placement, ResponseResult, RevokeOutcome, RevokeResult, TierTransition, UpdateResult,
};
pub use summary::{DigestHeads, EntitySummary};
pub use tier::TrustTier;
