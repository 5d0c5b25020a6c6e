/// Vouch engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of cardinality-estimator registers per entity.
pub const REGISTER_COUNT: usize = 256;

/// Largest value a 4-bit cardinality register may hold.
pub const RHO_MAX: u8 = 15;

/// Live slots in the per-entity recency ring.
pub const RING_CAPACITY: usize = 24;

/// Slots in the per-entity bypass overflow list.
pub const BYPASS_CAPACITY: usize = 10;

/// Width of a rater fingerprint in bits.
pub const FINGERPRINT_BITS: u32 = 56;

/// Mask selecting the fingerprint bits of a `u64`.
pub const FINGERPRINT_MASK: u64 = (1 << FINGERPRINT_BITS) - 1;

/// Highest accepted feedback score.
pub const SCORE_MAX: u8 = 100;

/// Fixed-point scale of the EMA fields. A score `s` enters as `s * 100`.
pub const EMA_SCALE: u32 = 10_000;

/// Upper bound of the quality score (same scale as the EMAs).
pub const QUALITY_MAX: u32 = 10_000;

/// Upper bound of burst and negative pressure.
pub const PRESSURE_MAX: u8 = 255;

/// Upper bound of the diversity ratio.
pub const DIVERSITY_MAX: u8 = 255;

/// Upper bound of the loyalty score.
pub const LOYALTY_MAX: u8 = 255;

/// Upper bound of the risk score.
pub const RISK_MAX: u8 = 100;

/// Upper bound of the confidence score.
pub const CONFIDENCE_MAX: u8 = 100;

/// Upper bound of the arrival EMA (`log2(u64::MAX) * 100`).
pub const ARRIVAL_MAX: u32 = 6_400;

/// Basis-point denominator used by every alpha.
pub const BPS: u32 = 10_000;
