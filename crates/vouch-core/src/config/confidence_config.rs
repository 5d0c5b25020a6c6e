use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::CONFIDENCE_MAX;
use crate::errors::{VouchError, VouchResult};

/// Confidence and quality shaping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Below this many feedbacks the entity is in cold start.
    pub cold_start_min_samples: u32,
    /// Confidence per feedback during cold start.
    pub cold_start_step: u8,
    /// Base confidence once cold start ends.
    pub cold_start_floor: u8,
    /// Base confidence added per feedback after cold start.
    pub per_feedback: u8,
    /// Cap on the sample-size part of confidence.
    pub ceiling: u8,
    pub uniqueness_bonus_max: u8,
    /// Confidence per distinct active epoch.
    pub epoch_bonus: u8,
    pub epoch_bonus_max: u8,
    pub loyalty_divisor: u8,
    pub loyalty_bonus_max: u8,
    /// Weight of the fast EMA in the quality blend (percent).
    pub quality_fast_weight_pct: u8,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            cold_start_min_samples: defaults::DEFAULT_COLD_START_MIN_SAMPLES,
            cold_start_step: defaults::DEFAULT_COLD_START_STEP,
            cold_start_floor: defaults::DEFAULT_COLD_START_FLOOR,
            per_feedback: defaults::DEFAULT_PER_FEEDBACK,
            ceiling: defaults::DEFAULT_CONFIDENCE_CEILING,
            uniqueness_bonus_max: defaults::DEFAULT_UNIQUENESS_BONUS_MAX,
            epoch_bonus: defaults::DEFAULT_EPOCH_BONUS,
            epoch_bonus_max: defaults::DEFAULT_EPOCH_BONUS_MAX,
            loyalty_divisor: defaults::DEFAULT_LOYALTY_DIVISOR,
            loyalty_bonus_max: defaults::DEFAULT_LOYALTY_BONUS_MAX,
            quality_fast_weight_pct: defaults::DEFAULT_QUALITY_FAST_WEIGHT_PCT,
        }
    }
}

impl ConfidenceConfig {
    pub fn validate(&self) -> VouchResult<()> {
        if self.cold_start_min_samples == 0 {
            return Err(VouchError::config_bounds(
                "confidence.cold_start_min_samples",
                "must be at least 1",
            ));
        }
        if self.ceiling > CONFIDENCE_MAX {
            return Err(VouchError::config_bounds(
                "confidence.ceiling",
                format!("must be at most {CONFIDENCE_MAX}"),
            ));
        }
        if self.cold_start_floor > self.ceiling {
            return Err(VouchError::config_bounds(
                "confidence.cold_start_floor",
                "must not exceed the ceiling",
            ));
        }
        if self.loyalty_divisor == 0 {
            return Err(VouchError::config_bounds(
                "confidence.loyalty_divisor",
                "must be at least 1",
            ));
        }
        if self.quality_fast_weight_pct > 100 {
            return Err(VouchError::config_bounds(
                "confidence.quality_fast_weight_pct",
                "must be in 0..=100",
            ));
        }
        Ok(())
    }
}
