use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::{CONFIDENCE_MAX, QUALITY_MAX, RISK_MAX};
use crate::errors::{VouchError, VouchResult};
use crate::models::TrustTier;

/// Entry requirements for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThreshold {
    pub min_quality: u32,
    pub max_risk: u8,
    pub min_confidence: u8,
}

impl From<(u32, u8, u8)> for TierThreshold {
    fn from((min_quality, max_risk, min_confidence): (u32, u8, u8)) -> Self {
        Self {
            min_quality,
            max_risk,
            min_confidence,
        }
    }
}

/// Tier thresholds, epoch length, and promotion vesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    pub epoch_length_secs: u64,
    /// Consecutive epochs a candidacy must hold before it is confirmed.
    pub vesting_epochs: u32,
    pub bronze: TierThreshold,
    pub silver: TierThreshold,
    pub gold: TierThreshold,
    pub platinum: TierThreshold,
    pub platinum_loyalty_gate: u8,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            epoch_length_secs: defaults::DEFAULT_EPOCH_LENGTH_SECS,
            vesting_epochs: defaults::DEFAULT_VESTING_EPOCHS,
            bronze: defaults::DEFAULT_BRONZE.into(),
            silver: defaults::DEFAULT_SILVER.into(),
            gold: defaults::DEFAULT_GOLD.into(),
            platinum: defaults::DEFAULT_PLATINUM.into(),
            platinum_loyalty_gate: defaults::DEFAULT_PLATINUM_LOYALTY_GATE,
        }
    }
}

impl TierConfig {
    /// Threshold for a rated tier. `None` for [`TrustTier::Unrated`].
    pub fn threshold(&self, tier: TrustTier) -> Option<&TierThreshold> {
        match tier {
            TrustTier::Unrated => None,
            TrustTier::Bronze => Some(&self.bronze),
            TrustTier::Silver => Some(&self.silver),
            TrustTier::Gold => Some(&self.gold),
            TrustTier::Platinum => Some(&self.platinum),
        }
    }

    pub fn validate(&self) -> VouchResult<()> {
        if self.epoch_length_secs == 0 {
            return Err(VouchError::config_bounds(
                "tiers.epoch_length_secs",
                "must be at least 1",
            ));
        }
        if !(1..=1024).contains(&self.vesting_epochs) {
            return Err(VouchError::config_bounds(
                "tiers.vesting_epochs",
                "must be in 1..=1024",
            ));
        }
        for tier in TrustTier::RATED {
            let Some(t) = self.threshold(tier) else { continue };
            if t.min_quality > QUALITY_MAX || t.max_risk > RISK_MAX || t.min_confidence > CONFIDENCE_MAX
            {
                return Err(VouchError::config_bounds(
                    "tiers.threshold",
                    format!("{tier} threshold exceeds the metric ranges"),
                ));
            }
        }
        let ladder = [self.bronze, self.silver, self.gold, self.platinum];
        for pair in ladder.windows(2) {
            let (easier, harder) = (pair[0], pair[1]);
            if harder.min_quality <= easier.min_quality
                || harder.max_risk >= easier.max_risk
                || harder.min_confidence <= easier.min_confidence
            {
                return Err(VouchError::config_bounds(
                    "tiers.threshold",
                    "thresholds must get strictly harder from bronze to platinum",
                ));
            }
        }
        Ok(())
    }
}
