use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{VouchError, VouchResult};

/// Risk signal weights (percent, summing to 100) and normalisation references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub sybil_weight: u8,
    pub burst_weight: u8,
    pub stagnation_weight: u8,
    pub shock_weight: u8,
    pub volatility_weight: u8,
    pub arrival_weight: u8,
    /// Volatility at or above which the stream no longer counts as flat.
    pub stagnation_ref: u32,
    /// Fast/slow EMA gap that counts as a full shock.
    pub shock_ref: u32,
    /// Volatility that counts as fully volatile.
    pub volatility_ref: u32,
    /// Arrival EMA (`log2(gap) * 100`) below which arrivals count as bursty.
    pub arrival_fast_ref: u32,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            sybil_weight: defaults::DEFAULT_SYBIL_WEIGHT,
            burst_weight: defaults::DEFAULT_BURST_WEIGHT,
            stagnation_weight: defaults::DEFAULT_STAGNATION_WEIGHT,
            shock_weight: defaults::DEFAULT_SHOCK_WEIGHT,
            volatility_weight: defaults::DEFAULT_VOLATILITY_WEIGHT,
            arrival_weight: defaults::DEFAULT_ARRIVAL_WEIGHT,
            stagnation_ref: defaults::DEFAULT_STAGNATION_REF,
            shock_ref: defaults::DEFAULT_SHOCK_REF,
            volatility_ref: defaults::DEFAULT_VOLATILITY_REF,
            arrival_fast_ref: defaults::DEFAULT_ARRIVAL_FAST_REF,
        }
    }
}

impl RiskConfig {
    pub fn weight_sum(&self) -> u32 {
        [
            self.sybil_weight,
            self.burst_weight,
            self.stagnation_weight,
            self.shock_weight,
            self.volatility_weight,
            self.arrival_weight,
        ]
        .iter()
        .map(|&w| u32::from(w))
        .sum()
    }

    pub fn validate(&self) -> VouchResult<()> {
        let sum = self.weight_sum();
        if sum != 100 {
            return Err(VouchError::config_bounds(
                "risk.weights",
                format!("weights must sum to 100, got {sum}"),
            ));
        }
        for (field, value) in [
            ("risk.stagnation_ref", self.stagnation_ref),
            ("risk.shock_ref", self.shock_ref),
            ("risk.volatility_ref", self.volatility_ref),
            ("risk.arrival_fast_ref", self.arrival_fast_ref),
        ] {
            if value == 0 {
                return Err(VouchError::config_bounds(field, "must be at least 1"));
            }
        }
        Ok(())
    }
}
