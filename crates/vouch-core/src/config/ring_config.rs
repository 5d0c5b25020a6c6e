use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::BYPASS_CAPACITY;
use crate::errors::{VouchError, VouchResult};

/// Recency ring residency policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Minimum residency time (seconds) before the ring may evict on its own.
    pub mrt_min_secs: u64,
    /// Bypass writes allowed per residency window before eviction is forced.
    pub mrt_max_bypass: u8,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            mrt_min_secs: defaults::DEFAULT_MRT_MIN_SECS,
            mrt_max_bypass: defaults::DEFAULT_MRT_MAX_BYPASS,
        }
    }
}

impl RingConfig {
    pub fn validate(&self) -> VouchResult<()> {
        if self.mrt_min_secs == 0 {
            return Err(VouchError::config_bounds("ring.mrt_min_secs", "must be at least 1"));
        }
        if self.mrt_max_bypass == 0 || usize::from(self.mrt_max_bypass) > BYPASS_CAPACITY {
            return Err(VouchError::config_bounds(
                "ring.mrt_max_bypass",
                format!("must be in 1..={BYPASS_CAPACITY}"),
            ));
        }
        Ok(())
    }
}
